//! Property-based tests for the filter engine.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use proptest::prelude::*;

use super::filter::{filter, filtered_indices, FilterSelection};
use super::model::{FieldValue, TransactionRecord, TransactionTable};

const ZIPS: [i64; 3] = [10001, 30301, 60601];

/// Small date range so that ties and shared months/years are common.
fn record_strategy() -> impl Strategy<Value = TransactionRecord> {
    (2017i32..=2019, 1u32..=3, 1u32..=4, 0usize..ZIPS.len(), 0i64..1_000).prop_map(
        |(year, month, day, zip, amount)| TransactionRecord {
            transaction_date: NaiveDate::from_ymd_opt(year, month, day).unwrap(),
            customer_zip: FieldValue::Integer(ZIPS[zip]),
            customer_state: FieldValue::String("NY".into()),
            transaction_type: FieldValue::String("Gas".into()),
            attributes: BTreeMap::from([("AMOUNT".to_string(), FieldValue::Integer(amount))]),
        },
    )
}

fn table_strategy() -> impl Strategy<Value = TransactionTable> {
    prop::collection::vec(record_strategy(), 0..40).prop_map(|records| TransactionTable {
        column_names: Vec::new(),
        records,
    })
}

fn selection_strategy() -> impl Strategy<Value = FilterSelection> {
    (
        prop::option::of(prop_oneof![
            (0usize..ZIPS.len()).prop_map(|i| FieldValue::Integer(ZIPS[i])),
            Just(FieldValue::Integer(99999)),
        ]),
        prop::option::of(1u32..=4),
        prop::option::of(2016i32..=2019),
    )
        .prop_map(|(zip, month, year)| FilterSelection { zip, month, year })
}

/// Drop some of the dimensions set in `selection`.
fn weaken(selection: &FilterSelection, mask: (bool, bool, bool)) -> FilterSelection {
    FilterSelection {
        zip: selection.zip.clone().filter(|_| mask.0),
        month: selection.month.filter(|_| mask.1),
        year: selection.year.filter(|_| mask.2),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Setting more dimensions can only shrink the result.
    #[test]
    fn prop_more_dimensions_narrow_result(
        table in table_strategy(),
        strong in selection_strategy(),
        mask in any::<(bool, bool, bool)>(),
    ) {
        let weak = weaken(&strong, mask);
        let strong_rows = filtered_indices(&table, &strong);
        let weak_rows = filtered_indices(&table, &weak);
        for i in &strong_rows {
            prop_assert!(weak_rows.contains(i));
        }
    }

    /// Every returned row satisfies every set dimension, and every row that
    /// satisfies them is returned.
    #[test]
    fn prop_result_is_exactly_the_matching_rows(
        table in table_strategy(),
        selection in selection_strategy(),
    ) {
        let mut got = filtered_indices(&table, &selection);
        got.sort_unstable();
        let expected: Vec<usize> = (0..table.len())
            .filter(|&i| {
                let r = &table.records[i];
                selection.zip.as_ref().map_or(true, |z| &r.customer_zip == z)
                    && selection.month.map_or(true, |m| r.month() == m)
                    && selection.year.map_or(true, |y| r.year() == y)
            })
            .collect();
        prop_assert_eq!(got, expected);
    }

    /// Dates never increase; equal dates keep base-table order.
    #[test]
    fn prop_sorted_descending_and_stable(
        table in table_strategy(),
        selection in selection_strategy(),
    ) {
        let indices = filtered_indices(&table, &selection);
        for pair in indices.windows(2) {
            let (a, b) = (&table.records[pair[0]], &table.records[pair[1]]);
            prop_assert!(a.transaction_date >= b.transaction_date);
            if a.transaction_date == b.transaction_date {
                prop_assert!(pair[0] < pair[1]);
            }
        }
    }

    #[test]
    fn prop_idempotent(
        table in table_strategy(),
        selection in selection_strategy(),
    ) {
        prop_assert_eq!(filter(&table, &selection), filter(&table, &selection));
    }

    /// The all-unset selection returns the whole population.
    #[test]
    fn prop_unset_returns_every_row(table in table_strategy()) {
        let mut indices = filtered_indices(&table, &FilterSelection::default());
        indices.sort_unstable();
        prop_assert_eq!(indices, (0..table.len()).collect::<Vec<_>>());
    }
}
