use super::model::{FieldValue, TransactionRecord, TransactionTable};

// ---------------------------------------------------------------------------
// Filter selection: at most one value per dimension
// ---------------------------------------------------------------------------

/// Per-call selection. `None` in a dimension means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub zip: Option<FieldValue>,
    pub month: Option<u32>,
    pub year: Option<i32>,
}

impl FilterSelection {
    pub fn is_unset(&self) -> bool {
        self.zip.is_none() && self.month.is_none() && self.year.is_none()
    }

    /// AND of the per-dimension predicates; an unset dimension always holds.
    pub fn matches(&self, record: &TransactionRecord) -> bool {
        self.zip.as_ref().map_or(true, |zip| record.customer_zip == *zip)
            && self.month.map_or(true, |month| record.month() == month)
            && self.year.map_or(true, |year| record.year() == year)
    }
}

/// Return indices of rows passing `selection`, newest date first.
///
/// Rows sharing a date keep their base-table order. The all-unset selection
/// goes through the same path, so it is sorted as well.
pub fn filtered_indices(table: &TransactionTable, selection: &FilterSelection) -> Vec<usize> {
    let mut indices: Vec<usize> = table
        .records
        .iter()
        .enumerate()
        .filter(|(_, record)| selection.matches(record))
        .map(|(i, _)| i)
        .collect();

    // `sort_by` is stable.
    indices.sort_by(|&a, &b| {
        table.records[b]
            .transaction_date
            .cmp(&table.records[a].transaction_date)
    });

    log::debug!(
        "Selection {:?} matched {} of {} rows",
        selection,
        indices.len(),
        table.len()
    );
    indices
}

/// Rows passing `selection`, newest date first.
pub fn filter<'a>(table: &'a TransactionTable, selection: &FilterSelection) -> Vec<&'a TransactionRecord> {
    filtered_indices(table, selection)
        .into_iter()
        .map(|i| &table.records[i])
        .collect()
}
