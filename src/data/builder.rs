use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::NaiveDate;
use csv::StringRecord;

use super::error::BuildError;
use super::loader::RawTable;
use super::model::{
    CandidateLists, Dataset, FieldValue, TransactionRecord, TransactionTable, CUSTOMER_KEY,
    DATE_COLUMN, STATE_COLUMN, TRANSACTION_CUSTOMER_KEY, TYPE_COLUMN, ZIP_COLUMN,
};

/// Customer columns kept for the join; the key itself is only the map key.
#[derive(Debug, Clone)]
struct CustomerLocation {
    zip: FieldValue,
    state: FieldValue,
}

/// Join customers onto transactions and derive the picker lists.
///
/// * inner join on the customer key, transaction order preserved; unmatched
///   transactions are dropped
/// * the key column never reaches the output
/// * `TIMEID` is parsed into a calendar date; any bad token aborts the build
pub fn build_dataset(customers: &RawTable, transactions: &RawTable) -> Result<Dataset, BuildError> {
    let index = index_customers(customers)?;

    let key_idx = transactions.column_index(TRANSACTION_CUSTOMER_KEY)?;
    let date_idx = transactions.column_index(DATE_COLUMN)?;
    let type_idx = transactions.column_index(TYPE_COLUMN)?;
    for column in [CUSTOMER_KEY, ZIP_COLUMN, STATE_COLUMN] {
        if transactions.has_column(column) {
            return Err(BuildError::ColumnConflict { column });
        }
    }

    let passthrough: Vec<(usize, &String)> = transactions
        .headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != key_idx && *i != date_idx && *i != type_idx)
        .collect();

    let mut records = Vec::with_capacity(transactions.rows.len());
    let mut unmatched = 0usize;

    for (i, row) in transactions.rows.iter().enumerate() {
        let row_no = i + 1;
        let key = join_key(transactions.name, row, key_idx, TRANSACTION_CUSTOMER_KEY, row_no)?;
        let Some(matches) = index.get(&key) else {
            unmatched += 1;
            continue;
        };

        let transaction_date = parse_timeid(row.get(date_idx).unwrap_or(""), row_no)?;
        let transaction_type = FieldValue::parse(row.get(type_idx).unwrap_or(""));
        let attributes: BTreeMap<String, FieldValue> = passthrough
            .iter()
            .map(|(idx, name)| ((*name).clone(), FieldValue::parse(row.get(*idx).unwrap_or(""))))
            .collect();

        // One output row per matching customer row, like a dataframe merge.
        for customer in matches {
            records.push(TransactionRecord {
                transaction_date,
                customer_zip: customer.zip.clone(),
                customer_state: customer.state.clone(),
                transaction_type: transaction_type.clone(),
                attributes: attributes.clone(),
            });
        }
    }

    if unmatched > 0 {
        log::warn!("Dropped {unmatched} transactions with no matching customer");
    }

    let column_names = transactions
        .headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != key_idx)
        .map(|(_, h)| h.clone())
        .chain([ZIP_COLUMN.to_string(), STATE_COLUMN.to_string()])
        .collect();

    let table = TransactionTable {
        column_names,
        records,
    };
    let candidates = derive_candidates(&table);

    log::info!(
        "Built base table: {} rows, {} zip codes, {} months, {} years",
        table.len(),
        candidates.zip_codes.len(),
        candidates.months.len(),
        candidates.years.len()
    );

    Ok(Dataset { table, candidates })
}

fn index_customers(
    customers: &RawTable,
) -> Result<HashMap<FieldValue, Vec<CustomerLocation>>, BuildError> {
    let key_idx = customers.column_index(CUSTOMER_KEY)?;
    let zip_idx = customers.column_index(ZIP_COLUMN)?;
    let state_idx = customers.column_index(STATE_COLUMN)?;

    let mut index: HashMap<FieldValue, Vec<CustomerLocation>> = HashMap::new();
    for (i, row) in customers.rows.iter().enumerate() {
        let key = join_key(customers.name, row, key_idx, CUSTOMER_KEY, i + 1)?;
        index.entry(key).or_default().push(CustomerLocation {
            zip: FieldValue::parse(row.get(zip_idx).unwrap_or("")),
            state: FieldValue::parse(row.get(state_idx).unwrap_or("")),
        });
    }
    Ok(index)
}

fn join_key(
    table: &'static str,
    row: &StringRecord,
    idx: usize,
    column: &'static str,
    row_no: usize,
) -> Result<FieldValue, BuildError> {
    let key = FieldValue::parse(row.get(idx).unwrap_or(""));
    if key.is_null() {
        return Err(BuildError::MissingJoinKey {
            table,
            column,
            row: row_no,
        });
    }
    Ok(key)
}

/// Parse an 8-digit `YYYYMMDD` token. Integer-like tokens written as floats
/// (`20180412.0`) are accepted.
pub fn parse_timeid(raw: &str, row: usize) -> Result<NaiveDate, BuildError> {
    let malformed = || BuildError::MalformedDate {
        column: DATE_COLUMN,
        row,
        value: raw.to_string(),
    };

    let token = raw.trim();
    let digits = token.strip_suffix(".0").unwrap_or(token);
    if digits.len() != 8 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    NaiveDate::parse_from_str(digits, "%Y%m%d").map_err(|_| malformed())
}

fn derive_candidates(table: &TransactionTable) -> CandidateLists {
    let mut zip_codes = BTreeSet::new();
    let mut months = BTreeSet::new();
    let mut years = BTreeSet::new();
    let mut transaction_types = BTreeSet::new();
    let mut states = BTreeSet::new();

    for record in &table.records {
        zip_codes.insert(record.customer_zip.clone());
        months.insert(record.month());
        years.insert(record.year());
        transaction_types.insert(record.transaction_type.clone());
        states.insert(record.customer_state.clone());
    }

    CandidateLists {
        zip_codes: zip_codes.into_iter().collect(),
        months: months.into_iter().collect(),
        years: years.into_iter().collect(),
        transaction_types: transaction_types.into_iter().collect(),
        states: states.into_iter().collect(),
    }
}
