use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::ser::{Serialize, SerializeMap, Serializer};

// ---------------------------------------------------------------------------
// Column names of the input files (external contract)
// ---------------------------------------------------------------------------

/// Customer key in the customer file.
pub const CUSTOMER_KEY: &str = "SSN";
/// Customer key as it appears in the transaction file.
pub const TRANSACTION_CUSTOMER_KEY: &str = "CUST_SSN";
pub const ZIP_COLUMN: &str = "CUST_ZIP";
pub const STATE_COLUMN: &str = "CUST_STATE";
/// `YYYYMMDD` transaction date.
pub const DATE_COLUMN: &str = "TIMEID";
pub const TYPE_COLUMN: &str = "TRANSACTION_TYPE";

// ---------------------------------------------------------------------------
// FieldValue – a single cell of an input table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value, inferred the way a dataframe reader would.
/// Used as a `BTreeSet` key for the candidate lists, so it must be `Ord`.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Null,
}

// -- Manual Eq/Ord so we can put FieldValue in BTreeSet --

/// Agrees with `Ord` and `Hash`: floats compare by `total_cmp`.
impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for FieldValue {}

impl PartialOrd for FieldValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FieldValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use FieldValue::*;
        fn discriminant(v: &FieldValue) -> u8 {
            match v {
                Null => 0,
                Integer(_) => 1,
                Float(_) => 2,
                String(_) => 3,
            }
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => discriminant(self).cmp(&discriminant(other)),
        }
    }
}

impl std::hash::Hash for FieldValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            FieldValue::String(s) => s.hash(state),
            FieldValue::Integer(i) => i.hash(state),
            FieldValue::Float(f) => f.to_bits().hash(state),
            FieldValue::Null => {}
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{s}"),
            FieldValue::Integer(i) => write!(f, "{i}"),
            FieldValue::Float(v) => write!(f, "{v}"),
            FieldValue::Null => Ok(()),
        }
    }
}

/// Cell texts read as missing, as a dataframe reader's default `na_values`.
const MISSING_MARKERS: [&str; 12] = [
    "NaN", "nan", "-NaN", "-nan", "NA", "N/A", "n/a", "#N/A", "NULL", "null", "<NA>", "None",
];

impl FieldValue {
    /// Infer the type of a raw CSV cell: empty or a missing-value marker →
    /// Null, then integer, float, and finally plain text.
    pub fn parse(raw: &str) -> Self {
        let s = raw.trim();
        if s.is_empty() || MISSING_MARKERS.contains(&s) {
            return FieldValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return FieldValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return FieldValue::Float(f);
        }
        FieldValue::String(s.to_string())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

// ---------------------------------------------------------------------------
// TransactionRecord – one row of the base table
// ---------------------------------------------------------------------------

/// A joined transaction row. The customer key never survives into this type.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    pub transaction_date: NaiveDate,
    pub customer_zip: FieldValue,
    pub customer_state: FieldValue,
    pub transaction_type: FieldValue,
    /// Remaining transaction columns, passed through untouched.
    pub attributes: BTreeMap<String, FieldValue>,
}

impl TransactionRecord {
    pub fn month(&self) -> u32 {
        self.transaction_date.month()
    }

    pub fn year(&self) -> i32 {
        self.transaction_date.year()
    }

    /// Text of the named column, empty when the row has no such column.
    pub fn cell(&self, column: &str) -> String {
        match column {
            DATE_COLUMN => self.transaction_date.to_string(),
            ZIP_COLUMN => self.customer_zip.to_string(),
            STATE_COLUMN => self.customer_state.to_string(),
            TYPE_COLUMN => self.transaction_type.to_string(),
            other => self
                .attributes
                .get(other)
                .map(|v| v.to_string())
                .unwrap_or_default(),
        }
    }
}

/// Serialized as a flat record keyed by column name.
impl Serialize for TransactionRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.attributes.len() + 4))?;
        for (column, value) in &self.attributes {
            map.serialize_entry(column, value)?;
        }
        map.serialize_entry(DATE_COLUMN, &self.transaction_date)?;
        map.serialize_entry(TYPE_COLUMN, &self.transaction_type)?;
        map.serialize_entry(ZIP_COLUMN, &self.customer_zip)?;
        map.serialize_entry(STATE_COLUMN, &self.customer_state)?;
        map.end()
    }
}

// ---------------------------------------------------------------------------
// TransactionTable / CandidateLists / Dataset
// ---------------------------------------------------------------------------

/// The base table: joined, redacted and date-normalised rows.
#[derive(Debug, Clone, Default)]
pub struct TransactionTable {
    /// Display order: transaction columns, then `CUST_ZIP`, `CUST_STATE`.
    pub column_names: Vec<String>,
    pub records: Vec<TransactionRecord>,
}

impl TransactionTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Distinct values per picker, each sorted ascending.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct CandidateLists {
    pub zip_codes: Vec<FieldValue>,
    pub months: Vec<u32>,
    pub years: Vec<i32>,
    pub transaction_types: Vec<FieldValue>,
    pub states: Vec<FieldValue>,
}

/// Everything the engine and the viewer read. Never mutated after build.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub table: TransactionTable,
    pub candidates: CandidateLists,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn parse_infers_cell_types() {
        assert_eq!(FieldValue::parse(""), FieldValue::Null);
        assert_eq!(FieldValue::parse(" 10001 "), FieldValue::Integer(10001));
        assert_eq!(FieldValue::parse("19.99"), FieldValue::Float(19.99));
        assert_eq!(FieldValue::parse("NY"), FieldValue::String("NY".into()));
        assert_eq!(FieldValue::parse("inf"), FieldValue::Float(f64::INFINITY));
    }

    #[test]
    fn missing_markers_parse_as_null() {
        for marker in ["NaN", "nan", " NA ", "N/A", "null", "<NA>"] {
            assert_eq!(FieldValue::parse(marker), FieldValue::Null, "{marker:?}");
        }
    }

    #[test]
    fn equality_agrees_with_ordering_and_hash() {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let hash = |v: &FieldValue| {
            let mut h = DefaultHasher::new();
            v.hash(&mut h);
            h.finish()
        };
        let nan = FieldValue::Float(f64::NAN);
        assert_eq!(nan, nan.clone());
        assert_eq!(nan.cmp(&nan.clone()), std::cmp::Ordering::Equal);
        assert_eq!(hash(&nan), hash(&nan.clone()));
        assert_ne!(FieldValue::Integer(1), FieldValue::Float(1.0));
    }

    #[test]
    fn ordering_groups_by_kind_then_value() {
        let set: BTreeSet<FieldValue> = [
            FieldValue::String("b".into()),
            FieldValue::Integer(7),
            FieldValue::Null,
            FieldValue::Integer(3),
            FieldValue::String("a".into()),
        ]
        .into_iter()
        .collect();
        let ordered: Vec<_> = set.into_iter().collect();
        assert_eq!(
            ordered,
            vec![
                FieldValue::Null,
                FieldValue::Integer(3),
                FieldValue::Integer(7),
                FieldValue::String("a".into()),
                FieldValue::String("b".into()),
            ]
        );
    }

    #[test]
    fn record_serializes_flat_without_customer_key() {
        let record = TransactionRecord {
            transaction_date: NaiveDate::from_ymd_opt(2018, 4, 12).unwrap(),
            customer_zip: FieldValue::Integer(10001),
            customer_state: FieldValue::String("NY".into()),
            transaction_type: FieldValue::String("Grocery".into()),
            attributes: BTreeMap::from([(
                "TRANSACTION_VALUE".to_string(),
                FieldValue::Float(50.5),
            )]),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "TRANSACTION_VALUE": 50.5,
                "TIMEID": "2018-04-12",
                "TRANSACTION_TYPE": "Grocery",
                "CUST_ZIP": 10001,
                "CUST_STATE": "NY",
            })
        );
        assert!(json.get(CUSTOMER_KEY).is_none());
        assert!(json.get(TRANSACTION_CUSTOMER_KEY).is_none());
    }

    #[test]
    fn cell_renders_typed_and_passthrough_columns() {
        let record = TransactionRecord {
            transaction_date: NaiveDate::from_ymd_opt(2018, 1, 2).unwrap(),
            customer_zip: FieldValue::Integer(30301),
            customer_state: FieldValue::String("GA".into()),
            transaction_type: FieldValue::String("Gas".into()),
            attributes: BTreeMap::from([("BRANCH_CODE".to_string(), FieldValue::Integer(114))]),
        };
        assert_eq!(record.cell(DATE_COLUMN), "2018-01-02");
        assert_eq!(record.cell(ZIP_COLUMN), "30301");
        assert_eq!(record.cell("BRANCH_CODE"), "114");
        assert_eq!(record.cell("MISSING"), "");
        assert_eq!((record.year(), record.month()), (2018, 1));
    }
}
