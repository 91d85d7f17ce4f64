use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use csv::StringRecord;

use super::builder::build_dataset;
use super::error::BuildError;
use super::model::Dataset;

pub const CUSTOMER_FILE: &str = "cleaned_customer.csv";
pub const TRANSACTION_FILE: &str = "cleaned_credit.csv";

// ---------------------------------------------------------------------------
// RawTable – a CSV file read verbatim
// ---------------------------------------------------------------------------

/// Header row plus data rows of one delimited input file. Cells are kept as
/// text; typing happens in the builder.
#[derive(Debug, Clone)]
pub struct RawTable {
    /// Name used in error messages ("customers" / "transactions").
    pub name: &'static str,
    pub headers: Vec<String>,
    pub rows: Vec<StringRecord>,
}

impl RawTable {
    /// Read a CSV with a header row from any reader.
    pub fn from_reader<R: io::Read>(name: &'static str, reader: R) -> Result<Self, BuildError> {
        let csv_error = |source| BuildError::Csv { table: name, source };

        let mut reader = csv::Reader::from_reader(reader);
        let headers = reader
            .headers()
            .map_err(csv_error)?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        let rows = reader
            .records()
            .collect::<Result<Vec<_>, _>>()
            .map_err(csv_error)?;

        Ok(RawTable {
            name,
            headers,
            rows,
        })
    }

    pub fn from_path(name: &'static str, path: &Path) -> Result<Self, BuildError> {
        let file = std::fs::File::open(path).map_err(|e| BuildError::Csv {
            table: name,
            source: csv::Error::from(e),
        })?;
        Self::from_reader(name, file)
    }

    /// Position of a required column.
    pub fn column_index(&self, column: &'static str) -> Result<usize, BuildError> {
        self.headers
            .iter()
            .position(|h| h == column)
            .ok_or(BuildError::MissingColumn {
                table: self.name,
                column,
            })
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Locations of the two input files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub customers: PathBuf,
    pub transactions: PathBuf,
}

impl DataPaths {
    /// Conventional file names inside a data directory.
    pub fn from_dir(dir: &Path) -> Self {
        DataPaths {
            customers: dir.join(CUSTOMER_FILE),
            transactions: dir.join(TRANSACTION_FILE),
        }
    }
}

/// Read both input files and build the dataset.
pub fn load_dataset(paths: &DataPaths) -> Result<Dataset> {
    let customers = RawTable::from_path("customers", &paths.customers)
        .with_context(|| format!("reading {}", paths.customers.display()))?;
    let transactions = RawTable::from_path("transactions", &paths.transactions)
        .with_context(|| format!("reading {}", paths.transactions.display()))?;

    log::info!(
        "Read {} customer rows and {} transaction rows",
        customers.rows.len(),
        transactions.rows.len()
    );

    let dataset = build_dataset(&customers, &transactions).context("building dataset")?;
    Ok(dataset)
}
