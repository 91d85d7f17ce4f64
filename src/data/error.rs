use thiserror::Error;

/// Input-data errors raised while building the dataset. Any of these aborts
/// the build; a partially-built dataset is never returned.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("{table}: missing required column '{column}'")]
    MissingColumn { table: &'static str, column: &'static str },

    #[error("{table} row {row}: empty customer key in column '{column}'")]
    MissingJoinKey {
        table: &'static str,
        column: &'static str,
        row: usize,
    },

    #[error("transactions row {row}: '{value}' in column '{column}' is not a YYYYMMDD date")]
    MalformedDate {
        column: &'static str,
        row: usize,
        value: String,
    },

    #[error("transactions: column '{column}' would clash with the joined customer column")]
    ColumnConflict { column: &'static str },

    #[error("{table}: {source}")]
    Csv {
        table: &'static str,
        #[source]
        source: csv::Error,
    },
}
