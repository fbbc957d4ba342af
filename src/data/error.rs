use thiserror::Error;

/// Failures of the data layer. All of them end the current load session;
/// nothing is retried automatically.
#[derive(Debug, Error)]
pub enum DataError {
    /// The source could not be read or answered with a non-success status.
    #[error("failed to load {source_id}: {reason}")]
    Load { source_id: String, reason: String },

    /// The decoded text is not well-formed comma-separated data.
    #[error("malformed CSV: {0}")]
    Parse(String),

    /// A schema column is absent from a record.
    #[error("column '{column}' missing from record {row}")]
    MissingColumn { column: String, row: usize },
}

impl From<csv::Error> for DataError {
    fn from(err: csv::Error) -> Self {
        DataError::Parse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
