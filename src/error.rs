use thiserror::Error;

use crate::ingestion::columns::SourceColumn;

/// Convenience result type for ingestion operations.
pub type IngestionResult<T> = Result<T, IngestionError>;

/// Convenience result type for lookups and writes on the area/measure model.
pub type ModelResult<T> = Result<T, ModelError>;

/// Error type returned by model lookups and writes.
///
/// `NotFound` is the expected outcome of probing for an entry that has not been created yet;
/// `InvalidArgument` rejects a single write and leaves the model unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A lookup by key missed (area code, measure codename, language, year).
    #[error("no {what} found matching {key}")]
    NotFound { what: &'static str, key: String },

    /// A write was rejected because its argument is malformed.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl ModelError {
    pub(crate) fn not_found(what: &'static str, key: impl Into<String>) -> Self {
        Self::NotFound {
            what,
            key: key.into(),
        }
    }
}

/// Error type returned by ingestion functions.
///
/// Every variant is fatal to the file being ingested and to nothing else: callers loading
/// several files report the error and carry on with the next one.
#[derive(Debug, Error)]
pub enum IngestionError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The JSON document could not be parsed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The file does not have the layout its column mapping describes (wrong header, missing
    /// record field, missing `value` array).
    #[error("malformed file: {message}")]
    MalformedFile { message: String },

    /// The column mapping handed to a parser lacks an entry that parser requires.
    #[error("not enough columns in mapping: missing {column} (mapping has {available} entries)")]
    NotEnoughColumns {
        column: SourceColumn,
        available: usize,
    },

    /// The dispatcher was asked for a source type it does not know.
    #[error("unexpected data type '{data_type}'")]
    UnexpectedDataType { data_type: String },

    /// A year or value could not be parsed as a number.
    #[error("failed to parse value at row {row} column '{column}': {message} (raw='{raw}')")]
    ParseError {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },

    /// A model write failed while building a record (e.g. malformed language code).
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl IngestionError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedFile {
            message: message.into(),
        }
    }
}
