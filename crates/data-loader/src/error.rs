//! Errors raised while reading, writing and checking book CSVs.

use thiserror::Error;

/// Errors that can occur while reading, writing or validating book datasets
#[derive(Error, Debug)]
pub enum DataLoadError {
    #[error("Dataset file not found: {path}")]
    FileNotFound { path: String },

    #[error("Could not access dataset: {0}")]
    IoError(#[from] std::io::Error),

    /// The CSV reader or writer rejected a record
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// A column the loader relies on is absent from the header row
    #[error("Missing column '{column}' in {file}")]
    MissingColumn { file: String, column: String },

    /// A cell could not be converted to its column type
    #[error("{file}, line {line}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// A parsed value is outside its allowed range
    #[error("{field} out of range: {value}")]
    InvalidValue { field: String, value: String },
}

pub type Result<T> = std::result::Result<T, DataLoadError>;
