//! CSV error types

use thiserror::Error;

/// Result type for CSV operations
pub type CsvResult<T> = std::result::Result<T, CsvError>;

/// Errors that can occur during CSV operations
#[derive(Debug, Error)]
pub enum CsvError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV library error (malformed quoting, invalid UTF-8, ...)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Record wider than a worksheet allows
    #[error("Row {row} has {fields} fields, more than a worksheet can hold")]
    TooManyFields { row: u32, fields: usize },

    /// Core error
    #[error("Core error: {0}")]
    Core(#[from] remessa_core::Error),
}
