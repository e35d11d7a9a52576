//! Error types for file-level conversion

use remessa_csv::CsvError;
use remessa_xlsx::XlsxError;
use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from opening, converting or saving a workbook file
#[derive(Debug, Error)]
pub enum Error {
    /// CSV container error
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// XLSX container error
    #[error("XLSX error: {0}")]
    Xlsx(#[from] XlsxError),

    /// Core error (empty workbook, invalid configuration, ...)
    #[error(transparent)]
    Core(#[from] remessa_core::Error),

    /// Extension is not one of .csv, .xlsx, .xlsm, .xls
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Legacy binary workbook
    #[error("Legacy .xls workbooks are not supported, save as .xlsx first: {0}")]
    LegacyXls(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A conversion failed; names the input file
    #[error("Failed to convert {file}")]
    Conversion {
        file: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// The input file, if this error came out of [`convert_file`](crate::convert_file)
    pub fn file(&self) -> Option<&str> {
        match self {
            Error::Conversion { file, .. } => Some(file),
            _ => None,
        }
    }
}
