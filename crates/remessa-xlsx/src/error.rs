//! Failures while reading or writing an XLSX package

use thiserror::Error;

pub type XlsxResult<T> = std::result::Result<T, XlsxError>;

#[derive(Debug, Error)]
pub enum XlsxError {
    #[error("cannot access the package: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt zip container: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("malformed XML in package part: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The zip opened but is not a spreadsheet package
    #[error("not an XLSX package: {0}")]
    NotXlsx(String),

    /// A part named by the workbook or its relationships is absent
    #[error("package part '{0}' is missing")]
    MissingPart(String),

    /// A `<c>` element whose reference or value cannot be used
    #[error("bad cell in worksheet: {0}")]
    BadCell(String),

    /// Rejected by the workbook model, e.g. a duplicate sheet name
    #[error(transparent)]
    Core(#[from] remessa_core::Error),
}
