//! Prelude module - common imports for remessa users
//!
//! ```rust
//! use remessa::prelude::*;
//! ```

pub use crate::{
    // Conversion
    convert_file,
    normalize,
    normalize_workbook,
    normalize_worksheet,
    parse_number,

    CellAddress,
    CellError,
    CellRange,
    // Cell types
    CellValue,
    ConvertOptions,
    Conversion,

    CsvReader,
    CsvWriter,

    // Error types
    Error,
    FileFormat,
    NormalizeConfig,
    Result,

    // Main types
    Workbook,
    // Extension traits
    WorkbookExt,
    WorkbookReport,
    Worksheet,

    // I/O types
    XlsxReader,
    XlsxWriter,
};
