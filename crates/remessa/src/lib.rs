//! # remessa
//!
//! Normalize remittance spreadsheets so that monetary columns hold
//! fixed-decimal text with a comma separator (`1234,5600`), whatever locale
//! the values were typed in.
//!
//! ## Features
//!
//! - Read and write XLSX files (Office Open XML)
//! - Read and write CSV files
//! - Locale-tolerant number parsing (`1.234,56`, `1,234.56`, `1e3`, `0x1F`)
//! - Every non-empty cell frozen to literal text, formulas dropped
//! - Column widths recomputed from the normalized text
//!
//! ## Example
//!
//! ```rust
//! use remessa::prelude::*;
//!
//! let mut workbook = Workbook::new();
//! let sheet = workbook.worksheet_mut(0).unwrap();
//! sheet.set_cell_value("K1", "Valor").unwrap();
//! sheet.set_cell_value("K2", "1.234,56").unwrap();
//! sheet.set_cell_value("L2", 7.5).unwrap();
//!
//! let report = normalize_workbook(&mut workbook, &NormalizeConfig::default()).unwrap();
//! let sheet = workbook.worksheet(0).unwrap();
//!
//! assert_eq!(report.target_cells(), 3);
//! assert_eq!(sheet.get_value("K2").unwrap().as_text(), Some("1234,5600"));
//! assert_eq!(sheet.get_value("L2").unwrap().as_text(), Some("7,5000"));
//!
//! // Save to file
//! // workbook.save("remessa_fixed.xlsx").unwrap();
//! ```

pub mod convert;
pub mod error;
pub mod format;
pub mod prelude;

pub use convert::{convert_file, open_workbook, save_workbook, ConvertOptions, Conversion};
pub use error::{Error, Result};
pub use format::{output_path_for, FileFormat, OUTPUT_SUFFIX};

// Re-export core types
pub use remessa_core::{
    adjust_widths,
    format_fixed,
    normalize,
    normalize_value,
    // Sheet passes
    normalize_workbook,
    normalize_worksheet,
    normalize_with_outcome,
    pad_decimal,
    parse_number,
    // Cell types
    Cell,
    CellAddress,
    CellError,
    CellKind,
    CellRange,
    CellValue,
    ColumnLengths,
    // Configuration
    NormalizeConfig,
    Outcome,
    SheetReport,
    // Main types
    Workbook,
    WorkbookReport,
    Worksheet,

    MAX_COLS,
    // Constants
    MAX_ROWS,
    MAX_SHEET_NAME_LEN,
    TEXT_FORMAT,
};

/// Errors from the cell model and configuration
pub use remessa_core::Error as CoreError;

// Re-export I/O types
pub use remessa_csv::{CsvError, CsvReadOptions, CsvReader, CsvWriteOptions, CsvWriter};
pub use remessa_xlsx::{XlsxError, XlsxReader, XlsxWriter};

use std::path::Path;

/// Extension trait for Workbook to add file I/O with default options
pub trait WorkbookExt {
    /// Open a workbook from a file
    fn open<P: AsRef<Path>>(path: P) -> Result<Workbook>;

    /// Save the workbook to a file
    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()>;
}

impl WorkbookExt for Workbook {
    fn open<P: AsRef<Path>>(path: P) -> Result<Workbook> {
        open_workbook(path, &ConvertOptions::default())
    }

    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        save_workbook(self, path, &ConvertOptions::default())
    }
}
