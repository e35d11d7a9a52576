//! # remessa-core
//!
//! Core data structures and the normalization engine for remessa.
//!
//! This crate provides:
//! - [`CellValue`], [`Cell`] - What a spreadsheet cell holds
//! - [`CellAddress`] and [`CellRange`] - Cell addressing and ranges
//! - [`Workbook`], [`Worksheet`] - The document structures
//! - [`NormalizeConfig`] - Target columns, precision and width bounds
//! - [`normalize`], [`parse_number`], [`pad_decimal`] - Value normalization
//! - [`adjust_widths`] - Column width sizing
//! - [`normalize_worksheet`], [`normalize_workbook`] - Whole-sheet passes
//!
//! ## Example
//!
//! ```rust
//! use remessa_core::{normalize_worksheet, NormalizeConfig, Worksheet};
//!
//! let mut sheet = Worksheet::new("Sheet1");
//! sheet.set_cell_value("K2", "1.234,5").unwrap();
//! sheet.set_cell_value("L2", 12.5).unwrap();
//!
//! let report = normalize_worksheet(&mut sheet, &NormalizeConfig::default());
//!
//! assert_eq!(report.cells_visited, 2);
//! assert_eq!(sheet.get_value("K2").unwrap().as_text(), Some("1234,5000"));
//! assert_eq!(sheet.get_value("L2").unwrap().as_text(), Some("12,5000"));
//! ```

pub mod cell;
pub mod config;
pub mod convert;
pub mod error;
pub mod layout;
pub mod normalize;
pub mod workbook;
pub mod worksheet;

// Re-exports for convenience
pub use cell::{Cell, CellAddress, CellError, CellKind, CellRange, CellValue};
pub use config::NormalizeConfig;
pub use convert::{normalize_workbook, normalize_worksheet, SheetReport, WorkbookReport};
pub use error::{Error, Result};
pub use layout::{adjust_widths, ColumnLengths};
pub use normalize::{
    format_fixed, normalize, normalize_value, normalize_with_outcome, pad_decimal, parse_number,
    Outcome,
};
pub use workbook::Workbook;
pub use worksheet::Worksheet;

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Number format code marking a cell as literal text
pub const TEXT_FORMAT: &str = "@";
