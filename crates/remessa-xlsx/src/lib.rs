//! # remessa-xlsx
//!
//! XLSX (Office Open XML) reader and writer for remessa.
//!
//! Only what the normalization pipeline needs survives a round trip: cell
//! values, formulas with their cached values, number format codes and column
//! widths. Fonts, fills, borders, merged cells and the like are not kept.

pub mod error;
pub mod reader;
pub mod writer;

mod escape;
mod styles;

pub use error::{XlsxError, XlsxResult};
pub use reader::XlsxReader;
pub use writer::XlsxWriter;
