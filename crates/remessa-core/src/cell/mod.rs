//! Cell-related types and utilities
//!
//! This module contains:
//! - [`CellValue`] - The raw value stored in a cell
//! - [`Cell`] - A value together with its formula and number format
//! - [`CellAddress`] - A cell's location (e.g., "K2")
//! - [`CellRange`] - A range of cells (e.g., "A1:X40")

mod address;
mod value;

pub use address::{CellAddress, CellRange};
pub use value::{Cell, CellError, CellKind, CellValue};
