//! # remessa-csv
//!
//! CSV reader and writer for remessa.
//!
//! A CSV file maps to a single worksheet named `Sheet1`. Fields are kept as
//! text unless type detection is switched on; empty fields create no cell.

mod error;
mod options;
mod reader;
mod writer;

pub use error::{CsvError, CsvResult};
pub use options::{CsvReadOptions, CsvWriteOptions, LineTerminator};
pub use reader::CsvReader;
pub use writer::CsvWriter;
