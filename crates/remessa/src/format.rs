//! File format detection and output naming

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Suffix appended to the input's stem to name the converted file
pub const OUTPUT_SUFFIX: &str = "_fixed";

/// Workbook container, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// `.csv`
    Csv,
    /// `.xlsx` or `.xlsm`
    Xlsx,
    /// `.xls` (recognized so it can be rejected with a clear message)
    Xls,
}

impl FileFormat {
    /// Detect the format from the extension (case-insensitive)
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match extension.as_deref() {
            Some("csv") => Ok(FileFormat::Csv),
            Some("xlsx") | Some("xlsm") => Ok(FileFormat::Xlsx),
            Some("xls") => Ok(FileFormat::Xls),
            _ => Err(Error::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Extension written for converted output of this format
    pub fn output_extension(self) -> &'static str {
        match self {
            FileFormat::Csv => "csv",
            FileFormat::Xlsx | FileFormat::Xls => "xlsx",
        }
    }
}

/// Where the converted copy of `input` goes
///
/// `<stem>_fixed.csv` for CSV input and `<stem>_fixed.xlsx` otherwise, next to
/// the input unless `output_dir` is given.
pub fn output_path_for(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    let extension = FileFormat::from_path(input)
        .map(FileFormat::output_extension)
        .unwrap_or("xlsx");
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    let file_name = format!("{}{}.{}", stem, OUTPUT_SUFFIX, extension);

    match output_dir {
        Some(dir) => dir.join(file_name),
        None => input.with_file_name(file_name),
    }
}
