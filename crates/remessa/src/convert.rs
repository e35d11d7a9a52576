//! File-level conversion: open, normalize, save

use std::fs;
use std::path::{Path, PathBuf};

use remessa_core::{normalize_workbook, NormalizeConfig, Workbook, WorkbookReport};
use remessa_csv::{CsvReadOptions, CsvReader, CsvWriteOptions, CsvWriter};
use remessa_xlsx::{XlsxReader, XlsxWriter};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::format::{output_path_for, FileFormat};

/// Options for [`convert_file`]
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Normalization settings
    pub config: NormalizeConfig,
    /// Field delimiter for CSV input and output (default: comma)
    pub csv_delimiter: u8,
    /// Directory for converted files; `None` writes next to the input
    pub output_dir: Option<PathBuf>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            config: NormalizeConfig::default(),
            csv_delimiter: b',',
            output_dir: None,
        }
    }
}

impl ConvertOptions {
    /// Use a different normalization config
    pub fn with_config(mut self, config: NormalizeConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a different CSV delimiter
    pub fn with_csv_delimiter(mut self, delimiter: u8) -> Self {
        self.csv_delimiter = delimiter;
        self
    }

    /// Write converted files into `dir`
    pub fn with_output_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.output_dir = Some(dir.into());
        self
    }
}

/// Outcome of converting one file
#[derive(Debug, Clone)]
pub struct Conversion {
    /// File that was read
    pub input: PathBuf,
    /// File that was written
    pub output: PathBuf,
    /// Size of the input in bytes
    pub input_size: u64,
    /// Per-sheet counts
    pub report: WorkbookReport,
}

/// Open a workbook, choosing the container by extension
///
/// A CSV file becomes a workbook with a single sheet.
pub fn open_workbook<P: AsRef<Path>>(path: P, options: &ConvertOptions) -> Result<Workbook> {
    let path = path.as_ref();
    match FileFormat::from_path(path)? {
        FileFormat::Xlsx => Ok(XlsxReader::read_file(path)?),
        FileFormat::Csv => {
            let read_options = CsvReadOptions::default().with_delimiter(options.csv_delimiter);
            let worksheet = CsvReader::read_file(path, &read_options)?;

            let mut workbook = Workbook::empty();
            workbook.add_existing_worksheet(worksheet)?;
            Ok(workbook)
        }
        FileFormat::Xls => Err(Error::LegacyXls(path.display().to_string())),
    }
}

/// Save a workbook, choosing the container by extension
///
/// CSV holds one sheet; only the first is written.
pub fn save_workbook<P: AsRef<Path>>(
    workbook: &Workbook,
    path: P,
    options: &ConvertOptions,
) -> Result<()> {
    let path = path.as_ref();
    match FileFormat::from_path(path)? {
        FileFormat::Xlsx => Ok(XlsxWriter::write_file(workbook, path)?),
        FileFormat::Csv => {
            let sheet = workbook
                .worksheet(0)
                .ok_or(remessa_core::Error::EmptyWorkbook)?;
            if workbook.sheet_count() > 1 {
                warn!(
                    path = %path.display(),
                    dropped = workbook.sheet_count() - 1,
                    "csv output keeps only the first sheet"
                );
            }
            let write_options = CsvWriteOptions::default().with_delimiter(options.csv_delimiter);
            Ok(CsvWriter::write_file(sheet, path, &write_options)?)
        }
        FileFormat::Xls => Err(Error::LegacyXls(path.display().to_string())),
    }
}

/// Convert one file and write `<stem>_fixed.<ext>`
///
/// Errors are wrapped in [`Error::Conversion`] naming the input.
pub fn convert_file<P: AsRef<Path>>(input: P, options: &ConvertOptions) -> Result<Conversion> {
    let input = input.as_ref();
    convert(input, options).map_err(|source| Error::Conversion {
        file: input.display().to_string(),
        source: Box::new(source),
    })
}

fn convert(input: &Path, options: &ConvertOptions) -> Result<Conversion> {
    options.config.validate()?;

    let input_size = fs::metadata(input)?.len();
    let mut workbook = open_workbook(input, options)?;
    let report = normalize_workbook(&mut workbook, &options.config)?;

    if let Some(dir) = &options.output_dir {
        fs::create_dir_all(dir)?;
    }
    let output = output_path_for(input, options.output_dir.as_deref());
    save_workbook(&workbook, &output, options)?;

    debug!(
        input = %input.display(),
        output = %output.display(),
        sheets = report.sheets.len(),
        cells = report.cells_visited(),
        "converted file"
    );

    Ok(Conversion {
        input: input.to_path_buf(),
        output,
        input_size,
        report,
    })
}
