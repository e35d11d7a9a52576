//! CSV reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use remessa_core::{CellValue, Worksheet, MAX_COLS};
use tracing::debug;

use crate::error::{CsvError, CsvResult};
use crate::options::CsvReadOptions;

/// CSV file reader
pub struct CsvReader;

impl CsvReader {
    /// Read CSV file into a worksheet
    pub fn read_file<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> CsvResult<Worksheet> {
        let file = File::open(path)?;
        Self::read(file, options)
    }

    /// Read CSV from a reader into a worksheet
    pub fn read<R: Read>(reader: R, options: &CsvReadOptions) -> CsvResult<Worksheet> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(options.has_header)
            .flexible(true)
            .from_reader(reader);

        let mut worksheet = Worksheet::new("Sheet1");
        let mut row_idx = 0u32;

        if options.has_header {
            let headers = csv_reader.headers()?.clone();
            Self::store_record(&mut worksheet, row_idx, &headers, false)?;
            row_idx += 1;
        }

        for result in csv_reader.records() {
            let record = result?;
            Self::store_record(&mut worksheet, row_idx, &record, options.auto_detect_types)?;
            row_idx += 1;
        }

        debug!(rows = row_idx, cells = worksheet.cell_count(), "read csv");
        Ok(worksheet)
    }

    fn store_record(
        worksheet: &mut Worksheet,
        row: u32,
        record: &csv::StringRecord,
        detect_types: bool,
    ) -> CsvResult<()> {
        if record.len() > MAX_COLS as usize {
            return Err(CsvError::TooManyFields {
                row,
                fields: record.len(),
            });
        }

        for (col, field) in record.iter().enumerate() {
            if field.is_empty() {
                continue;
            }
            let value = if detect_types {
                Self::detect_type(field)
            } else {
                CellValue::text(field)
            };
            worksheet.set_cell_value_at(row, col as u16, value)?;
        }
        Ok(())
    }

    /// Detect plain numbers and booleans; everything else stays text
    fn detect_type(field: &str) -> CellValue {
        let trimmed = field.trim();

        if trimmed.eq_ignore_ascii_case("true") {
            return CellValue::Boolean(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return CellValue::Boolean(false);
        }

        // Only plain `[sign]digits[.digits]`: no "inf", "nan" or exponents
        let unsigned = trimmed
            .strip_prefix(|c: char| c == '-' || c == '+')
            .unwrap_or(trimmed);
        let plain = !unsigned.is_empty()
            && unsigned.chars().all(|c| c.is_ascii_digit() || c == '.')
            && unsigned.chars().any(|c| c.is_ascii_digit());
        if plain {
            if let Ok(n) = trimmed.parse::<f64>() {
                return CellValue::Number(n);
            }
        }

        CellValue::text(field)
    }
}
