//! XLSX reader

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use remessa_core::{Cell, CellAddress, CellError, CellValue, Workbook, Worksheet};
use tracing::debug;

use crate::error::{XlsxError, XlsxResult};
use crate::escape::decode_excel_escapes;
use crate::styles::read_cell_formats;

/// Lookup tables shared by every worksheet of a package
struct SheetContext {
    shared_strings: Vec<String>,
    /// Number format code per `<cellXfs>` index
    cell_formats: Vec<Option<String>>,
}

/// A `<c>` element being assembled
#[derive(Default)]
struct PendingCell {
    address: Option<CellAddress>,
    cell_type: Option<String>,
    style: Option<usize>,
    value: Option<String>,
    formula: String,
    inline_text: Option<String>,
}

/// XLSX file reader
pub struct XlsxReader;

impl XlsxReader {
    /// Read a workbook from a file path
    pub fn read_file<P: AsRef<Path>>(path: P) -> XlsxResult<Workbook> {
        let file = File::open(path)?;
        Self::read(BufReader::new(file))
    }

    /// Read a workbook from a reader
    ///
    /// A package without worksheets yields an empty workbook.
    pub fn read<R: Read + Seek>(reader: R) -> XlsxResult<Workbook> {
        let mut archive = zip::ZipArchive::new(reader)?;

        if archive.by_name("[Content_Types].xml").is_err() {
            return Err(XlsxError::NotXlsx("no [Content_Types].xml".into()));
        }

        let context = SheetContext {
            shared_strings: Self::read_shared_strings(&mut archive)?,
            cell_formats: Self::read_styles(&mut archive)?,
        };

        let sheet_info = Self::read_workbook_xml(&mut archive)?;
        let sheet_paths = Self::read_workbook_rels(&mut archive)?;

        let mut workbook = Workbook::empty();
        for (name, r_id) in sheet_info {
            let Some(path) = sheet_paths.get(&r_id) else {
                debug!(sheet = %name, "not a worksheet, skipping");
                continue;
            };
            let mut worksheet = Worksheet::new(name);
            Self::read_worksheet(&mut archive, path, &mut worksheet, &context)?;
            debug!(
                sheet = worksheet.name(),
                cells = worksheet.cell_count(),
                "read worksheet"
            );
            workbook.add_existing_worksheet(worksheet)?;
        }

        Ok(workbook)
    }

    /// Read the shared strings table
    fn read_shared_strings<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<String>> {
        let mut strings = Vec::new();

        let file = match archive.by_name("xl/sharedStrings.xml") {
            Ok(f) => f,
            Err(_) => return Ok(strings),
        };

        // No text trimming: leading and trailing spaces are part of the value
        let mut xml_reader = Reader::from_reader(BufReader::new(file));

        let mut buf = Vec::new();
        let mut current = String::new();
        let mut in_si = false;
        let mut in_t = false;
        let mut in_phonetic = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"si" => {
                        in_si = true;
                        current.clear();
                    }
                    b"rPh" => in_phonetic = true,
                    b"t" if in_si && !in_phonetic => in_t = true,
                    _ => {}
                },
                Ok(Event::Empty(e)) if e.name().as_ref() == b"si" => strings.push(String::new()),
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"si" => {
                        strings.push(decode_excel_escapes(&current));
                        in_si = false;
                    }
                    b"rPh" => in_phonetic = false,
                    b"t" => in_t = false,
                    _ => {}
                },
                Ok(Event::Text(e)) if in_t => current.push_str(&e.unescape()?),
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(strings)
    }

    fn read_styles<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<Option<String>>> {
        match archive.by_name("xl/styles.xml") {
            Ok(file) => read_cell_formats(file),
            Err(_) => Ok(Vec::new()),
        }
    }

    /// Read workbook.xml to get sheet names and rIds, in tab order
    fn read_workbook_xml<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<(String, String)>> {
        let file = archive
            .by_name("xl/workbook.xml")
            .map_err(|_| XlsxError::MissingPart("xl/workbook.xml".into()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut sheets = Vec::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e)) if e.name().as_ref() == b"sheet" => {
                    if let (Some(name), Some(r_id)) = (attr(&e, b"name"), attr(&e, b"r:id")) {
                        sheets.push((name, r_id));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(sheets)
    }

    /// Read workbook.xml.rels to map worksheet rIds to part paths
    fn read_workbook_rels<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<HashMap<String, String>> {
        let file = archive
            .by_name("xl/_rels/workbook.xml.rels")
            .map_err(|_| XlsxError::MissingPart("xl/_rels/workbook.xml.rels".into()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut rels = HashMap::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e))
                    if e.name().as_ref() == b"Relationship" =>
                {
                    let id = attr(&e, b"Id");
                    let target = attr(&e, b"Target");
                    let is_worksheet = attr(&e, b"Type")
                        .map_or(false, |t| t.ends_with("/worksheet"));

                    if let (Some(id), Some(target), true) = (id, target, is_worksheet) {
                        // Targets are relative to xl/ unless absolute
                        let path = match target.strip_prefix('/') {
                            Some(absolute) => absolute.to_string(),
                            None => format!("xl/{}", target),
                        };
                        rels.insert(id, path);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(rels)
    }

    /// Read cells and column widths of one worksheet part
    fn read_worksheet<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
        path: &str,
        worksheet: &mut Worksheet,
        context: &SheetContext,
    ) -> XlsxResult<()> {
        let file = archive
            .by_name(path)
            .map_err(|_| XlsxError::MissingPart(path.to_string()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));

        let mut buf = Vec::new();
        let mut row_idx: Option<u32> = None;
        let mut next_col: u16 = 0;
        let mut pending: Option<PendingCell> = None;
        let mut in_value = false;
        let mut in_formula = false;
        let mut in_inline_str = false;
        let mut in_inline_text = false;
        let mut in_phonetic = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"row" => {
                        row_idx = Some(Self::row_index(&e, row_idx));
                        next_col = 0;
                    }
                    b"c" => {
                        pending = Some(Self::start_cell(&e, row_idx.unwrap_or(0), next_col)?);
                    }
                    b"v" if pending.is_some() => in_value = true,
                    b"f" if pending.is_some() => in_formula = true,
                    b"is" if pending.is_some() => {
                        in_inline_str = true;
                        if let Some(cell) = pending.as_mut() {
                            cell.inline_text.get_or_insert_with(String::new);
                        }
                    }
                    b"rPh" if in_inline_str => in_phonetic = true,
                    b"t" if in_inline_str && !in_phonetic => in_inline_text = true,
                    _ => {}
                },
                Ok(Event::Empty(e)) => match e.name().as_ref() {
                    b"row" => {
                        row_idx = Some(Self::row_index(&e, row_idx));
                        next_col = 0;
                    }
                    b"c" => {
                        // Value-less cell: only advances the column cursor
                        let cell = Self::start_cell(&e, row_idx.unwrap_or(0), next_col)?;
                        if let Some(addr) = cell.address {
                            next_col = addr.col.saturating_add(1);
                        }
                    }
                    b"col" => Self::read_col(&e, worksheet),
                    _ => {}
                },
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"c" => {
                        if let Some(cell) = pending.take() {
                            if let Some(addr) = cell.address {
                                next_col = addr.col.saturating_add(1);
                            }
                            Self::store_cell(worksheet, cell, context)?;
                        }
                    }
                    b"v" => in_value = false,
                    b"f" => in_formula = false,
                    b"is" => in_inline_str = false,
                    b"rPh" => in_phonetic = false,
                    b"t" => in_inline_text = false,
                    _ => {}
                },
                Ok(Event::Text(e)) => {
                    if let Some(cell) = pending.as_mut() {
                        if in_value {
                            cell.value
                                .get_or_insert_with(String::new)
                                .push_str(&e.unescape()?);
                        } else if in_formula {
                            cell.formula.push_str(&e.unescape()?);
                        } else if in_inline_text {
                            cell.inline_text
                                .get_or_insert_with(String::new)
                                .push_str(&e.unescape()?);
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(())
    }

    /// Zero-based row index from `<row r="..">`, or the row after `previous`
    fn row_index(e: &BytesStart<'_>, previous: Option<u32>) -> u32 {
        attr(e, b"r")
            .and_then(|r| r.parse::<u32>().ok())
            .map(|r| r.saturating_sub(1))
            .unwrap_or_else(|| previous.map_or(0, |p| p + 1))
    }

    fn start_cell(e: &BytesStart<'_>, row: u32, next_col: u16) -> XlsxResult<PendingCell> {
        let address = match attr(e, b"r") {
            Some(r) => CellAddress::parse(&r).map_err(|err| {
                XlsxError::BadCell(format!("invalid reference '{}': {}", r, err))
            })?,
            None => CellAddress::new(row, next_col),
        };

        Ok(PendingCell {
            address: Some(address),
            cell_type: attr(e, b"t"),
            style: attr(e, b"s").and_then(|s| s.parse().ok()),
            ..PendingCell::default()
        })
    }

    /// `<col min=".." max=".." width=".."/>`: one width hint per column
    fn read_col(e: &BytesStart<'_>, worksheet: &mut Worksheet) {
        let min = attr(e, b"min").and_then(|s| s.parse::<u16>().ok());
        let max = attr(e, b"max").and_then(|s| s.parse::<u16>().ok());
        let width = attr(e, b"width").and_then(|s| s.parse::<f64>().ok());

        if let (Some(min), Some(max), Some(width)) = (min, max, width) {
            // min/max are 1-based
            for col in min.max(1)..=max.min(remessa_core::MAX_COLS) {
                worksheet.set_column_width(col - 1, width);
            }
        }
    }

    fn store_cell(
        worksheet: &mut Worksheet,
        pending: PendingCell,
        context: &SheetContext,
    ) -> XlsxResult<()> {
        let Some(addr) = pending.address else {
            return Ok(());
        };
        let formula = Some(pending.formula).filter(|f| !f.is_empty());

        let value = match (pending.inline_text, pending.value.filter(|v| !v.is_empty())) {
            (Some(text), _) => Self::parse_value(&text, Some("inlineStr"), &context.shared_strings)?,
            (None, Some(raw)) => {
                Self::parse_value(&raw, pending.cell_type.as_deref(), &context.shared_strings)?
            }
            (None, None) if formula.is_some() => CellValue::Empty,
            (None, None) => return Ok(()),
        };

        let number_format = pending
            .style
            .and_then(|s| context.cell_formats.get(s).cloned().flatten());

        worksheet.set_cell_at(
            addr.row,
            addr.col,
            Cell {
                value,
                formula,
                number_format,
            },
        )?;
        Ok(())
    }

    /// Interpret a `<v>` (or inline string) according to the cell's `t`
    fn parse_value(
        raw: &str,
        cell_type: Option<&str>,
        shared_strings: &[String],
    ) -> XlsxResult<CellValue> {
        let value = match cell_type {
            Some("s") => {
                let idx: usize = raw.trim().parse().map_err(|_| {
                    XlsxError::BadCell(format!("invalid shared string index {}", raw))
                })?;
                let s = shared_strings.get(idx).ok_or_else(|| {
                    XlsxError::BadCell(format!("shared string index {} out of bounds", idx))
                })?;
                CellValue::text(s.clone())
            }
            Some("b") => CellValue::Boolean(raw == "1" || raw.eq_ignore_ascii_case("true")),
            Some("e") => CellError::parse(raw)
                .map(CellValue::Error)
                .unwrap_or_else(|| CellValue::text(raw)),
            Some("inlineStr") | Some("str") => CellValue::text(decode_excel_escapes(raw)),
            None | Some("n") => match raw.trim().parse::<f64>() {
                Ok(n) if n.is_finite() => CellValue::Number(n),
                _ => CellValue::text(raw),
            },
            // ISO dates (`t="d"`) and unknown types keep their text
            Some(_) => CellValue::text(raw),
        };
        Ok(value)
    }
}

/// Unescaped value of an attribute
fn attr(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == key)
        .and_then(|a| a.unescape_value().ok().map(|s| s.to_string()))
}
