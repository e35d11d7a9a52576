//! Number formats in `xl/styles.xml`
//!
//! Cells reference an entry of `<cellXfs>` through their `s` attribute; that
//! entry names a `numFmtId`, which is either one of Excel's built-in codes or
//! a `<numFmt>` declared in the same part (ids from 164 up).

use std::collections::HashMap;
use std::io::{BufReader, Read};

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use remessa_core::Workbook;

use crate::error::{XlsxError, XlsxResult};
use crate::escape::escape_xml;

/// First id available for custom number formats
const FIRST_CUSTOM_NUMFMT_ID: u32 = 164;

/// Format code of a built-in number format id (`None` for General/unknown)
pub(crate) fn builtin_format_code(id: u32) -> Option<&'static str> {
    let code = match id {
        1 => "0",
        2 => "0.00",
        3 => "#,##0",
        4 => "#,##0.00",
        9 => "0%",
        10 => "0.00%",
        11 => "0.00E+00",
        12 => "# ?/?",
        13 => "# ??/??",
        14 => "mm-dd-yy",
        15 => "d-mmm-yy",
        16 => "d-mmm",
        17 => "mmm-yy",
        18 => "h:mm AM/PM",
        19 => "h:mm:ss AM/PM",
        20 => "h:mm",
        21 => "h:mm:ss",
        22 => "m/d/yy h:mm",
        37 => "#,##0 ;(#,##0)",
        38 => "#,##0 ;[Red](#,##0)",
        39 => "#,##0.00;(#,##0.00)",
        40 => "#,##0.00;[Red](#,##0.00)",
        45 => "mm:ss",
        46 => "[h]:mm:ss",
        47 => "mmss.0",
        48 => "##0.0E+0",
        49 => "@",
        _ => return None,
    };
    Some(code)
}

/// Built-in id for a format code, if Excel has one
fn builtin_format_id(code: &str) -> Option<u32> {
    (1..=49).find(|id| builtin_format_code(*id) == Some(code))
}

/// Read the number format code of every `<cellXfs>` entry, in order.
///
/// General formats come back as `None`.
pub(crate) fn read_cell_formats<R: Read>(reader: R) -> XlsxResult<Vec<Option<String>>> {
    let mut xml_reader = Reader::from_reader(BufReader::new(reader));
    xml_reader.trim_text(true);

    let mut buf = Vec::new();
    let mut custom: HashMap<u32, String> = HashMap::new();
    let mut xf_ids: Vec<u32> = Vec::new();
    let mut in_cell_xfs = false;

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == b"cellXfs" => in_cell_xfs = true,
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"xf" if in_cell_xfs => {
                    xf_ids.push(u32_attr(&e, b"numFmtId").unwrap_or(0));
                }
                b"numFmt" => {
                    let id = u32_attr(&e, b"numFmtId");
                    let code = e
                        .attributes()
                        .flatten()
                        .find(|a| a.key.as_ref() == b"formatCode")
                        .and_then(|a| a.unescape_value().ok().map(|s| s.to_string()));
                    if let (Some(id), Some(code)) = (id, code) {
                        custom.insert(id, code);
                    }
                }
                _ => {}
            },
            Ok(Event::End(e)) if e.name().as_ref() == b"cellXfs" => in_cell_xfs = false,
            Ok(Event::Eof) => break,
            Err(e) => return Err(XlsxError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(xf_ids
        .into_iter()
        .map(|id| {
            custom
                .get(&id)
                .cloned()
                .or_else(|| builtin_format_code(id).map(str::to_string))
                .filter(|code| code != "General")
        })
        .collect())
}

fn u32_attr(e: &BytesStart<'_>, key: &[u8]) -> Option<u32> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == key)
        .and_then(|a| a.unescape_value().ok().and_then(|s| s.parse().ok()))
}

/// `<cellXfs>` table for writing: one entry per distinct number format,
/// entry 0 being General
#[derive(Debug, Default)]
pub(crate) struct NumberFormatTable {
    /// (numFmtId, format code) for entries 1..
    entries: Vec<(u32, String)>,
    xf_by_code: HashMap<String, u32>,
}

impl NumberFormatTable {
    /// Collect the number formats used anywhere in the workbook
    pub(crate) fn build(workbook: &Workbook) -> Self {
        let mut table = Self::default();
        let mut next_custom = FIRST_CUSTOM_NUMFMT_ID;

        let codes = workbook
            .worksheets()
            .flat_map(|ws| ws.iter_cells())
            .filter_map(|(_, _, cell)| cell.number_format.as_deref());

        for code in codes {
            if code == "General" || table.xf_by_code.contains_key(code) {
                continue;
            }
            let num_fmt_id = builtin_format_id(code).unwrap_or_else(|| {
                next_custom += 1;
                next_custom - 1
            });
            table.entries.push((num_fmt_id, code.to_string()));
            table
                .xf_by_code
                .insert(code.to_string(), table.entries.len() as u32);
        }
        table
    }

    /// `<cellXfs>` index for a cell's number format
    pub(crate) fn xf_index(&self, code: Option<&str>) -> u32 {
        code.and_then(|c| self.xf_by_code.get(c).copied()).unwrap_or(0)
    }

    /// Render `xl/styles.xml`
    pub(crate) fn to_styles_xml(&self) -> String {
        let mut xml = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
        );

        let custom: Vec<_> = self
            .entries
            .iter()
            .filter(|(id, _)| *id >= FIRST_CUSTOM_NUMFMT_ID)
            .collect();
        if !custom.is_empty() {
            xml.push_str(&format!("\n  <numFmts count=\"{}\">", custom.len()));
            for (id, code) in custom {
                xml.push_str(&format!(
                    "\n    <numFmt numFmtId=\"{}\" formatCode=\"{}\"/>",
                    id,
                    escape_xml(code)
                ));
            }
            xml.push_str("\n  </numFmts>");
        }

        xml.push_str(
            r#"
  <fonts count="1">
    <font><sz val="11"/><name val="Calibri"/><family val="2"/></font>
  </fonts>
  <fills count="2">
    <fill><patternFill patternType="none"/></fill>
    <fill><patternFill patternType="gray125"/></fill>
  </fills>
  <borders count="1">
    <border><left/><right/><top/><bottom/><diagonal/></border>
  </borders>
  <cellStyleXfs count="1">
    <xf numFmtId="0" fontId="0" fillId="0" borderId="0"/>
  </cellStyleXfs>"#,
        );

        xml.push_str(&format!(
            "\n  <cellXfs count=\"{}\">\n    <xf numFmtId=\"0\" fontId=\"0\" fillId=\"0\" borderId=\"0\" xfId=\"0\"/>",
            self.entries.len() + 1
        ));
        for (id, _) in &self.entries {
            xml.push_str(&format!(
                "\n    <xf numFmtId=\"{}\" fontId=\"0\" fillId=\"0\" borderId=\"0\" xfId=\"0\" applyNumberFormat=\"1\"/>",
                id
            ));
        }
        xml.push_str("\n  </cellXfs>");

        xml.push_str(
            r#"
  <cellStyles count="1">
    <cellStyle name="Normal" xfId="0" builtinId="0"/>
  </cellStyles>
</styleSheet>"#,
        );
        xml
    }
}
