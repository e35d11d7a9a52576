//! XLSX writer

use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use remessa_core::{CellAddress, CellValue, Workbook, Worksheet};
use tracing::debug;
use zip::write::SimpleFileOptions;

use crate::error::XlsxResult;
use crate::escape::{escape_xml, xml_text};
use crate::styles::NumberFormatTable;

/// XLSX file writer
pub struct XlsxWriter;

impl XlsxWriter {
    /// Write a workbook to a file path
    pub fn write_file<P: AsRef<Path>>(workbook: &Workbook, path: P) -> XlsxResult<()> {
        let file = File::create(path)?;
        Self::write(workbook, BufWriter::new(file))
    }

    /// Write a workbook to a writer
    pub fn write<W: Write + Seek>(workbook: &Workbook, writer: W) -> XlsxResult<()> {
        let mut zip = zip::ZipWriter::new(writer);
        let formats = NumberFormatTable::build(workbook);

        Self::write_content_types(&mut zip, workbook)?;
        Self::write_root_rels(&mut zip)?;
        Self::write_workbook_xml(&mut zip, workbook)?;
        Self::write_workbook_rels(&mut zip, workbook)?;
        Self::write_part(&mut zip, "xl/styles.xml".to_string(), &formats.to_styles_xml())?;

        for (i, sheet) in workbook.worksheets().enumerate() {
            let xml = Self::worksheet_xml(sheet, &formats);
            Self::write_part(&mut zip, format!("xl/worksheets/sheet{}.xml", i + 1), &xml)?;
        }

        let mut inner = zip.finish()?;
        inner.flush()?;
        debug!(sheets = workbook.sheet_count(), "wrote xlsx");
        Ok(())
    }

    fn write_part<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        name: String,
        content: &str,
    ) -> XlsxResult<()> {
        zip.start_file(name, SimpleFileOptions::default())?;
        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_content_types<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &Workbook,
    ) -> XlsxResult<()> {
        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
    <Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>"#,
        );

        for i in 0..workbook.sheet_count() {
            content.push_str(&format!(
                r#"
    <Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
                i + 1
            ));
        }
        content.push_str("\n</Types>");

        Self::write_part(zip, "[Content_Types].xml".to_string(), &content)
    }

    fn write_root_rels<W: Write + Seek>(zip: &mut zip::ZipWriter<W>) -> XlsxResult<()> {
        let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

        Self::write_part(zip, "_rels/.rels".to_string(), content)
    }

    fn write_workbook_xml<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &Workbook,
    ) -> XlsxResult<()> {
        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
    <sheets>"#,
        );

        for (i, sheet) in workbook.worksheets().enumerate() {
            content.push_str(&format!(
                r#"
        <sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
                escape_xml(sheet.name()),
                i + 1,
                i + 1
            ));
        }

        content.push_str(
            r#"
    </sheets>
</workbook>"#,
        );

        Self::write_part(zip, "xl/workbook.xml".to_string(), &content)
    }

    fn write_workbook_rels<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &Workbook,
    ) -> XlsxResult<()> {
        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );

        for i in 0..workbook.sheet_count() {
            content.push_str(&format!(
                r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
                i + 1,
                i + 1
            ));
        }

        content.push_str(&format!(
            r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>"#,
            workbook.sheet_count() + 1
        ));

        Self::write_part(zip, "xl/_rels/workbook.xml.rels".to_string(), &content)
    }

    fn worksheet_xml(sheet: &Worksheet, formats: &NumberFormatTable) -> String {
        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
        );

        if let Some(range) = sheet.used_range() {
            content.push_str(&format!("\n    <dimension ref=\"{}\"/>", range));
        }

        Self::write_cols(&mut content, sheet);

        content.push_str("\n    <sheetData>");
        let mut current_row: Option<u32> = None;
        for (row, col, cell) in sheet.iter_cells() {
            if current_row != Some(row) {
                if current_row.is_some() {
                    content.push_str("\n        </row>");
                }
                content.push_str(&format!("\n        <row r=\"{}\">", row + 1));
                current_row = Some(row);
            }

            let cell_ref = CellAddress::new(row, col).to_a1_string();
            let xf = formats.xf_index(cell.number_format.as_deref());
            let style_attr = if xf != 0 {
                format!(" s=\"{}\"", xf)
            } else {
                String::new()
            };

            let formula = cell
                .formula
                .as_deref()
                .map(|f| format!("<f>{}</f>", xml_text(f)))
                .unwrap_or_default();

            let (type_attr, body) = match &cell.value {
                CellValue::Number(n) if n.is_finite() => ("", format!("{}<v>{}</v>", formula, n)),
                CellValue::Number(_) => (" t=\"e\"", format!("{}<v>#NUM!</v>", formula)),
                CellValue::Text(s) if cell.formula.is_some() => {
                    (" t=\"str\"", format!("{}<v>{}</v>", formula, xml_text(s)))
                }
                CellValue::Text(s) => (
                    " t=\"inlineStr\"",
                    format!("<is><t xml:space=\"preserve\">{}</t></is>", xml_text(s)),
                ),
                CellValue::Boolean(b) => {
                    (" t=\"b\"", format!("{}<v>{}</v>", formula, u8::from(*b)))
                }
                CellValue::Error(e) => (" t=\"e\"", format!("{}<v>{}</v>", formula, escape_xml(e.as_str()))),
                CellValue::Empty => ("", formula),
            };

            content.push_str(&format!(
                "\n            <c r=\"{}\"{}{}>{}</c>",
                cell_ref, style_attr, type_attr, body
            ));
        }
        if current_row.is_some() {
            content.push_str("\n        </row>");
        }
        content.push_str("\n    </sheetData>\n</worksheet>");
        content
    }

    /// `<cols>` with runs of adjacent columns of equal width merged
    fn write_cols(content: &mut String, sheet: &Worksheet) {
        let widths = sheet.column_widths();
        if widths.is_empty() {
            return;
        }

        let mut runs: Vec<(u16, u16, f64)> = Vec::new();
        for (&col, &width) in widths {
            match runs.last_mut() {
                Some((_, last, w)) if *last + 1 == col && *w == width => *last = col,
                _ => runs.push((col, col, width)),
            }
        }

        content.push_str("\n    <cols>");
        for (first, last, width) in runs {
            content.push_str(&format!(
                "\n        <col min=\"{}\" max=\"{}\" width=\"{}\" customWidth=\"1\"/>",
                first + 1,
                last + 1,
                width
            ));
        }
        content.push_str("\n    </cols>");
    }
}
