//! End-to-end tests for XLSX (create -> save -> read -> verify)

use std::io::{Cursor, Write};

use pretty_assertions::assert_eq;
use remessa_core::{
    normalize_workbook, Cell, CellError, CellValue, NormalizeConfig, Workbook, Worksheet,
};
use remessa_xlsx::{XlsxError, XlsxReader, XlsxWriter};

fn roundtrip(wb: &Workbook) -> Workbook {
    let mut buf = Vec::new();
    XlsxWriter::write(wb, Cursor::new(&mut buf)).unwrap();
    XlsxReader::read(Cursor::new(&buf)).unwrap()
}

#[test]
fn test_roundtrip_values() {
    let mut wb = Workbook::new();
    let sheet = wb.worksheet_mut(0).unwrap();
    sheet.set_cell_value("A1", 42.0).unwrap();
    sheet.set_cell_value("B1", -100.5).unwrap();
    sheet.set_cell_value("C1", 1e21).unwrap();
    sheet.set_cell_value("A2", "  R$ 1.234,56 ").unwrap();
    sheet.set_cell_value("B2", "Special: <>&\"'").unwrap();
    sheet.set_cell_value("C2", "Multi\nLine _x0041_").unwrap();
    sheet.set_cell_value("A3", true).unwrap();
    sheet.set_cell_value("B3", CellError::Div0).unwrap();

    let wb2 = roundtrip(&wb);
    let sheet2 = wb2.worksheet(0).unwrap();

    assert_eq!(sheet2.get_value("A1").unwrap(), CellValue::Number(42.0));
    assert_eq!(sheet2.get_value("B1").unwrap(), CellValue::Number(-100.5));
    assert_eq!(sheet2.get_value("C1").unwrap(), CellValue::Number(1e21));
    assert_eq!(
        sheet2.get_value("A2").unwrap(),
        CellValue::text("  R$ 1.234,56 ")
    );
    assert_eq!(
        sheet2.get_value("B2").unwrap(),
        CellValue::text("Special: <>&\"'")
    );
    assert_eq!(
        sheet2.get_value("C2").unwrap(),
        CellValue::text("Multi\nLine _x0041_")
    );
    assert_eq!(sheet2.get_value("A3").unwrap(), CellValue::Boolean(true));
    assert_eq!(
        sheet2.get_value("B3").unwrap(),
        CellValue::Error(CellError::Div0)
    );
}

#[test]
fn test_roundtrip_formulas_formats_and_widths() {
    let mut ws = Worksheet::new("Dados & Totais");
    ws.set_cell_value("A1", 2.0).unwrap();
    ws.set_cell(
        "B1",
        Cell::new(CellValue::Number(4.0))
            .with_formula("A1*2")
            .with_number_format("0.0000"),
    )
    .unwrap();
    ws.set_cell("C1", Cell::new(CellValue::text("x")).with_number_format("@"))
        .unwrap();
    ws.set_column_width(0, 4.8);
    ws.set_column_width(1, 4.8);
    ws.set_column_width(30, 17.25);

    let mut wb = Workbook::empty();
    wb.add_existing_worksheet(ws).unwrap();
    wb.add_worksheet_with_name("Vazia").unwrap();

    let wb2 = roundtrip(&wb);
    assert_eq!(wb2.sheet_names(), vec!["Dados & Totais", "Vazia"]);

    let sheet = wb2.worksheet(0).unwrap();
    let b1 = sheet.cell("B1").unwrap().unwrap();
    assert_eq!(b1.formula.as_deref(), Some("A1*2"));
    assert_eq!(b1.value, CellValue::Number(4.0));
    assert_eq!(b1.number_format.as_deref(), Some("0.0000"));
    assert_eq!(
        sheet.cell("C1").unwrap().unwrap().number_format.as_deref(),
        Some("@")
    );
    assert_eq!(sheet.cell("A1").unwrap().unwrap().number_format, None);

    assert_eq!(sheet.column_width(0), Some(4.8));
    assert_eq!(sheet.column_width(1), Some(4.8));
    assert_eq!(sheet.column_width(30), Some(17.25));
    assert_eq!(sheet.column_widths().len(), 3);

    assert!(wb2.worksheet(1).unwrap().is_empty());
}

#[test]
fn test_normalized_workbook_reads_back_as_frozen_text() {
    let mut ws = Worksheet::new("Remessa");
    ws.set_cell_value("K1", "Valor").unwrap();
    ws.set_cell_value("K2", "1.234,56").unwrap();
    ws.set_cell(
        "L2",
        Cell::new(CellValue::Number(25.0))
            .with_formula("K2/2")
            .with_number_format("0.00"),
    )
    .unwrap();
    let mut wb = Workbook::empty();
    wb.add_existing_worksheet(ws).unwrap();

    normalize_workbook(&mut wb, &NormalizeConfig::default()).unwrap();
    let wb2 = roundtrip(&wb);
    let sheet = wb2.worksheet(0).unwrap();

    assert!(sheet.iter_cells().all(|(_, _, c)| c.is_frozen_text()));
    assert_eq!(sheet.get_value("K2").unwrap(), CellValue::text("1234,5600"));
    assert_eq!(sheet.get_value("L2").unwrap(), CellValue::text("25,0000"));
    assert_eq!(sheet.column_width(10), Some(11.0));
    assert_eq!(sheet.column_widths().len(), 24);
}

/// Build a package by hand, shaped like what Excel itself writes
fn excel_style_package() -> Vec<u8> {
    let parts: &[(&str, &str)] = &[
        (
            "[Content_Types].xml",
            r#"<?xml version="1.0" encoding="UTF-8"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"/>"#,
        ),
        (
            "xl/workbook.xml",
            r#"<?xml version="1.0" encoding="UTF-8"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <sheets>
    <sheet name="Grafico" sheetId="2" r:id="rId2"/>
    <sheet name="Remessa" sheetId="1" r:id="rId1"/>
  </sheets>
</workbook>"#,
        ),
        (
            "xl/_rels/workbook.xml.rels",
            r#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="/xl/worksheets/data.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/chartsheet" Target="chartsheets/sheet1.xml"/>
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings" Target="sharedStrings.xml"/>
</Relationships>"#,
        ),
        (
            "xl/sharedStrings.xml",
            r#"<?xml version="1.0" encoding="UTF-8"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="3" uniqueCount="3">
  <si><t xml:space="preserve"> Valor </t></si>
  <si><r><rPr><b/></rPr><t>1.234</t></r><r><t>,56</t></r><rPh sb="0" eb="1"><t>IGNORED</t></rPh></si>
  <si><t>a_x000D_b</t></si>
</sst>"#,
        ),
        (
            "xl/styles.xml",
            r##"<?xml version="1.0" encoding="UTF-8"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <numFmts count="1"><numFmt numFmtId="170" formatCode="#,##0.000"/></numFmts>
  <cellXfs count="3">
    <xf numFmtId="0"/>
    <xf numFmtId="170" applyNumberFormat="1"/>
    <xf numFmtId="4" applyNumberFormat="1"/>
  </cellXfs>
</styleSheet>"##,
        ),
        (
            "xl/worksheets/data.xml",
            r#"<?xml version="1.0" encoding="UTF-8"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <dimension ref="A1:L3"/>
  <cols>
    <col min="1" max="3" width="12.5" customWidth="1"/>
    <col min="11" max="11" width="0"/>
  </cols>
  <sheetData>
    <row r="1">
      <c r="K1" t="s"><v>0</v></c>
      <c r="L1" s="2"/>
    </row>
    <row r="2">
      <c r="K2" t="s" s="1"><v>1</v></c>
      <c><v>7.125</v></c>
    </row>
    <row>
      <c r="A3" t="inlineStr"><is><r><t>in</t></r><r><t xml:space="preserve">line </t></r></is></c>
      <c r="B3" t="s"><v>2</v></c>
      <c r="C3"><f>A1+1</f></c>
      <c r="D3" t="str"><f>"x"&amp;"y"</f><v>xy</v></c>
    </row>
  </sheetData>
</worksheet>"#,
        ),
    ];

    let mut buf = Vec::new();
    {
        let mut zip = zip::ZipWriter::new(Cursor::new(&mut buf));
        for (name, content) in parts {
            zip.start_file(name.to_string(), zip::write::SimpleFileOptions::default())
                .unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
    }
    buf
}

#[test]
fn test_read_excel_style_package() {
    let wb = XlsxReader::read(Cursor::new(excel_style_package())).unwrap();

    // The chart sheet is not a worksheet
    assert_eq!(wb.sheet_names(), vec!["Remessa"]);
    let sheet = wb.worksheet(0).unwrap();

    assert_eq!(sheet.get_value("K1").unwrap(), CellValue::text(" Valor "));
    // Styled value-less cells create nothing
    assert!(sheet.cell("L1").unwrap().is_none());

    let k2 = sheet.cell("K2").unwrap().unwrap();
    assert_eq!(k2.value, CellValue::text("1.234,56"));
    assert_eq!(k2.number_format.as_deref(), Some("#,##0.000"));
    // A cell without `r` follows the previous one
    assert_eq!(sheet.get_value("L2").unwrap(), CellValue::Number(7.125));

    // A row without `r` follows the previous row
    assert_eq!(sheet.get_value("A3").unwrap(), CellValue::text("inline "));
    assert_eq!(sheet.get_value("B3").unwrap(), CellValue::text("a\rb"));

    let c3 = sheet.cell("C3").unwrap().unwrap();
    assert_eq!(c3.formula.as_deref(), Some("A1+1"));
    assert_eq!(c3.value, CellValue::Empty);

    let d3 = sheet.cell("D3").unwrap().unwrap();
    assert_eq!(d3.formula.as_deref(), Some("\"x\"&\"y\""));
    assert_eq!(d3.value, CellValue::text("xy"));

    assert_eq!(sheet.column_width(0), Some(12.5));
    assert_eq!(sheet.column_width(2), Some(12.5));
    assert_eq!(sheet.column_width(3), None);
    assert_eq!(sheet.column_width(10), Some(0.0));
}

#[test]
fn test_normalize_excel_style_package() {
    let mut wb = XlsxReader::read(Cursor::new(excel_style_package())).unwrap();
    let report = normalize_workbook(&mut wb, &NormalizeConfig::default()).unwrap();
    let sheet = wb.worksheet(0).unwrap();

    assert_eq!(sheet.get_value("K1").unwrap(), CellValue::text("Valor"));
    assert_eq!(sheet.get_value("K2").unwrap(), CellValue::text("1234,5600"));
    assert_eq!(sheet.get_value("L2").unwrap(), CellValue::text("7,1250"));
    // Formula without a cached value has an empty string form and is kept
    assert_eq!(
        sheet.cell("C3").unwrap().unwrap().formula.as_deref(),
        Some("A1+1")
    );
    assert_eq!(report.formulas_removed(), 1);
    // Zero-width hint falls back to the minimum: "1234,5600" + 2
    assert_eq!(sheet.column_width(10), Some(11.0));
}

#[test]
fn test_missing_workbook_part() {
    let mut buf = Vec::new();
    {
        let mut zip = zip::ZipWriter::new(Cursor::new(&mut buf));
        zip.start_file("[Content_Types].xml", zip::write::SimpleFileOptions::default())
            .unwrap();
        zip.write_all(b"<Types/>").unwrap();
        zip.finish().unwrap();
    }

    let err = XlsxReader::read(Cursor::new(buf)).unwrap_err();
    assert!(matches!(err, XlsxError::MissingPart(_)));
}

#[test]
fn test_write_and_read_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saida.xlsx");

    let mut wb = Workbook::new();
    wb.worksheet_mut(0)
        .unwrap()
        .set_cell_value("A1", "ok")
        .unwrap();
    XlsxWriter::write_file(&wb, &path).unwrap();

    let back = XlsxReader::read_file(&path).unwrap();
    assert_eq!(
        back.worksheet(0).unwrap().get_value("A1").unwrap(),
        CellValue::text("ok")
    );
}
