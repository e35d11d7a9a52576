//! End-to-end tests for file conversion (write input -> convert -> read output)

use std::fs;

use pretty_assertions::assert_eq;
use remessa::prelude::*;
use remessa::{Cell, OUTPUT_SUFFIX};

fn remittance_workbook() -> Workbook {
    let mut wb = Workbook::empty();

    let mut sheet = Worksheet::new("Remessa");
    sheet.set_cell_value("A1", "Favorecido").unwrap();
    sheet.set_cell_value("K1", "Valor").unwrap();
    sheet.set_cell_value("L1", "Juros").unwrap();
    sheet.set_cell_value("A2", "  Ana Souza ").unwrap();
    sheet.set_cell_value("K2", "R$ 10,5").unwrap();
    sheet.set_cell_value("L2", 0.125).unwrap();
    sheet.set_cell_value("A3", "Bruno").unwrap();
    sheet.set_cell_value("K3", "1.234.567,891").unwrap();
    sheet
        .set_cell(
            "L3",
            Cell::new(CellValue::Number(2.5))
                .with_formula("L2*20")
                .with_number_format("0.00"),
        )
        .unwrap();
    sheet.set_column_width(20, 14.0);
    sheet.set_column_width(40, 9.5);
    wb.add_existing_worksheet(sheet).unwrap();

    wb.add_worksheet_with_name("Vazia").unwrap();
    wb
}

#[test]
fn test_convert_xlsx() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("remessa.xlsx");
    remittance_workbook().save(&input).unwrap();

    let conversion = convert_file(&input, &ConvertOptions::default()).unwrap();

    assert_eq!(conversion.output, dir.path().join("remessa_fixed.xlsx"));
    assert_eq!(conversion.input_size, fs::metadata(&input).unwrap().len());
    assert_eq!(conversion.report.sheets.len(), 2);
    assert_eq!(conversion.report.cells_visited(), 9);
    assert_eq!(conversion.report.target_cells(), 6);
    assert_eq!(conversion.report.reformatted_numeric(), 3);
    assert_eq!(conversion.report.formulas_removed(), 1);
    assert_eq!(conversion.report.skipped_sheets(), 1);

    let out = Workbook::open(&conversion.output).unwrap();
    assert_eq!(out.sheet_names(), vec!["Remessa", "Vazia"]);
    let sheet = out.worksheet(0).unwrap();

    assert_eq!(sheet.get_value("A2").unwrap(), CellValue::text("Ana Souza"));
    // Currency symbols are not stripped
    assert_eq!(sheet.get_value("K2").unwrap(), CellValue::text("R$ 10,5"));
    assert_eq!(
        sheet.get_value("K3").unwrap(),
        CellValue::text("1234567,8910")
    );
    assert_eq!(sheet.get_value("L2").unwrap(), CellValue::text("0,1250"));

    let l3 = sheet.cell("L3").unwrap().unwrap();
    assert_eq!(l3.value, CellValue::text("2,5000"));
    assert_eq!(l3.formula, None);
    assert_eq!(l3.number_format.as_deref(), Some("@"));

    // "1234567,8910" is 12 characters
    assert_eq!(sheet.column_width(10), Some(14.0));
    // "Favorecido" is 10 characters, narrowed
    assert_eq!(sheet.column_width(0), Some(12.0 * 0.6));
    // Hint kept when wider than the text
    assert_eq!(sheet.column_width(20), Some(14.0));
    // Columns past X keep their hint
    assert_eq!(sheet.column_width(40), Some(9.5));

    assert!(out.worksheet(1).unwrap().column_widths().is_empty());
}

#[test]
fn test_convert_csv_with_delimiter() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("lote.csv");
    fs::write(
        &input,
        "Nome;B;C;D;E;F;G;H;I;J;Valor\n Ana ;;;;;;;;;;1.234,5\nBia;;;;;;;;;;\"1,234.5\"\n",
    )
    .unwrap();

    let out_dir = dir.path().join("saida");
    let options = ConvertOptions::default()
        .with_csv_delimiter(b';')
        .with_output_dir(&out_dir);
    let conversion = convert_file(&input, &options).unwrap();

    assert_eq!(conversion.output, out_dir.join(format!("lote{}.csv", OUTPUT_SUFFIX)));
    assert_eq!(conversion.report.reformatted_numeric(), 2);

    let written = fs::read_to_string(&conversion.output).unwrap();
    assert_eq!(
        written,
        "Nome;B;C;D;E;F;G;H;I;J;Valor\nAna;;;;;;;;;;1234,5000\nBia;;;;;;;;;;1234,5000\n"
    );
}

#[test]
fn test_convert_with_custom_config() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("custom.csv");
    fs::write(&input, "a,b\n1.5,\"2,25\"\n").unwrap();

    let config = NormalizeConfig::default()
        .with_target_column_letters(&["B"])
        .unwrap()
        .with_decimal_places(2);
    let conversion =
        convert_file(&input, &ConvertOptions::default().with_config(config)).unwrap();

    let written = fs::read_to_string(&conversion.output).unwrap();
    assert_eq!(written, "a,b\n1.5,\"2,25\"\n");
    assert_eq!(conversion.report.reformatted_numeric(), 1);
}

#[test]
fn test_legacy_xls_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("antigo.xls");
    fs::write(&input, b"\xD0\xCF\x11\xE0").unwrap();

    let err = convert_file(&input, &ConvertOptions::default()).unwrap_err();
    assert_eq!(err.file(), Some(input.display().to_string().as_str()));
    match err {
        Error::Conversion { source, .. } => {
            assert!(matches!(*source, Error::LegacyXls(_)))
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unsupported_extension() {
    let err = Workbook::open("planilha.ods").unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat(_)));
}

#[test]
fn test_missing_file_names_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sumiu.xlsx");

    let err = convert_file(&input, &ConvertOptions::default()).unwrap_err();
    assert!(err.to_string().contains("sumiu.xlsx"));
    assert!(matches!(
        err,
        Error::Conversion { ref source, .. } if matches!(**source, Error::Io(_))
    ));
}

#[test]
fn test_corrupt_xlsx_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("quebrado.xlsx");
    fs::write(&input, "not a zip").unwrap();

    let err = convert_file(&input, &ConvertOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        Error::Conversion { ref source, .. } if matches!(**source, Error::Xlsx(_))
    ));
    assert!(!dir.path().join("quebrado_fixed.xlsx").exists());
}

#[test]
fn test_invalid_config_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("a.csv");
    fs::write(&input, "x\n").unwrap();

    let options = ConvertOptions::default()
        .with_config(NormalizeConfig::default().with_width_bounds(40.0, 10.0));
    let err = convert_file(&input, &options).unwrap_err();
    assert!(matches!(
        err,
        Error::Conversion { ref source, .. } if matches!(**source, Error::Core(_))
    ));
}
