//! Sheet and workbook normalization passes

use tracing::{debug, trace};

use crate::config::NormalizeConfig;
use crate::error::{Error, Result};
use crate::layout::{adjust_widths, ColumnLengths};
use crate::normalize::{normalize_with_outcome, Outcome};
use crate::workbook::Workbook;
use crate::worksheet::Worksheet;

/// What a pass over one worksheet did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetReport {
    /// Worksheet name
    pub sheet: String,
    /// The sheet had no used range and was left untouched
    pub skipped: bool,
    /// Cells with a non-empty string form (all of them were frozen to text)
    pub cells_visited: usize,
    /// Visited cells in target columns
    pub target_cells: usize,
    /// Target cells reformatted through the number parser
    pub reformatted_numeric: usize,
    /// Target cells salvaged by the padding fallback
    pub padded: usize,
    /// Target cells that kept their trimmed text
    pub unchanged_in_target: usize,
    /// Formulas dropped from visited cells
    pub formulas_removed: usize,
}

impl SheetReport {
    fn new(sheet: &str) -> Self {
        Self {
            sheet: sheet.to_string(),
            ..Self::default()
        }
    }

    fn count(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Passthrough => return,
            Outcome::Numeric => self.reformatted_numeric += 1,
            Outcome::Padded => self.padded += 1,
            Outcome::Unchanged => self.unchanged_in_target += 1,
        }
        self.target_cells += 1;
    }
}

/// What a pass over a whole workbook did, one report per sheet in order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkbookReport {
    pub sheets: Vec<SheetReport>,
}

impl WorkbookReport {
    /// Total visited cells across all sheets
    pub fn cells_visited(&self) -> usize {
        self.sheets.iter().map(|s| s.cells_visited).sum()
    }

    /// Total target-column cells across all sheets
    pub fn target_cells(&self) -> usize {
        self.sheets.iter().map(|s| s.target_cells).sum()
    }

    /// Total cells reformatted through the number parser
    pub fn reformatted_numeric(&self) -> usize {
        self.sheets.iter().map(|s| s.reformatted_numeric).sum()
    }

    /// Total formulas removed
    pub fn formulas_removed(&self) -> usize {
        self.sheets.iter().map(|s| s.formulas_removed).sum()
    }

    /// Number of sheets skipped for lack of a used range
    pub fn skipped_sheets(&self) -> usize {
        self.sheets.iter().filter(|s| s.skipped).count()
    }
}

/// Normalize every non-empty cell of a worksheet and resize its columns.
///
/// A sheet without a used range is not touched at all, widths included.
/// Each visited cell is frozen to text (text value, `"@"` format, no
/// formula). Cells whose string form is empty are left as they are.
pub fn normalize_worksheet(sheet: &mut Worksheet, config: &NormalizeConfig) -> SheetReport {
    let mut report = SheetReport::new(sheet.name());

    let Some(range) = sheet.used_range() else {
        debug!(sheet = sheet.name(), "no used range, skipping");
        report.skipped = true;
        return report;
    };
    debug!(sheet = sheet.name(), range = %range, "normalizing sheet");

    let mut lengths = ColumnLengths::new();
    for (row, col, cell) in sheet.iter_cells_mut() {
        let raw = cell.value.to_string();
        if raw.is_empty() {
            continue;
        }

        let (text, outcome) = normalize_with_outcome(&raw, col, config);
        report.cells_visited += 1;
        report.count(outcome);
        if cell.formula.is_some() {
            report.formulas_removed += 1;
        }

        if outcome != Outcome::Passthrough && text != raw {
            trace!(row, col, from = %raw, to = %text, ?outcome, "reformatted");
        }

        lengths.record(col, text.chars().count());
        cell.freeze_as_text(text);
    }

    let widths = adjust_widths(sheet.column_widths(), &lengths, config);
    sheet.set_column_widths(widths);

    debug!(
        sheet = %report.sheet,
        visited = report.cells_visited,
        numeric = report.reformatted_numeric,
        padded = report.padded,
        formulas_removed = report.formulas_removed,
        "sheet done"
    );
    report
}

/// Normalize every worksheet of a workbook independently.
///
/// Fails only when the workbook has no worksheets.
pub fn normalize_workbook(workbook: &mut Workbook, config: &NormalizeConfig) -> Result<WorkbookReport> {
    if workbook.is_empty() {
        return Err(Error::EmptyWorkbook);
    }

    let sheets = workbook
        .worksheets_mut()
        .map(|sheet| normalize_worksheet(sheet, config))
        .collect();
    Ok(WorkbookReport { sheets })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{Cell, CellKind, CellValue};
    use crate::TEXT_FORMAT;
    use pretty_assertions::assert_eq;

    fn remittance_sheet() -> Worksheet {
        let mut ws = Worksheet::new("Remessa");
        ws.set_cell_value("A1", "Pedido").unwrap();
        ws.set_cell_value("K1", "Valor").unwrap();
        ws.set_cell_value("L1", "Peso").unwrap();
        ws.set_cell_value("A2", 1001.0).unwrap();
        ws.set_cell_value("K2", "1.234,56").unwrap();
        ws.set_cell_value("L2", 12.5).unwrap();
        ws.set_cell(
            "M2",
            Cell::new(CellValue::Number(25.0))
                .with_formula("L2*2")
                .with_number_format("0.00"),
        )
        .unwrap();
        ws
    }

    #[test]
    fn test_sheet_pass_freezes_cells() {
        let mut ws = remittance_sheet();
        let report = normalize_worksheet(&mut ws, &NormalizeConfig::default());

        assert_eq!(ws.get_value("A2").unwrap(), CellValue::text("1001"));
        assert_eq!(ws.get_value("K1").unwrap(), CellValue::text("Valor"));
        assert_eq!(ws.get_value("K2").unwrap(), CellValue::text("1234,5600"));
        assert_eq!(ws.get_value("L2").unwrap(), CellValue::text("12,5000"));

        let m2 = ws.cell("M2").unwrap().unwrap();
        assert_eq!(m2.value, CellValue::text("25,0000"));
        assert_eq!(m2.formula, None);
        assert_eq!(m2.number_format.as_deref(), Some(TEXT_FORMAT));

        assert!(ws.iter_cells().all(|(_, _, c)| c.is_frozen_text()));

        assert_eq!(
            report,
            SheetReport {
                sheet: "Remessa".to_string(),
                skipped: false,
                cells_visited: 7,
                target_cells: 5,
                reformatted_numeric: 3,
                padded: 0,
                unchanged_in_target: 2,
                formulas_removed: 1,
            }
        );
    }

    #[test]
    fn test_sheet_pass_sets_widths() {
        let mut ws = remittance_sheet();
        ws.set_column_width(1, 20.0);
        ws.set_column_width(30, 7.5);
        normalize_worksheet(&mut ws, &NormalizeConfig::default());

        let widths = ws.column_widths();
        assert_eq!(widths.len(), 25);
        // "Pedido" is 6 long: max(8, 8) * 0.6
        assert!((widths[&0] - 4.8).abs() < 1e-9);
        assert!((widths[&1] - 12.0).abs() < 1e-9);
        // "1234,5600" is 9 long
        assert_eq!(widths[&10], 11.0);
        assert_eq!(widths[&11], 9.0);
        assert_eq!(widths[&30], 7.5);
    }

    #[test]
    fn test_empty_sheet_is_untouched() {
        let mut ws = Worksheet::new("Vazia");
        ws.set_column_width(2, 13.0);

        let report = normalize_worksheet(&mut ws, &NormalizeConfig::default());

        assert!(report.skipped);
        assert_eq!(report.cells_visited, 0);
        assert_eq!(ws.column_widths().len(), 1);
        assert_eq!(ws.column_width(2), Some(13.0));
    }

    #[test]
    fn test_empty_values_are_skipped() {
        let mut ws = Worksheet::new("Test");
        ws.set_cell("K1", Cell::new(CellValue::Empty).with_number_format("0.00"))
            .unwrap();
        ws.set_cell_value("K2", "").unwrap();
        ws.set_cell_value("K3", "   ").unwrap();

        let report = normalize_worksheet(&mut ws, &NormalizeConfig::default());

        assert_eq!(report.cells_visited, 1);
        let k1 = ws.cell("K1").unwrap().unwrap();
        assert_eq!(k1.kind(), CellKind::Empty);
        assert_eq!(k1.number_format.as_deref(), Some("0.00"));
        assert_eq!(ws.get_value("K2").unwrap(), CellValue::text(""));
        assert!(ws.cell("K3").unwrap().unwrap().is_frozen_text());
        assert_eq!(ws.get_value("K3").unwrap(), CellValue::text(""));
        // Widths are still written for the adjusted block
        assert_eq!(ws.column_widths().len(), 24);
    }

    #[test]
    fn test_zero_and_false_are_normalized() {
        let mut ws = Worksheet::new("Test");
        ws.set_cell_value("K1", 0.0).unwrap();
        ws.set_cell_value("B1", false).unwrap();
        ws.set_cell_value("L1", false).unwrap();

        let report = normalize_worksheet(&mut ws, &NormalizeConfig::default());

        assert_eq!(ws.get_value("K1").unwrap(), CellValue::text("0,0000"));
        assert_eq!(ws.get_value("B1").unwrap(), CellValue::text("FALSE"));
        assert_eq!(ws.get_value("L1").unwrap(), CellValue::text("FALSE"));
        assert!(ws.cell("L1").unwrap().unwrap().is_frozen_text());
        assert_eq!(report.cells_visited, 3);
        assert_eq!(report.target_cells, 2);
        assert_eq!(report.reformatted_numeric, 1);
        assert_eq!(report.unchanged_in_target, 1);
    }

    #[test]
    fn test_second_pass_is_stable() {
        let mut ws = remittance_sheet();
        let config = NormalizeConfig::default();
        normalize_worksheet(&mut ws, &config);
        let first: Vec<_> = ws.iter_cells().map(|(r, c, cell)| (r, c, cell.clone())).collect();

        let report = normalize_worksheet(&mut ws, &config);
        let second: Vec<_> = ws.iter_cells().map(|(r, c, cell)| (r, c, cell.clone())).collect();

        assert_eq!(first, second);
        assert_eq!(report.formulas_removed, 0);
    }

    #[test]
    fn test_workbook_pass() {
        let mut wb = Workbook::empty();
        wb.add_existing_worksheet(remittance_sheet()).unwrap();
        wb.add_worksheet_with_name("Vazia").unwrap();

        let report = normalize_workbook(&mut wb, &NormalizeConfig::default()).unwrap();

        assert_eq!(report.sheets.len(), 2);
        assert_eq!(report.cells_visited(), 7);
        assert_eq!(report.target_cells(), 5);
        assert_eq!(report.reformatted_numeric(), 3);
        assert_eq!(report.formulas_removed(), 1);
        assert_eq!(report.skipped_sheets(), 1);
    }

    #[test]
    fn test_empty_workbook_is_rejected() {
        let mut wb = Workbook::empty();
        assert!(matches!(
            normalize_workbook(&mut wb, &NormalizeConfig::default()),
            Err(Error::EmptyWorkbook)
        ));
    }
}
