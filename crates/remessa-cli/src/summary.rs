//! Human-readable output for the sub-commands

use remessa::{Conversion, Workbook};

const SIZE_UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Byte count in B/KB/MB/GB with two decimals (`1.50 KB`)
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", value, SIZE_UNITS[unit])
}

/// One line per converted file
pub fn conversion_line(conversion: &Conversion) -> String {
    let report = &conversion.report;
    format!(
        "{} ({}) -> {}: {} sheet(s), {} cells, {} in value columns, {} reformatted, {} formulas removed",
        conversion.input.display(),
        format_bytes(conversion.input_size),
        conversion.output.display(),
        report.sheets.len(),
        report.cells_visited(),
        report.target_cells(),
        report.reformatted_numeric(),
        report.formulas_removed(),
    )
}

/// Sheets, used ranges and formula counts
pub fn workbook_info(name: &str, workbook: &Workbook) -> String {
    let mut out = format!("File: {}\nSheets: {}\n", name, workbook.sheet_count());

    for (i, sheet) in workbook.worksheets().enumerate() {
        out.push_str(&format!("\n  Sheet {}: \"{}\"\n", i, sheet.name()));
        match sheet.used_range() {
            Some(range) => out.push_str(&format!(
                "    Used range: {} ({} rows x {} columns)\n",
                range,
                range.end.row + 1,
                range.end.col + 1
            )),
            None => out.push_str("    Used range: empty\n"),
        }
        out.push_str(&format!("    Formulas: {}\n", sheet.formula_cells().count()));
    }

    out
}
