//! Value normalization
//!
//! [`normalize`] turns the string form of a cell into the text that will be
//! frozen into the cell. Target columns go through the ambiguous-locale
//! parser ([`parse_number`]) and fixed-decimal formatting ([`format_fixed`]),
//! falling back to [`pad_decimal`]. Every other column is only trimmed.
//!
//! All functions here are total: any input yields a string.

mod number;
mod pad;

pub use number::{format_fixed, parse_number};
pub use pad::pad_decimal;

use crate::cell::CellValue;
use crate::config::NormalizeConfig;

/// How a value was turned into its normalized text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Not a target column: trimmed string form
    Passthrough,
    /// Target column, parsed as a number and reformatted
    Numeric,
    /// Target column, salvaged by the padding fallback
    Padded,
    /// Target column, neither strategy applied: trimmed string form
    Unchanged,
}

/// Normalize the string form of a cell value in `column`.
///
/// ```
/// use remessa_core::{normalize, NormalizeConfig};
///
/// let config = NormalizeConfig::default();
/// assert_eq!(normalize("1.234,5", 10, &config), "1234,5000");
/// assert_eq!(normalize("  Pedido 12 ", 0, &config), "Pedido 12");
/// ```
pub fn normalize(raw: &str, column: u16, config: &NormalizeConfig) -> String {
    normalize_with_outcome(raw, column, config).0
}

/// Normalize a typed cell value through its string form
pub fn normalize_value(value: &CellValue, column: u16, config: &NormalizeConfig) -> String {
    normalize(&value.to_string(), column, config)
}

/// Normalize and report which strategy produced the text
pub fn normalize_with_outcome(
    raw: &str,
    column: u16,
    config: &NormalizeConfig,
) -> (String, Outcome) {
    let trimmed = trim_text(raw);
    if !config.is_target_column(column) {
        return (trimmed.to_string(), Outcome::Passthrough);
    }

    if let Some(n) = parse_number(trimmed) {
        return (format_fixed(n, config.decimal_places), Outcome::Numeric);
    }

    match pad::try_pad_decimal(trimmed, config.decimal_places) {
        Some(padded) => (padded, Outcome::Padded),
        None => (trimmed.to_string(), Outcome::Unchanged),
    }
}

/// Whitespace as seen by the cleanup steps: Unicode white space plus BOM,
/// without NEL (U+0085)
pub(crate) fn is_space(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

/// Trim leading and trailing whitespace (see [`is_space`])
pub(crate) fn trim_text(s: &str) -> &str {
    s.trim_matches(is_space)
}
