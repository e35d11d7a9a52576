//! Decimal padding fallback for numeric-shaped text

use once_cell::sync::Lazy;
use regex::Regex;

use super::trim_text;

/// Optional sign, digits, optional `.digits`. Stricter than the parser on
/// purpose: no exponent, no thousands separators, no bare fractions.
static STRICT_DECIMAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?[0-9]+(\.[0-9]+)?$").expect("strict decimal pattern is valid"));

/// Pad or truncate the fraction of numeric-shaped text to `places` digits.
///
/// The first comma is read as the decimal point. Text that does not then
/// look like `[+-]digits[.digits]` comes back trimmed but otherwise
/// untouched. Truncation never rounds.
///
/// ```
/// use remessa_core::pad_decimal;
///
/// assert_eq!(pad_decimal("12,5", 4), "12,5000");
/// assert_eq!(pad_decimal("12.56789", 4), "12,5678");
/// assert_eq!(pad_decimal("not-a-number", 4), "not-a-number");
/// ```
pub fn pad_decimal(text: &str, places: usize) -> String {
    let trimmed = trim_text(text);
    try_pad_decimal(trimmed, places).unwrap_or_else(|| trimmed.to_string())
}

/// Padded text, or `None` when the input is not numeric-shaped.
pub(crate) fn try_pad_decimal(trimmed: &str, places: usize) -> Option<String> {
    if trimmed.is_empty() {
        return None;
    }

    let dotted = trimmed.replacen(',', ".", 1);
    if !STRICT_DECIMAL.is_match(&dotted) {
        return None;
    }

    let (int_part, frac_part) = dotted.split_once('.').unwrap_or((dotted.as_str(), ""));
    if places == 0 {
        return Some(int_part.to_string());
    }

    let mut frac: String = frac_part.chars().take(places).collect();
    while frac.len() < places {
        frac.push('0');
    }
    Some(format!("{},{}", int_part, frac))
}
