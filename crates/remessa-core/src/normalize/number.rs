//! Ambiguous-locale number parsing and fixed-decimal formatting

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::prelude::*;

use super::trim_text;

/// Decimal literal accepted after separator cleanup: sign, digits with an
/// optional fraction (`5.`, `.5`), optional exponent.
static DECIMAL_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$")
        .expect("decimal literal pattern is valid")
});

/// Above this magnitude an f64 has no bits left below 1/8, so plain float
/// formatting is already exact at any supported precision.
const EXACT_FORMAT_LIMIT: f64 = 1e15;

/// Parse text that may use US (`1,234.56`) or Brazilian (`1.234,56`)
/// separators.
///
/// When both `.` and `,` occur, whichever appears last is the decimal point
/// and every occurrence of the other is dropped. A lone `,` is a decimal
/// comma; a lone `.` (or none) is read as-is. Internal whitespace is removed
/// before conversion. Returns `None` for empty input, anything that is not a
/// numeric literal, and non-finite results.
///
/// This is a heuristic: `"2.024"` reads as two point zero two four.
///
/// ```
/// use remessa_core::parse_number;
///
/// assert_eq!(parse_number("1.234,56"), Some(1234.56));
/// assert_eq!(parse_number("1,234.56"), Some(1234.56));
/// assert_eq!(parse_number("1234,56"), Some(1234.56));
/// assert_eq!(parse_number("abc"), None);
/// ```
pub fn parse_number(text: &str) -> Option<f64> {
    let s = trim_text(text);
    if s.is_empty() {
        return None;
    }

    let cleaned = match (s.rfind('.'), s.rfind(',')) {
        (Some(dot), Some(comma)) if comma > dot => decimal_comma(s),
        (Some(_), Some(_)) => s.replace(',', ""),
        (None, Some(_)) => decimal_comma(s),
        _ => s.replace(',', ""),
    };

    let compact: String = cleaned
        .chars()
        .filter(|c| !super::is_space(*c))
        .collect();

    numeric_literal(&compact).filter(|n| n.is_finite())
}

/// Brazilian style: dots group thousands, the first comma is the decimal point.
fn decimal_comma(s: &str) -> String {
    s.replace('.', "").replacen(',', ".", 1)
}

/// Numeric-literal coercion: decimal literals, `Infinity`, and unsigned
/// `0x`/`0o`/`0b` integers.
fn numeric_literal(s: &str) -> Option<f64> {
    if DECIMAL_LITERAL.is_match(s) {
        return s.parse::<f64>().ok();
    }

    match s {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    let (radix, digits) = match s.get(..2) {
        Some("0x") | Some("0X") => (16, &s[2..]),
        Some("0o") | Some("0O") => (8, &s[2..]),
        Some("0b") | Some("0B") => (2, &s[2..]),
        _ => return None,
    };
    if digits.is_empty() {
        return None;
    }

    digits.chars().try_fold(0f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * radix as f64 + d as f64)
    })
}

/// Format a number with exactly `places` fractional digits and a decimal
/// comma, without thousands separators.
///
/// Rounds half away from zero on the exact binary value. A result that rounds
/// to zero carries no sign, so the output always parses back to itself.
///
/// ```
/// use remessa_core::format_fixed;
///
/// assert_eq!(format_fixed(1234.56, 4), "1234,5600");
/// assert_eq!(format_fixed(-0.5, 4), "-0,5000");
/// ```
pub fn format_fixed(value: f64, places: usize) -> String {
    let magnitude = value.abs();
    let digits = if magnitude < EXACT_FORMAT_LIMIT {
        Decimal::from_f64_retain(magnitude)
            .and_then(|d| {
                let mut rounded = d.round_dp_with_strategy(
                    places as u32,
                    RoundingStrategy::MidpointAwayFromZero,
                );
                rounded.rescale(places as u32);
                // rescale clamps to 28 significant digits
                (rounded.scale() == places as u32).then(|| rounded.to_string())
            })
            .unwrap_or_else(|| format!("{:.*}", places, magnitude))
    } else {
        format!("{:.*}", places, magnitude)
    };

    let is_zero = digits.bytes().all(|b| b == b'0' || b == b'.');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };
    format!("{}{}", sign, digits.replacen('.', ",", 1))
}
