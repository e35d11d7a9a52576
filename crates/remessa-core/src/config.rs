//! Normalization configuration

use std::collections::BTreeSet;

use crate::cell::CellAddress;
use crate::error::{Error, Result};

/// Default target columns: K, L, M, S, T, U
pub const DEFAULT_TARGET_COLUMNS: [u16; 6] = [10, 11, 12, 18, 19, 20];

/// Default number of fractional digits in fixed-decimal text
pub const DEFAULT_DECIMAL_PLACES: usize = 4;

/// Default minimum column width (characters)
pub const DEFAULT_MIN_COLUMN_WIDTH: f64 = 8.0;

/// Default maximum column width (characters)
pub const DEFAULT_MAX_COLUMN_WIDTH: f64 = 30.0;

/// Default padding added to the longest text in a column
pub const DEFAULT_WIDTH_PADDING: f64 = 2.0;

/// Default number of leading columns whose width is recomputed (A..X)
pub const DEFAULT_ADJUSTED_COLUMNS: u16 = 24;

/// Default number of leading columns that get narrowed (A..H)
pub const DEFAULT_NARROW_COLUMNS: u16 = 8;

/// Default shrink factor for narrowed columns
pub const DEFAULT_NARROW_FACTOR: f64 = 0.6;

/// Upper bound for `decimal_places`
pub const MAX_DECIMAL_PLACES: usize = 20;

/// Immutable settings shared by the normalizer and the layout adjuster.
///
/// `Default` reproduces the remittance layout; hosts embedding the engine in a
/// differently shaped pipeline override fields through the `with_*` builders
/// or, with the `serde` feature, from a JSON document where missing fields
/// keep their defaults.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NormalizeConfig {
    /// Zero-based columns rendered as fixed-decimal text
    pub target_columns: BTreeSet<u16>,
    /// Fractional digits in fixed-decimal text
    pub decimal_places: usize,
    /// Width used when a column has no hint
    pub min_column_width: f64,
    /// Upper bound for computed widths
    pub max_column_width: f64,
    /// Added to the longest normalized text of a column
    pub width_padding: f64,
    /// Columns `0..adjusted_columns` get their width recomputed
    pub adjusted_columns: u16,
    /// Columns `0..narrow_columns` are multiplied by `narrow_factor`
    pub narrow_columns: u16,
    /// Shrink factor for the leading block of columns
    pub narrow_factor: f64,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            target_columns: DEFAULT_TARGET_COLUMNS.into_iter().collect(),
            decimal_places: DEFAULT_DECIMAL_PLACES,
            min_column_width: DEFAULT_MIN_COLUMN_WIDTH,
            max_column_width: DEFAULT_MAX_COLUMN_WIDTH,
            width_padding: DEFAULT_WIDTH_PADDING,
            adjusted_columns: DEFAULT_ADJUSTED_COLUMNS,
            narrow_columns: DEFAULT_NARROW_COLUMNS,
            narrow_factor: DEFAULT_NARROW_FACTOR,
        }
    }
}

impl NormalizeConfig {
    /// Check whether a column gets fixed-decimal formatting
    pub fn is_target_column(&self, col: u16) -> bool {
        self.target_columns.contains(&col)
    }

    /// Replace the target columns with zero-based indices
    pub fn with_target_columns<I: IntoIterator<Item = u16>>(mut self, columns: I) -> Self {
        self.target_columns = columns.into_iter().collect();
        self
    }

    /// Replace the target columns with column letters (e.g. `["K", "L"]`)
    pub fn with_target_column_letters<S: AsRef<str>>(mut self, letters: &[S]) -> Result<Self> {
        self.target_columns = letters
            .iter()
            .map(|l| CellAddress::letters_to_column(l.as_ref().trim()))
            .collect::<Result<_>>()?;
        Ok(self)
    }

    /// Set the number of fractional digits
    pub fn with_decimal_places(mut self, places: usize) -> Self {
        self.decimal_places = places;
        self
    }

    /// Set the minimum and maximum column widths
    pub fn with_width_bounds(mut self, min: f64, max: f64) -> Self {
        self.min_column_width = min;
        self.max_column_width = max;
        self
    }

    /// Set the narrowed block and its shrink factor
    pub fn with_narrowing(mut self, columns: u16, factor: f64) -> Self {
        self.narrow_columns = columns;
        self.narrow_factor = factor;
        self
    }

    /// Reject settings the engine cannot honour
    pub fn validate(&self) -> Result<()> {
        if self.decimal_places > MAX_DECIMAL_PLACES {
            return Err(Error::InvalidConfig(format!(
                "decimal_places must be at most {}, got {}",
                MAX_DECIMAL_PLACES, self.decimal_places
            )));
        }
        for (name, value) in [
            ("min_column_width", self.min_column_width),
            ("max_column_width", self.max_column_width),
            ("width_padding", self.width_padding),
            ("narrow_factor", self.narrow_factor),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{} must be a finite non-negative number, got {}",
                    name, value
                )));
            }
        }
        if self.min_column_width > self.max_column_width {
            return Err(Error::InvalidConfig(format!(
                "min_column_width ({}) exceeds max_column_width ({})",
                self.min_column_width, self.max_column_width
            )));
        }
        Ok(())
    }
}
