//! Column width sizing from observed content lengths

use std::collections::BTreeMap;

use crate::config::NormalizeConfig;

/// Longest normalized text seen per column during one sheet pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnLengths {
    max_by_col: BTreeMap<u16, usize>,
}

impl ColumnLengths {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a text length for a column, keeping the maximum
    pub fn record(&mut self, col: u16, len: usize) {
        let entry = self.max_by_col.entry(col).or_insert(0);
        *entry = (*entry).max(len);
    }

    /// Longest length recorded for a column (0 if none)
    pub fn get(&self, col: u16) -> usize {
        self.max_by_col.get(&col).copied().unwrap_or(0)
    }

    /// Number of columns with a recorded length
    pub fn len(&self) -> usize {
        self.max_by_col.len()
    }

    /// Check if nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.max_by_col.is_empty()
    }

    /// Iterate over (column, max length) pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (u16, usize)> + '_ {
        self.max_by_col.iter().map(|(c, l)| (*c, *l))
    }
}

/// Compute column widths for the adjusted block of columns.
///
/// Each column in `0..adjusted_columns` starts from its hint (or the minimum
/// width when the hint is missing, zero or not finite), grows to fit the
/// longest text plus padding, is capped at the maximum, and is shrunk when it
/// falls in the narrowed block. Hints outside the adjusted block are copied
/// unchanged.
pub fn adjust_widths(
    hints: &BTreeMap<u16, f64>,
    lengths: &ColumnLengths,
    config: &NormalizeConfig,
) -> BTreeMap<u16, f64> {
    let mut widths: BTreeMap<u16, f64> = hints
        .iter()
        .filter(|(col, _)| **col >= config.adjusted_columns)
        .map(|(col, w)| (*col, *w))
        .collect();

    for col in 0..config.adjusted_columns {
        let base = hints
            .get(&col)
            .copied()
            .filter(|w| w.is_finite() && *w != 0.0)
            .unwrap_or(config.min_column_width);
        let content = lengths.get(col) as f64 + config.width_padding;

        let mut width = base.max(content).min(config.max_column_width);
        if col < config.narrow_columns {
            width *= config.narrow_factor;
        }
        widths.insert(col, width);
    }

    widths
}
