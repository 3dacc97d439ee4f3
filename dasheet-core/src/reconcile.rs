//! Row classification and in-memory reconciliation.
//!
//! A row is *empty* when every value is blank after trimming; anything else
//! is a *data row*. Whether a leading empty row means "header" depends on the
//! [`ReconcileStrategy`] the [`Reconciler`] was built with.

use crate::types::{ReconcileStrategy, Row};

/// `true` when every value in `row` is blank.
pub fn is_empty_row(row: &Row) -> bool {
    row.values().all(|v| v.trim().is_empty())
}

/// Strict append: `existing` then `new_rows`, no dedup.
pub fn merge(existing: Vec<Row>, new_rows: Vec<Row>) -> Vec<Row> {
    let mut merged = existing;
    merged.extend(new_rows);
    merged
}

/// A row mapping every key to `""`.
pub fn build_template_row(column_keys: &[String]) -> Row {
    column_keys
        .iter()
        .map(|k| (k.clone(), String::new()))
        .collect()
}

/// Rows a reset leaves behind: the template when there was data, else nothing.
pub fn build_reset_rows(column_keys: &[String], had_data: bool) -> Vec<Row> {
    if had_data {
        vec![build_template_row(column_keys)]
    } else {
        Vec::new()
    }
}

/// Strategy-aware cleaning and init layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reconciler {
    strategy: ReconcileStrategy,
}

impl Reconciler {
    pub fn new(strategy: ReconcileStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> ReconcileStrategy {
        self.strategy
    }

    /// Whether `rows` starts with a header this strategy keeps.
    pub fn has_header(&self, rows: &[Row]) -> bool {
        match self.strategy {
            ReconcileStrategy::MetadataOnly => false,
            ReconcileStrategy::LegacyHeaderPreserving => rows.first().is_some_and(is_empty_row),
        }
    }

    /// Drop empty rows, preserving the order of the rest.
    ///
    /// Under `LegacyHeaderPreserving` a leading empty row survives at index 0.
    pub fn clean(&self, rows: Vec<Row>) -> Vec<Row> {
        let keep_header = self.has_header(&rows);
        let mut iter = rows.into_iter();
        let mut cleaned = Vec::new();
        if keep_header {
            cleaned.extend(iter.next());
        }
        cleaned.extend(iter.filter(|row| !is_empty_row(row)));
        cleaned
    }

    /// Initial rows for a fresh sheet built from `samples`.
    pub fn init_rows(&self, samples: Vec<Row>) -> Vec<Row> {
        match self.strategy {
            ReconcileStrategy::MetadataOnly => samples,
            ReconcileStrategy::LegacyHeaderPreserving => {
                let Some(first) = samples.first() else {
                    return samples;
                };
                let keys: Vec<String> = first.keys().cloned().collect();
                let mut rows = vec![build_template_row(&keys)];
                rows.extend(samples);
                rows
            }
        }
    }
}

/// Number of rows that carry data (headers and blank rows excluded).
pub fn count_data_rows(rows: &[Row]) -> usize {
    rows.iter().filter(|row| !is_empty_row(row)).count()
}
