//! Column-key and column-width resolution.

use crate::types::{Metadata, Row, DEFAULT_COLUMN_WIDTH};

/// Fallback columns for a brand-new or fully emptied sheet.
pub const DEFAULT_SCHEMA: [&str; 13] = [
    "Timestamp",
    "Prompt",
    "Status",
    "DocumentPath",
    "TargetFolder",
    "SharePointFile",
    "SharePointPath",
    "ImageURL",
    "EDSURL",
    "AEMPreviewURL",
    "Source",
    "UserHost",
    "GeneratedText",
];

/// [`DEFAULT_SCHEMA`] as owned keys.
pub fn default_schema() -> Vec<String> {
    DEFAULT_SCHEMA.iter().map(|k| k.to_string()).collect()
}

/// Pick the column keys for a sheet.
///
/// The first existing row wins; later rows are assumed to share its keys.
/// Without rows, preserved metadata keys are used, then `default_schema`.
pub fn resolve_columns(
    existing_rows: &[Row],
    preserved: &Metadata,
    default_schema: &[String],
) -> Vec<String> {
    if let Some(first) = existing_rows.first() {
        return first.keys().cloned().collect();
    }
    if !preserved.column_keys.is_empty() {
        return preserved.column_keys.clone();
    }
    default_schema.to_vec()
}

/// Keep `preserved` widths only when they line up one-to-one with `column_keys`.
pub fn resolve_column_widths(column_keys: &[String], preserved: &[u32]) -> Vec<u32> {
    if preserved.len() == column_keys.len() {
        return preserved.to_vec();
    }
    if !preserved.is_empty() {
        tracing::warn!(
            "column count changed ({} widths, {} columns); resetting widths to {}",
            preserved.len(),
            column_keys.len(),
            DEFAULT_COLUMN_WIDTH
        );
    }
    vec![DEFAULT_COLUMN_WIDTH; column_keys.len()]
}
