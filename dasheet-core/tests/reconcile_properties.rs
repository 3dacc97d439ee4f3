//! Row reconciliation and schema properties across both strategies.

use dasheet_core::{
    reconcile::{build_reset_rows, is_empty_row, merge},
    schema::{default_schema, resolve_columns, resolve_column_widths},
    Metadata, ReconcileStrategy, Reconciler, Row,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn row(ts: &str, prompt: &str) -> Row {
    [("Timestamp", ts), ("Prompt", prompt), ("Status", "")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn blank() -> Row {
    row("", " ")
}

// ---------------------------------------------------------------------------
// 1. clean
// ---------------------------------------------------------------------------

#[rstest]
#[case::all_blank(vec![blank(), blank()], 0)]
#[case::interleaved(vec![row("t1", "a"), blank(), row("t2", "b"), blank()], 2)]
#[case::no_blanks(vec![row("t1", "a"), row("t2", "b")], 2)]
#[case::empty(vec![], 0)]
fn metadata_only_clean_leaves_no_blank_rows(#[case] rows: Vec<Row>, #[case] expected: usize) {
    let cleaned = Reconciler::new(ReconcileStrategy::MetadataOnly).clean(rows);
    assert_eq!(cleaned.len(), expected);
    assert!(cleaned.iter().all(|r| !is_empty_row(r)));
}

#[test]
fn clean_preserves_relative_order() {
    let rows = vec![
        row("t3", "c"),
        blank(),
        row("t1", "a"),
        blank(),
        row("t2", "b"),
    ];
    let cleaned = Reconciler::default().clean(rows);
    let order: Vec<&str> = cleaned.iter().map(|r| r["Timestamp"].as_str()).collect();
    assert_eq!(order, vec!["t3", "t1", "t2"]);
}

// ---------------------------------------------------------------------------
// 2. merge
// ---------------------------------------------------------------------------

#[test]
fn append_keeps_duplicates_in_order() {
    let existing = vec![row("t1", "a"), row("t2", "b")];
    let new_rows = vec![row("t1", "a"), row("t3", "c")];
    let merged = merge(existing.clone(), new_rows.clone());

    assert_eq!(merged.len(), existing.len() + new_rows.len());
    assert_eq!(&merged[..2], &existing[..]);
    assert_eq!(&merged[2..], &new_rows[..]);
}

// ---------------------------------------------------------------------------
// 3. schema
// ---------------------------------------------------------------------------

#[rstest]
#[case::with_preserved(vec!["Other".to_string()])]
#[case::without_preserved(vec![])]
fn resolve_columns_prefers_first_row(#[case] preserved_keys: Vec<String>) {
    let rows = vec![row("t1", "a")];
    let preserved = Metadata {
        column_keys: preserved_keys,
        ..Metadata::default()
    };
    let custom_default = vec!["Unused".to_string()];
    assert_eq!(
        resolve_columns(&rows, &preserved, &custom_default),
        vec!["Timestamp", "Prompt", "Status"]
    );
}

#[test]
fn resolved_widths_always_match_column_count() {
    let cols = default_schema();
    for preserved in [vec![], vec![10; 3], vec![10; 13], vec![10; 20]] {
        assert_eq!(resolve_column_widths(&cols, &preserved).len(), cols.len());
    }
}

// ---------------------------------------------------------------------------
// 4. reset rows
// ---------------------------------------------------------------------------

#[test]
fn reset_after_data_leaves_single_blank_template() {
    let rows = vec![row("t1", "a"), row("t2", "b")];
    let keys = resolve_columns(&rows, &Metadata::default(), &default_schema());
    let reset = build_reset_rows(&keys, true);

    assert_eq!(reset.len(), 1);
    assert!(is_empty_row(&reset[0]));
    assert_eq!(reset[0].keys().cloned().collect::<Vec<_>>(), keys);
}
