//! Credential provider integration tests: file parsing, placeholders, caching.

use assert_fs::prelude::*;
use predicates::prelude::*;
use dasheet_core::{CredentialProvider, TokenKind};

fn provider_with(contents: &str) -> (assert_fs::TempDir, CredentialProvider) {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("da-config.txt");
    file.write_str(contents).expect("write");
    let provider = CredentialProvider::new(file.path());
    (dir, provider)
}

#[test]
fn reads_both_tokens() {
    let (_dir, mut provider) =
        provider_with("DA_IMS_TOKEN=\"da-secret\"\nADMIN_AUTH_TOKEN='admin-secret'\n");
    let da = provider.token(TokenKind::DocumentAuthoring).expect("da token");
    let admin = provider.token(TokenKind::Admin).expect("admin token");
    assert_eq!(da.expose(), "da-secret");
    assert_eq!(admin.expose(), "admin-secret");
}

#[test]
fn missing_file_yields_none() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let mut provider = CredentialProvider::new(dir.path().join("nope.txt"));
    assert!(provider.token(TokenKind::DocumentAuthoring).is_none());
}

#[test]
fn placeholders_count_as_absent() {
    let (_dir, mut provider) = provider_with(
        "DA_IMS_TOKEN=your_token_here\nADMIN_AUTH_TOKEN=\"your_admin_token_here\"\n",
    );
    assert!(provider.token(TokenKind::DocumentAuthoring).is_none());
    assert!(provider.token(TokenKind::Admin).is_none());
}

#[test]
fn empty_value_counts_as_absent() {
    let (_dir, mut provider) = provider_with("DA_IMS_TOKEN=\"\"\n");
    assert!(provider.token(TokenKind::DocumentAuthoring).is_none());
}

#[test]
fn cached_token_survives_file_change_until_invalidated() {
    let (dir, mut provider) = provider_with("DA_IMS_TOKEN=first\n");
    assert_eq!(
        provider.token(TokenKind::DocumentAuthoring).unwrap().expose(),
        "first"
    );

    dir.child("da-config.txt")
        .write_str("DA_IMS_TOKEN=second\n")
        .expect("rewrite");
    assert_eq!(
        provider.token(TokenKind::DocumentAuthoring).unwrap().expose(),
        "first",
        "token must come from the cache"
    );

    provider.invalidate();
    assert_eq!(
        provider.token(TokenKind::DocumentAuthoring).unwrap().expose(),
        "second"
    );
}

#[test]
fn miss_is_not_cached() {
    let (dir, mut provider) = provider_with("# nothing yet\n");
    assert!(provider.token(TokenKind::Admin).is_none());

    dir.child("da-config.txt")
        .write_str("ADMIN_AUTH_TOKEN=now-set\n")
        .expect("rewrite");
    assert_eq!(provider.token(TokenKind::Admin).unwrap().expose(), "now-set");
}

#[test]
fn reading_leaves_the_file_untouched() {
    let (dir, mut provider) = provider_with("# tokens\nDA_IMS_TOKEN='kept'\n");
    assert!(provider.token(TokenKind::DocumentAuthoring).is_some());
    provider.invalidate();
    assert!(provider.token(TokenKind::Admin).is_none());

    dir.child("da-config.txt").assert(
        predicate::str::starts_with("# tokens").and(predicate::str::contains("DA_IMS_TOKEN='kept'")),
    );
}
