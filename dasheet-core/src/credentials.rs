//! Bearer-token lookup over a local `KEY=value` file.
//!
//! ```text
//! # da-config.txt
//! DA_IMS_TOKEN="eyJhbGciOi..."
//! ADMIN_AUTH_TOKEN='...'
//! ```
//!
//! The provider is an ordinary value owned by whoever runs the workflows.
//! Resolved tokens are cached on it until [`CredentialProvider::invalidate`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::types::{Token, TokenKind};

#[derive(Debug)]
pub struct CredentialProvider {
    source: PathBuf,
    cache: HashMap<TokenKind, Token>,
}

impl CredentialProvider {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            cache: HashMap::new(),
        }
    }

    /// File the tokens are read from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Resolve a token, reading the source file on a cache miss.
    ///
    /// `None` when the file is unreadable, the key is missing or empty, or the
    /// value is still the template placeholder. Misses are not cached.
    pub fn token(&mut self, kind: TokenKind) -> Option<Token> {
        if let Some(token) = self.cache.get(&kind) {
            return Some(token.clone());
        }

        let contents = match std::fs::read_to_string(&self.source) {
            Ok(contents) => contents,
            Err(err) => {
                tracing::warn!(
                    "could not read credentials file {}: {err}",
                    self.source.display()
                );
                return None;
            }
        };

        let Some(value) = lookup(&contents, kind.key()) else {
            tracing::warn!("{} not found in {}", kind.key(), self.source.display());
            return None;
        };
        if value.is_empty() || value == kind.placeholder() {
            tracing::warn!(
                "{} in {} is empty or still the placeholder",
                kind.key(),
                self.source.display()
            );
            return None;
        }

        tracing::info!("{} loaded from {}", kind.key(), self.source.display());
        let token = Token::new(value);
        self.cache.insert(kind, token.clone());
        Some(token)
    }

    /// Drop every cached token; the next lookup rereads the file.
    pub fn invalidate(&mut self) {
        self.cache.clear();
    }
}

/// Find `key` in dotenv-style `KEY=value` lines.
///
/// Quoting, `#` comments and blank lines follow dotenv rules; the value is
/// everything after the first `=`, so tokens containing `=` survive intact.
/// Lines that do not parse are skipped.
pub(crate) fn lookup(contents: &str, key: &str) -> Option<String> {
    dotenvy::from_read_iter(contents.as_bytes())
        .filter_map(|entry| match entry {
            Ok(pair) => Some(pair),
            Err(err) => {
                tracing::debug!("skipping unreadable credentials line: {err}");
                None
            }
        })
        .find(|(k, _)| k == key)
        .map(|(_, v)| v)
}
