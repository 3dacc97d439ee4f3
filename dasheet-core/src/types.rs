//! Domain types for the synchronized sheet.
//!
//! A [`Sheet`] is always rebuilt from a remote snapshot on every workflow
//! run; nothing here is cached across invocations.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Width assigned to a column when no preserved width lines up with it.
pub const DEFAULT_COLUMN_WIDTH: u32 = 50;

/// Value of the `:type` document attribute.
pub const DOCUMENT_TYPE: &str = "sheet";

/// Value of the `:sheetname` document attribute when the remote omits it.
pub const DEFAULT_SHEET_NAME: &str = "data";

/// Remote document addressed when the config does not name one.
pub const DEFAULT_DOCUMENT_PATH: &str = "meejain/devlive-lab1/ai-image-generation-log.json";

/// One record: column key to string value, in column order.
pub type Row = IndexMap<String, String>;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Path of the remote document, `<org>/<site>/<file>` (e.g.
/// `meejain/devlive-lab1/ai-image-generation-log.json`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentPath(String);

impl DocumentPath {
    /// Parse and normalise a document path; leading/trailing slashes are dropped.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let trimmed = raw.trim().trim_matches('/');
        let segments: Vec<&str> = trimmed.split('/').collect();
        if segments.len() < 3 || segments.iter().any(|s| s.is_empty()) {
            return Err(ConfigError::InvalidDocumentPath(raw.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn org(&self) -> &str {
        self.split().0
    }

    pub fn site(&self) -> &str {
        self.split().1
    }

    /// Everything after `<org>/<site>/`.
    pub fn resource(&self) -> &str {
        self.split().2
    }

    /// Last path segment, used as the multipart attachment filename.
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    fn split(&self) -> (&str, &str, &str) {
        let mut parts = self.0.splitn(3, '/');
        let org = parts.next().unwrap_or_default();
        let site = parts.next().unwrap_or_default();
        let rest = parts.next().unwrap_or_default();
        (org, site, rest)
    }
}

impl Default for DocumentPath {
    fn default() -> Self {
        Self(DEFAULT_DOCUMENT_PATH.to_string())
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<String> for DocumentPath {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<DocumentPath> for String {
    fn from(p: DocumentPath) -> Self {
        p.0
    }
}

/// A bearer credential. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw secret, for building request headers only.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which credential a workflow needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Document-authoring token: reads and writes the sheet.
    DocumentAuthoring,
    /// Administrative token: preview/publish triggers after a reset.
    Admin,
}

impl TokenKind {
    /// Key in the credentials file.
    pub fn key(self) -> &'static str {
        match self {
            TokenKind::DocumentAuthoring => "DA_IMS_TOKEN",
            TokenKind::Admin => "ADMIN_AUTH_TOKEN",
        }
    }

    /// Value shipped in the template file; treated as "not set".
    pub fn placeholder(self) -> &'static str {
        match self {
            TokenKind::DocumentAuthoring => "your_token_here",
            TokenKind::Admin => "your_admin_token_here",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// How an all-blank leading row is treated.
///
/// Documents in the wild were written both ways, so the choice is explicit
/// configuration rather than something inferred from the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ReconcileStrategy {
    /// Column names live only in metadata; every blank row is dropped.
    #[default]
    MetadataOnly,
    /// A blank first row is a header and stays at position 0.
    LegacyHeaderPreserving,
}

impl fmt::Display for ReconcileStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReconcileStrategy::MetadataOnly => write!(f, "metadata-only"),
            ReconcileStrategy::LegacyHeaderPreserving => write!(f, "legacy-header-preserving"),
        }
    }
}

// ---------------------------------------------------------------------------
// Sheet
// ---------------------------------------------------------------------------

/// Document-level attributes carried next to the rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub document_type: String,
    pub sheet_name: String,
    pub column_widths: Vec<u32>,
    /// Column order kept even when no row is left to carry it.
    pub column_keys: Vec<String>,
}

impl Metadata {
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Self {
            document_type: DOCUMENT_TYPE.to_string(),
            sheet_name: sheet_name.into(),
            column_widths: Vec::new(),
            column_keys: Vec::new(),
        }
    }
}

impl Default for Metadata {
    fn default() -> Self {
        Self::new(DEFAULT_SHEET_NAME)
    }
}

/// The whole tabular document, synchronized as one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
    pub data: Vec<Row>,
    pub metadata: Metadata,
}

impl Sheet {
    /// An empty sheet, used when the remote document does not exist yet.
    pub fn empty(sheet_name: impl Into<String>) -> Self {
        Self::from_rows(Vec::new(), Metadata::new(sheet_name))
    }

    /// Build a sheet whose counters match `data`.
    pub fn from_rows(data: Vec<Row>, metadata: Metadata) -> Self {
        let len = data.len();
        Self {
            total: len,
            limit: len,
            offset: 0,
            data,
            metadata,
        }
    }

    /// Key set of the first row, in order.
    pub fn first_row_keys(&self) -> Vec<String> {
        self.data
            .first()
            .map(|row| row.keys().cloned().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_path_parts() {
        let p = DocumentPath::parse("/meejain/devlive-lab1/logs/ai-log.json").unwrap();
        assert_eq!(p.as_str(), "meejain/devlive-lab1/logs/ai-log.json");
        assert_eq!(p.org(), "meejain");
        assert_eq!(p.site(), "devlive-lab1");
        assert_eq!(p.resource(), "logs/ai-log.json");
        assert_eq!(p.file_name(), "ai-log.json");
    }

    #[test]
    fn default_document_path_parses() {
        let parsed = DocumentPath::parse(DEFAULT_DOCUMENT_PATH).unwrap();
        assert_eq!(parsed, DocumentPath::default());
        assert_eq!(parsed.file_name(), "ai-image-generation-log.json");
    }

    #[test]
    fn document_path_rejects_short_paths() {
        assert!(DocumentPath::parse("org/file.json").is_err());
        assert!(DocumentPath::parse("org//file.json").is_err());
        assert!(DocumentPath::parse("").is_err());
    }

    #[test]
    fn token_debug_is_redacted() {
        let t = Token::new("secret-value");
        assert_eq!(format!("{t:?}"), "Token(***)");
        assert_eq!(t.expose(), "secret-value");
    }

    #[test]
    fn from_rows_sets_counters() {
        let mut row = Row::new();
        row.insert("A".into(), "1".into());
        let sheet = Sheet::from_rows(vec![row.clone(), row], Metadata::default());
        assert_eq!(sheet.total, 2);
        assert_eq!(sheet.limit, 2);
        assert_eq!(sheet.offset, 0);
        assert_eq!(sheet.metadata.document_type, "sheet");
        assert_eq!(sheet.metadata.sheet_name, "data");
    }

    #[test]
    fn strategy_display() {
        assert_eq!(ReconcileStrategy::MetadataOnly.to_string(), "metadata-only");
        assert_eq!(
            ReconcileStrategy::LegacyHeaderPreserving.to_string(),
            "legacy-header-preserving"
        );
    }
}
