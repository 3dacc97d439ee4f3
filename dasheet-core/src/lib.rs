//! dasheet core library - sheet model, configuration, credentials, and the
//! pure reconciliation logic shared by every workflow.
//!
//! Public API surface:
//! - [`types`] - rows, sheets, metadata, document paths, tokens
//! - [`config`] - `~/.dasheet/config.yaml` loading
//! - [`credentials`] - [`CredentialProvider`] over the `KEY=value` token file
//! - [`schema`] - column-key and column-width resolution
//! - [`reconcile`] - row classification, cleaning, merging, reset rows
//! - [`records`] - typed log records and the fixed sample data
//! - [`error`] - [`ConfigError`]

pub mod config;
pub mod credentials;
pub mod error;
pub mod reconcile;
pub mod records;
pub mod schema;
pub mod types;

pub use config::SyncConfig;
pub use credentials::CredentialProvider;
pub use error::ConfigError;
pub use reconcile::Reconciler;
pub use types::{
    DocumentPath, Metadata, ReconcileStrategy, Row, Sheet, Token, TokenKind, DEFAULT_COLUMN_WIDTH,
};
