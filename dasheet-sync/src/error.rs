//! Error types for dasheet-sync.

use std::path::PathBuf;

use thiserror::Error;

use dasheet_core::TokenKind;

/// Failures talking to the remote document store.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The server answered with a status the caller cannot treat as success.
    #[error("{method} {url} returned HTTP {status}: {message}")]
    Status {
        method: &'static str,
        url: String,
        status: u16,
        message: String,
    },

    /// Connection, TLS, or body-read failure.
    #[error("{method} {url} failed: {source}")]
    Network {
        method: &'static str,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response body was not a sheet document.
    #[error("could not decode sheet from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The sheet could not be serialized for upload.
    #[error("could not encode sheet: {0}")]
    Encode(#[from] serde_json::Error),

    /// The HTTP client itself could not be constructed.
    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl TransportError {
    /// HTTP status, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Everything that aborts a workflow.
#[derive(Debug, Error)]
pub enum SyncError {
    /// A token the workflow needs is missing or still the placeholder.
    #[error("{kind} is not set; add `{kind}=<token>` to {}", .source_path.display())]
    MissingCredential { kind: TokenKind, source_path: PathBuf },

    /// Fetch or upload failed.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Convenience constructor for [`SyncError::MissingCredential`].
pub(crate) fn missing(kind: TokenKind, source_path: impl Into<PathBuf>) -> SyncError {
    SyncError::MissingCredential {
        kind,
        source_path: source_path.into(),
    }
}
