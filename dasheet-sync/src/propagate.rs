//! Best-effort propagation hints fired after a reset.
//!
//! Each step is a cache-bypassing `GET`. The outcome is logged and reported
//! but never changes whether the reset succeeded.

use std::fmt;

use chrono::Utc;
use reqwest::blocking::Client;
use reqwest::header::{CACHE_CONTROL, PRAGMA};

use dasheet_core::{Token, TokenKind};

use crate::endpoints::Endpoints;
use crate::error::TransportError;

/// Header carrying the administrative token on preview/publish requests.
pub const ADMIN_TOKEN_HEADER: &str = "x-auth-token";

/// One propagation hint, in the order they are fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropagationStep {
    CacheBust,
    Preview,
    Publish,
}

impl PropagationStep {
    pub const ALL: [PropagationStep; 3] = [
        PropagationStep::CacheBust,
        PropagationStep::Preview,
        PropagationStep::Publish,
    ];

    /// Credential the step authenticates with.
    pub fn token_kind(self) -> TokenKind {
        match self {
            PropagationStep::CacheBust => TokenKind::DocumentAuthoring,
            PropagationStep::Preview | PropagationStep::Publish => TokenKind::Admin,
        }
    }
}

impl fmt::Display for PropagationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropagationStep::CacheBust => write!(f, "cache-bust"),
            PropagationStep::Preview => write!(f, "preview"),
            PropagationStep::Publish => write!(f, "publish"),
        }
    }
}

/// What happened to one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropagationOutcome {
    /// The request completed; the status is informational only.
    Delivered { step: PropagationStep, status: u16 },
    /// The request could not be sent or read.
    Failed { step: PropagationStep, message: String },
}

impl PropagationOutcome {
    pub fn step(&self) -> PropagationStep {
        match self {
            PropagationOutcome::Delivered { step, .. } | PropagationOutcome::Failed { step, .. } => {
                *step
            }
        }
    }
}

/// Something that can fire propagation hints.
pub trait Propagator {
    /// Fire `step`; returns the HTTP status when a response arrived.
    fn fire(&self, step: PropagationStep, token: &Token) -> Result<u16, TransportError>;
}

/// Fire one step, turning any result into a logged outcome.
pub fn best_effort(
    propagator: &dyn Propagator,
    step: PropagationStep,
    token: &Token,
) -> PropagationOutcome {
    match propagator.fire(step, token) {
        Ok(status) if (200..300).contains(&status) => {
            tracing::info!("{step} hint delivered (HTTP {status})");
            PropagationOutcome::Delivered { step, status }
        }
        Ok(status) => {
            tracing::warn!("{step} hint answered HTTP {status}; continuing");
            PropagationOutcome::Delivered { step, status }
        }
        Err(err) => {
            tracing::warn!("{step} hint failed: {err}; continuing");
            PropagationOutcome::Failed {
                step,
                message: err.to_string(),
            }
        }
    }
}

/// [`Propagator`] over HTTP against the source, preview, and publish URLs.
#[derive(Debug, Clone)]
pub struct HttpPropagator {
    client: Client,
    endpoints: Endpoints,
}

impl HttpPropagator {
    pub fn new(client: Client, endpoints: Endpoints) -> Self {
        Self { client, endpoints }
    }

    fn url(&self, step: PropagationStep) -> &str {
        match step {
            PropagationStep::CacheBust => &self.endpoints.source,
            PropagationStep::Preview => &self.endpoints.preview,
            PropagationStep::Publish => &self.endpoints.publish,
        }
    }
}

impl Propagator for HttpPropagator {
    fn fire(&self, step: PropagationStep, token: &Token) -> Result<u16, TransportError> {
        let url = self.url(step);
        let nocache = Utc::now().timestamp_millis().to_string();
        tracing::debug!("GET {url}?nocache={nocache} ({step})");

        let request = self
            .client
            .get(url)
            .query(&[("nocache", nocache.as_str())])
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache");
        let request = match step.token_kind() {
            TokenKind::DocumentAuthoring => request.bearer_auth(token.expose()),
            TokenKind::Admin => request.header(ADMIN_TOKEN_HEADER, token.expose()),
        };

        let resp = request.send().map_err(|source| TransportError::Network {
            method: "GET",
            url: url.to_string(),
            source,
        })?;
        Ok(resp.status().as_u16())
    }
}
