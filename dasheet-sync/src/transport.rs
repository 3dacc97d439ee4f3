//! Whole-document fetch and replace against the remote store.
//!
//! There is no partial update and no version check: an upload replaces the
//! document wholesale and the last writer wins.

use reqwest::blocking::{multipart, Client, Response};
use reqwest::StatusCode;

use dasheet_core::{DocumentPath, Sheet, Token};

use crate::codec;
use crate::endpoints::join;
use crate::error::TransportError;

/// Field name of the multipart attachment carrying the document.
pub const UPLOAD_FIELD: &str = "data";

/// Remote storage for a sheet document.
pub trait SheetStore {
    /// Fetch the document; `Ok(None)` when it does not exist yet.
    fn fetch_sheet(&self, path: &DocumentPath, token: &Token)
        -> Result<Option<Sheet>, TransportError>;

    /// Replace the document with `sheet`.
    fn upload_sheet(
        &self,
        path: &DocumentPath,
        sheet: &Sheet,
        token: &Token,
    ) -> Result<(), TransportError>;
}

/// [`SheetStore`] over HTTP: `GET <source_base>/<path>`, multipart
/// `POST <upload_base>/<path>`.
#[derive(Debug, Clone)]
pub struct HttpSheetStore {
    client: Client,
    source_base: String,
    upload_base: String,
}

impl HttpSheetStore {
    pub fn new(
        client: Client,
        source_base: impl Into<String>,
        upload_base: impl Into<String>,
    ) -> Self {
        Self {
            client,
            source_base: source_base.into(),
            upload_base: upload_base.into(),
        }
    }
}

impl SheetStore for HttpSheetStore {
    fn fetch_sheet(
        &self,
        path: &DocumentPath,
        token: &Token,
    ) -> Result<Option<Sheet>, TransportError> {
        let url = join(&self.source_base, path.as_str());
        tracing::debug!("GET {url}");
        let resp = self
            .client
            .get(&url)
            .bearer_auth(token.expose())
            .send()
            .map_err(|source| TransportError::Network {
                method: "GET",
                url: url.clone(),
                source,
            })?;

        if is_absent(resp.status()) {
            tracing::info!("{path} does not exist yet (HTTP {})", resp.status().as_u16());
            return Ok(None);
        }
        let resp = ensure_success("GET", &url, resp)?;
        let body = resp.bytes().map_err(|source| TransportError::Network {
            method: "GET",
            url: url.clone(),
            source,
        })?;
        let sheet = codec::decode(&body).map_err(|source| TransportError::Decode { url, source })?;
        Ok(Some(sheet))
    }

    fn upload_sheet(
        &self,
        path: &DocumentPath,
        sheet: &Sheet,
        token: &Token,
    ) -> Result<(), TransportError> {
        let url = join(&self.upload_base, path.as_str());
        let body = codec::encode(sheet)?;
        tracing::debug!("POST {url} ({} bytes, {} rows)", body.len(), sheet.data.len());

        let part = multipart::Part::bytes(body)
            .file_name(path.file_name().to_string())
            .mime_str("application/json")
            .map_err(TransportError::Client)?;
        let form = multipart::Form::new().part(UPLOAD_FIELD, part);

        let resp = self
            .client
            .post(&url)
            .bearer_auth(token.expose())
            .multipart(form)
            .send()
            .map_err(|source| TransportError::Network {
                method: "POST",
                url: url.clone(),
                source,
            })?;
        ensure_success("POST", &url, resp)?;
        Ok(())
    }
}

/// Statuses that mean "no document here yet".
pub fn is_absent(status: StatusCode) -> bool {
    status == StatusCode::NOT_FOUND || status == StatusCode::GONE
}

fn ensure_success(
    method: &'static str,
    url: &str,
    resp: Response,
) -> Result<Response, TransportError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let message = resp
        .text()
        .ok()
        .map(|body| summarize(&body))
        .filter(|body| !body.is_empty())
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("").to_string());
    Err(TransportError::Status {
        method,
        url: url.to_string(),
        status: status.as_u16(),
        message,
    })
}

fn summarize(body: &str) -> String {
    const MAX: usize = 200;
    let body = body.trim();
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}…", &body[..idx]),
        None => body.to_string(),
    }
}
