//! URLs derived from the config and document path.

use dasheet_core::{DocumentPath, SyncConfig};

/// `<base>/<path>` with exactly one slash between them.
pub fn join(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Every URL a workflow touches for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub source: String,
    pub upload: String,
    pub preview: String,
    pub publish: String,
}

impl Endpoints {
    pub fn from_config(config: &SyncConfig) -> Self {
        let path: &DocumentPath = &config.document_path;
        let origins = config.site_origins();
        Self {
            source: join(&config.source_base, path.as_str()),
            upload: join(config.upload_base(), path.as_str()),
            preview: join(&origins.preview, path.resource()),
            publish: join(&origins.publish, path.resource()),
        }
    }
}
