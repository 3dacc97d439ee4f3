//! Synchronizer configuration.
//!
//! # Storage layout
//!
//! ```text
//! ~/.dasheet/
//!   config.yaml     (optional - every field has a default)
//! ```
//!
//! # API pattern
//!
//! - `load_at(home: &Path)` - explicit home; used in tests with `TempDir`
//! - `load()` - derives home from `dirs::home_dir()`, delegates to `load_at`

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{io_err, ConfigError};
use crate::records::SiteOrigins;
use crate::types::{DocumentPath, ReconcileStrategy, DEFAULT_SHEET_NAME};

pub const DEFAULT_SOURCE_BASE: &str = "https://admin.da.live/source";
pub const DEFAULT_CREDENTIALS_FILE: &str = "da-config.txt";
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 3000;

/// Everything the workflows need besides credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Base URL for reads, `GET <source_base>/<document_path>`.
    pub source_base: String,
    /// Base URL for uploads; `None` reuses `source_base`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload_base: Option<String>,
    pub document_path: DocumentPath,
    pub sheet_name: String,
    /// `KEY=value` token file; relative paths resolve against the working directory.
    pub credentials_file: PathBuf,
    pub branch: String,
    pub preview_domain: String,
    pub publish_domain: String,
    /// Pause between the reset upload and the propagation triggers.
    pub settle_delay_ms: u64,
    pub strategy: ReconcileStrategy,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            source_base: DEFAULT_SOURCE_BASE.to_string(),
            upload_base: None,
            document_path: DocumentPath::default(),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            credentials_file: PathBuf::from(DEFAULT_CREDENTIALS_FILE),
            branch: "main".to_string(),
            preview_domain: "aem.page".to_string(),
            publish_domain: "aem.live".to_string(),
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            strategy: ReconcileStrategy::default(),
        }
    }
}

impl SyncConfig {
    pub fn upload_base(&self) -> &str {
        self.upload_base.as_deref().unwrap_or(&self.source_base)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// `https://<branch>--<site>--<org>.<domain>` for the preview and publish tiers.
    pub fn site_origins(&self) -> SiteOrigins {
        let origin = |domain: &str| {
            format!(
                "https://{}--{}--{}.{}",
                self.branch,
                self.document_path.site(),
                self.document_path.org(),
                domain
            )
        };
        SiteOrigins {
            preview: origin(&self.preview_domain),
            publish: origin(&self.publish_domain),
        }
    }

    /// Credentials file resolved against `cwd` when relative.
    pub fn credentials_path(&self, cwd: &Path) -> PathBuf {
        if self.credentials_file.is_absolute() {
            self.credentials_file.clone()
        } else {
            cwd.join(&self.credentials_file)
        }
    }
}

/// `<home>/.dasheet/config.yaml` - pure, no I/O.
pub fn config_path_at(home: &Path) -> PathBuf {
    home.join(".dasheet").join("config.yaml")
}

/// Load the config under `home`, falling back to defaults when the file is absent.
///
/// Returns `ConfigError::Parse` (with path + line context) if malformed YAML.
pub fn load_at(home: &Path) -> Result<SyncConfig, ConfigError> {
    let path = config_path_at(home);
    if !path.exists() {
        tracing::debug!("no config at {}, using defaults", path.display());
        return Ok(SyncConfig::default());
    }
    let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
    if contents.trim().is_empty() {
        return Ok(SyncConfig::default());
    }
    serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse { path, source: e })
}

/// `load_at` convenience wrapper.
pub fn load() -> Result<SyncConfig, ConfigError> {
    load_at(&home()?)
}

fn home() -> Result<PathBuf, ConfigError> {
    dirs::home_dir().ok_or(ConfigError::HomeNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(home: &Path, yaml: &str) {
        let path = config_path_at(home);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, yaml).unwrap();
    }

    #[test]
    fn missing_file_yields_defaults() {
        let home = TempDir::new().unwrap();
        let cfg = load_at(home.path()).unwrap();
        assert_eq!(cfg, SyncConfig::default());
        assert_eq!(cfg.upload_base(), DEFAULT_SOURCE_BASE);
        assert_eq!(cfg.settle_delay(), Duration::from_millis(3000));
    }

    #[test]
    fn partial_file_overrides_only_given_fields() {
        let home = TempDir::new().unwrap();
        write_config(
            home.path(),
            "document_path: acme/site/logs/run.json\nsettle_delay_ms: 0\nstrategy: legacy-header-preserving\n",
        );
        let cfg = load_at(home.path()).unwrap();
        assert_eq!(cfg.document_path.as_str(), "acme/site/logs/run.json");
        assert_eq!(cfg.settle_delay_ms, 0);
        assert_eq!(cfg.strategy, ReconcileStrategy::LegacyHeaderPreserving);
        assert_eq!(cfg.source_base, DEFAULT_SOURCE_BASE);
        assert_eq!(cfg.branch, "main");
    }

    #[test]
    fn upload_base_override() {
        let home = TempDir::new().unwrap();
        write_config(home.path(), "upload_base: https://upload.example\n");
        let cfg = load_at(home.path()).unwrap();
        assert_eq!(cfg.upload_base(), "https://upload.example");
    }

    #[test]
    fn invalid_document_path_is_a_parse_error() {
        let home = TempDir::new().unwrap();
        write_config(home.path(), "document_path: just-a-file.json\n");
        let err = load_at(home.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }), "got: {err}");
        assert!(err.to_string().contains("config.yaml"));
    }

    #[test]
    fn site_origins_derive_from_document_path() {
        let origins = SyncConfig::default().site_origins();
        assert_eq!(origins.preview, "https://main--devlive-lab1--meejain.aem.page");
        assert_eq!(origins.publish, "https://main--devlive-lab1--meejain.aem.live");
    }

    #[test]
    fn relative_credentials_resolve_against_cwd() {
        let cfg = SyncConfig::default();
        let cwd = Path::new("/work/dir");
        assert_eq!(cfg.credentials_path(cwd), cwd.join("da-config.txt"));

        let abs = SyncConfig {
            credentials_file: PathBuf::from("/etc/dasheet/tokens.txt"),
            ..SyncConfig::default()
        };
        assert_eq!(
            abs.credentials_path(cwd),
            PathBuf::from("/etc/dasheet/tokens.txt")
        );
    }
}
