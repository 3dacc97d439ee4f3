//! Typed image-generation log records and the fixed sample data.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::types::Row;

/// One image-generation log entry, in [`crate::schema::DEFAULT_SCHEMA`] order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogRecord {
    pub timestamp: String,
    pub prompt: String,
    pub status: String,
    pub document_path: String,
    pub target_folder: String,
    pub share_point_file: String,
    pub share_point_path: String,
    pub image_url: String,
    pub eds_url: String,
    pub aem_preview_url: String,
    pub source: String,
    pub user_host: String,
    pub generated_text: String,
}

impl LogRecord {
    pub fn into_row(self) -> Row {
        [
            ("Timestamp", self.timestamp),
            ("Prompt", self.prompt),
            ("Status", self.status),
            ("DocumentPath", self.document_path),
            ("TargetFolder", self.target_folder),
            ("SharePointFile", self.share_point_file),
            ("SharePointPath", self.share_point_path),
            ("ImageURL", self.image_url),
            ("EDSURL", self.eds_url),
            ("AEMPreviewURL", self.aem_preview_url),
            ("Source", self.source),
            ("UserHost", self.user_host),
            ("GeneratedText", self.generated_text),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
    }
}

/// Site origins used to fill the published/preview URL columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteOrigins {
    pub preview: String,
    pub publish: String,
}

/// The two records written by `init`.
pub fn sample_records(origins: &SiteOrigins) -> Vec<LogRecord> {
    vec![
        LogRecord {
            timestamp: "2025-12-30T10:00:00.000Z".into(),
            prompt: "Sample image 1 - mountain landscape".into(),
            status: "Completed".into(),
            document_path: "/content/sample1".into(),
            target_folder: "/images".into(),
            share_point_file: "mountain.png".into(),
            share_point_path: "/images/mountain.png".into(),
            image_url: "https://example.com/mountain.png".into(),
            eds_url: format!("{}/sample1", origins.publish),
            aem_preview_url: format!("{}/sample1", origins.preview),
            source: "Initial-Setup".into(),
            user_host: "localhost".into(),
            generated_text: "Beautiful mountain landscape at sunset".into(),
        },
        LogRecord {
            timestamp: "2025-12-30T11:00:00.000Z".into(),
            prompt: "Sample image 2 - ocean waves".into(),
            status: "Completed".into(),
            document_path: "/content/sample2".into(),
            target_folder: "/images".into(),
            share_point_file: "ocean.png".into(),
            share_point_path: "/images/ocean.png".into(),
            image_url: "https://example.com/ocean.png".into(),
            eds_url: format!("{}/sample2", origins.publish),
            aem_preview_url: format!("{}/sample2", origins.preview),
            source: "Initial-Setup".into(),
            user_host: "localhost".into(),
            generated_text: "Crashing ocean waves on rocky shore".into(),
        },
    ]
}

/// The record `append` adds: stamped with `now`, tagged with the calling host.
pub fn append_record(now: DateTime<Utc>, host: &str, origins: &SiteOrigins) -> LogRecord {
    LogRecord {
        timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        prompt: "Append row from dasheet".into(),
        status: "Testing".into(),
        document_path: "/test".into(),
        target_folder: "/test".into(),
        share_point_file: "test.png".into(),
        share_point_path: String::new(),
        image_url: "https://example.com/test.png".into(),
        eds_url: format!("{}/test", origins.publish),
        aem_preview_url: format!("{}/test", origins.preview),
        source: "dasheet-cli".into(),
        user_host: host.to_string(),
        generated_text: "Row appended by the dasheet append command".into(),
    }
}
