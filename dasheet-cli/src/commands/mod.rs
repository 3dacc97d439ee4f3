//! Command implementations and the shared session/report plumbing.

pub mod append;
pub mod init;
pub mod reset;

use anyhow::{anyhow, Context, Result};
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use dasheet_core::{config, CredentialProvider, TokenKind};
use dasheet_sync::{
    propagate::HttpPropagator, transport::HttpSheetStore, PropagationOutcome, SyncError,
    Synchronizer, WorkflowReport, WorkflowStatus,
};

/// Config, credentials, and an HTTP synchronizer for one invocation.
pub struct Session {
    pub synchronizer: Synchronizer<HttpSheetStore, HttpPropagator>,
    pub credentials: CredentialProvider,
}

impl Session {
    pub fn open() -> Result<Self> {
        let config = config::load().context("failed to load ~/.dasheet/config.yaml")?;
        let cwd = std::env::current_dir().context("could not determine working directory")?;
        let credentials = CredentialProvider::new(config.credentials_path(&cwd));
        tracing::debug!(
            document = %config.document_path,
            strategy = %config.strategy,
            credentials = %credentials.source().display(),
            "session opened"
        );
        let synchronizer =
            Synchronizer::http(config).context("failed to set up the HTTP client")?;
        Ok(Self {
            synchronizer,
            credentials,
        })
    }
}

/// Print the workflow outcome; aborted workflows become an error for `main`.
pub fn finish(result: Result<WorkflowReport, SyncError>) -> Result<()> {
    match result {
        Ok(report) => {
            print_report(&report);
            Ok(())
        }
        Err(err) => {
            eprintln!("{} {}", "✗".red(), err.status());
            if let SyncError::MissingCredential { kind, .. } = &err {
                eprintln!("  {}", credential_hint(*kind));
            }
            Err(anyhow!(err))
        }
    }
}

fn credential_hint(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::DocumentAuthoring => {
            "Log in at https://da.live, run `copy(adobeIMS.getAccessToken().token)` in the \
             browser console, and paste the value as DA_IMS_TOKEN."
        }
        TokenKind::Admin => {
            "Copy the admin auth token from an authenticated browser session and paste it \
             as ADMIN_AUTH_TOKEN."
        }
    }
}

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "before")]
    before: usize,
    #[tabled(rename = "added")]
    added: usize,
    #[tabled(rename = "after")]
    after: usize,
    #[tabled(rename = "rows uploaded")]
    total: usize,
    #[tabled(rename = "header")]
    header: String,
}

fn print_report(report: &WorkflowReport) {
    match report.status {
        WorkflowStatus::Completed => {
            println!("{} {} {}", "✓".green(), report.operation, report.status);
        }
        _ => {
            println!("{} {} {}", "·".dimmed(), report.operation, report.status);
            return;
        }
    }

    let row = SummaryRow {
        before: report.rows_before,
        added: report.rows_added,
        after: report.rows_after,
        total: report.total,
        header: if report.header_preserved { "yes" } else { "no" }.to_string(),
    };
    let mut table = Table::new([row]);
    table.with(Style::rounded());
    println!("{table}");
    println!("  columns: {}", report.columns.join(", "));

    for outcome in &report.propagation {
        match outcome {
            PropagationOutcome::Delivered { step, status } if (200..300).contains(status) => {
                println!("  {} {step} (HTTP {status})", "✓".green());
            }
            PropagationOutcome::Delivered { step, status } => {
                println!("  {} {step} (HTTP {status})", "~".yellow());
            }
            PropagationOutcome::Failed { step, message } => {
                println!("  {} {step}: {message}", "✗".red());
            }
        }
    }
}
