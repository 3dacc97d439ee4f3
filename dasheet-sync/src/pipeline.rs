//! Init, append, and reset workflows.
//!
//! Each workflow is a short sequential state machine: every network call
//! finishes before the next step starts, and a fresh [`Sheet`] is built from
//! the remote snapshot on every run.
//!
//! ```text
//! init:   build sample sheet ─▶ upload
//! append: fetch ─▶ clean ─▶ resolve columns ─▶ merge ─▶ resolve widths ─▶ upload
//! reset:  fetch ─▶ parse metadata ─▶ reset rows ─▶ upload ─▶ settle
//!               ─▶ cache-bust ─▶ preview ─▶ publish   (best effort)
//! ```

use std::fmt;

use reqwest::blocking::Client;

use dasheet_core::{
    reconcile::{build_reset_rows, count_data_rows, merge},
    schema::{default_schema, resolve_column_widths, resolve_columns},
    CredentialProvider, Metadata, Reconciler, Row, Sheet, SyncConfig, Token, TokenKind,
};

use crate::endpoints::Endpoints;
use crate::error::{missing, SyncError, TransportError};
use crate::propagate::{best_effort, HttpPropagator, PropagationOutcome, PropagationStep, Propagator};
use crate::transport::{HttpSheetStore, SheetStore};

// ---------------------------------------------------------------------------
// Operations and outcomes
// ---------------------------------------------------------------------------

/// The three user-facing workflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Init,
    Append,
    Reset,
}

impl Operation {
    /// Tokens checked before any network call, in check order.
    pub fn required_tokens(self) -> &'static [TokenKind] {
        match self {
            Operation::Init | Operation::Append => &[TokenKind::DocumentAuthoring],
            Operation::Reset => &[TokenKind::Admin, TokenKind::DocumentAuthoring],
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Init => write!(f, "init"),
            Operation::Append => write!(f, "append"),
            Operation::Reset => write!(f, "reset"),
        }
    }
}

/// Why a reset had nothing to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoOpReason {
    AbsentDocument,
    AlreadyEmpty,
}

/// Terminal state of a workflow run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowStatus {
    Completed,
    NoOp(NoOpReason),
    AbortedMissingCredential,
    AbortedTransportError,
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowStatus::Completed => write!(f, "completed"),
            WorkflowStatus::NoOp(NoOpReason::AbsentDocument) => write!(f, "no-op-absent-document"),
            WorkflowStatus::NoOp(NoOpReason::AlreadyEmpty) => write!(f, "no-op-already-empty"),
            WorkflowStatus::AbortedMissingCredential => write!(f, "aborted-missing-credential"),
            WorkflowStatus::AbortedTransportError => write!(f, "aborted-transport-error"),
        }
    }
}

impl SyncError {
    /// Terminal status this error aborts a workflow with.
    pub fn status(&self) -> WorkflowStatus {
        match self {
            SyncError::MissingCredential { .. } => WorkflowStatus::AbortedMissingCredential,
            SyncError::Transport(_) => WorkflowStatus::AbortedTransportError,
        }
    }
}

/// Summary of a finished (completed or no-op) workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowReport {
    pub operation: Operation,
    pub status: WorkflowStatus,
    /// Data rows found remotely before the run (headers and blanks excluded).
    pub rows_before: usize,
    pub rows_added: usize,
    /// Data rows in the uploaded sheet.
    pub rows_after: usize,
    /// Rows actually uploaded, template/header rows included.
    pub total: usize,
    pub header_preserved: bool,
    pub columns: Vec<String>,
    pub propagation: Vec<PropagationOutcome>,
}

impl WorkflowReport {
    fn new(operation: Operation, status: WorkflowStatus) -> Self {
        Self {
            operation,
            status,
            rows_before: 0,
            rows_added: 0,
            rows_after: 0,
            total: 0,
            header_preserved: false,
            columns: Vec::new(),
            propagation: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Synchronizer
// ---------------------------------------------------------------------------

/// Runs workflows against one configured remote document.
///
/// Credentials are not held here: each workflow borrows the caller's
/// [`CredentialProvider`] so its cache lives exactly as long as the caller wants.
#[derive(Debug)]
pub struct Synchronizer<S, P> {
    config: SyncConfig,
    store: S,
    propagator: P,
    reconciler: Reconciler,
}

impl Synchronizer<HttpSheetStore, HttpPropagator> {
    /// HTTP-backed synchronizer for `config`.
    pub fn http(config: SyncConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(concat!("dasheet/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(TransportError::Client)?;
        let endpoints = Endpoints::from_config(&config);
        let store = HttpSheetStore::new(
            client.clone(),
            config.source_base.clone(),
            config.upload_base().to_string(),
        );
        let propagator = HttpPropagator::new(client, endpoints);
        Ok(Self::new(config, store, propagator))
    }
}

impl<S: SheetStore, P: Propagator> Synchronizer<S, P> {
    pub fn new(config: SyncConfig, store: S, propagator: P) -> Self {
        let reconciler = Reconciler::new(config.strategy);
        Self {
            config,
            store,
            propagator,
            reconciler,
        }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn propagator(&self) -> &P {
        &self.propagator
    }

    /// Replace the remote document with `samples`, without reading it first.
    pub fn init(
        &self,
        credentials: &mut CredentialProvider,
        samples: Vec<Row>,
    ) -> Result<WorkflowReport, SyncError> {
        let token = require(credentials, TokenKind::DocumentAuthoring)?;
        let path = &self.config.document_path;
        tracing::info!("init: building sheet with {} sample row(s)", samples.len());

        let rows_added = samples.len();
        let rows = self.reconciler.init_rows(samples);
        let metadata = Metadata::new(self.config.sheet_name.clone());
        let columns = resolve_columns(&rows, &metadata, &default_schema());
        let widths = resolve_column_widths(&columns, &metadata.column_widths);
        let header_preserved = self.reconciler.has_header(&rows);
        let sheet = assemble(rows, metadata, columns, widths);

        self.store.upload_sheet(path, &sheet, &token)?;
        tracing::info!("init: uploaded {} row(s) to {path}", sheet.total);

        Ok(WorkflowReport {
            rows_added,
            rows_after: count_data_rows(&sheet.data),
            total: sheet.total,
            header_preserved,
            columns: sheet.metadata.column_keys,
            ..WorkflowReport::new(Operation::Init, WorkflowStatus::Completed)
        })
    }

    /// Append `new_rows` after the existing data rows. Not idempotent.
    pub fn append(
        &self,
        credentials: &mut CredentialProvider,
        new_rows: Vec<Row>,
    ) -> Result<WorkflowReport, SyncError> {
        let token = require(credentials, TokenKind::DocumentAuthoring)?;
        let path = &self.config.document_path;

        tracing::info!("append: fetching {path}");
        let (existing, metadata) = match self.store.fetch_sheet(path, &token)? {
            Some(sheet) => (sheet.data, sheet.metadata),
            None => {
                tracing::info!("append: {path} absent, starting from an empty sheet");
                (Vec::new(), Metadata::new(self.config.sheet_name.clone()))
            }
        };

        let rows_before = count_data_rows(&existing);
        let header_preserved = self.reconciler.has_header(&existing);
        let cleaned = self.reconciler.clean(existing);
        tracing::info!(
            "append: {rows_before} data row(s){}",
            if header_preserved { " + header" } else { "" }
        );

        let mut columns = resolve_columns(&cleaned, &metadata, &default_schema());
        let rows_added = new_rows.len();
        let merged = merge(cleaned, new_rows);
        if let Some(first) = merged.first() {
            let keys: Vec<String> = first.keys().cloned().collect();
            if keys != columns {
                tracing::warn!(
                    "append: column set changed ({} -> {} columns); adopting the new set",
                    columns.len(),
                    keys.len()
                );
                columns = keys;
            }
        }
        let widths = resolve_column_widths(&columns, &metadata.column_widths);
        let sheet = assemble(merged, metadata, columns, widths);

        self.store.upload_sheet(path, &sheet, &token)?;
        tracing::info!("append: uploaded {} row(s) to {path}", sheet.total);

        Ok(WorkflowReport {
            rows_before,
            rows_added,
            rows_after: count_data_rows(&sheet.data),
            total: sheet.total,
            header_preserved,
            columns: sheet.metadata.column_keys,
            ..WorkflowReport::new(Operation::Append, WorkflowStatus::Completed)
        })
    }

    /// Clear every data row, leaving one blank template row so the columns
    /// stay visible, then fire the best-effort propagation hints.
    pub fn reset(&self, credentials: &mut CredentialProvider) -> Result<WorkflowReport, SyncError> {
        let admin = require(credentials, TokenKind::Admin)?;
        let token = require(credentials, TokenKind::DocumentAuthoring)?;
        let path = &self.config.document_path;

        tracing::info!("reset: fetching {path}");
        let Some(sheet) = self.store.fetch_sheet(path, &token)? else {
            tracing::info!("reset: {path} absent, nothing to reset");
            return Ok(WorkflowReport::new(
                Operation::Reset,
                WorkflowStatus::NoOp(NoOpReason::AbsentDocument),
            ));
        };

        let metadata = sheet.metadata;
        let cleaned = self.reconciler.clean(sheet.data);
        let rows_before = count_data_rows(&cleaned);
        let columns = resolve_columns(&cleaned, &metadata, &default_schema());
        let had_data = rows_before > 0;
        if !had_data {
            tracing::info!("reset: {path} has no data rows, nothing to reset");
            return Ok(WorkflowReport {
                columns,
                ..WorkflowReport::new(
                    Operation::Reset,
                    WorkflowStatus::NoOp(NoOpReason::AlreadyEmpty),
                )
            });
        }

        let rows = build_reset_rows(&columns, had_data);
        let widths = resolve_column_widths(&columns, &metadata.column_widths);
        let sheet = assemble(rows, metadata, columns, widths);
        self.store.upload_sheet(path, &sheet, &token)?;
        tracing::info!("reset: cleared {rows_before} row(s) from {path}");

        let delay = self.config.settle_delay();
        if !delay.is_zero() {
            tracing::info!("reset: waiting {}ms for the store to settle", delay.as_millis());
            std::thread::sleep(delay);
        }

        let propagation = PropagationStep::ALL
            .iter()
            .map(|&step| {
                let token = match step.token_kind() {
                    TokenKind::DocumentAuthoring => &token,
                    TokenKind::Admin => &admin,
                };
                best_effort(&self.propagator, step, token)
            })
            .collect();

        Ok(WorkflowReport {
            rows_before,
            rows_after: 0,
            total: sheet.total,
            header_preserved: false,
            columns: sheet.metadata.column_keys,
            propagation,
            ..WorkflowReport::new(Operation::Reset, WorkflowStatus::Completed)
        })
    }
}

fn require(credentials: &mut CredentialProvider, kind: TokenKind) -> Result<Token, SyncError> {
    credentials
        .token(kind)
        .ok_or_else(|| missing(kind, credentials.source()))
}

fn assemble(rows: Vec<Row>, metadata: Metadata, columns: Vec<String>, widths: Vec<u32>) -> Sheet {
    Sheet::from_rows(
        rows,
        Metadata {
            column_widths: widths,
            column_keys: columns,
            ..metadata
        },
    )
}
