//! # dasheet-sync
//!
//! Remote transport and workflow orchestration for the synchronized sheet.
//!
//! Build a [`Synchronizer`] (usually via [`Synchronizer::http`]) and call
//! [`Synchronizer::init`], [`Synchronizer::append`], or
//! [`Synchronizer::reset`] with the caller's credential provider.

pub mod codec;
pub mod endpoints;
pub mod error;
pub mod pipeline;
pub mod propagate;
pub mod transport;

pub use error::{SyncError, TransportError};
pub use pipeline::{NoOpReason, Operation, Synchronizer, WorkflowReport, WorkflowStatus};
pub use propagate::{PropagationOutcome, PropagationStep, Propagator};
pub use transport::SheetStore;
