//! `dasheet init` - replace the sheet with the fixed sample rows.

use anyhow::Result;

use dasheet_core::records::{sample_records, LogRecord};

use super::{finish, Session};

pub fn run() -> Result<()> {
    let mut session = Session::open()?;
    let origins = session.synchronizer.config().site_origins();
    let samples = sample_records(&origins)
        .into_iter()
        .map(LogRecord::into_row)
        .collect();
    finish(session.synchronizer.init(&mut session.credentials, samples))
}
