//! `dasheet append` - append one freshly stamped row.

use anyhow::Result;
use chrono::Utc;

use dasheet_core::records::append_record;

use super::{finish, Session};

pub fn run() -> Result<()> {
    let mut session = Session::open()?;
    let origins = session.synchronizer.config().site_origins();
    let row = append_record(Utc::now(), &host_name(), &origins).into_row();
    finish(session.synchronizer.append(&mut session.credentials, vec![row]))
}

fn host_name() -> String {
    std::env::var("HOSTNAME")
        .ok()
        .filter(|h| !h.trim().is_empty())
        .unwrap_or_else(|| "localhost".to_string())
}
