//! `dasheet reset` - clear every data row and nudge preview/publish.

use anyhow::Result;

use super::{finish, Session};

pub fn run() -> Result<()> {
    let mut session = Session::open()?;
    finish(session.synchronizer.reset(&mut session.credentials))
}
