//! dasheet - keep the remote image-generation log sheet in shape.
//!
//! # Usage
//!
//! ```text
//! dasheet init     # replace the sheet with the fixed sample rows
//! dasheet append   # append one freshly stamped row
//! dasheet reset    # clear all rows, keep the columns, refresh preview/publish
//! ```
//!
//! Endpoints and the document path come from `~/.dasheet/config.yaml`;
//! tokens come from the `KEY=value` credentials file it names
//! (`./da-config.txt` by default).

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "dasheet",
    version,
    about = "Initialize, append to, and reset a remote JSON sheet",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replace the sheet with the fixed sample rows.
    Init,

    /// Append one new row after the existing data.
    Append,

    /// Clear every data row, keeping the columns visible.
    Reset,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();
    match cli.command {
        Commands::Init => commands::init::run(),
        Commands::Append => commands::append::run(),
        Commands::Reset => commands::reset::run(),
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
