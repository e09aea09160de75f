#![deny(unsafe_code)]

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use keytrace::common::constants::terminal::LOG_DIR;
use keytrace::common::logging::{Verbosity, init_tracing};

#[derive(Parser, Debug)]
#[command(name = "keytrace-term")]
#[command(version)]
#[command(about = "Record keys typed into this terminal, after explicit consent", long_about = None)]
struct Cli {
    /// Directory that receives the session log files
    #[arg(long, default_value = LOG_DIR)]
    log_dir: PathBuf,

    /// Enable debug diagnostics on stderr (redirect it away from the terminal)
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // The session owns the screen, so stay quiet by default
    init_tracing(if cli.debug {
        Verbosity::Debug
    } else {
        Verbosity::Quiet
    })?;

    keytrace::terminal::run_terminal(cli.log_dir)
}
