#![deny(unsafe_code)]

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use keytrace::common::constants::window::LOG_FILE;
use keytrace::common::logging::{Verbosity, init_tracing};

#[derive(Parser, Debug)]
#[command(name = "keytrace-window")]
#[command(version)]
#[command(about = "Record keys pressed while this window has focus", long_about = None)]
struct Cli {
    /// CSV file that receives one row per key
    #[arg(long, default_value = LOG_FILE)]
    log_file: PathBuf,

    /// Enable debug mode with verbose logging
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(if cli.debug {
        Verbosity::Debug
    } else {
        Verbosity::Normal
    })?;

    keytrace::window::run_window(cli.log_file)
}
