//! Terminal capture component
//!
//! After explicit consent, takes over the terminal and records every key typed
//! into it to a per-session text log, until ESC or an interrupt.

mod backend;
mod consent;
mod display;
mod keymap;
mod session;
mod session_log;
mod typed;

pub use consent::prompt_consent;
pub use display::KeyDisplay;
pub use keymap::key_label;
pub use session::{CaptureSession, Input, KeySource, SessionEnd};
pub use session_log::SessionLog;
pub use typed::TypedText;

use anyhow::Result;
use chrono::{DateTime, Local};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;
use tracing::info;

use crate::common::constants::terminal::POLL_INTERVAL_MS;

/// Run one consented capture session, writing into `log_dir`
pub fn run_terminal(log_dir: PathBuf) -> Result<()> {
    let consented = {
        let mut input = io::stdin().lock();
        prompt_consent(&mut input, &mut io::stdout())?
    };
    if !consented {
        println!("Consent not given. Nothing was recorded.");
        return Ok(());
    }

    let stop = Arc::new(AtomicBool::new(false));
    backend::register_termination(&stop)?;

    let (mut guard, log, path) =
        take_over_then_log(backend::TerminalGuard::enter, &log_dir, &Local::now())?;
    info!(path = %path.display(), "Session started");

    let (cols, rows) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut session = CaptureSession::new(log, KeyDisplay::new(cols, rows));
    let mut keys = backend::CrosstermKeys::new(stop, Duration::from_millis(POLL_INTERVAL_MS));

    let mut screen = io::stdout();
    session.draw_screen(&mut screen);
    let outcome = session.run(&mut keys, &mut screen);
    let restored = guard.restore();

    let keys_logged = session.keys_logged();
    session.finish(&Local::now())?;
    let end = outcome?;
    restored?;

    info!(?end, keys = keys_logged, "Session ended");
    let shown = std::fs::canonicalize(&log_dir).unwrap_or(log_dir);
    println!("Session saved. Logs are in: {}", shown.display());
    Ok(())
}

/// Take over the terminal, then create the session log.
///
/// A session file only exists once capture can actually begin, so every start
/// marker is followed by an end marker. If the log cannot be created the
/// guard is dropped, which restores the terminal.
fn take_over_then_log<G>(
    take_over: impl FnOnce() -> Result<G>,
    log_dir: &Path,
    started: &DateTime<Local>,
) -> Result<(G, SessionLog<File>, PathBuf)> {
    let guard = take_over()?;
    let (log, path) = SessionLog::create(log_dir, started)?;
    Ok((guard, log, path))
}
