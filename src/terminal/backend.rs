//! crossterm plumbing: terminal mode guard, key source, termination signals

use anyhow::{Context, Result};
use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, warn};

use super::session::{Input, KeySource};

/// Exclusive control of the terminal, released on drop
pub struct TerminalGuard {
    enhanced: bool,
    active: bool,
}

impl TerminalGuard {
    /// Raw mode, alternate screen, hidden cursor, extended key decoding when supported
    pub fn enter() -> Result<Self> {
        terminal::enable_raw_mode().context("Failed to enable raw mode")?;
        let mut guard = Self {
            enhanced: false,
            active: true,
        };

        let mut out = io::stdout();
        execute!(out, EnterAlternateScreen, Hide).context("Failed to enter alternate screen")?;

        if matches!(terminal::supports_keyboard_enhancement(), Ok(true)) {
            execute!(
                out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
            )
            .context("Failed to enable keyboard enhancement")?;
            guard.enhanced = true;
        }
        debug!(enhanced = guard.enhanced, "Terminal captured");
        Ok(guard)
    }

    /// Give the terminal back; later calls are no-ops
    pub fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        let mut out = io::stdout();
        if self.enhanced {
            execute!(out, PopKeyboardEnhancementFlags)
                .context("Failed to disable keyboard enhancement")?;
        }
        execute!(out, Show, LeaveAlternateScreen).context("Failed to leave alternate screen")?;
        out.flush().context("Failed to flush terminal")?;
        terminal::disable_raw_mode().context("Failed to disable raw mode")
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!(error = %e, "Failed to restore terminal");
        }
    }
}

/// Blocking reader over crossterm events that also watches a stop flag
pub struct CrosstermKeys {
    stop: Arc<AtomicBool>,
    poll_interval: Duration,
}

impl CrosstermKeys {
    pub fn new(stop: Arc<AtomicBool>, poll_interval: Duration) -> Self {
        Self {
            stop,
            poll_interval,
        }
    }
}

impl KeySource for CrosstermKeys {
    fn next_input(&mut self) -> Result<Input> {
        loop {
            if self.stop.load(Ordering::Relaxed) {
                return Ok(Input::Interrupted);
            }
            if !event::poll(self.poll_interval).context("Failed to poll terminal events")? {
                continue;
            }
            match event::read().context("Failed to read terminal event")? {
                Event::Key(key) => return Ok(Input::Key(key)),
                Event::Resize(cols, rows) => return Ok(Input::Resize(cols, rows)),
                _ => {}
            }
        }
    }
}

/// Set `stop` when the process is asked to terminate
#[cfg(unix)]
pub fn register_termination(stop: &Arc<AtomicBool>) -> Result<()> {
    use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};

    for signal in [SIGINT, SIGTERM, SIGHUP] {
        signal_hook::flag::register(signal, Arc::clone(stop))
            .with_context(|| format!("Failed to register handler for signal {signal}"))?;
    }
    Ok(())
}

#[cfg(not(unix))]
pub fn register_termination(_stop: &Arc<AtomicBool>) -> Result<()> {
    Ok(())
}
