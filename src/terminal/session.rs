//! The read loop: one key in, one log line and one screen line out

use anyhow::Result;
use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io::Write;
use tracing::debug;

use super::display::KeyDisplay;
use super::keymap::key_label;
use super::session_log::SessionLog;
use super::typed::TypedText;
use crate::common::time::clock_time;

/// Input delivered to the loop
#[derive(Debug, Clone)]
pub enum Input {
    Key(KeyEvent),
    Resize(u16, u16),
    /// Termination requested from outside the key stream
    Interrupted,
}

/// Blocking source of terminal input
pub trait KeySource {
    fn next_input(&mut self) -> Result<Input>;
}

/// Why the loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Escape,
    Interrupted,
}

pub struct CaptureSession<L: Write> {
    log: SessionLog<L>,
    typed: TypedText,
    display: KeyDisplay,
}

impl<L: Write> CaptureSession<L> {
    pub fn new(log: SessionLog<L>, display: KeyDisplay) -> Self {
        Self {
            log,
            typed: TypedText::new(),
            display,
        }
    }

    /// Clear the screen and draw the headers; drawing problems are not fatal
    pub fn draw_screen(&mut self, screen: &mut impl Write) {
        if let Err(e) = self.display.redraw(screen) {
            debug!(error = %e, "Failed to draw headers");
        }
    }

    /// Read keys until ESC or an interrupt
    pub fn run(
        &mut self,
        source: &mut impl KeySource,
        screen: &mut impl Write,
    ) -> Result<SessionEnd> {
        loop {
            match source.next_input()? {
                Input::Interrupted => return Ok(SessionEnd::Interrupted),
                Input::Resize(cols, rows) => {
                    debug!(cols, rows, "Terminal resized");
                    self.display.resize(cols, rows);
                    self.draw_screen(screen);
                }
                Input::Key(key) => {
                    if key.kind == KeyEventKind::Release {
                        continue;
                    }
                    if is_interrupt(&key) {
                        return Ok(SessionEnd::Interrupted);
                    }
                    self.handle_key(&key, &Local::now(), screen)?;
                    if key.code == KeyCode::Esc {
                        return Ok(SessionEnd::Escape);
                    }
                }
            }
        }
    }

    fn handle_key(
        &mut self,
        key: &KeyEvent,
        at: &DateTime<Local>,
        screen: &mut impl Write,
    ) -> Result<()> {
        let label = key_label(key);
        self.typed.apply(&label);
        self.log.record(at, &label)?;

        let line = format!("{} - {}", clock_time(at), label);
        if let Err(e) = self.display.show(screen, &line) {
            debug!(error = %e, "Skipped drawing key line");
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn typed(&self) -> &TypedText {
        &self.typed
    }

    pub fn keys_logged(&self) -> u64 {
        self.log.lines()
    }

    /// Write the end marker and the reconstructed input
    pub fn finish(self, ended: &DateTime<Local>) -> Result<L> {
        self.log.finish(ended, &self.typed)
    }
}

/// Raw mode delivers Ctrl+C as a key chord instead of a signal
fn is_interrupt(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
}
