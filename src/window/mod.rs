//! Windowed capture component
//!
//! Records keys delivered to its own window while it has focus. Each key is
//! shown in an on-screen transcript and appended to a CSV file.

mod app;
mod capture;
mod csv_log;
mod label;

pub use capture::WindowCapture;
pub use csv_log::CsvKeyLog;
pub use label::{KeyStroke, readable_key, strokes_from_events};

use anyhow::{Result, anyhow};
use eframe::egui;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use tracing::info;

use crate::common::constants::window::{HEIGHT, TITLE, WIDTH};

/// Open the capture window and block until it is closed.
///
/// Returns the log write error that closed the window, if any.
pub fn run_window(log_file: PathBuf) -> Result<()> {
    let log = CsvKeyLog::new(log_file);
    info!(path = %log.absolute_path().display(), "Starting window capture");

    let fatal = Rc::new(RefCell::new(None));
    let app = app::CaptureApp::new(WindowCapture::new(log), Rc::clone(&fatal));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITLE)
            .with_inner_size([WIDTH, HEIGHT]),
        ..Default::default()
    };

    eframe::run_native(TITLE, options, Box::new(|_cc| Ok(Box::new(app))))
        .map_err(|e| anyhow!("Window event loop failed: {e}"))?;

    let failure = fatal.borrow_mut().take();
    match failure {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
