//! eframe application wrapping [`WindowCapture`]

use anyhow::Error;
use chrono::{Local, Utc};
use eframe::egui;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, error, info};

use super::capture::WindowCapture;
use super::label::strokes_from_events;
use crate::common::constants::window::{CLOSE_HINT, FOCUS_NOTICE, QUIT_PROMPT};

const ITEM_SPACING: f32 = 8.0;

/// Dialog currently owning the keyboard, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dialog {
    None,
    ConfirmQuit,
    LogLocation,
}

pub struct CaptureApp {
    capture: WindowCapture,
    dialog: Dialog,
    allowed_to_close: bool,
    /// Set when a log write fails; read back by the caller after the window closes
    fatal: Rc<RefCell<Option<Error>>>,
}

impl CaptureApp {
    pub fn new(capture: WindowCapture, fatal: Rc<RefCell<Option<Error>>>) -> Self {
        Self {
            capture,
            dialog: Dialog::None,
            allowed_to_close: false,
            fatal,
        }
    }

    /// Record every key event delivered this frame.
    ///
    /// Recorded events are removed from the input and keyboard focus is
    /// dropped, so keys never drive the window's own buttons.
    fn handle_keys(&mut self, ctx: &egui::Context) {
        // Our own dialogs hold the input while open
        if self.dialog != Dialog::None {
            let ignored = ctx.input(|i| strokes_from_events(&i.events).len());
            if ignored > 0 {
                debug!(count = ignored, "Ignoring keys while a dialog is open");
            }
            return;
        }

        let events = ctx.input_mut(|i| {
            let events = i.events.clone();
            i.events.retain(|e| !is_key_input(e));
            events
        });
        ctx.memory_mut(|m| {
            if let Some(id) = m.focused() {
                m.surrender_focus(id);
            }
        });

        for stroke in &strokes_from_events(&events) {
            if let Err(e) = self.capture.record(stroke, &Local::now(), &Utc::now()) {
                error!(error = %e, "Key log write failed, closing window");
                *self.fatal.borrow_mut() = Some(e);
                self.allowed_to_close = true;
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                return;
            }
        }
    }

    fn handle_close_request(&mut self, ctx: &egui::Context) {
        if ctx.input(|i| i.viewport().close_requested()) && !self.allowed_to_close {
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
            self.dialog = Dialog::ConfirmQuit;
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Clear View").clicked() {
                self.capture.clear_view();
            }
            if ui.button("Show Log Location").clicked() {
                self.dialog = Dialog::LogLocation;
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.weak(CLOSE_HINT);
            });
        });
    }

    fn dialogs(&mut self, ctx: &egui::Context) {
        match self.dialog {
            Dialog::None => {}
            Dialog::ConfirmQuit => {
                egui::Window::new("Quit")
                    .collapsible(false)
                    .resizable(false)
                    .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                    .show(ctx, |ui| {
                        ui.label(QUIT_PROMPT);
                        ui.add_space(ITEM_SPACING);
                        ui.horizontal(|ui| {
                            if ui.button("OK").clicked() {
                                info!(recorded = self.capture.recorded(), "Stopping capture");
                                self.allowed_to_close = true;
                                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                            }
                            if ui.button("Cancel").clicked() {
                                self.dialog = Dialog::None;
                            }
                        });
                    });
            }
            Dialog::LogLocation => {
                let path = self.capture.log_location();
                egui::Window::new("Log file")
                    .collapsible(false)
                    .resizable(false)
                    .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                    .show(ctx, |ui| {
                        ui.label("CSV log saved to:");
                        ui.monospace(path.display().to_string());
                        ui.add_space(ITEM_SPACING);
                        if ui.button("OK").clicked() {
                            self.dialog = Dialog::None;
                        }
                    });
            }
        }
    }

    /// One frame: close handling, key capture, then layout
    fn frame(&mut self, ctx: &egui::Context) {
        self.handle_close_request(ctx);
        self.handle_keys(ctx);

        egui::TopBottomPanel::top("notice").show(ctx, |ui| {
            ui.add_space(ITEM_SPACING);
            ui.label(FOCUS_NOTICE);
            ui.add_space(ITEM_SPACING);
        });

        egui::TopBottomPanel::bottom("controls").show(ctx, |ui| {
            ui.add_space(ITEM_SPACING);
            self.controls(ui);
            ui.add_space(ITEM_SPACING);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    let text = egui::RichText::new(self.capture.transcript()).monospace();
                    ui.add(egui::Label::new(text).wrap());
                });
        });

        self.dialogs(ctx);
    }
}

impl eframe::App for CaptureApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.frame(ctx);
    }
}

fn is_key_input(event: &egui::Event) -> bool {
    matches!(
        event,
        egui::Event::Key { .. }
            | egui::Event::Text(_)
            | egui::Event::Copy
            | egui::Event::Cut
            | egui::Event::Paste(_)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::CsvKeyLog;
    use eframe::egui::{
        Event, Key, Modifiers, RawInput, ViewportCommand, ViewportEvent, ViewportId, ViewportInfo,
    };

    fn app_in(dir: &std::path::Path) -> (CaptureApp, Rc<RefCell<Option<Error>>>) {
        let fatal = Rc::new(RefCell::new(None));
        let capture = WindowCapture::new(CsvKeyLog::new(dir.join("keys.csv")));
        (CaptureApp::new(capture, Rc::clone(&fatal)), fatal)
    }

    fn press(key: Key) -> Event {
        Event::Key {
            key,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers: Modifiers::NONE,
        }
    }

    fn run_frame(
        ctx: &egui::Context,
        app: &mut CaptureApp,
        input: RawInput,
    ) -> Vec<ViewportCommand> {
        let output = ctx.run(input, |ctx| app.frame(ctx));
        output
            .viewport_output
            .get(&ViewportId::ROOT)
            .map(|v| v.commands.clone())
            .unwrap_or_default()
    }

    fn with_events(events: Vec<Event>) -> RawInput {
        RawInput {
            events,
            ..Default::default()
        }
    }

    #[test]
    fn test_tab_then_enter_does_not_press_buttons() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _fatal) = app_in(dir.path());
        let ctx = egui::Context::default();

        for events in [
            vec![Event::Text("x".to_string())],
            vec![press(Key::Tab)],
            vec![],
            vec![press(Key::Enter)],
            vec![],
        ] {
            run_frame(&ctx, &mut app, with_events(events));
        }

        assert_eq!(app.capture.recorded(), 3);
        let transcript = app.capture.transcript();
        assert!(transcript.contains("  x\n"));
        assert!(transcript.contains(&format!("  [{}]\n", Key::Tab.name())));
        assert!(transcript.contains(&format!("  [{}]\n", Key::Enter.name())));
        assert_eq!(app.dialog, Dialog::None);
    }

    #[test]
    fn test_keys_ignored_while_dialog_open() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _fatal) = app_in(dir.path());
        app.dialog = Dialog::LogLocation;
        let ctx = egui::Context::default();

        run_frame(&ctx, &mut app, with_events(vec![Event::Text("a".to_string())]));

        assert_eq!(app.capture.recorded(), 0);
        assert!(!dir.path().join("keys.csv").exists());
    }

    #[test]
    fn test_close_request_is_cancelled_and_asks() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _fatal) = app_in(dir.path());
        let ctx = egui::Context::default();

        let mut input = RawInput::default();
        input.viewports.insert(
            ViewportId::ROOT,
            ViewportInfo {
                events: vec![ViewportEvent::Close],
                ..Default::default()
            },
        );
        let commands = run_frame(&ctx, &mut app, input);

        assert!(commands.contains(&ViewportCommand::CancelClose));
        assert_eq!(app.dialog, Dialog::ConfirmQuit);
        assert!(!app.allowed_to_close);
    }

    #[test]
    fn test_log_failure_sets_fatal_and_closes() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, fatal) = app_in(&dir.path().join("missing"));
        let ctx = egui::Context::default();

        let input = with_events(vec![Event::Text("a".to_string())]);
        let commands = run_frame(&ctx, &mut app, input);

        assert!(fatal.borrow().is_some());
        assert!(app.allowed_to_close);
        assert!(commands.contains(&ViewportCommand::Close));
    }
}
