//! Display labels for key events delivered to the capture window

use eframe::egui::{Event, Key, Modifiers};

/// One key press as seen by the window, before it is labelled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyStroke {
    /// Printable text produced by the press, if any
    pub text: Option<String>,
    /// Symbolic name of the key (e.g. `Escape`, `Ctrl+S`)
    pub symbol: String,
}

impl KeyStroke {
    pub fn printable(ch: char) -> Self {
        Self {
            text: Some(ch.to_string()),
            symbol: ch.to_string(),
        }
    }

    pub fn named(symbol: impl Into<String>) -> Self {
        Self {
            text: None,
            symbol: symbol.into(),
        }
    }

    pub fn label(&self) -> String {
        readable_key(self.text.as_deref(), &self.symbol)
    }
}

/// Printable text verbatim, otherwise the symbolic name in brackets
pub fn readable_key(text: Option<&str>, symbol: &str) -> String {
    match text {
        Some(t) if !t.is_empty() && t != "\0" => t.to_string(),
        _ => format!("[{symbol}]"),
    }
}

/// Turn one frame's toolkit events into key strokes, in delivery order.
///
/// The toolkit reports a printable press as a `Key` event immediately followed
/// by a `Text` event; that pair becomes a single stroke per character. A press
/// with no text after it becomes a symbolic stroke.
pub fn strokes_from_events(events: &[Event]) -> Vec<KeyStroke> {
    let mut strokes = Vec::new();
    let mut iter = events.iter().peekable();

    while let Some(event) = iter.next() {
        match event {
            Event::Key {
                key,
                pressed: true,
                modifiers,
                ..
            } => {
                if matches!(iter.peek(), Some(Event::Text(_))) {
                    continue;
                }
                strokes.push(KeyStroke::named(symbolic_name(*key, *modifiers)));
            }
            Event::Text(text) => {
                strokes.extend(text.chars().map(KeyStroke::printable));
            }
            Event::Copy => strokes.push(KeyStroke::named("Copy")),
            Event::Cut => strokes.push(KeyStroke::named("Cut")),
            Event::Paste(_) => strokes.push(KeyStroke::named("Paste")),
            _ => {}
        }
    }

    strokes
}

fn symbolic_name(key: Key, modifiers: Modifiers) -> String {
    let mut name = String::new();
    if modifiers.ctrl {
        name.push_str("Ctrl+");
    }
    if modifiers.alt {
        name.push_str("Alt+");
    }
    if modifiers.shift {
        name.push_str("Shift+");
    }
    if modifiers.mac_cmd {
        name.push_str("Cmd+");
    }
    name.push_str(key.name());
    name
}
