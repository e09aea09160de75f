//! Key name resolution for the terminal component
//!
//! Resolution is ordered and total: known keys, then symbolic names, then a
//! printable decode, then a synthesized `KEY_<CODE>` label.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub const ESC: &str = "ESC";
pub const ENTER: &str = "ENTER";
pub const SPACE: &str = "SPACE";
pub const BACKSPACE: &str = "BACKSPACE";

/// Label a key event for the screen and the session log
pub fn key_label(event: &KeyEvent) -> String {
    if let Some(name) = known_key(event.code) {
        return name;
    }
    if let Some(name) = symbolic_name(event.code, event.modifiers) {
        return name;
    }
    if let Some(ch) = printable_char(event.code) {
        return ch.to_string();
    }
    synthesized_name(event.code)
}

fn known_key(code: KeyCode) -> Option<String> {
    let name = match code {
        KeyCode::Esc => ESC,
        KeyCode::Enter => ENTER,
        KeyCode::Char(' ') => SPACE,
        KeyCode::Backspace => BACKSPACE,
        KeyCode::Tab => "TAB",
        KeyCode::BackTab => "BACKTAB",
        KeyCode::Up => "UP",
        KeyCode::Down => "DOWN",
        KeyCode::Left => "LEFT",
        KeyCode::Right => "RIGHT",
        KeyCode::Home => "HOME",
        KeyCode::End => "END",
        KeyCode::PageUp => "PAGE_UP",
        KeyCode::PageDown => "PAGE_DOWN",
        KeyCode::Insert => "INSERT",
        KeyCode::Delete => "DELETE",
        KeyCode::F(n) => return Some(format!("F{n}")),
        _ => return None,
    };
    Some(name.to_string())
}

/// Names in the style of a terminal driver: `^C`, `M-x`, `KEY_LEFT_SHIFT`
fn symbolic_name(code: KeyCode, modifiers: KeyModifiers) -> Option<String> {
    match code {
        KeyCode::Char(c) if modifiers.contains(KeyModifiers::CONTROL) && c.is_ascii_graphic() => {
            Some(format!("^{}", c.to_ascii_uppercase()))
        }
        KeyCode::Char(c) if modifiers.contains(KeyModifiers::ALT) && !c.is_control() => {
            Some(format!("M-{c}"))
        }
        KeyCode::Modifier(m) => Some(format!("KEY_{}", screaming_snake(&format!("{m:?}")))),
        KeyCode::Media(m) => Some(format!("KEY_{}", screaming_snake(&format!("{m:?}")))),
        _ => None,
    }
}

fn printable_char(code: KeyCode) -> Option<char> {
    match code {
        KeyCode::Char(c) if !c.is_control() => Some(c),
        _ => None,
    }
}

fn synthesized_name(code: KeyCode) -> String {
    let raw = match code {
        KeyCode::Char(c) => format!("{:X}", u32::from(c)),
        other => screaming_snake(&format!("{other:?}")),
    };
    format!("KEY_{raw}")
}

/// `PrintScreen` -> `PRINT_SCREEN`
fn screaming_snake(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, ch) in name.chars().enumerate() {
        if ch.is_ascii_uppercase() && i > 0 {
            out.push('_');
        }
        out.push(ch.to_ascii_uppercase());
    }
    out
}
