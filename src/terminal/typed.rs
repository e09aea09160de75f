//! Best-effort reconstruction of the text typed during a session

use super::keymap::{BACKSPACE, ENTER, SPACE};

/// Characters rebuilt from key labels alone, with backspace correction
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TypedText {
    chars: Vec<char>,
}

impl TypedText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, label: &str) {
        match label {
            BACKSPACE => {
                self.chars.pop();
            }
            ENTER => self.chars.push('\n'),
            SPACE => self.chars.push(' '),
            other => {
                let mut it = other.chars();
                if let (Some(ch), None) = (it.next(), it.next())
                    && !ch.is_control()
                {
                    self.chars.push(ch);
                }
            }
        }
    }

    pub fn as_string(&self) -> String {
        self.chars.iter().collect()
    }

    /// Newlines rendered as the two characters `\n`
    pub fn escaped(&self) -> String {
        self.as_string().replace('\n', "\\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(labels: &[&str]) -> TypedText {
        let mut t = TypedText::new();
        for l in labels {
            t.apply(l);
        }
        t
    }

    #[test]
    fn test_backspace_corrects() {
        assert_eq!(typed(&["A", "B", "BACKSPACE", "C"]).as_string(), "AC");
    }

    #[test]
    fn test_backspace_on_empty_is_noop() {
        assert_eq!(typed(&["BACKSPACE", "BACKSPACE", "x"]).as_string(), "x");
    }

    #[test]
    fn test_enter_and_space() {
        let t = typed(&["h", "i", "SPACE", "y", "o", "ENTER", "z"]);
        assert_eq!(t.as_string(), "hi yo\nz");
        assert_eq!(t.escaped(), "hi yo\\nz");
    }

    #[test]
    fn test_named_keys_ignored() {
        let t = typed(&["LEFT", "ESC", "^C", "KEY_CAPS_LOCK", "F1", "k"]);
        assert_eq!(t.as_string(), "k");
    }

    #[test]
    fn test_backspace_removes_newline() {
        assert_eq!(typed(&["a", "ENTER", "BACKSPACE"]).as_string(), "a");
    }
}
