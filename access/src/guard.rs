//! Shortcut guard shown alongside gated content.
//!
//! Suppresses the save, view-source and devtools shortcuts plus the context
//! menu. This is a speed-bump for casual copying, not protection.

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyChord {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
}

impl KeyChord {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }
}

/// Ctrl+S, Ctrl+U, Ctrl+Shift+I and F12.
pub fn should_suppress(chord: &KeyChord) -> bool {
    let key = chord.key.as_str();
    if key == "F12" {
        return true;
    }
    if !chord.ctrl {
        return false;
    }
    if key.eq_ignore_ascii_case("s") || key.eq_ignore_ascii_case("u") {
        return true;
    }
    chord.shift && key.eq_ignore_ascii_case("i")
}

pub fn suppress_context_menu() -> bool {
    true
}
