use serde::{Deserialize, Serialize};

/// A key-down event as reported by the host page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPress {
    pub key: String,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub meta: bool,
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub alt: bool,
}

impl KeyPress {
    pub fn new(key: impl Into<String>) -> KeyPress {
        KeyPress {
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn with_ctrl(mut self) -> KeyPress {
        self.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> KeyPress {
        self.meta = true;
        self
    }
}

pub fn is_submit_key(key: &KeyPress) -> bool {
    key.key == "Enter"
}

/// Ctrl+K or Cmd+K, from anywhere on the page.
pub fn is_focus_shortcut(key: &KeyPress) -> bool {
    (key.ctrl || key.meta) && key.key == "k"
}
