use std::fmt;

/// Modifier held for clipboard shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    Control,
    Meta,
}

impl Modifier {
    /// `Meta` on macOS hosts, `Control` everywhere else.
    pub fn platform() -> Self {
        if cfg!(target_os = "macos") {
            Modifier::Meta
        } else {
            Modifier::Control
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Modifier::Control => "Control",
            Modifier::Meta => "Meta",
        }
    }

    pub fn with(self, key: char) -> KeyCombo {
        KeyCombo {
            modifier: self,
            key: key.to_ascii_uppercase(),
        }
    }
}

impl Default for Modifier {
    fn default() -> Self {
        Self::platform()
    }
}

/// A modifier plus a single key, rendered as `Control+C`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyCombo {
    pub modifier: Modifier,
    pub key: char,
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}", self.modifier.as_str(), self.key)
    }
}
