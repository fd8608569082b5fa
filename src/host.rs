//! The operating system clipboard, used by the `pageclip` tool.

use crate::error::ToolError;
use crate::words::{Placement, Words};

/// Trait for host clipboard access, allowing for mocking in tests
pub trait HostClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ToolError>;
    fn get_text(&mut self) -> Result<String, ToolError>;
}

/// System clipboard implementation using arboard
pub struct SystemClipboard {
    clipboard: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self, ToolError> {
        let clipboard =
            arboard::Clipboard::new().map_err(|e| ToolError::HostClipboard(e.to_string()))?;
        Ok(Self { clipboard })
    }
}

impl HostClipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ToolError> {
        self.clipboard
            .set_text(text)
            .map_err(|e| ToolError::HostClipboard(e.to_string()))
    }

    fn get_text(&mut self) -> Result<String, ToolError> {
        match self.clipboard.get_text() {
            Ok(text) => Ok(text),
            // An empty clipboard pastes as nothing rather than failing.
            Err(arboard::Error::ContentNotAvailable) => Ok(String::new()),
            Err(e) => Err(ToolError::HostClipboard(e.to_string())),
        }
    }
}

/// Copy words `start..=end` of `text` to the clipboard and return what was copied.
pub fn copy_words(
    clipboard: &mut dyn HostClipboard,
    text: &str,
    start: usize,
    end: usize,
) -> Result<String, ToolError> {
    let joined = Words::new(text).join_range(start, end)?;
    clipboard.set_text(&joined)?;
    Ok(joined)
}

/// `text` with the clipboard content placed relative to word `index`.
pub fn splice_clipboard(
    clipboard: &mut dyn HostClipboard,
    text: &str,
    index: usize,
    placement: Placement,
) -> Result<String, ToolError> {
    let words = Words::new(text);
    words.check_index(index)?;
    let clip = clipboard.get_text()?;
    Ok(words.splice(index, placement, &clip)?)
}
