use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use crate::engine::Engine;
use crate::error::PageError;
use crate::script::PageScript;

/// The browser-automation surface the clipboard helpers drive.
///
/// Implement this over a real automation client to use [`crate::PageClipboard`]
/// against a live page, or over an in-memory model for tests.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Engine family of the browser that owns the page.
    async fn engine(&self) -> Result<Engine, PageError>;

    async fn focus(&self, selector: &str) -> Result<(), PageError>;

    async fn click(&self, selector: &str) -> Result<(), PageError>;

    /// Replace the value of an input, textarea or editable element.
    async fn fill(&self, selector: &str, text: &str) -> Result<(), PageError>;

    /// Current value of an input or textarea.
    async fn input_value(&self, selector: &str) -> Result<String, PageError>;

    /// Press a key combination such as `Control+A` on the focused element.
    async fn press(&self, combo: &str) -> Result<(), PageError>;

    /// Run `script.source()` in the page with `args` and return its result.
    async fn evaluate(&self, script: PageScript, args: Value) -> Result<Value, PageError>;

    async fn wait(&self, duration: Duration) -> Result<(), PageError>;
}
