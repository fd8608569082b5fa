use async_trait::async_trait;
use serde_json::json;

use super::{Context, EngineStrategy};
use crate::engine::Engine;
use crate::error::PageError;
use crate::script::PageScript;

/// Drives the clipboard with real shortcut key presses.
///
/// Raw clipboard reads and writes go through a hidden scratch textarea: text
/// is pasted into it (or copied out of it) and the element is removed again
/// afterwards, whether or not the shortcut succeeded.
#[derive(Debug, Clone, Copy)]
pub struct KeyboardStrategy {
    engine: Engine,
}

impl KeyboardStrategy {
    pub fn new(engine: Engine) -> Self {
        Self { engine }
    }

    /// Click first so editable content gets a caret before select-all.
    async fn rich_shortcut(
        &self,
        cx: &Context<'_>,
        selector: &str,
        key: char,
    ) -> Result<(), PageError> {
        cx.page.click(selector).await?;
        cx.select_all_then(selector, key).await
    }

    async fn mount_scratch(&self, cx: &Context<'_>, text: &str) -> Result<(), PageError> {
        cx.run(
            PageScript::MountScratch,
            json!({ "id": cx.options.scratch_id, "text": text }),
        )
        .await
    }

    async fn unmount_scratch(&self, cx: &Context<'_>) -> Result<(), PageError> {
        cx.run(
            PageScript::UnmountScratch,
            json!({ "id": cx.options.scratch_id }),
        )
        .await
    }

    async fn paste_into_scratch(&self, cx: &Context<'_>) -> Result<String, PageError> {
        let selector = cx.options.scratch_selector();
        cx.page.focus(&selector).await?;
        cx.shortcut('V').await?;
        cx.wait_for_value(&selector, |value| !value.is_empty())
            .await?;
        cx.page.input_value(&selector).await
    }

    async fn copy_from_scratch(&self, cx: &Context<'_>) -> Result<(), PageError> {
        let selector = cx.options.scratch_selector();
        cx.select_all_then(&selector, 'C').await
    }
}

#[async_trait]
impl EngineStrategy for KeyboardStrategy {
    fn engine(&self) -> Engine {
        self.engine
    }

    async fn copy(&self, cx: &Context<'_>, selector: &str, _text: &str) -> Result<(), PageError> {
        cx.select_all_then(selector, 'C').await
    }

    async fn paste(&self, cx: &Context<'_>, selector: &str) -> Result<(), PageError> {
        cx.select_all_then(selector, 'V').await
    }

    async fn cut(&self, cx: &Context<'_>, selector: &str) -> Result<(), PageError> {
        cx.page.focus(selector).await?;
        cx.shortcut('A').await?;
        cx.settle().await?;
        cx.shortcut('X').await?;
        if !cx.wait_for_value(selector, str::is_empty).await? {
            tracing::debug!(selector, "source still holds text after cut");
        }
        Ok(())
    }

    async fn copy_rich_text(&self, cx: &Context<'_>, selector: &str) -> Result<(), PageError> {
        self.rich_shortcut(cx, selector, 'C').await
    }

    async fn paste_rich_text(&self, cx: &Context<'_>, selector: &str) -> Result<(), PageError> {
        self.rich_shortcut(cx, selector, 'V').await
    }

    async fn cut_rich_text(&self, cx: &Context<'_>, selector: &str) -> Result<(), PageError> {
        self.rich_shortcut(cx, selector, 'X').await
    }

    async fn read_clipboard(&self, cx: &Context<'_>) -> Result<String, PageError> {
        self.mount_scratch(cx, "").await?;
        let pasted = self.paste_into_scratch(cx).await;
        let unmounted = self.unmount_scratch(cx).await;
        let text = pasted?;
        unmounted?;
        Ok(text)
    }

    async fn write_clipboard(&self, cx: &Context<'_>, text: &str) -> Result<(), PageError> {
        self.mount_scratch(cx, text).await?;
        let copied = self.copy_from_scratch(cx).await;
        let unmounted = self.unmount_scratch(cx).await;
        copied?;
        unmounted
    }
}
