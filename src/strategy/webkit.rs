use async_trait::async_trait;
use serde_json::json;

use super::{ChromiumStrategy, Context, EngineStrategy, KeyboardStrategy};
use crate::engine::Engine;
use crate::error::PageError;
use crate::script::PageScript;

/// Keyboard shortcuts for plain text and raw clipboard access; rich text tries
/// the Clipboard API first and falls back to `document.execCommand` when the
/// API path leaves no observable effect.
#[derive(Debug, Clone, Copy)]
pub struct WebkitStrategy {
    keys: KeyboardStrategy,
    api: ChromiumStrategy,
}

impl WebkitStrategy {
    pub fn new() -> Self {
        Self {
            keys: KeyboardStrategy::new(Engine::Webkit),
            api: ChromiumStrategy,
        }
    }

    async fn exec_command(
        &self,
        cx: &Context<'_>,
        selector: &str,
        command: &'static str,
    ) -> Result<bool, PageError> {
        cx.eval(
            PageScript::ExecCommand,
            json!({ "selector": selector, "command": command }),
        )
        .await
    }

    /// Write through the Clipboard API and read it back.
    async fn write_verified(&self, cx: &Context<'_>, markup: &str) -> Result<(), PageError> {
        self.api.write_clipboard(cx, markup).await?;
        let echoed = self.api.read_clipboard(cx).await?;
        if echoed != markup {
            return Err(PageError::NoEffect("clipboard write"));
        }
        Ok(())
    }

    async fn legacy(
        &self,
        cx: &Context<'_>,
        selector: &str,
        command: &'static str,
    ) -> Result<(), PageError> {
        if self.exec_command(cx, selector, command).await? {
            Ok(())
        } else {
            Err(PageError::NoEffect(command))
        }
    }
}

impl Default for WebkitStrategy {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EngineStrategy for WebkitStrategy {
    fn engine(&self) -> Engine {
        Engine::Webkit
    }

    async fn copy(&self, cx: &Context<'_>, selector: &str, text: &str) -> Result<(), PageError> {
        self.keys.copy(cx, selector, text).await
    }

    async fn paste(&self, cx: &Context<'_>, selector: &str) -> Result<(), PageError> {
        self.keys.paste(cx, selector).await
    }

    async fn cut(&self, cx: &Context<'_>, selector: &str) -> Result<(), PageError> {
        self.keys.cut(cx, selector).await
    }

    async fn copy_rich_text(&self, cx: &Context<'_>, selector: &str) -> Result<(), PageError> {
        let markup: String = cx
            .eval(PageScript::ReadMarkup, json!({ "selector": selector }))
            .await?;
        match self.write_verified(cx, &markup).await {
            Ok(()) => Ok(()),
            Err(err) => {
                tracing::warn!(selector, error = %err, "clipboard API copy failed, using execCommand");
                self.legacy(cx, selector, "copy").await
            }
        }
    }

    async fn paste_rich_text(&self, cx: &Context<'_>, selector: &str) -> Result<(), PageError> {
        match self.api.read_clipboard(cx).await {
            Ok(markup) if !markup.is_empty() => {
                return cx
                    .run(
                        PageScript::WriteMarkup,
                        json!({ "selector": selector, "content": markup }),
                    )
                    .await;
            }
            Ok(_) => tracing::warn!(selector, "clipboard API read was empty, using execCommand"),
            Err(err) => {
                tracing::warn!(selector, error = %err, "clipboard API read failed, using execCommand")
            }
        }

        if self.exec_command(cx, selector, "paste").await? {
            return Ok(());
        }
        tracing::warn!(selector, "execCommand paste refused, pasting with keyboard");
        self.keys.paste_rich_text(cx, selector).await
    }

    async fn cut_rich_text(&self, cx: &Context<'_>, selector: &str) -> Result<(), PageError> {
        let markup: String = cx
            .eval(PageScript::ReadMarkup, json!({ "selector": selector }))
            .await?;
        if let Err(err) = self.write_verified(cx, &markup).await {
            tracing::warn!(selector, error = %err, "clipboard API cut failed, using execCommand");
            return self.legacy(cx, selector, "cut").await;
        }
        cx.run(PageScript::TakeMarkup, json!({ "selector": selector }))
            .await
    }

    async fn read_clipboard(&self, cx: &Context<'_>) -> Result<String, PageError> {
        self.keys.read_clipboard(cx).await
    }

    async fn write_clipboard(&self, cx: &Context<'_>, text: &str) -> Result<(), PageError> {
        self.keys.write_clipboard(cx, text).await
    }
}
