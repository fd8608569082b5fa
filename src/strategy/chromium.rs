use async_trait::async_trait;
use serde_json::json;

use super::{Context, EngineStrategy};
use crate::engine::Engine;
use crate::error::PageError;
use crate::script::PageScript;

/// Goes straight through `navigator.clipboard`; chromium grants tests
/// read and write permission.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChromiumStrategy;

#[async_trait]
impl EngineStrategy for ChromiumStrategy {
    fn engine(&self) -> Engine {
        Engine::Chromium
    }

    async fn copy(&self, cx: &Context<'_>, _selector: &str, text: &str) -> Result<(), PageError> {
        self.write_clipboard(cx, text).await
    }

    async fn paste(&self, cx: &Context<'_>, selector: &str) -> Result<(), PageError> {
        let text = self.read_clipboard(cx).await?;
        cx.page.fill(selector, &text).await
    }

    async fn cut(&self, cx: &Context<'_>, selector: &str) -> Result<(), PageError> {
        let text = cx.page.input_value(selector).await?;
        self.write_clipboard(cx, &text).await?;
        cx.page.fill(selector, "").await
    }

    async fn copy_rich_text(&self, cx: &Context<'_>, selector: &str) -> Result<(), PageError> {
        let markup: String = cx
            .eval(PageScript::ReadMarkup, json!({ "selector": selector }))
            .await?;
        self.write_clipboard(cx, &markup).await
    }

    async fn paste_rich_text(&self, cx: &Context<'_>, selector: &str) -> Result<(), PageError> {
        let markup = self.read_clipboard(cx).await?;
        cx.run(
            PageScript::WriteMarkup,
            json!({ "selector": selector, "content": markup }),
        )
        .await
    }

    async fn cut_rich_text(&self, cx: &Context<'_>, selector: &str) -> Result<(), PageError> {
        let markup: String = cx
            .eval(PageScript::TakeMarkup, json!({ "selector": selector }))
            .await?;
        self.write_clipboard(cx, &markup).await
    }

    async fn read_clipboard(&self, cx: &Context<'_>) -> Result<String, PageError> {
        cx.eval(PageScript::ReadClipboard, json!({})).await
    }

    async fn write_clipboard(&self, cx: &Context<'_>, text: &str) -> Result<(), PageError> {
        cx.run(PageScript::WriteClipboard, json!({ "text": text }))
            .await
    }
}
