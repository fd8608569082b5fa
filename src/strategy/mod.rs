//! Per-engine clipboard strategies.
//!
//! Engines differ in how a page may touch the clipboard: chromium grants the
//! async Clipboard API to tests, firefox only honours real key presses, and
//! webkit mixes both with a legacy `execCommand` path for rich text. Each
//! family gets one [`EngineStrategy`] picked when the facade is built.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::engine::Engine;
use crate::error::PageError;
use crate::options::ClipboardOptions;
use crate::page::PageDriver;
use crate::poll::poll_until;
use crate::script::PageScript;

mod chromium;
mod keyboard;
mod webkit;

pub use chromium::ChromiumStrategy;
pub use keyboard::KeyboardStrategy;
pub use webkit::WebkitStrategy;

/// Borrowed page and options handed to every strategy call.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    pub page: &'a dyn PageDriver,
    pub options: &'a ClipboardOptions,
}

impl<'a> Context<'a> {
    pub fn new(page: &'a dyn PageDriver, options: &'a ClipboardOptions) -> Self {
        Self { page, options }
    }

    pub async fn eval<T: DeserializeOwned>(
        &self,
        script: PageScript,
        args: Value,
    ) -> Result<T, PageError> {
        let value = self.page.evaluate(script, args).await?;
        serde_json::from_value(value).map_err(|source| PageError::UnexpectedResult {
            name: script.name(),
            source,
        })
    }

    /// Evaluate a script whose result is ignored.
    pub async fn run(&self, script: PageScript, args: Value) -> Result<(), PageError> {
        self.page.evaluate(script, args).await.map(drop)
    }

    /// Press the primary modifier with `key`.
    pub async fn shortcut(&self, key: char) -> Result<(), PageError> {
        let combo = self.options.modifier.with(key).to_string();
        self.page.press(&combo).await
    }

    pub async fn settle(&self) -> Result<(), PageError> {
        self.page.wait(self.options.settle).await
    }

    /// Focus `selector`, select everything in it, then press modifier+`key`.
    pub async fn select_all_then(&self, selector: &str, key: char) -> Result<(), PageError> {
        self.page.focus(selector).await?;
        self.shortcut('A').await?;
        self.settle().await?;
        self.shortcut(key).await?;
        self.settle().await
    }

    /// Poll until `selector`'s value satisfies `done`. Returns whether it did.
    pub async fn wait_for_value<F>(&self, selector: &str, done: F) -> Result<bool, PageError>
    where
        F: Fn(&str) -> bool + Send + Sync,
    {
        let page = self.page;
        let done = &done;
        poll_until(page, &self.options.poll, move || async move {
            let value = page.input_value(selector).await?;
            Ok::<_, PageError>(done(&value))
        })
        .await
    }
}

#[async_trait]
pub trait EngineStrategy: Send + Sync {
    fn engine(&self) -> Engine;

    /// Copy the value of `selector`. `text` is that value as the facade
    /// already read it.
    async fn copy(&self, cx: &Context<'_>, selector: &str, text: &str) -> Result<(), PageError>;

    async fn paste(&self, cx: &Context<'_>, selector: &str) -> Result<(), PageError>;

    async fn cut(&self, cx: &Context<'_>, selector: &str) -> Result<(), PageError>;

    async fn copy_rich_text(&self, cx: &Context<'_>, selector: &str) -> Result<(), PageError>;

    async fn paste_rich_text(&self, cx: &Context<'_>, selector: &str) -> Result<(), PageError>;

    async fn cut_rich_text(&self, cx: &Context<'_>, selector: &str) -> Result<(), PageError>;

    async fn read_clipboard(&self, cx: &Context<'_>) -> Result<String, PageError>;

    async fn write_clipboard(&self, cx: &Context<'_>, text: &str) -> Result<(), PageError>;
}

pub fn for_engine(engine: Engine) -> Box<dyn EngineStrategy> {
    match engine {
        Engine::Chromium => Box::new(ChromiumStrategy),
        Engine::Firefox => Box::new(KeyboardStrategy::new(Engine::Firefox)),
        Engine::Webkit => Box::new(WebkitStrategy::new()),
    }
}
