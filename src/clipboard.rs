use serde_json::json;
use tracing::instrument;

use crate::engine::Engine;
use crate::error::{ClipboardError, ErrorKind, PageError, Result};
use crate::options::ClipboardOptions;
use crate::page::PageDriver;
use crate::poll::poll_until;
use crate::script::PageScript;
use crate::strategy::{self, Context, EngineStrategy};
use crate::words::{utf16_len, Placement, WordBoundary, Words};

/// Clipboard, selection and word-editing helpers bound to one page.
///
/// Every operation re-reads the element it works on; nothing about the page
/// is cached between calls. Failures come back as a [`ClipboardError`] whose
/// [`ErrorKind`] names the operation category.
pub struct PageClipboard<P: PageDriver> {
    page: P,
    options: ClipboardOptions,
    strategy: Box<dyn EngineStrategy>,
}

fn classify(kind: ErrorKind) -> impl FnOnce(PageError) -> ClipboardError {
    move |err| ClipboardError::caused(kind, err)
}

impl<P: PageDriver> PageClipboard<P> {
    /// Detect the page's engine and pick its strategy.
    pub async fn new(page: P) -> std::result::Result<Self, PageError> {
        Self::with_options(page, ClipboardOptions::default()).await
    }

    pub async fn with_options(
        page: P,
        options: ClipboardOptions,
    ) -> std::result::Result<Self, PageError> {
        let engine = match options.engine {
            Some(engine) => engine,
            None => page.engine().await?,
        };
        Ok(Self::for_engine(page, engine, options))
    }

    pub fn for_engine(page: P, engine: Engine, options: ClipboardOptions) -> Self {
        tracing::debug!(%engine, "clipboard strategy selected");
        Self {
            page,
            options,
            strategy: strategy::for_engine(engine),
        }
    }

    pub fn engine(&self) -> Engine {
        self.strategy.engine()
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn options(&self) -> &ClipboardOptions {
        &self.options
    }

    pub fn into_page(self) -> P {
        self.page
    }

    fn cx(&self) -> Context<'_> {
        Context::new(&self.page, &self.options)
    }

    async fn read_value(&self, selector: &str, kind: ErrorKind) -> Result<String> {
        self.page.input_value(selector).await.map_err(classify(kind))
    }

    /// Copy the value of an input to the clipboard. Blank values are refused.
    #[instrument(level = "debug", skip(self))]
    pub async fn copy(&self, selector: &str) -> Result<()> {
        let text = self.read_value(selector, ErrorKind::Copy).await?;
        if text.trim().is_empty() {
            return Err(ClipboardError::caused(
                ErrorKind::Copy,
                PageError::EmptySource(selector.to_string()),
            ));
        }
        self.strategy
            .copy(&self.cx(), selector, &text)
            .await
            .map_err(classify(ErrorKind::Copy))
    }

    /// Replace the value of an input with the clipboard content.
    #[instrument(level = "debug", skip(self))]
    pub async fn paste(&self, selector: &str) -> Result<()> {
        self.strategy
            .paste(&self.cx(), selector)
            .await
            .map_err(classify(ErrorKind::Paste))
    }

    /// Move the value of an input to the clipboard, leaving it empty.
    #[instrument(level = "debug", skip(self))]
    pub async fn cut(&self, selector: &str) -> Result<()> {
        self.strategy
            .cut(&self.cx(), selector)
            .await
            .map_err(classify(ErrorKind::Copy))
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn copy_rich_text(&self, selector: &str) -> Result<()> {
        self.strategy
            .copy_rich_text(&self.cx(), selector)
            .await
            .map_err(classify(ErrorKind::Copy))
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn paste_rich_text(&self, selector: &str) -> Result<()> {
        self.strategy
            .paste_rich_text(&self.cx(), selector)
            .await
            .map_err(classify(ErrorKind::Paste))
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn cut_rich_text(&self, selector: &str) -> Result<()> {
        self.strategy
            .cut_rich_text(&self.cx(), selector)
            .await
            .map_err(classify(ErrorKind::Copy))
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn get_clipboard_content(&self) -> Result<String> {
        self.strategy
            .read_clipboard(&self.cx())
            .await
            .map_err(classify(ErrorKind::ClipboardAccessDenied))
    }

    #[instrument(level = "debug", skip(self, text), fields(len = text.len()))]
    pub async fn set_clipboard_content(&self, text: &str) -> Result<()> {
        self.strategy
            .write_clipboard(&self.cx(), text)
            .await
            .map_err(classify(ErrorKind::ClipboardAccessDenied))
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn select_all(&self, selector: &str) -> Result<()> {
        self.page
            .focus(selector)
            .await
            .map_err(classify(ErrorKind::SelectionFailed))?;
        self.cx()
            .shortcut('A')
            .await
            .map_err(classify(ErrorKind::SelectionFailed))
    }

    /// Select UTF-16 offsets `start..end` inside an element.
    ///
    /// Form inputs get a native selection range; any other element gets a
    /// document range over its first text node, or over all of its contents
    /// when it has none. Returns once the selection is observable or the poll
    /// budget runs out.
    #[instrument(level = "debug", skip(self))]
    pub async fn select(&self, selector: &str, start: usize, end: usize) -> Result<()> {
        self.select_range(selector, start, end)
            .await
            .map_err(classify(ErrorKind::SelectionFailed))
    }

    async fn select_range(
        &self,
        selector: &str,
        start: usize,
        end: usize,
    ) -> std::result::Result<(), PageError> {
        let cx = self.cx();
        self.page.focus(selector).await?;
        cx.run(
            PageScript::SelectRange,
            json!({ "selector": selector, "start": start, "end": end }),
        )
        .await?;

        let expected = end.saturating_sub(start);
        let observed = poll_until(cx.page, &self.options.poll, move || async move {
            let text: String = cx.eval(PageScript::SelectedText, json!({})).await?;
            Ok::<_, PageError>(utf16_len(&text) == expected)
        })
        .await?;
        if !observed {
            tracing::debug!(selector, start, end, "selection not observed before timeout");
        }
        Ok(())
    }

    /// Text selected in the focused form element, or in the document.
    #[instrument(level = "debug", skip(self))]
    pub async fn get_selected_text(&self) -> Result<String> {
        self.cx()
            .eval(PageScript::SelectedText, json!({}))
            .await
            .map_err(classify(ErrorKind::SelectionFailed))
    }

    /// Copy words `start..=end` of an input, joined by single spaces.
    #[instrument(level = "debug", skip(self))]
    pub async fn copy_between_words(&self, selector: &str, start: usize, end: usize) -> Result<()> {
        let text = self.read_value(selector, ErrorKind::Copy).await?;
        let joined = Words::new(&text).join_range(start, end)?;
        self.strategy
            .write_clipboard(&self.cx(), &joined)
            .await
            .map_err(classify(ErrorKind::Copy))
    }

    pub async fn paste_after_word(&self, selector: &str, index: usize) -> Result<()> {
        self.paste_at_word(selector, index, Placement::After).await
    }

    pub async fn paste_before_word(&self, selector: &str, index: usize) -> Result<()> {
        self.paste_at_word(selector, index, Placement::Before).await
    }

    pub async fn replace_word(&self, selector: &str, index: usize) -> Result<()> {
        self.paste_at_word(selector, index, Placement::Replace).await
    }

    /// Splice the clipboard content into an input relative to word `index`
    /// and write the rebuilt value back.
    #[instrument(level = "debug", skip(self))]
    pub async fn paste_at_word(
        &self,
        selector: &str,
        index: usize,
        placement: Placement,
    ) -> Result<()> {
        let text = self.read_value(selector, ErrorKind::PastePosition).await?;
        let words = Words::new(&text);
        words.check_index(index)?;

        let clip = self
            .strategy
            .read_clipboard(&self.cx())
            .await
            .map_err(classify(ErrorKind::PastePosition))?;
        let rebuilt = words.splice(index, placement, &clip)?;

        self.page
            .fill(selector, &rebuilt)
            .await
            .map_err(classify(ErrorKind::PastePosition))
    }

    /// Select from the first character of word `start` to the last of word `end`.
    #[instrument(level = "debug", skip(self))]
    pub async fn select_word_range(&self, selector: &str, start: usize, end: usize) -> Result<()> {
        let text = self.read_value(selector, ErrorKind::SelectionFailed).await?;
        let range = Words::new(&text).range_boundary(start, end)?;
        self.select(selector, range.start, range.end).await
    }

    /// Document-level selection text. An empty selection is `""`, not an error.
    #[instrument(level = "debug", skip(self))]
    pub async fn get_selected_words(&self) -> Result<String> {
        self.cx()
            .eval(PageScript::DocumentSelection, json!({}))
            .await
            .map_err(classify(ErrorKind::EmptySelection))
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn get_word_boundaries(&self, selector: &str, index: usize) -> Result<WordBoundary> {
        let text = self.read_value(selector, ErrorKind::WordBoundary).await?;
        Ok(Words::new(&text).boundary(index)?)
    }
}

