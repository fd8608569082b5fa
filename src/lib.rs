//! # pageclip
//!
//! Clipboard, selection and word-level editing helpers for browser end-to-end
//! tests.
//!
//! ## Features
//!
//! - Plain and rich-text copy, cut and paste against page elements
//! - Raw clipboard reads and writes from inside the page
//! - Character and word-range selection
//! - Word-indexed editing: copy a word range, paste before/after a word,
//!   replace a word, word boundaries in DOM (UTF-16) offsets
//! - One strategy per engine family (chromium, firefox, webkit), picked once
//!
//! The browser itself sits behind [`PageDriver`]; implement it over whichever
//! automation client runs the tests.
//!
//! ## Example
//!
//! ```no_run
//! use pageclip::{PageClipboard, PageDriver};
//!
//! # async fn example<P: PageDriver>(page: P) -> Result<(), Box<dyn std::error::Error>> {
//! let clipboard = PageClipboard::new(page).await?;
//! clipboard.copy_between_words("#editor", 2, 3).await?;
//! clipboard.paste("#target").await?;
//! # Ok(())
//! # }
//! ```

pub mod clipboard;
pub mod engine;
pub mod error;
pub mod host;
pub mod input;
pub mod keys;
pub mod options;
pub mod page;
pub mod poll;
pub mod script;
pub mod strategy;
pub mod words;

pub use clipboard::PageClipboard;
pub use engine::Engine;
pub use error::{ClipboardError, ErrorKind, PageError, Result, ToolError};
pub use host::{HostClipboard, SystemClipboard};
pub use keys::{KeyCombo, Modifier};
pub use options::{ClipboardOptions, PollPolicy};
pub use page::PageDriver;
pub use script::PageScript;
pub use words::{Placement, WordBoundary, WordIndexError, Words};
