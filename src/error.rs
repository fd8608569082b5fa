use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::words::WordIndexError;

/// Boxed underlying cause carried by a [`ClipboardError`].
pub type Cause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The fixed set of failure categories surfaced by [`crate::PageClipboard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Copy,
    Paste,
    ClipboardAccessDenied,
    SelectionFailed,
    InvalidWordIndex,
    WordBoundary,
    EmptySelection,
    PastePosition,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Copy => "Copy operation failed",
            ErrorKind::Paste => "Paste operation failed",
            ErrorKind::ClipboardAccessDenied => "Cannot access clipboard",
            ErrorKind::SelectionFailed => "Text selection failed",
            ErrorKind::InvalidWordIndex => "Invalid word index specified",
            ErrorKind::WordBoundary => "Cannot determine word boundaries",
            ErrorKind::EmptySelection => "No text selected",
            ErrorKind::PastePosition => "Invalid paste position",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classified failure of a clipboard operation.
///
/// The display text is the kind alone, so assertions can match on a stable
/// category. The underlying cause, if any, stays reachable via
/// [`std::error::Error::source`].
#[derive(Error, Debug)]
#[error("{kind}")]
pub struct ClipboardError {
    kind: ErrorKind,
    #[source]
    source: Option<Cause>,
}

impl ClipboardError {
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    pub fn caused<E>(kind: ErrorKind, cause: E) -> Self
    where
        E: Into<Cause>,
    {
        Self {
            kind,
            source: Some(cause.into()),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }
}

impl From<ErrorKind> for ClipboardError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl From<WordIndexError> for ClipboardError {
    fn from(err: WordIndexError) -> Self {
        Self::caused(ErrorKind::InvalidWordIndex, err)
    }
}

/// Failures reported by a [`crate::PageDriver`] or raised while sequencing
/// driver calls.
#[derive(Error, Debug)]
pub enum PageError {
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Script '{name}' failed: {message}")]
    Script { name: &'static str, message: String },

    #[error("Script '{name}' returned an unexpected value: {source}")]
    UnexpectedResult {
        name: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Key press '{combo}' failed: {message}")]
    Keyboard { combo: String, message: String },

    #[error("Nothing to copy from {0}")]
    EmptySource(String),

    #[error("No observable effect from {0}")]
    NoEffect(&'static str),

    #[error("Page is closed")]
    Closed,

    #[error("{0}")]
    Other(String),
}

/// Errors raised by the `pageclip` command-line tool.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("Cannot read binary file: {0}")]
    BinaryFile(PathBuf),

    #[error("Failed to read file '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Clipboard error: {0}")]
    HostClipboard(String),

    #[error("Invalid word index specified: {0}")]
    WordIndex(#[from] WordIndexError),

    #[error("Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No text given")]
    NoInput,
}

pub type Result<T> = std::result::Result<T, ClipboardError>;
