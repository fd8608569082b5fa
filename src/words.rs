//! Word-indexed view over a text buffer.
//!
//! Text is split on runs of whitespace the same way `split(/\s+/)` splits it
//! in page scripts: an empty buffer is one empty word, and leading or trailing
//! whitespace produces an empty word at that end. The sequence is never empty.
//!
//! Boundaries are reported in UTF-16 code units, the unit DOM selection APIs
//! use, and are taken from each word's real position in the buffer. Rebuilt
//! text (ranges and splices) is always joined with single spaces.

use serde::Serialize;
use std::ops::Range;
use thiserror::Error;

/// Rejected word index or word range.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WordIndexError {
    #[error("word index {index} out of range for {len} words")]
    OutOfRange { index: usize, len: usize },

    #[error("word range {start}..={end} is reversed")]
    Reversed { start: usize, end: usize },
}

/// Character offsets of a word (or word range) in UTF-16 code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WordBoundary {
    pub start: usize,
    pub end: usize,
}

impl WordBoundary {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Where clipboard text goes relative to a target word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Before,
    After,
    Replace,
}

#[derive(Debug, Clone)]
pub struct Words<'a> {
    text: &'a str,
    spans: Vec<Range<usize>>,
    bounds: Vec<WordBoundary>,
}

impl<'a> Words<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut spans = Vec::new();
        let mut bounds = Vec::new();
        let (mut start, mut start16, mut pos16) = (0, 0, 0);
        let mut in_separator = false;

        for (i, c) in text.char_indices() {
            if is_js_space(c) {
                if !in_separator {
                    spans.push(start..i);
                    bounds.push(WordBoundary {
                        start: start16,
                        end: pos16,
                    });
                    in_separator = true;
                }
            } else if in_separator {
                start = i;
                start16 = pos16;
                in_separator = false;
            }
            pos16 += c.len_utf16();
        }
        if in_separator {
            start = text.len();
            start16 = pos16;
        }
        spans.push(start..text.len());
        bounds.push(WordBoundary {
            start: start16,
            end: pos16,
        });

        Self {
            text,
            spans,
            bounds,
        }
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.spans.get(index).map(|span| &self.text[span.clone()])
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.spans.iter().map(|span| &self.text[span.clone()])
    }

    /// Offsets of every word, in order.
    pub fn boundaries(&self) -> impl Iterator<Item = WordBoundary> + '_ {
        self.bounds.iter().copied()
    }

    pub fn check_index(&self, index: usize) -> Result<(), WordIndexError> {
        if index >= self.len() {
            return Err(WordIndexError::OutOfRange {
                index,
                len: self.len(),
            });
        }
        Ok(())
    }

    pub fn check_range(&self, start: usize, end: usize) -> Result<(), WordIndexError> {
        if start > end {
            return Err(WordIndexError::Reversed { start, end });
        }
        self.check_index(end)
    }

    /// Offsets of a single word.
    pub fn boundary(&self, index: usize) -> Result<WordBoundary, WordIndexError> {
        self.check_index(index)?;
        Ok(self.bounds[index])
    }

    /// Offsets from the start of word `start` to the end of word `end`,
    /// including the separators between them.
    pub fn range_boundary(&self, start: usize, end: usize) -> Result<WordBoundary, WordIndexError> {
        self.check_range(start, end)?;
        Ok(WordBoundary {
            start: self.boundary(start)?.start,
            end: self.boundary(end)?.end,
        })
    }

    /// Words `start..=end` joined by single spaces.
    pub fn join_range(&self, start: usize, end: usize) -> Result<String, WordIndexError> {
        self.check_range(start, end)?;
        Ok(self.join(start..end + 1))
    }

    /// Rebuild the buffer with `insert` placed relative to word `index`.
    pub fn splice(
        &self,
        index: usize,
        placement: Placement,
        insert: &str,
    ) -> Result<String, WordIndexError> {
        self.check_index(index)?;

        let (before, after) = match placement {
            Placement::Before => (0..index, index..self.len()),
            Placement::After => (0..index + 1, index + 1..self.len()),
            Placement::Replace => (0..index, index + 1..self.len()),
        };

        let mut parts: Vec<&str> = Vec::with_capacity(self.len() + 1);
        parts.extend(self.spans[before].iter().map(|s| &self.text[s.clone()]));
        parts.push(insert);
        parts.extend(self.spans[after].iter().map(|s| &self.text[s.clone()]));
        Ok(parts.join(" "))
    }

    fn join(&self, range: Range<usize>) -> String {
        self.spans[range]
            .iter()
            .map(|span| &self.text[span.clone()])
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// ECMAScript `WhiteSpace` and `LineTerminator`, the set `\s` matches.
fn is_js_space(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

pub(crate) fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}
