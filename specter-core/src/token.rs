// specter-core/src/token.rs
//! Word tokens and the whitespace tokenizer.
//!
//! A `Word` is the atomic addressable unit of rewriting. For plain text,
//! words are produced by [`tokenize`] with stable byte offsets into the
//! page's flattened text. For OCR-sourced pages, words arrive pre-built
//! from the OCR provider with pixel bounding boxes attached (see the
//! `ocr` module).
//!
//! License: MIT OR APACHE 2.0

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Trailing punctuation characters that survive substitution unchanged.
static TRAILING_SUFFIX_CHARS: Lazy<HashSet<char>> = Lazy::new(|| {
    let mut set = HashSet::new();
    set.extend([',', '.', '!', '?', ';']);
    set
});

/// A pixel-space bounding box for an OCR-sourced word.
///
/// Immutable once assigned; the renderer treats it as the true addressable
/// unit when painting replacements back onto a page image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32,
}

/// A single word token with half-open byte offsets into its page's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub page: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
}

impl Word {
    /// Strict interval intersection against `[start, end)`. Mere adjacency
    /// does not count as an overlap.
    pub fn intersects(&self, start: usize, end: usize) -> bool {
        self.start < end && self.end > start
    }
}

/// Splits `text` into an ordered sequence of `Word` tokens.
///
/// Fragments are separated by whitespace; empty fragments (runs of
/// consecutive separators) are skipped while the byte offsets stay exact.
/// All tokens are assigned `page` 0; image-backed pages get their tokens
/// from the OCR provider instead.
pub fn tokenize(text: &str) -> Vec<Word> {
    let mut words = Vec::new();
    let mut start: Option<usize> = None;

    for (index, ch) in text.char_indices() {
        if ch.is_whitespace() {
            if let Some(word_start) = start.take() {
                words.push(Word {
                    text: text[word_start..index].to_string(),
                    start: word_start,
                    end: index,
                    page: 0,
                    bounding_box: None,
                });
            }
        } else if start.is_none() {
            start = Some(index);
        }
    }

    if let Some(word_start) = start {
        words.push(Word {
            text: text[word_start..].to_string(),
            start: word_start,
            end: text.len(),
            page: 0,
            bounding_box: None,
        });
    }

    words
}

/// Splits off at most one recognized trailing punctuation character.
///
/// Returns `(clean, suffix)` where `suffix` is empty or a single character.
/// Replacers operate on `clean` and the rewrite path reattaches `suffix`
/// after substitution.
pub fn split_trailing_suffix(text: &str) -> (&str, &str) {
    match text.char_indices().next_back() {
        Some((index, ch)) if TRAILING_SUFFIX_CHARS.contains(&ch) => {
            (&text[..index], &text[index..])
        }
        _ => (text, ""),
    }
}
