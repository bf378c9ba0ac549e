// specter-core/src/span.rs
//! Detected spans and their validated, conflict-free form.
//!
//! A `Span` is the raw output of a detector: a labelled region of the page
//! text. Multiple detectors run independently, so raw spans may overlap or
//! contain one another; the resolver (see `resolver`) turns them into a
//! disjoint set of `EffectiveSpan`s.
//!
//! License: MIT OR APACHE 2.0

use serde::{Deserialize, Serialize};

use crate::errors::SpecterError;
use crate::token::Word;

/// Sentinel label assigned to a merged span whose parents carried
/// different labels.
pub const MERGED_LABEL: &str = "multiple";

/// A raw candidate region of text produced by a detector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub label: String,
    pub text: String,
    pub start: usize,
    pub end: usize,
    /// Name of the detector that emitted this span.
    pub source: String,
}

impl Span {
    pub fn new(
        label: impl Into<String>,
        text: impl Into<String>,
        start: usize,
        end: usize,
        source: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
            start,
            end,
            source: source.into(),
        }
    }
}

/// A span that survived conflict resolution.
///
/// Effective spans are pairwise disjoint. `touched` holds the words whose
/// interval has a non-empty intersection with the span's interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveSpan {
    pub label: String,
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub merged: bool,
    pub touched: Vec<Word>,
}

/// Checks every raw span against the detector contract before resolution.
///
/// Zero-length spans and spans whose text disagrees with the source text at
/// their offsets are rejected rather than silently trusted; both abort the
/// current page.
pub fn validate_spans(spans: &[Span], text: &str) -> Result<(), SpecterError> {
    for span in spans {
        if span.start >= span.end {
            return Err(SpecterError::SpanEmpty {
                detector: span.source.clone(),
                start: span.start,
            });
        }

        let matches_source = text
            .get(span.start..span.end)
            .map(|slice| slice == span.text)
            .unwrap_or(false);

        if !matches_source {
            return Err(SpecterError::SpanTextMismatch {
                detector: span.source.clone(),
                start: span.start,
                end: span.end,
            });
        }
    }

    Ok(())
}
