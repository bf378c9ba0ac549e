//! errors.rs - Custom error types for the specter-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific, actionable error types that can be handled programmatically.
//! The variants fall into three groups: configuration errors raised before
//! any page is processed, contract violations that abort a single page, and
//! document I/O errors that abort a single document.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// This enum represents all possible error types in the `specter-core` library.
///
/// By using `#[non_exhaustive]`, we signal to consumers of this library that
/// new variants may be added in future versions. This prevents them from
/// matching all variants exhaustively, thus avoiding breaking changes.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SpecterError {
    // --- Configuration errors: fatal at startup. ---
    #[error("Detector name '{0}' is not unique")]
    DuplicateDetector(String),

    #[error("No configured detector matches language '{0}'")]
    NoDetectorForLanguage(String),

    #[error("No replacer named '{0}' is configured")]
    UnknownReplacer(String),

    #[error("No replacer is configured")]
    NoReplacerConfigured,

    #[error("No OCR provider named '{0}' is registered")]
    UnknownOcrProvider(String),

    #[error("No OCR provider matches language '{0}'")]
    NoOcrProviderForLanguage(String),

    #[error("Failed to compile pattern for detector '{0}': {1}")]
    PatternCompilation(String, regex::Error),

    #[error("Detector '{0}': pattern length ({1}) exceeds maximum allowed ({2})")]
    PatternLengthExceeded(String, usize, usize),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // --- Contract violations: fatal for the current page. ---
    #[error("Detector '{detector}' emitted a zero-length span at offset {start}")]
    SpanEmpty { detector: String, start: usize },

    #[error("Detector '{detector}' emitted span text that disagrees with the source at {start}..{end}")]
    SpanTextMismatch {
        detector: String,
        start: usize,
        end: usize,
    },

    #[error("Token at {start}..{end} is targeted by more than one replacement")]
    DuplicateReplacementTarget { start: usize, end: usize },

    #[error("Replacement targets no token at {start}..{end}")]
    UnappliedReplacement { start: usize, end: usize },

    // --- Document errors: fatal for the current document. ---
    #[error("Unsupported file extension '{0}'")]
    UnsupportedExtension(String),

    #[error("Cannot convert document '{0}' to page images")]
    DocumentConversion(String),

    #[error("An unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),

    #[error("A critical system error occurred: {0}")]
    AnyhowWrapper(#[from] anyhow::Error),

    #[error("A fatal error occurred: {0}")]
    Fatal(String),
}

impl SpecterError {
    /// True for errors that invalidate the whole run configuration rather
    /// than a single page or document.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            SpecterError::DuplicateDetector(_)
                | SpecterError::NoDetectorForLanguage(_)
                | SpecterError::UnknownReplacer(_)
                | SpecterError::NoReplacerConfigured
                | SpecterError::UnknownOcrProvider(_)
                | SpecterError::NoOcrProviderForLanguage(_)
                | SpecterError::PatternCompilation(_, _)
                | SpecterError::PatternLengthExceeded(_, _, _)
                | SpecterError::InvalidConfig(_)
        )
    }
}
