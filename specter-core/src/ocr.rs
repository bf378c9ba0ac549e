// specter-core/src/ocr.rs
//! The OCR provider interface and word assembly for image-backed pages.
//!
//! Concrete OCR engines live outside this crate; they implement
//! [`OcrProvider`] and are registered with the [`OcrRegistry`] by name.
//! What belongs here is the assembly step every provider shares: turning
//! raw recognized word boxes into a flattened page text plus offset-
//! consistent `Word` tokens, so downstream detection and rewriting can
//! treat OCR pages exactly like plain text.
//!
//! License: MIT OR APACHE 2.0

use image::DynamicImage;
use log::debug;

use crate::errors::SpecterError;
use crate::token::{BoundingBox, Word};

/// One recognized word as reported by an OCR engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcrFragment {
    pub text: String,
    pub bounding_box: BoundingBox,
}

/// The flattened result of recognizing one page image.
///
/// Invariant: each word's `[start, end)` substring of `text` equals its
/// own `text`, with single-space separators between consecutive words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcrPage {
    pub text: String,
    pub words: Vec<Word>,
}

/// External collaborator contract for OCR engines.
pub trait OcrProvider: Send + Sync + std::fmt::Debug {
    /// Registry name used for selection.
    fn name(&self) -> &str;

    /// Languages this provider can recognize.
    fn languages(&self) -> &[String];

    /// Recognizes `image` into flattened text plus word tokens. `page`
    /// is the page number assigned to every produced token.
    fn process_image(&self, image: &DynamicImage, page: u32) -> Result<OcrPage, SpecterError>;
}

/// Builds the flattened page text and word tokens from raw OCR fragments.
///
/// Empty fragments are dropped; the rest are joined with single spaces and
/// given byte offsets into the assembled text. Providers should funnel
/// their engine output through this so the offset invariant holds by
/// construction.
pub fn assemble_page(fragments: Vec<OcrFragment>, page: u32) -> OcrPage {
    let mut text = String::new();
    let mut words = Vec::with_capacity(fragments.len());

    for fragment in fragments {
        if fragment.text.is_empty() {
            continue;
        }

        if !text.is_empty() {
            text.push(' ');
        }

        let start = text.len();
        text.push_str(&fragment.text);

        words.push(Word {
            text: fragment.text,
            start,
            end: text.len(),
            page,
            bounding_box: Some(fragment.bounding_box),
        });
    }

    debug!("Assembled OCR page {} with {} word(s).", page, words.len());
    OcrPage { text, words }
}

/// Holds registered OCR providers and selects one by name or language.
#[derive(Default)]
pub struct OcrRegistry {
    providers: Vec<Box<dyn OcrProvider>>,
}

impl OcrRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, provider: Box<dyn OcrProvider>) -> Result<(), SpecterError> {
        if self.providers.iter().any(|p| p.name() == provider.name()) {
            return Err(SpecterError::InvalidConfig(format!(
                "OCR provider name '{}' is not unique",
                provider.name()
            )));
        }
        debug!("Registered OCR provider '{}'.", provider.name());
        self.providers.push(provider);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Selects a provider for `language`, optionally pinned by name.
    ///
    /// Both failure modes are configuration errors: an unknown name, or no
    /// registered provider covering the language.
    pub fn provider_for(
        &self,
        language: &str,
        name: Option<&str>,
    ) -> Result<&dyn OcrProvider, SpecterError> {
        match name {
            Some(wanted) => {
                let provider = self
                    .providers
                    .iter()
                    .find(|p| p.name() == wanted)
                    .ok_or_else(|| SpecterError::UnknownOcrProvider(wanted.to_string()))?;
                if !provider.languages().iter().any(|l| l == language) {
                    return Err(SpecterError::NoOcrProviderForLanguage(language.to_string()));
                }
                Ok(provider.as_ref())
            }
            None => self
                .providers
                .iter()
                .find(|p| p.languages().iter().any(|l| l == language))
                .map(|p| p.as_ref())
                .ok_or_else(|| SpecterError::NoOcrProviderForLanguage(language.to_string())),
        }
    }
}
