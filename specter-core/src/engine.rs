// specter-core/src/engine.rs
//! The per-run engine tying the pipeline together.
//!
//! An `Engine` owns the detector registry for one language, the active
//! replacer with its memory, and drives each page through detect ->
//! resolve -> replace -> rewrite. Detectors and the replacer are
//! initialized exactly once, when the engine is built; every configuration
//! error surfaces there, before the first page is touched.
//!
//! Processing is single-threaded and synchronous per page. The only state
//! shared across pages is the replacer's memory, which keeps pseudonyms
//! consistent across a whole document. Hosts that parallelize across pages
//! must use one engine per worker.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, info};

use crate::config::SpecterConfig;
use crate::detectors::{Detector, DetectorRegistry};
use crate::errors::SpecterError;
use crate::replacers::{build_replacer, create_replacements, Replacer};
use crate::resolver::resolve;
use crate::rewriter::{rewrite, TransformationResult};
use crate::span::EffectiveSpan;
use crate::token::{tokenize, Word};

/// Everything produced by processing one page.
#[derive(Debug, Clone)]
pub struct PageOutcome {
    /// The disjoint spans that survived resolution, with touched words.
    pub spans: Vec<EffectiveSpan>,
    /// The rewritten page text and its applied replacements.
    pub result: TransformationResult,
}

/// Processes pages by detecting sensitive spans and replacing them.
#[derive(Debug)]
pub struct Engine {
    language: String,
    detectors: DetectorRegistry,
    replacer: Box<dyn Replacer>,
}

impl Engine {
    /// Builds an engine for `language` from configuration.
    ///
    /// `replacer_name` selects the replacement strategy; `None` falls back
    /// to the first configured one.
    pub fn from_config(
        config: &SpecterConfig,
        language: &str,
        replacer_name: Option<&str>,
    ) -> Result<Self, SpecterError> {
        config.validate()?;

        let detectors = DetectorRegistry::from_config(&config.detectors, language)?;
        let replacer = build_replacer(&config.replacers, replacer_name)?;

        info!(
            "Engine ready: language '{}', {} detector(s), replacer '{}'.",
            language,
            detectors.len(),
            replacer.name()
        );

        Ok(Self {
            language: language.to_string(),
            detectors,
            replacer,
        })
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Adds an externally built detector (e.g. a model-based one) to this
    /// engine's registry. Registration order stays significant for
    /// resolver determinism.
    pub fn register_detector(&mut self, detector: Box<dyn Detector>) -> Result<(), SpecterError> {
        self.detectors.register(detector)
    }

    /// Tokenizes a plain text and processes it as a single page.
    pub fn process_text(&mut self, text: &str) -> Result<PageOutcome, SpecterError> {
        let words = tokenize(text);
        self.process_page(text, &words)
    }

    /// Processes one page given its flattened text and pre-built tokens
    /// (plain-text or OCR-sourced).
    pub fn process_page(
        &mut self,
        text: &str,
        words: &[Word],
    ) -> Result<PageOutcome, SpecterError> {
        let raw_spans = self.detectors.detect(text)?;
        debug!("Detectors produced {} raw span(s).", raw_spans.len());

        let spans = resolve(raw_spans, text, words)?;
        debug!("{} effective span(s) after resolution.", spans.len());

        let replacements = create_replacements(self.replacer.as_mut(), &spans)?;
        let result = rewrite(text, words, replacements)?;

        Ok(PageOutcome { spans, result })
    }
}
