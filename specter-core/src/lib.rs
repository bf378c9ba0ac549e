// specter-core/src/lib.rs
//! # Specter Core Library
//!
//! `specter-core` provides the platform-independent logic for detecting
//! sensitive spans of text (names, locations, identifiers), resolving
//! conflicts between overlapping detections, and rewriting the text (or,
//! for scanned pages, the page image) with substitute content.
//!
//! The hard parts live in two places: the span resolver, which turns the
//! possibly-overlapping output of independent detectors into a disjoint,
//! deterministic set of effective spans; and the rewriter, which rebuilds
//! the output by token identity so untouched offsets are never corrupted.
//! Detection models, OCR engines, and PDF rasterization are external
//! collaborators behind traits.
//!
//! ## Modules
//!
//! * `config`: Detector/replacer/render configuration, YAML loading and validation.
//! * `token`: Word tokens, the whitespace tokenizer, and suffix handling.
//! * `span`: Raw and effective spans plus the detector-contract checks.
//! * `resolver`: The fixpoint conflict-resolution algorithm.
//! * `rewriter`: Token-identity rewriting and the transformation result.
//! * `detectors`: The `Detector` trait, registry, and the pattern detector.
//! * `replacers`: The `Replacer` trait, memory, and the three strategies.
//! * `ocr`: The OCR provider contract, word assembly, and provider registry.
//! * `document`: Image-backed documents and whole-document processing.
//! * `render`: Painting replacements onto page images.
//! * `report`: Structured JSON run reports.
//! * `engine`: The per-run orchestrator owning detectors and the replacer.
//! * `errors`: The `SpecterError` taxonomy.
//!
//! ## Usage Example
//!
//! ```rust
//! use specter_core::{Engine, SpecterConfig};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let config = SpecterConfig::load_defaults()?;
//!     let mut engine = Engine::from_config(&config, "en", Some("label"))?;
//!
//!     let outcome = engine.process_text("Mail me at jane@example.com please.")?;
//!     println!("{}", outcome.result.transformed_text);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return `SpecterError` (or `anyhow::Result` at the
//! outermost seams). Configuration errors are raised when an engine is
//! built, before any page is processed; contract violations abort a single
//! page; document errors abort a single document.
//!
//! ## Design Principles
//!
//! * **Pluggable edges:** detectors, replacers, OCR providers, and
//!   rasterizers are trait objects resolved from fixed factory tables.
//! * **Deterministic core:** resolution depends only on span emission
//!   order; rewriting depends only on token identity.
//! * **Stateless pages:** the only state carried across pages is the
//!   replacer's memory, owned by the engine instance.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod config;
pub mod detectors;
pub mod document;
pub mod engine;
pub mod errors;
pub mod ocr;
pub mod render;
pub mod replacers;
pub mod report;
pub mod resolver;
pub mod rewriter;
pub mod span;
pub mod token;

/// Re-exports the public configuration types.
pub use config::{
    DetectorConfig, DetectorKind, PatternSpec, RenderConfig, ReplacerConfig, ReplacerKind,
    SpecterConfig, MAX_PATTERN_LENGTH,
};

/// Re-exports the custom error type for clear error reporting.
pub use errors::SpecterError;

/// Re-exports the engine and its per-page outcome.
pub use engine::{Engine, PageOutcome};

/// Re-exports the token model and tokenizer.
pub use token::{split_trailing_suffix, tokenize, BoundingBox, Word};

/// Re-exports span types and the resolver entry point.
pub use resolver::resolve;
pub use span::{EffectiveSpan, Span, MERGED_LABEL};

/// Re-exports the rewriter and its result types.
pub use rewriter::{rewrite, Replacement, TransformationResult};

/// Re-exports the detector plumbing and the built-in pattern detector.
pub use detectors::{Detector, DetectorRegistry, PatternDetector};

/// Re-exports the replacer plumbing and strategies.
pub use replacers::{
    build_replacer, create_replacements, FakedReplacer, LabelReplacer, Replacer, ReplacerMemory,
    ScrambleReplacer,
};

/// Re-exports the OCR contract and registry.
pub use ocr::{assemble_page, OcrFragment, OcrPage, OcrProvider, OcrRegistry};

/// Re-exports document loading and processing.
pub use document::{
    process_document, Document, PageRasterizer, ProcessedDocument, ProcessedPage,
};

/// Re-exports rendering types for image-backed pages.
pub use render::{redact_page, RenderOutcome, RenderStyle};

/// Re-exports the report export surface.
pub use report::{PageReport, TransformationReport};
