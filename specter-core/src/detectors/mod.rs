// specter-core/src/detectors/mod.rs
//! The `Detector` trait and the language-scoped detector registry.
//!
//! A detector turns a page's text into raw labelled spans. Detectors are
//! pluggable: the built-in pattern detector is constructed from
//! configuration through a fixed factory table keyed by `DetectorKind`,
//! and external model-based detectors can be registered through the same
//! trait.
//!
//! License: MIT OR APACHE 2.0

pub mod pattern;

use log::debug;

use crate::config::{DetectorConfig, DetectorKind};
use crate::errors::SpecterError;
use crate::span::Span;

pub use pattern::PatternDetector;

/// A trait that defines the contract for span detectors.
///
/// Implementations must return spans with valid offsets whose `text`
/// matches the corresponding substring of the input; the resolver verifies
/// this and rejects the page on a violation.
pub trait Detector: Send + Sync + std::fmt::Debug {
    /// Unique detector name, used for registry bookkeeping and span
    /// provenance.
    fn name(&self) -> &str;

    /// The label this detector assigns to its spans.
    fn label(&self) -> &str;

    /// Finds all candidate spans in `text`.
    fn process(&self, text: &str) -> Result<Vec<Span>, SpecterError>;
}

/// Holds every detector applicable to one engine's language and invokes
/// them in configuration order.
#[derive(Debug)]
pub struct DetectorRegistry {
    language: String,
    detectors: Vec<Box<dyn Detector>>,
}

impl DetectorRegistry {
    /// Builds the registry for `language` from configuration.
    ///
    /// Inactive detectors and detectors scoped to other languages are
    /// skipped. Duplicate names and an empty result are fatal
    /// configuration errors, raised here before any page is processed.
    pub fn from_config(
        configs: &[DetectorConfig],
        language: &str,
    ) -> Result<Self, SpecterError> {
        let mut registry = Self {
            language: language.to_string(),
            detectors: Vec::new(),
        };

        debug!("Initializing detectors for language '{}'.", language);

        for config in configs {
            if !config.active {
                continue;
            }
            if !config.languages.iter().any(|l| l == language) {
                continue;
            }

            let detector = build_detector(config)?;
            registry.register(detector)?;
        }

        if registry.detectors.is_empty() {
            return Err(SpecterError::NoDetectorForLanguage(language.to_string()));
        }

        Ok(registry)
    }

    /// Adds a detector to the registry. Invocation order follows
    /// registration order, which must be stable across runs for the
    /// resolver to produce reproducible output.
    pub fn register(&mut self, detector: Box<dyn Detector>) -> Result<(), SpecterError> {
        if self.detectors.iter().any(|d| d.name() == detector.name()) {
            return Err(SpecterError::DuplicateDetector(detector.name().to_string()));
        }
        debug!("Registered detector '{}'.", detector.name());
        self.detectors.push(detector);
        Ok(())
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }

    /// Runs every registered detector over `text` and concatenates their
    /// raw spans in invocation order.
    pub fn detect(&self, text: &str) -> Result<Vec<Span>, SpecterError> {
        let mut spans = Vec::new();
        for detector in &self.detectors {
            let found = detector.process(text)?;
            debug!("Detector '{}' found {} span(s).", detector.name(), found.len());
            spans.extend(found);
        }
        Ok(spans)
    }
}

/// The fixed factory table from configuration discriminant to detector.
fn build_detector(config: &DetectorConfig) -> Result<Box<dyn Detector>, SpecterError> {
    match &config.kind {
        DetectorKind::Pattern { patterns } => Ok(Box::new(PatternDetector::compile(
            &config.name,
            &config.label,
            patterns,
        )?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PatternSpec, SpecterConfig};

    fn pattern_config(name: &str, label: &str, languages: &[&str], pattern: &str) -> DetectorConfig {
        DetectorConfig {
            name: name.to_string(),
            label: label.to_string(),
            languages: languages.iter().map(|l| l.to_string()).collect(),
            active: true,
            kind: DetectorKind::Pattern {
                patterns: vec![PatternSpec::Simple(pattern.to_string())],
            },
        }
    }

    #[test]
    fn test_registry_filters_by_language() {
        let configs = vec![
            pattern_config("en_names", "person", &["en"], "John"),
            pattern_config("de_names", "person", &["de"], "Johann"),
        ];

        let registry = DetectorRegistry::from_config(&configs, "en").unwrap();
        assert_eq!(registry.len(), 1);

        let spans = registry.detect("John met Johann").unwrap();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].source, "en_names");
    }

    #[test]
    fn test_no_detector_for_language_is_fatal() {
        let configs = vec![pattern_config("en_names", "person", &["en"], "John")];
        let err = DetectorRegistry::from_config(&configs, "fr").unwrap_err();
        assert!(matches!(err, SpecterError::NoDetectorForLanguage(_)));
    }

    #[test]
    fn test_inactive_detectors_are_skipped() {
        let mut inactive = pattern_config("en_names", "person", &["en"], "John");
        inactive.active = false;
        let configs = vec![
            inactive,
            pattern_config("emails", "email", &["en"], "[a-z]+@[a-z]+\\.com"),
        ];

        let registry = DetectorRegistry::from_config(&configs, "en").unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_detection_order_follows_configuration_order() {
        let configs = vec![
            pattern_config("second_word", "b", &["en"], "beta"),
            pattern_config("first_word", "a", &["en"], "alpha"),
        ];
        let registry = DetectorRegistry::from_config(&configs, "en").unwrap();

        let spans = registry.detect("alpha beta").unwrap();
        // Emission order is detector order, not text order.
        assert_eq!(spans[0].source, "second_word");
        assert_eq!(spans[1].source, "first_word");
    }

    #[test]
    fn test_default_config_builds_a_registry() {
        let config = SpecterConfig::load_defaults().unwrap();
        let registry = DetectorRegistry::from_config(&config.detectors, "en").unwrap();
        assert!(!registry.is_empty());
    }
}
