// specter-core/src/replacers/mod.rs
//! The `Replacer` trait, the shared replacement driver, and the strategy
//! factory.
//!
//! A replacer turns the clean text of a touched token into substitute
//! text. One strategy is active per engine instance, selected by name or
//! defaulting to the first configured. Every strategy supports an optional
//! memory mode: the first replacement computed for a `(label, clean_text)`
//! pair is reused for every later occurrence within the same run, which
//! keeps pseudonyms stable across a whole document.
//!
//! License: MIT OR APACHE 2.0

pub mod faked;
pub mod label;
pub mod scramble;

use std::collections::HashMap;

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{ReplacerConfig, ReplacerKind};
use crate::errors::SpecterError;
use crate::rewriter::Replacement;
use crate::span::EffectiveSpan;
use crate::token::split_trailing_suffix;

pub use faked::FakedReplacer;
pub use label::LabelReplacer;
pub use scramble::ScrambleReplacer;

/// A pluggable replacement strategy.
pub trait Replacer: Send + std::fmt::Debug {
    /// The configured name of this strategy instance.
    fn name(&self) -> &str;

    /// Computes the substitute text for one touched token. `clean_text`
    /// has its trailing punctuation already stripped; the driver reattaches
    /// it afterwards.
    fn replacement_for(&mut self, label: &str, clean_text: &str) -> Result<String, SpecterError>;
}

/// Per-run replacement cache keyed by `(label, clean_text)`.
///
/// Owned by the strategy instance, which in turn is owned by one engine
/// instance; it therefore persists across the pages and documents that
/// engine processes.
#[derive(Debug, Default)]
pub struct ReplacerMemory {
    entries: HashMap<(String, String), String>,
}

impl ReplacerMemory {
    pub fn recall(&self, label: &str, text: &str) -> Option<&str> {
        self.entries
            .get(&(label.to_string(), text.to_string()))
            .map(String::as_str)
    }

    pub fn store(&mut self, label: &str, text: &str, replacement: &str) {
        self.entries.insert(
            (label.to_string(), text.to_string()),
            replacement.to_string(),
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Walks every effective span's touched tokens and produces one
/// `Replacement` per token.
///
/// The trailing punctuation suffix of a token survives substitution: it is
/// stripped before the strategy sees the text and reattached to whatever
/// the strategy returns. Duplicate targets (two spans touching one token)
/// are left for the rewriter's contract check.
pub fn create_replacements(
    replacer: &mut dyn Replacer,
    effective_spans: &[EffectiveSpan],
) -> Result<Vec<Replacement>, SpecterError> {
    let mut replacements = Vec::new();

    for span in effective_spans {
        for word in &span.touched {
            let (clean, suffix) = split_trailing_suffix(&word.text);
            let substitute = replacer.replacement_for(&span.label, clean)?;
            replacements.push(Replacement::new(
                word.clone(),
                format!("{}{}", substitute, suffix),
            ));
        }
    }

    Ok(replacements)
}

/// Builds the active replacer from configuration.
///
/// With `name` given, the matching strategy is used; otherwise the first
/// configured one is. An unknown name or an empty configuration is a fatal
/// configuration error at startup, not at processing time.
pub fn build_replacer(
    configs: &[ReplacerConfig],
    name: Option<&str>,
) -> Result<Box<dyn Replacer>, SpecterError> {
    let config = match name {
        Some(wanted) => configs
            .iter()
            .find(|c| c.name == wanted)
            .ok_or_else(|| SpecterError::UnknownReplacer(wanted.to_string()))?,
        None => {
            let first = configs.first().ok_or(SpecterError::NoReplacerConfigured)?;
            info!(
                "No replacer specified, defaulting to '{}'.",
                first.name
            );
            first
        }
    };

    build_from_config(config)
}

/// The fixed factory table from configuration discriminant to strategy.
fn build_from_config(config: &ReplacerConfig) -> Result<Box<dyn Replacer>, SpecterError> {
    let rng = make_rng(config.seed);

    match &config.kind {
        ReplacerKind::Label { prefix, suffix } => Ok(Box::new(LabelReplacer::new(
            &config.name,
            prefix,
            suffix,
            config.memory,
        ))),
        ReplacerKind::Faked {
            files,
            min_candidates,
        } => Ok(Box::new(FakedReplacer::new(
            &config.name,
            files,
            *min_candidates,
            config.memory,
            rng,
        )?)),
        ReplacerKind::Scramble {
            alpha,
            digit,
            preserve,
        } => Ok(Box::new(ScrambleReplacer::new(
            &config.name,
            alpha,
            digit,
            preserve,
            config.memory,
            rng,
        )?)),
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SpecterConfig;
    use crate::token::Word;

    fn touched_word(text: &str, start: usize) -> Word {
        Word {
            text: text.to_string(),
            start,
            end: start + text.len(),
            page: 0,
            bounding_box: None,
        }
    }

    fn effective(label: &str, text: &str, start: usize, touched: Vec<Word>) -> EffectiveSpan {
        EffectiveSpan {
            label: label.to_string(),
            text: text.to_string(),
            start,
            end: start + text.len(),
            merged: false,
            touched,
        }
    }

    #[test]
    fn test_driver_strips_and_reattaches_suffix() {
        let mut replacer = LabelReplacer::new("label", "<", ">", false);
        let spans = vec![effective(
            "location",
            "Dublin",
            14,
            vec![touched_word("Dublin.", 14)],
        )];

        let replacements = create_replacements(&mut replacer, &spans).unwrap();
        assert_eq!(replacements.len(), 1);
        assert_eq!(replacements[0].text, "<location>.");
    }

    #[test]
    fn test_unknown_replacer_name_is_fatal() {
        let config = SpecterConfig::load_defaults().unwrap();
        let err = build_replacer(&config.replacers, Some("nonexistent")).unwrap_err();
        assert!(matches!(err, SpecterError::UnknownReplacer(_)));
    }

    #[test]
    fn test_empty_replacer_configuration_is_fatal() {
        let err = build_replacer(&[], None).unwrap_err();
        assert!(matches!(err, SpecterError::NoReplacerConfigured));
    }

    #[test]
    fn test_default_selection_takes_first_configured() {
        let config = SpecterConfig::load_defaults().unwrap();
        let replacer = build_replacer(&config.replacers, None).unwrap();
        assert_eq!(replacer.name(), config.replacers[0].name);
    }

    #[test]
    fn test_memory_recall_is_per_label() {
        let mut memory = ReplacerMemory::default();
        memory.store("person", "John", "Paul");
        memory.store("location", "John", "Oslo");
        assert_eq!(memory.recall("person", "John"), Some("Paul"));
        assert_eq!(memory.recall("location", "John"), Some("Oslo"));
        assert_eq!(memory.recall("person", "Jane"), None);
    }
}
