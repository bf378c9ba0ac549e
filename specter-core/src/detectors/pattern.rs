// specter-core/src/detectors/pattern.rs
//! A `Detector` implementation that uses regular expressions to identify
//! sensitive spans.
//! License: MIT OR APACHE 2.0

use log::debug;
use regex::{Regex, RegexBuilder};

use crate::config::PatternSpec;
use crate::detectors::Detector;
use crate::errors::SpecterError;
use crate::span::Span;

/// A single precompiled pattern with the capture group whose range is
/// reported as the span.
#[derive(Debug)]
struct CompiledPattern {
    regex: Regex,
    group: usize,
}

/// Regex-based detector. Patterns are compiled once at startup; a pattern
/// that fails to compile is a fatal configuration error.
#[derive(Debug)]
pub struct PatternDetector {
    name: String,
    label: String,
    patterns: Vec<CompiledPattern>,
}

impl PatternDetector {
    /// Compiles every configured pattern for this detector.
    pub fn compile(
        name: &str,
        label: &str,
        specs: &[PatternSpec],
    ) -> Result<Self, SpecterError> {
        debug!("Compiling {} pattern(s) for detector '{}'.", specs.len(), name);

        let mut patterns = Vec::with_capacity(specs.len());
        for spec in specs {
            let regex = RegexBuilder::new(spec.pattern())
                .size_limit(10 * (1 << 20)) // 10 MB limit for compiled regex
                .build()
                .map_err(|e| SpecterError::PatternCompilation(name.to_string(), e))?;

            patterns.push(CompiledPattern {
                regex,
                group: spec.group(),
            });
        }

        Ok(Self {
            name: name.to_string(),
            label: label.to_string(),
            patterns,
        })
    }

    fn match_pattern(&self, text: &str, pattern: &CompiledPattern) -> Vec<Span> {
        let mut spans = Vec::new();
        for caps in pattern.regex.captures_iter(text) {
            // An unmatched optional group contributes nothing.
            let Some(group) = caps.get(pattern.group) else {
                continue;
            };

            spans.push(Span::new(
                &self.label,
                group.as_str(),
                group.start(),
                group.end(),
                &self.name,
            ));
        }
        spans
    }
}

impl Detector for PatternDetector {
    fn name(&self) -> &str {
        &self.name
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn process(&self, text: &str) -> Result<Vec<Span>, SpecterError> {
        let mut spans = Vec::new();
        for pattern in &self.patterns {
            spans.extend(self.match_pattern(text, pattern));
        }
        Ok(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_pattern_matches_with_offsets() {
        let detector = PatternDetector::compile(
            "emails",
            "email",
            &[PatternSpec::Simple(
                "[a-z]+@[a-z]+\\.[a-z]{2,}".to_string(),
            )],
        )
        .unwrap();

        let text = "Contact me at jane@example.com today.";
        let spans = detector.process(text).unwrap();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "jane@example.com");
        assert_eq!(&text[spans[0].start..spans[0].end], "jane@example.com");
        assert_eq!(spans[0].label, "email");
        assert_eq!(spans[0].source, "emails");
    }

    #[test]
    fn test_capture_group_narrows_the_span() {
        let detector = PatternDetector::compile(
            "ids",
            "identifier",
            &[PatternSpec::Grouped {
                pattern: "id: ([0-9]+)".to_string(),
                group: 1,
            }],
        )
        .unwrap();

        let text = "record id: 12345 archived";
        let spans = detector.process(text).unwrap();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "12345");
        assert_eq!((spans[0].start, spans[0].end), (11, 16));
    }

    #[test]
    fn test_invalid_pattern_is_a_configuration_error() {
        let err = PatternDetector::compile(
            "broken",
            "x",
            &[PatternSpec::Simple("(unclosed".to_string())],
        )
        .unwrap_err();
        assert!(matches!(err, SpecterError::PatternCompilation(_, _)));
    }

    #[test]
    fn test_multiple_patterns_concatenate_matches() {
        let detector = PatternDetector::compile(
            "numbers",
            "number",
            &[
                PatternSpec::Simple("one".to_string()),
                PatternSpec::Simple("two".to_string()),
            ],
        )
        .unwrap();

        let spans = detector.process("two one two").unwrap();
        // Pattern order first, text order within a pattern.
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0].text, "one");
        assert_eq!(spans[1].text, "two");
        assert_eq!(spans[2].text, "two");
    }
}
