//! Configuration management for `specter-core`.
//!
//! This module defines the data structures describing which detectors and
//! replacers a run uses, plus rendering options for image-backed pages. It
//! handles YAML serialization/deserialization and validates configurations
//! before any page is processed, so every configuration error from the
//! taxonomy surfaces at startup.
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::errors::SpecterError;

/// Maximum allowed length for a detector pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// A single detection pattern: either a bare regex string or a regex with
/// an explicit capture group to narrow the reported span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatternSpec {
    Simple(String),
    Grouped { pattern: String, group: usize },
}

impl PatternSpec {
    pub fn pattern(&self) -> &str {
        match self {
            PatternSpec::Simple(pattern) => pattern,
            PatternSpec::Grouped { pattern, .. } => pattern,
        }
    }

    pub fn group(&self) -> usize {
        match self {
            PatternSpec::Simple(_) => 0,
            PatternSpec::Grouped { group, .. } => *group,
        }
    }
}

/// Discriminant for detector construction. Resolved into a concrete
/// detector by a fixed factory table at startup; there is no runtime
/// plugin loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DetectorKind {
    /// Regex-based pattern detection.
    Pattern { patterns: Vec<PatternSpec> },
}

/// Configuration for one detector instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Unique name; duplicate names are a fatal configuration error.
    pub name: String,
    /// The label stamped onto every span this detector emits.
    pub label: String,
    /// Languages this detector applies to.
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(flatten)]
    pub kind: DetectorKind,
}

/// Discriminant for replacer construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReplacerKind {
    /// Replace a token with its label, e.g. `Dublin` -> `<location>`.
    Label {
        #[serde(default = "default_prefix")]
        prefix: String,
        #[serde(default = "default_suffix")]
        suffix: String,
    },
    /// Replace a token with a fake value drawn from a per-label pool.
    Faked {
        /// Newline-delimited candidate files, keyed by label.
        #[serde(default)]
        files: std::collections::HashMap<String, PathBuf>,
        /// Minimum number of same-length candidates required before the
        /// pool is used; below this the replacer falls back to scrambling.
        #[serde(default = "default_min_candidates")]
        min_candidates: usize,
    },
    /// Replace each character with a random one of the same class.
    Scramble {
        #[serde(default = "default_alpha")]
        alpha: String,
        #[serde(default = "default_digit")]
        digit: String,
        #[serde(default = "default_preserve")]
        preserve: String,
    },
}

/// Configuration for one replacer strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplacerConfig {
    pub name: String,
    /// When enabled, the first replacement computed for a `(label, text)`
    /// pair is reused for every later occurrence in the same run.
    #[serde(default)]
    pub memory: bool,
    /// Optional RNG seed for reproducible runs.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(flatten)]
    pub kind: ReplacerKind,
}

/// Options for painting replacements onto page images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Fill color for the token's bounding box, RGB.
    pub highlight_color: [u8; 3],
    /// Color of the re-rendered replacement text, RGB.
    pub text_color: [u8; 3],
    /// TTF font used to re-render replacement text.
    pub font_path: Option<PathBuf>,
    /// Largest font size tried when fitting text into a bounding box.
    pub max_font_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            highlight_color: [0, 0, 0],
            text_color: [255, 255, 255],
            font_path: None,
            max_font_size: 32,
        }
    }
}

/// Represents the top-level configuration structure for Specter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SpecterConfig {
    pub detectors: Vec<DetectorConfig>,
    pub replacers: Vec<ReplacerConfig>,
    pub render: RenderConfig,
}

impl SpecterConfig {
    /// Loads a configuration from a YAML file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: SpecterConfig = serde_yml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        debug!(
            "Loaded config from {}: {} detector(s), {} replacer(s).",
            path.display(),
            config.detectors.len(),
            config.replacers.len()
        );
        config.validate()?;
        Ok(config)
    }

    /// Loads the built-in default configuration.
    pub fn load_defaults() -> Result<Self> {
        let config: SpecterConfig = serde_yml::from_str(DEFAULT_CONFIG_YAML)
            .context("Failed to parse built-in default configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Structural checks that do not depend on the selected language.
    /// Name collisions and oversized patterns are caught here; everything
    /// language-scoped is checked when the engine is built.
    pub fn validate(&self) -> Result<(), SpecterError> {
        let mut detector_names: HashSet<&str> = HashSet::new();
        for detector in &self.detectors {
            if !detector_names.insert(detector.name.as_str()) {
                return Err(SpecterError::DuplicateDetector(detector.name.clone()));
            }
            let DetectorKind::Pattern { patterns } = &detector.kind;
            if patterns.is_empty() {
                return Err(SpecterError::InvalidConfig(format!(
                    "detector '{}' has no patterns",
                    detector.name
                )));
            }
            for spec in patterns {
                if spec.pattern().len() > MAX_PATTERN_LENGTH {
                    return Err(SpecterError::PatternLengthExceeded(
                        detector.name.clone(),
                        spec.pattern().len(),
                        MAX_PATTERN_LENGTH,
                    ));
                }
            }
        }

        let mut replacer_names: HashSet<&str> = HashSet::new();
        for replacer in &self.replacers {
            if !replacer_names.insert(replacer.name.as_str()) {
                return Err(SpecterError::InvalidConfig(format!(
                    "replacer name '{}' is not unique",
                    replacer.name
                )));
            }
        }

        Ok(())
    }
}

fn default_languages() -> Vec<String> {
    vec!["en".to_string()]
}

fn default_true() -> bool {
    true
}

fn default_prefix() -> String {
    "<".to_string()
}

fn default_suffix() -> String {
    ">".to_string()
}

fn default_min_candidates() -> usize {
    10
}

fn default_alpha() -> String {
    "ABCDEFGHIJKLMNOPQRSTUVWXYZ".to_string()
}

fn default_digit() -> String {
    "0123456789".to_string()
}

fn default_preserve() -> String {
    "@ .,+-_()#\r\t\n".to_string()
}

/// Built-in defaults: a pair of pattern detectors and the three replacer
/// strategies with their stock settings.
const DEFAULT_CONFIG_YAML: &str = include_str!("../assets/default_config.yaml");
