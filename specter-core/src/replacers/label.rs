// specter-core/src/replacers/label.rs
//! Replaces tokens by their span label, e.g. `Dublin` -> `<location>`.
//! License: MIT OR APACHE 2.0

use std::collections::HashMap;

use crate::errors::SpecterError;
use crate::replacers::{Replacer, ReplacerMemory};

/// The label replacer wraps the span label in a configured prefix/suffix.
///
/// With memory enabled, a running per-label counter is appended so that
/// distinct source values under the same label stay distinguishable
/// (`<person-1>`, `<person-2>`, ...), while repeated occurrences of the
/// same value reuse their number.
#[derive(Debug)]
pub struct LabelReplacer {
    name: String,
    prefix: String,
    suffix: String,
    memory_enabled: bool,
    memory: ReplacerMemory,
    counters: HashMap<String, usize>,
}

impl LabelReplacer {
    pub fn new(name: &str, prefix: &str, suffix: &str, memory: bool) -> Self {
        Self {
            name: name.to_string(),
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
            memory_enabled: memory,
            memory: ReplacerMemory::default(),
            counters: HashMap::new(),
        }
    }
}

impl Replacer for LabelReplacer {
    fn name(&self) -> &str {
        &self.name
    }

    fn replacement_for(&mut self, label: &str, clean_text: &str) -> Result<String, SpecterError> {
        if !self.memory_enabled {
            return Ok(format!("{}{}{}", self.prefix, label, self.suffix));
        }

        if let Some(hit) = self.memory.recall(label, clean_text) {
            return Ok(hit.to_string());
        }

        let counter = self.counters.entry(label.to_string()).or_insert(0);
        *counter += 1;
        let replacement = format!("{}{}-{}{}", self.prefix, label, counter, self.suffix);
        self.memory.store(label, clean_text, &replacement);
        Ok(replacement)
    }
}
