// specter-core/src/replacers/faked.rs
//! Replaces tokens with fake values drawn from per-label candidate pools.
//!
//! Pools are newline-delimited files, one per label, loaded once at
//! startup so a bad path fails the run before any page is processed. A
//! replacement is drawn uniformly from the candidates whose length matches
//! the source text; when fewer than the configured minimum exist, the
//! replacer falls back to class-preserving scrambling instead.
//!
//! License: MIT OR APACHE 2.0

use std::collections::HashMap;
use std::path::PathBuf;

use log::debug;
use rand::rngs::StdRng;
use rand::Rng;

use crate::errors::SpecterError;
use crate::replacers::scramble::{scramble_text, ScrambleAlphabet};
use crate::replacers::{Replacer, ReplacerMemory};

/// The faked-value strategy.
#[derive(Debug)]
pub struct FakedReplacer {
    name: String,
    pools: HashMap<String, Vec<String>>,
    min_candidates: usize,
    fallback: ScrambleAlphabet,
    memory_enabled: bool,
    memory: ReplacerMemory,
    rng: StdRng,
}

impl FakedReplacer {
    /// Builds the replacer and eagerly loads every configured pool file.
    pub fn new(
        name: &str,
        files: &HashMap<String, PathBuf>,
        min_candidates: usize,
        memory: bool,
        rng: StdRng,
    ) -> Result<Self, SpecterError> {
        let mut pools = HashMap::with_capacity(files.len());

        for (label, path) in files {
            let content = std::fs::read_to_string(path).map_err(|e| {
                SpecterError::InvalidConfig(format!(
                    "cannot read faker file '{}' for label '{}': {}",
                    path.display(),
                    label,
                    e
                ))
            })?;

            let candidates: Vec<String> = content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect();

            debug!(
                "Loaded {} fake candidate(s) for label '{}' from '{}'.",
                candidates.len(),
                label,
                path.display()
            );
            pools.insert(label.clone(), candidates);
        }

        Ok(Self {
            name: name.to_string(),
            pools,
            min_candidates,
            fallback: ScrambleAlphabet::default(),
            memory_enabled: memory,
            memory: ReplacerMemory::default(),
            rng,
        })
    }

    fn fake(&mut self, label: &str, clean_text: &str) -> String {
        let target_len = clean_text.chars().count();

        if let Some(pool) = self.pools.get(label) {
            let candidates: Vec<usize> = pool
                .iter()
                .enumerate()
                .filter(|(_, candidate)| candidate.chars().count() == target_len)
                .map(|(index, _)| index)
                .collect();

            if candidates.len() >= self.min_candidates {
                let pick = candidates[self.rng.random_range(0..candidates.len())];
                return pool[pick].clone();
            }

            debug!(
                "Only {} same-length candidate(s) for label '{}' (need {}); scrambling instead.",
                candidates.len(),
                label,
                self.min_candidates
            );
        }

        scramble_text(&mut self.rng, &self.fallback, clean_text)
    }
}

impl Replacer for FakedReplacer {
    fn name(&self) -> &str {
        &self.name
    }

    fn replacement_for(&mut self, label: &str, clean_text: &str) -> Result<String, SpecterError> {
        if self.memory_enabled {
            if let Some(hit) = self.memory.recall(label, clean_text) {
                return Ok(hit.to_string());
            }
        }

        let replacement = self.fake(label, clean_text);

        if self.memory_enabled {
            self.memory.store(label, clean_text, &replacement);
        }

        Ok(replacement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn pool_file(lines: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        file
    }

    fn replacer_with_pool(lines: &[&str], min_candidates: usize) -> (FakedReplacer, NamedTempFile) {
        let file = pool_file(lines);
        let mut files = HashMap::new();
        files.insert("person".to_string(), file.path().to_path_buf());
        let replacer = FakedReplacer::new(
            "faked",
            &files,
            min_candidates,
            false,
            StdRng::seed_from_u64(11),
        )
        .unwrap();
        (replacer, file)
    }

    #[test]
    fn test_draws_same_length_candidate_from_pool() {
        let (mut replacer, _file) =
            replacer_with_pool(&["Alice", "Brian", "Carol", "David"], 2);
        let replacement = replacer.replacement_for("person", "Emily").unwrap();
        assert!(["Alice", "Brian", "Carol", "David"].contains(&replacement.as_str()));
    }

    #[test]
    fn test_short_pool_falls_back_to_scrambling() {
        let (mut replacer, _file) = replacer_with_pool(&["Alice"], 5);
        let replacement = replacer.replacement_for("person", "Emily").unwrap();
        assert_ne!(replacement, "Alice");
        assert_eq!(replacement.chars().count(), 5);
        assert!(replacement.chars().next().unwrap().is_uppercase());
    }

    #[test]
    fn test_unknown_label_falls_back_to_scrambling() {
        let (mut replacer, _file) = replacer_with_pool(&["Alice"], 1);
        let replacement = replacer.replacement_for("location", "Berlin").unwrap();
        assert_eq!(replacement.chars().count(), 6);
    }

    #[test]
    fn test_missing_pool_file_is_a_configuration_error() {
        let mut files = HashMap::new();
        files.insert(
            "person".to_string(),
            PathBuf::from("/nonexistent/fakes.txt"),
        );
        let err =
            FakedReplacer::new("faked", &files, 10, false, StdRng::seed_from_u64(0)).unwrap_err();
        assert!(matches!(err, SpecterError::InvalidConfig(_)));
    }

    #[test]
    fn test_memory_reuses_first_draw() {
        let file = pool_file(&["Alice", "Brian", "Carol", "David", "Ellen"]);
        let mut files = HashMap::new();
        files.insert("person".to_string(), file.path().to_path_buf());
        let mut replacer =
            FakedReplacer::new("faked", &files, 2, true, StdRng::seed_from_u64(3)).unwrap();

        let first = replacer.replacement_for("person", "Emily").unwrap();
        let second = replacer.replacement_for("person", "Emily").unwrap();
        assert_eq!(first, second);
    }
}
