// specter-core/src/replacers/scramble.rs
//! Replaces tokens with random strings of the same shape.
//!
//! Every character is swapped for a random one of the same class: upper
//! and lower case letters stay letters of that case, digits stay digits,
//! and configured preserved characters (punctuation, whitespace) pass
//! through unchanged. The faked replacer reuses this as its fallback when
//! its candidate pool runs short.
//!
//! License: MIT OR APACHE 2.0

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::Rng;

use crate::errors::SpecterError;
use crate::replacers::{Replacer, ReplacerMemory};

/// Character classes used for scrambling.
#[derive(Debug, Clone)]
pub struct ScrambleAlphabet {
    alpha: Vec<char>,
    digit: Vec<char>,
    preserve: HashSet<char>,
}

impl ScrambleAlphabet {
    pub fn new(alpha: &str, digit: &str, preserve: &str) -> Result<Self, SpecterError> {
        if alpha.is_empty() || digit.is_empty() {
            return Err(SpecterError::InvalidConfig(
                "scramble alphabets must not be empty".to_string(),
            ));
        }
        Ok(Self {
            alpha: alpha.chars().collect(),
            digit: digit.chars().collect(),
            preserve: preserve.chars().collect(),
        })
    }
}

impl Default for ScrambleAlphabet {
    fn default() -> Self {
        Self {
            alpha: ('A'..='Z').collect(),
            digit: ('0'..='9').collect(),
            preserve: "@ .,+-_()#\r\t\n".chars().collect(),
        }
    }
}

/// Randomizes `text` character by character, preserving per-character
/// class and case.
pub fn scramble_text(rng: &mut StdRng, alphabet: &ScrambleAlphabet, text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for ch in text.chars() {
        if alphabet.preserve.contains(&ch) {
            result.push(ch);
            continue;
        }

        if ch.is_ascii_digit() {
            result.push(alphabet.digit[rng.random_range(0..alphabet.digit.len())]);
        } else {
            let pick = alphabet.alpha[rng.random_range(0..alphabet.alpha.len())];
            if ch.is_lowercase() {
                result.extend(pick.to_lowercase());
            } else {
                result.extend(pick.to_uppercase());
            }
        }
    }

    result
}

/// The scramble strategy.
#[derive(Debug)]
pub struct ScrambleReplacer {
    name: String,
    alphabet: ScrambleAlphabet,
    memory_enabled: bool,
    memory: ReplacerMemory,
    rng: StdRng,
}

impl ScrambleReplacer {
    pub fn new(
        name: &str,
        alpha: &str,
        digit: &str,
        preserve: &str,
        memory: bool,
        rng: StdRng,
    ) -> Result<Self, SpecterError> {
        Ok(Self {
            name: name.to_string(),
            alphabet: ScrambleAlphabet::new(alpha, digit, preserve)?,
            memory_enabled: memory,
            memory: ReplacerMemory::default(),
            rng,
        })
    }
}

impl Replacer for ScrambleReplacer {
    fn name(&self) -> &str {
        &self.name
    }

    fn replacement_for(&mut self, label: &str, clean_text: &str) -> Result<String, SpecterError> {
        if self.memory_enabled {
            if let Some(hit) = self.memory.recall(label, clean_text) {
                return Ok(hit.to_string());
            }
        }

        let replacement = scramble_text(&mut self.rng, &self.alphabet, clean_text);

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

    fn seeded() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_scramble_preserves_character_classes() {
        let mut rng = seeded();
        let alphabet = ScrambleAlphabet::default();
        let scrambled = scramble_text(&mut rng, &alphabet, "Ab1-Cd2");

        assert_eq!(scrambled.chars().count(), 7);
        let chars: Vec<char> = scrambled.chars().collect();
        assert!(chars[0].is_uppercase());
        assert!(chars[1].is_lowercase());
        assert!(chars[2].is_ascii_digit());
        assert_eq!(chars[3], '-');
        assert!(chars[4].is_uppercase());
        assert!(chars[5].is_lowercase());
        assert!(chars[6].is_ascii_digit());
    }

    #[test]
    fn test_preserved_characters_pass_through() {
        let mut rng = seeded();
        let alphabet = ScrambleAlphabet::default();
        let scrambled = scramble_text(&mut rng, &alphabet, "a@b.c");
        let chars: Vec<char> = scrambled.chars().collect();
        assert_eq!(chars[1], '@');
        assert_eq!(chars[3], '.');
    }

    #[test]
    fn test_memory_returns_identical_replacement() {
        let mut replacer =
            ScrambleReplacer::new("scramble", "ABCDEFG", "0123456789", "", true, seeded()).unwrap();
        let first = replacer.replacement_for("person", "Miller").unwrap();
        let second = replacer.replacement_for("person", "Miller").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_alphabet_is_a_configuration_error() {
        let err = ScrambleReplacer::new("scramble", "", "0123", "", false, seeded()).unwrap_err();
        assert!(matches!(err, SpecterError::InvalidConfig(_)));
    }
}
