// specter-core/src/rewriter.rs
//! Token-identity rewriting of a page's text.
//!
//! The rewriter reconstructs the output text by walking the page's tokens
//! in order and substituting replacement text for targeted tokens. The
//! separators between tokens are emitted verbatim from the source text, so
//! an empty replacement set reproduces the source exactly and untouched
//! token offsets are never disturbed.
//!
//! Operating on token identity rather than raw character offsets makes the
//! rewrite independent of replacement order and lets OCR pages (where the
//! bounding box, not the offset, is the addressable unit) share the same
//! code path.
//!
//! License: MIT OR APACHE 2.0

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::SpecterError;
use crate::token::Word;

/// A planned substitution of one token's text.
///
/// At most one replacement may exist per target token; the rewriter treats
/// a duplicate as a resolver-contract violation. `applied` flips to true
/// when the rewrite consumes the replacement and is checked afterwards as a
/// consistency guard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    pub target: Word,
    pub text: String,
    #[serde(default)]
    pub applied: bool,
}

impl Replacement {
    pub fn new(target: Word, text: impl Into<String>) -> Self {
        Self {
            target,
            text: text.into(),
            applied: false,
        }
    }
}

/// The outcome of rewriting one page. Immutable once returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformationResult {
    pub source_text: String,
    pub transformed_text: String,
    pub replacements: Vec<Replacement>,
}

/// Rewrites `source_text` by substituting replacement text for targeted
/// tokens.
///
/// Tokens must be the page's own token sequence, ordered by offset. Fails
/// with a contract violation if two replacements target the same token or
/// if a replacement targets a token that is not part of the page.
pub fn rewrite(
    source_text: &str,
    tokens: &[Word],
    replacements: Vec<Replacement>,
) -> Result<TransformationResult, SpecterError> {
    let mut replacements = replacements;
    let mut by_target: HashMap<(usize, usize), usize> = HashMap::with_capacity(replacements.len());

    for (index, replacement) in replacements.iter().enumerate() {
        let key = (replacement.target.start, replacement.target.end);
        if by_target.insert(key, index).is_some() {
            return Err(SpecterError::DuplicateReplacementTarget {
                start: key.0,
                end: key.1,
            });
        }
    }

    let mut transformed = String::with_capacity(source_text.len());
    let mut cursor = 0usize;

    for token in tokens {
        // Separator bytes between the previous token and this one pass
        // through unchanged.
        transformed.push_str(&source_text[cursor..token.start]);

        match by_target.get(&(token.start, token.end)) {
            Some(&index) => {
                let replacement = &mut replacements[index];
                replacement.applied = true;
                transformed.push_str(&replacement.text);
            }
            None => transformed.push_str(&token.text),
        }

        cursor = token.end;
    }

    transformed.push_str(&source_text[cursor..]);

    if let Some(stale) = replacements.iter().find(|r| !r.applied) {
        return Err(SpecterError::UnappliedReplacement {
            start: stale.target.start,
            end: stale.target.end,
        });
    }

    Ok(TransformationResult {
        source_text: source_text.to_string(),
        transformed_text: transformed,
        replacements,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::tokenize;

    fn replacement_for(tokens: &[Word], text: &str, with: &str) -> Replacement {
        let target = tokens
            .iter()
            .find(|t| t.text == text)
            .cloned()
            .unwrap_or_else(|| panic!("no token '{}'", text));
        Replacement::new(target, with)
    }

    #[test]
    fn test_empty_replacement_set_is_identity() {
        let text = "John  lives\tin Dublin.\n";
        let tokens = tokenize(text);
        let result = rewrite(text, &tokens, Vec::new()).unwrap();
        assert_eq!(result.transformed_text, text);
        assert_eq!(result.source_text, text);
    }

    #[test]
    fn test_targeted_tokens_are_substituted_in_place() {
        let text = "John lives in Dublin.";
        let tokens = tokenize(text);
        let replacements = vec![
            replacement_for(&tokens, "John", "<person>"),
            replacement_for(&tokens, "Dublin.", "<location>."),
        ];

        let result = rewrite(text, &tokens, replacements).unwrap();
        assert_eq!(result.transformed_text, "<person> lives in <location>.");
        assert!(result.replacements.iter().all(|r| r.applied));
    }

    #[test]
    fn test_token_count_and_separators_are_preserved() {
        let text = "a  b   c";
        let tokens = tokenize(text);
        let replacements = vec![replacement_for(&tokens, "b", "LONGER")];

        let result = rewrite(text, &tokens, replacements).unwrap();
        assert_eq!(result.transformed_text, "a  LONGER   c");
        assert_eq!(
            tokenize(&result.transformed_text).len(),
            tokens.len(),
            "rewrite must not change the token count"
        );
    }

    #[test]
    fn test_duplicate_target_is_a_contract_violation() {
        let text = "John lives";
        let tokens = tokenize(text);
        let replacements = vec![
            replacement_for(&tokens, "John", "A"),
            replacement_for(&tokens, "John", "B"),
        ];

        let err = rewrite(text, &tokens, replacements).unwrap_err();
        assert!(matches!(
            err,
            SpecterError::DuplicateReplacementTarget { start: 0, end: 4 }
        ));
    }

    #[test]
    fn test_replacement_without_matching_token_fails() {
        let text = "John lives";
        let tokens = tokenize(text);
        let stray = Replacement::new(
            Word {
                text: "ghost".to_string(),
                start: 40,
                end: 45,
                page: 0,
                bounding_box: None,
            },
            "X",
        );

        let err = rewrite(text, &tokens, vec![stray]).unwrap_err();
        assert!(matches!(err, SpecterError::UnappliedReplacement { .. }));
    }

    #[test]
    fn test_replacement_order_does_not_matter() {
        let text = "one two three";
        let tokens = tokenize(text);
        let forward = vec![
            replacement_for(&tokens, "one", "1"),
            replacement_for(&tokens, "three", "3"),
        ];
        let backward = vec![
            replacement_for(&tokens, "three", "3"),
            replacement_for(&tokens, "one", "1"),
        ];

        let a = rewrite(text, &tokens, forward).unwrap();
        let b = rewrite(text, &tokens, backward).unwrap();
        assert_eq!(a.transformed_text, b.transformed_text);
        assert_eq!(a.transformed_text, "1 two 3");
    }
}
