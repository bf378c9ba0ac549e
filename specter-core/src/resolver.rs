// specter-core/src/resolver.rs
//! Conflict resolution for overlapping detector spans.
//!
//! Detectors run independently, so their spans may duplicate, contain, or
//! partially overlap one another. [`resolve`] turns the raw spans into a
//! pairwise-disjoint set of [`EffectiveSpan`]s using a fixpoint merge that
//! is deterministic in the spans' emission order.
//!
//! The working state is an arena of span entries plus an index-based work
//! queue. Merged spans are appended to the arena and pushed back into the
//! queue for re-resolution, so no shared objects are mutated while being
//! compared. Each merge retires two live entries and adds one, which bounds
//! the loop.
//!
//! License: MIT OR APACHE 2.0

use std::collections::VecDeque;

use log::debug;

use crate::errors::SpecterError;
use crate::span::{validate_spans, EffectiveSpan, Span, MERGED_LABEL};
use crate::token::Word;

/// Resolver working copy of a span. `ignore` marks entries dominated by a
/// containing span or consumed by a merge; it is set at most once and never
/// cleared.
#[derive(Debug, Clone)]
struct Entry {
    label: String,
    text: String,
    start: usize,
    end: usize,
    merged: bool,
    ignore: bool,
}

impl Entry {
    fn contains(&self, other: &Entry) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    fn overlaps(&self, other: &Entry) -> bool {
        self.start < other.end && self.end > other.start
    }
}

/// Resolves raw detector spans into a disjoint set of effective spans and
/// computes the words each one touches.
///
/// Spans are validated against the page text first: a zero-length span or a
/// span whose text disagrees with its offsets aborts the page. Resolution
/// itself cannot fail.
pub fn resolve(
    spans: Vec<Span>,
    text: &str,
    words: &[Word],
) -> Result<Vec<EffectiveSpan>, SpecterError> {
    validate_spans(&spans, text)?;

    let mut arena: Vec<Entry> = spans
        .into_iter()
        .map(|span| Entry {
            label: span.label,
            text: span.text,
            start: span.start,
            end: span.end,
            merged: false,
            ignore: false,
        })
        .collect();

    let mut queue: VecDeque<usize> = (0..arena.len()).collect();
    let mut accepted: Vec<usize> = Vec::with_capacity(arena.len());

    while let Some(candidate) = queue.pop_front() {
        let mut survives = true;

        for position in 0..accepted.len() {
            let prev = accepted[position];
            if arena[prev].ignore {
                continue;
            }

            if arena[prev].contains(&arena[candidate]) {
                // Previous span dominates; the candidate is dropped.
                debug!(
                    "Span '{}' @ {} is contained in '{}'; ignoring it.",
                    arena[candidate].text, arena[candidate].start, arena[prev].text
                );
                arena[candidate].ignore = true;
                survives = false;
                break;
            }

            if arena[candidate].contains(&arena[prev]) {
                // The candidate supersedes the previous span and keeps
                // scanning the remaining accepted entries.
                debug!(
                    "Span '{}' @ {} supersedes contained '{}'.",
                    arena[candidate].text, arena[candidate].start, arena[prev].text
                );
                arena[prev].ignore = true;
                continue;
            }

            if arena[candidate].overlaps(&arena[prev]) {
                debug!(
                    "Span '{}' @ {} partially overlaps '{}'; merging.",
                    arena[candidate].text, arena[candidate].start, arena[prev].text
                );
                let merged = merge_entries(&arena[candidate], &arena[prev]);
                arena[candidate].ignore = true;
                arena[prev].ignore = true;
                arena.push(merged);
                // A merge can create new overlaps, so the merged span is
                // re-resolved against everything still live.
                queue.push_back(arena.len() - 1);
                survives = false;
                break;
            }
        }

        if survives {
            accepted.push(candidate);
        }
    }

    let mut effective: Vec<EffectiveSpan> = accepted
        .into_iter()
        .filter(|&index| !arena[index].ignore)
        .map(|index| {
            let entry = &arena[index];
            let touched: Vec<Word> = words
                .iter()
                .filter(|word| word.intersects(entry.start, entry.end))
                .cloned()
                .collect();
            debug!(
                "Span '{}' @ {} touched {} word(s).",
                entry.text,
                entry.start,
                touched.len()
            );
            EffectiveSpan {
                label: entry.label.clone(),
                text: entry.text.clone(),
                start: entry.start,
                end: entry.end,
                merged: entry.merged,
                touched,
            }
        })
        .collect();

    effective.sort_by_key(|span| span.start);
    Ok(effective)
}

/// Combines two partially overlapping entries into one covering span.
///
/// The text is reconciled from the non-overlapping portions of each parent:
/// the earlier-starting span contributes everything it has, the later-ending
/// span contributes its tail beyond the first's end. With validated spans
/// this equals the source substring over the merged interval.
fn merge_entries(a: &Entry, b: &Entry) -> Entry {
    let (first, second) = if a.start <= b.start { (a, b) } else { (b, a) };

    let tail_from = first.end - second.start;
    let text = format!("{}{}", first.text, &second.text[tail_from..]);

    let label = if a.label == b.label {
        a.label.clone()
    } else {
        MERGED_LABEL.to_string()
    };

    Entry {
        label,
        text,
        start: first.start,
        end: second.end,
        merged: true,
        ignore: false,
    }
}
