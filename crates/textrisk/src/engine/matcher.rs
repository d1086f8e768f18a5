use super::rules::{CompiledRule, RuleFailure, RuleSet};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Characters of surrounding text inspected for exception phrases on each side of a match.
pub const CONTEXT_WINDOW_CHARS: usize = 70;

/// A match that survived exception filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hit {
    pub term: String,
    pub matched: String,
    pub category: String,
    pub risk: String,
    pub weight: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Character offset into the normalized text.
    pub start: usize,
}

#[derive(Debug, Default)]
pub(crate) struct MatchOutcome {
    pub(crate) hits: Vec<Hit>,
    pub(crate) failures: Vec<RuleFailure>,
}

/// Byte offset of every char boundary, so char positions and slices can be derived
/// from regex byte offsets.
struct CharOffsets {
    boundaries: Vec<usize>,
}

impl CharOffsets {
    fn new(text: &str) -> Self {
        let mut boundaries: Vec<usize> = text.char_indices().map(|(idx, _)| idx).collect();
        boundaries.push(text.len());
        Self { boundaries }
    }

    fn char_len(&self) -> usize {
        self.boundaries.len() - 1
    }

    fn char_at(&self, byte: usize) -> usize {
        self.boundaries.partition_point(|&boundary| boundary < byte)
    }

    fn byte_at(&self, char_idx: usize) -> usize {
        self.boundaries[char_idx.min(self.char_len())]
    }
}

pub(crate) fn find_hits(rules: &RuleSet, normalized: &str) -> MatchOutcome {
    let offsets = CharOffsets::new(normalized);
    let budget = rules.limits().rule_budget;
    let mut unique: BTreeMap<(usize, String), Hit> = BTreeMap::new();
    let mut failures = Vec::new();

    for compiled in rules.compiled() {
        let pattern = match &compiled.pattern {
            Ok(pattern) => pattern,
            Err(failure) => {
                failures.push(failure.clone());
                continue;
            }
        };

        match scan_rule(compiled, pattern, normalized, &offsets, budget) {
            Ok(hits) => {
                for hit in hits {
                    // Later rules replace earlier ones reporting the same term at the same offset.
                    unique.insert((hit.start, hit.term.clone()), hit);
                }
            }
            Err(failure) => failures.push(failure),
        }
    }

    let mut hits: Vec<Hit> = unique.into_values().collect();
    hits.sort_by(|left, right| {
        left.start
            .cmp(&right.start)
            .then_with(|| right.weight.cmp(&left.weight))
            .then_with(|| left.term.cmp(&right.term))
    });

    MatchOutcome { hits, failures }
}

fn scan_rule(
    compiled: &CompiledRule,
    pattern: &Regex,
    text: &str,
    offsets: &CharOffsets,
    budget: Duration,
) -> Result<Vec<Hit>, RuleFailure> {
    let started = Instant::now();
    let mut hits = Vec::new();

    for found in pattern.find_iter(text) {
        if started.elapsed() >= budget {
            return Err(RuleFailure::Execution {
                term: compiled.rule.term.clone(),
                budget_ms: u64::try_from(budget.as_millis()).unwrap_or(u64::MAX),
            });
        }

        if found.is_empty() {
            continue;
        }

        let start = offsets.char_at(found.start());
        let end = offsets.char_at(found.end());

        if !compiled.exceptions.is_empty() {
            let window_start = offsets.byte_at(start.saturating_sub(CONTEXT_WINDOW_CHARS));
            let window_end = offsets.byte_at(end + CONTEXT_WINDOW_CHARS);
            let context = &text[window_start..window_end];
            if compiled
                .exceptions
                .iter()
                .any(|phrase| context.contains(phrase.as_str()))
            {
                continue;
            }
        }

        let rule = &compiled.rule;
        hits.push(Hit {
            term: rule.term.clone(),
            matched: found.as_str().to_string(),
            category: rule.category.clone(),
            risk: rule.risk.clone(),
            weight: rule.weight,
            note: rule.note.clone(),
            start,
        });
    }

    Ok(hits)
}
