//! Matching and scoring engine.
//!
//! Raw text is normalized, every rule of the shared [`RuleSet`] is applied to it, and the
//! surviving hits are scored. The engine holds no mutable state, so one instance can serve
//! any number of concurrent callers.

mod matcher;
pub mod normalizer;
mod rules;
pub mod scoring;

#[cfg(test)]
mod tests;

pub use matcher::{Hit, CONTEXT_WINDOW_CHARS};
pub use normalizer::normalize;
pub use rules::{EngineLimits, MatchType, RuleFailure, RuleSet, TermRule};
pub use scoring::{AppliedBonus, RiskLevel, ScoreOutcome, ScoringConfig, ScoringEngine};

use crate::report::Report;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct TermRiskEngine {
    rules: Arc<RuleSet>,
    scoring: ScoringEngine,
}

impl TermRiskEngine {
    pub fn new(rules: Arc<RuleSet>) -> Self {
        Self::with_scoring(rules, ScoringConfig::default())
    }

    pub fn with_scoring(rules: Arc<RuleSet>, config: ScoringConfig) -> Self {
        Self {
            rules,
            scoring: ScoringEngine::new(config),
        }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn shared_rules(&self) -> Arc<RuleSet> {
        Arc::clone(&self.rules)
    }

    pub fn analyze(&self, text: &str) -> Analysis {
        let normalized = normalize(text);
        let outcome = matcher::find_hits(&self.rules, &normalized);
        let score = self.scoring.score(&outcome.hits);

        for failure in &outcome.failures {
            if let RuleFailure::Execution { term, .. } = failure {
                warn!(term = %term, %failure, "rule aborted during analysis");
            }
        }

        debug!(
            chars = normalized.chars().count(),
            hits = outcome.hits.len(),
            total = score.total,
            level = score.level.code(),
            "analysis complete"
        );

        Analysis {
            hits: outcome.hits,
            score,
            rule_failures: outcome.failures,
        }
    }
}

/// Result of one analysis call.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub hits: Vec<Hit>,
    pub score: ScoreOutcome,
    /// Rules that contributed nothing because their pattern failed.
    pub rule_failures: Vec<RuleFailure>,
}

impl Analysis {
    pub fn level(&self) -> RiskLevel {
        self.score.level
    }

    pub fn total(&self) -> u32 {
        self.score.total
    }

    pub fn report(&self) -> Report {
        Report::build(
            self.score.level,
            self.score.total,
            self.hits.clone(),
            self.score.reasons(),
        )
    }
}
