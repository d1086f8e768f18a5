use std::sync::Arc;

use crate::engine::{MatchType, RuleSet, TermRiskEngine, TermRule};

pub(super) fn engine(rules: Vec<TermRule>) -> TermRiskEngine {
    TermRiskEngine::new(Arc::new(RuleSet::new(rules)))
}

/// Small dictionary covering every category the standard bonuses look at.
pub(super) fn sample_rules() -> Vec<TermRule> {
    vec![
        TermRule::new("powder", "substance", 8).with_note("street name"),
        TermRule::new("buy", "action", 5),
        TermRule::new("stash", "slang", 3),
        TermRule::new("harmless fun", "context_positive", 4).with_match_type(MatchType::Phrase),
        TermRule::new(r"dose\w*", "substance", 6).with_match_type(MatchType::Regex),
        TermRule::new("snow", "substance", 7).with_exceptions(["snow storm", "ski"]),
    ]
}

pub(super) fn sample_engine() -> TermRiskEngine {
    engine(sample_rules())
}
