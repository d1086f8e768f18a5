use super::normalizer::{fold_case, normalize};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_REGEX_SIZE_LIMIT: usize = 2 * 1024 * 1024;
const DEFAULT_RULE_BUDGET: Duration = Duration::from_millis(250);

/// How a rule's `term` is turned into a search pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    #[default]
    Word,
    Phrase,
    Regex,
}

impl MatchType {
    /// Unknown values fall back to `Word`.
    pub fn from_label(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "regex" => Self::Regex,
            "phrase" => Self::Phrase,
            _ => Self::Word,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Word => "word",
            Self::Phrase => "phrase",
            Self::Regex => "regex",
        }
    }
}

/// One dictionary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermRule {
    pub term: String,
    #[serde(default)]
    pub match_type: MatchType,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default = "default_risk")]
    pub risk: String,
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub exceptions: Vec<String>,
}

fn default_category() -> String {
    "unknown".to_string()
}

fn default_risk() -> String {
    "low".to_string()
}

impl TermRule {
    pub fn new(term: impl Into<String>, category: impl Into<String>, weight: u32) -> Self {
        Self {
            term: term.into(),
            match_type: MatchType::Word,
            category: category.into(),
            risk: default_risk(),
            weight,
            note: None,
            exceptions: Vec::new(),
        }
    }

    pub fn with_match_type(mut self, match_type: MatchType) -> Self {
        self.match_type = match_type;
        self
    }

    pub fn with_risk(mut self, risk: impl Into<String>) -> Self {
        self.risk = risk.into();
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_exceptions<I, S>(mut self, exceptions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exceptions = exceptions.into_iter().map(Into::into).collect();
        self
    }
}

/// Guards applied while compiling and evaluating rule patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineLimits {
    /// Upper bound on the compiled size of a single rule's regex.
    pub regex_size_limit: usize,
    /// Wall-clock budget for scanning one rule over one input.
    pub rule_budget: Duration,
}

impl Default for EngineLimits {
    fn default() -> Self {
        Self {
            regex_size_limit: DEFAULT_REGEX_SIZE_LIMIT,
            rule_budget: DEFAULT_RULE_BUDGET,
        }
    }
}

/// Why a rule contributed nothing to an analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleFailure {
    #[error("pattern for rule '{term}' failed to compile: {message}")]
    Compile { term: String, message: String },
    #[error("rule '{term}' exceeded its {budget_ms}ms evaluation budget")]
    Execution { term: String, budget_ms: u64 },
}

impl RuleFailure {
    pub fn term(&self) -> &str {
        match self {
            RuleFailure::Compile { term, .. } | RuleFailure::Execution { term, .. } => term,
        }
    }
}

#[derive(Debug)]
pub(crate) struct CompiledRule {
    pub(crate) rule: TermRule,
    pub(crate) pattern: Result<Regex, RuleFailure>,
    pub(crate) exceptions: Vec<String>,
}

impl CompiledRule {
    fn compile(rule: TermRule, limits: &EngineLimits) -> Self {
        let pattern = build_pattern(&rule, limits);
        let exceptions = rule
            .exceptions
            .iter()
            .map(|phrase| normalize(phrase))
            .filter(|phrase| !phrase.is_empty())
            .collect();

        Self {
            rule,
            pattern,
            exceptions,
        }
    }
}

fn build_pattern(rule: &TermRule, limits: &EngineLimits) -> Result<Regex, RuleFailure> {
    let source = match rule.match_type {
        MatchType::Regex => rule.term.clone(),
        MatchType::Word | MatchType::Phrase => {
            format!(r"\b{}\b", regex::escape(&fold_case(&rule.term)))
        }
    };

    RegexBuilder::new(&source)
        .size_limit(limits.regex_size_limit)
        .build()
        .map_err(|err| RuleFailure::Compile {
            term: rule.term.clone(),
            message: err.to_string(),
        })
}

/// Immutable collection of compiled rules shared by every analysis.
///
/// Patterns are compiled once here. Rules whose pattern does not compile are kept so
/// that every analysis can report them, but they never produce hits.
#[derive(Debug)]
pub struct RuleSet {
    rules: Vec<CompiledRule>,
    limits: EngineLimits,
}

impl RuleSet {
    pub fn new(rules: Vec<TermRule>) -> Self {
        Self::with_limits(rules, EngineLimits::default())
    }

    pub fn with_limits(rules: Vec<TermRule>, limits: EngineLimits) -> Self {
        let compiled: Vec<CompiledRule> = rules
            .into_iter()
            .filter(|rule| {
                let keep = !rule.term.trim().is_empty();
                if !keep {
                    debug!(category = %rule.category, "dropping rule with empty term");
                }
                keep
            })
            .map(|rule| CompiledRule::compile(rule, &limits))
            .collect();

        for failure in compiled.iter().filter_map(|rule| rule.pattern.as_ref().err()) {
            warn!(term = failure.term(), %failure, "rule disabled");
        }

        Self {
            rules: compiled,
            limits,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn limits(&self) -> &EngineLimits {
        &self.limits
    }

    pub fn rules(&self) -> impl Iterator<Item = &TermRule> {
        self.rules.iter().map(|compiled| &compiled.rule)
    }

    pub fn compile_failures(&self) -> impl Iterator<Item = &RuleFailure> {
        self.rules
            .iter()
            .filter_map(|compiled| compiled.pattern.as_ref().err())
    }

    /// Number of rules per category, keyed in label order.
    pub fn category_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for rule in self.rules() {
            *counts.entry(rule.category.as_str()).or_insert(0) += 1;
        }
        counts
    }

    pub(crate) fn compiled(&self) -> &[CompiledRule] {
        &self.rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_type_labels_fall_back_to_word() {
        assert_eq!(MatchType::from_label(" Regex "), MatchType::Regex);
        assert_eq!(MatchType::from_label("phrase"), MatchType::Phrase);
        assert_eq!(MatchType::from_label("fuzzy"), MatchType::Word);
        assert_eq!(MatchType::from_label(""), MatchType::Word);
    }

    #[test]
    fn literal_terms_are_escaped_and_anchored() {
        let rule = TermRule::new("Ёж.", "c", 1);
        let pattern = build_pattern(&rule, &EngineLimits::default()).expect("compiles");
        assert_eq!(pattern.as_str(), r"\bеж\.\b");
    }

    #[test]
    fn invalid_regex_is_recorded_as_compile_failure() {
        let rules = RuleSet::new(vec![
            TermRule::new("(unclosed", "c", 3).with_match_type(MatchType::Regex),
            TermRule::new("fine", "c", 1),
        ]);

        let failures: Vec<_> = rules.compile_failures().collect();
        assert_eq!(failures.len(), 1);
        assert!(matches!(failures[0], RuleFailure::Compile { term, .. } if term == "(unclosed"));
        assert_eq!(rules.len(), 2);
    }

    #[test]
    fn oversized_regex_hits_size_limit() {
        let limits = EngineLimits {
            regex_size_limit: 64,
            ..EngineLimits::default()
        };
        let rule = TermRule::new(r"\w{500}", "c", 1).with_match_type(MatchType::Regex);
        assert!(matches!(
            build_pattern(&rule, &limits),
            Err(RuleFailure::Compile { .. })
        ));
    }

    #[test]
    fn empty_terms_are_dropped() {
        let rules = RuleSet::new(vec![TermRule::new("  ", "c", 1), TermRule::new("x", "c", 1)]);
        assert_eq!(rules.len(), 1);
    }

    #[test]
    fn exceptions_are_normalized_once() {
        let rules = RuleSet::new(vec![
            TermRule::new("x", "c", 1).with_exceptions(["  Ёлки-Палки ", "", "!!"])
        ]);
        assert_eq!(rules.compiled()[0].exceptions, vec!["елки палки".to_string()]);
    }

    #[test]
    fn category_counts_group_rules() {
        let rules = RuleSet::new(vec![
            TermRule::new("a", "substance", 1),
            TermRule::new("b", "action", 1),
            TermRule::new("c", "substance", 1),
        ]);
        let counts = rules.category_counts();
        assert_eq!(counts.get("substance"), Some(&2));
        assert_eq!(counts.get("action"), Some(&1));
    }
}
