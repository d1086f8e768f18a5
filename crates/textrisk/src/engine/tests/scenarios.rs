use super::common::*;
use crate::engine::{MatchType, RiskLevel, RuleFailure, RuleSet, TermRiskEngine, TermRule};
use std::sync::Arc;

#[test]
fn empty_rule_set_detects_nothing() {
    let engine = TermRiskEngine::new(Arc::new(RuleSet::empty()));
    let analysis = engine.analyze("any text at all");

    assert!(analysis.hits.is_empty());
    assert_eq!(analysis.total(), 0);
    assert_eq!(analysis.level(), RiskLevel::None);
    assert!(analysis.score.bonuses.is_empty());
}

#[test]
fn single_hit_is_low_risk() {
    let engine = engine(vec![TermRule::new("x", "c", 5)]);
    let analysis = engine.analyze("x");

    assert_eq!(analysis.hits.len(), 1);
    assert_eq!(analysis.hits[0].matched, "x");
    assert_eq!(analysis.hits[0].start, 0);
    assert_eq!(analysis.total(), 5);
    assert_eq!(analysis.level(), RiskLevel::Low);
}

#[test]
fn substance_and_action_trigger_combination_bonus() {
    let engine = engine(vec![
        TermRule::new("a", "substance", 5),
        TermRule::new("b", "action", 5),
    ]);
    let analysis = engine.analyze("a b");

    assert_eq!(analysis.score.base_total, 10);
    assert_eq!(analysis.total(), 20);
    assert_eq!(analysis.level(), RiskLevel::Medium);
    assert_eq!(
        analysis.score.reasons(),
        vec!["combination of substance and action present".to_string()]
    );
}

#[test]
fn exception_phrase_in_window_suppresses_hit() {
    let engine = engine(vec![
        TermRule::new("snow", "substance", 7).with_exceptions(["snow storm"])
    ]);
    let analysis = engine.analyze("A heavy SNOW storm is coming.");

    assert!(analysis.hits.is_empty());
    assert_eq!(analysis.level(), RiskLevel::None);
}

#[test]
fn invalid_regex_rule_does_not_break_analysis() {
    let engine = engine(vec![
        TermRule::new("(", "c", 5).with_match_type(MatchType::Regex),
        TermRule::new("ok", "c", 2),
    ]);
    let analysis = engine.analyze("ok then");

    assert_eq!(analysis.hits.len(), 1);
    assert_eq!(analysis.total(), 2);
    assert!(matches!(
        analysis.rule_failures.as_slice(),
        [RuleFailure::Compile { term, .. }] if term == "("
    ));
}

#[test]
fn dense_text_earns_density_bonus() {
    let analysis = sample_engine().analyze("stash stash, buy more stash");

    // three slang hits at distinct offsets plus one action hit
    assert_eq!(analysis.hits.len(), 4);
    assert_eq!(analysis.score.base_total, 14);
    assert_eq!(analysis.total(), 18);
    assert_eq!(analysis.score.reasons(), vec!["high density of matches".to_string()]);
    assert_eq!(analysis.level(), RiskLevel::Medium);
}

#[test]
fn normalization_markers_add_bonus_next_to_substance() {
    let analysis = sample_engine().analyze("Honestly, a small dose is just harmless fun!");

    let terms: Vec<&str> = analysis.hits.iter().map(|hit| hit.term.as_str()).collect();
    assert_eq!(terms, vec![r"dose\w*", "harmless fun"]);
    assert_eq!(analysis.score.base_total, 10);
    assert_eq!(analysis.total(), 16);
    assert_eq!(analysis.level(), RiskLevel::Medium);
}

#[test]
fn all_bonuses_stack_into_high_risk() {
    let analysis = sample_engine()
        .analyze("Buy the powder, hide your stash, it is harmless fun - one dose only.");

    assert_eq!(analysis.hits.len(), 5);
    assert_eq!(analysis.score.base_total, 26);
    assert_eq!(analysis.total(), 46);
    assert_eq!(analysis.level(), RiskLevel::High);
    assert_eq!(analysis.score.bonuses.len(), 3);

    let report = analysis.report();
    assert_eq!(report.hit_count(), 5);
    assert_eq!(report.reasons.len(), 3);
}

#[test]
fn exception_outside_window_keeps_hit() {
    let filler = "word ".repeat(20);
    let text = format!("fresh snow {filler}ski");
    let analysis = sample_engine().analyze(&text);

    assert_eq!(analysis.hits.len(), 1);
    assert_eq!(analysis.hits[0].term, "snow");
    assert_eq!(analysis.hits[0].note, None);
}

#[test]
fn offsets_are_characters_in_normalized_text() {
    let engine = engine(vec![TermRule::new("ёж", "c", 1)]);
    let analysis = engine.analyze("Привет,   ЁЖ!");

    assert_eq!(analysis.hits.len(), 1);
    assert_eq!(analysis.hits[0].matched, "еж");
    assert_eq!(analysis.hits[0].start, 7);
}
