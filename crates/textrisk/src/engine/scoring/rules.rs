use super::super::matcher::Hit;
use super::config::{BonusCondition, BonusRule, ScoringConfig};
use super::AppliedBonus;
use std::collections::BTreeSet;

pub(crate) struct ScoreTally {
    pub base_total: u32,
    pub total: u32,
    pub bonuses: Vec<AppliedBonus>,
}

pub(crate) fn tally_hits(hits: &[Hit], config: &ScoringConfig) -> ScoreTally {
    let base_total = hits
        .iter()
        .fold(0u32, |sum, hit| sum.saturating_add(hit.weight));
    let categories: BTreeSet<&str> = hits.iter().map(|hit| hit.category.as_str()).collect();

    let mut total = base_total;
    let mut bonuses = Vec::new();
    for rule in &config.bonuses {
        if !condition_holds(rule, &categories, hits.len()) {
            continue;
        }
        total = total.saturating_add(rule.bonus);
        bonuses.push(AppliedBonus {
            reason: rule.reason.clone(),
            bonus: rule.bonus,
        });
    }

    ScoreTally {
        base_total,
        total,
        bonuses,
    }
}

fn condition_holds(rule: &BonusRule, categories: &BTreeSet<&str>, hit_count: usize) -> bool {
    match &rule.condition {
        BonusCondition::CategoriesPresent { categories: required } => required
            .iter()
            .all(|category| categories.contains(category.as_str())),
        BonusCondition::MinHits { count } => hit_count >= *count,
    }
}
