use serde::{Deserialize, Serialize};

/// Scoring configuration: level thresholds plus the ordered bonus heuristics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub bands: LevelBands,
    #[serde(default = "standard_bonuses")]
    pub bonuses: Vec<BonusRule>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            bands: LevelBands::default(),
            bonuses: standard_bonuses(),
        }
    }
}

/// Lower bounds (inclusive) of the MEDIUM and HIGH bands. Any positive total below
/// `medium_from` is LOW.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelBands {
    pub medium_from: u32,
    pub high_from: u32,
}

impl Default for LevelBands {
    fn default() -> Self {
        Self {
            medium_from: 10,
            high_from: 25,
        }
    }
}

/// A heuristic that adds `bonus` points when `condition` holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusRule {
    pub condition: BonusCondition,
    pub bonus: u32,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BonusCondition {
    /// Every listed category appears among the hits.
    CategoriesPresent { categories: Vec<String> },
    /// At least `count` hits survived matching.
    MinHits { count: usize },
}

pub fn standard_bonuses() -> Vec<BonusRule> {
    vec![
        BonusRule {
            condition: BonusCondition::CategoriesPresent {
                categories: vec!["substance".to_string(), "action".to_string()],
            },
            bonus: 10,
            reason: "combination of substance and action present".to_string(),
        },
        BonusRule {
            condition: BonusCondition::CategoriesPresent {
                categories: vec!["substance".to_string(), "context_positive".to_string()],
            },
            bonus: 6,
            reason: "normalization markers present near subject".to_string(),
        },
        BonusRule {
            condition: BonusCondition::MinHits { count: 4 },
            bonus: 4,
            reason: "high density of matches".to_string(),
        },
    ]
}
