mod config;
mod policy;
mod rules;

pub use config::{standard_bonuses, BonusCondition, BonusRule, LevelBands, ScoringConfig};
pub use policy::RiskLevel;

use super::matcher::Hit;
use policy::decide_level;
use serde::{Deserialize, Serialize};

/// Stateless scorer applying a [`ScoringConfig`] to a hit list.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn score(&self, hits: &[Hit]) -> ScoreOutcome {
        let tally = rules::tally_hits(hits, &self.config);
        let level = decide_level(tally.total, &self.config.bands);

        ScoreOutcome {
            level,
            total: tally.total,
            base_total: tally.base_total,
            bonuses: tally.bonuses,
        }
    }
}

/// A triggered bonus heuristic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedBonus {
    pub reason: String,
    pub bonus: u32,
}

/// Score for one hit list: raw weight sum, bonuses in evaluation order, final level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreOutcome {
    pub level: RiskLevel,
    pub total: u32,
    pub base_total: u32,
    pub bonuses: Vec<AppliedBonus>,
}

impl ScoreOutcome {
    pub fn reasons(&self) -> Vec<String> {
        self.bonuses.iter().map(|bonus| bonus.reason.clone()).collect()
    }
}
