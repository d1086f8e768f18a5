use super::config::LevelBands;
use serde::{Deserialize, Serialize};

/// Coarse band derived from the total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    None,
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const fn code(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "Not detected",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

pub(crate) fn decide_level(total: u32, bands: &LevelBands) -> RiskLevel {
    if total >= bands.high_from {
        RiskLevel::High
    } else if total >= bands.medium_from {
        RiskLevel::Medium
    } else if total > 0 {
        RiskLevel::Low
    } else {
        RiskLevel::None
    }
}
