use crate::engine::RiskLevel;

pub(crate) const RECOMMENDATIONS: &[&str] = &[
    "review the context in which the flagged wording appears",
    "avoid direct mentions of substances",
    "watch for combinations of substances with actions",
];

pub(crate) const DISCLAIMER: &str =
    "Automated dictionary-based reference analysis. This is not a legal opinion.";

pub(crate) struct Interpretation {
    pub(crate) summary: &'static str,
    pub(crate) outlook: Option<&'static str>,
}

pub(crate) fn interpretation_for(level: RiskLevel) -> Interpretation {
    match level {
        RiskLevel::High => Interpretation {
            summary: "The text contains direct or repeated sensitive wording.",
            outlook: Some("Additional review before publication may be required."),
        },
        RiskLevel::Medium => Interpretation {
            summary: "Potentially sensitive wording was found.",
            outlook: Some("Questions during moderation are possible."),
        },
        RiskLevel::Low => Interpretation {
            summary: "Isolated contextual matches were found.",
            outlook: Some("Restrictions are unlikely."),
        },
        RiskLevel::None => Interpretation {
            summary: "No matches were found.",
            outlook: None,
        },
    }
}
