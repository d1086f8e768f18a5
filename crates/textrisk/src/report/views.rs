use crate::engine::RiskLevel;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCountEntry {
    pub category: String,
    pub category_label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FindingView {
    pub matched: String,
    pub term: String,
    pub category: String,
    pub category_label: String,
    pub weight: u32,
    pub start: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub level: RiskLevel,
    pub level_label: &'static str,
    pub total: u32,
    pub hit_count: usize,
    pub categories: Vec<CategoryCountEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reasons: Vec<String>,
    pub findings: Vec<FindingView>,
    /// Findings left out because of the caller's limit.
    pub omitted: usize,
    pub interpretation: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outlook: Option<&'static str>,
    pub recommendations: Vec<&'static str>,
    pub disclaimer: &'static str,
}
