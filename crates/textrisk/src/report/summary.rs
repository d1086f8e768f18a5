use super::labels::CategoryLabels;
use super::views::{CategoryCountEntry, FindingView, ReportSummary};
use super::{interpretation_for, DISCLAIMER, RECOMMENDATIONS};
use crate::engine::{Hit, RiskLevel};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Read-only view over one analysis: level, score, ordered hits, bonus reasons and the
/// per-category breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub level: RiskLevel,
    pub total: u32,
    pub hits: Vec<Hit>,
    pub reasons: Vec<String>,
    /// Sorted by count descending, then category code ascending.
    pub categories: Vec<CategoryCount>,
}

impl Report {
    pub fn build(level: RiskLevel, total: u32, hits: Vec<Hit>, reasons: Vec<String>) -> Self {
        let categories = category_breakdown(&hits);
        Self {
            level,
            total,
            hits,
            reasons,
            categories,
        }
    }

    pub fn hit_count(&self) -> usize {
        self.hits.len()
    }

    /// Presentation view with at most `limit` findings.
    pub fn summary(&self, labels: &CategoryLabels, limit: usize) -> ReportSummary {
        let categories = self
            .categories
            .iter()
            .map(|entry| CategoryCountEntry {
                category: entry.category.clone(),
                category_label: labels.label(&entry.category).to_string(),
                count: entry.count,
            })
            .collect();

        let findings: Vec<FindingView> = self
            .hits
            .iter()
            .take(limit)
            .map(|hit| FindingView {
                matched: hit.matched.clone(),
                term: hit.term.clone(),
                category: hit.category.clone(),
                category_label: labels.label(&hit.category).to_string(),
                weight: hit.weight,
                start: hit.start,
                note: hit.note.clone().filter(|note| !note.trim().is_empty()),
            })
            .collect();

        let interpretation = interpretation_for(self.level);

        ReportSummary {
            level: self.level,
            level_label: self.level.label(),
            total: self.total,
            hit_count: self.hits.len(),
            categories,
            reasons: self.reasons.clone(),
            omitted: self.hits.len().saturating_sub(findings.len()),
            findings,
            interpretation: interpretation.summary,
            outlook: interpretation.outlook,
            recommendations: RECOMMENDATIONS.to_vec(),
            disclaimer: DISCLAIMER,
        }
    }
}

fn category_breakdown(hits: &[Hit]) -> Vec<CategoryCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for hit in hits {
        *counts.entry(hit.category.as_str()).or_insert(0) += 1;
    }

    let mut breakdown: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category: category.to_string(),
            count,
        })
        .collect();
    // BTreeMap already yields codes in ascending order; the stable sort keeps it for ties.
    breakdown.sort_by(|left, right| right.count.cmp(&left.count));
    breakdown
}
