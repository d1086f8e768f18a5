use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::config::AnalysisConfig;
use crate::dictionary::{DictionaryError, DictionaryLoader};
use crate::engine::{Hit, RuleFailure, RuleSet, ScoringConfig, TermRiskEngine};
use crate::report::views::{CategoryCountEntry, ReportSummary};
use crate::report::{render_text, truncate_chars, CategoryLabels};

/// Input rejected before it reaches the engine.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("text is too short to analyze ({actual} characters, minimum {min})")]
    TooShort { min: usize, actual: usize },
    #[error("text is too long to analyze ({actual} characters, maximum {max})")]
    TooLong { max: usize, actual: usize },
}

/// Everything a host needs to present one analysis.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResponse {
    #[serde(flatten)]
    pub summary: ReportSummary,
    pub base_total: u32,
    pub hits: Vec<Hit>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rule_failures: Vec<RuleFailure>,
    pub rendered: String,
    pub rendered_truncated: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DictionaryOverview {
    pub rules: usize,
    pub disabled_rules: Vec<RuleFailure>,
    pub categories: Vec<CategoryCountEntry>,
}

/// Service composing the engine, category labels and host-side input bounds.
pub struct AnalysisService {
    engine: TermRiskEngine,
    labels: CategoryLabels,
    settings: AnalysisConfig,
}

impl AnalysisService {
    pub fn new(rules: Arc<RuleSet>, settings: AnalysisConfig) -> Self {
        Self {
            engine: TermRiskEngine::new(rules),
            labels: CategoryLabels::standard(),
            settings,
        }
    }

    /// Loads the configured dictionary and builds a service around it.
    pub fn from_config(settings: AnalysisConfig) -> Result<Self, DictionaryError> {
        let rules =
            DictionaryLoader::rule_set_from_path(&settings.dictionary_path, settings.engine_limits())?;
        info!(
            rules = rules.len(),
            disabled = rules.compile_failures().count(),
            "rule set ready"
        );
        Ok(Self::new(Arc::new(rules), settings))
    }

    pub fn with_labels(mut self, labels: CategoryLabels) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_scoring(self, config: ScoringConfig) -> Self {
        let rules = self.engine.shared_rules();
        Self {
            engine: TermRiskEngine::with_scoring(rules, config),
            ..self
        }
    }

    /// Analyzes `text`, showing at most `limit` findings (the configured default when
    /// `None`).
    pub fn analyze(
        &self,
        text: &str,
        limit: Option<usize>,
    ) -> Result<AnalysisResponse, AnalysisError> {
        let text = text.trim();
        let actual = text.chars().count();
        if actual < self.settings.min_input_chars {
            return Err(AnalysisError::TooShort {
                min: self.settings.min_input_chars,
                actual,
            });
        }
        if actual > self.settings.max_input_chars {
            return Err(AnalysisError::TooLong {
                max: self.settings.max_input_chars,
                actual,
            });
        }

        let analysis = self.engine.analyze(text);
        let report = analysis.report();
        let summary = report.summary(
            &self.labels,
            limit.unwrap_or(self.settings.report_limit),
        );

        let full = render_text(&summary);
        let rendered = truncate_chars(&full, self.settings.response_char_limit);
        let rendered_truncated = rendered.len() < full.len();
        let rendered = rendered.to_string();

        Ok(AnalysisResponse {
            summary,
            base_total: analysis.score.base_total,
            hits: analysis.hits,
            rule_failures: analysis.rule_failures,
            rendered,
            rendered_truncated,
        })
    }

    pub fn dictionary_overview(&self) -> DictionaryOverview {
        let rules = self.engine.rules();
        let mut categories: Vec<CategoryCountEntry> = rules
            .category_counts()
            .into_iter()
            .map(|(category, count)| CategoryCountEntry {
                category: category.to_string(),
                category_label: self.labels.label(category).to_string(),
                count,
            })
            .collect();
        categories.sort_by(|left, right| right.count.cmp(&left.count));

        DictionaryOverview {
            rules: rules.len(),
            disabled_rules: rules.compile_failures().cloned().collect(),
            categories,
        }
    }
}
