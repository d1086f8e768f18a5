//! Dictionary-driven detection of sensitive terminology in free-form text.
//!
//! A [`engine::RuleSet`] is built once from term rules (usually loaded with
//! [`dictionary::DictionaryLoader`]) and shared by every analysis. Each analysis normalizes
//! the input, matches all rules, scores the surviving hits and yields a
//! [`report::Report`]. Verdicts are advisory.

pub mod config;
pub mod dictionary;
pub mod engine;
pub mod error;
pub mod report;
pub mod router;
pub mod service;
pub mod telemetry;

pub use engine::{Analysis, RiskLevel, RuleSet, TermRiskEngine, TermRule};
pub use service::{AnalysisResponse, AnalysisService};
