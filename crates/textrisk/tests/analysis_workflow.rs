use std::sync::Arc;

use textrisk::config::AnalysisConfig;
use textrisk::dictionary::DictionaryLoader;
use textrisk::engine::{RiskLevel, RuleSet, TermRiskEngine};
use textrisk::report::{render_text, CategoryLabels};
use textrisk::service::AnalysisService;

fn bundled_rules() -> Arc<RuleSet> {
    let data = include_bytes!("../../../dictionary.csv");
    let rules = DictionaryLoader::from_reader(&data[..]).expect("dictionary parses");
    Arc::new(RuleSet::new(rules))
}

#[test]
fn harmless_text_is_not_flagged() {
    let engine = TermRiskEngine::new(bundled_rules());
    let analysis = engine.analyze("We went skiing in fresh snow and had a road trip afterwards.");

    assert!(analysis.hits.is_empty());
    assert_eq!(analysis.level(), RiskLevel::None);
    assert!(analysis.rule_failures.is_empty());
}

#[test]
fn solicitation_is_scored_high_and_rendered() {
    let engine = TermRiskEngine::new(bundled_rules());
    let analysis = engine.analyze(
        "Where to get powder? I can buy a stash, delivery to Riverside, it's totally safe.",
    );

    let terms: Vec<&str> = analysis.hits.iter().map(|hit| hit.term.as_str()).collect();
    assert_eq!(
        terms,
        vec![
            "where to get",
            "powder",
            "buy",
            "stash",
            r"delivery to\s+\w+",
            "totally safe"
        ]
    );
    assert_eq!(analysis.score.base_total, 36);
    assert_eq!(analysis.total(), 56);
    assert_eq!(analysis.level(), RiskLevel::High);

    let summary = analysis.report().summary(&CategoryLabels::standard(), 3);
    assert_eq!(summary.findings.len(), 3);
    assert_eq!(summary.omitted, 3);

    let text = render_text(&summary);
    assert!(text.starts_with("Risk level: HIGH"));
    assert!(text.contains("\"powder\" -> Substance (street name for stimulants)"));
    assert!(text.contains("... and 3 more"));
}

#[test]
fn service_shares_one_rule_set_across_threads() {
    let service = Arc::new(AnalysisService::new(bundled_rules(), AnalysisConfig::default()));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let service = Arc::clone(&service);
            std::thread::spawn(move || {
                service
                    .analyze("Any ice left? I want to buy some.", None)
                    .expect("analysis succeeds")
            })
        })
        .collect();

    for handle in handles {
        let response = handle.join().expect("thread completes");
        assert_eq!(response.summary.total, 24);
        assert_eq!(response.summary.level, RiskLevel::Medium);
    }
}
