//! Loading term rules from CSV dictionaries.
//!
//! Expected header: `term,match_type,category,risk,note,exceptions,weight`. Columns may
//! appear in any order and all but `term` may be missing; absent or blank values fall back
//! to defaults, and rows without a term are skipped.

mod parser;

use crate::engine::{EngineLimits, RuleSet, TermRule};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug)]
pub enum DictionaryError {
    Io { path: PathBuf, source: std::io::Error },
    Csv(csv::Error),
}

impl std::fmt::Display for DictionaryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DictionaryError::Io { path, source } => {
                write!(f, "failed to read dictionary {}: {}", path.display(), source)
            }
            DictionaryError::Csv(err) => write!(f, "invalid dictionary CSV data: {}", err),
        }
    }
}

impl std::error::Error for DictionaryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DictionaryError::Io { source, .. } => Some(source),
            DictionaryError::Csv(err) => Some(err),
        }
    }
}

impl From<csv::Error> for DictionaryError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct DictionaryLoader;

impl DictionaryLoader {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<TermRule>, DictionaryError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| DictionaryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let rules = Self::from_reader(file)?;
        info!(path = %path.display(), rules = rules.len(), "dictionary loaded");
        Ok(rules)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<TermRule>, DictionaryError> {
        Ok(parser::parse_rules(reader)?)
    }

    /// Loads a dictionary and compiles it into a rule set in one step.
    pub fn rule_set_from_path<P: AsRef<Path>>(
        path: P,
        limits: EngineLimits,
    ) -> Result<RuleSet, DictionaryError> {
        let rules = Self::from_path(path)?;
        Ok(RuleSet::with_limits(rules, limits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MatchType;
    use std::io::Cursor;

    #[test]
    fn loader_applies_defaults_for_missing_fields() {
        let csv = "term,match_type,category,risk,note,exceptions,weight\n\
powder,,,,,,\n";
        let rules = DictionaryLoader::from_reader(Cursor::new(csv)).expect("parses");

        assert_eq!(rules.len(), 1);
        let rule = &rules[0];
        assert_eq!(rule.term, "powder");
        assert_eq!(rule.match_type, MatchType::Word);
        assert_eq!(rule.category, "unknown");
        assert_eq!(rule.risk, "low");
        assert_eq!(rule.weight, 0);
        assert!(rule.note.is_none());
        assert!(rule.exceptions.is_empty());
    }

    #[test]
    fn loader_skips_rows_without_term() {
        let csv = "term,category,weight\n ,substance,5\nsnow,substance,4\n";
        let rules = DictionaryLoader::from_reader(Cursor::new(csv)).expect("parses");
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].term, "snow");
        assert_eq!(rules[0].weight, 4);
    }

    #[test]
    fn loader_trims_fields_and_reads_all_columns() {
        let csv = "term,match_type,category,risk,note,exceptions,weight\n\
  pick up , phrase , action , medium , courier slang , Pick Up The Kids|groceries ,  6 \n";
        let rules = DictionaryLoader::from_reader(Cursor::new(csv)).expect("parses");

        let rule = &rules[0];
        assert_eq!(rule.term, "pick up");
        assert_eq!(rule.match_type, MatchType::Phrase);
        assert_eq!(rule.category, "action");
        assert_eq!(rule.risk, "medium");
        assert_eq!(rule.note.as_deref(), Some("courier slang"));
        assert_eq!(
            rule.exceptions,
            vec!["pick up the kids".to_string(), "groceries".to_string()]
        );
        assert_eq!(rule.weight, 6);
    }

    #[test]
    fn loader_tolerates_short_rows() {
        let csv = "term,category,weight\nsnow,substance\n";
        let rules = DictionaryLoader::from_reader(Cursor::new(csv)).expect("parses");
        assert_eq!(rules[0].category, "substance");
        assert_eq!(rules[0].weight, 0);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = DictionaryLoader::from_path("/definitely/not/here.csv").expect_err("missing");
        assert!(err.to_string().contains("/definitely/not/here.csv"));
    }
}
