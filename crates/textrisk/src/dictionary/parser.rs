use crate::engine::{MatchType, TermRule};
use serde::{Deserialize, Deserializer};
use std::io::Read;
use tracing::debug;

const EXCEPTION_DELIMITER: char = '|';
const DEFAULT_CATEGORY: &str = "unknown";

pub(crate) fn parse_rules<R: Read>(reader: R) -> Result<Vec<TermRule>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let mut rules = Vec::new();

    for (index, record) in csv_reader.deserialize::<DictionaryRow>().enumerate() {
        let row = record?;
        match row.into_rule() {
            Some(rule) => rules.push(rule),
            None => debug!(row = index + 1, "skipping dictionary row without a term"),
        }
    }

    Ok(rules)
}

#[derive(Debug, Deserialize)]
struct DictionaryRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    term: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    match_type: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    category: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    risk: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    note: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    exceptions: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    weight: Option<String>,
}

impl DictionaryRow {
    fn into_rule(self) -> Option<TermRule> {
        let term = self.term?;
        let weight = parse_weight(self.weight.as_deref());

        let mut rule = TermRule::new(
            term,
            self.category
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            weight,
        )
        .with_match_type(
            self.match_type
                .as_deref()
                .map(MatchType::from_label)
                .unwrap_or_default(),
        )
        .with_exceptions(split_exceptions(self.exceptions.as_deref()));

        if let Some(risk) = self.risk {
            rule = rule.with_risk(risk);
        }
        if let Some(note) = self.note {
            rule = rule.with_note(note);
        }

        Some(rule)
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty()))
}

/// Unparsable or negative weights resolve to zero.
fn parse_weight(value: Option<&str>) -> u32 {
    value
        .and_then(|raw| raw.parse::<i64>().ok())
        .map(|weight| weight.clamp(0, u32::MAX as i64) as u32)
        .unwrap_or(0)
}

fn split_exceptions(value: Option<&str>) -> Vec<String> {
    value
        .map(|raw| {
            raw.split(EXCEPTION_DELIMITER)
                .map(|part| part.trim().to_lowercase())
                .filter(|part| !part.is_empty())
                .collect()
        })
        .unwrap_or_default()
}
