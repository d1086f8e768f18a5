use std::collections::HashMap;

/// Presentation names for category codes. Codes without an entry render as-is.
#[derive(Debug, Clone, Default)]
pub struct CategoryLabels {
    labels: HashMap<String, String>,
}

impl CategoryLabels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Labels for the categories the scoring heuristics know about.
    pub fn standard() -> Self {
        const STANDARD: &[(&str, &str)] = &[
            ("substance", "Substance"),
            ("action", "Action"),
            ("context_positive", "Normalization / romanticization"),
            ("slang", "Slang"),
            ("unknown", "Uncategorized"),
        ];

        STANDARD
            .iter()
            .fold(Self::new(), |labels, (code, label)| labels.with_label(*code, *label))
    }

    pub fn with_label(mut self, category: impl Into<String>, label: impl Into<String>) -> Self {
        self.labels.insert(category.into(), label.into());
        self
    }

    pub fn label<'a>(&'a self, category: &'a str) -> &'a str {
        self.labels
            .get(category)
            .map(String::as_str)
            .unwrap_or(category)
    }
}

impl<K, V> FromIterator<(K, V)> for CategoryLabels
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            labels: iter
                .into_iter()
                .map(|(category, label)| (category.into(), label.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_codes_render_verbatim() {
        let labels = CategoryLabels::standard();
        assert_eq!(labels.label("substance"), "Substance");
        assert_eq!(labels.label("weather"), "weather");
    }

    #[test]
    fn labels_can_be_injected() {
        let labels: CategoryLabels = [("substance", "Вещество")].into_iter().collect();
        assert_eq!(labels.label("substance"), "Вещество");
        assert_eq!(labels.label("action"), "action");
    }
}
