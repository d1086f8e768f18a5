use regex::Regex;
use std::sync::OnceLock;

static NON_WORD: OnceLock<Regex> = OnceLock::new();

fn non_word() -> &'static Regex {
    NON_WORD.get_or_init(|| Regex::new(r"[^\w\s]").expect("punctuation pattern compiles"))
}

/// Lowercases and folds "ё" into "е" so authored terms line up with normalized text.
pub fn fold_case(value: &str) -> String {
    value.to_lowercase().replace('ё', "е")
}

/// Canonical form used for matching: folded case, punctuation replaced by spaces,
/// whitespace runs collapsed, ends trimmed.
pub fn normalize(text: &str) -> String {
    let folded = fold_case(text);
    let spaced = non_word().replace_all(&folded, " ");
    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \t\n "), "");
    }

    #[test]
    fn lowercases_and_unifies_yo() {
        assert_eq!(normalize("ЁЛКА и Ёж"), "елка и еж");
    }

    #[test]
    fn punctuation_becomes_single_spaces() {
        assert_eq!(normalize("Hello,world!!  How -- are you?"), "hello world how are you");
    }

    #[test]
    fn underscores_and_digits_are_word_characters() {
        assert_eq!(normalize("snake_case 42x"), "snake_case 42x");
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = normalize("  Мама, мыла... РАМУ!\n\nЁ-моё ");
        assert_eq!(normalize(&once), once);
        assert_eq!(once, "мама мыла раму е мое");
    }
}
