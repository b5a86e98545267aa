//! Word tokenization for TF-IDF.
//!
//! Lower-cases the text, keeps runs of two or more word characters and drops
//! English stop words.

use nlp::is_stop_word;
use once_cell::sync::Lazy;
use regex::Regex;

static TOKEN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern is valid"));

pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|token| !is_stop_word(token))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_lowercases_and_drops_stop_words() {
        assert_eq!(
            tokenize("The Martian: Written by Andy Weir."),
            vec!["martian", "written", "andy", "weir"]
        );
    }

    #[test]
    fn test_single_characters_are_dropped() {
        assert_eq!(tokenize("a b c dd 9 42"), vec!["dd", "42"]);
    }

    #[test]
    fn test_punctuation_splits_words() {
        assert_eq!(tokenize("self-help, o'brien"), vec!["self", "help", "brien"]);
    }

    #[test]
    fn test_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ... ").is_empty());
    }
}
