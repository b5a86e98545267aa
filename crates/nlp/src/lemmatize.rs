//! Lemmatization of review text.
//!
//! `TextPreprocessor` turns raw review text into a space-joined string of
//! lower-cased lemmas, dropping stop words and anything that is not purely
//! alphabetic. Very long texts are split into chunks first and the chunk
//! outputs rejoined, so a single review never exceeds the lemmatizer's
//! input limit.
//!
//! The bundled `RuleLemmatizer` combines a table of irregular forms with the
//! suffix rules of Porter's step 1 (plural and -ed/-ing removal, with the
//! "restore a final e" fix-ups), so it produces dictionary-looking forms
//! ("stories" -> "story", "making" -> "make") rather than stems.

use crate::stopwords::is_review_stop_word;
use once_cell::sync::Lazy;
use rayon::prelude::*;
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// Maximum characters handed to the lemmatizer in one piece
pub const DEFAULT_CHUNK_SIZE: usize = 1_000_000;

static TOKEN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\w+(?:['’]\w+)*").expect("token pattern is valid"));

/// Reduces a single lower-case word to its dictionary form.
pub trait Lemmatizer: Send + Sync {
    fn lemmatize(&self, word: &str) -> String;
}

/// Split `text` into consecutive chunks of at most `max_chars` characters.
///
/// An empty text yields no chunks. Splits always fall on char boundaries.
pub fn split_text(text: &str, max_chars: usize) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    if max_chars == 0 {
        return vec![text];
    }

    let mut chunks = Vec::new();
    let mut start = 0;
    let mut count = 0;
    for (idx, _) in text.char_indices() {
        if count == max_chars {
            chunks.push(&text[start..idx]);
            start = idx;
            count = 0;
        }
        count += 1;
    }
    chunks.push(&text[start..]);
    chunks
}

/// Lemmatizes review text chunk by chunk.
pub struct TextPreprocessor {
    lemmatizer: Box<dyn Lemmatizer>,
    chunk_size: usize,
}

impl TextPreprocessor {
    /// Preprocessor backed by `RuleLemmatizer` with the default chunk size
    pub fn new() -> Self {
        Self {
            lemmatizer: Box::new(RuleLemmatizer::new()),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Swap in a different lemmatizer
    pub fn with_lemmatizer(mut self, lemmatizer: impl Lemmatizer + 'static) -> Self {
        self.lemmatizer = Box::new(lemmatizer);
        self
    }

    /// Configure the chunk size in characters (default: 1,000,000)
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Lemmatize one text.
    pub fn preprocess(&self, text: &str) -> String {
        split_text(text, self.chunk_size)
            .into_iter()
            .map(|chunk| self.preprocess_chunk(chunk))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Lemmatize a batch in parallel; missing texts become empty strings.
    ///
    /// Output order matches input order.
    pub fn preprocess_texts(&self, texts: &[Option<String>]) -> Vec<String> {
        tracing::info!("Lemmatizing {} texts", texts.len());
        texts
            .par_iter()
            .map(|text| text.as_deref().map(|t| self.preprocess(t)).unwrap_or_default())
            .collect()
    }

    fn preprocess_chunk(&self, chunk: &str) -> String {
        TOKEN_PATTERN
            .find_iter(chunk)
            .filter_map(|m| word_part(m.as_str()))
            .filter(|token| token.chars().all(char::is_alphabetic))
            .filter(|token| !is_review_stop_word(token))
            .map(|token| self.lemmatizer.lemmatize(&token.to_lowercase()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for TextPreprocessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip a contraction suffix: "don't" -> "do", "author's" -> "author"
fn word_part(token: &str) -> Option<&str> {
    let Some(pos) = token.find(['\'', '’']) else {
        return Some(token);
    };
    let (base, rest) = token.split_at(pos);
    let suffix = rest.trim_start_matches(['\'', '’']);
    let base = if suffix.eq_ignore_ascii_case("t") {
        base.strip_suffix(['n', 'N']).unwrap_or(base)
    } else {
        base
    };
    (!base.is_empty()).then_some(base)
}

// =============================================================================
// RuleLemmatizer
// =============================================================================

static IRREGULAR_FORMS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("is", "be"), ("am", "be"), ("are", "be"), ("was", "be"), ("were", "be"),
        ("been", "be"), ("being", "be"), ("has", "have"), ("had", "have"),
        ("having", "have"), ("does", "do"), ("did", "do"), ("done", "do"), ("doing", "do"),
        ("went", "go"), ("gone", "go"), ("going", "go"), ("goes", "go"), ("made", "make"),
        ("said", "say"), ("took", "take"), ("taken", "take"), ("came", "come"),
        ("saw", "see"), ("seen", "see"), ("knew", "know"), ("known", "know"),
        ("got", "get"), ("gotten", "get"), ("gave", "give"), ("given", "give"),
        ("found", "find"), ("thought", "think"), ("told", "tell"), ("became", "become"),
        ("left", "leave"), ("felt", "feel"), ("brought", "bring"), ("began", "begin"),
        ("begun", "begin"), ("kept", "keep"), ("held", "hold"), ("wrote", "write"),
        ("written", "write"), ("stood", "stand"), ("heard", "hear"), ("meant", "mean"),
        ("met", "meet"), ("ran", "run"), ("paid", "pay"), ("sat", "sit"),
        ("spoke", "speak"), ("spoken", "speak"), ("led", "lead"), ("grew", "grow"),
        ("grown", "grow"), ("lost", "lose"), ("fell", "fall"), ("fallen", "fall"),
        ("sent", "send"), ("built", "build"), ("understood", "understand"),
        ("drew", "draw"), ("drawn", "draw"), ("broke", "break"), ("broken", "break"),
        ("spent", "spend"), ("rose", "rise"), ("risen", "rise"), ("drove", "drive"),
        ("driven", "drive"), ("bought", "buy"), ("wore", "wear"), ("worn", "wear"),
        ("chose", "choose"), ("chosen", "choose"), ("sought", "seek"), ("threw", "throw"),
        ("thrown", "throw"), ("caught", "catch"), ("taught", "teach"), ("fought", "fight"),
        ("ate", "eat"), ("eaten", "eat"), ("slept", "sleep"), ("won", "win"),
        ("hid", "hide"), ("hidden", "hide"), ("forgot", "forget"), ("forgotten", "forget"),
        ("flew", "fly"), ("flown", "fly"), ("sang", "sing"), ("sung", "sing"),
        ("swam", "swim"), ("used", "use"), ("using", "use"), ("children", "child"),
        ("men", "man"), ("women", "woman"), ("feet", "foot"), ("teeth", "tooth"),
        ("mice", "mouse"), ("geese", "goose"), ("wives", "wife"), ("knives", "knife"),
        ("wolves", "wolf"), ("lives", "life"), ("best", "good"), ("worse", "bad"),
        ("worst", "bad"),
    ]
    .into_iter()
    .collect()
});

/// Words that look inflected but are already base forms
static INVARIANT_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "series", "species", "news", "physics", "mathematics", "economics", "politics",
        "ethics", "chaos", "lens", "yes", "during", "thing", "king", "ring", "wing", "bring",
        "spring", "string", "swing", "sting", "ceiling", "morning", "evening", "wedding",
        "pudding", "darling", "sibling", "ending", "nothing", "something", "anything",
        "everything", "sacred", "naked", "wicked", "wretched", "beloved", "kindred", "hundred",
    ]
    .into_iter()
    .collect()
});

/// Irregular-form table plus English suffix rules.
#[derive(Debug, Clone, Default)]
pub struct RuleLemmatizer;

impl RuleLemmatizer {
    pub fn new() -> Self {
        Self
    }

    fn is_vowel(c: char) -> bool {
        matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
    }

    /// Number of vowel-consonant sequences ("tree" = 0, "trouble" = 1)
    fn measure(word: &str) -> usize {
        let mut count = 0;
        let mut prev_is_vowel = false;
        for c in word.chars() {
            let is_vowel = Self::is_vowel(c);
            if !is_vowel && prev_is_vowel {
                count += 1;
            }
            prev_is_vowel = is_vowel;
        }
        count
    }

    fn has_vowel(word: &str) -> bool {
        word.chars().any(|c| Self::is_vowel(c) || c == 'y')
    }

    fn ends_with_double_consonant(word: &str) -> bool {
        let chars: Vec<char> = word.chars().collect();
        let len = chars.len();
        len >= 2 && chars[len - 1] == chars[len - 2] && !Self::is_vowel(chars[len - 1])
    }

    /// consonant-vowel-consonant ending, final consonant not w, x or y
    fn ends_with_cvc(word: &str) -> bool {
        let chars: Vec<char> = word.chars().collect();
        let len = chars.len();
        if len < 3 {
            return false;
        }
        let (first, middle, last) = (chars[len - 3], chars[len - 2], chars[len - 1]);
        !Self::is_vowel(first)
            && Self::is_vowel(middle)
            && !Self::is_vowel(last)
            && !matches!(last, 'w' | 'x' | 'y')
    }

    /// Fix up a stem left behind by -ed / -ing removal
    fn restore(stem: &str) -> String {
        if stem.ends_with("at") || stem.ends_with("bl") || stem.ends_with("iz") {
            return format!("{stem}e");
        }
        if Self::ends_with_double_consonant(stem) && !stem.ends_with(['l', 's', 'z']) {
            let mut chars = stem.chars();
            chars.next_back();
            return chars.as_str().to_string();
        }
        if Self::measure(stem) == 1 && Self::ends_with_cvc(stem) {
            return format!("{stem}e");
        }
        stem.to_string()
    }

    fn strip_verb_suffix(word: &str) -> Option<String> {
        let len = word.chars().count();
        if let Some(stem) = word.strip_suffix("ied").filter(|_| len > 4) {
            return Some(format!("{stem}y"));
        }
        if let Some(stem) = word.strip_suffix("ing").filter(|_| len > 5) {
            if Self::has_vowel(stem) {
                return Some(Self::restore(stem));
            }
        }
        if word.ends_with("eed") {
            return None;
        }
        if let Some(stem) = word.strip_suffix("ed").filter(|_| len > 4) {
            if Self::has_vowel(stem) {
                return Some(Self::restore(stem));
            }
        }
        None
    }

    fn strip_plural(word: &str) -> Option<String> {
        let len = word.chars().count();
        if let Some(stem) = word.strip_suffix("ies").filter(|_| len > 4) {
            return Some(format!("{stem}y"));
        }
        for suffix in ["sses", "xes", "ches", "shes", "zzes"] {
            if word.ends_with(suffix) {
                return Some(word[..word.len() - 2].to_string());
            }
        }
        if len > 3 && word.ends_with('s') && !word.ends_with("ss") && !word.ends_with("us")
            && !word.ends_with("is")
        {
            return Some(word[..word.len() - 1].to_string());
        }
        None
    }
}

impl Lemmatizer for RuleLemmatizer {
    fn lemmatize(&self, word: &str) -> String {
        if let Some(lemma) = IRREGULAR_FORMS.get(word) {
            return lemma.to_string();
        }
        if INVARIANT_WORDS.contains(word) {
            return word.to_string();
        }
        Self::strip_verb_suffix(word)
            .or_else(|| Self::strip_plural(word))
            .unwrap_or_else(|| word.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_text_respects_max_chars() {
        assert_eq!(split_text("abcdefg", 3), vec!["abc", "def", "g"]);
        assert_eq!(split_text("abc", 3), vec!["abc"]);
        assert!(split_text("", 3).is_empty());
    }

    #[test]
    fn test_split_text_is_char_boundary_safe() {
        let chunks = split_text("héllo wörld", 4);
        assert_eq!(chunks.concat(), "héllo wörld");
        assert!(chunks.iter().all(|c| c.chars().count() <= 4));
    }

    #[test]
    fn test_lemmatizer_rules() {
        let lemmatizer = RuleLemmatizer::new();
        let cases = [
            ("stories", "story"),
            ("novels", "novel"),
            ("churches", "church"),
            ("classes", "class"),
            ("making", "make"),
            ("running", "run"),
            ("falling", "fall"),
            ("created", "create"),
            ("wanted", "want"),
            ("loved", "love"),
            ("studied", "study"),
            ("written", "write"),
            ("children", "child"),
            ("series", "series"),
            ("analysis", "analysis"),
            ("morning", "morning"),
            ("need", "need"),
        ];
        for (word, expected) in cases {
            assert_eq!(lemmatizer.lemmatize(word), expected, "lemma of {word}");
        }
    }

    #[test]
    fn test_preprocess_drops_stop_words_and_non_alpha() {
        let preprocessor = TextPreprocessor::new();
        let out = preprocessor.preprocess("The dragons were flying over 3 burning cities, in 1999!");
        assert_eq!(out, "dragon fly burn city");
    }

    #[test]
    fn test_preprocess_drops_review_filler() {
        let preprocessor = TextPreprocessor::new();
        assert_eq!(
            preprocessor.preprocess("Just a really quite various dragon, used to say"),
            "dragon"
        );
    }

    #[test]
    fn test_preprocess_handles_contractions() {
        let preprocessor = TextPreprocessor::new();
        assert_eq!(preprocessor.preprocess("The author's novels don't disappoint"), "author novel disappoint");
    }

    #[test]
    fn test_preprocess_chunks_rejoin() {
        let preprocessor = TextPreprocessor::new().with_chunk_size(8);
        // chunks: "gardens " / "grow fas" / "t"
        assert_eq!(preprocessor.preprocess("gardens grow fast"), "garden grow fas t");
    }

    #[test]
    fn test_preprocess_texts_keeps_order_and_handles_missing() {
        let preprocessor = TextPreprocessor::new();
        let texts = vec![Some("Great novels".to_string()), None, Some("the".to_string())];
        assert_eq!(preprocessor.preprocess_texts(&texts), vec!["great novel", "", ""]);
    }

    struct Upper;

    impl Lemmatizer for Upper {
        fn lemmatize(&self, word: &str) -> String {
            word.to_uppercase()
        }
    }

    #[test]
    fn test_custom_lemmatizer() {
        let preprocessor = TextPreprocessor::new().with_lemmatizer(Upper);
        assert_eq!(preprocessor.preprocess("Quiet mornings"), "QUIET MORNINGS");
    }
}
