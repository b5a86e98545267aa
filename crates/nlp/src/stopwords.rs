//! English stop words.
//!
//! The list matches the one scikit-learn ships as `ENGLISH_STOP_WORDS`, so
//! vocabularies built here line up with models fitted in the notebooks.
//! Review lemmatization also drops `REVIEW_FILLER_WORDS`, the common filler
//! verbs and adverbs that spaCy's English list adds on top of it.

use once_cell::sync::Lazy;
use std::collections::HashSet;

pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst",
    "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway",
    "anywhere", "are", "around", "as", "at", "back", "be", "became", "because", "become",
    "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below", "beside",
    "besides", "between", "beyond", "bill", "both", "bottom", "but", "by", "call", "can",
    "cannot", "cant", "co", "con", "could", "couldnt", "cry", "de", "describe", "detail", "do",
    "done", "down", "due", "during", "each", "eg", "eight", "either", "eleven", "else",
    "elsewhere", "empty", "enough", "etc", "even", "ever", "every", "everyone", "everything",
    "everywhere", "except", "few", "fifteen", "fifty", "fill", "find", "fire", "first", "five",
    "for", "former", "formerly", "forty", "found", "four", "from", "front", "full", "further",
    "get", "give", "go", "had", "has", "hasnt", "have", "he", "hence", "her", "here",
    "hereafter", "hereby", "herein", "hereupon", "hers", "herself", "him", "himself", "his",
    "how", "however", "hundred", "i", "ie", "if", "in", "inc", "indeed", "interest", "into",
    "is", "it", "its", "itself", "keep", "last", "latter", "latterly", "least", "less", "ltd",
    "made", "many", "may", "me", "meanwhile", "might", "mill", "mine", "more", "moreover",
    "most", "mostly", "move", "much", "must", "my", "myself", "name", "namely", "neither",
    "never", "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor", "not",
    "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto", "or",
    "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own", "part",
    "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem", "seemed",
    "seeming", "seems", "serious", "several", "she", "should", "show", "side", "since",
    "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something", "sometime",
    "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than", "that", "the",
    "their", "them", "themselves", "then", "thence", "there", "thereafter", "thereby",
    "therefore", "therein", "thereupon", "these", "they", "thick", "thin", "third", "this",
    "those", "though", "three", "through", "throughout", "thru", "thus", "to", "together", "too",
    "top", "toward", "towards", "twelve", "twenty", "two", "un", "under", "until", "up", "upon",
    "us", "very", "via", "was", "we", "well", "were", "what", "whatever", "when", "whence",
    "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon", "wherever",
    "whether", "which", "while", "whither", "who", "whoever", "whole", "whom", "whose", "why",
    "will", "with", "within", "without", "would", "yet", "you", "your", "yours", "yourself",
    "yourselves",
];

/// Extra words dropped from review text before lemmatization
pub const REVIEW_FILLER_WORDS: &[&str] = &[
    "ca", "did", "does", "doing", "just", "make", "quite", "really", "regarding", "say", "unless",
    "used", "using", "various",
];

static STOP_WORDS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ENGLISH_STOP_WORDS.iter().copied().collect());

static REVIEW_STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ENGLISH_STOP_WORDS
        .iter()
        .chain(REVIEW_FILLER_WORDS)
        .copied()
        .collect()
});

fn contains_ignore_case(set: &HashSet<&'static str>, word: &str) -> bool {
    set.contains(word)
        || (word.chars().any(char::is_uppercase) && set.contains(word.to_lowercase().as_str()))
}

/// Case-insensitive stop word check
pub fn is_stop_word(word: &str) -> bool {
    contains_ignore_case(&STOP_WORDS, word)
}

/// Stop word check used when lemmatizing reviews: the base list plus filler
pub fn is_review_stop_word(word: &str) -> bool {
    contains_ignore_case(&REVIEW_STOP_WORDS, word)
}
