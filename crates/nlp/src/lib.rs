//! # NLP Crate
//!
//! Text preprocessing helpers used when preparing the book dataset:
//!
//! - **stopwords**: English stop word list shared by the lemmatizer and the TF-IDF tokenizer
//! - **lemmatize**: rule-based lemmatization with chunking for very long texts
//! - **sentiment**: VADER compound polarity scores
//! - **genre**: keyword-overlap genre assignment
//!
//! ## Example Usage
//!
//! ```ignore
//! use nlp::{SentimentAnalyzer, TextPreprocessor, assign_genre_from_categories};
//!
//! let preprocessor = TextPreprocessor::new();
//! let processed = preprocessor.preprocess("The dragons were flying over burning cities");
//! assert_eq!(processed, "dragon fly burn city");
//!
//! let sentiment = SentimentAnalyzer::new().score(Some("A wonderful, moving story"));
//! let genre = assign_genre_from_categories(Some("Juvenile Fiction"));
//! ```

pub mod genre;
pub mod lemmatize;
pub mod sentiment;
pub mod stopwords;

pub use genre::{
    assign_genre_from_categories, assign_genre_from_category_list, assign_genre_from_keywords,
    extract_keywords, GENRE_KEYWORDS, UNKNOWN_GENRE,
};
pub use lemmatize::{split_text, Lemmatizer, RuleLemmatizer, TextPreprocessor, DEFAULT_CHUNK_SIZE};
pub use sentiment::SentimentAnalyzer;
pub use stopwords::{is_review_stop_word, is_stop_word, ENGLISH_STOP_WORDS, REVIEW_FILLER_WORDS};
