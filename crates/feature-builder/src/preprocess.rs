//! Review preprocessing for the raw dataset.
//!
//! Adds the columns the clustering step expects: lemmatized review text,
//! sentiment of the raw reviews, a keyword genre and its one-hot encoding.
//! All other columns pass through unchanged.

use anyhow::{bail, Context, Result};
use data_loader::GENRE_PREFIX;
use nlp::{
    assign_genre_from_categories, assign_genre_from_keywords, SentimentAnalyzer,
    TextPreprocessor, GENRE_KEYWORDS, UNKNOWN_GENRE,
};
use std::path::Path;
use std::time::Instant;

pub const DEFAULT_TEXT_COLUMN: &str = "all_texts";
pub const DEFAULT_CATEGORIES_COLUMN: &str = "categories";

const PROCESSED_COLUMN: &str = "all_texts_processed";
const SENTIMENT_COLUMN: &str = "sentiment_score";
const GENRE_COLUMN: &str = "genre";

/// Genre names in one-hot column order, `Unknown` last
fn genre_names() -> Vec<&'static str> {
    GENRE_KEYWORDS
        .iter()
        .map(|(genre, _)| *genre)
        .chain(std::iter::once(UNKNOWN_GENRE))
        .collect()
}

/// Derived columns for one row
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedReview {
    pub processed_text: String,
    pub sentiment_score: f64,
    pub genre: &'static str,
}

/// Lemmatization, sentiment and genre over a raw review CSV.
pub struct ReviewPreprocessor {
    text_column: String,
    categories_column: String,
    preprocessor: TextPreprocessor,
}

impl ReviewPreprocessor {
    pub fn new() -> Self {
        Self {
            text_column: DEFAULT_TEXT_COLUMN.to_string(),
            categories_column: DEFAULT_CATEGORIES_COLUMN.to_string(),
            preprocessor: TextPreprocessor::new(),
        }
    }

    pub fn with_text_column(mut self, column: impl Into<String>) -> Self {
        self.text_column = column.into();
        self
    }

    pub fn with_categories_column(mut self, column: impl Into<String>) -> Self {
        self.categories_column = column.into();
        self
    }

    pub fn with_text_preprocessor(mut self, preprocessor: TextPreprocessor) -> Self {
        self.preprocessor = preprocessor;
        self
    }

    /// Derive the new columns for a batch of rows.
    ///
    /// With categories the genre comes from them, otherwise from the
    /// lemmatized text.
    pub fn process(
        &self,
        texts: &[Option<String>],
        categories: Option<&[Option<String>]>,
    ) -> Vec<ProcessedReview> {
        let processed = self.preprocessor.preprocess_texts(texts);
        let sentiments = SentimentAnalyzer::score_all(texts);

        processed
            .into_iter()
            .zip(sentiments)
            .enumerate()
            .map(|(row, (processed_text, sentiment_score))| {
                let genre = match categories {
                    Some(categories) => {
                        assign_genre_from_categories(categories.get(row).and_then(|c| c.as_deref()))
                    }
                    None => assign_genre_from_keywords(Some(&processed_text)),
                };
                ProcessedReview {
                    processed_text,
                    sentiment_score,
                    genre,
                }
            })
            .collect()
    }

    /// Read `input`, append the derived columns and write `output`.
    ///
    /// Returns the number of rows written.
    pub fn run(&self, input: &Path, output: &Path) -> Result<usize> {
        let start = Instant::now();

        let mut reader = csv::Reader::from_path(input)
            .with_context(|| format!("Failed to open raw dataset {}", input.display()))?;
        let headers = reader.headers()?.clone();

        let Some(text_idx) = headers.iter().position(|h| h == self.text_column) else {
            bail!(
                "Column '{}' not found in {}",
                self.text_column,
                input.display()
            );
        };
        let categories_idx = headers.iter().position(|h| h == self.categories_column);
        if categories_idx.is_none() {
            tracing::warn!(
                "No '{}' column; assigning genres from review keywords",
                self.categories_column
            );
        }

        let rows = reader
            .records()
            .collect::<std::result::Result<Vec<_>, _>>()
            .with_context(|| format!("Failed to parse {}", input.display()))?;

        let cell = |row: &csv::StringRecord, idx: usize| {
            row.get(idx)
                .filter(|v| !v.trim().is_empty())
                .map(str::to_string)
        };
        let texts: Vec<Option<String>> = rows.iter().map(|r| cell(r, text_idx)).collect();
        let categories: Option<Vec<Option<String>>> =
            categories_idx.map(|idx| rows.iter().map(|r| cell(r, idx)).collect());

        let reviews = self.process(&texts, categories.as_deref());

        let genres = genre_names();
        let mut out_headers: Vec<String> = headers.iter().map(str::to_string).collect();
        let mut column = |name: String| match out_headers.iter().position(|h| *h == name) {
            Some(idx) => idx,
            None => {
                out_headers.push(name);
                out_headers.len() - 1
            }
        };
        let processed_idx = column(PROCESSED_COLUMN.to_string());
        let sentiment_idx = column(SENTIMENT_COLUMN.to_string());
        let genre_idx = column(GENRE_COLUMN.to_string());
        let one_hot_idx: Vec<usize> = genres
            .iter()
            .map(|g| column(format!("{GENRE_PREFIX}{g}")))
            .collect();

        let mut writer = csv::Writer::from_path(output)
            .with_context(|| format!("Failed to create {}", output.display()))?;
        writer.write_record(&out_headers)?;

        for (row, review) in rows.iter().zip(&reviews) {
            let mut values: Vec<String> = row.iter().map(str::to_string).collect();
            values.resize(out_headers.len(), String::new());

            values[processed_idx] = review.processed_text.clone();
            values[sentiment_idx] = review.sentiment_score.to_string();
            values[genre_idx] = review.genre.to_string();
            for (genre, idx) in genres.iter().zip(&one_hot_idx) {
                let flag = if *genre == review.genre { "1" } else { "0" };
                values[*idx] = flag.to_string();
            }
            writer.write_record(&values)?;
        }
        writer.flush()?;

        tracing::info!(
            "Preprocessed {} reviews in {:?} -> {:?}",
            reviews.len(),
            start.elapsed(),
            output
        );
        Ok(reviews.len())
    }
}

impl Default for ReviewPreprocessor {
    fn default() -> Self {
        Self::new()
    }
}
