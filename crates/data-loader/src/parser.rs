//! CSV parsing for the clustered dataset and the combined-feature file.
//!
//! - clustered dataset: fixed columns plus any number of `genre_*` one-hot columns
//! - combined-feature file: exactly the `Book` columns, read and written with serde

use crate::error::{DataLoadError, Result};
use crate::types::*;
use std::fs::File;
use std::path::Path;

const TITLE: &str = "title";
const AUTHORS: &str = "authors";
const AVG_SCORE: &str = "avg_score";
const SENTIMENT_SCORE: &str = "sentiment_score";
const CLUSTER_LABEL: &str = "cluster_label";
const PROCESSED_TEXT: &str = "all_texts_processed";

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })
}

/// Position of a required header, or a MissingColumn error
fn column_index(headers: &csv::StringRecord, column: &str, file: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| DataLoadError::MissingColumn {
            file: file.to_string(),
            column: column.to_string(),
        })
}

/// Empty cells become None
fn optional_text(record: &csv::StringRecord, idx: usize) -> Option<String> {
    record
        .get(idx)
        .filter(|v| !v.trim().is_empty())
        .map(|v| v.to_string())
}

fn optional_number(
    record: &csv::StringRecord,
    idx: usize,
    field: &str,
    file: &str,
    line: usize,
) -> Result<Option<f64>> {
    match record.get(idx).map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<f64>()
            .map(Some)
            .map_err(|e| DataLoadError::ParseError {
                file: file.to_string(),
                line,
                reason: format!("Invalid {}: {}", field, e),
            }),
    }
}

/// Parse the clustered dataset consumed by the feature builder.
///
/// Every header starting with `genre_` is collected as a one-hot flag, in
/// header order.
pub fn parse_raw_books(path: &Path) -> Result<Vec<RawBookRecord>> {
    let file = file_name(path);
    let mut reader = csv::ReaderBuilder::new()
        .flexible(false)
        .from_reader(open(path)?);

    let headers = reader.headers()?.clone();
    let title_idx = column_index(&headers, TITLE, &file)?;
    let authors_idx = column_index(&headers, AUTHORS, &file)?;
    let avg_idx = column_index(&headers, AVG_SCORE, &file)?;
    let sentiment_idx = column_index(&headers, SENTIMENT_SCORE, &file)?;
    let cluster_idx = column_index(&headers, CLUSTER_LABEL, &file)?;
    let text_idx = column_index(&headers, PROCESSED_TEXT, &file)?;

    let genre_columns: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|(_, h)| h.starts_with(GENRE_PREFIX))
        .map(|(idx, h)| (idx, h.to_string()))
        .collect();

    let mut records = Vec::new();
    for (idx, row) in reader.records().enumerate() {
        // Header is line 1
        let line_no = idx + 2;
        let row = row?;

        let genre_flags = genre_columns
            .iter()
            .map(|(col_idx, column)| {
                GenreFlag::new(column.clone(), row.get(*col_idx).unwrap_or("").trim())
            })
            .collect();

        records.push(RawBookRecord {
            title: optional_text(&row, title_idx),
            authors: optional_text(&row, authors_idx),
            avg_score: optional_number(&row, avg_idx, AVG_SCORE, &file, line_no)?,
            sentiment_score: optional_number(&row, sentiment_idx, SENTIMENT_SCORE, &file, line_no)?,
            cluster_label: row.get(cluster_idx).unwrap_or("").trim().to_string(),
            genre_flags,
            processed_text: optional_text(&row, text_idx),
        });
    }

    tracing::debug!("Parsed {} raw book records from {}", records.len(), file);
    Ok(records)
}

/// Parse the combined-feature CSV
pub fn parse_books(path: &Path) -> Result<Vec<Book>> {
    let file = file_name(path);
    let mut reader = csv::Reader::from_reader(open(path)?);

    let mut books = Vec::new();
    for (idx, row) in reader.deserialize::<Book>().enumerate() {
        let book = row.map_err(|e| DataLoadError::ParseError {
            file: file.clone(),
            line: idx + 2,
            reason: e.to_string(),
        })?;
        books.push(book);
    }
    Ok(books)
}

/// Write the combined-feature CSV, replacing any existing file
pub fn write_books(path: &Path, books: &[Book]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for book in books {
        writer.serialize(book)?;
    }
    writer.flush()?;
    Ok(())
}
