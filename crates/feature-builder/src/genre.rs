//! Genre label reconstruction from one-hot columns.

use data_loader::{GenreFlag, GENRE_PREFIX};

/// Whether a one-hot cell counts as set
fn is_set(value: &str) -> bool {
    match value.trim() {
        "True" | "true" => true,
        other => other.parse::<f64>().map(|v| v == 1.0).unwrap_or(false),
    }
}

/// Names of the set genre columns (prefix stripped), joined with `", "`.
///
/// Column order is preserved; no set column gives `""`.
pub fn reverse_one_hot_encoding(flags: &[GenreFlag]) -> String {
    flags
        .iter()
        .filter(|flag| is_set(&flag.value))
        .filter_map(|flag| flag.column.strip_prefix(GENRE_PREFIX))
        .collect::<Vec<_>>()
        .join(", ")
}
