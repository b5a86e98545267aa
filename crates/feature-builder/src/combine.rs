//! Combined feature text.

/// `"{title}. Written by {author}. Genre: {genre}. Reviews: {reviews}"`
///
/// Missing fields render as empty strings. Case is left untouched; the
/// builder lower-cases the result.
pub fn combine_features(
    title: Option<&str>,
    authors: Option<&str>,
    genre: Option<&str>,
    reviews: Option<&str>,
) -> String {
    format!(
        "{}. Written by {}. Genre: {}. Reviews: {}",
        title.unwrap_or_default(),
        authors.unwrap_or_default(),
        genre.unwrap_or_default(),
        reviews.unwrap_or_default(),
    )
}
