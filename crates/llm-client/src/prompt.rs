//! Prompt text.

pub const SYSTEM_PROMPT: &str = "You are a helpful literary assistant.";

/// User prompt asking for a two-sentence summary.
///
/// The author is mentioned only when known; `[]` is what an empty author
/// list looks like in the raw data.
pub fn build_prompt(title: &str, author: &str) -> String {
    let mut prompt = format!("Give me a 2-sentence summary of the book titled '{title}'");
    if !author.is_empty() && author != "[]" {
        prompt.push_str(" by ");
        prompt.push_str(author);
    }
    prompt.push('.');
    prompt
}
