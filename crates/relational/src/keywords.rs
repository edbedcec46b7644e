//! Keyword extraction for relational search.

/// Keep at most this many keywords per prompt.
pub const MAX_KEYWORDS: usize = 5;

/// Extract search keywords from a prompt.
///
/// Lowercases, turns every character outside `[a-z0-9_]` into a separator,
/// and keeps the first [`MAX_KEYWORDS`] tokens longer than two bytes.
/// Repeated tokens are kept; the tiered matcher does not care.
pub fn extract_keywords(prompt: &str) -> Vec<String> {
    prompt
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .filter(|word| word.len() > 2)
        .take(MAX_KEYWORDS)
        .map(str::to_string)
        .collect()
}
