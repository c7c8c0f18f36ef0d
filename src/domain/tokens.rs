//! Line tokenization helpers.
//!
//! Lines are trimmed, configured extra delimiters are replaced with a single
//! space, and the result is split on single spaces. The token count of a line
//! is fixed once tokenized; it selects the first-layer prefix tree group.

/// Split a log line into tokens.
///
/// Splitting is on single spaces, not runs of whitespace, so consecutive
/// spaces produce empty tokens. An empty or all-whitespace line yields one
/// empty token.
pub(crate) fn tokenize(content: &str, extra_delimiters: &[String]) -> Vec<String> {
    let trimmed = content.trim();
    if extra_delimiters.is_empty() {
        return trimmed.split(' ').map(str::to_owned).collect();
    }

    let mut replaced = trimmed.to_owned();
    for delimiter in extra_delimiters {
        replaced = replaced.replace(delimiter.as_str(), " ");
    }
    replaced.split(' ').map(str::to_owned).collect()
}

/// Whether a token contains any numeric character.
///
/// Digit-bearing tokens are treated as variable payloads by the prefix tree
/// and always route through the wildcard child.
pub(crate) fn has_digit(token: &str) -> bool {
    token.chars().any(|c| c.is_numeric())
}
