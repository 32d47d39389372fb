use crate::stopwords::StopWords;

/// Lowercases `text`, splits on whitespace and drops stopwords.
///
/// Documents and queries go through the same function so their terms line up.
pub fn tokenize(text: &str, stopwords: &StopWords) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .filter(|w| !stopwords.contains(w))
        .map(str::to_owned)
        .collect()
}
