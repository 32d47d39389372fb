use crate::config::{IndexConfig, Strategy};
use crate::table::{KeyedTable, Table};

/// A small English list for callers that have no stopword file of their own.
pub const ENGLISH: &[&str] = &[
    "a", "about", "after", "all", "also", "an", "and", "any", "are", "as", "at", "be", "because", "been",
    "but", "by", "can", "could", "did", "do", "does", "for", "from", "had", "has", "have", "he", "her",
    "his", "how", "i", "if", "in", "into", "is", "it", "its", "me", "my", "no", "not", "of", "on", "or",
    "our", "she", "so", "some", "than", "that", "the", "their", "them", "then", "there", "these", "they",
    "this", "to", "was", "we", "were", "what", "when", "which", "who", "will", "with", "would", "you",
    "your",
];

/// Immutable set of lowercase words dropped during tokenization.
#[derive(Debug, Clone)]
pub struct StopWords {
    words: Table<()>,
}

impl Default for StopWords {
    fn default() -> Self {
        Self::empty(Strategy::default())
    }
}

impl StopWords {
    pub fn empty(strategy: Strategy) -> Self {
        Self { words: Table::new(strategy) }
    }

    pub fn from_words<I, S>(strategy: Strategy, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Table::new(strategy);
        for w in words {
            let w = w.as_ref().trim().to_lowercase();
            if !w.is_empty() {
                table.put(w, ());
            }
        }
        Self { words: table }
    }

    /// Parses a whitespace-separated word list, e.g. the contents of a stopword file.
    pub fn parse(strategy: Strategy, text: &str) -> Self {
        Self::from_words(strategy, text.split_whitespace())
    }

    pub fn english(config: &IndexConfig) -> Self {
        Self::from_words(config.strategy, ENGLISH.iter())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.size()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_on_any_whitespace() {
        let sw = StopWords::parse(Strategy::LinearProbing, "the a\nand\tof  ");
        assert_eq!(sw.len(), 4);
        for w in ["the", "a", "and", "of"] {
            assert!(sw.contains(w));
        }
        assert!(!sw.contains(""));
    }

    #[test]
    fn words_are_lowercased() {
        let sw = StopWords::from_words(Strategy::Chaining, ["The", "AND"]);
        assert!(sw.contains("the"));
        assert!(sw.contains("and"));
        assert!(!sw.contains("The"));
    }

    #[test]
    fn duplicates_collapse() {
        let sw = StopWords::parse(Strategy::QuadraticProbing, "the the the");
        assert_eq!(sw.len(), 1);
    }

    #[test]
    fn english_list_loads() {
        let sw = StopWords::english(&IndexConfig::default());
        assert_eq!(sw.len(), ENGLISH.len());
        assert!(sw.contains("the"));
        assert!(!sw.contains("cat"));
    }
}
