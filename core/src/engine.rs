use crate::config::IndexConfig;
use crate::corpus::read_documents;
use crate::error::Result;
use crate::index::{IndexStats, InvertedIndex};
use crate::rank::{rank, DocScore};
use crate::stopwords::StopWords;
use crate::tokenizer::tokenize;
use std::path::Path;

/// Tokenizer, index and ranker wired together for one document set.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    stopwords: StopWords,
    index: InvertedIndex,
}

impl SearchEngine {
    /// Builds an engine over `(name, raw text)` pairs.
    pub fn new<I, N, T>(config: IndexConfig, stopwords: StopWords, documents: I) -> Self
    where
        I: IntoIterator<Item = (N, T)>,
        N: Into<String>,
        T: AsRef<str>,
    {
        let tokenized = documents.into_iter().map(|(name, text)| {
            let name: String = name.into();
            (name, tokenize(text.as_ref(), &stopwords))
        });
        let index = InvertedIndex::build(config, &stopwords, tokenized);
        Self { stopwords, index }
    }

    /// Builds an engine over the files in `dir` carrying the configured extension.
    pub fn from_directory(config: IndexConfig, stopwords: StopWords, dir: &Path) -> Result<Self> {
        let documents = read_documents(dir, &config.extension)?;
        Ok(Self::new(config, stopwords, documents))
    }

    /// Ranked documents for a free-text query. A query made only of
    /// stopwords or whitespace matches nothing.
    pub fn search(&self, query: &str) -> Result<Vec<DocScore>> {
        let terms = tokenize(query, &self.stopwords);
        let scores = self.index.scores_for(&terms)?;
        tracing::debug!(query, terms = terms.len(), hits = scores.len(), "search");
        Ok(rank(scores))
    }

    pub fn stopwords(&self) -> &StopWords {
        &self.stopwords
    }

    pub fn stats(&self) -> IndexStats {
        self.index.stats()
    }
}
