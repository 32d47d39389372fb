use crate::config::IndexConfig;
use crate::error::{Result, SearchError};
use crate::rank::DocScore;
use crate::stopwords::StopWords;
use crate::table::{KeyedTable, Table, TableStats};
use serde::Serialize;

/// Log-dampened term frequency: `1 + ln(count)`, or 0 for a zero count.
pub fn weighted_frequency(count: u32) -> f64 {
    if count > 0 {
        1.0 + f64::from(count).ln()
    } else {
        0.0
    }
}

/// Term -> document -> raw count, plus each document's length in non-stopword tokens.
///
/// Built once from a document set and read-only afterwards.
#[derive(Debug, Clone)]
pub struct InvertedIndex {
    config: IndexConfig,
    term_freqs: Table<Table<u32>>,
    doc_length: Table<u32>,
    /// Document names in the order they were first indexed.
    documents: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexStats {
    pub documents: usize,
    pub terms: usize,
    pub term_table: TableStats,
    pub doc_length_table: TableStats,
}

impl InvertedIndex {
    /// Indexes `documents`, each a name with its tokens. Tokens found in
    /// `stopwords` are skipped. A name seen twice accumulates into one document.
    pub fn build<I, N>(config: IndexConfig, stopwords: &StopWords, documents: I) -> Self
    where
        I: IntoIterator<Item = (N, Vec<String>)>,
        N: Into<String>,
    {
        let mut index = Self {
            term_freqs: Table::with_capacity(config.strategy, config.initial_capacity),
            doc_length: Table::with_capacity(config.strategy, config.initial_capacity),
            documents: Vec::new(),
            config,
        };
        for (name, tokens) in documents {
            index.add_document(name.into(), tokens, stopwords);
        }
        tracing::info!(
            strategy = %index.config.strategy,
            documents = index.documents.len(),
            terms = index.term_freqs.size(),
            "index built"
        );
        index
    }

    fn new_table<V>(&self) -> Table<V> {
        Table::with_capacity(self.config.strategy, self.config.initial_capacity)
    }

    fn add_document(&mut self, name: String, tokens: Vec<String>, stopwords: &StopWords) {
        let mut length = 0u32;
        for token in tokens {
            if stopwords.contains(&token) {
                continue;
            }
            length += 1;
            match self.term_freqs.get_mut(&token) {
                Ok(postings) => increment(postings, &name),
                Err(_) => {
                    let mut postings = self.new_table();
                    postings.put(name.clone(), 1);
                    self.term_freqs.put(token, postings);
                }
            }
        }
        tracing::debug!(document = %name, length, "indexed document");
        match self.doc_length.get_mut(&name) {
            Ok(total) => *total += length,
            Err(_) => {
                self.doc_length.put(name.clone(), length);
                self.documents.push(name);
            }
        }
    }

    /// Sums `weighted_frequency(count) / doc_length` over `terms` for every
    /// document containing at least one of them. Results come back in index
    /// order. Fails on the first term that was never indexed, before any
    /// score is accumulated.
    pub fn scores_for<S: AsRef<str>>(&self, terms: &[S]) -> Result<Vec<DocScore>> {
        if let Some(unknown) = terms.iter().map(|t| t.as_ref()).find(|t| !self.term_freqs.contains(t)) {
            return Err(SearchError::UnknownTerm(unknown.to_owned()));
        }
        let mut totals: Table<f64> = self.new_table();
        for term in terms {
            let postings = self.term_freqs.get(term.as_ref())?;
            for (document, &count) in postings.iter() {
                let length = *self.doc_length.get(document)?;
                let weight = weighted_frequency(count) / f64::from(length);
                match totals.get_mut(document) {
                    Ok(total) => *total += weight,
                    Err(_) => totals.put(document.to_owned(), weight),
                }
            }
        }
        Ok(self
            .documents
            .iter()
            .filter_map(|d| totals.get(d).ok().map(|&score| DocScore::new(d.clone(), score)))
            .collect())
    }

    /// Raw count of `term` in `document`; 0 when either is absent.
    pub fn term_frequency(&self, term: &str, document: &str) -> u32 {
        self.term_freqs.get(term).and_then(|p| p.get(document)).copied().unwrap_or(0)
    }

    pub fn doc_length(&self, document: &str) -> Result<u32> {
        Ok(*self.doc_length.get(document)?)
    }

    pub fn contains_term(&self, term: &str) -> bool {
        self.term_freqs.contains(term)
    }

    pub fn documents(&self) -> &[String] {
        &self.documents
    }

    pub fn num_documents(&self) -> usize {
        self.documents.len()
    }

    pub fn num_terms(&self) -> usize {
        self.term_freqs.size()
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            documents: self.num_documents(),
            terms: self.num_terms(),
            term_table: self.term_freqs.stats(),
            doc_length_table: self.doc_length.stats(),
        }
    }
}

fn increment(postings: &mut Table<u32>, document: &str) {
    match postings.get_mut(document) {
        Ok(count) => *count += 1,
        Err(_) => postings.put(document.to_owned(), 1),
    }
}
