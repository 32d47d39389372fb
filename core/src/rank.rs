use serde::{Deserialize, Serialize};

/// Relevance score of one document for one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocScore {
    pub document: String,
    pub score: f64,
}

impl DocScore {
    pub fn new(document: impl Into<String>, score: f64) -> Self {
        Self { document: document.into(), score }
    }
}

/// Orders scores from most to least relevant.
///
/// The sort is stable, so documents with equal scores keep the order they
/// arrived in (index order when fed from [`crate::InvertedIndex::scores_for`]).
pub fn rank(mut scores: Vec<DocScore>) -> Vec<DocScore> {
    scores.sort_by(|a, b| b.score.total_cmp(&a.score));
    scores
}
