use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the keyed tables.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("key not found: {0}")]
    KeyNotFound(String),
}

/// Errors raised while building or querying a search engine.
#[derive(Debug, Error)]
pub enum SearchError {
    /// A query term that no indexed document contains.
    #[error("unknown term: {0}")]
    UnknownTerm(String),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type TableResult<T> = std::result::Result<T, TableError>;

pub type Result<T> = std::result::Result<T, SearchError>;
