pub mod config;
pub mod corpus;
pub mod engine;
pub mod error;
pub mod index;
pub mod rank;
pub mod stopwords;
pub mod table;
pub mod tokenizer;

pub use config::{IndexConfig, Strategy};
pub use engine::SearchEngine;
pub use error::{SearchError, TableError};
pub use index::{weighted_frequency, IndexStats, InvertedIndex};
pub use rank::{rank, DocScore};
pub use stopwords::StopWords;
pub use table::{ChainingTable, KeyedTable, LinearProbeTable, QuadraticProbeTable, Table, TableStats};
