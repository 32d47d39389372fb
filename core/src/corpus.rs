//! Filesystem collaborators: the document directory and the stopword file.

use crate::config::Strategy;
use crate::error::{Result, SearchError};
use crate::stopwords::StopWords;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Reads every file directly inside `dir` whose extension is `extension`,
/// returning `(file name, text)` pairs sorted by file name.
pub fn read_documents(dir: &Path, extension: &str) -> Result<Vec<(String, String)>> {
    let mut docs = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| SearchError::Io { path: dir.to_path_buf(), source: e.into() })?;
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().and_then(|s| s.to_str()) != Some(extension) {
            continue;
        }
        let bytes = fs::read(path).map_err(|source| SearchError::Io { path: path.to_path_buf(), source })?;
        let name = entry.file_name().to_string_lossy().into_owned();
        docs.push((name, String::from_utf8_lossy(&bytes).into_owned()));
    }
    tracing::debug!(dir = %dir.display(), documents = docs.len(), "read document directory");
    Ok(docs)
}

/// Loads a whitespace-separated stopword list.
pub fn read_stopwords(path: &Path, strategy: Strategy) -> Result<StopWords> {
    let text = fs::read_to_string(path).map_err(|source| SearchError::Io { path: path.to_path_buf(), source })?;
    Ok(StopWords::parse(strategy, &text))
}
