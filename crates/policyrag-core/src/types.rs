//! Domain types shared by the loader, the ranker and their callers.

use serde::{Deserialize, Serialize};

/// A window of words cut from one knowledge document, before weighting.
///
/// - `source`: file stem of the originating document, used for attribution
/// - `doc_path`: original path to the source file
/// - `chunk_index`: position of the window within its document
/// - `text`: the window's words joined by single spaces
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawChunk {
    pub source: String,
    pub doc_path: String,
    pub chunk_index: usize,
    pub text: String,
}

/// One ranked chunk returned by a query.
///
/// `position` is the chunk's index in the loaded corpus. `score` is the
/// cosine similarity against the query; higher is always better.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub position: usize,
    pub source: String,
    pub text: String,
    pub score: f64,
}

/// Outcome of loading a knowledge directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    /// Files read and chunked.
    pub files: usize,
    /// Files that could not be read and were left out.
    pub skipped: usize,
    pub chunks: usize,
}
