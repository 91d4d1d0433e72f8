use std::path::Path;

use crate::error::Result;
use crate::types::{LoadReport, SearchHit};

/// The surface a prompt-building collaborator needs from a knowledge index.
pub trait SearchEngine: Send + Sync {
    /// Rebuild the index from every `.txt` file in `dir`, replacing what was there.
    fn load(&self, dir: &Path) -> Result<LoadReport>;
    fn search(&self, query: &str, k: usize) -> Vec<SearchHit>;
    /// Attributed context block for the top `k` chunks, or `""` when nothing qualifies.
    fn retrieve(&self, query: &str, k: usize) -> String;
    fn is_loaded(&self) -> bool;
}
