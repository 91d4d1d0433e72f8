//! policyrag-text
//!
//! In-memory TF-IDF retrieval over chunked knowledge documents. `tokenize`
//! normalises text, `index` builds one immutable corpus generation, `search`
//! ranks and formats, and `knowledge` owns the swappable current generation.
pub mod tokenize;
pub mod index;
pub mod search;
pub mod knowledge;

pub use index::{Chunk, Corpus, DocumentFrequencies};
pub use knowledge::KnowledgeBase;
pub use search::{display_source, format_context, rank};
