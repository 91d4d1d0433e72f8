use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};

use policyrag_core::config::{RetrievalSettings, MIN_SCORE, TOP_K};
use policyrag_core::data_processor::DataProcessor;
use policyrag_core::error::Result;
use policyrag_core::traits::SearchEngine;
use policyrag_core::types::{LoadReport, SearchHit};

use crate::index::Corpus;
use crate::search::{format_context, rank};

/// The knowledge index served to concurrent callers.
///
/// Holds the current [`Corpus`] generation behind an `Arc`. Loads build a new
/// generation off to the side and swap it in whole, so a query always sees
/// chunk norms and document frequencies from the same generation. Queries
/// clone the `Arc` and rank without holding the lock.
pub struct KnowledgeBase {
	current: RwLock<Arc<Corpus>>,
	processor: DataProcessor,
	top_k: usize,
	min_score: f64,
}

impl Default for KnowledgeBase {
	fn default() -> Self { Self::new() }
}

impl KnowledgeBase {
	pub fn new() -> Self {
		Self { current: RwLock::new(Arc::new(Corpus::empty())), processor: DataProcessor::new(), top_k: TOP_K, min_score: MIN_SCORE }
	}

	pub fn with_settings(settings: &RetrievalSettings) -> Result<Self> {
		settings.validate()?;
		Ok(Self {
			current: RwLock::new(Arc::new(Corpus::empty())),
			processor: DataProcessor::with_config(settings.chunking())?,
			top_k: settings.top_k,
			min_score: settings.min_score,
		})
	}

	/// Rebuild from `dir` and return the number of chunks now loaded.
	pub fn load_knowledge(&self, dir: &Path) -> Result<usize> {
		Ok(self.load_report(dir)?.chunks)
	}

	/// Rebuild from `dir`, replacing the current generation. A missing
	/// directory replaces it with an empty one.
	pub fn load_report(&self, dir: &Path) -> Result<LoadReport> {
		let processed = self.processor.process_directory(dir)?;
		let corpus = Corpus::build(processed.chunks);
		let report = LoadReport { files: processed.files, skipped: processed.skipped, chunks: corpus.len() };
		info!(dir = %dir.display(), chunks = report.chunks, files = report.files, skipped = report.skipped, "loaded knowledge");
		self.replace(corpus);
		Ok(report)
	}

	/// Swap in a fully built generation, returning the previous one.
	pub fn replace(&self, corpus: Corpus) -> Arc<Corpus> {
		std::mem::replace(&mut *self.current.write(), Arc::new(corpus))
	}

	pub fn snapshot(&self) -> Arc<Corpus> {
		self.current.read().clone()
	}

	pub fn is_loaded(&self) -> bool {
		!self.current.read().is_empty()
	}

	pub fn default_top_k(&self) -> usize { self.top_k }

	pub fn search(&self, query: &str, top_k: usize) -> Vec<SearchHit> {
		let corpus = self.snapshot();
		let hits = rank(&corpus, query, top_k, self.min_score);
		debug!(query, hits = hits.len(), "ranked query");
		hits
	}

	/// Attributed context for the top `top_k` chunks; `""` means no relevant knowledge.
	pub fn retrieve(&self, query: &str, top_k: usize) -> String {
		format_context(&self.search(query, top_k))
	}
}

impl SearchEngine for KnowledgeBase {
	fn load(&self, dir: &Path) -> Result<LoadReport> { self.load_report(dir) }
	fn search(&self, query: &str, k: usize) -> Vec<SearchHit> { Self::search(self, query, k) }
	fn retrieve(&self, query: &str, k: usize) -> String { Self::retrieve(self, query, k) }
	fn is_loaded(&self) -> bool { Self::is_loaded(self) }
}
