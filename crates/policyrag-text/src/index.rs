use std::collections::HashMap;

use policyrag_core::types::RawChunk;

use crate::tokenize::{term_frequencies, TermFrequencies};

/// Number of chunks containing each term, plus the total chunk count.
///
/// Built once per corpus generation and never updated in place.
#[derive(Debug, Clone, Default)]
pub struct DocumentFrequencies {
	counts: HashMap<String, u32>,
	total: usize,
}

impl DocumentFrequencies {
	pub fn build<'a>(tables: impl IntoIterator<Item = &'a TermFrequencies>) -> Self {
		let mut counts: HashMap<String, u32> = HashMap::new();
		let mut total = 0;
		for tf in tables {
			total += 1;
			for term in tf.keys() { *counts.entry(term.clone()).or_insert(0) += 1; }
		}
		Self { counts, total }
	}

	pub fn total_chunks(&self) -> usize { self.total }

	pub fn vocabulary_size(&self) -> usize { self.counts.len() }

	pub fn doc_freq(&self, term: &str) -> u32 { self.counts.get(term).copied().unwrap_or(0) }

	/// Smoothed IDF: `ln((n + 1) / (df + 1)) + 1`. Unknown terms get the maximum weight.
	pub fn idf(&self, term: &str) -> f64 {
		#[allow(clippy::cast_precision_loss)]
		let n = self.total as f64;
		((n + 1.0) / (f64::from(self.doc_freq(term)) + 1.0)).ln() + 1.0
	}

	/// L2 norm of the TF-IDF vector for `tf`, floored to 1.0 when it would be zero.
	pub fn norm(&self, tf: &TermFrequencies) -> f64 {
		let norm = tf.iter().map(|(term, &count)| (f64::from(count) * self.idf(term)).powi(2)).sum::<f64>().sqrt();
		if norm == 0.0 { 1.0 } else { norm }
	}
}

/// One retrievable unit: a word window with its weighting precomputed.
#[derive(Debug, Clone)]
pub struct Chunk {
	pub text: String,
	pub source: String,
	pub term_frequencies: TermFrequencies,
	pub norm: f64,
}

/// One immutable index generation: every chunk plus the frequency table
/// their norms were computed against.
#[derive(Debug, Default)]
pub struct Corpus {
	chunks: Vec<Chunk>,
	frequencies: DocumentFrequencies,
}

impl Corpus {
	pub fn empty() -> Self { Self::default() }

	pub fn build(raw_chunks: Vec<RawChunk>) -> Self {
		let tables: Vec<TermFrequencies> = raw_chunks.iter().map(|c| term_frequencies(&c.text)).collect();
		let frequencies = DocumentFrequencies::build(&tables);
		let chunks = raw_chunks
			.into_iter()
			.zip(tables)
			.map(|(raw, tf)| {
				let norm = frequencies.norm(&tf);
				Chunk { text: raw.text, source: raw.source, term_frequencies: tf, norm }
			})
			.collect();
		Self { chunks, frequencies }
	}

	pub fn chunks(&self) -> &[Chunk] { &self.chunks }

	pub fn frequencies(&self) -> &DocumentFrequencies { &self.frequencies }

	pub fn len(&self) -> usize { self.chunks.len() }

	pub fn is_empty(&self) -> bool { self.chunks.is_empty() }
}
