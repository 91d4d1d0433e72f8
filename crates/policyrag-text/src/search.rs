use policyrag_core::types::SearchHit;

use crate::index::Corpus;
use crate::tokenize::term_frequencies;

/// Rank every chunk of `corpus` against `query` by TF-IDF cosine similarity.
///
/// Both sides of the dot product are weighted by the same IDF, so a shared
/// term contributes `q_tf * idf * chunk_tf * idf`. Chunks sharing no term
/// with the query, or scoring below `min_score`, never compete. Ties keep
/// corpus order.
pub fn rank(corpus: &Corpus, query: &str, top_k: usize, min_score: f64) -> Vec<SearchHit> {
	if corpus.is_empty() || top_k == 0 { return Vec::new(); }
	let query_tf = term_frequencies(query);
	if query_tf.is_empty() { return Vec::new(); }

	let df = corpus.frequencies();
	let weights: Vec<(&str, f64, f64)> = query_tf.iter().map(|(term, &count)| (term.as_str(), f64::from(count), df.idf(term))).collect();
	let query_norm = df.norm(&query_tf);

	let mut scored: Vec<(usize, f64)> = Vec::new();
	for (position, chunk) in corpus.chunks().iter().enumerate() {
		let mut dot = 0.0;
		for &(term, q_count, idf) in &weights {
			if let Some(&c_count) = chunk.term_frequencies.get(term) { dot += q_count * idf * f64::from(c_count) * idf; }
		}
		if dot == 0.0 { continue; }
		let score = dot / (query_norm * chunk.norm);
		if score >= min_score { scored.push((position, score)); }
	}

	// stable: equal scores stay in corpus order
	scored.sort_by(|a, b| b.1.total_cmp(&a.1));
	scored.truncate(top_k);
	scored
		.into_iter()
		.map(|(position, score)| {
			let chunk = &corpus.chunks()[position];
			SearchHit { position, source: chunk.source.clone(), text: chunk.text.clone(), score }
		})
		.collect()
}

/// Render hits as attributed blocks separated by blank lines; `""` when there are none.
pub fn format_context(hits: &[SearchHit]) -> String {
	hits.iter()
		.map(|hit| format!("[Source: {}]\n{}", display_source(&hit.source), hit.text))
		.collect::<Vec<_>>()
		.join("\n\n")
}

/// `attendance_policy` -> `Attendance Policy`.
///
/// Underscores become spaces; the first letter of every run of letters is
/// uppercased and the rest lowercased.
pub fn display_source(source: &str) -> String {
	let mut out = String::with_capacity(source.len());
	let mut in_word = false;
	for c in source.chars() {
		let c = if c == '_' { ' ' } else { c };
		if c.is_alphabetic() {
			if in_word { out.extend(c.to_lowercase()); } else { out.extend(c.to_uppercase()); }
			in_word = true;
		} else {
			out.push(c);
			in_word = false;
		}
	}
	out
}

#[cfg(test)]
mod tests {
	use super::*;
	use policyrag_core::config::MIN_SCORE;
	use policyrag_core::types::RawChunk;

	fn corpus(docs: &[(&str, &str)]) -> Corpus {
		Corpus::build(
			docs.iter()
				.enumerate()
				.map(|(i, (source, text))| RawChunk { source: source.to_string(), doc_path: format!("{source}.txt"), chunk_index: i, text: text.to_string() })
				.collect(),
		)
	}

	#[test]
	fn empty_corpus_and_empty_query_yield_nothing() {
		assert!(rank(&Corpus::empty(), "attendance", 3, MIN_SCORE).is_empty());
		let c = corpus(&[("rules", "attendance is mandatory")]);
		assert!(rank(&c, "", 3, MIN_SCORE).is_empty());
		assert!(rank(&c, "the of and ?!", 3, MIN_SCORE).is_empty());
		assert!(rank(&c, "attendance", 0, MIN_SCORE).is_empty());
	}

	#[test]
	fn chunks_without_shared_terms_never_qualify() {
		let c = corpus(&[("a", "library opens early"), ("b", "hostel curfew rules")]);
		let hits = rank(&c, "library", 3, 0.0);
		assert_eq!(hits.len(), 1, "zero dot product is skipped even with a zero threshold");
		assert_eq!(hits[0].source, "a");
	}

	#[test]
	fn score_matches_idf_squared_cosine() {
		let c = corpus(&[("a", "exam exam fees"), ("b", "fees refund")]);
		let df = c.frequencies();
		let (exam, fees) = (df.idf("exam"), df.idf("fees"));
		let dot = exam * 2.0 * exam + fees * fees;
		let q_norm = (exam.powi(2) + fees.powi(2)).sqrt();
		let expected = dot / (q_norm * c.chunks()[0].norm);

		let hits = rank(&c, "exam fees", 1, MIN_SCORE);
		assert_eq!(hits[0].position, 0);
		assert!((hits[0].score - expected).abs() < 1e-12);
	}

	#[test]
	fn higher_term_frequency_scores_at_least_as_high() {
		let c = corpus(&[("low", "scholarship deadline notice"), ("high", "scholarship scholarship deadline notice")]);
		let hits = rank(&c, "scholarship", 2, MIN_SCORE);
		assert_eq!(hits.len(), 2);
		assert_eq!(hits[0].source, "high");
		assert!(hits[0].score >= hits[1].score);
	}

	#[test]
	fn ties_keep_corpus_order() {
		let c = corpus(&[("first", "canteen menu"), ("second", "canteen menu"), ("third", "canteen menu")]);
		let positions: Vec<usize> = rank(&c, "canteen", 3, MIN_SCORE).iter().map(|h| h.position).collect();
		assert_eq!(positions, vec![0, 1, 2]);
	}

	#[test]
	fn threshold_excludes_weak_matches() {
		let c = corpus(&[("a", "exam"), ("b", "exam grading moderation revaluation transcripts convocation")]);
		let all = rank(&c, "exam", 5, 0.0);
		assert_eq!(all.len(), 2);
		let strict = rank(&c, "exam", 5, all[1].score + 1e-9);
		assert_eq!(strict.len(), 1);
		assert_eq!(strict[0].source, "a");
	}

	#[test]
	fn top_k_truncates() {
		let c = corpus(&[("a", "lab safety"), ("b", "lab safety goggles"), ("c", "lab coats"), ("d", "lab hours")]);
		assert_eq!(rank(&c, "lab", 2, MIN_SCORE).len(), 2);
	}

	#[test]
	fn format_context_attributes_each_block() {
		let hits = vec![
			SearchHit { position: 0, source: "attendance_policy".into(), text: "Keep 75 percent.".into(), score: 0.9 },
			SearchHit { position: 3, source: "exam_rules".into(), text: "No phones.".into(), score: 0.5 },
		];
		assert_eq!(
			format_context(&hits),
			"[Source: Attendance Policy]\nKeep 75 percent.\n\n[Source: Exam Rules]\nNo phones."
		);
		assert_eq!(format_context(&[]), "");
	}

	#[test]
	fn display_source_title_cases() {
		assert_eq!(display_source("attendance_policy"), "Attendance Policy");
		assert_eq!(display_source("FEE_STRUCTURE_2024"), "Fee Structure 2024");
		assert_eq!(display_source("2nd_sem"), "2Nd Sem");
		assert_eq!(display_source("hostel-rules"), "Hostel-Rules");
	}
}
