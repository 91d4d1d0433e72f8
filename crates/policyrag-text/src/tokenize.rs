//! Tokenizer shared by index build and query time.

use std::collections::BTreeMap;

/// Common English function words, kept sorted for `binary_search`.
pub const STOP_WORDS: &[&str] = &[
    "a", "about", "an", "and", "are", "as", "at", "be", "been", "being", "but", "by", "can", "could",
    "did", "do", "does", "for", "from", "had", "has", "have", "he", "her", "his", "i", "in", "into",
    "is", "it", "its", "may", "might", "no", "not", "of", "on", "or", "our", "shall", "she", "should",
    "that", "the", "their", "these", "they", "this", "those", "to", "was", "we", "were", "will", "with",
    "would", "you", "your",
];

pub type TermFrequencies = BTreeMap<String, u32>;

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.binary_search(&token).is_ok()
}

/// Lowercase, split on anything that is not an ASCII letter or digit, then
/// drop single-character tokens and stop words.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_ascii_lowercase() || c.is_ascii_digit()))
        .filter(|t| t.len() > 1 && !is_stop_word(t))
        .map(str::to_string)
        .collect()
}

pub fn term_frequencies(text: &str) -> TermFrequencies {
    let mut tf = TermFrequencies::new();
    for token in tokenize(text) {
        *tf.entry(token).or_insert(0) += 1;
    }
    tf
}
