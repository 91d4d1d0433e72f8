//! Knowledge directory loader: reads `.txt` documents and cuts them into
//! overlapping word windows.
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::{CHUNK_SIZE, CHUNK_STEP};
use crate::error::{Error, Result};
use crate::types::RawChunk;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkingConfig {
    pub chunk_size: usize,
    pub chunk_step: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self { chunk_size: CHUNK_SIZE, chunk_step: CHUNK_STEP }
    }
}

impl ChunkingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 || self.chunk_step == 0 {
            return Err(Error::InvalidConfig(format!(
                "chunk_size and chunk_step must be positive (got {} / {})",
                self.chunk_size, self.chunk_step
            )));
        }
        if self.chunk_step > self.chunk_size {
            return Err(Error::InvalidConfig(format!(
                "chunk_step ({}) larger than chunk_size ({}) would drop words between chunks",
                self.chunk_step, self.chunk_size
            )));
        }
        Ok(())
    }

    /// Start offsets of every window over a document of `word_count` words.
    ///
    /// Starts run `0, step, 2*step, ...` strictly below `max(1, word_count - size + 1)`,
    /// so a document shorter than one window still gets a single start.
    pub fn window_starts(&self, word_count: usize) -> impl Iterator<Item = usize> {
        let limit = if word_count == 0 { 0 } else { (word_count + 1).saturating_sub(self.chunk_size).max(1) };
        (0..limit).step_by(self.chunk_step.max(1))
    }
}

/// Chunks produced from a knowledge directory plus per-file bookkeeping.
#[derive(Debug, Default)]
pub struct ProcessedCorpus {
    pub chunks: Vec<RawChunk>,
    pub files: usize,
    pub skipped: usize,
}

#[derive(Debug, Default)]
pub struct DataProcessor {
    chunking_config: ChunkingConfig,
}

impl DataProcessor {
    pub fn new() -> Self { Self::default() }

    pub fn with_config(chunking_config: ChunkingConfig) -> Result<Self> {
        chunking_config.validate()?;
        Ok(Self { chunking_config })
    }

    pub fn chunking_config(&self) -> ChunkingConfig { self.chunking_config }

    /// Chunk every `.txt` file directly inside `data_dir`, in sorted order.
    ///
    /// A missing directory is not an error: it logs a warning and yields nothing.
    /// Files that fail to read are logged, counted in `skipped` and left out.
    pub fn process_directory(&self, data_dir: &Path) -> Result<ProcessedCorpus> {
        if !data_dir.is_dir() {
            warn!(dir = %data_dir.display(), "knowledge directory not found; starting with an empty corpus");
            return Ok(ProcessedCorpus::default());
        }
        let (files, unlisted) = self.list_txt_files(data_dir)?;
        let mut corpus = ProcessedCorpus { skipped: unlisted, ..ProcessedCorpus::default() };
        if files.is_empty() {
            info!(dir = %data_dir.display(), "no .txt files found");
            return Ok(corpus);
        }
        for (file_index, file_path) in files.iter().enumerate() {
            debug!("Processing file {}/{}: {}", file_index + 1, files.len(), file_path.display());
            match read_file_content(file_path) {
                Ok(content) => {
                    let source = extract_doc_id(file_path);
                    let chunks = self.chunk_document(&content, &source, &file_path.to_string_lossy());
                    debug!(source = %source, chunks = chunks.len(), "chunked document");
                    corpus.chunks.extend(chunks);
                    corpus.files += 1;
                }
                Err(e) => {
                    warn!(error = %e, "skipping unreadable knowledge file");
                    corpus.skipped += 1;
                }
            }
        }
        info!("Processed {} files into {} chunks ({} skipped)", corpus.files, corpus.chunks.len(), corpus.skipped);
        Ok(corpus)
    }

    /// Split one document into overlapping word windows. Empty documents yield none.
    pub fn chunk_document(&self, content: &str, source: &str, doc_path: &str) -> Vec<RawChunk> {
        let words: Vec<&str> = content.split_whitespace().collect();
        self.chunking_config
            .window_starts(words.len())
            .enumerate()
            .map(|(chunk_index, start)| {
                let end = (start + self.chunking_config.chunk_size).min(words.len());
                RawChunk {
                    source: source.to_string(),
                    doc_path: doc_path.to_string(),
                    chunk_index,
                    text: words[start..end].join(" "),
                }
            })
            .collect()
    }

    /// Top-level `.txt` files under `root`, sorted, plus the number of `.txt`
    /// entries that could not be inspected (e.g. dangling symlinks).
    fn list_txt_files(&self, root: &Path) -> Result<(Vec<PathBuf>, usize)> {
        let mut txt_files = Vec::new();
        let mut unlisted = 0;
        for entry in walkdir::WalkDir::new(root).min_depth(1).max_depth(1).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => return Err(Error::Walk(e)),
                Err(e) => {
                    warn!(error = %e, "skipping unlistable entry");
                    if e.path().and_then(Path::extension).and_then(|s| s.to_str()) == Some("txt") { unlisted += 1; }
                    continue;
                }
            };
            let path = entry.path();
            if entry.file_type().is_file() && path.extension().and_then(|s| s.to_str()) == Some("txt") {
                txt_files.push(path.to_path_buf());
            }
        }
        txt_files.sort();
        Ok((txt_files, unlisted))
    }
}

/// Decode as UTF-8, dropping invalid byte sequences rather than failing.
pub fn decode_discarding_invalid(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

fn read_file_content(file_path: &Path) -> Result<String> {
    let bytes = fs::read(file_path).map_err(|source| Error::Io { path: file_path.to_path_buf(), source })?;
    Ok(decode_discarding_invalid(&bytes))
}

fn extract_doc_id(file_path: &Path) -> String {
    file_path.file_stem().map(|s| s.to_string_lossy().to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        (0..n).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ")
    }

    fn expected_count(len: usize, size: usize, step: usize) -> usize {
        if len == 0 { return 0; }
        let span = (len + 1).saturating_sub(size).max(1);
        span.div_ceil(step)
    }

    #[test]
    fn chunk_count_matches_window_formula() {
        let processor = DataProcessor::new();
        for len in [1, 2, 149, 150, 199, 200, 201, 349, 350, 351, 500, 1234] {
            let chunks = processor.chunk_document(&words(len), "doc", "doc.txt");
            assert_eq!(chunks.len(), expected_count(len, CHUNK_SIZE, CHUNK_STEP), "len={len}");
        }
    }

    #[test]
    fn exact_window_yields_one_chunk() {
        let chunks = DataProcessor::new().chunk_document(&words(CHUNK_SIZE), "doc", "doc.txt");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text.split(' ').count(), CHUNK_SIZE);
    }

    #[test]
    fn empty_and_blank_documents_yield_nothing() {
        let processor = DataProcessor::new();
        assert!(processor.chunk_document("", "doc", "doc.txt").is_empty());
        assert!(processor.chunk_document("  \n\t ", "doc", "doc.txt").is_empty());
    }

    #[test]
    fn consecutive_chunks_overlap() {
        let chunks = DataProcessor::new().chunk_document(&words(500), "doc", "doc.txt");
        assert_eq!(chunks.len(), 3);
        assert!(chunks[0].text.starts_with("w0 "));
        assert!(chunks[1].text.starts_with("w150 "));
        assert!(chunks[2].text.starts_with("w300 "));
        assert!(chunks[2].text.ends_with(" w499"));
        let first: Vec<&str> = chunks[0].text.split(' ').collect();
        let second: Vec<&str> = chunks[1].text.split(' ').collect();
        assert_eq!(&first[150..], &second[..50], "50 words shared between neighbours");
        assert_eq!(chunks.iter().map(|c| c.chunk_index).collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn whitespace_is_normalised() {
        let chunks = DataProcessor::new().chunk_document("  Students\tmust\n\nattend  ", "a", "a.txt");
        assert_eq!(chunks[0].text, "Students must attend");
    }

    #[test]
    fn invalid_utf8_bytes_are_dropped() {
        assert_eq!(decode_discarding_invalid(b"ab\xffcd \xe2\x82 ok"), "abcd  ok");
    }

    #[test]
    fn chunking_validation() {
        assert!(ChunkingConfig::default().validate().is_ok());
        assert!(ChunkingConfig { chunk_size: 0, chunk_step: 1 }.validate().is_err());
        assert!(ChunkingConfig { chunk_size: 10, chunk_step: 0 }.validate().is_err());
        assert!(ChunkingConfig { chunk_size: 10, chunk_step: 11 }.validate().is_err());
        assert!(DataProcessor::with_config(ChunkingConfig { chunk_size: 4, chunk_step: 2 }).is_ok());
    }
}
