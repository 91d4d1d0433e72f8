use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::info;

use policyrag_core::config::RetrievalSettings;
use policyrag_text::{display_source, KnowledgeBase};

use crate::cli::Commands;

/// Run one subcommand, writing results to `out`. A relative
/// `retrieval.knowledge_dir` is resolved against `base_dir`.
pub fn execute(command: &Commands, settings: &RetrievalSettings, base_dir: &Path, out: &mut dyn Write) -> Result<()> {
    match command {
        Commands::Ingest { dir, chunk_size, chunk_step } => {
            let mut settings = settings.clone();
            if let Some(size) = chunk_size { settings.chunk_size = *size; }
            if let Some(step) = chunk_step { settings.chunk_step = *step; }
            let kb = KnowledgeBase::with_settings(&settings)?;
            let dir = knowledge_dir(dir.as_deref(), &settings, base_dir);
            let report = kb.load_report(&dir)?;
            writeln!(out, "Knowledge directory: {}", dir.display())?;
            writeln!(out, "Files loaded : {}", report.files)?;
            writeln!(out, "Files skipped: {}", report.skipped)?;
            writeln!(out, "Chunks       : {}", report.chunks)?;
        }
        Commands::Query { query, dir, top_k, json } => {
            let kb = KnowledgeBase::with_settings(settings)?;
            kb.load_knowledge(&knowledge_dir(dir.as_deref(), settings, base_dir))?;
            let top_k = top_k.unwrap_or_else(|| kb.default_top_k());
            if *json {
                writeln!(out, "{}", serde_json::to_string_pretty(&kb.search(query, top_k))?)?;
            } else {
                let context = kb.retrieve(query, top_k);
                if context.is_empty() {
                    info!(query = %query, "no relevant knowledge found");
                    eprintln!("No relevant knowledge found.");
                } else {
                    writeln!(out, "{context}")?;
                }
            }
        }
        Commands::Stats { dir } => {
            let kb = KnowledgeBase::with_settings(settings)?;
            let dir = knowledge_dir(dir.as_deref(), settings, base_dir);
            kb.load_knowledge(&dir)?;
            let corpus = kb.snapshot();
            let mut per_source: BTreeMap<&str, usize> = BTreeMap::new();
            for chunk in corpus.chunks() { *per_source.entry(chunk.source.as_str()).or_insert(0) += 1; }
            writeln!(out, "Knowledge directory: {}", dir.display())?;
            writeln!(out, "Chunks    : {}", corpus.len())?;
            writeln!(out, "Vocabulary: {}", corpus.frequencies().vocabulary_size())?;
            for (source, count) in per_source {
                writeln!(out, "  {:<32} {} chunks", display_source(source), count)?;
            }
        }
    }
    Ok(())
}

fn knowledge_dir(dir: Option<&Path>, settings: &RetrievalSettings, base_dir: &Path) -> PathBuf {
    dir.map_or_else(|| settings.knowledge_path(base_dir), Path::to_path_buf)
}
