//! CLI command definitions and argument parsing

use clap::Parser;
use clap::Subcommand;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "policyrag")]
#[command(about = "Load policy documents and retrieve the passages relevant to a question")]
#[command(version)]
pub struct Cli {
    /// Enable verbose debug logging (default: info level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config environment to load (overrides RUST_ENV)
    #[arg(long, global = true)]
    pub env: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Load a knowledge directory and report what was indexed
    Ingest {
        /// Directory of .txt documents (defaults to retrieval.knowledge_dir)
        dir: Option<PathBuf>,
        /// Words per chunk
        #[arg(long)]
        chunk_size: Option<usize>,
        /// Words between consecutive chunk starts
        #[arg(long)]
        chunk_step: Option<usize>,
    },
    /// Print the attributed context block for a question
    Query {
        /// The question to retrieve knowledge for
        query: String,
        /// Directory of .txt documents (defaults to retrieval.knowledge_dir)
        #[arg(short, long)]
        dir: Option<PathBuf>,
        /// Number of chunks to return
        #[arg(short = 'k', long)]
        top_k: Option<usize>,
        /// Print ranked hits as JSON instead of the context block
        #[arg(long)]
        json: bool,
    },
    /// Show corpus statistics for a knowledge directory
    Stats {
        /// Directory of .txt documents (defaults to retrieval.knowledge_dir)
        dir: Option<PathBuf>,
    },
}
