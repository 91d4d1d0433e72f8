use std::env;
use std::path::{Path, PathBuf};

// Load a knowledge directory and print the context block for a query.
// Usage:
//   cargo run -p policyrag-text --example retrieve -- "your query" [--dir test_data/knowledge] [--top-k 3]
// Notes:
//   - The directory defaults to the workspace fixtures so you can run from anywhere.

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("Usage: cargo run -p policyrag-text --example retrieve -- <query> [--dir DIR] [--top-k N]");
        std::process::exit(1);
    }
    let mut query = String::new();
    let mut data_dir: Option<PathBuf> = None;
    let mut top_k: usize = policyrag_core::config::TOP_K;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--dir" => {
                if i + 1 >= args.len() { eprintln!("--dir requires a path"); std::process::exit(2); }
                data_dir = Some(PathBuf::from(&args[i + 1]));
                i += 2; continue;
            }
            "--top-k" => {
                if i + 1 >= args.len() { eprintln!("--top-k requires a number"); std::process::exit(2); }
                top_k = args[i + 1].parse()?;
                i += 2; continue;
            }
            s if s.starts_with('-') => {
                eprintln!("Unknown flag: {}", s); std::process::exit(2);
            }
            s => {
                if !query.is_empty() { query.push(' '); }
                query.push_str(s);
                i += 1;
            }
        }
    }

    let ws_root = Path::new(env!("CARGO_MANIFEST_DIR")).ancestors().nth(2).unwrap_or(Path::new("."));
    let data_dir = data_dir.unwrap_or_else(|| ws_root.join("test_data/knowledge"));

    let kb = policyrag_text::KnowledgeBase::new();
    let chunks = kb.load_knowledge(&data_dir)?;
    println!("Loaded {} chunks from {}", chunks, data_dir.display());
    println!("Query: {}\n", query);

    for hit in kb.search(&query, top_k) {
        println!("  score={:.4}  chunk={}  source={}", hit.score, hit.position, hit.source);
    }
    let context = kb.retrieve(&query, top_k);
    if context.is_empty() { println!("\n(no relevant knowledge)"); } else { println!("\n{}", context); }
    Ok(())
}
