use std::io::Write;

use anyhow::Context;
use clap::Parser;

use policyrag_cli::cli::Cli;
use policyrag_cli::{commands, logging};
use policyrag_core::config::Config;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let config = match cli.env.as_deref() {
        Some(env) => Config::load_for_env(env),
        None => Config::load(),
    }
    .context("Error loading config")?;
    let settings = config.retrieval()?;
    tracing::debug!(env = config.env_name(), ?settings, "resolved retrieval settings");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    commands::execute(&cli.command, &settings, config.base_dir(), &mut out)?;
    out.flush()?;
    Ok(())
}
