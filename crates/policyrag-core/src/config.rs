//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env vars.
//! Nested keys come from env vars with a `__` separator, e.g.
//! `APP_RETRIEVAL__TOP_K=5`. Provides helpers to expand `~` and `${VAR}` and to
//! resolve relative paths against a known base directory.
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::data_processor::ChunkingConfig;
use crate::error::{Error, Result};

/// Words per chunk.
pub const CHUNK_SIZE: usize = 200;
/// Words between consecutive chunk starts; `CHUNK_SIZE - CHUNK_STEP` words overlap.
pub const CHUNK_STEP: usize = 150;
/// Chunks returned per query.
pub const TOP_K: usize = 3;
/// Minimum cosine similarity for a chunk to be returned at all.
pub const MIN_SCORE: f64 = 0.01;

pub struct Config {
    figment: Figment,
    base_dir: PathBuf,
    env_name: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_for_env(&env_name)
    }

    pub fn load_for_env(env_name: &str) -> Result<Self> {
        Self::load_from(Path::new("."), env_name)
    }

    /// Load `config.toml` and the env-specific overlay from `base_dir`.
    /// Missing files are skipped; env vars are merged last.
    pub fn load_from(base_dir: &Path, env_name: &str) -> Result<Self> {
        let mut figment = Figment::new().merge(Toml::file(base_dir.join("config.toml")));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file(base_dir.join("config.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(base_dir.join("config.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(base_dir.join("config.test.toml"))),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self { figment, base_dir: base_dir.to_path_buf(), env_name: env_name.to_string() };
        config.retrieval()?;
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment.extract_inner(key).map_err(|e| Error::Config(Box::new(e)))
    }

    pub fn env_name(&self) -> &str {
        &self.env_name
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// The `[retrieval]` section layered over the built-in defaults, validated.
    pub fn retrieval(&self) -> Result<RetrievalSettings> {
        let settings: RetrievalSettings = Figment::from(Serialized::defaults(RetrievalSettings::default()))
            .merge(self.figment.focus("retrieval"))
            .extract()
            .map_err(|e| Error::Config(Box::new(e)))?;
        settings.validate()?;
        Ok(settings)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalSettings {
    pub knowledge_dir: String,
    pub chunk_size: usize,
    pub chunk_step: usize,
    pub top_k: usize,
    pub min_score: f64,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            knowledge_dir: "knowledge".to_string(),
            chunk_size: CHUNK_SIZE,
            chunk_step: CHUNK_STEP,
            top_k: TOP_K,
            min_score: MIN_SCORE,
        }
    }
}

impl RetrievalSettings {
    pub fn validate(&self) -> Result<()> {
        self.chunking().validate()?;
        if !self.min_score.is_finite() || self.min_score < 0.0 {
            return Err(Error::InvalidConfig(format!("min_score must be a non-negative number, got {}", self.min_score)));
        }
        Ok(())
    }

    pub fn chunking(&self) -> ChunkingConfig {
        ChunkingConfig { chunk_size: self.chunk_size, chunk_step: self.chunk_step }
    }

    pub fn knowledge_path(&self, base: &Path) -> PathBuf {
        resolve_with_base(base, &self.knowledge_dir)
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    // Expand env vars first
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    // Expand ~ at start
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
