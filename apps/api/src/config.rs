use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::editor::markers::{Delimiters, DEFAULT_CLOSE, DEFAULT_OPEN};
use crate::editor::session::EditorSettings;
use crate::matching::Stopwords;

/// Application configuration loaded from environment variables.
/// Every variable has a default; startup fails only on malformed values.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Enables the LLM letter backend when set.
    pub anthropic_api_key: Option<String>,
    pub field_count: usize,
    pub field_max_chars: usize,
    pub delimiters: Delimiters,
    pub stopwords_file: Option<PathBuf>,
    pub fetch_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. `from_env` passes the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = parse_or(&get, "PORT", 8080u16)?;
        let field_count = parse_or(&get, "FIELD_COUNT", 10usize)?;
        let field_max_chars = parse_or(&get, "FIELD_MAX_CHARS", 20usize)?;
        let fetch_timeout_secs = parse_or(&get, "FETCH_TIMEOUT_SECS", 15u64)?;
        if field_count == 0 {
            bail!("FIELD_COUNT must be at least 1");
        }
        if fetch_timeout_secs == 0 {
            bail!("FETCH_TIMEOUT_SECS must be at least 1");
        }

        let delimiters = Delimiters::new(
            lookup("MARKER_OPEN").unwrap_or_else(|| DEFAULT_OPEN.to_string()),
            lookup("MARKER_CLOSE").unwrap_or_else(|| DEFAULT_CLOSE.to_string()),
        )
        .map_err(anyhow::Error::msg)
        .context("MARKER_OPEN / MARKER_CLOSE are invalid")?;

        Ok(Config {
            port,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            anthropic_api_key: get("ANTHROPIC_API_KEY"),
            field_count,
            field_max_chars,
            delimiters,
            stopwords_file: get("STOPWORDS_FILE").map(PathBuf::from),
            fetch_timeout_secs,
        })
    }

    /// The English pack, or the pack in `STOPWORDS_FILE` when set.
    pub fn load_stopwords(&self) -> Result<Stopwords> {
        match &self.stopwords_file {
            None => Ok(Stopwords::english()),
            Some(path) => {
                let pack = std::fs::read_to_string(path).with_context(|| {
                    format!("Failed to read STOPWORDS_FILE '{}'", path.display())
                })?;
                Ok(Stopwords::parse(&pack))
            }
        }
    }

    pub fn editor_settings(&self) -> EditorSettings {
        EditorSettings {
            field_count: self.field_count,
            field_max_chars: self.field_max_chars,
            delimiters: self.delimiters.clone(),
        }
    }
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
    }
}
