// src/config/settings.rs
//! Process settings resolved from the environment (after `.env` is loaded).

use std::path::PathBuf;

// --- env defaults & names ---
pub const DEFAULT_LEXICON_CONFIG_PATH: &str = "config/lexicon.toml";
pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:8501,http://localhost:3000";
pub const DEFAULT_LOG_FILTER: &str = "text_insight=info,warn";

pub const ENV_LEXICON_CONFIG_PATH: &str = "LEXICON_CONFIG_PATH";
pub const ENV_CORS_ORIGINS: &str = "CORS_ORIGINS";
pub const ENV_LOG_FILTER: &str = "TEXT_INSIGHT_LOG";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub lexicon_path: PathBuf,
    pub cors_origins: Vec<String>,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings through an arbitrary lookup (tests pass a closure).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let lexicon_path = non_empty(ENV_LEXICON_CONFIG_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LEXICON_CONFIG_PATH));

        let cors_origins = parse_origins(
            &non_empty(ENV_CORS_ORIGINS).unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string()),
        );

        let log_filter = non_empty(ENV_LOG_FILTER).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Self {
            lexicon_path,
            cors_origins,
            log_filter,
        }
    }
}

/// Comma-separated list; blanks dropped. `*` is kept verbatim (any origin).
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
