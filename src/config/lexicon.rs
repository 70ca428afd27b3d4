//! # Lexicon / Pattern Tables
//!
//! Static keyword and regex tables shared by the three analyzers:
//! clickbait keywords, offensive patterns, credible-source keywords,
//! technical-skill keywords and experience-year patterns.
//!
//! - Loads from TOML (any missing table falls back to the built-in seed).
//! - `compile()` turns the raw strings into [`PatternTables`], which is what
//!   the analyzers hold (behind an `Arc`) for the lifetime of the process.
//!
//! Keywords are matched as case-insensitive substrings, regexes run against
//! the lower-cased text.

use anyhow::Context;
use regex::Regex;
use serde::Deserialize;
use std::{fs, io, path::Path};
use tracing::{info, warn};

/// Raw tables as they appear in `config/lexicon.toml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Lexicon {
    pub clickbait_words: Vec<String>,
    pub offensive_patterns: Vec<String>,
    pub credible_sources: Vec<String>,
    pub tech_skills: Vec<String>,
    /// Each pattern must have exactly one capture group holding the year count.
    pub experience_patterns: Vec<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::default_seed()
    }
}

impl Lexicon {
    /// Load tables from a TOML file.
    /// A missing/unreadable file yields `default_seed()`; malformed TOML is an error.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(raw) => {
                let lexicon: Lexicon = toml::from_str(&raw)
                    .with_context(|| format!("invalid lexicon config at {}", path.display()))?;
                info!(path = %path.display(), "lexicon tables loaded");
                Ok(lexicon)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "lexicon config not found; using built-in seed");
                Ok(Self::default_seed())
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "lexicon config unreadable; using built-in seed");
                Ok(Self::default_seed())
            }
        }
    }

    /// Built-in tables. Used when no config file is present.
    pub fn default_seed() -> Self {
        fn owned(items: &[&str]) -> Vec<String> {
            items.iter().map(|s| s.to_string()).collect()
        }

        Self {
            clickbait_words: owned(&[
                "shocking",
                "unbelievable",
                "you won't believe",
                "secret",
                "exposed",
                "scandal",
                "breaking",
                "leaked",
                "urgent",
                "alert",
                "warning",
            ]),
            offensive_patterns: owned(&[
                r"\b(hate|stupid|idiot|dumb)\b",
                r"(kill|destroy|eliminate)\s+(all|every)",
            ]),
            credible_sources: owned(&[
                "reuters",
                "ap",
                "bbc",
                "npr",
                "pbs",
                "nature",
                "science",
                "research",
                "study",
                "university",
            ]),
            tech_skills: owned(&[
                "python",
                "java",
                "javascript",
                "react",
                "angular",
                "vue",
                "sql",
                "nosql",
                "mongodb",
                "postgresql",
                "mysql",
                "aws",
                "azure",
                "gcp",
                "docker",
                "kubernetes",
                "machine learning",
                "deep learning",
                "nlp",
                "ai",
                "fastapi",
                "django",
                "flask",
                "nodejs",
                "express",
                "git",
                "agile",
                "scrum",
                "ci/cd",
                "devops",
            ]),
            experience_patterns: owned(&[
                r"([0-9]+)\+?\s*years?\s+(?:of\s+)?experience",
                r"experience[:\s]+([0-9]+)\+?\s*years?",
                r"([0-9]+)\+?\s*yrs?\s+(?:of\s+)?experience",
            ]),
        }
    }

    /// Compile regexes and normalize keywords. Fails on any invalid pattern.
    pub fn compile(&self) -> anyhow::Result<PatternTables> {
        let offensive = compile_all(&self.offensive_patterns, "offensive_patterns")?;
        let experience = compile_all(&self.experience_patterns, "experience_patterns")?;

        if let Some(bad) = experience.iter().find(|re| re.captures_len() < 2) {
            anyhow::bail!(
                "experience pattern '{}' has no capture group for the year count",
                bad.as_str()
            );
        }

        Ok(PatternTables {
            clickbait_words: lowered(&self.clickbait_words),
            offensive,
            credible_sources: lowered(&self.credible_sources),
            tech_skills: lowered(&self.tech_skills),
            experience,
        })
    }
}

/// Compiled, immutable tables. Built once at startup, shared read-only.
#[derive(Debug, Clone)]
pub struct PatternTables {
    pub clickbait_words: Vec<String>,
    pub offensive: Vec<Regex>,
    pub credible_sources: Vec<String>,
    pub tech_skills: Vec<String>,
    pub experience: Vec<Regex>,
}

impl PatternTables {
    /// Tables compiled from `Lexicon::default_seed()`.
    pub fn seed() -> anyhow::Result<Self> {
        Lexicon::default_seed().compile()
    }
}

fn compile_all(patterns: &[String], table: &str) -> anyhow::Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| Regex::new(p).with_context(|| format!("invalid regex in {table}: {p}")))
        .collect()
}

/// Lower-case, trim, drop empties. Order is kept (it is the reporting order).
fn lowered(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
