// src/config/mod.rs
//! Configuration: lexicon tables (TOML) and process settings (env).

pub mod lexicon;
pub mod settings;

pub use lexicon::{Lexicon, PatternTables};
pub use settings::Settings;
