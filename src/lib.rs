// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod api;
pub mod config;
pub mod error;
pub mod fakenews;
pub mod metrics;
pub mod polarity;
pub mod resume;
pub mod sentiment;
pub mod similarity;
pub mod stop_words;
pub mod text;

// ---- Re-exports for stable public API ----
pub use crate::api::{create_router, router, AppState};
pub use crate::config::{Lexicon, PatternTables, Settings};
pub use crate::error::ApiError;
pub use crate::fakenews::{FakeNewsDetector, FakeNewsReport};
pub use crate::resume::{RankedResume, Recommendation, ResumeItem, ResumeScreener, ScreeningResult};
pub use crate::sentiment::{SentimentAnalyzer, SentimentLabel, SentimentResult, SentimentStatistics};
