//! # Sentiment Scorer
//! Classifies text as positive / neutral / negative from the polarity model
//! and aggregates batches into label counts, percentages and means.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::polarity;
use crate::text::{anon_hash, is_blank, round_to};

/// Polarity must be strictly above this to count as positive
/// (strictly below its negation for negative).
pub const NEUTRAL_BAND: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    /// `p > 0.1` → positive, `p < -0.1` → negative, otherwise neutral
    /// (both band edges are neutral).
    pub fn from_polarity(p: f64) -> Self {
        if p > NEUTRAL_BAND {
            SentimentLabel::Positive
        } else if p < -NEUTRAL_BAND {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Negative => "negative",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub text: String,
    pub sentiment: SentimentLabel,
    pub polarity: f64,
    pub subjectivity: f64,
    pub confidence: f64,
}

impl SentimentResult {
    fn neutral(text: &str) -> Self {
        Self {
            text: text.to_string(),
            sentiment: SentimentLabel::Neutral,
            polarity: 0.0,
            subjectivity: 0.0,
            confidence: 0.0,
        }
    }
}

/// Aggregate over a batch of classified texts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentStatistics {
    pub total_reviews: usize,
    pub positive_count: usize,
    pub neutral_count: usize,
    pub negative_count: usize,
    pub positive_percentage: f64,
    pub neutral_percentage: f64,
    pub negative_percentage: f64,
    pub average_polarity: f64,
    pub average_subjectivity: f64,
    pub average_confidence: f64,
}

/// Stateless façade; cheap to clone and share.
#[derive(Debug, Clone, Default)]
pub struct SentimentAnalyzer;

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Classify one text. Blank input → neutral with all-zero scores.
    pub fn classify(&self, text: &str) -> SentimentResult {
        if is_blank(text) {
            return SentimentResult::neutral(text);
        }

        let p = polarity::analyze(text);
        let sentiment = SentimentLabel::from_polarity(p.polarity);
        debug!(id = %anon_hash(text), polarity = p.polarity, label = sentiment.as_str(), "sentiment classified");

        SentimentResult {
            text: text.to_string(),
            sentiment,
            polarity: round_to(p.polarity, 3),
            subjectivity: round_to(p.subjectivity, 3),
            confidence: round_to(p.polarity.abs(), 3),
        }
    }

    /// Classify each text independently; output order = input order.
    pub fn classify_batch<S: AsRef<str>>(&self, texts: &[S]) -> Vec<SentimentResult> {
        texts.iter().map(|t| self.classify(t.as_ref())).collect()
    }

    /// Counts, percentages (2 decimals) and means (3 decimals).
    /// Empty input → all-zero statistics.
    pub fn statistics(&self, results: &[SentimentResult]) -> SentimentStatistics {
        if results.is_empty() {
            return SentimentStatistics::default();
        }

        let count = |label: SentimentLabel| results.iter().filter(|r| r.sentiment == label).count();
        let positive_count = count(SentimentLabel::Positive);
        let neutral_count = count(SentimentLabel::Neutral);
        let negative_count = count(SentimentLabel::Negative);

        let n = results.len() as f64;
        let pct = |c: usize| round_to(c as f64 / n * 100.0, 2);
        let mean = |f: fn(&SentimentResult) -> f64| round_to(results.iter().map(f).sum::<f64>() / n, 3);

        SentimentStatistics {
            total_reviews: results.len(),
            positive_count,
            neutral_count,
            negative_count,
            positive_percentage: pct(positive_count),
            neutral_percentage: pct(neutral_count),
            negative_percentage: pct(negative_count),
            average_polarity: mean(|r| r.polarity),
            average_subjectivity: mean(|r| r.subjectivity),
            average_confidence: mean(|r| r.confidence),
        }
    }
}
