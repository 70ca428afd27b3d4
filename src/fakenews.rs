//! # Fake-News / Harmful-Content Detector
//!
//! Three independent sub-analyses, each a [0, 100] score plus a flag:
//! - clickbait:   keyword hits ×15 + min(`!`×10, 30) + min(caps_ratio×50, 30); flag > 40
//! - hate speech: offensive regex hits ×40 + max(0, -polarity)×30;             flag > 50
//! - credibility: source mentions ×25 + citation 30 + quotes 15 + min(len/50, 30); flag > 50
//!
//! Aggregate: `p = clickbait×0.3 + hate×0.2 + (100 − credibility)×0.5`, fake when p > 60.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::config::PatternTables;
use crate::polarity;
use crate::text::{
    anon_hash, caps_ratio, char_len, clamp_score, count_char, is_blank, keyword_hits,
    regex_hits, round_to, truncate_chars,
};

pub const WARN_CLICKBAIT: &str = "Contains clickbait patterns";
pub const WARN_HATE_SPEECH: &str = "Contains potential hate speech";
pub const WARN_LOW_CREDIBILITY: &str = "Low credibility score";

/// Echoed text is cut to this many characters (plus `...`).
pub const ECHO_MAX_CHARS: usize = 200;

const CLICKBAIT_THRESHOLD: f64 = 40.0;
const HATE_THRESHOLD: f64 = 50.0;
const CREDIBLE_THRESHOLD: f64 = 50.0;
const FAKE_THRESHOLD: f64 = 60.0;

const W_CLICKBAIT: f64 = 0.3;
const W_HATE: f64 = 0.2;
const W_LOW_CREDIBILITY: f64 = 0.5;

/// `[12]`-style references or a parenthesized year like `(2021)`.
static CITATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\d+\]|\(\d{4}\)").expect("citation regex"));

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClickbaitAnalysis {
    pub is_clickbait: bool,
    pub clickbait_score: f64,
    pub clickbait_words: Vec<String>,
    pub exclamation_count: usize,
    pub question_count: usize,
    pub caps_ratio: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HateSpeechAnalysis {
    pub contains_hate_speech: bool,
    pub hate_score: f64,
    pub offensive_patterns_found: usize,
    pub sentiment_polarity: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CredibilityAnalysis {
    pub credible: bool,
    pub credibility_score: f64,
    pub credible_sources_mentioned: usize,
    pub has_citations: bool,
    pub has_quotes: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisDetails {
    pub clickbait: ClickbaitAnalysis,
    pub hate_speech: HateSpeechAnalysis,
    pub credibility: CredibilityAnalysis,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FakeNewsReport {
    pub text: String,
    pub source: String,
    pub is_fake_news: bool,
    pub fake_news_probability: f64,
    pub credibility_score: f64,
    pub clickbait_score: f64,
    pub hate_score: f64,
    pub warnings: Vec<String>,
    pub details: AnalysisDetails,
}

#[derive(Debug, Clone)]
pub struct FakeNewsDetector {
    tables: Arc<PatternTables>,
}

impl FakeNewsDetector {
    pub fn new(tables: Arc<PatternTables>) -> Self {
        Self { tables }
    }

    pub fn detect_clickbait(&self, text: &str) -> ClickbaitAnalysis {
        let lowered = text.to_lowercase();
        let words = keyword_hits(&lowered, &self.tables.clickbait_words);
        let exclamation_count = count_char(text, '!');
        let ratio = caps_ratio(text);

        let raw = words.len() as f64 * 15.0
            + (exclamation_count as f64 * 10.0).min(30.0)
            + (ratio * 50.0).min(30.0);

        ClickbaitAnalysis {
            is_clickbait: raw > CLICKBAIT_THRESHOLD,
            clickbait_score: clamp_score(round_to(raw, 2)),
            clickbait_words: words.into_iter().map(str::to_string).collect(),
            exclamation_count,
            question_count: count_char(text, '?'),
            caps_ratio: round_to(ratio, 3),
        }
    }

    pub fn detect_hate_speech(&self, text: &str) -> HateSpeechAnalysis {
        let offensive = regex_hits(&text.to_lowercase(), &self.tables.offensive);
        let polarity = polarity::analyze(text).polarity;

        let raw = offensive as f64 * 40.0 + (-polarity).max(0.0) * 30.0;

        HateSpeechAnalysis {
            contains_hate_speech: raw > HATE_THRESHOLD,
            hate_score: clamp_score(round_to(raw, 2)),
            offensive_patterns_found: offensive,
            sentiment_polarity: round_to(polarity, 3),
        }
    }

    /// `source` is optional context; it counts toward source mentions only.
    pub fn check_credibility(&self, text: &str, source: &str) -> CredibilityAnalysis {
        let text_lower = text.to_lowercase();
        let source_lower = source.to_lowercase();

        let mentioned = self
            .tables
            .credible_sources
            .iter()
            .filter(|s| text_lower.contains(s.as_str()) || source_lower.contains(s.as_str()))
            .count();

        let has_citations = CITATION_RE.is_match(text);
        let has_quotes = count_char(text, '"') >= 2;

        let raw = mentioned as f64 * 25.0
            + if has_citations { 30.0 } else { 0.0 }
            + if has_quotes { 15.0 } else { 0.0 }
            + (char_len(text) as f64 / 50.0).min(30.0);

        CredibilityAnalysis {
            credible: raw > CREDIBLE_THRESHOLD,
            credibility_score: clamp_score(round_to(raw, 2)),
            credible_sources_mentioned: mentioned,
            has_citations,
            has_quotes,
        }
    }

    /// Full analysis. Blank text → zeroed, non-fake report without warnings.
    pub fn analyze(&self, text: &str, source: &str) -> FakeNewsReport {
        if is_blank(text) {
            return FakeNewsReport {
                text: text.to_string(),
                source: source.to_string(),
                ..FakeNewsReport::default()
            };
        }

        let clickbait = self.detect_clickbait(text);
        let hate_speech = self.detect_hate_speech(text);
        let credibility = self.check_credibility(text, source);

        let mut warnings = Vec::new();
        if clickbait.is_clickbait {
            warnings.push(WARN_CLICKBAIT.to_string());
        }
        if hate_speech.contains_hate_speech {
            warnings.push(WARN_HATE_SPEECH.to_string());
        }
        if !credibility.credible {
            warnings.push(WARN_LOW_CREDIBILITY.to_string());
        }

        let probability = clamp_score(round_to(
            clickbait.clickbait_score * W_CLICKBAIT
                + hate_speech.hate_score * W_HATE
                + (100.0 - credibility.credibility_score) * W_LOW_CREDIBILITY,
            2,
        ));

        debug!(
            id = %anon_hash(text),
            clickbait = clickbait.clickbait_score,
            hate = hate_speech.hate_score,
            credibility = credibility.credibility_score,
            probability,
            "fake-news analysis"
        );

        FakeNewsReport {
            text: truncate_chars(text, ECHO_MAX_CHARS),
            source: source.to_string(),
            is_fake_news: probability > FAKE_THRESHOLD,
            fake_news_probability: probability,
            credibility_score: credibility.credibility_score,
            clickbait_score: clickbait.clickbait_score,
            hate_score: hate_speech.hate_score,
            warnings,
            details: AnalysisDetails {
                clickbait,
                hate_speech,
                credibility,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> FakeNewsDetector {
        FakeNewsDetector::new(Arc::new(PatternTables::seed().unwrap()))
    }

    #[test]
    fn shouting_clickbait_is_flagged() {
        let r = detector().analyze("YOU WON'T BELIEVE THIS SHOCKING SECRET!!!", "");
        assert!(r.details.clickbait.is_clickbait);
        assert!(r.clickbait_score > 40.0);
        assert_eq!(r.warnings.first().map(String::as_str), Some(WARN_CLICKBAIT));
        assert_eq!(
            r.details.clickbait.clickbait_words,
            vec!["shocking", "you won't believe", "secret"]
        );
        assert_eq!(r.details.clickbait.exclamation_count, 3);
    }

    #[test]
    fn hate_patterns_are_counted_and_clamped() {
        let r = detector().detect_hate_speech("I hate you, you stupid idiot");
        assert_eq!(r.offensive_patterns_found, 3);
        assert!(r.contains_hate_speech);
        assert_eq!(r.hate_score, 100.0);

        let v = detector().detect_hate_speech("we must destroy all of them");
        assert_eq!(v.offensive_patterns_found, 1);
    }

    #[test]
    fn credibility_signals() {
        let text = "A university study published by Reuters (2021) found \"clear\" effects [3].";
        let r = detector().check_credibility(text, "BBC News");
        assert!(r.has_citations);
        assert!(r.has_quotes);
        assert!(r.credible_sources_mentioned >= 4);
        assert!(r.credible);
        assert_eq!(r.credibility_score, 100.0);
    }

    #[test]
    fn source_name_counts_as_mention() {
        let d = detector();
        let without = d.check_credibility("Markets were calm today.", "");
        let with = d.check_credibility("Markets were calm today.", "NPR");
        assert_eq!(with.credible_sources_mentioned, without.credible_sources_mentioned + 1);
        assert!((with.credibility_score - without.credibility_score - 25.0).abs() < 1e-9);
    }

    #[test]
    fn blank_text_yields_zero_report() {
        let r = detector().analyze("   ", "somewhere");
        assert!(!r.is_fake_news);
        assert_eq!(r.fake_news_probability, 0.0);
        assert!(r.warnings.is_empty());
        assert_eq!(r.source, "somewhere");
        assert_eq!(r.details, AnalysisDetails::default());
    }

    #[test]
    fn probability_is_weighted_sum() {
        let r = detector().analyze("The weather is mild.", "");
        let expected = round_to(
            r.clickbait_score * 0.3 + r.hate_score * 0.2 + (100.0 - r.credibility_score) * 0.5,
            2,
        );
        assert_eq!(r.fake_news_probability, expected);
        assert_eq!(r.is_fake_news, expected > 60.0);
        // low credibility: only a short-text length bonus
        assert_eq!(r.warnings, vec![WARN_LOW_CREDIBILITY.to_string()]);
    }

    #[test]
    fn long_text_is_truncated_in_echo() {
        let text = "breaking news ".repeat(40);
        let r = detector().analyze(&text, "");
        assert_eq!(r.text.chars().count(), ECHO_MAX_CHARS + 3);
        assert!(r.text.ends_with("..."));
    }

    #[test]
    fn adversarial_repetition_stays_bounded() {
        let text = "SHOCKING!!! hate kill all secret leaked ".repeat(500);
        let r = detector().analyze(&text, "");
        for s in [r.clickbait_score, r.hate_score, r.credibility_score, r.fake_news_probability] {
            assert!((0.0..=100.0).contains(&s), "score out of range: {s}");
        }
    }
}
