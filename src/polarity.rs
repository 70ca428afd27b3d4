//! # Polarity Model
//! Lexicon-based polarity/subjectivity estimate for English text.
//!
//! - Polarity in [-1, 1] (negative → positive), subjectivity in [0, 1].
//! - A run of intensifiers ("very", "extremely", ...) directly before a
//!   sentiment word scales it.
//! - A negator within the previous three tokens flips and halves polarity
//!   ("not good" and "not at all good" → -0.35 for good = 0.7).
//! - The final estimate is the mean over sentiment-bearing words; text with
//!   none of them scores (0.0, 0.0).
//!
//! Pure and infallible: the lexicon is embedded at compile time.

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;

/// How many preceding tokens are searched for a negator.
const NEGATION_WINDOW: usize = 3;
const NEGATION_FACTOR: f64 = -0.5;

#[derive(Debug, Clone, Copy, Deserialize)]
struct WordEntry {
    polarity: f64,
    subjectivity: f64,
}

#[derive(Debug, Deserialize)]
struct RawLexicon {
    words: HashMap<String, WordEntry>,
    #[serde(default)]
    intensifiers: HashMap<String, f64>,
}

static LEXICON: Lazy<RawLexicon> = Lazy::new(|| {
    let raw = include_str!("../sentiment_lexicon.json");
    serde_json::from_str::<RawLexicon>(raw).expect("valid sentiment lexicon")
});

/// Polarity/subjectivity pair, unrounded.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Polarity {
    pub polarity: f64,
    pub subjectivity: f64,
}

/// Estimate polarity and subjectivity of `text`.
pub fn analyze(text: &str) -> Polarity {
    let lex = &*LEXICON;

    let mut pol_sum = 0.0f64;
    let mut subj_sum = 0.0f64;
    let mut assessed = 0usize;

    let tokens: Vec<String> = tokenize(text).collect();

    for (i, tok) in tokens.iter().enumerate() {
        let Some(entry) = lex.words.get(tok) else {
            continue;
        };

        let boost: f64 = tokens[..i]
            .iter()
            .rev()
            .map_while(|t| lex.intensifiers.get(t))
            .product();
        let negated = (1..=NEGATION_WINDOW.min(i)).any(|k| is_negator(&tokens[i - k]));

        let mut p = entry.polarity * boost;
        if negated {
            p *= NEGATION_FACTOR;
        }
        pol_sum += p.clamp(-1.0, 1.0);
        subj_sum += (entry.subjectivity * boost).clamp(0.0, 1.0);
        assessed += 1;
    }

    if assessed == 0 {
        return Polarity::default();
    }

    let n = assessed as f64;
    Polarity {
        polarity: (pol_sum / n).clamp(-1.0, 1.0),
        subjectivity: (subj_sum / n).clamp(0.0, 1.0),
    }
}

/// Lower-case word tokens; apostrophes are kept inside words ("won't").
fn tokenize(s: &str) -> impl Iterator<Item = String> + '_ {
    s.split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '’'))
        .map(|t| t.trim_matches(|c| c == '\'' || c == '’'))
        .filter(|t| !t.is_empty())
        .map(|t| t.replace('’', "'").to_lowercase())
}

fn is_negator(tok: &str) -> bool {
    matches!(
        tok,
        "not"
            | "no"
            | "never"
            | "nothing"
            | "nobody"
            | "neither"
            | "nor"
            | "isn't"
            | "wasn't"
            | "aren't"
            | "weren't"
            | "don't"
            | "doesn't"
            | "didn't"
            | "won't"
            | "can't"
            | "cannot"
            | "couldn't"
            | "shouldn't"
            | "wouldn't"
            | "without"
    )
}
