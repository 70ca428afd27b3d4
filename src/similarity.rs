//! # TF-IDF Similarity
//! Cosine similarity of two documents under a TF-IDF model fit on exactly
//! those two documents.
//!
//! - Tokens: lower-cased `\w\w+` runs, English stop words removed.
//! - Features: unigrams + bigrams of the remaining tokens, capped at
//!   [`MAX_FEATURES`] by corpus frequency (ties alphabetical).
//! - Weights: raw count × smoothed idf `ln((1 + n) / (1 + df)) + 1`, L2-normalized.
//!
//! There is no fitted state to reuse: every call builds its own vocabulary.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::stop_words::is_stop_word;

pub const MAX_FEATURES: usize = 500;

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?u)\b\w\w+\b").expect("token regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimilarityError {
    /// Both documents are empty after tokenization and stop-word removal.
    EmptyVocabulary,
}

impl fmt::Display for SimilarityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimilarityError::EmptyVocabulary => {
                write!(f, "empty vocabulary; documents contain only stop words")
            }
        }
    }
}

impl std::error::Error for SimilarityError {}

/// Cosine similarity in [0, 1] between `a` and `b`.
pub fn tfidf_cosine(a: &str, b: &str) -> Result<f64, SimilarityError> {
    let docs = [term_counts(a), term_counts(b)];

    let vocab = vocabulary(&docs);
    if vocab.is_empty() {
        return Err(SimilarityError::EmptyVocabulary);
    }

    let n_docs = docs.len() as f64;
    let idf: BTreeMap<&str, f64> = vocab
        .iter()
        .map(|term| {
            let df = docs.iter().filter(|d| d.contains_key(*term)).count() as f64;
            (*term, ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0)
        })
        .collect();

    let [va, vb] = [&docs[0], &docs[1]].map(|d| weighted(d, &idf));

    let norm_a = va.iter().map(|w| w * w).sum::<f64>().sqrt();
    let norm_b = vb.iter().map(|w| w * w).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    let dot: f64 = va.iter().zip(vb.iter()).map(|(x, y)| x * y).sum();
    Ok((dot / (norm_a * norm_b)).clamp(0.0, 1.0))
}

/// Unigram + bigram counts of one document.
fn term_counts(doc: &str) -> BTreeMap<String, usize> {
    let lowered = doc.to_lowercase();
    let tokens: Vec<&str> = TOKEN_RE
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|t| !is_stop_word(t))
        .collect();

    let mut counts = BTreeMap::new();
    for t in &tokens {
        *counts.entry((*t).to_string()).or_insert(0) += 1;
    }
    for pair in tokens.windows(2) {
        *counts.entry(format!("{} {}", pair[0], pair[1])).or_insert(0) += 1;
    }
    counts
}

/// Union of both documents' terms, limited to the most frequent `MAX_FEATURES`.
fn vocabulary(docs: &[BTreeMap<String, usize>]) -> Vec<&str> {
    let mut corpus: BTreeMap<&str, usize> = BTreeMap::new();
    for d in docs {
        for (term, &c) in d {
            *corpus.entry(term.as_str()).or_insert(0) += c;
        }
    }

    if corpus.len() <= MAX_FEATURES {
        return corpus.into_keys().collect();
    }

    let mut ranked: Vec<(&str, usize)> = corpus.into_iter().collect();
    // BTreeMap order is alphabetical; stable sort keeps it for equal counts
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    let kept: BTreeSet<&str> = ranked.into_iter().take(MAX_FEATURES).map(|(t, _)| t).collect();
    kept.into_iter().collect()
}

/// Dense TF-IDF vector aligned with `idf`'s key order.
fn weighted(doc: &BTreeMap<String, usize>, idf: &BTreeMap<&str, f64>) -> Vec<f64> {
    idf.iter()
        .map(|(term, w)| doc.get(*term).copied().unwrap_or(0) as f64 * w)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_documents_are_fully_similar() {
        let s = tfidf_cosine("rust developer with tokio", "rust developer with tokio").unwrap();
        assert!((s - 1.0).abs() < 1e-9);
    }

    #[test]
    fn disjoint_documents_score_zero() {
        let s = tfidf_cosine("python django", "carpentry woodwork").unwrap();
        assert_eq!(s, 0.0);
    }

    #[test]
    fn stop_words_only_is_an_error() {
        assert_eq!(
            tfidf_cosine("the and of", "is a it"),
            Err(SimilarityError::EmptyVocabulary)
        );
    }

    #[test]
    fn one_sided_vocabulary_scores_zero() {
        assert_eq!(tfidf_cosine("the and", "python developer").unwrap(), 0.0);
    }

    #[test]
    fn partial_overlap_matches_hand_computation() {
        // job: need, python, aws, developer + 3 bigrams (7 terms, 3 shared)
        // resume: years, experience, python, aws, docker + 4 bigrams (9 terms, 3 shared)
        let s = tfidf_cosine(
            "need python and aws developer",
            "5 years experience in python, aws, docker",
        )
        .unwrap();
        let u = (1.5f64.ln() + 1.0).powi(2);
        let expected = 3.0 / ((3.0 + 4.0 * u) * (3.0 + 6.0 * u)).sqrt();
        assert!((s - expected).abs() < 1e-9, "got {s}, expected {expected}");
    }

    #[test]
    fn symmetric_and_repeatable() {
        let a = "senior rust engineer, async networking";
        let b = "we need an engineer for async rust networking services";
        let ab = tfidf_cosine(a, b).unwrap();
        assert_eq!(ab, tfidf_cosine(b, a).unwrap());
        assert_eq!(ab, tfidf_cosine(a, b).unwrap());
    }

    #[test]
    fn vocabulary_is_capped() {
        let big: String = (0..800).map(|i| format!("term{i} ")).collect();
        let counts = term_counts(&big);
        let docs = [counts, term_counts("term1 term2")];
        assert_eq!(vocabulary(&docs).len(), MAX_FEATURES);
    }
}
