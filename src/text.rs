//! Text feature extractors: pure `text -> scalar` helpers shared by the analyzers.

use regex::Regex;

/// `true` for empty or whitespace-only input.
#[inline]
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Round half away from zero to `places` decimals.
pub fn round_to(x: f64, places: i32) -> f64 {
    if !x.is_finite() {
        return 0.0;
    }
    let f = 10f64.powi(places);
    let r = (x * f).round() / f;
    // avoid serializing "-0.0"
    if r == 0.0 {
        0.0
    } else {
        r
    }
}

/// Clamp a sub-score into [0, 100].
#[inline]
pub fn clamp_score(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 100.0)
    }
}

/// Keywords (already lower-cased) that occur as substrings of `lowered`.
/// Membership, not count; lexicon order is kept.
pub fn keyword_hits<'a>(lowered: &str, keywords: &'a [String]) -> Vec<&'a str> {
    keywords
        .iter()
        .filter(|k| lowered.contains(k.as_str()))
        .map(String::as_str)
        .collect()
}

/// Total number of non-overlapping matches over all patterns.
pub fn regex_hits(text: &str, patterns: &[Regex]) -> usize {
    patterns.iter().map(|re| re.find_iter(text).count()).sum()
}

#[inline]
pub fn count_char(text: &str, ch: char) -> usize {
    text.chars().filter(|&c| c == ch).count()
}

/// Number of characters (not bytes).
#[inline]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Uppercase letters / (characters + 1). The `+ 1` keeps empty input defined.
pub fn caps_ratio(text: &str) -> f64 {
    let (upper, total) = text.chars().fold((0usize, 0usize), |(u, t), c| {
        (u + usize::from(c.is_uppercase()), t + 1)
    });
    upper as f64 / (total as f64 + 1.0)
}

/// First `max` characters plus `...` when the text is longer; otherwise unchanged.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Short, stable, anonymized id for log events. Never log raw text.
pub fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let digest = Sha256::digest(text.as_bytes());
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}
