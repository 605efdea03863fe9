// src/reduce/similarity.rs
//! Same-event judgment over two normalized titles.
//!
//! Two signals, OR-combined on purpose (either one alone is enough):
//! - `seq_ratio` — word-level sequence similarity in [0, 1], the token
//!   generalization of the Levenshtein ratio. Catches retitled or reordered
//!   variants of the same announcement.
//! - first-word edit distance — `strsim::levenshtein` on the leading tokens.
//!   Catches abbreviations that share the leading word ("GDP Growth Rate"
//!   vs "GDP Price Index" is intentionally caught; buckets are tiny and a
//!   false merge keeps the more severe row anyway).

use strsim::{levenshtein, normalized_levenshtein};

const SEQ_RATIO_MIN: f64 = 0.5;
const FIRST_WORD_MAX_DIST: usize = 3;

/// True when `a` and `b` are judged to denote the same real-world event.
///
/// Both comparisons are strict: a ratio of exactly 0.5 or a first-word
/// distance of exactly 3 is NOT a match. Titles that tokenize to zero words
/// compare first words as empty strings (distance 0) and therefore match;
/// pre-filter empty titles at ingestion if that is not wanted.
pub fn same_event(a: &str, b: &str) -> bool {
    let a_words: Vec<&str> = a.split_whitespace().collect();
    let b_words: Vec<&str> = b.split_whitespace().collect();

    let ratio = seq_ratio(&a_words, &b_words);
    let first_dist = levenshtein(
        a_words.first().copied().unwrap_or(""),
        b_words.first().copied().unwrap_or(""),
    );

    ratio > SEQ_RATIO_MIN || first_dist < FIRST_WORD_MAX_DIST
}

/// Word-sequence similarity ratio.
///
/// Alignment over whole tokens: insert/delete cost 1, substituting token
/// `x` for `y` costs `2 * (1 - normalized_levenshtein(x, y))`, so swapping
/// near-identical words is nearly free while unrelated words cost as much
/// as a delete+insert. Ratio = `(|a| + |b| - dist) / (|a| + |b|)`;
/// identical sequences score 1.0, disjoint ones 0.0.
pub fn seq_ratio(a: &[&str], b: &[&str]) -> f64 {
    let lensum = a.len() + b.len();
    if lensum == 0 {
        return 1.0;
    }

    let mut prev: Vec<f64> = (0..=b.len()).map(|j| j as f64).collect();
    let mut cur = vec![0.0f64; b.len() + 1];

    for (i, wa) in a.iter().enumerate() {
        cur[0] = (i + 1) as f64;
        for (j, wb) in b.iter().enumerate() {
            let sub = prev[j] + word_sub_cost(wa, wb);
            let del = prev[j + 1] + 1.0;
            let ins = cur[j] + 1.0;
            cur[j + 1] = sub.min(del).min(ins);
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    (lensum as f64 - prev[b.len()]) / lensum as f64
}

fn word_sub_cost(a: &str, b: &str) -> f64 {
    if a == b {
        return 0.0;
    }
    2.0 * (1.0 - normalized_levenshtein(a, b))
}
