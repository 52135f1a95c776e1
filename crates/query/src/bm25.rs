//! BM25 relevance ranking over token lists.
//!
//! Units are measured in word tokens throughout: a keyword's frequency is its
//! exact count among a unit's tokens and a unit's length is its token count.

use serde::{Deserialize, Serialize};

pub const K1: f64 = 1.50;
pub const B: f64 = 0.75;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bm25 {
    pub k1: f64,
    pub b: f64,
}

impl Default for Bm25 {
    fn default() -> Self {
        Self { k1: K1, b: B }
    }
}

impl Bm25 {
    pub fn new(k1: f64, b: f64) -> Self {
        Self { k1, b }
    }

    /// Score one unit against `keywords` in the context of `corpus`.
    pub fn score(&self, unit: &[String], corpus: &[Vec<String>], keywords: &[String]) -> f64 {
        let Some(avg_len) = average_length(corpus) else {
            return 0.0;
        };
        let idfs: Vec<f64> = keywords.iter().map(|kw| idf(corpus, kw)).collect();
        self.score_with(unit, avg_len, keywords, &idfs)
    }

    /// Indices and scores of `units`, strictly positive scores only, best
    /// first. Equal scores keep their input order.
    pub fn rank(
        &self,
        units: &[Vec<String>],
        corpus: &[Vec<String>],
        keywords: &[String],
    ) -> Vec<(usize, f64)> {
        let Some(avg_len) = average_length(corpus) else {
            return Vec::new();
        };
        let idfs: Vec<f64> = keywords.iter().map(|kw| idf(corpus, kw)).collect();

        let mut scores: Vec<(usize, f64)> = units
            .iter()
            .enumerate()
            .map(|(i, unit)| (i, self.score_with(unit, avg_len, keywords, &idfs)))
            .filter(|(_, score)| *score > 0.0)
            .collect();

        // Vec::sort_by is stable
        scores.sort_by(|a, b| b.1.total_cmp(&a.1));
        scores
    }

    fn score_with(&self, unit: &[String], avg_len: f64, keywords: &[String], idfs: &[f64]) -> f64 {
        let norm = 1.0 - self.b + self.b * (unit.len() as f64 / avg_len);

        keywords
            .iter()
            .zip(idfs)
            .map(|(kw, idf)| {
                let f = term_frequency(unit, kw) as f64;
                let num = f * (self.k1 + 1.0);
                let dem = f + self.k1 * norm;
                idf * (num / dem)
            })
            .sum()
    }
}

fn average_length(corpus: &[Vec<String>]) -> Option<f64> {
    if corpus.is_empty() {
        return None;
    }
    let total: usize = corpus.iter().map(Vec::len).sum();
    let avg = total as f64 / corpus.len() as f64;
    (avg > 0.0).then_some(avg)
}

fn term_frequency(unit: &[String], keyword: &str) -> usize {
    unit.iter().filter(|token| *token == keyword).count()
}

/// `ln((N - n + 0.5) / (n + 0.5))`; negative for keywords in more than half
/// of the corpus.
fn idf(corpus: &[Vec<String>], keyword: &str) -> f64 {
    let n_total = corpus.len() as f64;
    let n = corpus
        .iter()
        .filter(|unit| unit.iter().any(|token| token == keyword))
        .count() as f64;
    ((n_total - n + 0.5) / (n + 0.5)).ln()
}
