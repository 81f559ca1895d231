use crate::matrix::DenseMatrix;
use crate::DocId;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredDocument {
    pub doc_id: DocId,
    pub score: f64,
}

/// `(a . b) / (|a| |b|)`, and exactly `0.0` when either norm is zero.
///
/// Clamped to `1.0`; rounding can otherwise land one ulp above it.
pub fn cosine(a: &[f64], b: &[f64]) -> f64 {
    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a.sqrt() * norm_b.sqrt())).min(1.0)
}

/// Score `query` against every row and keep the `k` best positive scores.
///
/// Highest score first. Equal scores keep ascending document id order.
pub fn rank(query: &[f64], docs: &DenseMatrix<f64>, k: usize) -> Vec<ScoredDocument> {
    if k == 0 {
        return Vec::new();
    }
    let mut scored: Vec<ScoredDocument> = docs
        .iter_rows()
        .enumerate()
        .map(|(d, row)| ScoredDocument { doc_id: d as DocId, score: cosine(query, row) })
        .filter(|s| s.score > 0.0)
        .collect();
    // stable
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(k);
    scored
}
