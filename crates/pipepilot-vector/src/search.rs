use pipepilot_core::types::{Document, RankedResult};
use pipepilot_core::{Error, Result};

/// Added to the norm product so degenerate (all-zero) vectors score 0 instead of NaN.
pub const EPSILON: f64 = 1e-12;

/// Number of passages handed to the answer synthesizer.
pub const DEFAULT_TOP_K: usize = 5;

pub fn dot(a: &[f64], b: &[f64]) -> f64 { a.iter().zip(b).map(|(x, y)| x * y).sum() }

pub fn norm(a: &[f64]) -> f64 { dot(a, a).sqrt() }

/// Cosine similarity `(a·b) / (‖a‖·‖b‖ + ε)`. Not clamped; opposite vectors score ≈ -1.
pub fn cosine(a: &[f64], b: &[f64]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(Error::DimensionMismatch { expected: a.len(), got: b.len() });
    }
    Ok(dot(a, b) / (norm(a) * norm(b) + EPSILON))
}

/// Score every document against `query` and keep the best `k`, highest first.
///
/// Sorting is stable, so equal scores keep corpus order.
pub fn rank(query: &[f64], documents: &[Document], k: usize) -> Result<Vec<RankedResult>> {
    let query_norm = norm(query);
    let mut ranked = documents
        .iter()
        .map(|d| {
            if d.embedding.len() != query.len() {
                return Err(Error::DimensionMismatch { expected: d.embedding.len(), got: query.len() });
            }
            let score = dot(query, &d.embedding) / (query_norm * norm(&d.embedding) + EPSILON);
            Ok(RankedResult { id: d.id.clone(), text: d.text.clone(), score })
        })
        .collect::<Result<Vec<_>>>()?;
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked.truncate(k);
    tracing::debug!(candidates = documents.len(), kept = ranked.len(), "ranked corpus");
    Ok(ranked)
}
