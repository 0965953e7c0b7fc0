use async_trait::async_trait;
use std::hash::{Hash, Hasher};
use twox_hash::XxHash64;

use pipepilot_core::traits::Embedder;
use pipepilot_core::Result;

/// Deterministic hashed bag-of-words embedder for offline development and tests.
///
/// Output is L2-normalized; identical inputs always produce identical vectors.
pub struct FakeEmbedder {
    dim: usize,
    id: String,
}

impl FakeEmbedder {
    pub fn new(dim: usize) -> Self {
        let dim = dim.max(1);
        Self { dim, id: format!("fake:d{dim}") }
    }

    pub fn dim(&self) -> usize { self.dim }

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn embed_text(&self, text: &str) -> Vec<f64> {
        let mut v = vec![0f64; self.dim];
        for (i, token) in text.split_whitespace().enumerate() {
            let mut hasher = XxHash64::with_seed(0);
            token.to_lowercase().hash(&mut hasher);
            let h = hasher.finish();
            let idx = (h as usize) % self.dim;
            let val = f64::from((h >> 32) as u32) / f64::from(u32::MAX);
            v[idx] += val + (i % 3) as f64 * 0.01;
        }
        let norm = v.iter().map(|x| x * x).sum::<f64>().sqrt().max(1e-6);
        for x in &mut v { *x /= norm; }
        v
    }
}

#[async_trait]
impl Embedder for FakeEmbedder {
    fn embedder_id(&self) -> &str { &self.id }

    async fn embed(&self, text: &str) -> Result<Vec<f64>> { Ok(self.embed_text(text)) }
}
