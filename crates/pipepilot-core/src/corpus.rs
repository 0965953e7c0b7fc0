//! The pre-embedded document snapshot searched at query time.
//!
//! A corpus is a JSON array of `{id, text, embedding}` objects. It is read once,
//! validated and never mutated afterwards.

use std::fs;
use std::path::Path;

use crate::types::Document;
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Corpus {
    documents: Vec<Document>,
    dim: usize,
    fingerprint: String,
}

impl Corpus {
    /// Build a corpus from documents, checking the shared-dimensionality invariant.
    pub fn new(documents: Vec<Document>) -> Result<Self> {
        let fingerprint = fingerprint_documents(&documents);
        Self::with_fingerprint(documents, fingerprint)
    }

    fn with_fingerprint(documents: Vec<Document>, fingerprint: String) -> Result<Self> {
        let dim = documents.first().map_or(0, |d| d.embedding.len());
        if let Some(bad) = documents.iter().find(|d| d.embedding.len() != dim) {
            return Err(Error::DimensionMismatch { expected: dim, got: bad.embedding.len() });
        }
        Ok(Self { documents, dim, fingerprint })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|_| Error::CorpusUnavailable(path.display().to_string()))?;
        let documents: Vec<Document> = serde_json::from_slice(&bytes)
            .map_err(|e| Error::InvalidConfig(format!("{} is not a valid corpus: {e}", path.display())))?;
        let corpus = Self::with_fingerprint(documents, blake3::hash(&bytes).to_hex().to_string())?;
        tracing::info!(
            path = %path.display(),
            documents = corpus.len(),
            dim = corpus.dim(),
            fingerprint = %corpus.fingerprint(),
            "loaded corpus"
        );
        Ok(corpus)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::InvalidConfig(format!("{}: {e}", parent.display())))?;
        }
        let json = serde_json::to_vec_pretty(&self.documents).map_err(|e| Error::InvalidConfig(e.to_string()))?;
        fs::write(path, json).map_err(|e| Error::InvalidConfig(format!("{}: {e}", path.display())))
    }

    pub fn documents(&self) -> &[Document] { &self.documents }

    /// Embedding dimensionality shared by every document (0 for an empty corpus).
    pub fn dim(&self) -> usize { self.dim }

    pub fn len(&self) -> usize { self.documents.len() }

    pub fn is_empty(&self) -> bool { self.documents.is_empty() }

    /// blake3 hex digest of the snapshot this corpus was built from.
    pub fn fingerprint(&self) -> &str { &self.fingerprint }
}

fn fingerprint_documents(documents: &[Document]) -> String {
    let mut hasher = blake3::Hasher::new();
    for doc in documents {
        hasher.update(doc.id.as_bytes());
        hasher.update(&[0]);
        hasher.update(doc.text.as_bytes());
        hasher.update(&[0]);
        for x in &doc.embedding { hasher.update(&x.to_le_bytes()); }
    }
    hasher.finalize().to_hex().to_string()
}
