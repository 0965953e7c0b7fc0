//! Builds the embedded corpus snapshot from a directory of `.txt` files.

use std::path::Path;

use pipepilot_core::corpus::Corpus;
use pipepilot_core::passages::PassageSplitter;
use pipepilot_core::traits::Embedder;
use pipepilot_core::types::Document;
use pipepilot_core::Result;

/// Embed every passage under `data_dir` and write the snapshot to `out`.
/// Returns the number of documents written.
pub async fn build_corpus(data_dir: &Path, out: &Path, embedder: &dyn Embedder) -> Result<usize> {
    let passages = PassageSplitter::new().process_directory(data_dir)?;
    let mut documents = Vec::with_capacity(passages.len());
    for (i, passage) in passages.into_iter().enumerate() {
        let embedding = embedder.embed(&passage.text).await?;
        tracing::debug!(id = %passage.id, "embedded passage {}", i + 1);
        documents.push(Document { id: passage.id, text: passage.text, embedding });
    }
    let corpus = Corpus::new(documents)?;
    corpus.save(out)?;
    tracing::info!(
        out = %out.display(),
        documents = corpus.len(),
        embedder = embedder.embedder_id(),
        fingerprint = %corpus.fingerprint(),
        "wrote corpus"
    );
    Ok(corpus.len())
}
