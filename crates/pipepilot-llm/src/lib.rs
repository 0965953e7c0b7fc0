//! pipepilot-llm
//!
//! Remote embedding and chat capabilities behind the `pipepilot-core` traits,
//! plus a deterministic fake embedder. `APP_USE_FAKE_EMBEDDINGS=1` switches the
//! default embedder to the fake one for fast, offline runs.

pub mod fake;
pub mod openai;

use std::sync::Arc;

use pipepilot_core::config::OpenAiSettings;
use pipepilot_core::traits::{ChatModel, Embedder};
use pipepilot_core::Result;

pub use fake::FakeEmbedder;
pub use openai::{OpenAiChat, OpenAiClient, OpenAiEmbedder};

/// Dimensionality of the fake embedder; matches `text-embedding-3-small`.
pub const FAKE_EMBEDDING_DIM: usize = 1536;

pub fn use_fake_embeddings() -> bool {
    std::env::var("APP_USE_FAKE_EMBEDDINGS")
        .ok()
        .is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

/// The query embedder selected by configuration.
pub fn default_embedder(settings: &OpenAiSettings) -> Result<Arc<dyn Embedder>> {
    if use_fake_embeddings() {
        tracing::info!("using FakeEmbedder");
        return Ok(Arc::new(FakeEmbedder::new(FAKE_EMBEDDING_DIM)));
    }
    let client = OpenAiClient::from_settings(settings)?;
    Ok(Arc::new(OpenAiEmbedder::new(client, settings.embedding_model.clone())))
}

/// Chat capability used to synthesize grounded answers.
pub fn answer_model(settings: &OpenAiSettings) -> Result<Arc<dyn ChatModel>> {
    let client = OpenAiClient::from_settings(settings)?;
    Ok(Arc::new(OpenAiChat::new(client, settings.chat_model.clone())))
}

/// Chat capability used to route customer messages.
pub fn route_model(settings: &OpenAiSettings) -> Result<Arc<dyn ChatModel>> {
    let client = OpenAiClient::from_settings(settings)?;
    Ok(Arc::new(OpenAiChat::new(client, settings.route_model.clone())))
}
