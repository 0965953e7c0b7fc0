use async_trait::async_trait;

use crate::types::ChatRequest;
use crate::Result;

/// Remote (or local) capability turning text into a vector.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Stable identifier for the provider/model (e.g., `openai:text-embedding-3-small`).
    fn embedder_id(&self) -> &str;
    async fn embed(&self, text: &str) -> Result<Vec<f64>>;
}

/// Remote capability producing a single completion for a system + user prompt.
#[async_trait]
pub trait ChatModel: Send + Sync {
    fn model(&self) -> &str;
    async fn complete(&self, request: &ChatRequest) -> Result<String>;
}
