use serde::{Deserialize, Serialize};

pub type DocumentId = String;

/// A passage of the knowledge base together with its precomputed embedding.
///
/// All documents of one corpus share the same embedding dimensionality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub text: String,
    pub embedding: Vec<f64>,
}

/// A document scored against a query. `score` is raw cosine similarity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    pub id: DocumentId,
    pub text: String,
    pub score: f64,
}

/// Source reference returned next to a synthesized answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRef {
    pub id: DocumentId,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalAnswer {
    pub answer: String,
    pub sources: Vec<SourceRef>,
}

/// A single-shot request to a remote generation capability.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub system: String,
    pub user: String,
    pub temperature: Option<f32>,
    /// Ask the model to emit a bare JSON object.
    pub json_mode: bool,
}

impl ChatRequest {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self { system: system.into(), user: user.into(), temperature: None, json_mode: false }
    }

    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    #[must_use]
    pub fn json(mut self) -> Self {
        self.json_mode = true;
        self
    }
}
