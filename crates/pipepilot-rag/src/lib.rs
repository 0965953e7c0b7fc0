//! pipepilot-rag
//!
//! Grounded question answering: embed the question, rank the corpus, and have
//! a chat model answer from the top passages only.

pub mod prompt;

use std::sync::Arc;

use pipepilot_core::config::{RagSettings, API_KEY_ENV};
use pipepilot_core::traits::{ChatModel, Embedder};
use pipepilot_core::types::{ChatRequest, RetrievalAnswer, SourceRef};
use pipepilot_core::{Error, Result};
use pipepilot_vector::{rank, CorpusCache, DEFAULT_TOP_K};

use crate::prompt::{build_context, build_user_prompt, SYSTEM_PROMPT};

/// Decimal places kept on similarity scores returned to callers.
pub const SCORE_DECIMALS: i32 = 4;

pub const DEFAULT_TEMPERATURE: f32 = 0.2;

pub struct RagPipeline {
    corpus: Arc<CorpusCache>,
    embedder: Option<Arc<dyn Embedder>>,
    synthesizer: Option<Arc<dyn ChatModel>>,
    top_k: usize,
    temperature: f32,
}

impl RagPipeline {
    pub fn new(corpus: Arc<CorpusCache>) -> Self {
        Self { corpus, embedder: None, synthesizer: None, top_k: DEFAULT_TOP_K, temperature: DEFAULT_TEMPERATURE }
    }

    #[must_use]
    pub fn with_embedder(mut self, embedder: Arc<dyn Embedder>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    #[must_use]
    pub fn with_synthesizer(mut self, synthesizer: Arc<dyn ChatModel>) -> Self {
        self.synthesizer = Some(synthesizer);
        self
    }

    #[must_use]
    pub fn with_settings(mut self, settings: &RagSettings) -> Self {
        self.top_k = settings.top_k.max(1);
        self.temperature = settings.temperature;
        self
    }

    pub fn is_configured(&self) -> bool { self.embedder.is_some() && self.synthesizer.is_some() }

    pub fn corpus(&self) -> &CorpusCache { &self.corpus }

    pub async fn answer_question(&self, question: &str) -> Result<RetrievalAnswer> {
        if question.trim().is_empty() {
            return Err(Error::InvalidInput("Missing 'question' string".to_string()));
        }
        let corpus = self.corpus.get_or_load()?;
        let (Some(embedder), Some(synthesizer)) = (&self.embedder, &self.synthesizer) else {
            return Err(Error::Unconfigured(API_KEY_ENV.to_string()));
        };

        let query = embedder.embed(question).await?;
        let ranked = rank(&query, corpus.documents(), self.top_k)?;
        tracing::debug!(
            embedder = embedder.embedder_id(),
            top = ?ranked.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(),
            "retrieved context"
        );

        let context = build_context(&ranked);
        let request = ChatRequest::new(SYSTEM_PROMPT, build_user_prompt(&context, question)).with_temperature(self.temperature);
        let answer = synthesizer.complete(&request).await?;

        let sources = ranked
            .into_iter()
            .map(|r| SourceRef { id: r.id, score: round_score(r.score) })
            .collect();
        Ok(RetrievalAnswer { answer, sources })
    }
}

pub fn round_score(score: f64) -> f64 {
    let scale = 10f64.powi(SCORE_DECIMALS);
    (score * scale).round() / scale
}
