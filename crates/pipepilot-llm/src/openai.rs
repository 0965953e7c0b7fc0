//! OpenAI-compatible HTTP capabilities: `/embeddings` and `/chat/completions`.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use pipepilot_core::config::{OpenAiSettings, API_KEY_ENV};
use pipepilot_core::traits::{ChatModel, Embedder};
use pipepilot_core::types::ChatRequest;
use pipepilot_core::{Error, Result};

/// Connection details shared by every capability talking to one endpoint.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient").field("base_url", &self.base_url).finish_non_exhaustive()
    }
}

impl OpenAiClient {
    /// Fails with `Unconfigured` when no API key is configured or exported.
    pub fn from_settings(settings: &OpenAiSettings) -> Result<Self> {
        let api_key = settings.resolve_api_key().ok_or_else(|| Error::Unconfigured(API_KEY_ENV.to_string()))?;
        Ok(Self::new(&settings.base_url, api_key))
    }

    pub fn new(base_url: &str, api_key: String) -> Self {
        Self { client: Client::new(), base_url: base_url.trim_end_matches('/').to_string(), api_key }
    }

    async fn post(&self, stage: &'static str, path: &str, body: &Value) -> Result<Value> {
        let url = format!("{}/{path}", self.base_url);
        debug!(url = %url, "sending {stage} request");
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::upstream(stage, None, format!("Request failed: {e}")))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::upstream(stage, Some(status.as_u16()), format!("Failed to read response body: {e}")))?;
        if !status.is_success() {
            return Err(Error::upstream(stage, Some(status.as_u16()), text));
        }
        serde_json::from_str(&text).map_err(|e| Error::upstream(stage, Some(status.as_u16()), format!("Invalid JSON: {e}")))
    }
}

pub struct OpenAiEmbedder {
    client: OpenAiClient,
    model: String,
    id: String,
}

impl OpenAiEmbedder {
    pub fn new(client: OpenAiClient, model: impl Into<String>) -> Self {
        let model = model.into();
        let id = format!("openai:{model}");
        Self { client, model, id }
    }
}

#[async_trait]
impl Embedder for OpenAiEmbedder {
    fn embedder_id(&self) -> &str { &self.id }

    async fn embed(&self, text: &str) -> Result<Vec<f64>> {
        let body = json!({ "model": self.model, "input": text });
        let response = self.client.post("embedding", "embeddings", &body).await?;
        parse_embedding_response(&response)
    }
}

pub struct OpenAiChat {
    client: OpenAiClient,
    model: String,
}

impl OpenAiChat {
    pub fn new(client: OpenAiClient, model: impl Into<String>) -> Self {
        Self { client, model: model.into() }
    }
}

#[async_trait]
impl ChatModel for OpenAiChat {
    fn model(&self) -> &str { &self.model }

    async fn complete(&self, request: &ChatRequest) -> Result<String> {
        let body = chat_body(&self.model, request);
        let response = self.client.post("chat", "chat/completions", &body).await?;
        parse_chat_response(&response)
    }
}

fn chat_body(model: &str, request: &ChatRequest) -> Value {
    let mut body = json!({
        "model": model,
        "messages": [
            { "role": "system", "content": request.system },
            { "role": "user", "content": request.user },
        ],
    });
    if let Some(temperature) = request.temperature {
        body["temperature"] = json!(temperature);
    }
    if request.json_mode {
        body["response_format"] = json!({ "type": "json_object" });
    }
    body
}

/// Extract `data[0].embedding` from an embeddings response.
pub fn parse_embedding_response(body: &Value) -> Result<Vec<f64>> {
    let values = body
        .pointer("/data/0/embedding")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::MalformedModelOutput("response has no data[0].embedding".to_string()))?;
    values
        .iter()
        .map(|v| v.as_f64().ok_or_else(|| Error::MalformedModelOutput("embedding contains a non-number".to_string())))
        .collect()
}

/// Extract `choices[0].message.content` from a chat completion response.
pub fn parse_chat_response(body: &Value) -> Result<String> {
    body.pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| Error::MalformedModelOutput("response has no choices[0].message.content".to_string()))
}
