//! HTTP surface: `POST /api/rag`, `POST /api/routeText`, `GET /health`.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use pipepilot_core::config::{resolve_with_base, Settings};
use pipepilot_core::Error;
use pipepilot_rag::RagPipeline;
use pipepilot_route::Classifier;
use pipepilot_vector::CorpusCache;

pub struct AppState {
    pub rag: RagPipeline,
    pub classifier: Classifier,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    /// Wire the pipelines from configuration. A missing API key leaves the
    /// capabilities unset; requests then fail (retrieval) or degrade (classification).
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let corpus_path = resolve_with_base(&std::env::current_dir()?, &settings.data.corpus_path);
        let corpus = Arc::new(CorpusCache::new(corpus_path).with_label(&settings.data.corpus_path));

        let mut rag = RagPipeline::new(corpus).with_settings(&settings.rag);
        match pipepilot_llm::default_embedder(&settings.openai) {
            Ok(embedder) => rag = rag.with_embedder(embedder),
            Err(e) => tracing::warn!(error = %e, "query embedder unavailable"),
        }
        match pipepilot_llm::answer_model(&settings.openai) {
            Ok(model) => rag = rag.with_synthesizer(model),
            Err(e) => tracing::warn!(error = %e, "answer synthesizer unavailable"),
        }
        let classifier = Classifier::new(pipepilot_llm::route_model(&settings.openai).ok());
        tracing::info!(
            retrieval_configured = rag.is_configured(),
            classifier_configured = classifier.is_configured(),
            corpus = %rag.corpus().path().display(),
            "application state ready"
        );
        Ok(Self { rag, classifier })
    }
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/api/rag", post(rag_handler))
        .route("/api/routeText", post(route_text_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(state: SharedState, host: &str, port: u16) -> anyhow::Result<()> {
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

/// Retrieval error rendered as `{error, detail?}`.
pub struct ApiError(pub Error);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_client_error() { StatusCode::BAD_REQUEST } else { StatusCode::INTERNAL_SERVER_ERROR };
        if status.is_server_error() {
            tracing::error!(error = %self.0, detail = ?self.0.detail(), "retrieval failed");
        }
        let mut body = json!({ "error": self.0.to_string() });
        if let Some(detail) = self.0.detail() {
            body["detail"] = json!(detail);
        }
        (status, Json(body)).into_response()
    }
}

async fn rag_handler(State(state): State<SharedState>, body: Bytes) -> Response {
    let question = serde_json::from_slice::<Value>(&body)
        .ok()
        .and_then(|v| v.get("question").and_then(Value::as_str).map(str::to_string))
        .filter(|q| !q.is_empty());
    let Some(question) = question else {
        return ApiError(Error::InvalidInput("Missing 'question' string".to_string())).into_response();
    };
    match state.rag.answer_question(&question).await {
        Ok(answer) => Json(answer).into_response(),
        Err(e) => ApiError(e).into_response(),
    }
}

/// Always 200. An unparsable body is an empty message; a `history` of any
/// shape is forwarded as-is and never costs the caller their `text`.
async fn route_text_handler(State(state): State<SharedState>, body: Bytes) -> Response {
    let request = serde_json::from_slice::<Value>(&body).unwrap_or(Value::Null);
    let text = message_text(request.get("text"));
    let history = request.get("history").cloned().unwrap_or_else(|| json!([]));
    let result = state.classifier.classify(&text, &history).await;
    (StatusCode::OK, Json(result)).into_response()
}

/// Strings pass through, other scalars are stringified, anything else is empty.
fn message_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => v.to_string(),
        _ => String::new(),
    }
}

async fn health_handler(State(state): State<SharedState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "corpus_loaded": state.rag.corpus().is_loaded(),
        "retrieval_configured": state.rag.is_configured(),
        "classifier_configured": state.classifier.is_configured(),
    }))
}
