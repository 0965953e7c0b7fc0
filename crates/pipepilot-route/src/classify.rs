//! Best-effort routing of a customer message to a service category.
//!
//! `Classifier::classify` never fails: a missing credential, an upstream error
//! or unparsable model output all degrade to `{other, ""}`.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::{Arc, LazyLock};

use pipepilot_core::traits::ChatModel;
use pipepilot_core::types::ChatRequest;

use crate::normalize::normalize;
use crate::taxonomy::Category;

pub const MAX_TEXT_CHARS: usize = 1000;
pub const MAX_HISTORY_CHARS: usize = 1500;
pub const MAX_FOLLOWUP_CHARS: usize = 180;

static JSON_OBJECT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("JSON object pattern"));

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub category: Category,
    pub followup: String,
}

pub struct Classifier {
    model: Option<Arc<dyn ChatModel>>,
}

impl Classifier {
    pub fn new(model: Option<Arc<dyn ChatModel>>) -> Self {
        Self { model }
    }

    /// A classifier with no remote model; every message routes to `other`.
    pub fn unconfigured() -> Self {
        Self { model: None }
    }

    pub fn is_configured(&self) -> bool { self.model.is_some() }

    /// `history` is opaque conversation context; it is serialized as-is into the prompt.
    pub async fn classify(&self, text: &str, history: &Value) -> ClassificationResult {
        let text = truncate_chars(text, MAX_TEXT_CHARS);
        if text.trim().is_empty() {
            return ClassificationResult::default();
        }
        let Some(model) = &self.model else {
            tracing::debug!("classifier unconfigured; routing to other");
            return ClassificationResult::default();
        };

        let history = history.to_string();
        let user = format!("Text: {text}\nHistory: {}\nOutput JSON only.", truncate_chars(&history, MAX_HISTORY_CHARS));
        let request = ChatRequest::new(system_prompt(), user).json();

        match model.complete(&request).await {
            Ok(raw) => {
                tracing::debug!(raw = %truncate_chars(&raw, 300), "classifier output");
                interpret(&raw)
            }
            Err(e) => {
                tracing::warn!(error = %e, detail = ?e.detail(), "classification failed; routing to other");
                ClassificationResult::default()
            }
        }
    }
}

pub fn system_prompt() -> String {
    format!(
        "You are a router for a plumbing company.
Return ONLY a JSON object with this exact shape:
{{\"category\":\"<one-of-whitelist>\",\"followup\":\"<short question or empty string>\"}}
Whitelist: {}.
Rules:
- toilets → plumbing:toilet_repair_install
- no hot water / water heater → plumbing:water_heaters
- clogs / backups / hydro-jet → sewer_drains:drain_cleaning
- sewer camera → sewer_drains:video_camera_inspection
- flooding now → plumbing:emergency
Output JSON only. No markdown, no prose.",
        Category::whitelist()
    )
}

/// Turn raw model output into a result, recovering from any malformed shape.
pub fn interpret(raw: &str) -> ClassificationResult {
    let parsed = parse_lenient(extract_json_object(raw));
    let category = match parsed.get("category") {
        Some(Value::String(s)) => normalize(s),
        Some(Value::Null) | None => normalize(""),
        Some(other) => normalize(&other.to_string()),
    };
    let followup = parsed
        .get("followup")
        .and_then(Value::as_str)
        .map(|s| truncate_chars(s, MAX_FOLLOWUP_CHARS).to_string())
        .unwrap_or_default();
    ClassificationResult { category, followup }
}

/// The raw text when it already starts with `{`, else the first `{...}` span, else `{}`.
pub fn extract_json_object(raw: &str) -> &str {
    if raw.trim_start().starts_with('{') {
        return raw;
    }
    JSON_OBJECT.find(raw).map_or("{}", |m| m.as_str())
}

fn parse_lenient(span: &str) -> Map<String, Value> {
    match serde_json::from_str::<Value>(span) {
        Ok(Value::Object(map)) => map,
        Ok(_) | Err(_) => Map::new(),
    }
}

/// Prefix of at most `max` characters.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
