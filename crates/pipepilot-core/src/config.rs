//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env vars.
//! Nested keys are addressed with a double underscore, e.g. `APP_OPENAI__CHAT_MODEL`.
//! Provides helpers to expand `~` and `${VAR}` and to resolve relative paths
//! against a known base directory.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Environment variable consulted when `openai.api_key` is not configured.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::from_figment(Self::layered(&env_name), &env_name)
    }

    /// Build from an explicit figment; used by tests and embedders of this crate.
    pub fn from_figment(figment: Figment, env_name: &str) -> Result<Self> {
        let config = Self { figment };
        config.validate_for_env(env_name)?;
        Ok(config)
    }

    fn layered(env_name: &str) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Settings::default())).merge(Toml::file("config.toml"));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment.merge(Env::prefixed("APP_").split("__"))
    }

    pub fn get<T>(&self, key: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| Error::InvalidConfig(format!("Failed to get '{key}': {e}")))
    }

    pub fn settings(&self) -> Result<Settings> {
        self.figment
            .extract()
            .map_err(|e| Error::InvalidConfig(e.to_string()))
    }

    fn validate_for_env(&self, env: &str) -> Result<()> {
        let settings = self.settings()?;
        if settings.rag.top_k == 0 {
            return Err(Error::InvalidConfig("rag.top_k must be at least 1".to_string()));
        }
        if let ("prod" | "production", None) = (env, settings.openai.resolve_api_key()) {
            tracing::warn!("{API_KEY_ENV} is not set; retrieval will fail and classification will fall back to 'other'");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub data: DataSettings,
    pub openai: OpenAiSettings,
    pub rag: RagSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { host: "127.0.0.1".to_string(), port: 3000 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    pub corpus_path: String,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self { corpus_path: "data/embeddings.json".to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiSettings {
    pub base_url: String,
    pub embedding_model: String,
    pub chat_model: String,
    pub route_model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            embedding_model: "text-embedding-3-small".to_string(),
            chat_model: "gpt-4o-mini".to_string(),
            route_model: "gpt-4.1-mini".to_string(),
            api_key: None,
        }
    }
}

impl OpenAiSettings {
    /// Configured key, else `OPENAI_API_KEY`. Blank values count as unset.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| env::var(API_KEY_ENV).ok())
            .filter(|k| !k.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RagSettings {
    pub top_k: usize,
    pub temperature: f32,
}

impl Default for RagSettings {
    fn default() -> Self {
        Self { top_k: 5, temperature: 0.2 }
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    // Expand env vars first
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
