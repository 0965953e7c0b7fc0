use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0} not set")]
    Unconfigured(String),

    #[error("{stage} failed")]
    Upstream {
        stage: &'static str,
        status: Option<u16>,
        detail: String,
    },

    #[error("Malformed model output: {0}")]
    MalformedModelOutput(String),

    #[error("Embedding dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("{0} not found")]
    CorpusUnavailable(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub fn upstream(stage: &'static str, status: Option<u16>, detail: impl Into<String>) -> Self {
        Self::Upstream { stage, status, detail: detail.into() }
    }

    /// True for errors caused by the caller rather than by this service or its upstreams.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    /// Diagnostic detail safe to hand back to a caller alongside the error message.
    pub fn detail(&self) -> Option<String> {
        match self {
            Self::Upstream { status: Some(status), detail, .. } => Some(format!("HTTP {status}: {detail}")),
            Self::Upstream { status: None, detail, .. } => Some(detail.clone()),
            Self::MalformedModelOutput(detail) => Some(detail.clone()),
            Self::DimensionMismatch { .. } => Some(self.to_string()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
