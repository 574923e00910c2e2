use serde::Serialize;
use thiserror::Error;

/// Message shown to the user for every failure except a validation failure.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "Failed to generate recipes. The AI might be busy, please try again later.";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("GEMINI_API_KEY (or API_KEY) environment variable is not set")]
    MissingApiKey,
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Failures of the outbound call itself.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),
    #[error("status={status} body={body}")]
    Status { status: u16, body: String },
    #[error("prompt blocked: {0}")]
    Blocked(String),
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("at least one ingredient required")]
    Validation,
    #[error("received an empty response from the AI")]
    EmptyResponse,
    #[error("response is not a recipe list: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    EmptyResponse,
    Parse,
    Transport,
}

impl GenerationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GenerationError::Validation => ErrorKind::Validation,
            GenerationError::EmptyResponse => ErrorKind::EmptyResponse,
            GenerationError::Parse(_) => ErrorKind::Parse,
            GenerationError::Transport(_) => ErrorKind::Transport,
        }
    }

    /// Text safe to show in the interface. Only validation failures carry
    /// their own wording; everything else collapses to the generic message.
    pub fn user_message(&self) -> String {
        match self {
            GenerationError::Validation => self.to_string(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

/// Drops the request URL so logged errors never carry credentials or
/// query parameters.
impl From<reqwest::Error> for GenerationError {
    fn from(e: reqwest::Error) -> Self {
        GenerationError::Transport(TransportError::Http(e.without_url()))
    }
}
