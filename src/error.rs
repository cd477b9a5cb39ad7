//! Unified SDK error types.

use thiserror::Error;

/// Coarse classification of a fetch failure.
///
/// View models keep the kind for logging; user-facing text does not vary by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The upstream resource does not exist (HTTP 404).
    NotFound,
    /// Network, DNS, timeout, or any other non-2xx response.
    Transport,
    /// The payload could not be parsed into the expected shape.
    Malformed,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::Transport => "transport",
            ErrorKind::Malformed => "malformed",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SdkError {
    /// Map this error onto the fetch-failure taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SdkError::Http(e) => e.kind(),
            SdkError::Validation(_) | SdkError::Serde(_) => ErrorKind::Malformed,
            SdkError::Config(_) => ErrorKind::Transport,
        }
    }
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Timeout")]
    Timeout,

    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },
}

impl HttpError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            HttpError::NotFound(_) => ErrorKind::NotFound,
            #[cfg(feature = "http")]
            HttpError::Reqwest(e) if e.is_decode() => ErrorKind::Malformed,
            #[cfg(feature = "http")]
            HttpError::Reqwest(e) if e.status().map(|s| s.as_u16()) == Some(404) => {
                ErrorKind::NotFound
            }
            _ => ErrorKind::Transport,
        }
    }
}
