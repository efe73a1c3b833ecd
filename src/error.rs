use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::i18n::{BilingualMessage, text};

/// Error categories the views care about when deciding how to render a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected client-side, never reached the network
    Validation,
    /// Any 4xx/5xx/transport failure not covered below
    RequestFailed,
    /// 404 on a single-entity fetch
    NotFound,
    /// 403
    Forbidden,
    /// The configured request timeout elapsed
    Timeout,
}

/// Details extracted from a failed backend call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestFailure {
    /// HTTP status, when the failure came from a response
    pub status: Option<u16>,
    pub message: BilingualMessage,
    /// Field-level error strings from the `errors` array
    pub errors: Vec<String>,
}

impl RequestFailure {
    pub fn new(status: Option<u16>, message: BilingualMessage) -> Self {
        Self {
            status,
            message,
            errors: Vec::new(),
        }
    }

    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = errors;
        self
    }
}

impl fmt::Display for RequestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(status) = self.status {
            write!(f, "HTTP {status}: ")?;
        }
        write!(f, "{}", self.message)?;
        if !self.errors.is_empty() {
            write!(f, " ({})", self.errors.join("; "))?;
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("{0}")]
    Validation(BilingualMessage),

    #[error("request failed: {0}")]
    RequestFailed(RequestFailure),

    #[error("not found: {0}")]
    NotFound(RequestFailure),

    #[error("forbidden: {0}")]
    Forbidden(RequestFailure),

    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConsoleError {
    /// Build the right variant for a failure based on its HTTP status.
    pub fn from_failure(failure: RequestFailure) -> Self {
        match failure.status {
            Some(404) => ConsoleError::NotFound(failure),
            Some(403) => ConsoleError::Forbidden(failure),
            _ => ConsoleError::RequestFailed(failure),
        }
    }

    pub fn validation(message: BilingualMessage) -> Self {
        ConsoleError::Validation(message)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ConsoleError::Validation(_) | ConsoleError::InvalidInput(_) => ErrorKind::Validation,
            ConsoleError::NotFound(_) => ErrorKind::NotFound,
            ConsoleError::Forbidden(_) => ErrorKind::Forbidden,
            ConsoleError::Timeout(_) => ErrorKind::Timeout,
            ConsoleError::RequestFailed(_)
            | ConsoleError::Config(_)
            | ConsoleError::InvalidUrl(_)
            | ConsoleError::Io(_)
            | ConsoleError::YamlParse(_)
            | ConsoleError::Json(_) => ErrorKind::RequestFailed,
        }
    }

    /// The bilingual message a view should show for this error.
    pub fn message(&self) -> BilingualMessage {
        match self {
            ConsoleError::Validation(msg) => msg.clone(),
            ConsoleError::RequestFailed(f) => with_fallback(&f.message, text::REQUEST_FAILED),
            ConsoleError::NotFound(f) => with_fallback(&f.message, text::NOT_FOUND),
            ConsoleError::Forbidden(f) => with_fallback(&f.message, text::FORBIDDEN),
            ConsoleError::Timeout(_) => BilingualMessage::from_text(text::TIMEOUT),
            other => BilingualMessage::english(other.to_string()),
        }
    }

    /// Field-level errors reported by the backend, if any.
    pub fn field_errors(&self) -> &[String] {
        match self {
            ConsoleError::RequestFailed(f)
            | ConsoleError::NotFound(f)
            | ConsoleError::Forbidden(f) => &f.errors,
            _ => &[],
        }
    }
}

fn with_fallback(msg: &BilingualMessage, fallback: crate::i18n::UiText) -> BilingualMessage {
    if msg.is_empty() {
        BilingualMessage::from_text(fallback)
    } else {
        msg.clone()
    }
}

pub type Result<T> = std::result::Result<T, ConsoleError>;
