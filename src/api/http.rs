//! reqwest-backed implementation of `Backend`.
//!
//! # Security Note - Logging
//!
//! The session token is sent as a bearer `Authorization` header. It is wrapped in
//! `RedactedHeader` and marked sensitive so that it shows up as `[REDACTED]` even
//! when `ROSTER_LOG=reqwest=debug` is enabled.

use std::fmt;
use std::time::Duration;

use reqwest::header::{self, HeaderValue};
use reqwest::{Client, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use url::Url;

use super::Backend;
use super::envelope::{failure_from_body, unwrap_envelope};
use crate::config::Config;
use crate::error::{ConsoleError, RequestFailure, Result};
use crate::i18n::{BilingualMessage, Language};
use crate::query::QueryParams;

/// Wrapper for sensitive header values that redacts the value when formatted.
struct RedactedHeader {
    value: String,
}

impl RedactedHeader {
    fn bearer(token: &str) -> Self {
        Self {
            value: format!("Bearer {token}"),
        }
    }

    fn as_header_value(&self) -> Result<HeaderValue> {
        let mut value = HeaderValue::from_str(&self.value)
            .map_err(|_| ConsoleError::Config("session token contains invalid characters".into()))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Display for RedactedHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl fmt::Debug for RedactedHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedactedHeader")
            .field("value", &"[REDACTED]")
            .finish()
    }
}

/// HTTP client for the roster API
pub struct HttpBackend {
    client: Client,
    base_url: Url,
    token: Option<SecretString>,
    language: Language,
    timeout: Option<Duration>,
}

impl HttpBackend {
    /// Create a backend rooted at `base_url` with no credentials and no timeout.
    pub fn new(mut base_url: Url) -> Result<Self> {
        // Url::join replaces the last segment unless the base ends with '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ConsoleError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            token: None,
            language: Language::default(),
            timeout: None,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let mut backend = Self::new(config.base_url()?)?.with_language(config.language);
        if let Some(token) = config.token() {
            backend = backend.with_token(token);
        }
        if let Some(timeout) = config.request_timeout() {
            backend = backend.with_timeout(timeout);
        }
        Ok(backend)
    }

    pub fn with_token(mut self, token: SecretString) -> Self {
        self.token = Some(token);
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    fn transport_error(&self, err: reqwest::Error) -> ConsoleError {
        if err.is_timeout() {
            return ConsoleError::Timeout(self.timeout.unwrap_or_default());
        }
        ConsoleError::RequestFailed(RequestFailure::new(
            err.status().map(|s| s.as_u16()),
            BilingualMessage::english(err.to_string()),
        ))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value> {
        let mut request = request.header(header::ACCEPT_LANGUAGE, self.language.to_string());
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }
        if let Some(token) = &self.token {
            let auth = RedactedHeader::bearer(token.expose_secret());
            request = request.header(header::AUTHORIZATION, auth.as_header_value()?);
        }

        let response = request.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| self.transport_error(e))?;

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            match serde_json::from_slice::<Value>(&bytes) {
                Ok(body) => body,
                Err(e) if status.is_success() => return Err(e.into()),
                Err(_) => Value::Null,
            }
        };

        if !status.is_success() {
            let failure = failure_from_body(&body, status.as_u16(), status.canonical_reason());
            tracing::warn!("roster API returned {status}: {}", failure.message);
            return Err(ConsoleError::from_failure(failure));
        }

        unwrap_envelope(body, Some(status.as_u16()))
    }
}

impl Backend for HttpBackend {
    async fn get(&self, path: &str, params: &QueryParams) -> Result<Value> {
        let url = self.url(path)?;
        tracing::debug!("GET {url} {params:?}");
        self.send(self.client.get(url).query(params)).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        let url = self.url(path)?;
        tracing::debug!("POST {url}");
        self.send(self.client.post(url).json(body)).await
    }

    async fn delete(&self, path: &str, body: &Value) -> Result<Value> {
        let url = self.url(path)?;
        tracing::debug!("DELETE {url}");
        self.send(self.client.delete(url).json(body)).await
    }
}
