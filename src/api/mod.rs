//! Access to the roster REST backend.
//!
//! `Backend` is the seam between the views and the network. `HttpBackend`
//! talks to the real API; tests substitute an in-memory implementation.

pub mod envelope;
pub mod http;

use serde_json::Value;

use crate::error::Result;
use crate::query::QueryParams;

pub use envelope::{ApiEnvelope, ListPayload, PagedData};
pub use http::HttpBackend;

/// Common interface for the roster backend.
///
/// Implementations return the response payload with any success envelope
/// already removed, and map failure envelopes and HTTP errors to
/// `ConsoleError`.
pub trait Backend: Send + Sync {
    /// `GET path?params`
    fn get(
        &self,
        path: &str,
        params: &QueryParams,
    ) -> impl std::future::Future<Output = Result<Value>> + Send;

    /// `POST path` with a JSON body
    fn post(
        &self,
        path: &str,
        body: &Value,
    ) -> impl std::future::Future<Output = Result<Value>> + Send;

    /// `DELETE path` with a JSON body
    fn delete(
        &self,
        path: &str,
        body: &Value,
    ) -> impl std::future::Future<Output = Result<Value>> + Send;
}
