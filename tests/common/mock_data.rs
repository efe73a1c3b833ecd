//! Mock data builders and an in-memory backend.
//!
//! The backend records every request and answers through a handler closure,
//! optionally after a delay, so tests can control the order responses arrive in.

use std::sync::Mutex;
use std::time::Duration;

use roster_console::api::Backend;
use roster_console::error::{ConsoleError, RequestFailure, Result};
use roster_console::i18n::BilingualMessage;
use roster_console::query::QueryParams;
use serde_json::{Value, json};

/// JSON for a role record
pub fn role(id: i64, name: &str) -> Value {
    json!({ "id": id, "name": name, "isActive": true })
}

/// JSON for a current manager
pub fn manager(id: i64, name: &str, department_id: i64, department: &str) -> Value {
    json!({
        "id": id,
        "fullName": name,
        "email": format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        "departmentId": department_id,
        "departmentName": department,
        "assignedAt": "2024-03-01T09:00:00",
        "isActive": true,
    })
}

/// A server-paginated list payload
pub fn paged(items: Vec<Value>, page: usize, page_size: usize, total: usize) -> Value {
    json!({
        "items": items,
        "page": page,
        "pageSize": page_size,
        "totalCount": total,
    })
}

/// One recorded backend call
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: &'static str,
    pub path: String,
    pub params: QueryParams,
    pub body: Option<Value>,
}

impl Request {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// What the mock answers with
pub struct Reply {
    pub delay: Duration,
    pub result: Result<Value>,
}

impl Reply {
    pub fn ok(value: Value) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Ok(value),
        }
    }

    pub fn fail(status: u16, en: &str, ar: &str) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Err(ConsoleError::from_failure(RequestFailure::new(
                Some(status),
                BilingualMessage::new(en, ar),
            ))),
        }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

type Handler = Box<dyn Fn(&Request) -> Reply + Send + Sync>;

pub struct MockBackend {
    handler: Handler,
    requests: Mutex<Vec<Request>>,
}

impl MockBackend {
    pub fn new(handler: impl Fn(&Request) -> Reply + Send + Sync + 'static) -> Self {
        Self {
            handler: Box::new(handler),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Always answer with `value`
    pub fn returning(value: Value) -> Self {
        Self::new(move |_| Reply::ok(value.clone()))
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_with(&self, method: &str) -> Vec<Request> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method)
            .collect()
    }

    async fn handle(&self, request: Request) -> Result<Value> {
        let reply = (self.handler)(&request);
        self.requests.lock().unwrap().push(request);
        if !reply.delay.is_zero() {
            tokio::time::sleep(reply.delay).await;
        }
        reply.result
    }
}

impl Backend for MockBackend {
    async fn get(&self, path: &str, params: &QueryParams) -> Result<Value> {
        self.handle(Request {
            method: "GET",
            path: path.to_string(),
            params: params.clone(),
            body: None,
        })
        .await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        self.handle(Request {
            method: "POST",
            path: path.to_string(),
            params: QueryParams::new(),
            body: Some(body.clone()),
        })
        .await
    }

    async fn delete(&self, path: &str, body: &Value) -> Result<Value> {
        self.handle(Request {
            method: "DELETE",
            path: path.to_string(),
            params: QueryParams::new(),
            body: Some(body.clone()),
        })
        .await
    }
}
