//! Response envelope handling.
//!
//! The roster API wraps most responses as `{ success, data, messageEn, messageAr }`
//! and failures as `{ success: false, message, errors, status }`. Some endpoints
//! skip the envelope and return a bare JSON array, and list payloads may be a
//! paginated object or a plain array. Everything is normalized here.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ConsoleError, RequestFailure, Result};
use crate::i18n::BilingualMessage;
use crate::list::ListPage;
use crate::list::pagination::PaginationMeta;
use crate::query::FilterState;

/// The `{ success, data, ... }` wrapper
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEnvelope {
    pub success: bool,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub message_en: Option<String>,
    #[serde(default)]
    pub message_ar: Option<String>,
    #[serde(default)]
    pub errors: Option<Value>,
    #[serde(default)]
    pub status: Option<u16>,
}

impl ApiEnvelope {
    pub fn bilingual_message(&self) -> BilingualMessage {
        let en = self
            .message_en
            .clone()
            .or_else(|| self.message.clone())
            .unwrap_or_default();
        BilingualMessage::new(en, self.message_ar.clone().unwrap_or_default())
    }

    fn into_failure(self, http_status: Option<u16>) -> RequestFailure {
        let message = self.bilingual_message();
        let errors = self.errors.as_ref().map(flatten_errors).unwrap_or_default();
        RequestFailure::new(self.status.or(http_status), message).with_errors(errors)
    }
}

/// List payload as sent by the backend
#[derive(Debug, Clone, PartialEq)]
pub enum ListPayload<T> {
    Envelope(PagedData<T>),
    BareList(Vec<T>),
}

/// Server-side paginated list
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedData<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub page_size: Option<usize>,
    #[serde(default)]
    pub total_count: Option<usize>,
}

impl<T> ListPayload<T> {
    /// Normalize into a page, using `filter` for anything the server left out.
    ///
    /// A bare list is the whole collection: page 1 of 1.
    pub fn into_page(self, filter: &FilterState) -> ListPage<T> {
        match self {
            ListPayload::Envelope(data) => {
                let total_count = data.total_count.unwrap_or(data.items.len());
                let pagination = PaginationMeta::new(
                    data.page.unwrap_or(filter.page()),
                    data.page_size.unwrap_or(filter.page_size()),
                    total_count,
                );
                ListPage {
                    items: data.items,
                    pagination,
                }
            }
            ListPayload::BareList(items) => {
                let pagination = PaginationMeta::single_page(items.len(), filter.page_size());
                ListPage { items, pagination }
            }
        }
    }

    pub fn into_items(self) -> Vec<T> {
        match self {
            ListPayload::Envelope(data) => data.items,
            ListPayload::BareList(items) => items,
        }
    }
}

/// Strip the success envelope from a response body.
///
/// Bodies that are not envelopes are returned unchanged.
pub fn unwrap_envelope(body: Value, http_status: Option<u16>) -> Result<Value> {
    if !is_envelope(&body) {
        return Ok(body);
    }

    let envelope: ApiEnvelope = serde_json::from_value(body)?;
    if envelope.success {
        Ok(envelope.data.unwrap_or(Value::Null))
    } else {
        Err(ConsoleError::from_failure(envelope.into_failure(http_status)))
    }
}

/// Build the failure for a non-2xx response body.
pub fn failure_from_body(body: &Value, http_status: u16, reason: Option<&str>) -> RequestFailure {
    let parsed = is_envelope(body)
        .then(|| serde_json::from_value::<ApiEnvelope>(body.clone()).ok())
        .flatten();

    let mut failure = match parsed {
        Some(envelope) => envelope.into_failure(Some(http_status)),
        None => {
            // ProblemDetails-style bodies: { title, detail, errors }
            let text = body
                .get("message")
                .or_else(|| body.get("detail"))
                .or_else(|| body.get("title"))
                .and_then(Value::as_str)
                .unwrap_or_default();
            let errors = body.get("errors").map(flatten_errors).unwrap_or_default();
            RequestFailure::new(Some(http_status), BilingualMessage::english(text))
                .with_errors(errors)
        }
    };

    if failure.message.is_empty()
        && let Some(reason) = reason
    {
        failure.message = BilingualMessage::english(reason);
    }
    failure
}

/// An object is a paged envelope, anything else must be an array of records.
pub fn parse_list<T: DeserializeOwned>(data: Value) -> Result<ListPayload<T>> {
    let payload = match data {
        Value::Object(_) => ListPayload::Envelope(serde_json::from_value(data)?),
        other => ListPayload::BareList(serde_json::from_value(other)?),
    };
    Ok(payload)
}

pub fn parse_data<T: DeserializeOwned>(data: Value) -> Result<T> {
    Ok(serde_json::from_value(data)?)
}

fn is_envelope(body: &Value) -> bool {
    body.as_object().is_some_and(|obj| obj.contains_key("success"))
}

/// `errors` may be a list of strings or a map of field name to messages.
fn flatten_errors(errors: &Value) -> Vec<String> {
    match errors {
        Value::Array(items) => items
            .iter()
            .filter_map(|e| e.as_str().map(str::to_string))
            .collect(),
        Value::Object(fields) => fields
            .iter()
            .flat_map(|(field, messages)| {
                let messages: Vec<String> = match messages {
                    Value::Array(list) => list
                        .iter()
                        .filter_map(|m| m.as_str().map(str::to_string))
                        .collect(),
                    Value::String(s) => vec![s.clone()],
                    _ => Vec::new(),
                };
                messages.into_iter().map(move |m| format!("{field}: {m}"))
            })
            .collect(),
        Value::String(s) => vec![s.clone()],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::i18n::Language;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    struct Row {
        id: u32,
    }

    #[test]
    fn test_unwrap_success_envelope() {
        let body = json!({ "success": true, "data": [1, 2], "messageEn": "ok" });
        assert_eq!(unwrap_envelope(body, Some(200)).unwrap(), json!([1, 2]));
    }

    #[test]
    fn test_bare_body_passes_through() {
        let body = json!([{ "id": 1 }]);
        assert_eq!(unwrap_envelope(body.clone(), Some(200)).unwrap(), body);
    }

    #[test]
    fn test_failure_envelope() {
        let body = json!({
            "success": false,
            "message": "Validation failed",
            "messageAr": "فشل التحقق",
            "errors": ["Name is required"],
            "status": 400
        });
        let err = unwrap_envelope(body, Some(200)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestFailed);
        assert_eq!(err.message().resolve(Language::En), Some("Validation failed"));
        assert_eq!(err.message().resolve(Language::Ar), Some("فشل التحقق"));
        assert_eq!(err.field_errors(), ["Name is required".to_string()]);
    }

    #[test]
    fn test_failure_envelope_not_found() {
        let body = json!({ "success": false, "messageEn": "Manager not found", "status": 404 });
        let err = unwrap_envelope(body, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_failure_from_problem_details() {
        let body = json!({
            "title": "One or more validation errors occurred.",
            "errors": { "Reason": ["The Reason field is required."] }
        });
        let failure = failure_from_body(&body, 400, Some("Bad Request"));
        assert_eq!(failure.status, Some(400));
        assert_eq!(failure.errors, vec!["Reason: The Reason field is required."]);
        assert_eq!(
            failure.message.resolve(Language::En),
            Some("One or more validation errors occurred.")
        );
    }

    #[test]
    fn test_failure_from_empty_body_uses_reason() {
        let failure = failure_from_body(&Value::Null, 403, Some("Forbidden"));
        assert_eq!(failure.message.resolve(Language::En), Some("Forbidden"));
        assert_eq!(ConsoleError::from_failure(failure).kind(), ErrorKind::Forbidden);
    }

    #[test]
    fn test_paged_payload() {
        let data = json!({
            "items": [{ "id": 11 }, { "id": 12 }],
            "page": 2, "pageSize": 10, "totalCount": 12, "totalPages": 2,
            "hasNext": false, "hasPrevious": true
        });
        let page = parse_list::<Row>(data).unwrap().into_page(&FilterState::new(10));
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.pagination, PaginationMeta::new(2, 10, 12));
    }

    #[test]
    fn test_bare_array_payload_is_single_page() {
        let data = json!([{ "id": 1 }, { "id": 2 }]);
        let payload = parse_list::<Row>(data).unwrap();
        assert!(matches!(payload, ListPayload::BareList(_)));

        let page = payload.into_page(&FilterState::new(10).with_page(4));
        assert_eq!(page.items, vec![Row { id: 1 }, Row { id: 2 }]);
        assert_eq!(page.pagination.page, 1);
        assert_eq!(page.pagination.total_count, 2);
        assert_eq!(page.pagination.total_pages, 1);
        assert!(!page.pagination.has_next_page);
        assert!(!page.pagination.has_previous_page);
    }

    #[test]
    fn test_malformed_record_reports_field_error() {
        let enveloped = json!({ "items": [{ "id": 1 }, { "id": "two" }], "totalCount": 2 });
        let err = parse_list::<Row>(enveloped).unwrap_err().to_string();
        assert!(err.contains("invalid type: string \"two\""), "{err}");
        assert!(!err.contains("did not match any variant"), "{err}");

        let bare = json!([{ "id": 1 }, {}]);
        let err = parse_list::<Row>(bare).unwrap_err().to_string();
        assert!(err.contains("missing field `id`"), "{err}");

        let err = parse_list::<Row>(json!("nope")).unwrap_err().to_string();
        assert!(err.contains("expected a sequence"), "{err}");
    }

    #[test]
    fn test_envelope_missing_counts_falls_back_to_filter() {
        let data = json!({ "items": [{ "id": 1 }] });
        let page = parse_list::<Row>(data)
            .unwrap()
            .into_page(&FilterState::new(5).with_page(3));
        assert_eq!(page.pagination.page, 3);
        assert_eq!(page.pagination.page_size, 5);
        assert_eq!(page.pagination.total_count, 1);
    }
}
