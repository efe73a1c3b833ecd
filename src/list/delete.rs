//! Delete confirmation with a mandatory reason.

use serde_json::{Map, Value};

use super::model::ViewError;
use crate::api::Backend;
use crate::entities::{Entity, EntityId};
use crate::error::{ConsoleError, Result};
use crate::i18n::{BilingualMessage, text};

/// A validated delete: the reason is never blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequest {
    id: EntityId,
    reason: String,
}

impl DeleteRequest {
    pub fn new(id: EntityId, reason: &str) -> Result<Self> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(ConsoleError::validation(BilingualMessage::from_text(
                text::REASON_REQUIRED,
            )));
        }
        Ok(Self {
            id,
            reason: reason.to_string(),
        })
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// State of the open confirmation dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteDialogState {
    pub id: EntityId,
    pub label: String,
    pub reason: String,
    pub submitting: bool,
    pub error: Option<ViewError>,
}

impl DeleteDialogState {
    pub fn new(id: EntityId, label: String) -> Self {
        Self {
            id,
            label,
            reason: String::new(),
            submitting: false,
            error: None,
        }
    }

    /// Submission is enabled only with a non-blank reason and nothing in flight.
    pub fn can_submit(&self) -> bool {
        !self.submitting && !self.reason.trim().is_empty()
    }
}

/// Send the delete for `request` to the backend.
pub async fn submit_delete<B, T>(backend: &B, request: &DeleteRequest) -> Result<()>
where
    B: Backend,
    T: Entity,
{
    let Some(reason_key) = T::DELETE_REASON_KEY else {
        return Err(ConsoleError::InvalidInput(format!(
            "{} records cannot be deleted",
            T::NAME
        )));
    };

    let mut body = Map::new();
    body.insert(reason_key.to_string(), Value::String(request.reason.clone()));

    backend
        .delete(&T::delete_path(request.id.as_str()), &Value::Object(body))
        .await?;
    tracing::debug!("deleted {} {}", T::NAME, request.id);
    Ok(())
}
