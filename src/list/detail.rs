//! Single-record detail view.

use super::model::ViewError;
use crate::api::Backend;
use crate::api::envelope::parse_data;
use crate::entities::Entity;
use crate::error::{ConsoleError, ErrorKind, Result};
use crate::i18n::{BilingualMessage, Language, UiText, text};
use crate::query::QueryParams;

/// Outcome of loading one record by id
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState<T> {
    Loading,
    Loaded(T),
    /// 404 with the backend's message; the view offers a way back to the list
    NotFound(BilingualMessage),
    /// 403 with the backend's message; no retry
    Forbidden(BilingualMessage),
    Failed(ViewError),
}

impl<T> DetailState<T> {
    pub fn from_result(result: Result<T>) -> Self {
        match result {
            Ok(item) => DetailState::Loaded(item),
            Err(err) => match err.kind() {
                ErrorKind::NotFound => DetailState::NotFound(err.message()),
                ErrorKind::Forbidden => DetailState::Forbidden(err.message()),
                _ => DetailState::Failed(ViewError::from(err)),
            },
        }
    }

    /// Status line for every state except `Loaded`.
    pub fn message(&self, lang: Language) -> Option<String> {
        match self {
            DetailState::Loading => Some(text::LOADING.get(lang).to_string()),
            DetailState::Loaded(_) => None,
            DetailState::NotFound(message) => Some(with_back_link(message, text::NOT_FOUND, lang)),
            DetailState::Forbidden(message) => Some(with_back_link(message, text::FORBIDDEN, lang)),
            DetailState::Failed(err) => Some(err.resolve(lang)),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, DetailState::Loaded(_))
    }
}

fn with_back_link(message: &BilingualMessage, fallback: UiText, lang: Language) -> String {
    format!(
        "{} ({})",
        message.resolve_or(lang, fallback),
        text::BACK_TO_LIST.get(lang)
    )
}

/// Fetch one record and classify the outcome.
pub async fn load_detail<B, T>(backend: &B, id: &str) -> DetailState<T>
where
    B: Backend,
    T: Entity,
{
    let result = fetch_one::<B, T>(backend, id).await;
    if let Err(err) = &result {
        tracing::warn!("failed to load {} {id}: {err}", T::NAME);
    }
    DetailState::from_result(result)
}

async fn fetch_one<B: Backend, T: Entity>(backend: &B, id: &str) -> Result<T> {
    if id.trim().is_empty() {
        return Err(ConsoleError::InvalidInput(format!("{} id is empty", T::NAME)));
    }
    let data = backend.get(&T::detail_path(id.trim()), &QueryParams::new()).await?;
    parse_data(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RequestFailure;
    use crate::i18n::BilingualMessage;

    fn failed(status: u16) -> Result<u32> {
        failed_with(status, BilingualMessage::default())
    }

    fn failed_with(status: u16, message: BilingualMessage) -> Result<u32> {
        Err(ConsoleError::from_failure(RequestFailure::new(Some(status), message)))
    }

    #[test]
    fn test_from_result() {
        assert_eq!(DetailState::from_result(Ok(5u32)), DetailState::Loaded(5));
        assert!(matches!(DetailState::from_result(failed(404)), DetailState::NotFound(_)));
        assert!(matches!(DetailState::from_result(failed(403)), DetailState::Forbidden(_)));
        assert!(matches!(
            DetailState::from_result(failed(500)),
            DetailState::Failed(ViewError {
                kind: ErrorKind::RequestFailed,
                ..
            })
        ));
    }

    #[test]
    fn test_messages() {
        let state: DetailState<u32> = DetailState::from_result(failed(404));
        assert_eq!(
            state.message(Language::En).as_deref(),
            Some("Record not found (Back to list)")
        );
        assert!(DetailState::Loaded(1u32).message(Language::En).is_none());

        let failed: DetailState<u32> = DetailState::from_result(failed(500));
        assert_eq!(failed.message(Language::En).as_deref(), Some("Request failed"));
    }

    #[test]
    fn test_backend_message_is_kept() {
        let state = DetailState::from_result(failed_with(
            404,
            BilingualMessage::new("Role 9 does not exist", "الدور 9 غير موجود"),
        ));
        assert_eq!(
            state.message(Language::En).as_deref(),
            Some("Role 9 does not exist (Back to list)")
        );
        assert_eq!(
            state.message(Language::Ar).as_deref(),
            Some("الدور 9 غير موجود (العودة إلى القائمة)")
        );

        let state = DetailState::from_result(failed_with(403, BilingualMessage::english("No access to roles")));
        assert_eq!(
            state.message(Language::Ar).as_deref(),
            Some("No access to roles (العودة إلى القائمة)")
        );
        assert!(!state.is_loaded());
    }
}
