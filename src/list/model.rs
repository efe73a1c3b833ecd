//! List view model types for testable state management
//!
//! This module separates state (ListState) from view (ListViewModel) so the
//! whole fetch/filter/delete lifecycle can be tested without a terminal or a
//! backend. The reducer never performs I/O: it returns a `ListCommand` that
//! the controller executes, and results come back as actions.

use crate::config::DEFAULT_PAGINATION_WINDOW;
use crate::entities::EntityId;
use crate::error::{ConsoleError, ErrorKind, RequestFailure};
use crate::i18n::{BilingualMessage, Language, UiText, text};
use crate::query::{FilterState, FilterValue};

use super::ListPage;
use super::delete::{DeleteDialogState, DeleteRequest};
use super::pagination::{PageIntent, PaginationControl, PaginationMeta};

// ============================================================================
// State Types
// ============================================================================

/// Where the list view is in its fetch lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewStatus {
    /// Nothing requested yet, or an error was dismissed
    #[default]
    Idle,
    Loading,
    Populated,
    /// The latest fetch succeeded with no items
    Empty,
    Error(ViewError),
}

/// A failure as the view renders it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewError {
    pub kind: ErrorKind,
    pub message: BilingualMessage,
    /// Field-level messages shown under the banner
    pub errors: Vec<String>,
}

impl ViewError {
    pub fn resolve(&self, lang: Language) -> String {
        self.message.resolve_or(lang, fallback_text(self.kind))
    }

    /// Convert back into an error for callers that exit on failure.
    pub fn into_error(self) -> ConsoleError {
        let status = match self.kind {
            ErrorKind::Validation => return ConsoleError::Validation(self.message),
            ErrorKind::NotFound => Some(404),
            ErrorKind::Forbidden => Some(403),
            ErrorKind::RequestFailed | ErrorKind::Timeout => None,
        };
        let message = if self.message.is_empty() {
            BilingualMessage::from_text(fallback_text(self.kind))
        } else {
            self.message
        };
        ConsoleError::from_failure(RequestFailure::new(status, message).with_errors(self.errors))
    }
}

impl From<&ConsoleError> for ViewError {
    fn from(err: &ConsoleError) -> Self {
        Self {
            kind: err.kind(),
            message: err.message(),
            errors: err.field_errors().to_vec(),
        }
    }
}

impl From<ConsoleError> for ViewError {
    fn from(err: ConsoleError) -> Self {
        Self::from(&err)
    }
}

fn fallback_text(kind: ErrorKind) -> UiText {
    match kind {
        ErrorKind::NotFound => text::NOT_FOUND,
        ErrorKind::Forbidden => text::FORBIDDEN,
        ErrorKind::Timeout => text::TIMEOUT,
        ErrorKind::Validation | ErrorKind::RequestFailed => text::REQUEST_FAILED,
    }
}

/// Identifies one fetch: the filter it was issued for and its issue order.
///
/// A response is applied only while its filter is still current and no newer
/// response has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub filter: FilterState,
}

/// Raw state of one list view
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    /// The committed query; every fetch is issued for this value
    pub filter: FilterState,
    /// Raw search box contents, ahead of the debounced commit
    pub search_input: String,
    pub items: Vec<T>,
    pub pagination: Option<PaginationMeta>,
    pub status: ViewStatus,
    pub control: PaginationControl,
    pub delete_dialog: Option<DeleteDialogState>,
    /// Transient success message
    pub notice: Option<BilingualMessage>,
    next_seq: u64,
    last_applied: Option<u64>,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self::new(
            FilterState::default(),
            PaginationControl::new(DEFAULT_PAGINATION_WINDOW as usize),
        )
    }
}

impl<T> ListState<T> {
    pub fn new(filter: FilterState, control: PaginationControl) -> Self {
        Self {
            search_input: filter.search_text().to_string(),
            filter,
            items: Vec::new(),
            pagination: None,
            status: ViewStatus::Idle,
            control,
            delete_dialog: None,
            notice: None,
            next_seq: 0,
            last_applied: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == ViewStatus::Loading
    }

    pub fn error(&self) -> Option<&ViewError> {
        match &self.status {
            ViewStatus::Error(err) => Some(err),
            _ => None,
        }
    }

    /// Issue a fetch for the current filter.
    fn begin_fetch(&mut self) -> Option<ListCommand> {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.status = ViewStatus::Loading;
        Some(ListCommand::Fetch(FetchTicket {
            seq,
            filter: self.filter.clone(),
        }))
    }

    fn is_stale(&self, ticket: &FetchTicket) -> bool {
        ticket.filter != self.filter || self.last_applied.is_some_and(|last| ticket.seq < last)
    }
}

// ============================================================================
// Action Types
// ============================================================================

/// Everything that can happen to a list view
#[derive(Debug, Clone, PartialEq)]
pub enum ListAction<T> {
    // Query
    /// Keystroke in the search box; committed later by the debouncer
    SearchInput(String),
    /// Debounced search commit
    CommitSearch(String),
    /// Set or clear one field filter
    SetFieldFilter(String, FilterValue),
    SetPage(usize),
    /// Previous/next/numbered button from the pagination control
    Paginate(PageIntent),
    SetPageSize(usize),
    ClearFilters,
    Refresh,

    // Fetch lifecycle
    FetchResolved(FetchTicket, Result<ListPage<T>, ViewError>),
    /// Hide the error banner without retrying
    DismissError,

    // Delete
    OpenDelete { id: EntityId, label: String },
    UpdateDeleteReason(String),
    CancelDelete,
    SubmitDelete,
    DeleteResolved(Result<(), ViewError>),
    DismissNotice,
}

/// Side effect requested by the reducer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListCommand {
    Fetch(FetchTicket),
    Delete(DeleteRequest),
}

// ============================================================================
// View Model Types
// ============================================================================

/// What the list area shows
#[derive(Debug, Clone, PartialEq)]
pub enum ListBody<T> {
    /// Nothing fetched yet
    Idle,
    Loading(String),
    Empty(String),
    Error { message: String, errors: Vec<String> },
    Rows(Vec<T>),
}

/// Delete confirmation as rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteDialogView {
    pub label: String,
    pub reason: String,
    pub can_submit: bool,
    pub submitting: bool,
    pub error: Option<String>,
}

/// Pagination control as rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    pub meta: PaginationMeta,
    pub pages: Vec<usize>,
    pub previous_enabled: bool,
    pub next_enabled: bool,
}

/// Derived, render-ready view of a `ListState`
#[derive(Debug, Clone, PartialEq)]
pub struct ListViewModel<T> {
    pub body: ListBody<T>,
    /// Present only when the list has rows and more than one page
    pub pagination: Option<PaginationView>,
    pub search_input: String,
    pub has_active_filters: bool,
    pub notice: Option<String>,
    pub delete_dialog: Option<DeleteDialogView>,
}

// ============================================================================
// View Model Computation
// ============================================================================

/// Compute the view model from state.
pub fn compute_list_view<T: Clone>(state: &ListState<T>, lang: Language) -> ListViewModel<T> {
    let body = match &state.status {
        ViewStatus::Idle => ListBody::Idle,
        ViewStatus::Loading => ListBody::Loading(text::LOADING.get(lang).to_string()),
        ViewStatus::Empty => ListBody::Empty(text::NO_DATA.get(lang).to_string()),
        ViewStatus::Error(err) => ListBody::Error {
            message: err.resolve(lang),
            errors: err.errors.clone(),
        },
        ViewStatus::Populated => ListBody::Rows(state.items.clone()),
    };

    let pagination = match (&state.status, state.pagination) {
        (ViewStatus::Populated, Some(meta)) if meta.total_pages > 1 => Some(PaginationView {
            pages: state.control.pages(&meta).collect(),
            previous_enabled: meta.has_previous_page,
            next_enabled: meta.has_next_page,
            meta,
        }),
        _ => None,
    };

    let delete_dialog = state.delete_dialog.as_ref().map(|dialog| DeleteDialogView {
        label: dialog.label.clone(),
        reason: dialog.reason.clone(),
        can_submit: dialog.can_submit(),
        submitting: dialog.submitting,
        error: dialog.error.as_ref().map(|err| err.resolve(lang)),
    });

    ListViewModel {
        body,
        pagination,
        search_input: state.search_input.clone(),
        has_active_filters: state.filter.has_active_filters(),
        notice: state
            .notice
            .as_ref()
            .map(|notice| notice.resolve_or(lang, text::DELETED)),
        delete_dialog,
    }
}

// ============================================================================
// Reducer
// ============================================================================

/// Apply `action` to `state`, returning the new state and any side effect to run.
pub fn reduce_list_state<T>(
    mut state: ListState<T>,
    action: ListAction<T>,
) -> (ListState<T>, Option<ListCommand>) {
    let command = match action {
        // Query
        ListAction::SearchInput(input) => {
            state.search_input = input;
            None
        }
        ListAction::CommitSearch(term) => {
            state.search_input = term.clone();
            state.filter.set_search(term);
            state.begin_fetch()
        }
        ListAction::SetFieldFilter(key, value) => {
            state.filter.set_field_filter(key, value);
            state.begin_fetch()
        }
        ListAction::SetPage(page) => {
            state.filter.set_page(page);
            state.begin_fetch()
        }
        ListAction::Paginate(intent) => {
            let target = state
                .pagination
                .and_then(|meta| state.control.resolve(&meta, intent));
            match target {
                Some(page) => {
                    state.filter.set_page(page);
                    state.begin_fetch()
                }
                None => None,
            }
        }
        ListAction::SetPageSize(size) => {
            state.filter.set_page_size(size);
            state.begin_fetch()
        }
        ListAction::ClearFilters => {
            state.filter.clear();
            state.search_input.clear();
            state.begin_fetch()
        }
        ListAction::Refresh => state.begin_fetch(),

        // Fetch lifecycle
        ListAction::FetchResolved(ticket, result) => {
            if state.is_stale(&ticket) {
                tracing::debug!("discarding stale response for fetch #{}", ticket.seq);
                None
            } else {
                state.last_applied = Some(ticket.seq);
                match result {
                    Ok(page) => {
                        state.status = if page.items.is_empty() {
                            ViewStatus::Empty
                        } else {
                            ViewStatus::Populated
                        };
                        state.items = page.items;
                        state.pagination = Some(page.pagination);
                    }
                    Err(err) => {
                        state.items.clear();
                        state.pagination = None;
                        state.status = ViewStatus::Error(err);
                    }
                }
                None
            }
        }
        ListAction::DismissError => {
            if matches!(state.status, ViewStatus::Error(_)) {
                state.status = ViewStatus::Idle;
            }
            None
        }

        // Delete
        ListAction::OpenDelete { id, label } => {
            state.delete_dialog = Some(DeleteDialogState::new(id, label));
            None
        }
        ListAction::UpdateDeleteReason(reason) => {
            if let Some(dialog) = state.delete_dialog.as_mut() {
                dialog.reason = reason;
                dialog.error = None;
            }
            None
        }
        ListAction::CancelDelete => {
            if state.delete_dialog.as_ref().is_some_and(|d| !d.submitting) {
                state.delete_dialog = None;
            }
            None
        }
        ListAction::SubmitDelete => match state.delete_dialog.as_mut() {
            Some(dialog) if !dialog.submitting => {
                match DeleteRequest::new(dialog.id.clone(), &dialog.reason) {
                    Ok(request) => {
                        dialog.submitting = true;
                        dialog.error = None;
                        Some(ListCommand::Delete(request))
                    }
                    Err(err) => {
                        dialog.error = Some(ViewError::from(err));
                        None
                    }
                }
            }
            _ => None,
        },
        ListAction::DeleteResolved(Ok(())) => {
            state.delete_dialog = None;
            state.notice = Some(BilingualMessage::from_text(text::DELETED));
            return reduce_list_state(state, ListAction::Refresh);
        }
        ListAction::DeleteResolved(Err(err)) => {
            if let Some(dialog) = state.delete_dialog.as_mut() {
                dialog.submitting = false;
                dialog.error = Some(err);
            }
            None
        }
        ListAction::DismissNotice => {
            state.notice = None;
            None
        }
    };

    (state, command)
}

// ============================================================================
// Tests
// ============================================================================
