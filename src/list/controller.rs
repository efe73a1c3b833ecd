//! Drives a `ListState` against a real backend.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::{JoinError, JoinSet};

use super::ListPage;
use super::debounce::Debouncer;
use super::delete::submit_delete;
use super::fetcher::fetch_page;
use super::model::{
    FetchTicket, ListAction, ListCommand, ListState, ListViewModel, ViewError, compute_list_view,
    reduce_list_state,
};
use crate::api::Backend;
use crate::entities::Entity;
use crate::error::{ConsoleError, ErrorKind, Result};
use crate::i18n::{BilingualMessage, Language, text};

/// Result of a spawned backend call, fed back into the reducer
enum Outcome<T> {
    Fetched(FetchTicket, std::result::Result<ListPage<T>, ViewError>),
    Deleted(std::result::Result<(), ViewError>),
}

/// Owns a list view's state and runs the commands its reducer emits.
///
/// Fetches and deletes run as tokio tasks tracked in a `JoinSet`, so several
/// requests can be in flight at once. Whichever order they resolve in, the
/// reducer only applies the response for the current filter. A request task
/// that panics still resolves, as a `RequestFailed` error.
pub struct ListController<B, T> {
    backend: Arc<B>,
    state: ListState<T>,
    search: Debouncer<String>,
    tasks: JoinSet<Outcome<T>>,
}

impl<B, T> ListController<B, T>
where
    B: Backend + 'static,
    T: Entity,
{
    pub fn new(backend: Arc<B>, state: ListState<T>, search_delay: Duration) -> Self {
        Self {
            backend,
            state,
            search: Debouncer::new(search_delay),
            tasks: JoinSet::new(),
        }
    }

    pub fn state(&self) -> &ListState<T> {
        &self.state
    }

    pub fn view(&self, lang: Language) -> ListViewModel<T> {
        compute_list_view(&self.state, lang)
    }

    /// Number of backend calls not yet resolved
    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }

    /// True when no request is running and no search commit is pending.
    pub fn is_settled(&self) -> bool {
        self.tasks.is_empty() && !self.search.is_pending()
    }

    pub fn dispatch(&mut self, action: ListAction<T>) {
        if matches!(action, ListAction::ClearFilters | ListAction::CommitSearch(_)) {
            self.search.cancel();
        }

        let state = std::mem::take(&mut self.state);
        let (state, command) = reduce_list_state(state, action);
        self.state = state;

        if let Some(command) = command {
            self.execute(command);
        }
    }

    /// Record a keystroke and schedule the debounced commit.
    pub fn type_search(&mut self, input: impl Into<String>) {
        let input = input.into();
        self.dispatch(ListAction::SearchInput(input.clone()));
        self.search.schedule(input);
    }

    /// Open the delete confirmation for `item`.
    pub fn open_delete(&mut self, item: &T) -> Result<()> {
        if T::DELETE_REASON_KEY.is_none() {
            return Err(ConsoleError::InvalidInput(format!(
                "{} records cannot be deleted",
                T::NAME
            )));
        }
        self.dispatch(ListAction::OpenDelete {
            id: item.id().clone(),
            label: item.label(),
        });
        Ok(())
    }

    fn execute(&mut self, command: ListCommand) {
        let backend = Arc::clone(&self.backend);

        match command {
            ListCommand::Fetch(ticket) => {
                tracing::debug!("fetching {} list #{}", T::NAME, ticket.seq);
                let filter = ticket.filter.clone();
                let work = tokio::spawn(async move {
                    fetch_page::<B, T>(backend.as_ref(), &filter).await
                });
                self.tasks.spawn(async move {
                    let result = match work.await {
                        Ok(result) => result.map_err(|err| {
                            tracing::warn!("failed to fetch {} list: {err}", T::NAME);
                            ViewError::from(err)
                        }),
                        Err(err) => Err(task_failure("fetch", T::NAME, err)),
                    };
                    Outcome::Fetched(ticket, result)
                });
            }
            ListCommand::Delete(request) => {
                let work = tokio::spawn(async move {
                    let result = submit_delete::<B, T>(backend.as_ref(), &request).await;
                    (request, result)
                });
                self.tasks.spawn(async move {
                    let result = match work.await {
                        Ok((_, Ok(_))) => Ok(()),
                        Ok((request, Err(err))) => {
                            tracing::warn!("failed to delete {} {}: {err}", T::NAME, request.id());
                            Err(ViewError::from(err))
                        }
                        Err(err) => Err(task_failure("delete", T::NAME, err)),
                    };
                    Outcome::Deleted(result)
                });
            }
        }
    }

    /// Wait for the next backend result or search commit and apply it.
    ///
    /// Returns `false` without waiting when the controller is settled.
    pub async fn next_event(&mut self) -> bool {
        if self.is_settled() {
            return false;
        }

        tokio::select! {
            Some(joined) = self.tasks.join_next() => match joined {
                Ok(Outcome::Fetched(ticket, result)) => {
                    self.dispatch(ListAction::FetchResolved(ticket, result));
                }
                Ok(Outcome::Deleted(result)) => {
                    self.dispatch(ListAction::DeleteResolved(result));
                }
                Err(err) => tracing::warn!("request task ended without a result: {err}"),
            },
            Some(term) = self.search.recv(), if self.search.is_pending() => {
                self.dispatch(ListAction::CommitSearch(term));
            }
            else => return false,
        }
        true
    }

    /// Process events until nothing is in flight or pending.
    pub async fn settle(&mut self) {
        while self.next_event().await {}
    }
}

/// A request task that panicked or was cancelled, as the view shows it.
fn task_failure(operation: &str, entity: &str, err: JoinError) -> ViewError {
    tracing::warn!("{entity} {operation} task failed: {err}");
    ViewError {
        kind: ErrorKind::RequestFailed,
        message: BilingualMessage::from_text(text::REQUEST_FAILED),
        errors: Vec::new(),
    }
}
