//! List views: fetching, client-side pagination, debounced search and the
//! list state machine.

pub mod controller;
pub mod debounce;
pub mod delete;
pub mod detail;
pub mod fetcher;
pub mod local;
pub mod model;
pub mod pagination;

use serde::Serialize;

pub use controller::ListController;
pub use delete::{DeleteDialogState, DeleteRequest, submit_delete};
pub use detail::{DetailState, load_detail};
pub use fetcher::fetch_page;
pub use local::{Searchable, derive_page};
pub use model::{
    DeleteDialogView, FetchTicket, ListAction, ListBody, ListCommand, ListState, ListViewModel,
    PaginationView, ViewError, ViewStatus, compute_list_view, reduce_list_state,
};
pub use pagination::{PageIntent, PaginationControl, PaginationMeta, page_window};

/// One page of items with its pagination metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub pagination: PaginationMeta,
}
