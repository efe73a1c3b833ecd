pub mod api;
pub mod auth;
pub mod cli;
pub mod commands;
pub mod config;
pub mod display;
pub mod entities;
pub mod error;
pub mod i18n;
pub mod list;
pub mod query;

pub use api::{Backend, HttpBackend};
pub use config::Config;
pub use entities::{
    DepartmentHead, Entity, EntityId, HistoryAction, Manager, ManagerHistoryEntry, Role,
    SubDepartment,
};
pub use error::{ConsoleError, ErrorKind, RequestFailure, Result};
pub use i18n::{BilingualMessage, Language};
pub use list::{
    ListAction, ListController, ListPage, ListState, PaginationMeta, compute_list_view,
    derive_page, fetch_page, reduce_list_state,
};
pub use query::{FilterState, FilterValue};
