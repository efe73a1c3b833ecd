//! Filter state and query-parameter mapping for list views.

pub mod filter;
pub mod params;

pub use filter::{DateRange, FilterField, FilterKind, FilterState, FilterValue};
pub use params::{QueryMapping, QueryParams, build_query};
