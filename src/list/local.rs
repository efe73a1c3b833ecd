//! Client-side filtering and pagination for endpoints that return the whole
//! collection at once.

use jiff::civil::DateTime;

use super::ListPage;
use super::pagination::PaginationMeta;
use crate::query::{FilterState, FilterValue};

/// Records that can be searched and filtered without the backend.
pub trait Searchable {
    /// Fields the free-text search looks at.
    fn search_fields(&self) -> Vec<&str>;

    /// Whether this record satisfies the field filter `key = value`.
    ///
    /// Keys a record does not know about match everything.
    fn matches_field(&self, key: &str, value: &FilterValue) -> bool;
}

/// Case-insensitive substring match with Unicode case folding.
pub fn contains_case_insensitive(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let haystack_folded = unicase::UniCase::new(haystack).to_folded_case();
    let needle_folded = unicase::UniCase::new(needle).to_folded_case();
    haystack_folded.contains(&needle_folded)
}

pub fn matches_text(field: Option<&str>, value: &FilterValue) -> bool {
    match value {
        FilterValue::Text(expected) => field
            .is_some_and(|f| unicase::UniCase::new(f.trim()) == unicase::UniCase::new(expected.trim())),
        _ => true,
    }
}

pub fn matches_number(field: Option<i64>, value: &FilterValue) -> bool {
    match value {
        FilterValue::Number(expected) => field == Some(*expected),
        FilterValue::Text(raw) => match raw.trim().parse::<i64>() {
            Ok(expected) => field == Some(expected),
            Err(_) => true,
        },
        _ => true,
    }
}

pub fn matches_flag(field: bool, value: &FilterValue) -> bool {
    match value {
        FilterValue::Flag(expected) => field == *expected,
        _ => true,
    }
}

/// Records without a date never match an active range.
pub fn matches_date(field: Option<DateTime>, value: &FilterValue) -> bool {
    match value {
        FilterValue::DateRange(range) if !range.is_open() => {
            field.is_some_and(|at| range.contains(at))
        }
        _ => true,
    }
}

fn matches_search<T: Searchable>(item: &T, needle: &str) -> bool {
    item.search_fields()
        .into_iter()
        .any(|field| contains_case_insensitive(field, needle))
}

/// Filter, count and slice `items` for `filter`.
///
/// Pure: the input slice is never modified and equal inputs give equal output.
/// A page past the end yields no items and no error.
pub fn derive_page<T: Searchable + Clone>(items: &[T], filter: &FilterState) -> ListPage<T> {
    let needle = filter.search_text().trim();

    let filtered: Vec<&T> = items
        .iter()
        .filter(|item| needle.is_empty() || matches_search(*item, needle))
        .filter(|item| {
            filter
                .field_filters()
                .iter()
                .all(|(key, value)| item.matches_field(key, value))
        })
        .collect();

    let pagination = PaginationMeta::new(filter.page(), filter.page_size(), filtered.len());
    let (start, end) = pagination.slice_bounds();

    ListPage {
        items: filtered[start..end].iter().map(|item| (*item).clone()).collect(),
        pagination,
    }
}
