//! Filter state for list views.
//!
//! `FilterState` is the single source of truth for what a list view currently
//! wants to see. Every change to the search text, a field filter or the page
//! size puts the view back on page 1.

use std::collections::BTreeMap;
use std::fmt;

use jiff::civil::{Date, DateTime};
use serde::Serialize;

use crate::config::DEFAULT_PAGE_SIZE;
use crate::error::{ConsoleError, Result};

/// Inclusive date range; either bound may be open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DateRange {
    pub from: Option<Date>,
    pub to: Option<Date>,
}

impl DateRange {
    pub fn new(from: Option<Date>, to: Option<Date>) -> Self {
        Self { from, to }
    }

    pub fn is_open(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Inclusive on both ends; `to` covers the whole day.
    pub fn contains(&self, at: DateTime) -> bool {
        if let Some(from) = self.from
            && at < from.to_datetime(jiff::civil::Time::midnight())
        {
            return false;
        }
        if let Some(to) = self.to
            && at > to.to_datetime(jiff::civil::Time::MAX)
        {
            return false;
        }
        true
    }

    /// Parse `FROM..TO`, `FROM..`, `..TO` or a single day `DAY`.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        let parse_bound = |s: &str| -> Result<Option<Date>> {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            s.parse::<Date>().map(Some).map_err(|e| {
                ConsoleError::InvalidInput(format!("invalid date '{s}': {e}"))
            })
        };

        match raw.split_once("..") {
            Some((from, to)) => Ok(Self::new(parse_bound(from)?, parse_bound(to)?)),
            None => {
                let day = parse_bound(raw)?;
                Ok(Self::new(day, day))
            }
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bound = |d: Option<Date>| d.map(|d| d.to_string()).unwrap_or_default();
        write!(f, "{}..{}", bound(self.from), bound(self.to))
    }
}

/// Value of a single field filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FilterValue {
    Unset,
    Text(String),
    Number(i64),
    Flag(bool),
    DateRange(DateRange),
}

impl FilterValue {
    /// Unset, blank text and fully open ranges carry no constraint.
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Unset => true,
            FilterValue::Text(s) => s.trim().is_empty(),
            FilterValue::DateRange(range) => range.is_open(),
            FilterValue::Number(_) | FilterValue::Flag(_) => false,
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Unset => write!(f, "any"),
            FilterValue::Text(s) => write!(f, "{s}"),
            FilterValue::Number(n) => write!(f, "{n}"),
            FilterValue::Flag(b) => write!(f, "{b}"),
            FilterValue::DateRange(r) => write!(f, "{r}"),
        }
    }
}

/// How a filter value is entered and transmitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Text,
    Number,
    Flag,
    DateRange,
}

impl FilterKind {
    /// Parse user input for a filter of this kind. `any` clears the filter.
    pub fn parse(&self, raw: &str) -> Result<FilterValue> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("any") {
            return Ok(FilterValue::Unset);
        }

        match self {
            FilterKind::Text => Ok(FilterValue::Text(trimmed.to_string())),
            FilterKind::Number => trimmed.parse().map(FilterValue::Number).map_err(|_| {
                ConsoleError::InvalidInput(format!("'{trimmed}' is not a whole number"))
            }),
            FilterKind::Flag => match trimmed.to_lowercase().as_str() {
                "true" | "yes" | "1" => Ok(FilterValue::Flag(true)),
                "false" | "no" | "0" => Ok(FilterValue::Flag(false)),
                _ => Err(ConsoleError::InvalidInput(format!(
                    "'{trimmed}' is not a boolean (expected true, false or any)"
                ))),
            },
            FilterKind::DateRange => DateRange::parse(trimmed).map(FilterValue::DateRange),
        }
    }
}

/// A filter an entity exposes: local key, query parameter name and kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterField {
    pub key: &'static str,
    pub param: &'static str,
    pub kind: FilterKind,
}

impl FilterField {
    pub const fn new(key: &'static str, param: &'static str, kind: FilterKind) -> Self {
        Self { key, param, kind }
    }
}

/// Search, field filters and pagination intent of one list view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterState {
    search_text: String,
    field_filters: BTreeMap<String, FilterValue>,
    page: usize,
    page_size: usize,
    #[serde(skip)]
    default_page_size: usize,
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE as usize)
    }
}

impl FilterState {
    pub fn new(default_page_size: usize) -> Self {
        let default_page_size = default_page_size.max(1);
        Self {
            search_text: String::new(),
            field_filters: BTreeMap::new(),
            page: 1,
            page_size: default_page_size,
            default_page_size,
        }
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn field_filters(&self) -> &BTreeMap<String, FilterValue> {
        &self.field_filters
    }

    pub fn field_filter(&self, key: &str) -> Option<&FilterValue> {
        self.field_filters.get(key)
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn has_active_filters(&self) -> bool {
        !self.search_text.trim().is_empty() || !self.field_filters.is_empty()
    }

    /// Commit a search term. Debouncing happens before this is called.
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.page = 1;
    }

    /// Merge `{key: value}` into the field filters; empty values remove the key.
    pub fn set_field_filter(&mut self, key: impl Into<String>, value: FilterValue) {
        let key = key.into();
        if value.is_empty() {
            self.field_filters.remove(&key);
        } else {
            self.field_filters.insert(key, value);
        }
        self.page = 1;
    }

    /// No upper bound: a page past the end fetches an empty page.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }

    pub fn clear(&mut self) {
        *self = Self::new(self.default_page_size);
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.set_search(text);
        self
    }

    pub fn with_field_filter(mut self, key: impl Into<String>, value: FilterValue) -> Self {
        self.set_field_filter(key, value);
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.set_page(page);
        self
    }
}
