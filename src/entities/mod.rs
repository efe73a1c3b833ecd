//! Entity records shown by the console and how each one is listed.

mod department_head;
mod history;
mod manager;
mod role;
mod sub_department;

use std::fmt;

use jiff::civil::DateTime;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::list::local::Searchable;
use crate::query::{FilterField, QueryMapping};

pub use department_head::DepartmentHead;
pub use history::{HistoryAction, ManagerHistoryEntry};
pub use manager::Manager;
pub use role::Role;
pub use sub_department::SubDepartment;

/// Where filtering and pagination happen for an entity's list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListSource {
    /// The backend filters and paginates; parameters follow the mapping
    Remote(QueryMapping),
    /// The backend returns the whole collection; the client filters and slices
    Local,
}

/// A record type with a list screen, a detail screen and (usually) deletion.
pub trait Entity: Searchable + Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Singular display name, e.g. "manager"
    const NAME: &'static str;
    /// Collection endpoint, relative to the API base URL
    const ENDPOINT: &'static str;
    const SOURCE: ListSource;
    /// Filters the list screen offers
    const FILTERS: &'static [FilterField];
    /// Body key carrying the mandatory reason on delete; `None` if not deletable
    const DELETE_REASON_KEY: Option<&'static str>;

    fn id(&self) -> &EntityId;

    /// Short human-readable label used in confirmations
    fn label(&self) -> String;

    fn detail_path(id: &str) -> String {
        format!("{}/{}", Self::ENDPOINT, id)
    }

    fn delete_path(id: &str) -> String {
        Self::detail_path(id)
    }

    /// Table column headers
    fn columns() -> &'static [&'static str];

    /// Table cells, in `columns()` order
    fn row(&self) -> Vec<String>;

    /// `(field, value)` pairs for the detail screen
    fn details(&self) -> Vec<(&'static str, String)>;

    fn filter_field(key: &str) -> Option<&'static FilterField> {
        Self::FILTERS.iter().find(|f| f.key == key)
    }
}

/// Opaque backend identifier; accepts numbers or strings on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for EntityId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(i64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(n) => EntityId(n.to_string()),
            Raw::Text(s) => EntityId(s),
        })
    }
}

/// Timestamps arrive as `2024-03-01`, `2024-03-01T10:00:00[.fff]` or with an
/// offset/`Z`. Offset timestamps are converted to UTC wall-clock time.
pub(crate) mod timestamp {
    use jiff::Timestamp;
    use jiff::civil::{Date, DateTime};
    use jiff::tz::TimeZone;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn parse(raw: &str) -> Option<DateTime> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(ts) = raw.parse::<Timestamp>() {
            return Some(ts.to_zoned(TimeZone::UTC).datetime());
        }
        if let Ok(dt) = raw.parse::<DateTime>() {
            return Some(dt);
        }
        raw.parse::<Date>().ok().map(|d| d.at(0, 0, 0, 0))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(s) if s.trim().is_empty() => Ok(None),
            Some(s) => parse(&s)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{s}'"))),
        }
    }

    pub fn serialize<S: Serializer>(value: &Option<DateTime>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => serializer.serialize_str(&dt.to_string()),
            None => serializer.serialize_none(),
        }
    }
}

pub(crate) fn format_date(value: Option<DateTime>) -> String {
    value
        .map(|dt| dt.date().to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub(crate) fn format_flag(active: bool) -> String {
    if active { "yes" } else { "no" }.to_string()
}

pub(crate) fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}
