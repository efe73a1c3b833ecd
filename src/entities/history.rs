use std::fmt;

use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};

use super::{Entity, EntityId, ListSource, format_date, or_dash};
use crate::list::local::{Searchable, matches_date, matches_number, matches_text};
use crate::query::{DateRange, FilterField, FilterKind, FilterValue};

/// What happened to a manager assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryAction {
    Assigned,
    Revoked,
    #[serde(other)]
    Other,
}

impl fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryAction::Assigned => write!(f, "assigned"),
            HistoryAction::Revoked => write!(f, "revoked"),
            HistoryAction::Other => write!(f, "other"),
        }
    }
}

/// One manager assignment period. Read-only; the backend records history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagerHistoryEntry {
    pub id: EntityId,
    pub manager_name: String,
    #[serde(default)]
    pub department_id: Option<i64>,
    #[serde(default)]
    pub department_name: Option<String>,
    pub action: HistoryAction,
    #[serde(default, with = "super::timestamp")]
    pub start_date: Option<DateTime>,
    #[serde(default, with = "super::timestamp")]
    pub end_date: Option<DateTime>,
    #[serde(default)]
    pub revocation_reason: Option<String>,
    #[serde(default)]
    pub performed_by: Option<String>,
}

impl ManagerHistoryEntry {
    /// Whether the assignment period overlaps `range` (inclusive, open end = still active).
    fn overlaps(&self, range: &DateRange) -> bool {
        let Some(start) = self.start_date else {
            return false;
        };
        if let Some(to) = range.to
            && start > to.to_datetime(jiff::civil::Time::MAX)
        {
            return false;
        }
        match (range.from, self.end_date) {
            (Some(from), Some(end)) => end >= from.to_datetime(jiff::civil::Time::midnight()),
            _ => true,
        }
    }
}

impl Searchable for ManagerHistoryEntry {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.manager_name.as_str()];
        fields.extend(self.department_name.as_deref());
        fields.extend(self.performed_by.as_deref());
        fields.extend(self.revocation_reason.as_deref());
        fields
    }

    fn matches_field(&self, key: &str, value: &FilterValue) -> bool {
        match key {
            "department_id" => matches_number(self.department_id, value),
            "action" => matches_text(Some(&self.action.to_string()), value),
            "started" => matches_date(self.start_date, value),
            "period" => match value {
                FilterValue::DateRange(range) if !range.is_open() => self.overlaps(range),
                _ => true,
            },
            _ => true,
        }
    }
}

impl Entity for ManagerHistoryEntry {
    const NAME: &'static str = "history entry";
    const ENDPOINT: &'static str = "api/Managers/history";
    const SOURCE: ListSource = ListSource::Local;
    const FILTERS: &'static [FilterField] = &[
        FilterField::new("department_id", "DepartmentId", FilterKind::Number),
        FilterField::new("action", "Action", FilterKind::Text),
        FilterField::new("started", "Started", FilterKind::DateRange),
        FilterField::new("period", "Period", FilterKind::DateRange),
    ];
    const DELETE_REASON_KEY: Option<&'static str> = None;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn label(&self) -> String {
        format!("{} {}", self.manager_name, self.action)
    }

    fn columns() -> &'static [&'static str] {
        &["ID", "Manager", "Department", "Action", "From", "To", "By"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.manager_name.clone(),
            or_dash(self.department_name.as_deref()),
            self.action.to_string(),
            format_date(self.start_date),
            format_date(self.end_date),
            or_dash(self.performed_by.as_deref()),
        ]
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.to_string()),
            ("Manager", self.manager_name.clone()),
            ("Department", or_dash(self.department_name.as_deref())),
            ("Action", self.action.to_string()),
            ("From", format_date(self.start_date)),
            ("To", format_date(self.end_date)),
            ("Reason", or_dash(self.revocation_reason.as_deref())),
            ("By", or_dash(self.performed_by.as_deref())),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    fn entry(start: (i16, i8, i8), end: Option<(i16, i8, i8)>) -> ManagerHistoryEntry {
        ManagerHistoryEntry {
            id: EntityId::from(1),
            manager_name: "Sara".into(),
            department_id: Some(2),
            department_name: Some("Surgery".into()),
            action: HistoryAction::Assigned,
            start_date: Some(date(start.0, start.1, start.2).at(9, 0, 0, 0)),
            end_date: end.map(|(y, m, d)| date(y, m, d).at(17, 0, 0, 0)),
            revocation_reason: None,
            performed_by: Some("admin".into()),
        }
    }

    fn period(from: (i16, i8, i8), to: (i16, i8, i8)) -> FilterValue {
        FilterValue::DateRange(DateRange::new(
            Some(date(from.0, from.1, from.2)),
            Some(date(to.0, to.1, to.2)),
        ))
    }

    #[test]
    fn test_period_overlap() {
        let closed = entry((2024, 1, 10), Some((2024, 2, 10)));
        assert!(closed.matches_field("period", &period((2024, 2, 1), (2024, 3, 1))));
        assert!(closed.matches_field("period", &period((2024, 2, 10), (2024, 2, 10))));
        assert!(!closed.matches_field("period", &period((2024, 2, 11), (2024, 3, 1))));
        assert!(!closed.matches_field("period", &period((2023, 1, 1), (2024, 1, 9))));
    }

    #[test]
    fn test_open_ended_period_overlaps_later_ranges() {
        let active = entry((2024, 1, 10), None);
        assert!(active.matches_field("period", &period((2025, 1, 1), (2025, 12, 31))));
    }

    #[test]
    fn test_action_filter_is_case_insensitive() {
        let e = entry((2024, 1, 10), None);
        assert!(e.matches_field("action", &FilterValue::Text("ASSIGNED".into())));
        assert!(!e.matches_field("action", &FilterValue::Text("revoked".into())));
    }

    #[test]
    fn test_wire_action_is_case_sensitive() {
        let exact: HistoryAction = serde_json::from_str(r#""Revoked""#).unwrap();
        assert_eq!(exact, HistoryAction::Revoked);
        let lowered: HistoryAction = serde_json::from_str(r#""revoked""#).unwrap();
        assert_eq!(lowered, HistoryAction::Other);
    }

    #[test]
    fn test_unknown_action_deserializes() {
        let e: ManagerHistoryEntry = serde_json::from_str(
            r#"{"id":1,"managerName":"A","action":"Transferred","startDate":"2024-01-01"}"#,
        )
        .unwrap();
        assert_eq!(e.action, HistoryAction::Other);
        assert!(ManagerHistoryEntry::DELETE_REASON_KEY.is_none());
    }
}
