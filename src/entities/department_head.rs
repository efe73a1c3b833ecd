use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};

use super::{Entity, EntityId, ListSource, format_date, format_flag, or_dash};
use crate::list::local::{Searchable, matches_date, matches_flag, matches_number};
use crate::query::{FilterField, FilterKind, FilterValue, QueryMapping};

/// Head of a department (server-side paginated list)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentHead {
    pub id: EntityId,
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub department_id: Option<i64>,
    #[serde(default)]
    pub department_name: Option<String>,
    #[serde(default, with = "super::timestamp")]
    pub appointed_at: Option<DateTime>,
    #[serde(default)]
    pub is_active: bool,
}

impl Searchable for DepartmentHead {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.full_name.as_str()];
        fields.extend(self.email.as_deref());
        fields.extend(self.department_name.as_deref());
        fields
    }

    fn matches_field(&self, key: &str, value: &FilterValue) -> bool {
        match key {
            "department_id" => matches_number(self.department_id, value),
            "is_active" => matches_flag(self.is_active, value),
            "appointed" => matches_date(self.appointed_at, value),
            _ => true,
        }
    }
}

impl Entity for DepartmentHead {
    const NAME: &'static str = "department head";
    const ENDPOINT: &'static str = "api/DepartmentHeads";
    const SOURCE: ListSource = ListSource::Remote(QueryMapping::STANDARD);
    const FILTERS: &'static [FilterField] = &[
        FilterField::new("department_id", "DepartmentId", FilterKind::Number),
        FilterField::new("is_active", "IsActive", FilterKind::Flag),
        FilterField::new("appointed", "Appointed", FilterKind::DateRange),
    ];
    const DELETE_REASON_KEY: Option<&'static str> = Some("reason");

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn label(&self) -> String {
        self.full_name.clone()
    }

    fn columns() -> &'static [&'static str] {
        &["ID", "Name", "Department", "Appointed", "Active"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.full_name.clone(),
            or_dash(self.department_name.as_deref()),
            format_date(self.appointed_at),
            format_flag(self.is_active),
        ]
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.to_string()),
            ("Name", self.full_name.clone()),
            ("Email", or_dash(self.email.as_deref())),
            ("Department", or_dash(self.department_name.as_deref())),
            ("Appointed", format_date(self.appointed_at)),
            ("Active", format_flag(self.is_active)),
        ]
    }
}
