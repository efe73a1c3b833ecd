use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};

use super::{Entity, EntityId, ListSource, format_date, format_flag, or_dash};
use crate::list::local::{Searchable, matches_date, matches_flag, matches_number};
use crate::query::{FilterField, FilterKind, FilterValue, QueryMapping};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubDepartment {
    pub id: EntityId,
    pub name_en: String,
    #[serde(default)]
    pub name_ar: Option<String>,
    #[serde(default)]
    pub department_id: Option<i64>,
    #[serde(default)]
    pub department_name: Option<String>,
    #[serde(default, with = "super::timestamp")]
    pub created_at: Option<DateTime>,
    #[serde(default)]
    pub is_active: bool,
}

impl Searchable for SubDepartment {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name_en.as_str()];
        fields.extend(self.name_ar.as_deref());
        fields.extend(self.department_name.as_deref());
        fields
    }

    fn matches_field(&self, key: &str, value: &FilterValue) -> bool {
        match key {
            "department_id" => matches_number(self.department_id, value),
            "is_active" => matches_flag(self.is_active, value),
            "created" => matches_date(self.created_at, value),
            _ => true,
        }
    }
}

impl Entity for SubDepartment {
    const NAME: &'static str = "sub-department";
    const ENDPOINT: &'static str = "api/SubDepartments";
    const SOURCE: ListSource = ListSource::Remote(QueryMapping::STANDARD);
    const FILTERS: &'static [FilterField] = &[
        FilterField::new("department_id", "DepartmentId", FilterKind::Number),
        FilterField::new("is_active", "IsActive", FilterKind::Flag),
        FilterField::new("created", "Created", FilterKind::DateRange),
    ];
    const DELETE_REASON_KEY: Option<&'static str> = Some("deletedReason");

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn label(&self) -> String {
        self.name_en.clone()
    }

    fn columns() -> &'static [&'static str] {
        &["ID", "Name", "Name (AR)", "Department", "Created", "Active"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name_en.clone(),
            or_dash(self.name_ar.as_deref()),
            or_dash(self.department_name.as_deref()),
            format_date(self.created_at),
            format_flag(self.is_active),
        ]
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.to_string()),
            ("Name", self.name_en.clone()),
            ("Name (Arabic)", or_dash(self.name_ar.as_deref())),
            ("Department", or_dash(self.department_name.as_deref())),
            ("Created", format_date(self.created_at)),
            ("Active", format_flag(self.is_active)),
        ]
    }
}
