use serde::{Deserialize, Serialize};

use super::{Entity, EntityId, ListSource, format_flag, or_dash};
use crate::list::local::{Searchable, contains_case_insensitive, matches_flag};
use crate::query::{FilterField, FilterKind, FilterValue, QueryMapping};

/// Permission role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub name_ar: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub users_count: u32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl Searchable for Role {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.name_ar.as_deref());
        fields.extend(self.description.as_deref());
        fields
    }

    fn matches_field(&self, key: &str, value: &FilterValue) -> bool {
        match key {
            "is_active" => matches_flag(self.is_active, value),
            "name" => match value {
                FilterValue::Text(t) => contains_case_insensitive(&self.name, t),
                _ => true,
            },
            _ => true,
        }
    }
}

impl Entity for Role {
    const NAME: &'static str = "role";
    const ENDPOINT: &'static str = "api/Roles";
    const SOURCE: ListSource = ListSource::Remote(QueryMapping::STANDARD);
    const FILTERS: &'static [FilterField] = &[FilterField::new(
        "is_active",
        "IsActive",
        FilterKind::Flag,
    )];
    const DELETE_REASON_KEY: Option<&'static str> = Some("reason");

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn columns() -> &'static [&'static str] {
        &["ID", "Name", "Users", "Active"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.users_count.to_string(),
            format_flag(self.is_active),
        ]
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.to_string()),
            ("Name", self.name.clone()),
            ("Name (Arabic)", or_dash(self.name_ar.as_deref())),
            ("Description", or_dash(self.description.as_deref())),
            ("Users", self.users_count.to_string()),
            ("Active", format_flag(self.is_active)),
        ]
    }
}
