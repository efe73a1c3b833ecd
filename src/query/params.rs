//! Translation of a `FilterState` into backend query parameters.
//!
//! Empty values are never sent. Numeric filters are coerced to integers,
//! flags are sent as `"true"`/`"false"` only when set, and date ranges expand
//! into `<Param>From` / `<Param>To`.

use super::filter::{FilterField, FilterKind, FilterState, FilterValue};

/// Ordered `(name, value)` pairs, as handed to the HTTP layer
pub type QueryParams = Vec<(String, String)>;

/// Parameter names a server-paginated endpoint expects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryMapping {
    pub search: &'static str,
    pub page: &'static str,
    pub page_size: &'static str,
}

impl QueryMapping {
    /// The convention most roster endpoints follow
    pub const STANDARD: QueryMapping = QueryMapping {
        search: "SearchTerm",
        page: "PageNumber",
        page_size: "PageSize",
    };
}

/// Build query parameters for `filter` using `mapping` and the entity's `fields`.
///
/// Field filters with no entry in `fields` are not sent.
pub fn build_query(filter: &FilterState, mapping: &QueryMapping, fields: &[FilterField]) -> QueryParams {
    let mut params = QueryParams::new();

    let search = filter.search_text().trim();
    if !search.is_empty() {
        params.push((mapping.search.to_string(), search.to_string()));
    }

    for (key, value) in filter.field_filters() {
        let Some(field) = fields.iter().find(|f| f.key == key) else {
            tracing::debug!("filter '{key}' has no query parameter, not sent");
            continue;
        };
        push_field(&mut params, field, value);
    }

    params.push((mapping.page.to_string(), filter.page().to_string()));
    params.push((mapping.page_size.to_string(), filter.page_size().to_string()));
    params
}

fn push_field(params: &mut QueryParams, field: &FilterField, value: &FilterValue) {
    if value.is_empty() {
        return;
    }

    match (field.kind, value) {
        (FilterKind::Number, FilterValue::Text(raw)) => match coerce_integer(raw) {
            Some(n) => params.push((field.param.to_string(), n.to_string())),
            None => tracing::debug!("dropping non-numeric value '{raw}' for {}", field.param),
        },
        (_, FilterValue::Number(n)) => params.push((field.param.to_string(), n.to_string())),
        (_, FilterValue::Flag(b)) => params.push((field.param.to_string(), b.to_string())),
        (_, FilterValue::Text(s)) => params.push((field.param.to_string(), s.trim().to_string())),
        (_, FilterValue::DateRange(range)) => {
            if let Some(from) = range.from {
                params.push((format!("{}From", field.param), from.to_string()));
            }
            if let Some(to) = range.to {
                params.push((format!("{}To", field.param), to.to_string()));
            }
        }
        (_, FilterValue::Unset) => {}
    }
}

/// Integer value of numeric text; fractional input is truncated.
fn coerce_integer(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    raw.parse::<i64>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(|f| f.trunc() as i64)
    })
}
