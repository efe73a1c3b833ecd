//! Terminal rendering of list and detail views.

use owo_colors::OwoColorize;

use crate::entities::Entity;
use crate::i18n::Language;
use crate::list::{DetailState, ListBody, ListViewModel};

mod pagination;
mod table;

pub use pagination::{format_page_buttons, format_range_summary, render_pagination};
pub use table::{render_details, render_table};

/// Error banner with any field-level messages listed underneath.
pub fn render_error(message: &str, errors: &[String]) -> String {
    let mut out = format!("{} {}", "Error:".red().bold(), message);
    for error in errors {
        out.push_str(&format!("\n  - {error}"));
    }
    out
}

pub fn render_list<T: Entity>(view: &ListViewModel<T>, lang: Language) -> String {
    let mut sections = Vec::new();

    match &view.body {
        ListBody::Idle => {}
        ListBody::Loading(message) => sections.push(message.dimmed().to_string()),
        ListBody::Empty(message) => sections.push(message.yellow().to_string()),
        ListBody::Error { message, errors } => sections.push(render_error(message, errors)),
        ListBody::Rows(items) => {
            sections.push(render_table(T::columns(), items.iter().map(T::row)));
        }
    }

    if let Some(pagination) = &view.pagination {
        sections.push(render_pagination(pagination, lang));
    }
    if let Some(notice) = &view.notice {
        sections.push(notice.green().to_string());
    }

    sections.join("\n")
}

pub fn render_detail<T: Entity>(state: &DetailState<T>, lang: Language) -> String {
    match state {
        DetailState::Loaded(item) => render_details(&item.details()),
        DetailState::Loading => state.message(lang).unwrap_or_default().dimmed().to_string(),
        DetailState::NotFound(_) | DetailState::Forbidden(_) => {
            state.message(lang).unwrap_or_default().yellow().to_string()
        }
        DetailState::Failed(err) => render_error(&err.resolve(lang), &err.errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_lists_field_errors() {
        let out = render_error("Validation failed", &["Name: required".to_string()]);
        assert!(out.contains("Validation failed"));
        assert!(out.ends_with("\n  - Name: required"));
    }
}
