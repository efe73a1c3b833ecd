use owo_colors::OwoColorize;

use crate::i18n::{Language, text};
use crate::list::{PaginationMeta, PaginationView};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Button {
    Enabled(String),
    Disabled(String),
    Current(String),
}

fn buttons(view: &PaginationView, lang: Language) -> Vec<Button> {
    let previous = format!("‹ {}", text::PREVIOUS.get(lang));
    let next = format!("{} ›", text::NEXT.get(lang));

    let mut buttons = Vec::with_capacity(view.pages.len() + 2);
    buttons.push(if view.previous_enabled {
        Button::Enabled(previous)
    } else {
        Button::Disabled(previous)
    });
    for &page in &view.pages {
        if page == view.meta.page {
            buttons.push(Button::Current(format!("[{page}]")));
        } else {
            buttons.push(Button::Enabled(page.to_string()));
        }
    }
    buttons.push(if view.next_enabled {
        Button::Enabled(next)
    } else {
        Button::Disabled(next)
    });
    buttons
}

/// "Showing 11-20 of 47"
pub fn format_range_summary(meta: &PaginationMeta, lang: Language) -> String {
    format!(
        "{} {}-{} {} {}",
        text::SHOWING.get(lang),
        meta.start_index,
        meta.end_index,
        text::OF.get(lang),
        meta.total_count
    )
}

/// Uncoloured button row, current page in brackets.
pub fn format_page_buttons(view: &PaginationView, lang: Language) -> String {
    buttons(view, lang)
        .into_iter()
        .map(|button| match button {
            Button::Enabled(label) | Button::Disabled(label) | Button::Current(label) => label,
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Button row plus range summary, coloured for the terminal.
pub fn render_pagination(view: &PaginationView, lang: Language) -> String {
    let row = buttons(view, lang)
        .into_iter()
        .map(|button| match button {
            Button::Enabled(label) => label,
            Button::Disabled(label) => label.dimmed().to_string(),
            Button::Current(label) => label.cyan().bold().to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        "{row}\n{}",
        format_range_summary(&view.meta, lang).dimmed()
    )
}
