//! `list`, `show` and `delete` for every entity.

use std::process::ExitCode;
use std::sync::Arc;

use serde_json::json;

use super::{CommandContext, CommandOutput, print_json};
use crate::cli::OutputOptions;
use crate::display::{render_detail, render_list};
use crate::entities::{Entity, EntityId};
use crate::error::{ConsoleError, Result};
use crate::i18n::text;
use crate::list::{
    DeleteRequest, DetailState, ListAction, ListController, ListState, PaginationControl,
    ViewStatus, load_detail, submit_delete,
};
use crate::query::FilterState;

/// List options from the command line
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub search: Option<String>,
    /// `(key, raw value)` pairs from `--filter key=value`
    pub filters: Vec<(String, String)>,
    pub page: usize,
    pub page_size: Option<usize>,
}

/// Build the committed filter for `T` from command-line options.
pub fn build_filter<T: Entity>(default_page_size: usize, query: &ListQuery) -> Result<FilterState> {
    let mut filter = FilterState::new(default_page_size);
    if let Some(size) = query.page_size {
        filter.set_page_size(size);
    }
    if let Some(search) = &query.search {
        filter.set_search(search.trim());
    }

    for (key, raw) in &query.filters {
        let field = T::filter_field(key).ok_or_else(|| {
            let available: Vec<&str> = T::FILTERS.iter().map(|f| f.key).collect();
            ConsoleError::InvalidInput(format!(
                "unknown filter '{key}' for {}. Available: {}",
                T::NAME,
                available.join(", ")
            ))
        })?;
        filter.set_field_filter(field.key, field.kind.parse(raw)?);
    }

    filter.set_page(query.page);
    Ok(filter)
}

pub async fn cmd_list<T: Entity>(
    ctx: &CommandContext,
    query: &ListQuery,
    output: OutputOptions,
) -> Result<()> {
    let filter = build_filter::<T>(ctx.config.page_size as usize, query)?;
    let control = PaginationControl::for_width(ctx.columns, ctx.config.pagination_window as usize);

    let backend = Arc::new(ctx.backend()?);
    let mut list: ListController<_, T> = ListController::new(
        backend,
        ListState::new(filter, control),
        ctx.config.search_debounce(),
    );
    list.dispatch(ListAction::Refresh);
    list.settle().await;

    let state = list.state();
    if let ViewStatus::Error(err) = &state.status {
        return Err(err.clone().into_error());
    }

    if output.json {
        print_json(&json!({
            "items": state.items,
            "pagination": state.pagination,
            "filter": state.filter,
        }))
    } else {
        println!("{}", render_list(&list.view(ctx.language()), ctx.language()));
        Ok(())
    }
}

/// Show one record.
///
/// A missing or forbidden record gets its own view on stderr, with the way
/// back to the list, and a failing exit code. Other failures propagate.
pub async fn cmd_show<T: Entity>(
    ctx: &CommandContext,
    id: &str,
    output: OutputOptions,
) -> Result<ExitCode> {
    let backend = ctx.backend()?;
    let lang = ctx.language();

    let state = load_detail::<_, T>(&backend, id).await;
    match &state {
        DetailState::Loaded(item) => {
            CommandOutput::new(serde_json::to_value(item)?)
                .with_text(render_detail(&state, lang))
                .print(output)?;
            Ok(ExitCode::SUCCESS)
        }
        DetailState::Failed(err) => Err(err.clone().into_error()),
        DetailState::NotFound(_) | DetailState::Forbidden(_) | DetailState::Loading => {
            eprintln!("{}", render_detail(&state, lang));
            Ok(ExitCode::FAILURE)
        }
    }
}

pub async fn cmd_delete<T: Entity>(
    ctx: &CommandContext,
    id: &str,
    reason: Option<&str>,
    output: OutputOptions,
) -> Result<()> {
    // Rejected before any request is made
    let request = DeleteRequest::new(EntityId::new(id.trim()), reason.unwrap_or_default())?;

    let backend = ctx.backend()?;
    submit_delete::<_, T>(&backend, &request).await?;

    CommandOutput::new(json!({
        "action": "delete",
        "entity": T::NAME,
        "id": request.id(),
        "reason": request.reason(),
        "success": true,
    }))
    .with_text(text::DELETED.get(ctx.language()))
    .print(output)
}
