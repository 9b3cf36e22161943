//! Plain-text renderings of the list and detail views.

use anyhow::Result;
use client_core::{CollectionState, MutationKind, StoreEvent};
use shared::{
    domain::{MovieId, MovieRecord},
    routes::{Route, Router},
};

pub fn render_list(state: &CollectionState, router: &Router) -> String {
    let mut out = String::new();
    if state.is_loading {
        out.push_str("Loading movies...\n");
    }
    if let Some(err) = &state.last_error {
        out.push_str(&format!("Error: {err}\n"));
    }
    if state.items.is_empty() {
        if !state.is_loading && state.last_error.is_none() {
            out.push_str("No movies found.\n");
        }
        return out;
    }

    for movie in &state.items {
        out.push_str(&format!(
            "{}\t{}\t{}\n",
            movie.id,
            movie.title().unwrap_or("(untitled)"),
            router.href(&Route::movie(&movie.id))
        ));
    }
    out
}

pub fn find_by_param<'a>(items: &'a [MovieRecord], param: &str) -> Option<&'a MovieRecord> {
    items.iter().find(|m| m.id.matches_route_param(param))
}

/// Id to send a delete for. A loaded record whose id the parameter addresses
/// wins; otherwise the parameter is sent verbatim as a string id.
pub fn delete_target(items: &[MovieRecord], param: &str) -> MovieId {
    find_by_param(items, param)
        .map(|movie| movie.id.clone())
        .unwrap_or_else(|| MovieId::Text(param.to_string()))
}

pub fn render_details(state: &CollectionState, param: &str) -> Result<String> {
    match find_by_param(&state.items, param) {
        Some(movie) => Ok(format!("{}\n", serde_json::to_string_pretty(movie)?)),
        None => match &state.last_error {
            Some(err) => Ok(format!("Error: {err}\n")),
            None => Ok(format!("Movie {param} not found.\n")),
        },
    }
}

pub fn describe_event(event: &StoreEvent) -> String {
    match event {
        StoreEvent::LoadingChanged(true) => "loading started".to_string(),
        StoreEvent::LoadingChanged(false) => "loading finished".to_string(),
        StoreEvent::ItemsReplaced(items) => format!("loaded {} movies", items.len()),
        StoreEvent::LoadFailed(message) => format!("load failed: {message}"),
        StoreEvent::ItemUpdated { index, record } => {
            format!("updated movie {} at position {index}", record.id)
        }
        StoreEvent::ItemRemoved { id } => format!("removed movie {id}"),
        StoreEvent::MutationFailed {
            operation,
            id,
            message,
            ..
        } => {
            let verb = match operation {
                MutationKind::Update => "update",
                MutationKind::Delete => "delete",
            };
            format!("{verb} of movie {id} failed: {message}")
        }
    }
}

#[cfg(test)]
#[path = "tests/views_tests.rs"]
mod tests;
