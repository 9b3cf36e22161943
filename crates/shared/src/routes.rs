//! Route table shared by every consumer of the movie store.
//!
//! Two routes exist: the list at `/` and a single movie at `/movie/:id`. All
//! paths live under a configurable base path.

use crate::domain::MovieId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    MovieDetails { id: String },
}

impl Route {
    pub fn movie(id: &MovieId) -> Self {
        Route::MovieDetails { id: id.to_string() }
    }
}

#[derive(Debug, Clone)]
pub struct Router {
    base_path: String,
}

impl Default for Router {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Router {
    pub fn new(base_path: &str) -> Self {
        let trimmed = base_path.trim().trim_matches('/');
        let base_path = if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{trimmed}")
        };
        Self { base_path }
    }

    pub fn base_path(&self) -> &str {
        if self.base_path.is_empty() {
            "/"
        } else {
            &self.base_path
        }
    }

    pub fn resolve(&self, path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let relative = if self.base_path.is_empty() {
            path
        } else {
            let rest = path.strip_prefix(&self.base_path)?;
            if !rest.is_empty() && !rest.starts_with('/') {
                return None;
            }
            rest
        };

        let segments: Vec<&str> = relative.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Some(Route::Home),
            ["movie", id] => Some(Route::MovieDetails {
                id: (*id).to_string(),
            }),
            _ => None,
        }
    }

    pub fn href(&self, route: &Route) -> String {
        match route {
            Route::Home => format!("{}/", self.base_path),
            Route::MovieDetails { id } => format!("{}/movie/{id}", self.base_path),
        }
    }
}

#[cfg(test)]
#[path = "tests/routes_tests.rs"]
mod tests;
