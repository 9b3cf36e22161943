use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::DomainError;

/// Identifier of a movie within the remote collection.
///
/// Servers hand out string or numeric ids. Ids compare by their wire value:
/// `1` and `"1"` are distinct, and numbers outside `i64` (`2.5`,
/// `18446744073709551615`) are kept as the server sent them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MovieId {
    Int(i64),
    Number(Number),
    Text(String),
}

impl MovieId {
    /// Whether a path parameter addresses this id. Numbers only match their
    /// canonical rendering, so `"007"` does not address `7`.
    pub fn matches_route_param(&self, param: &str) -> bool {
        match self {
            MovieId::Int(value) => value.to_string() == param,
            MovieId::Number(number) => number.to_string() == param,
            MovieId::Text(text) => text == param,
        }
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MovieId::Int(value) => write!(f, "{value}"),
            MovieId::Number(number) => write!(f, "{number}"),
            MovieId::Text(text) => f.write_str(text),
        }
    }
}

impl From<i64> for MovieId {
    fn from(value: i64) -> Self {
        MovieId::Int(value)
    }
}

impl From<&str> for MovieId {
    fn from(value: &str) -> Self {
        MovieId::Text(value.to_string())
    }
}

impl From<String> for MovieId {
    fn from(value: String) -> Self {
        MovieId::Text(value)
    }
}

/// A single movie as the server represents it. Only `id` is interpreted;
/// every other field is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: MovieId,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl MovieRecord {
    pub fn new(id: impl Into<MovieId>) -> Self {
        Self {
            id: id.into(),
            fields: Map::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.fields.get("title").and_then(Value::as_str)
    }

    pub fn from_value(value: Value) -> Result<Self, DomainError> {
        if !value.is_object() {
            return Err(DomainError::NotAnObject);
        }
        if value.get("id").is_none() {
            return Err(DomainError::MissingId);
        }
        serde_json::from_value(value).map_err(|err| DomainError::InvalidRecord(err.to_string()))
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
