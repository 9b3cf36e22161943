use shared::error::FailureKind;
use thiserror::Error;

/// Failure of a single request against the movie collection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("network failure: {0}")]
    Network(String),
    #[error("server responded with status {status}")]
    Rejected { status: u16 },
    #[error("unexpected response body: {0}")]
    Parse(String),
}

impl StoreError {
    pub fn kind(&self) -> FailureKind {
        match self {
            StoreError::Network(_) => FailureKind::Network,
            StoreError::Rejected { .. } => FailureKind::ServerRejection,
            StoreError::Parse(_) => FailureKind::Parse,
        }
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            StoreError::Parse(err.to_string())
        } else if let Some(status) = err.status() {
            StoreError::Rejected {
                status: status.as_u16(),
            }
        } else {
            StoreError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Parse(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EndpointError {
    #[error("collection url is not configured; set API_URL or api_url in movies.toml")]
    Missing,
    #[error("invalid collection url '{url}': {source}")]
    Invalid {
        url: String,
        source: url::ParseError,
    },
    #[error("collection url must use http or https, got '{0}'")]
    UnsupportedScheme(String),
    #[error("collection url must not carry a query or fragment: '{0}'")]
    QueryOrFragment(String),
}
