//! HTTP access to the remote movie collection.

use std::fmt;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::domain::{MovieId, MovieRecord};
use tracing::debug;
use url::Url;

use crate::error::{EndpointError, StoreError};

/// Base URL of the collection resource. Members live at `{base}/{id}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionEndpoint {
    base: Url,
}

impl CollectionEndpoint {
    pub fn parse(raw: &str) -> Result<Self, EndpointError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(EndpointError::Missing);
        }

        let mut base = Url::parse(raw).map_err(|source| EndpointError::Invalid {
            url: raw.to_string(),
            source,
        })?;
        if base.scheme() != "http" && base.scheme() != "https" {
            return Err(EndpointError::UnsupportedScheme(base.scheme().to_string()));
        }
        if base.query().is_some() || base.fragment().is_some() {
            return Err(EndpointError::QueryOrFragment(raw.to_string()));
        }

        let trimmed = base.path().trim_end_matches('/').to_string();
        base.set_path(&trimmed);
        Ok(Self { base })
    }

    pub fn collection_url(&self) -> Url {
        self.base.clone()
    }

    pub fn member_url(&self, id: &MovieId) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&id.to_string());
        }
        url
    }
}

impl fmt::Display for CollectionEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.base.as_str())
    }
}

/// The three requests the store issues. Implementations report failures
/// through [`StoreError`] and never panic on bad responses.
#[async_trait]
pub trait MovieApi: Send + Sync {
    async fn list(&self) -> Result<Vec<MovieRecord>, StoreError>;
    async fn replace(&self, record: &MovieRecord) -> Result<MovieRecord, StoreError>;
    async fn remove(&self, id: &MovieId) -> Result<(), StoreError>;
}

pub struct HttpMovieApi {
    http: Client,
    endpoint: CollectionEndpoint,
}

impl HttpMovieApi {
    pub fn new(endpoint: CollectionEndpoint) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(http: Client, endpoint: CollectionEndpoint) -> Self {
        Self { http, endpoint }
    }
}

#[async_trait]
impl MovieApi for HttpMovieApi {
    async fn list(&self) -> Result<Vec<MovieRecord>, StoreError> {
        let url = self.endpoint.collection_url();
        debug!("movies: GET {url}");
        let response = self.http.get(url).send().await?;
        decode_json(response).await
    }

    async fn replace(&self, record: &MovieRecord) -> Result<MovieRecord, StoreError> {
        let url = self.endpoint.member_url(&record.id);
        debug!("movies: PUT {url}");
        let response = self.http.put(url).json(record).send().await?;
        decode_json(response).await
    }

    async fn remove(&self, id: &MovieId) -> Result<(), StoreError> {
        let url = self.endpoint.member_url(id);
        debug!("movies: DELETE {url}");
        let response = self.http.delete(url).send().await?;
        ensure_success(&response)?;
        Ok(())
    }
}

fn ensure_success(response: &Response) -> Result<(), StoreError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(StoreError::Rejected {
            status: status.as_u16(),
        })
    }
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
    ensure_success(&response)?;
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
