use std::{
    collections::HashSet,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use shared::{
    domain::{MovieId, MovieRecord},
    error::FailureKind,
};
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

pub mod config;
pub mod error;
pub mod transport;

pub use error::{EndpointError, StoreError};
pub use transport::{CollectionEndpoint, HttpMovieApi, MovieApi};

const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Point-in-time copy of everything a view renders from.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionState {
    pub items: Vec<MovieRecord>,
    pub is_loading: bool,
    pub last_error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Update,
    Delete,
}

/// Notifications for applied state changes. Each event is sent while the
/// state lock is held, so subscribers see events in the order the changes
/// were applied.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    LoadingChanged(bool),
    ItemsReplaced(Vec<MovieRecord>),
    LoadFailed(String),
    ItemUpdated {
        index: usize,
        record: MovieRecord,
    },
    ItemRemoved {
        id: MovieId,
    },
    /// Diagnostic only. A failed update or delete leaves the store state
    /// exactly as it was.
    MutationFailed {
        operation: MutationKind,
        id: MovieId,
        kind: FailureKind,
        message: String,
    },
}

struct StoreState {
    items: Vec<MovieRecord>,
    is_loading: bool,
    last_error: Option<String>,
    loads_in_flight: usize,
    attached: bool,
}

/// Client-side mirror of the remote movie collection.
///
/// Every operation awaits exactly one request and applies its outcome once the
/// response arrives. Operations are not serialized against each other: a load
/// that settles after a mutation overwrites `items` with whatever the server
/// returned.
pub struct MovieListStore {
    api: Arc<dyn MovieApi>,
    inner: Mutex<StoreState>,
    events: broadcast::Sender<StoreEvent>,
}

impl MovieListStore {
    pub fn new(api: Arc<dyn MovieApi>) -> Arc<Self> {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Arc::new(Self {
            api,
            inner: Mutex::new(StoreState {
                items: Vec::new(),
                is_loading: true,
                last_error: None,
                loads_in_flight: 0,
                attached: false,
            }),
            events,
        })
    }

    pub fn with_endpoint(endpoint: CollectionEndpoint) -> Arc<Self> {
        Self::new(Arc::new(HttpMovieApi::new(endpoint)))
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    pub fn snapshot(&self) -> CollectionState {
        let guard = self.state();
        CollectionState {
            items: guard.items.clone(),
            is_loading: guard.is_loading,
            last_error: guard.last_error.clone(),
        }
    }

    pub fn items(&self) -> Vec<MovieRecord> {
        self.state().items.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state().is_loading
    }

    pub fn last_error(&self) -> Option<String> {
        self.state().last_error.clone()
    }

    pub fn find(&self, id: &MovieId) -> Option<MovieRecord> {
        self.state().items.iter().find(|m| &m.id == id).cloned()
    }

    /// Lifecycle hook for the owning view. The first call performs the
    /// initial load; later calls do nothing.
    pub async fn attach(&self) {
        let first = {
            let mut guard = self.state();
            !std::mem::replace(&mut guard.attached, true)
        };
        if first {
            self.load().await;
        }
    }

    pub async fn load(&self) {
        let in_flight = self.begin_load();

        match self.api.list().await {
            Ok(records) => {
                let items = dedupe_by_id(records);
                info!("movies: load settled count={}", items.len());
                let mut guard = self.state();
                guard.items = items.clone();
                guard.last_error = None;
                let _ = self.events.send(StoreEvent::ItemsReplaced(items));
            }
            Err(err) => {
                error!("movies: failed to fetch movies: {err}");
                let message = err.to_string();
                let mut guard = self.state();
                guard.last_error = Some(message.clone());
                let _ = self.events.send(StoreEvent::LoadFailed(message));
            }
        }

        drop(in_flight);
    }

    pub async fn update(&self, record: &MovieRecord) {
        if let Err(err) = self.update_impl(record).await {
            self.report_mutation_failure(MutationKind::Update, record.id.clone(), err);
        }
    }

    pub async fn delete(&self, id: &MovieId) {
        if let Err(err) = self.delete_impl(id).await {
            self.report_mutation_failure(MutationKind::Delete, id.clone(), err);
        }
    }

    async fn update_impl(&self, record: &MovieRecord) -> Result<(), StoreError> {
        let updated = self.api.replace(record).await?;

        let mut guard = self.state();
        match guard.items.iter().position(|m| m.id == updated.id) {
            Some(index) => {
                guard.items[index] = updated.clone();
                let _ = self.events.send(StoreEvent::ItemUpdated {
                    index,
                    record: updated,
                });
            }
            None => debug!("movies: discarding update for unknown id={}", updated.id),
        }
        Ok(())
    }

    async fn delete_impl(&self, id: &MovieId) -> Result<(), StoreError> {
        self.api.remove(id).await?;

        let mut guard = self.state();
        let before = guard.items.len();
        guard.items.retain(|m| &m.id != id);
        if before != guard.items.len() {
            let _ = self
                .events
                .send(StoreEvent::ItemRemoved { id: id.clone() });
        }
        Ok(())
    }

    fn report_mutation_failure(&self, operation: MutationKind, id: MovieId, err: StoreError) {
        match operation {
            MutationKind::Update => error!("movies: error updating movie id={id}: {err}"),
            MutationKind::Delete => error!("movies: error deleting movie id={id}: {err}"),
        }
        let _ = self.events.send(StoreEvent::MutationFailed {
            operation,
            id,
            kind: err.kind(),
            message: err.to_string(),
        });
    }

    fn begin_load(&self) -> LoadInFlight<'_> {
        let mut guard = self.state();
        guard.loads_in_flight += 1;
        if !std::mem::replace(&mut guard.is_loading, true) {
            let _ = self.events.send(StoreEvent::LoadingChanged(true));
        }
        LoadInFlight { store: self }
    }

    fn state(&self) -> MutexGuard<'_, StoreState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Releases the loading flag when the last outstanding load goes away,
/// including when a load future is dropped before it settles.
struct LoadInFlight<'a> {
    store: &'a MovieListStore,
}

impl Drop for LoadInFlight<'_> {
    fn drop(&mut self) {
        let mut guard = self.store.state();
        guard.loads_in_flight = guard.loads_in_flight.saturating_sub(1);
        if guard.loads_in_flight == 0 && guard.is_loading {
            guard.is_loading = false;
            let _ = self.store.events.send(StoreEvent::LoadingChanged(false));
        }
    }
}

fn dedupe_by_id(records: Vec<MovieRecord>) -> Vec<MovieRecord> {
    let mut seen = HashSet::with_capacity(records.len());
    let mut items = Vec::with_capacity(records.len());
    for record in records {
        if seen.insert(record.id.clone()) {
            items.push(record);
        } else {
            warn!("movies: dropping duplicate id={} from load", record.id);
        }
    }
    items
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
