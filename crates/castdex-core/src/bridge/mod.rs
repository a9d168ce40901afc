pub mod query;

use std::sync::Mutex;

use thiserror::Error;

use castdex_model::{CatalogFilter, PageNumber};

/// Write failure of the external query-state store.
///
/// Non-fatal: the engine logs it and keeps loading data.
#[derive(Debug, Error)]
#[error("failed to persist query state: {0}")]
pub struct PersistError(pub String);

/// External persistence of `(filter, page)`, typically a location query
/// string.
///
/// The engine never parses raw query strings itself: it receives the
/// already-decoded pair once at startup and pushes the pair back after every
/// settled change. Writes are fire-and-forget best effort.
pub trait UrlStateBridge: Send + Sync {
    fn read_initial(&self) -> (CatalogFilter, PageNumber);

    fn persist(&self, filter: &CatalogFilter, page: PageNumber) -> Result<(), PersistError>;
}

/// Ready-to-use bridge holding the encoded pairs in memory.
///
/// Backs the demos and tests; a browser-style host would replace this with a
/// location-query adapter using the same [`query`] codec.
#[derive(Debug, Default)]
pub struct InMemoryBridge {
    pairs: Mutex<Vec<(String, String)>>,
}

impl InMemoryBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing external representation.
    pub fn with_query(pairs: Vec<(String, String)>) -> Self {
        Self {
            pairs: Mutex::new(pairs),
        }
    }

    /// Current external representation.
    pub fn pairs(&self) -> Vec<(String, String)> {
        self.pairs.lock().unwrap().clone()
    }
}

impl UrlStateBridge for InMemoryBridge {
    fn read_initial(&self) -> (CatalogFilter, PageNumber) {
        query::decode(&self.pairs.lock().unwrap())
    }

    fn persist(&self, filter: &CatalogFilter, page: PageNumber) -> Result<(), PersistError> {
        *self.pairs.lock().unwrap() = query::encode(filter, page);
        Ok(())
    }
}
