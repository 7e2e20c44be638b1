//! Persisted preference store: a synchronous byte key-value boundary.
//!
//! Everything above this module treats persistence as best-effort: a
//! failing or absent store degrades the engine to in-memory state for the
//! session, never to an error.

mod memory;
mod sqlite;

pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;

use std::rc::Rc;

use thiserror::Error;

/// Store error type.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("store capacity exceeded")]
    QuotaExceeded,
    #[error("store is disabled")]
    Disabled,
}

/// Backend trait for preference storage.
///
/// Implementations handle raw byte storage/retrieval, synchronously.
/// Capacity may be bounded; `set` reports quota exhaustion as an error.
pub trait StoreBackend {
    /// Get raw bytes for a key.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Set raw bytes for a key.
    fn set(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError>;

    /// Delete a key.
    fn delete(&self, key: &str) -> Result<(), StoreError>;
}

const PROBE_KEY: &str = "__colgrid_probe__";

/// One-shot capability check: write, read back, delete.
///
/// Run once per backend and carried as a boolean from then on; a store
/// that fails the probe is treated as absent for the whole session.
pub fn probe(backend: &dyn StoreBackend) -> bool {
    let ok = backend.set(PROBE_KEY, PROBE_KEY.as_bytes().to_vec()).is_ok()
        && matches!(backend.get(PROBE_KEY), Ok(Some(_)))
        && backend.delete(PROBE_KEY).is_ok();
    if !ok {
        log::debug!("[store] capability probe failed; persistence disabled");
    }
    ok
}

/// Shared handle to a backend plus its cached probe result.
#[derive(Clone)]
pub struct StoreHandle {
    backend: Rc<dyn StoreBackend>,
    available: bool,
}

impl StoreHandle {
    /// Wrap a backend, probing it once.
    pub fn new(backend: impl StoreBackend + 'static) -> Self {
        let backend: Rc<dyn StoreBackend> = Rc::new(backend);
        let available = probe(backend.as_ref());
        Self { backend, available }
    }

    /// Wrap a backend with an externally supplied availability verdict.
    pub fn with_availability(backend: impl StoreBackend + 'static, available: bool) -> Self {
        Self {
            backend: Rc::new(backend),
            available,
        }
    }

    pub fn available(&self) -> bool {
        self.available
    }

    pub fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.backend.get(key)
    }

    pub fn set(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        self.backend.set(key, value)
    }

    pub fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.backend.delete(key)
    }
}

impl std::fmt::Debug for StoreHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreHandle")
            .field("available", &self.available)
            .finish_non_exhaustive()
    }
}
