//! In-memory store backend with an optional capacity bound.

use std::cell::RefCell;
use std::collections::HashMap;

use super::{StoreBackend, StoreError};

/// HashMap-backed store. Useful as the default for hosts without durable
/// storage and as the workhorse for tests; the capacity bound makes quota
/// exhaustion observable the way a real bounded store reports it.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RefCell<HashMap<String, Vec<u8>>>,
    capacity_bytes: Option<usize>,
    disabled: bool,
}

impl MemoryBackend {
    /// Unbounded in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// In-memory store that rejects writes once total value bytes would
    /// exceed `capacity_bytes`.
    pub fn with_capacity_bytes(capacity_bytes: usize) -> Self {
        Self {
            capacity_bytes: Some(capacity_bytes),
            ..Default::default()
        }
    }

    /// A store that fails every operation (the "storage disabled" host).
    pub fn disabled() -> Self {
        Self {
            disabled: true,
            ..Default::default()
        }
    }
}

impl StoreBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        if self.disabled {
            return Err(StoreError::Disabled);
        }
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        if self.disabled {
            return Err(StoreError::Disabled);
        }
        let mut entries = self.entries.borrow_mut();
        if let Some(capacity) = self.capacity_bytes {
            let occupied: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(_, v)| v.len())
                .sum();
            if occupied + value.len() > capacity {
                return Err(StoreError::QuotaExceeded);
            }
        }
        entries.insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        if self.disabled {
            return Err(StoreError::Disabled);
        }
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
