//! In-memory `KvStore`.

use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::error::PortError;
use crate::ports::{KvStore, PortFuture};

/// A `KvStore` holding every value in a map guarded by a mutex.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl MemoryKvStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a value without going through the async port.
    pub fn insert(&self, path: &str, value: Vec<u8>) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(path.to_string(), value);
        }
    }

    /// Returns the stored paths in sorted order.
    #[must_use]
    pub fn paths(&self) -> Vec<String> {
        self.entries.lock().map(|e| e.keys().cloned().collect()).unwrap_or_default()
    }

    fn with_entries<T>(
        &self,
        f: impl FnOnce(&mut BTreeMap<String, Vec<u8>>) -> T,
    ) -> Result<T, PortError> {
        let mut entries = self.entries.lock().map_err(|e| format!("kv lock poisoned: {e}"))?;
        Ok(f(&mut entries))
    }
}

impl KvStore for MemoryKvStore {
    fn get<'a>(&'a self, path: &'a str) -> PortFuture<'a, Option<Vec<u8>>> {
        Box::pin(async move { self.with_entries(|e| e.get(path).cloned()) })
    }

    fn put<'a>(&'a self, path: &'a str, value: Vec<u8>) -> PortFuture<'a, ()> {
        Box::pin(async move {
            self.with_entries(|e| {
                e.insert(path.to_string(), value);
            })
        })
    }

    fn delete<'a>(&'a self, path: &'a str) -> PortFuture<'a, ()> {
        Box::pin(async move {
            self.with_entries(|e| {
                e.remove(path);
            })
        })
    }
}
