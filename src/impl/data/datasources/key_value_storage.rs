use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock},
};

use fractic_server_error::ServerError;

use crate::errors::StorageWriteFailed;

/// Backing store for the ledger: string documents addressed by fixed keys.
///
/// Reads are infallible by contract. A backend that cannot read a key reports
/// it as absent, and the ledger falls back to the collection default.
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    /// Replaces the document stored under `key` in a single write.
    fn set(&self, key: &str, value: &str) -> Result<(), ServerError>;

    /// Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), ServerError>;
}

/// In-process storage. Nothing survives the process; intended for tests and
/// ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    documents: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.documents
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ServerError> {
        self.documents
            .write()
            .map_err(|e| StorageWriteFailed::with_debug(key, &e.to_string()))?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), ServerError> {
        self.documents
            .write()
            .map_err(|e| StorageWriteFailed::with_debug(key, &e.to_string()))?
            .remove(key);
        Ok(())
    }
}
