use std::collections::HashMap;

use super::BlobStore;
use crate::error::StorageError;

/// In-memory blob store. Never fails.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blobs: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-filled with `(key, value)` pairs.
    pub fn with_blobs<'a>(blobs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            blobs: blobs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl BlobStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.blobs.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
