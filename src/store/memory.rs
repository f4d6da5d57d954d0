use crate::core::storage::LocalStorage;
use anyhow::{Result, anyhow};
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::debug;

/// In-memory storage backed by a HashMap. Contents are lost when dropped.
#[derive(Default)]
pub struct MemoryStorage {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Creates an empty MemoryStorage
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let items = self
            .items
            .read()
            .map_err(|e| anyhow!("Memory storage lock poisoned: {e}"))?;
        let value = items.get(key).cloned();
        debug!(key, found = value.is_some(), "Storage GET");
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self
            .items
            .write()
            .map_err(|e| anyhow!("Memory storage lock poisoned: {e}"))?;
        debug!(key, "Storage SET");
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let mut items = self
            .items
            .write()
            .map_err(|e| anyhow!("Memory storage lock poisoned: {e}"))?;
        items.remove(key);
        debug!(key, "Storage REMOVE");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_get_set() {
        let storage = MemoryStorage::new();

        // Initially, storage is empty
        assert!(storage.get_item("key1").unwrap().is_none());

        storage.set_item("key1", "value1").unwrap();
        assert_eq!(storage.get_item("key1").unwrap().as_deref(), Some("value1"));

        // Overwrite
        storage.set_item("key1", "value2").unwrap();
        assert_eq!(storage.get_item("key1").unwrap().as_deref(), Some("value2"));

        assert!(storage.get_item("key2").unwrap().is_none());
    }

    #[test]
    fn test_memory_storage_remove() {
        let storage = MemoryStorage::new();

        storage.set_item("key1", "value1").unwrap();
        storage.remove_item("key1").unwrap();
        assert!(storage.get_item("key1").unwrap().is_none());

        // Removing again is a no-op
        storage.remove_item("key1").unwrap();
    }
}
