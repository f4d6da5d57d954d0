//! Bounded, most-recent-first conversion history and its persistence.

use crate::core::conversion::ConversionRecord;
use crate::core::storage::LocalStorage;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Maximum number of conversions kept.
pub const HISTORY_CAPACITY: usize = 10;

/// Storage key holding the JSON array of records.
pub const HISTORY_STORAGE_KEY: &str = "conversionHistory";

/// Newest-first list of conversions, never longer than [`HISTORY_CAPACITY`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversionHistory {
    entries: Vec<ConversionRecord>,
}

impl ConversionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepends `entry`, evicting the oldest records beyond capacity.
    pub fn record(&mut self, entry: ConversionRecord) {
        self.entries.insert(0, entry);
        self.entries.truncate(HISTORY_CAPACITY);
    }

    pub fn entries(&self) -> &[ConversionRecord] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConversionRecord> {
        self.entries.iter()
    }
}

impl From<Vec<ConversionRecord>> for ConversionHistory {
    fn from(mut entries: Vec<ConversionRecord>) -> Self {
        entries.truncate(HISTORY_CAPACITY);
        Self { entries }
    }
}

/// Keeps [`ConversionHistory`] in client-local storage.
///
/// Storage and decoding failures are logged and never returned: a broken store
/// reads as empty history and writes become no-ops.
#[derive(Clone)]
pub struct ConversionHistoryStore {
    storage: Arc<dyn LocalStorage>,
}

impl ConversionHistoryStore {
    pub fn new(storage: Arc<dyn LocalStorage>) -> Self {
        Self { storage }
    }

    pub fn load(&self) -> ConversionHistory {
        let raw = match self.storage.get_item(HISTORY_STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No persisted history");
                return ConversionHistory::new();
            }
            Err(e) => {
                warn!(error = %e, "Failed to read history from storage");
                return ConversionHistory::new();
            }
        };

        match serde_json::from_str::<Vec<ConversionRecord>>(&raw) {
            Ok(entries) => {
                debug!(count = entries.len(), "Loaded history");
                ConversionHistory::from(entries)
            }
            Err(e) => {
                warn!(error = %e, "Persisted history is corrupt, treating as empty");
                ConversionHistory::new()
            }
        }
    }

    /// Read-modify-write of the persisted list with `entry` at the front.
    pub fn record(&self, entry: ConversionRecord) {
        let mut history = self.load();
        history.record(entry);

        let serialized = match serde_json::to_string(&history) {
            Ok(s) => s,
            Err(e) => {
                warn!(error = %e, "Failed to serialize history");
                return;
            }
        };
        if let Err(e) = self.storage.set_item(HISTORY_STORAGE_KEY, &serialized) {
            warn!(error = %e, "Failed to write history to storage");
            return;
        }
        debug!(count = history.len(), "Recorded conversion");
    }

    pub fn clear(&self) {
        match self.storage.remove_item(HISTORY_STORAGE_KEY) {
            Ok(()) => debug!("Cleared history"),
            Err(e) => warn!(error = %e, "Failed to clear history"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStorage;
    use anyhow::{Result, bail};

    fn record(amount: f64) -> ConversionRecord {
        ConversionRecord::new("USD", "EUR", amount, amount * 0.9)
    }

    fn memory_store() -> (Arc<MemoryStorage>, ConversionHistoryStore) {
        let storage = Arc::new(MemoryStorage::new());
        let store = ConversionHistoryStore::new(storage.clone());
        (storage, store)
    }

    struct BrokenStorage;

    impl LocalStorage for BrokenStorage {
        fn get_item(&self, _key: &str) -> Result<Option<String>> {
            bail!("disk on fire")
        }

        fn set_item(&self, _key: &str, _value: &str) -> Result<()> {
            bail!("disk on fire")
        }

        fn remove_item(&self, _key: &str) -> Result<()> {
            bail!("disk on fire")
        }
    }

    #[test]
    fn test_history_prepends_and_caps() {
        let mut history = ConversionHistory::new();
        for i in 0..11 {
            history.record(record(i as f64));
        }

        assert_eq!(history.len(), HISTORY_CAPACITY);
        // Newest first, the very first record (amount 0) evicted
        assert_eq!(history.entries()[0].amount, 10.0);
        assert_eq!(history.entries()[9].amount, 1.0);
        assert!(history.iter().all(|r| r.amount != 0.0));
    }

    #[test]
    fn test_load_empty_when_absent() {
        let (_, store) = memory_store();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_record_persists_newest_first() {
        let (storage, store) = memory_store();
        store.record(record(1.0));
        store.record(record(2.0));

        let history = store.load();
        assert_eq!(history.len(), 2);
        assert_eq!(history.entries()[0].amount, 2.0);
        assert_eq!(history.entries()[1].amount, 1.0);

        let raw = storage.get_item(HISTORY_STORAGE_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[0]["fromCurrency"], "USD");
    }

    #[test]
    fn test_record_evicts_oldest_after_capacity() {
        let (_, store) = memory_store();
        for i in 1..=11 {
            store.record(record(i as f64));
        }

        let history = store.load();
        assert_eq!(history.len(), 10);
        let amounts: Vec<f64> = history.iter().map(|r| r.amount).collect();
        let expected: Vec<f64> = (2..=11).rev().map(|i| i as f64).collect();
        assert_eq!(amounts, expected);
    }

    #[test]
    fn test_clear_then_load_is_empty() {
        let (storage, store) = memory_store();
        store.record(record(1.0));
        store.clear();

        assert!(store.load().is_empty());
        assert!(storage.get_item(HISTORY_STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn test_corrupt_history_loads_empty() {
        let (storage, store) = memory_store();
        storage
            .set_item(HISTORY_STORAGE_KEY, "{not json at all")
            .unwrap();
        assert!(store.load().is_empty());

        // A corrupt blob is replaced on the next successful record
        store.record(record(5.0));
        assert_eq!(store.load().len(), 1);
    }

    #[test]
    fn test_oversized_persisted_history_is_truncated() {
        let (storage, store) = memory_store();
        let entries: Vec<ConversionRecord> = (0..15).map(|i| record(i as f64)).collect();
        storage
            .set_item(
                HISTORY_STORAGE_KEY,
                &serde_json::to_string(&entries).unwrap(),
            )
            .unwrap();

        let history = store.load();
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.entries()[0].amount, 0.0);
    }

    #[test]
    fn test_storage_failures_do_not_propagate() {
        let store = ConversionHistoryStore::new(Arc::new(BrokenStorage));
        assert!(store.load().is_empty());
        store.record(record(1.0));
        store.clear();
        assert!(store.load().is_empty());
    }
}
