use crate::core::storage::LocalStorage;
use anyhow::{Context, Result};
use fjall::{Config, Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use std::path::Path;
use tracing::debug;

const PARTITION_NAME: &str = "local_storage";

/// Persistent storage in a fjall keyspace. Every write is synced before returning.
pub struct DiskStorage {
    keyspace: Keyspace,
    partition: PartitionHandle,
}

impl DiskStorage {
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create data directory: {}", path.display()))?;

        let keyspace = Config::new(path)
            .open()
            .with_context(|| format!("Failed to open storage at {}", path.display()))?;
        let partition = keyspace
            .open_partition(PARTITION_NAME, PartitionCreateOptions::default())
            .context("Failed to open storage partition")?;
        debug!("Opened disk storage at {}", path.display());

        Ok(Self {
            keyspace,
            partition,
        })
    }

    fn persist(&self) -> Result<()> {
        self.keyspace
            .persist(PersistMode::SyncAll)
            .context("Failed to persist storage")
    }
}

impl LocalStorage for DiskStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let Some(bytes) = self.partition.get(key)? else {
            debug!(key, "Storage MISS");
            return Ok(None);
        };
        debug!(key, "Storage HIT");
        let value = String::from_utf8(bytes.to_vec())
            .with_context(|| format!("Stored value for {key} is not valid UTF-8"))?;
        Ok(Some(value))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.partition.insert(key, value)?;
        debug!(key, "Storage SET");
        self.persist()
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.partition.remove(key)?;
        debug!(key, "Storage REMOVE");
        self.persist()
    }
}
