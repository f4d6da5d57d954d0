pub mod disk;
pub mod memory;

use crate::core::config::AppConfig;
use crate::core::storage::LocalStorage;
use anyhow::Result;
use disk::DiskStorage;
use std::sync::Arc;
use tracing::debug;

/// Opens the persistent storage under the configured data directory.
pub fn open_storage(config: &AppConfig) -> Result<Arc<dyn LocalStorage>> {
    let path = config.default_data_path()?.join("storage");
    debug!("Using storage at {}", path.display());
    Ok(Arc::new(DiskStorage::open(&path)?))
}
