//! Receipt store backends

pub mod jsonfile;
pub mod memory;
pub mod traits;

pub use jsonfile::JsonFileStore;
pub use memory::MemoryStore;
pub use traits::ReceiptStore;

use crate::config::{StoreBackend, StoreConfig};
use crate::domain::Result;
use std::sync::Arc;

/// Builds the configured store backend.
pub async fn create_store(config: &StoreConfig) -> Result<Arc<dyn ReceiptStore>> {
    match config.backend {
        StoreBackend::Memory => {
            tracing::info!("Using in-memory receipt store");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Json => {
            tracing::info!(path = %config.path, "Using JSON-file receipt store");
            Ok(Arc::new(JsonFileStore::open(&config.path).await?))
        }
    }
}
