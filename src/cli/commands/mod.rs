//! Command implementations

pub mod receipts;
pub mod retailers;
pub mod submit;
pub mod validate;

use crate::adapters::store::{create_store, ReceiptStore};
use crate::adapters::vendor::VendorClient;
use crate::config::RelayConfig;
use crate::core::SubmissionPipeline;
use crate::domain::Result;
use crate::registry::RetailerRegistry;
use std::sync::Arc;

/// Loads the registry named by the configuration.
pub(crate) fn load_registry(config: &RelayConfig) -> Result<Arc<RetailerRegistry>> {
    Ok(Arc::new(RetailerRegistry::load(&config.registry.path)?))
}

/// Builds the full pipeline from configuration.
pub(crate) async fn build_pipeline(config: &RelayConfig) -> Result<SubmissionPipeline> {
    let registry = load_registry(config)?;
    let store = create_store(&config.store).await?;
    let vendor = VendorClient::new(&config.vendor)?;
    let timezone = config.application.timezone()?;
    Ok(SubmissionPipeline::new(registry, store, vendor, timezone))
}

/// Builds just the store, for the query/delete surface.
pub(crate) async fn build_store(config: &RelayConfig) -> Result<Arc<dyn ReceiptStore>> {
    create_store(&config.store).await
}
