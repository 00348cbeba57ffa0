//! In-memory receipt store
//!
//! Per-process only; used in tests and as a scratch backend. Collections
//! live in a `RwLock`-guarded map keyed by retailer key.

use super::traits::ReceiptStore;
use crate::domain::{
    CanonicalReceipt, DocumentId, PersistedReceipt, Result, RetailerKey, StoreError,
};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory implementation of [`ReceiptStore`].
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<PersistedReceipt>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReceiptStore for MemoryStore {
    async fn add(
        &self,
        retailer: &RetailerKey,
        receipt: &CanonicalReceipt,
    ) -> Result<DocumentId> {
        let document_id = DocumentId::generate();
        let persisted = PersistedReceipt::from_canonical(receipt, document_id.clone());

        let mut collections = self.collections.write().await;
        collections
            .entry(retailer.as_str().to_string())
            .or_default()
            .push(persisted);

        Ok(document_id)
    }

    async fn list(&self, retailer: &RetailerKey) -> Result<Vec<PersistedReceipt>> {
        let collections = self.collections.read().await;
        let mut receipts = collections
            .get(retailer.as_str())
            .cloned()
            .unwrap_or_default();
        receipts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(receipts)
    }

    async fn delete(&self, retailer: &RetailerKey, id: &DocumentId) -> Result<()> {
        let mut collections = self.collections.write().await;
        let collection = collections
            .get_mut(retailer.as_str())
            .ok_or_else(|| StoreError::DocumentNotFound(id.to_string()))?;

        let before = collection.len();
        collection.retain(|r| &r.document_id != id);
        if collection.len() == before {
            return Err(StoreError::DocumentNotFound(id.to_string()).into());
        }
        Ok(())
    }
}
