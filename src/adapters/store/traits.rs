//! Receipt store abstraction
//!
//! The datastore is a generic document store: collection-scoped add, query
//! and delete keyed by an opaque document id, one collection per retailer.
//! Its durability engine is not this system's concern; backends implement
//! this trait and the rest of the pipeline never sees which one is wired in.

use crate::domain::{CanonicalReceipt, DocumentId, PersistedReceipt, Result, RetailerKey};
use async_trait::async_trait;

/// Document store for persisted receipts, scoped by retailer collection.
#[async_trait]
pub trait ReceiptStore: Send + Sync {
    /// Persists one receipt to the retailer's collection.
    ///
    /// The store assigns the document id and the `created_at` timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::WriteFailed`](crate::domain::StoreError) if the
    /// write is rejected.
    async fn add(&self, retailer: &RetailerKey, receipt: &CanonicalReceipt)
        -> Result<DocumentId>;

    /// Returns all persisted receipts for a retailer, newest-first by
    /// creation timestamp.
    async fn list(&self, retailer: &RetailerKey) -> Result<Vec<PersistedReceipt>>;

    /// Deletes one persisted receipt by document id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DocumentNotFound`](crate::domain::StoreError)
    /// if no document with that id exists in the retailer's collection.
    async fn delete(&self, retailer: &RetailerKey, id: &DocumentId) -> Result<()>;
}
