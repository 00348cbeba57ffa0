//! JSON-file receipt store
//!
//! One JSON file per retailer collection under a configured directory
//! (`<dir>/<retailer-key>.json`, a JSON array of persisted receipts). Writes
//! rewrite the whole collection file; a per-store async mutex serializes
//! them so concurrent reconciliation writes do not interleave on disk.

use super::traits::ReceiptStore;
use crate::domain::{
    CanonicalReceipt, DocumentId, PersistedReceipt, Result, RetailerKey, StoreError,
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

/// File-backed implementation of [`ReceiptStore`].
pub struct JsonFileStore {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Opens a store rooted at `dir`, creating the directory if needed.
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| StoreError::Io(format!("failed to create {}: {e}", dir.display())))?;
        Ok(Self {
            dir,
            write_lock: Mutex::new(()),
        })
    }

    fn collection_path(&self, retailer: &RetailerKey) -> PathBuf {
        self.dir.join(format!("{}.json", retailer.as_str()))
    }

    async fn read_collection(&self, retailer: &RetailerKey) -> Result<Vec<PersistedReceipt>> {
        let path = self.collection_path(retailer);
        match fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                StoreError::QueryFailed(format!("corrupt collection {}: {e}", path.display()))
                    .into()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => {
                Err(StoreError::Io(format!("failed to read {}: {e}", path.display())).into())
            }
        }
    }

    async fn write_collection(
        &self,
        retailer: &RetailerKey,
        receipts: &[PersistedReceipt],
    ) -> Result<()> {
        let path = self.collection_path(retailer);
        let bytes = serde_json::to_vec_pretty(receipts)
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        // Write-then-rename so a crash mid-write cannot truncate the collection
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, &bytes)
            .await
            .map_err(|e| StoreError::WriteFailed(format!("{}: {e}", tmp.display())))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(|e| StoreError::WriteFailed(format!("{}: {e}", path.display())))?;
        Ok(())
    }
}

#[async_trait]
impl ReceiptStore for JsonFileStore {
    async fn add(
        &self,
        retailer: &RetailerKey,
        receipt: &CanonicalReceipt,
    ) -> Result<DocumentId> {
        let _guard = self.write_lock.lock().await;

        let document_id = DocumentId::generate();
        let mut receipts = self.read_collection(retailer).await?;
        receipts.push(PersistedReceipt::from_canonical(receipt, document_id.clone()));
        self.write_collection(retailer, &receipts).await?;

        Ok(document_id)
    }

    async fn list(&self, retailer: &RetailerKey) -> Result<Vec<PersistedReceipt>> {
        let mut receipts = self.read_collection(retailer).await?;
        receipts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(receipts)
    }

    async fn delete(&self, retailer: &RetailerKey, id: &DocumentId) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut receipts = self.read_collection(retailer).await?;
        let before = receipts.len();
        receipts.retain(|r| &r.document_id != id);
        if receipts.len() == before {
            return Err(StoreError::DocumentNotFound(id.to_string()).into());
        }
        self.write_collection(retailer, &receipts).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ReceiptType, RelayError, WireDate};
    use tempfile::TempDir;
    use uuid::Uuid;

    fn receipt(receipt_no: &str) -> CanonicalReceipt {
        CanonicalReceipt {
            id: Uuid::new_v4(),
            receipt_no: receipt_no.to_string(),
            receipt_date: WireDate::parse("/Date(1760950800000+0400)/").unwrap(),
            shift_day: WireDate::parse("/Date(1760904000000)/").unwrap(),
            total: 75.0,
            tax: 3.75,
            gross: 78.75,
            receipt_type: ReceiptType::Return,
            sale_channel: "Instore".to_string(),
        }
    }

    fn key(s: &str) -> RetailerKey {
        RetailerKey::new(s).unwrap()
    }

    #[tokio::test]
    async fn test_roundtrip_preserves_wire_strings() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(dir.path()).await.unwrap();

        store.add(&key("acme"), &receipt("R-9")).await.unwrap();
        let listed = store.list(&key("acme")).await.unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].receipt_date.as_str(), "/Date(1760950800000+0400)/");
        assert_eq!(listed[0].shift_day.as_str(), "/Date(1760904000000)/");
        assert_eq!(listed[0].receipt_type, ReceiptType::Return);
    }

    #[tokio::test]
    async fn test_list_empty_collection() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(dir.path()).await.unwrap();
        assert!(store.list(&key("nobody")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_and_not_found() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(dir.path()).await.unwrap();

        let id = store.add(&key("acme"), &receipt("R-1")).await.unwrap();
        store.delete(&key("acme"), &id).await.unwrap();

        let err = store.delete(&key("acme"), &id).await.unwrap_err();
        assert!(matches!(
            err,
            RelayError::Store(StoreError::DocumentNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_corrupt_collection_is_query_failure() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(dir.path()).await.unwrap();

        tokio::fs::write(dir.path().join("acme.json"), b"{ nope")
            .await
            .unwrap();

        let err = store.list(&key("acme")).await.unwrap_err();
        assert!(matches!(err, RelayError::Store(StoreError::QueryFailed(_))));
    }
}
