//! Integration tests for the JSON-file receipt store
//!
//! Exercises behavior the in-module unit tests cannot: collections
//! surviving a store reopen, isolation between retailer collections, and
//! backend selection through the factory.

use receipt_relay::adapters::store::{create_store, JsonFileStore, ReceiptStore};
use receipt_relay::config::{StoreBackend, StoreConfig};
use receipt_relay::domain::{CanonicalReceipt, ReceiptType, RetailerKey, WireDate};
use tempfile::TempDir;
use uuid::Uuid;

fn receipt(receipt_no: &str) -> CanonicalReceipt {
    CanonicalReceipt {
        id: Uuid::new_v4(),
        receipt_no: receipt_no.to_string(),
        receipt_date: WireDate::parse("/Date(1760950800000+0400)/").unwrap(),
        shift_day: WireDate::parse("/Date(1760904000000)/").unwrap(),
        total: 100.0,
        tax: 5.0,
        gross: 105.0,
        receipt_type: ReceiptType::Sale,
        sale_channel: "Instore".to_string(),
    }
}

fn key(s: &str) -> RetailerKey {
    RetailerKey::new(s).unwrap()
}

#[tokio::test]
async fn test_collection_survives_reopen() {
    let dir = TempDir::new().unwrap();

    {
        let store = JsonFileStore::open(dir.path()).await.unwrap();
        store.add(&key("acme"), &receipt("R-1")).await.unwrap();
        store.add(&key("acme"), &receipt("R-2")).await.unwrap();
    }

    let reopened = JsonFileStore::open(dir.path()).await.unwrap();
    let listed = reopened.list(&key("acme")).await.unwrap();

    assert_eq!(listed.len(), 2);
    // Wire strings survive the disk round trip byte for byte
    assert_eq!(listed[0].shift_day.as_str(), "/Date(1760904000000)/");
    assert_eq!(listed[0].receipt_date.as_str(), "/Date(1760950800000+0400)/");
}

#[tokio::test]
async fn test_retailer_collections_are_isolated() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::open(dir.path()).await.unwrap();

    store.add(&key("acme"), &receipt("R-1")).await.unwrap();
    store.add(&key("bolt"), &receipt("R-2")).await.unwrap();

    let acme = store.list(&key("acme")).await.unwrap();
    let bolt = store.list(&key("bolt")).await.unwrap();

    assert_eq!(acme.len(), 1);
    assert_eq!(bolt.len(), 1);
    assert_eq!(acme[0].receipt_no, "R-1");
    assert_eq!(bolt[0].receipt_no, "R-2");

    // One file per retailer on disk
    assert!(dir.path().join("acme.json").exists());
    assert!(dir.path().join("bolt.json").exists());
}

#[tokio::test]
async fn test_delete_leaves_other_documents_in_place() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::open(dir.path()).await.unwrap();

    let id_1 = store.add(&key("acme"), &receipt("R-1")).await.unwrap();
    store.add(&key("acme"), &receipt("R-2")).await.unwrap();

    store.delete(&key("acme"), &id_1).await.unwrap();

    let listed = store.list(&key("acme")).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].receipt_no, "R-2");
}

#[tokio::test]
async fn test_concurrent_adds_are_all_written() {
    let dir = TempDir::new().unwrap();
    let store = std::sync::Arc::new(JsonFileStore::open(dir.path()).await.unwrap());

    let writes = (0..10).map(|i| {
        let store = store.clone();
        async move {
            store
                .add(&key("acme"), &receipt(&format!("R-{i}")))
                .await
                .unwrap();
        }
    });
    futures::future::join_all(writes).await;

    assert_eq!(store.list(&key("acme")).await.unwrap().len(), 10);
}

#[tokio::test]
async fn test_factory_builds_json_backend() {
    let dir = TempDir::new().unwrap();
    let config = StoreConfig {
        backend: StoreBackend::Json,
        path: dir.path().to_string_lossy().into_owned(),
    };

    let store = create_store(&config).await.unwrap();
    store.add(&key("acme"), &receipt("R-1")).await.unwrap();
    assert_eq!(store.list(&key("acme")).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_factory_builds_memory_backend() {
    let config = StoreConfig {
        backend: StoreBackend::Memory,
        path: String::new(),
    };

    let store = create_store(&config).await.unwrap();
    store.add(&key("acme"), &receipt("R-1")).await.unwrap();
    assert_eq!(store.list(&key("acme")).await.unwrap().len(), 1);
}
