mod common;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use common::MockObjectStorage;
use report_card_server::form::store::{
    load_persisted_fields, start_persistence_worker, FormSnapshot, FormStore,
};
use report_card_server::storage::ObjectStorage;
use report_card_server::template::ClassCategory;
use tokio::sync::mpsc;

fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_right_biased_merge_keeps_unrelated_keys() {
    let store = FormStore::new(ClassCategory::Kindergarten);
    store.set_fields(map(&[("name", "Asha"), ("a", "1")]));
    store.set_fields(map(&[("a", "2"), ("b", "3")]));

    let snapshot = store.snapshot();
    assert_eq!(snapshot.get("a").map(String::as_str), Some("2"));
    assert_eq!(snapshot.get("b").map(String::as_str), Some("3"));
    assert_eq!(snapshot.get("name").map(String::as_str), Some("Asha"));
}

#[tokio::test]
async fn test_persist_and_reload_round_trip() {
    let storage = MockObjectStorage::new();
    let category = ClassCategory::Kindergarten;
    let fields = map(&[("name", "Asha"), ("english-oral-term1", "A+")]);

    let json = serde_json::to_vec(&fields).unwrap();
    storage
        .upload_file(category.profile().store_file, &json)
        .await
        .unwrap();

    let reloaded = load_persisted_fields(category, &storage).await;
    assert_eq!(reloaded, fields);
}

#[tokio::test]
async fn test_categories_persist_independently() {
    let storage = MockObjectStorage::new();

    let kg_fields = map(&[("name", "Asha")]);
    let pg_fields = map(&[("name", "Rohan")]);
    storage
        .upload_file(
            ClassCategory::Kindergarten.profile().store_file,
            &serde_json::to_vec(&kg_fields).unwrap(),
        )
        .await
        .unwrap();
    storage
        .upload_file(
            ClassCategory::PlayGroup.profile().store_file,
            &serde_json::to_vec(&pg_fields).unwrap(),
        )
        .await
        .unwrap();

    let kg = load_persisted_fields(ClassCategory::Kindergarten, &storage).await;
    let pg = load_persisted_fields(ClassCategory::PlayGroup, &storage).await;
    assert_eq!(kg.get("name").map(String::as_str), Some("Asha"));
    assert_eq!(pg.get("name").map(String::as_str), Some("Rohan"));
}

#[tokio::test]
async fn test_missing_persisted_state_loads_empty() {
    let storage = MockObjectStorage::new();
    let fields = load_persisted_fields(ClassCategory::PlayGroup, &storage).await;
    assert!(fields.is_empty());
}

#[tokio::test]
async fn test_persistence_worker_writes_snapshot() {
    let storage = Arc::new(MockObjectStorage::new());
    let (sender, receiver) = mpsc::channel(10);

    let worker_storage: Arc<dyn ObjectStorage + Send + Sync> = storage.clone();
    tokio::spawn(async move {
        start_persistence_worker(receiver, worker_storage).await;
    });

    sender
        .send(FormSnapshot {
            category: ClassCategory::Kindergarten,
            fields: map(&[("name", "Asha")]),
        })
        .await
        .unwrap();

    // The worker debounces for 500ms before writing.
    tokio::time::sleep(Duration::from_millis(900)).await;
    assert!(
        storage
            .has_file(ClassCategory::Kindergarten.profile().store_file)
            .await
    );

    let reloaded = load_persisted_fields(ClassCategory::Kindergarten, storage.as_ref()).await;
    assert_eq!(reloaded.get("name").map(String::as_str), Some("Asha"));
}
