//! Form field map store.
//!
//! One store per class category holding the current field-name → value
//! mapping. Reads and writes go through an in-memory map guarded by a
//! `parking_lot::RwLock`; durability is handled by a background worker that
//! receives snapshots over a channel and writes them through the storage
//! boundary with debouncing.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::mpsc;

use crate::storage::ObjectStorage;
use crate::template::ClassCategory;

const DEBOUNCE_MS: u64 = 500;

/// A point-in-time copy of one category's form state, queued for persistence.
#[derive(Debug, Clone)]
pub struct FormSnapshot {
    pub category: ClassCategory,
    pub fields: HashMap<String, String>,
}

/// In-memory form state for one class category.
///
/// No validation happens here; any string is accepted for any field. Keys
/// are never deleted individually, only wholesale via `reset`.
pub struct FormStore {
    category: ClassCategory,
    fields: RwLock<HashMap<String, String>>,
}

impl FormStore {
    pub fn new(category: ClassCategory) -> Self {
        Self {
            category,
            fields: RwLock::new(HashMap::new()),
        }
    }

    pub fn category(&self) -> ClassCategory {
        self.category
    }

    /// Replace the whole map, used when hydrating from persisted state.
    pub fn hydrate(&self, fields: HashMap<String, String>) {
        *self.fields.write() = fields;
    }

    pub fn snapshot(&self) -> HashMap<String, String> {
        self.fields.read().clone()
    }

    pub fn set_field(&self, name: &str, value: &str) {
        self.fields
            .write()
            .insert(name.to_string(), value.to_string());
    }

    /// Right-biased merge: `partial` wins on key collision, unrelated keys
    /// are untouched.
    pub fn set_fields(&self, partial: HashMap<String, String>) {
        self.fields.write().extend(partial);
    }

    pub fn reset(&self) {
        self.fields.write().clear();
    }
}

/// Starts the background persistence worker.
///
/// The worker receives form snapshots via channel and persists them through
/// the storage boundary. Bursts of writes are debounced, keeping only the
/// latest snapshot per category within the window.
pub async fn start_persistence_worker(
    mut receiver: mpsc::Receiver<FormSnapshot>,
    storage: Arc<dyn ObjectStorage + Send + Sync>,
) {
    log::info!("Form persistence worker started");

    while let Some(snapshot) = receiver.recv().await {
        let mut latest: HashMap<ClassCategory, HashMap<String, String>> = HashMap::new();
        latest.insert(snapshot.category, snapshot.fields);

        // Drain any pending snapshots, then wait briefly and drain again so
        // rapid successive edits collapse into one write per category.
        while let Ok(newer) = receiver.try_recv() {
            latest.insert(newer.category, newer.fields);
        }
        tokio::time::sleep(tokio::time::Duration::from_millis(DEBOUNCE_MS)).await;
        while let Ok(newer) = receiver.try_recv() {
            latest.insert(newer.category, newer.fields);
        }

        for (category, fields) in latest {
            match serde_json::to_vec(&fields) {
                Ok(json_data) => {
                    let filename = category.profile().store_file;
                    if let Err(e) = storage.upload_file(filename, &json_data).await {
                        log::error!("Failed to persist {} form state: {}", category.slug(), e);
                    } else {
                        log::debug!(
                            "Persisted {} form state ({} fields)",
                            category.slug(),
                            fields.len()
                        );
                    }
                }
                Err(e) => {
                    log::error!(
                        "Failed to serialize {} form state for persistence: {}",
                        category.slug(),
                        e
                    );
                }
            }
        }
    }

    log::info!("Form persistence worker stopped");
}

/// Load one category's persisted form state, or an empty map when nothing
/// has been persisted yet.
pub async fn load_persisted_fields(
    category: ClassCategory,
    storage: &(dyn ObjectStorage + Send + Sync),
) -> HashMap<String, String> {
    let filename = category.profile().store_file;
    match storage.download_file(filename).await {
        Ok(Some(data)) => match serde_json::from_slice(&data) {
            Ok(fields) => fields,
            Err(e) => {
                log::warn!(
                    "Persisted {} form state is unreadable, starting empty: {}",
                    category.slug(),
                    e
                );
                HashMap::new()
            }
        },
        Ok(None) => HashMap::new(),
        Err(e) => {
            log::warn!(
                "Could not load persisted {} form state, starting empty: {}",
                category.slug(),
                e
            );
            HashMap::new()
        }
    }
}
