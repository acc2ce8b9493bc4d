//! Application state wiring.
//!
//! Holds the per-category form stores, the template cache, the storage
//! boundary, the persistence channel and the single-flight render gate.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tokio::sync::{mpsc, Semaphore};

use crate::form::store::{load_persisted_fields, start_persistence_worker, FormSnapshot, FormStore};
use crate::storage::ObjectStorage;
use crate::template::{load_template, ClassCategory, TemplateError, TemplateSchema};

pub struct AppState {
    pub templates: Cache<ClassCategory, Arc<TemplateSchema>>,
    pub forms: HashMap<ClassCategory, FormStore>,
    pub storage: Arc<dyn ObjectStorage + Send + Sync>,
    pub persist_sender: mpsc::Sender<FormSnapshot>,
    /// One render at a time; a second request while one is in flight is
    /// rejected rather than queued.
    pub render_gate: Arc<Semaphore>,
}

impl AppState {
    pub async fn new_with_storage(
        storage: Arc<dyn ObjectStorage + Send + Sync>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let templates = Cache::builder()
            .time_to_live(Duration::from_secs(10 * 60))
            .max_capacity(ClassCategory::ALL.len() as u64)
            .build();

        let mut forms = HashMap::new();
        for category in ClassCategory::ALL {
            let store = FormStore::new(category);
            let mut fields = load_persisted_fields(category, storage.as_ref()).await;

            // Every field the template declares exists in the map, empty
            // until edited.
            match load_template(category) {
                Ok(schema) => {
                    for name in schema.field_names() {
                        fields.entry(name).or_default();
                    }
                }
                Err(e) => {
                    log::warn!(
                        "Template for {} unavailable at startup, skipping field init: {}",
                        category.slug(),
                        e
                    );
                }
            }

            store.hydrate(fields);
            forms.insert(category, store);
        }

        let (persist_sender, receiver) = mpsc::channel(100);

        let storage_clone = storage.clone();
        tokio::spawn(async move {
            start_persistence_worker(receiver, storage_clone).await;
        });

        Ok(AppState {
            templates,
            forms,
            storage,
            persist_sender,
            render_gate: Arc::new(Semaphore::new(1)),
        })
    }

    pub fn form(&self, category: ClassCategory) -> &FormStore {
        self.forms
            .get(&category)
            .expect("every class category has a form store")
    }

    /// Load (or fetch from cache) the template schema for one category.
    pub async fn template(
        &self,
        category: ClassCategory,
    ) -> Result<Arc<TemplateSchema>, Arc<TemplateError>> {
        self.templates
            .try_get_with(category, async move { load_template(category).map(Arc::new) })
            .await
    }
}
