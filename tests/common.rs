use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

/// In-memory `ObjectStorage` for tests.
pub struct MockObjectStorage {
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MockObjectStorage {
    pub fn new() -> Self {
        Self {
            files: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub async fn has_file(&self, filename: &str) -> bool {
        let files = self.files.lock().await;
        files.contains_key(filename)
    }
}

#[async_trait::async_trait]
impl report_card_server::storage::ObjectStorage for MockObjectStorage {
    async fn upload_file(&self, filename: &str, file_data: &[u8]) -> Result<(), String> {
        let mut files = self.files.lock().await;
        files.insert(filename.to_string(), file_data.to_vec());
        Ok(())
    }

    async fn download_file(&self, filename: &str) -> Result<Option<Vec<u8>>, String> {
        let files = self.files.lock().await;
        Ok(files.get(filename).cloned())
    }
}
