use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::blob::BlobStore;
use crate::error::{GalleryError, Result};

/// In-memory blob store for tests and local development.
#[derive(Debug)]
pub struct MemoryBlobStore {
    base_url: String,
    objects: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryBlobStore {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            objects: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.objects.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn contains(&self, url: &str) -> bool {
        self.lock().contains_key(url)
    }

    pub fn object_count(&self) -> usize {
        self.lock().len()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, key: &str, bytes: Vec<u8>, _content_type: &str) -> Result<String> {
        let url = format!("{}/{}", self.base_url, key);
        self.lock().insert(url.clone(), bytes);
        Ok(url)
    }

    async fn delete(&self, url: &str) -> Result<()> {
        self.lock()
            .remove(url)
            .map(|_| ())
            .ok_or_else(|| GalleryError::Store(format!("no such object: {url}")))
    }
}
