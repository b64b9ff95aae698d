use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::errors::DomainError;
use crate::domain::models::document::{Document, DocumentFields};
use crate::domain::models::upload::{ProgressCallback, UploadProgress};
use crate::domain::repositories::document_repository::DocumentRepository;
use crate::domain::repositories::object_storage_repository::ObjectStorageRepository;

/// Document collections kept in memory, with switchable failures
#[derive(Default)]
pub struct InMemoryDocumentRepository {
    collections: Mutex<HashMap<String, Vec<Document>>>,
    failing_collections: Mutex<HashSet<String>>,
    next_id: AtomicUsize,
    calls: AtomicUsize,
}

impl InMemoryDocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, collection: &str, id: &str, fields: serde_json::Value) {
        let fields = match fields {
            serde_json::Value::Object(map) => map,
            _ => panic!("seed fields must be an object"),
        };
        self.collections
            .lock()
            .unwrap()
            .entry(collection.to_string())
            .or_default()
            .push(Document::new(id, fields));
    }

    pub fn fail_collection(&self, collection: &str) {
        self.failing_collections
            .lock()
            .unwrap()
            .insert(collection.to_string());
    }

    pub fn documents(&self, collection: &str) -> Vec<Document> {
        self.collections
            .lock()
            .unwrap()
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn begin(&self, collection: &str) -> Result<(), DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_collections.lock().unwrap().contains(collection) {
            return Err(DomainError::InternalError(format!(
                "backend unavailable for {}",
                collection
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    async fn list_documents(&self, collection: &str) -> Result<Vec<Document>, DomainError> {
        self.begin(collection)?;
        Ok(self.documents(collection))
    }

    async fn insert_document(
        &self,
        collection: &str,
        fields: DocumentFields,
    ) -> Result<String, DomainError> {
        self.begin(collection)?;
        let id = format!("doc-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        self.collections
            .lock()
            .unwrap()
            .entry(collection.to_string())
            .or_default()
            .push(Document::new(id.clone(), fields));
        Ok(id)
    }

    async fn update_document(
        &self,
        collection: &str,
        id: &str,
        fields: DocumentFields,
    ) -> Result<(), DomainError> {
        self.begin(collection)?;
        let mut collections = self.collections.lock().unwrap();
        let document = collections
            .get_mut(collection)
            .and_then(|documents| documents.iter_mut().find(|document| document.id == id))
            .ok_or_else(|| DomainError::NotFound(format!("{}/{}", collection, id)))?;
        document.fields.extend(fields);
        Ok(())
    }

    async fn delete_document(&self, collection: &str, id: &str) -> Result<(), DomainError> {
        self.begin(collection)?;
        if let Some(documents) = self.collections.lock().unwrap().get_mut(collection) {
            documents.retain(|document| document.id != id);
        }
        Ok(())
    }
}

/// Object storage that records uploads and reports progress in two steps
pub struct RecordingObjectStorage {
    uploads: Mutex<Vec<String>>,
    fail: bool,
}

impl RecordingObjectStorage {
    pub fn new() -> Self {
        Self {
            uploads: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            uploads: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn uploaded_paths(&self) -> Vec<String> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }
}

#[async_trait]
impl ObjectStorageRepository for RecordingObjectStorage {
    async fn upload_object(
        &self,
        path: &str,
        data: Bytes,
        _content_type: &str,
        on_progress: ProgressCallback,
    ) -> Result<(), DomainError> {
        let total = data.len() as u64;
        (*on_progress)(UploadProgress::new(total / 2, total));
        if self.fail {
            return Err(DomainError::InternalError("connection reset".to_string()));
        }
        (*on_progress)(UploadProgress::new(total, total));
        self.uploads.lock().unwrap().push(path.to_string());
        Ok(())
    }

    async fn public_url(&self, path: &str) -> Result<String, DomainError> {
        Ok(format!("https://storage.test/{}", path))
    }
}
