use std::path::PathBuf;

use async_trait::async_trait;
use rand::Rng;
use rand::distr::Alphanumeric;
use tokio::sync::Mutex;

use crate::domain::errors::DomainError;
use crate::domain::models::document::{Document, DocumentFields};
use crate::domain::repositories::document_repository::DocumentRepository;
use crate::infrastructure::logging::logger;
use crate::infrastructure::persistence::file_system::{read_json_file, write_json_file};

const DOCUMENT_ID_LENGTH: usize = 20;

/// Document collections stored as one JSON array per collection
pub struct FileDocumentRepository {
    documents_dir: PathBuf,
    write_lock: Mutex<()>,
}

impl FileDocumentRepository {
    pub fn new(documents_dir: PathBuf) -> Self {
        tracing::info!(
            "Document repository initialized at: {:?}",
            documents_dir
        );

        Self {
            documents_dir,
            write_lock: Mutex::new(()),
        }
    }

    fn collection_path(&self, collection: &str) -> Result<PathBuf, DomainError> {
        let valid = !collection.is_empty()
            && collection
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(DomainError::InvalidData(format!(
                "Invalid collection name: {}",
                collection
            )));
        }

        Ok(self.documents_dir.join(format!("{}.json", collection)))
    }

    async fn read_collection(&self, collection: &str) -> Result<Vec<Document>, DomainError> {
        let path = self.collection_path(collection)?;
        match read_json_file::<Vec<Document>>(&path).await {
            Ok(documents) => Ok(documents),
            Err(DomainError::NotFound(_)) => Ok(Vec::new()),
            Err(error) => Err(error),
        }
    }

    async fn write_collection(
        &self,
        collection: &str,
        documents: &[Document],
    ) -> Result<(), DomainError> {
        let path = self.collection_path(collection)?;
        write_json_file(&path, &documents).await
    }

    fn generate_id(existing: &[Document]) -> String {
        loop {
            let id: String = rand::rng()
                .sample_iter(Alphanumeric)
                .take(DOCUMENT_ID_LENGTH)
                .map(char::from)
                .collect();
            if !existing.iter().any(|document| document.id == id) {
                return id;
            }
        }
    }
}

#[async_trait]
impl DocumentRepository for FileDocumentRepository {
    async fn list_documents(&self, collection: &str) -> Result<Vec<Document>, DomainError> {
        logger::debug(&format!("Listing documents in {}", collection));
        self.read_collection(collection).await
    }

    async fn insert_document(
        &self,
        collection: &str,
        fields: DocumentFields,
    ) -> Result<String, DomainError> {
        let _guard = self.write_lock.lock().await;

        let mut documents = self.read_collection(collection).await?;
        let id = Self::generate_id(&documents);
        documents.push(Document::new(id.clone(), fields));
        self.write_collection(collection, &documents).await?;

        logger::debug(&format!("Inserted document {}/{}", collection, id));
        Ok(id)
    }

    async fn update_document(
        &self,
        collection: &str,
        id: &str,
        fields: DocumentFields,
    ) -> Result<(), DomainError> {
        let _guard = self.write_lock.lock().await;

        let mut documents = self.read_collection(collection).await?;
        let document = documents
            .iter_mut()
            .find(|document| document.id == id)
            .ok_or_else(|| DomainError::NotFound(format!("Document not found: {}/{}", collection, id)))?;
        document.fields.extend(fields);
        self.write_collection(collection, &documents).await
    }

    async fn delete_document(&self, collection: &str, id: &str) -> Result<(), DomainError> {
        let _guard = self.write_lock.lock().await;

        let mut documents = self.read_collection(collection).await?;
        let before = documents.len();
        documents.retain(|document| document.id != id);
        if documents.len() == before {
            logger::debug(&format!("Document {}/{} already absent", collection, id));
            return Ok(());
        }

        self.write_collection(collection, &documents).await
    }
}
