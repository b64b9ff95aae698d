use async_trait::async_trait;

use crate::domain::errors::DomainError;
use crate::domain::models::document::{Document, DocumentFields};

/// Schema-less document collections addressed by auto-generated ids
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Every document in the collection
    async fn list_documents(&self, collection: &str) -> Result<Vec<Document>, DomainError>;

    /// Store a new document and return the id assigned to it
    async fn insert_document(
        &self,
        collection: &str,
        fields: DocumentFields,
    ) -> Result<String, DomainError>;

    /// Merge the given fields into an existing document.
    /// Fails with `NotFound` if the document does not exist.
    async fn update_document(
        &self,
        collection: &str,
        id: &str,
        fields: DocumentFields,
    ) -> Result<(), DomainError>;

    /// Delete a document. Deleting a missing document succeeds.
    async fn delete_document(&self, collection: &str, id: &str) -> Result<(), DomainError>;
}
