use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::errors::DomainError;
use crate::domain::models::upload::ProgressCallback;

/// Blob store that hands out public download URLs
#[async_trait]
pub trait ObjectStorageRepository: Send + Sync {
    /// Upload bytes to `path`, reporting progress as the transfer advances
    async fn upload_object(
        &self,
        path: &str,
        data: Bytes,
        content_type: &str,
        on_progress: ProgressCallback,
    ) -> Result<(), DomainError>;

    /// Public download URL of a stored object
    async fn public_url(&self, path: &str) -> Result<String, DomainError>;
}
