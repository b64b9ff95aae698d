use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;

use crate::domain::errors::DomainError;
use crate::domain::models::upload::{ProgressCallback, UploadProgress};
use crate::domain::repositories::object_storage_repository::ObjectStorageRepository;
use crate::infrastructure::logging::logger;

/// Characters left as-is inside one URL path segment
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Object storage on the local disk, served back over HTTP under
/// `public_base_url`
pub struct FileObjectStorageRepository {
    storage_dir: PathBuf,
    public_base_url: String,
    chunk_size: usize,
}

impl FileObjectStorageRepository {
    pub fn new(storage_dir: PathBuf, public_base_url: impl Into<String>, chunk_size: usize) -> Self {
        Self {
            storage_dir,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
            chunk_size: chunk_size.max(1),
        }
    }

    fn object_file(&self, path: &str) -> Result<PathBuf, DomainError> {
        let relative = Path::new(path);
        let safe = !path.is_empty()
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)));
        if !safe {
            return Err(DomainError::InvalidData(format!(
                "Invalid object path: {}",
                path
            )));
        }

        Ok(self.storage_dir.join(relative))
    }

    fn io_error(action: &str, path: &Path, error: std::io::Error) -> DomainError {
        logger::error(&format!("Failed to {} {:?}: {}", action, path, error));
        DomainError::InternalError(format!("Failed to {} object: {}", action, error))
    }
}

#[async_trait]
impl ObjectStorageRepository for FileObjectStorageRepository {
    async fn upload_object(
        &self,
        path: &str,
        data: Bytes,
        content_type: &str,
        on_progress: ProgressCallback,
    ) -> Result<(), DomainError> {
        let target = self.object_file(path)?;
        logger::debug(&format!(
            "Storing {} ({} bytes, {})",
            path,
            data.len(),
            content_type
        ));

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|error| Self::io_error("create directory for", parent, error))?;
        }

        let total = data.len() as u64;
        let mut file = File::create(&target)
            .await
            .map_err(|error| Self::io_error("create", &target, error))?;

        let mut written = 0u64;
        (*on_progress)(UploadProgress::new(0, total));
        for chunk in data.chunks(self.chunk_size) {
            file.write_all(chunk)
                .await
                .map_err(|error| Self::io_error("write", &target, error))?;
            written += chunk.len() as u64;
            (*on_progress)(UploadProgress::new(written, total));
        }

        file.flush()
            .await
            .map_err(|error| Self::io_error("flush", &target, error))?;
        Ok(())
    }

    async fn public_url(&self, path: &str) -> Result<String, DomainError> {
        let target = self.object_file(path)?;
        if !target.is_file() {
            return Err(DomainError::NotFound(format!("Object not found: {}", path)));
        }

        let encoded = path
            .split('/')
            .map(|segment| utf8_percent_encode(segment, PATH_SEGMENT).to_string())
            .collect::<Vec<_>>()
            .join("/");
        Ok(format!("{}/{}", self.public_base_url, encoded))
    }
}
