use std::sync::Arc;

use crate::application::errors::ApplicationError;
use crate::domain::models::entity::EntityKind;
use crate::domain::models::image::ImageFile;
use crate::domain::models::upload::{ProgressCallback, UploadProgress};
use crate::domain::repositories::object_storage_repository::ObjectStorageRepository;
use crate::infrastructure::logging::logger;

/// Uploads form images and resolves their public URLs
pub struct UploadService {
    storage: Arc<dyn ObjectStorageRepository>,
    max_image_bytes: usize,
}

impl UploadService {
    pub fn new(storage: Arc<dyn ObjectStorageRepository>, max_image_bytes: usize) -> Self {
        Self {
            storage,
            max_image_bytes,
        }
    }

    /// Pre-upload checks, run before any I/O
    pub fn validate_image(&self, image: &ImageFile) -> Result<(), ApplicationError> {
        image.validate(self.max_image_bytes).map_err(Into::into)
    }

    /// Storage key for an image: `<prefix>/<millis>-<file name>`
    pub fn object_path(kind: EntityKind, file_name: &str, timestamp_millis: i64) -> String {
        format!(
            "{}/{}-{}",
            kind.storage_prefix(),
            timestamp_millis,
            sanitize_file_name(file_name)
        )
    }

    /// Upload the image and return its public URL.
    ///
    /// `on_percent` receives 0..=100 as the transfer advances. Any transport
    /// failure is reported once as `UploadFailed`; nothing is retried.
    pub async fn upload_image<F>(
        &self,
        kind: EntityKind,
        image: &ImageFile,
        on_percent: F,
    ) -> Result<String, ApplicationError>
    where
        F: Fn(u8) + Send + Sync + 'static,
    {
        self.validate_image(image)?;

        let path = Self::object_path(kind, &image.file_name, chrono::Utc::now().timestamp_millis());
        logger::debug(&format!(
            "UploadService: Uploading {} bytes to {}",
            image.len(),
            path
        ));

        let on_percent = Arc::new(on_percent);
        let reporter = Arc::clone(&on_percent);
        let callback: ProgressCallback =
            Arc::new(move |progress: UploadProgress| (*reporter)(progress.percent()));

        (*on_percent)(0);
        if let Err(error) = self
            .storage
            .upload_object(&path, image.bytes.clone(), &image.content_type(), callback)
            .await
        {
            (*on_percent)(0);
            logger::warn(&format!("Upload of {} failed: {}", path, error));
            return Err(ApplicationError::UploadFailed(error.to_string()));
        }
        (*on_percent)(100);

        self.storage.public_url(&path).await.map_err(|error| {
            logger::warn(&format!("Failed to resolve public URL for {}: {}", path, error));
            ApplicationError::UploadFailed(error.to_string())
        })
    }
}

fn sanitize_file_name(name: &str) -> String {
    let sanitized = name
        .chars()
        .map(|character| match character {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '#' => '_',
            control if control.is_control() => '_',
            other => other,
        })
        .collect::<String>();
    let sanitized = sanitized.trim().trim_end_matches(['.', ' ']).to_string();

    if sanitized.is_empty() {
        "image".to_string()
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::application::services::test_support::RecordingObjectStorage;
    use crate::domain::models::image::minimal_png;

    #[test]
    fn object_path_is_namespaced_and_timestamped() {
        assert_eq!(
            UploadService::object_path(EntityKind::Clubs, "crest.png", 1_700_000_000_000),
            "clubs/1700000000000-crest.png"
        );
        assert_eq!(
            UploadService::object_path(EntityKind::Players, "../evil/pic.png", 5),
            "players/5-.._evil_pic.png"
        );
        assert_eq!(UploadService::object_path(EntityKind::Trophies, " .. ", 1), "trophies/1-image");
    }

    #[tokio::test]
    async fn upload_reports_progress_and_returns_public_url() {
        let storage = Arc::new(RecordingObjectStorage::new());
        let service = UploadService::new(storage.clone(), 1024 * 1024);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();

        let url = service
            .upload_image(
                EntityKind::Trophies,
                &ImageFile::new("cup.png", minimal_png()),
                move |percent| sink.lock().unwrap().push(percent),
            )
            .await
            .expect("upload should succeed");

        let uploaded = storage.uploaded_paths();
        assert_eq!(uploaded.len(), 1);
        assert!(uploaded[0].starts_with("trophies/"));
        assert!(uploaded[0].ends_with("-cup.png"));
        assert_eq!(url, format!("https://storage.test/{}", uploaded[0]));

        let seen = seen.lock().unwrap();
        assert_eq!(seen.first(), Some(&0));
        assert!(seen.iter().any(|percent| *percent > 0 && *percent < 100));
        assert_eq!(seen.last(), Some(&100));
    }

    #[tokio::test]
    async fn transport_failure_becomes_upload_failed() {
        let storage = Arc::new(RecordingObjectStorage::failing());
        let service = UploadService::new(storage, 1024 * 1024);

        let result = service
            .upload_image(
                EntityKind::Players,
                &ImageFile::new("ada.png", minimal_png()),
                |_| {},
            )
            .await;

        assert!(matches!(result, Err(ApplicationError::UploadFailed(_))));
    }

    #[tokio::test]
    async fn invalid_image_never_reaches_storage() {
        let storage = Arc::new(RecordingObjectStorage::new());
        let service = UploadService::new(storage.clone(), 1024 * 1024);

        let result = service
            .upload_image(
                EntityKind::Players,
                &ImageFile::new("ada.png", b"not an image".to_vec()),
                |_| {},
            )
            .await;

        assert!(matches!(result, Err(ApplicationError::ValidationError(_))));
        assert_eq!(storage.upload_count(), 0);
    }
}
