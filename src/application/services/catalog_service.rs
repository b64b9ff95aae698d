use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::application::errors::ApplicationError;
use crate::application::services::upload_service::UploadService;
use crate::domain::models::document::entity_fields;
use crate::domain::models::entity::{CatalogEntity, EntityKind};
use crate::domain::models::image::ImageFile;
use crate::domain::repositories::document_repository::DocumentRepository;
use crate::infrastructure::logging::logger;

/// Where a single create, edit or delete currently is.
/// `Failed` is terminal; the user re-submits to try again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationPhase {
    #[default]
    Idle,
    Uploading,
    Writing,
    Done,
    Failed,
}

/// Receives phase changes and upload percentages of one operation
pub trait OperationObserver: Send + Sync {
    fn phase_changed(&self, phase: OperationPhase);

    fn upload_progress(&self, percent: u8);
}

/// Upload-then-write flow shared by every entity kind
pub struct CatalogService {
    document_repository: Arc<dyn DocumentRepository>,
    upload_service: Arc<UploadService>,
}

impl CatalogService {
    pub fn new(
        document_repository: Arc<dyn DocumentRepository>,
        upload_service: Arc<UploadService>,
    ) -> Self {
        Self {
            document_repository,
            upload_service,
        }
    }

    pub fn upload_service(&self) -> &UploadService {
        &self.upload_service
    }

    /// Every entity of the collection. Malformed documents are skipped.
    pub async fn load<E: CatalogEntity>(&self) -> Result<Vec<E>, ApplicationError> {
        let collection = E::KIND.collection();
        logger::debug(&format!("CatalogService: Loading {}", collection));

        let documents = self.document_repository.list_documents(collection).await?;
        let mut entities = Vec::with_capacity(documents.len());
        for document in documents {
            match document.into_entity::<E>() {
                Ok(entity) => entities.push(entity),
                Err(error) => logger::warn(&format!("Skipping document: {}", error)),
            }
        }

        Ok(entities)
    }

    /// Upload the image, then insert the entity with the resulting URL
    pub async fn create<E: CatalogEntity>(
        &self,
        mut entity: E,
        image: &ImageFile,
        observer: Arc<dyn OperationObserver>,
    ) -> Result<E, ApplicationError> {
        let collection = E::KIND.collection();
        logger::debug(&format!("CatalogService: Creating document in {}", collection));

        let url = self.upload(E::KIND, image, &observer).await?;
        entity.set_image_url(url);

        observer.phase_changed(OperationPhase::Writing);
        let written = match entity_fields(&entity) {
            Ok(fields) => {
                self.document_repository
                    .insert_document(collection, fields)
                    .await
            }
            Err(error) => Err(error),
        };

        match written {
            Ok(id) => {
                entity.set_id(id);
                observer.phase_changed(OperationPhase::Done);
                Ok(entity)
            }
            Err(error) => {
                observer.phase_changed(OperationPhase::Failed);
                Err(error.into())
            }
        }
    }

    /// Overwrite the stored entity's editable fields, uploading a replacement
    /// image first when one is given
    pub async fn update<E: CatalogEntity>(
        &self,
        mut entity: E,
        new_image: Option<&ImageFile>,
        observer: Arc<dyn OperationObserver>,
    ) -> Result<E, ApplicationError> {
        if entity.id().trim().is_empty() {
            return Err(ApplicationError::ValidationError(format!(
                "{} id cannot be empty",
                E::KIND.label()
            )));
        }

        let collection = E::KIND.collection();
        logger::debug(&format!(
            "CatalogService: Updating {}/{}",
            collection,
            entity.id()
        ));

        if let Some(image) = new_image {
            let url = self.upload(E::KIND, image, &observer).await?;
            entity.set_image_url(url);
        }

        observer.phase_changed(OperationPhase::Writing);
        let written = match entity_fields(&entity) {
            Ok(fields) => {
                self.document_repository
                    .update_document(collection, entity.id(), fields)
                    .await
            }
            Err(error) => Err(error),
        };

        match written {
            Ok(()) => {
                observer.phase_changed(OperationPhase::Done);
                Ok(entity)
            }
            Err(error) => {
                observer.phase_changed(OperationPhase::Failed);
                Err(error.into())
            }
        }
    }

    pub async fn delete<E: CatalogEntity>(
        &self,
        id: &str,
        observer: Arc<dyn OperationObserver>,
    ) -> Result<(), ApplicationError> {
        let collection = E::KIND.collection();
        logger::debug(&format!("CatalogService: Deleting {}/{}", collection, id));

        observer.phase_changed(OperationPhase::Writing);
        match self.document_repository.delete_document(collection, id).await {
            Ok(()) => {
                observer.phase_changed(OperationPhase::Done);
                Ok(())
            }
            Err(error) => {
                observer.phase_changed(OperationPhase::Failed);
                Err(error.into())
            }
        }
    }

    async fn upload(
        &self,
        kind: EntityKind,
        image: &ImageFile,
        observer: &Arc<dyn OperationObserver>,
    ) -> Result<String, ApplicationError> {
        observer.phase_changed(OperationPhase::Uploading);

        let reporter = Arc::clone(observer);
        let result = self
            .upload_service
            .upload_image(kind, image, move |percent| reporter.upload_progress(percent))
            .await;

        if result.is_err() {
            observer.phase_changed(OperationPhase::Failed);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;
    use crate::application::services::test_support::{
        InMemoryDocumentRepository, RecordingObjectStorage,
    };
    use crate::domain::models::club::Club;
    use crate::domain::models::image::minimal_png;

    #[derive(Default)]
    struct PhaseLog(Mutex<Vec<OperationPhase>>);

    impl OperationObserver for PhaseLog {
        fn phase_changed(&self, phase: OperationPhase) {
            self.0.lock().unwrap().push(phase);
        }

        fn upload_progress(&self, _percent: u8) {}
    }

    fn service(
        documents: Arc<InMemoryDocumentRepository>,
        storage: Arc<RecordingObjectStorage>,
    ) -> CatalogService {
        CatalogService::new(documents, Arc::new(UploadService::new(storage, 1024 * 1024)))
    }

    #[tokio::test]
    async fn create_walks_through_upload_and_write_phases() {
        let documents = Arc::new(InMemoryDocumentRepository::new());
        let storage = Arc::new(RecordingObjectStorage::new());
        let service = service(documents.clone(), storage);
        let log = Arc::new(PhaseLog::default());

        let club = Club {
            name: "Riverside FC".to_string(),
            president: "A. Smith".to_string(),
            coach: "J. Doe".to_string(),
            ..Club::default()
        };
        let created = service
            .create(club, &ImageFile::new("crest.png", minimal_png()), log.clone())
            .await
            .expect("create should succeed");

        assert!(!created.id.is_empty());
        assert!(created.logo_url.starts_with("https://storage.test/clubs/"));
        assert_eq!(
            *log.0.lock().unwrap(),
            vec![
                OperationPhase::Uploading,
                OperationPhase::Writing,
                OperationPhase::Done
            ]
        );

        let stored = documents.documents("clubs");
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].fields["logo"], json!(created.logo_url));
        assert!(!stored[0].fields.contains_key("id"));
    }

    #[tokio::test]
    async fn failed_upload_skips_the_document_write() {
        let documents = Arc::new(InMemoryDocumentRepository::new());
        let service = service(documents.clone(), Arc::new(RecordingObjectStorage::failing()));
        let log = Arc::new(PhaseLog::default());

        let result = service
            .create(
                Club {
                    name: "Harbor".to_string(),
                    ..Club::default()
                },
                &ImageFile::new("crest.png", minimal_png()),
                log.clone(),
            )
            .await;

        assert!(matches!(result, Err(ApplicationError::UploadFailed(_))));
        assert_eq!(documents.call_count(), 0);
        assert_eq!(log.0.lock().unwrap().last(), Some(&OperationPhase::Failed));
    }

    #[tokio::test]
    async fn load_skips_malformed_documents() {
        let documents = Arc::new(InMemoryDocumentRepository::new());
        documents.seed("clubs", "c1", json!({ "name": "Alpha" }));
        documents.seed("clubs", "c2", json!({ "name": ["not", "a", "string"] }));
        let service = service(documents, Arc::new(RecordingObjectStorage::new()));

        let clubs = service.load::<Club>().await.expect("load should succeed");

        assert_eq!(clubs.len(), 1);
        assert_eq!(clubs[0].id, "c1");
    }
}
