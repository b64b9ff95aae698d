use std::path::Path;
use std::sync::Arc;

use reqwest::Client;

use crate::application::services::catalog_controller::CatalogController;
use crate::application::services::catalog_service::CatalogService;
use crate::application::services::notification_service::NotificationService;
use crate::application::services::upload_service::UploadService;
use crate::domain::errors::DomainError;
use crate::domain::repositories::document_repository::DocumentRepository;
use crate::domain::repositories::object_storage_repository::ObjectStorageRepository;
use crate::infrastructure::apis::firebase_storage_repository::FirebaseStorageRepository;
use crate::infrastructure::apis::firestore_document_repository::FirestoreDocumentRepository;
use crate::infrastructure::config::{AppConfig, BackendConfig};
use crate::infrastructure::http_client::build_http_client;
use crate::infrastructure::persistence::file_system::DataDirectory;
use crate::infrastructure::repositories::file_document_repository::FileDocumentRepository;
use crate::infrastructure::repositories::file_object_storage_repository::FileObjectStorageRepository;

pub(super) struct AppServices {
    pub catalog_controller: Arc<CatalogController>,
    pub notification_service: Arc<NotificationService>,
}

struct AppRepositories {
    document_repository: Arc<dyn DocumentRepository>,
    object_storage_repository: Arc<dyn ObjectStorageRepository>,
}

pub(super) async fn initialize_data_directory(
    data_root: &Path,
) -> Result<DataDirectory, DomainError> {
    let data_directory = DataDirectory::new(data_root.to_path_buf());
    data_directory.initialize().await?;
    Ok(data_directory)
}

pub(super) fn build_services(
    config: &AppConfig,
    data_directory: &DataDirectory,
) -> Result<AppServices, DomainError> {
    let repositories = build_repositories(config, data_directory)?;

    let upload_service = Arc::new(UploadService::new(
        repositories.object_storage_repository,
        config.max_image_bytes,
    ));
    let catalog_service = Arc::new(CatalogService::new(
        repositories.document_repository,
        upload_service,
    ));
    let notification_service = Arc::new(NotificationService::new(config.notification_capacity));
    let catalog_controller = Arc::new(CatalogController::new(
        catalog_service,
        notification_service.clone(),
    ));

    Ok(AppServices {
        catalog_controller,
        notification_service,
    })
}

fn build_repositories(
    config: &AppConfig,
    data_directory: &DataDirectory,
) -> Result<AppRepositories, DomainError> {
    match &config.backend {
        BackendConfig::Local(local) => {
            tracing::info!("Using local document store and object storage");

            let document_repository: Arc<dyn DocumentRepository> = Arc::new(
                FileDocumentRepository::new(data_directory.documents().to_path_buf()),
            );
            let object_storage_repository: Arc<dyn ObjectStorageRepository> =
                Arc::new(FileObjectStorageRepository::new(
                    data_directory.storage().to_path_buf(),
                    local.public_base_url.clone(),
                    config.upload_chunk_size,
                ));

            Ok(AppRepositories {
                document_repository,
                object_storage_repository,
            })
        }
        BackendConfig::Firebase(firebase) => {
            tracing::info!("Using Firebase project {}", firebase.project_id);

            let client = build_http_client(Client::builder()).map_err(|error| {
                DomainError::InternalError(format!("Failed to build HTTP client: {error}"))
            })?;

            let document_repository: Arc<dyn DocumentRepository> =
                Arc::new(FirestoreDocumentRepository::new(
                    client.clone(),
                    &firebase.project_id,
                    &firebase.api_key,
                ));
            let object_storage_repository: Arc<dyn ObjectStorageRepository> =
                Arc::new(FirebaseStorageRepository::new(
                    client,
                    &firebase.storage_bucket,
                    config.upload_chunk_size,
                ));

            Ok(AppRepositories {
                document_repository,
                object_storage_repository,
            })
        }
    }
}
