use std::sync::Arc;

use crate::application::services::catalog_controller::CatalogController;
use crate::application::services::notification_service::NotificationService;
use crate::domain::errors::DomainError;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::persistence::file_system::DataDirectory;

mod bootstrap;

pub struct AppState {
    pub config: AppConfig,
    pub data_directory: DataDirectory,
    pub catalog_controller: Arc<CatalogController>,
    pub notification_service: Arc<NotificationService>,
}

impl AppState {
    pub async fn new(config: AppConfig) -> Result<Self, DomainError> {
        tracing::info!(
            "Initializing application with data root: {:?}",
            config.data_root
        );

        let data_directory = bootstrap::initialize_data_directory(&config.data_root).await?;
        let services = bootstrap::build_services(&config, &data_directory)?;

        tracing::info!("Application initialized successfully");

        Ok(Self {
            config,
            data_directory,
            catalog_controller: services.catalog_controller,
            notification_service: services.notification_service,
        })
    }
}

/// Run the first catalog load without holding up the server start
pub fn spawn_initial_load(state: Arc<AppState>) {
    tokio::spawn(async move {
        state.catalog_controller.load_all().await;
        tracing::info!("Catalog is ready");
    });
}
