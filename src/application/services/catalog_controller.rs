use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::{RwLock, watch};

use crate::application::dto::catalog_dto::CatalogViewDto;
use crate::application::dto::entity_form::EntityForm;
use crate::application::errors::ApplicationError;
use crate::application::services::catalog_service::{
    CatalogService, OperationObserver, OperationPhase,
};
use crate::application::services::catalog_state::{CatalogList, CatalogState};
use crate::application::services::notification_service::NotificationService;
use crate::domain::models::club::Club;
use crate::domain::models::entity::{CatalogEntity, EntityKind};
use crate::domain::models::image::ImageFile;
use crate::domain::models::player::Player;
use crate::domain::models::trophy::Trophy;
use crate::infrastructure::logging::logger;

const EDIT_VALIDATION_MESSAGE: &str = "Please fill all required fields.";

/// Blocking yes/no question shown before destructive actions
#[async_trait]
pub trait ConfirmationPrompt: Send + Sync {
    async fn confirm(&self, message: &str) -> bool;
}

/// A prompt whose answer is already known, e.g. sent along with the request
pub struct AnsweredPrompt(pub bool);

#[async_trait]
impl ConfirmationPrompt for AnsweredPrompt {
    async fn confirm(&self, _message: &str) -> bool {
        self.0
    }
}

/// Phase and upload percentage of the latest operation on one entity kind
struct OperationTracker {
    phase: watch::Sender<OperationPhase>,
    progress: watch::Sender<u8>,
}

impl OperationTracker {
    fn new() -> Self {
        let (phase, _) = watch::channel(OperationPhase::Idle);
        let (progress, _) = watch::channel(0);
        Self { phase, progress }
    }
}

impl OperationObserver for OperationTracker {
    fn phase_changed(&self, phase: OperationPhase) {
        self.phase.send_replace(phase);
    }

    fn upload_progress(&self, percent: u8) {
        self.progress.send_replace(percent);
    }
}

/// Drives the catalog screen: owns the loaded lists and turns every backend
/// outcome into a toast.
///
/// Operations are not serialized against each other. Two submissions for the
/// same kind can run at once and the last one to finish wins.
pub struct CatalogController {
    catalog_service: Arc<CatalogService>,
    notifications: Arc<NotificationService>,
    state: RwLock<CatalogState>,
    pending_fetches: AtomicUsize,
    trackers: [Arc<OperationTracker>; 3],
}

impl CatalogController {
    pub fn new(
        catalog_service: Arc<CatalogService>,
        notifications: Arc<NotificationService>,
    ) -> Self {
        Self {
            catalog_service,
            notifications,
            state: RwLock::new(CatalogState::default()),
            pending_fetches: AtomicUsize::new(0),
            trackers: [
                Arc::new(OperationTracker::new()),
                Arc::new(OperationTracker::new()),
                Arc::new(OperationTracker::new()),
            ],
        }
    }

    /// Fetch all three collections. The fetches run concurrently and each
    /// list is replaced as soon as its own fetch finishes.
    pub async fn load_all(&self) {
        logger::info("Loading catalog collections");
        tokio::join!(
            self.load_collection::<Player>(),
            self.load_collection::<Club>(),
            self.load_collection::<Trophy>(),
        );
    }

    /// Fetch one collection. On failure the list keeps its last loaded
    /// contents (empty before the first success) and a toast is queued.
    pub async fn load_collection<E: CatalogList>(&self) {
        self.pending_fetches.fetch_add(1, Ordering::SeqCst);

        match self.catalog_service.load::<E>().await {
            Ok(entities) => self.state.write().await.replace_all(entities),
            Err(error) => {
                logger::error(&format!(
                    "Failed to fetch {}: {}",
                    E::KIND.collection(),
                    error
                ));
                self.notifications
                    .error(format!("Failed to fetch {}", E::KIND.collection()));
            }
        }

        self.pending_fetches.fetch_sub(1, Ordering::SeqCst);
    }

    /// True while any collection fetch is outstanding
    pub fn is_loading(&self) -> bool {
        self.pending_fetches.load(Ordering::SeqCst) > 0
    }

    pub async fn select_tab(&self, kind: EntityKind) {
        self.state.write().await.active_tab = kind;
    }

    pub async fn active_tab(&self) -> EntityKind {
        self.state.read().await.active_tab
    }

    pub async fn list<E: CatalogList>(&self) -> Vec<E> {
        E::list(&*self.state.read().await).clone()
    }

    pub fn upload_progress(&self, kind: EntityKind) -> u8 {
        *self.tracker(kind).progress.borrow()
    }

    pub fn phase(&self, kind: EntityKind) -> OperationPhase {
        *self.tracker(kind).phase.borrow()
    }

    /// Rendered rows for all tabs
    pub async fn view(&self) -> CatalogViewDto {
        let state = self.state.read().await;
        let progress = EntityKind::ALL.map(|kind| self.upload_progress(kind));
        let phases = EntityKind::ALL.map(|kind| self.phase(kind));
        CatalogViewDto::build(&state, self.is_loading(), progress, phases)
    }

    /// Validate the form and image, upload the image, insert the document,
    /// then append the new entity to the local list.
    ///
    /// Nothing leaves the process when validation fails.
    pub async fn create<F>(
        &self,
        form: F,
        image: Option<ImageFile>,
    ) -> Result<F::Entity, ApplicationError>
    where
        F: EntityForm,
        F::Entity: CatalogList,
    {
        let kind = F::Entity::KIND;
        let entity = form.into_entity();
        let missing = entity.missing_required_fields();

        let image = match image {
            Some(image) if missing.is_empty() => image,
            _ => {
                let message = format!(
                    "Please fill all required fields and select {} {}.",
                    if kind == EntityKind::Clubs { "a" } else { "an" },
                    kind.image_noun()
                );
                logger::debug(&format!(
                    "Rejected {} form, missing: {:?}",
                    kind.singular(),
                    missing
                ));
                self.notifications.error(message.clone());
                return Err(ApplicationError::ValidationError(message));
            }
        };
        self.reject_invalid_image(&image)?;

        let tracker = self.tracker(kind);
        let result = self
            .catalog_service
            .create(entity, &image, tracker.clone())
            .await;
        tracker.upload_progress(0);

        match result {
            Ok(created) => {
                self.state.write().await.append(created.clone());
                self.notifications.success(format!("{} added!", kind.label()));
                Ok(created)
            }
            Err(error) => {
                self.report_failure(&error, &format!("Failed to add {}", kind.singular()));
                Err(error)
            }
        }
    }

    /// Apply the form to the loaded entity, upload a replacement image when
    /// given, overwrite the stored document and merge the result locally.
    pub async fn update<F>(
        &self,
        id: &str,
        form: F,
        image: Option<ImageFile>,
    ) -> Result<F::Entity, ApplicationError>
    where
        F: EntityForm,
        F::Entity: CatalogList,
    {
        let kind = F::Entity::KIND;
        let failure_message = format!("Failed to update {}", kind.singular());

        let existing = self.state.read().await.find::<F::Entity>(id).cloned();
        let Some(existing) = existing else {
            let error =
                ApplicationError::NotFound(format!("{} not found: {}", kind.label(), id));
            self.report_failure(&error, &failure_message);
            return Err(error);
        };

        let entity = form.apply_to(&existing);
        if !entity.missing_required_fields().is_empty() {
            self.notifications.error(EDIT_VALIDATION_MESSAGE);
            return Err(ApplicationError::ValidationError(
                EDIT_VALIDATION_MESSAGE.to_string(),
            ));
        }
        if let Some(image) = &image {
            self.reject_invalid_image(image)?;
        }

        let tracker = self.tracker(kind);
        let result = self
            .catalog_service
            .update(entity, image.as_ref(), tracker.clone())
            .await;
        tracker.upload_progress(0);

        match result {
            Ok(updated) => {
                self.state.write().await.merge(updated.clone());
                self.notifications
                    .success(format!("{} updated!", kind.label()));
                Ok(updated)
            }
            Err(error) => {
                self.report_failure(&error, &failure_message);
                Err(error)
            }
        }
    }

    /// Ask for confirmation, delete the document, then drop the local row.
    /// Returns `Ok(false)` when the user declines.
    pub async fn delete<E: CatalogList>(
        &self,
        id: &str,
        prompt: &dyn ConfirmationPrompt,
    ) -> Result<bool, ApplicationError> {
        let kind = E::KIND;
        let question = format!("Are you sure you want to delete this {}?", kind.singular());
        if !prompt.confirm(&question).await {
            logger::debug(&format!("Delete of {}/{} cancelled", kind.collection(), id));
            return Ok(false);
        }

        match self
            .catalog_service
            .delete::<E>(id, self.tracker(kind).clone())
            .await
        {
            Ok(()) => {
                self.state.write().await.remove::<E>(id);
                self.notifications
                    .success(format!("{} deleted!", kind.label()));
                Ok(true)
            }
            Err(error) => {
                self.report_failure(&error, &format!("Failed to delete {}", kind.singular()));
                Err(error)
            }
        }
    }

    fn tracker(&self, kind: EntityKind) -> &Arc<OperationTracker> {
        &self.trackers[kind.index()]
    }

    fn reject_invalid_image(&self, image: &ImageFile) -> Result<(), ApplicationError> {
        self.catalog_service
            .upload_service()
            .validate_image(image)
            .inspect_err(|error| {
                self.notifications.error(validation_text(error));
            })
    }

    fn report_failure(&self, error: &ApplicationError, message: &str) {
        logger::error(&format!("{}: {}", message, error));
        if let ApplicationError::UploadFailed(detail) = error {
            self.notifications.error(format!("Upload error: {}", detail));
        }
        self.notifications.error(message);
    }
}

fn validation_text(error: &ApplicationError) -> String {
    match error {
        ApplicationError::ValidationError(message) => message.clone(),
        other => other.to_string(),
    }
}
