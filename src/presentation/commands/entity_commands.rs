use std::sync::Arc;

use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::app::AppState;
use crate::application::dto::entity_form::EntityForm;
use crate::application::services::catalog_controller::AnsweredPrompt;
use crate::application::services::catalog_state::CatalogList;
use crate::domain::models::entity::CatalogEntity;
use crate::presentation::commands::helpers::{log_command, map_command_error, read_submission};
use crate::presentation::errors::CommandError;

#[derive(Debug, Default, Deserialize)]
pub struct DeleteRequest {
    #[serde(default)]
    pub confirmed: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub deleted: bool,
}

pub async fn list_entities<E: CatalogList>(State(state): State<Arc<AppState>>) -> Json<Vec<E>> {
    log_command(format!("list_{}", E::KIND.collection()));

    Json(state.catalog_controller.list::<E>().await)
}

pub async fn create_entity<F>(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<F::Entity>), CommandError>
where
    F: EntityForm,
    F::Entity: CatalogList,
{
    let kind = F::Entity::KIND;
    log_command(format!("create_{}", kind.singular()));

    let submission = read_submission::<F>(multipart).await?;
    let created = state
        .catalog_controller
        .create(submission.form, submission.image)
        .await
        .map_err(map_command_error(format!("Failed to create {}", kind.singular())))?;

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_entity<F>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Json<F::Entity>, CommandError>
where
    F: EntityForm,
    F::Entity: CatalogList,
{
    let kind = F::Entity::KIND;
    log_command(format!("update_{} {}", kind.singular(), id));

    let submission = read_submission::<F>(multipart).await?;
    let updated = state
        .catalog_controller
        .update(&id, submission.form, submission.image)
        .await
        .map_err(map_command_error(format!(
            "Failed to update {} {}",
            kind.singular(),
            id
        )))?;

    Ok(Json(updated))
}

/// The request body answers the confirmation prompt; no body means "no"
pub async fn delete_entity<E: CatalogList>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    request: Option<Json<DeleteRequest>>,
) -> Result<Json<DeleteResponse>, CommandError> {
    log_command(format!("delete_{} {}", E::KIND.singular(), id));

    let confirmed = request.map(|Json(request)| request.confirmed).unwrap_or(false);
    let deleted = state
        .catalog_controller
        .delete::<E>(&id, &AnsweredPrompt(confirmed))
        .await
        .map_err(map_command_error(format!(
            "Failed to delete {} {}",
            E::KIND.singular(),
            id
        )))?;

    Ok(Json(DeleteResponse { deleted }))
}
