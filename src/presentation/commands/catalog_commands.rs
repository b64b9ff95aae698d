use std::collections::BTreeMap;
use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::app::AppState;
use crate::application::dto::catalog_dto::CatalogViewDto;
use crate::application::services::catalog_service::OperationPhase;
use crate::domain::models::entity::EntityKind;
use crate::domain::models::notification::Notification;
use crate::presentation::commands::helpers::log_command;

#[derive(Debug, Deserialize)]
pub struct SelectTabRequest {
    pub tab: EntityKind,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadStatusDto {
    pub percent: u8,
    pub phase: OperationPhase,
}

pub async fn get_catalog(State(state): State<Arc<AppState>>) -> Json<CatalogViewDto> {
    log_command("get_catalog");

    Json(state.catalog_controller.view().await)
}

pub async fn reload_catalog(State(state): State<Arc<AppState>>) -> Json<CatalogViewDto> {
    log_command("reload_catalog");

    state.catalog_controller.load_all().await;
    Json(state.catalog_controller.view().await)
}

pub async fn select_tab(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SelectTabRequest>,
) -> Json<CatalogViewDto> {
    log_command(format!("select_tab {}", request.tab));

    state.catalog_controller.select_tab(request.tab).await;
    Json(state.catalog_controller.view().await)
}

pub async fn get_upload_progress(
    State(state): State<Arc<AppState>>,
) -> Json<BTreeMap<EntityKind, UploadStatusDto>> {
    let controller = &state.catalog_controller;
    Json(
        EntityKind::ALL
            .into_iter()
            .map(|kind| {
                (
                    kind,
                    UploadStatusDto {
                        percent: controller.upload_progress(kind),
                        phase: controller.phase(kind),
                    },
                )
            })
            .collect(),
    )
}

pub async fn drain_notifications(State(state): State<Arc<AppState>>) -> Json<Vec<Notification>> {
    Json(state.notification_service.drain())
}
