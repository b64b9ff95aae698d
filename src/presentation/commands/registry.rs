use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::app::AppState;
use crate::application::dto::club_dto::ClubForm;
use crate::application::dto::entity_form::EntityForm;
use crate::application::dto::player_dto::PlayerForm;
use crate::application::dto::trophy_dto::TrophyForm;
use crate::application::services::catalog_state::CatalogList;
use crate::domain::models::entity::CatalogEntity;
use crate::presentation::commands::catalog_commands::{
    drain_notifications, get_catalog, get_upload_progress, reload_catalog, select_tab,
};
use crate::presentation::commands::entity_commands::{
    create_entity, delete_entity, list_entities, update_entity,
};

/// Room for the multipart framing and the form part on top of the image
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn router(state: Arc<AppState>) -> Router {
    let body_limit = state.config.max_image_bytes + FORM_OVERHEAD_BYTES;
    let storage_dir = state.data_directory.storage().to_path_buf();

    Router::new()
        .route("/api/catalog", get(get_catalog))
        .route("/api/catalog/reload", post(reload_catalog))
        .route("/api/catalog/tab", put(select_tab))
        .route("/api/uploads/progress", get(get_upload_progress))
        .route("/api/notifications", get(drain_notifications))
        .merge(entity_routes::<PlayerForm>())
        .merge(entity_routes::<ClubForm>())
        .merge(entity_routes::<TrophyForm>())
        .nest_service("/storage", ServeDir::new(storage_dir))
        .layer(CorsLayer::permissive())
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

fn entity_routes<F>() -> Router<Arc<AppState>>
where
    F: EntityForm,
    F::Entity: CatalogList,
{
    let collection = format!("/api/{}", F::Entity::KIND.collection());
    let item = format!("{}/:id", collection);

    Router::new()
        .route(
            &collection,
            get(list_entities::<F::Entity>).post(create_entity::<F>),
        )
        .route(
            &item,
            put(update_entity::<F>).delete(delete_entity::<F::Entity>),
        )
}
