use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::application::errors::ApplicationError;

#[derive(Error, Debug, Serialize)]
pub enum CommandError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

impl CommandError {
    fn status_and_kind(&self) -> (StatusCode, &'static str) {
        match self {
            CommandError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            CommandError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            CommandError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "unauthorized"),
            CommandError::UploadFailed(_) => (StatusCode::BAD_GATEWAY, "upload_failed"),
            CommandError::InternalServerError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        }
    }
}

impl From<ApplicationError> for CommandError {
    fn from(error: ApplicationError) -> Self {
        match error {
            ApplicationError::ValidationError(msg) => CommandError::BadRequest(msg),
            ApplicationError::NotFound(msg) => CommandError::NotFound(msg),
            ApplicationError::Unauthorized(msg) => CommandError::Unauthorized(msg),
            ApplicationError::PermissionDenied(msg) => CommandError::Unauthorized(msg),
            ApplicationError::UploadFailed(msg) => CommandError::UploadFailed(msg),
            ApplicationError::InternalError(msg) => CommandError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for CommandError {
    fn into_response(self) -> Response {
        let (status, kind) = self.status_and_kind();
        let body = Json(json!({
            "error": kind,
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_errors_map_to_http_statuses() {
        let cases = [
            (ApplicationError::ValidationError("x".into()), StatusCode::BAD_REQUEST),
            (ApplicationError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (ApplicationError::PermissionDenied("x".into()), StatusCode::UNAUTHORIZED),
            (ApplicationError::UploadFailed("x".into()), StatusCode::BAD_GATEWAY),
            (ApplicationError::InternalError("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, status) in cases {
            assert_eq!(CommandError::from(error).into_response().status(), status);
        }
    }
}
