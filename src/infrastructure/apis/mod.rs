// Firebase REST backends
pub mod firebase_storage_repository;
pub mod firestore_document_repository;
pub mod firestore_values;

use reqwest::StatusCode;
use serde_json::Value;

use crate::domain::errors::DomainError;

/// Turn a non-success Firebase response into a domain error
pub(crate) async fn map_error_response(
    service_name: &str,
    response: reqwest::Response,
    default_message: &str,
) -> DomainError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = extract_error_message(&body, default_message);

    match status {
        StatusCode::UNAUTHORIZED => DomainError::AuthenticationError(message),
        StatusCode::FORBIDDEN => DomainError::PermissionDenied(message),
        StatusCode::NOT_FOUND => DomainError::NotFound(message),
        StatusCode::BAD_REQUEST => DomainError::InvalidData(message),
        _ => DomainError::InternalError(format!(
            "{service_name} request failed with status {}: {message}",
            status.as_u16()
        )),
    }
}

pub(crate) fn transport_error(service_name: &str, error: reqwest::Error) -> DomainError {
    DomainError::InternalError(format!("{service_name} request failed: {error}"))
}

fn extract_error_message(body: &str, default_message: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return default_message.to_string();
    }

    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(message) = value
            .get("error")
            .and_then(Value::as_object)
            .and_then(|error| error.get("message"))
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|value| !value.is_empty())
        {
            return message.to_string();
        }
    }

    body.to_string()
}

#[cfg(test)]
pub(crate) mod test_server {
    use axum::Router;
    use tokio::net::TcpListener;

    /// Serve `router` on an ephemeral local port and return its base URL
    pub async fn spawn(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let address = listener.local_addr().expect("test listener address");
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });
        format!("http://{}", address)
    }
}

#[cfg(test)]
mod tests {
    use super::extract_error_message;

    #[test]
    fn extracts_google_api_error_message() {
        let body = r#"{"error":{"code":404,"message":"No document to update","status":"NOT_FOUND"}}"#;

        assert_eq!(extract_error_message(body, "fallback"), "No document to update");
        assert_eq!(extract_error_message("  ", "fallback"), "fallback");
        assert_eq!(extract_error_message("gateway down", "fallback"), "gateway down");
    }
}
