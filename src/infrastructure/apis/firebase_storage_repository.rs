use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Body, Client};
use serde_json::Value;

use crate::domain::errors::DomainError;
use crate::domain::models::upload::{ProgressCallback, UploadProgress};
use crate::domain::repositories::object_storage_repository::ObjectStorageRepository;
use crate::infrastructure::apis::{map_error_response, transport_error};
use crate::infrastructure::logging::logger;

const SERVICE_NAME: &str = "Firebase Storage";
const DEFAULT_ENDPOINT: &str = "https://firebasestorage.googleapis.com/v0";

/// Object names are sent as a single path segment, so `/` is escaped too
const OBJECT_NAME: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Images in a Firebase Storage bucket
pub struct FirebaseStorageRepository {
    client: Client,
    bucket_url: String,
    chunk_size: usize,
}

impl FirebaseStorageRepository {
    pub fn new(client: Client, bucket: &str, chunk_size: usize) -> Self {
        Self::with_endpoint(client, DEFAULT_ENDPOINT, bucket, chunk_size)
    }

    pub fn with_endpoint(client: Client, endpoint: &str, bucket: &str, chunk_size: usize) -> Self {
        Self {
            client,
            bucket_url: format!("{}/b/{}/o", endpoint.trim_end_matches('/'), bucket),
            chunk_size: chunk_size.max(1),
        }
    }

    fn object_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.bucket_url,
            utf8_percent_encode(path, OBJECT_NAME)
        )
    }

    /// Split the payload into chunks that report progress as the transport
    /// pulls them
    fn progress_body(&self, data: Bytes, on_progress: ProgressCallback) -> Body {
        let total = data.len() as u64;
        let chunk_size = self.chunk_size;
        let chunks: Vec<Bytes> = (0..data.len())
            .step_by(chunk_size)
            .map(|start| data.slice(start..(start + chunk_size).min(data.len())))
            .collect();

        let mut sent = 0u64;
        let body_stream = stream::iter(chunks.into_iter().map(move |chunk| {
            sent += chunk.len() as u64;
            (*on_progress)(UploadProgress::new(sent, total));
            Ok::<Bytes, std::io::Error>(chunk)
        }));

        Body::wrap_stream(body_stream)
    }
}

#[async_trait]
impl ObjectStorageRepository for FirebaseStorageRepository {
    async fn upload_object(
        &self,
        path: &str,
        data: Bytes,
        content_type: &str,
        on_progress: ProgressCallback,
    ) -> Result<(), DomainError> {
        if path.trim().is_empty() {
            return Err(DomainError::InvalidData("Object path cannot be empty".to_string()));
        }

        let length = data.len();
        logger::debug(&format!(
            "Firebase Storage: uploading {} ({} bytes)",
            path, length
        ));
        (*on_progress)(UploadProgress::new(0, length as u64));

        let response = self
            .client
            .post(&self.bucket_url)
            .query(&[("uploadType", "media"), ("name", path)])
            .header(CONTENT_TYPE, content_type)
            .header(CONTENT_LENGTH, length)
            .body(self.progress_body(data, on_progress))
            .send()
            .await
            .map_err(|error| transport_error(SERVICE_NAME, error))?;

        if !response.status().is_success() {
            return Err(map_error_response(SERVICE_NAME, response, "Upload rejected").await);
        }
        Ok(())
    }

    async fn public_url(&self, path: &str) -> Result<String, DomainError> {
        let object_url = self.object_url(path);
        let response = self
            .client
            .get(&object_url)
            .send()
            .await
            .map_err(|error| transport_error(SERVICE_NAME, error))?;
        if !response.status().is_success() {
            return Err(map_error_response(SERVICE_NAME, response, "Object not found").await);
        }

        let metadata = response.json::<Value>().await.map_err(|error| {
            DomainError::InvalidData(format!("Invalid Firebase Storage metadata: {error}"))
        })?;
        let token = metadata
            .get("downloadTokens")
            .and_then(Value::as_str)
            .and_then(|tokens| tokens.split(',').map(str::trim).find(|token| !token.is_empty()))
            .ok_or_else(|| {
                DomainError::InvalidData(format!("Object {} has no download token", path))
            })?;

        Ok(format!("{}?alt=media&token={}", object_url, token))
    }
}
