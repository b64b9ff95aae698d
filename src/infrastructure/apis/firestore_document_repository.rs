use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};

use crate::domain::errors::DomainError;
use crate::domain::models::document::{Document, DocumentFields};
use crate::domain::repositories::document_repository::DocumentRepository;
use crate::infrastructure::apis::firestore_values::{decode_document, encode_fields};
use crate::infrastructure::apis::{map_error_response, transport_error};
use crate::infrastructure::logging::logger;

const SERVICE_NAME: &str = "Firestore";
const DEFAULT_ENDPOINT: &str = "https://firestore.googleapis.com/v1";
const PAGE_SIZE: &str = "300";

/// Document collections in Cloud Firestore, accessed through its REST API
pub struct FirestoreDocumentRepository {
    client: Client,
    documents_url: String,
    api_key: String,
}

impl FirestoreDocumentRepository {
    pub fn new(client: Client, project_id: &str, api_key: &str) -> Self {
        Self::with_endpoint(client, DEFAULT_ENDPOINT, project_id, api_key)
    }

    pub fn with_endpoint(client: Client, endpoint: &str, project_id: &str, api_key: &str) -> Self {
        let documents_url = format!(
            "{}/projects/{}/databases/(default)/documents",
            endpoint.trim_end_matches('/'),
            project_id
        );

        Self {
            client,
            documents_url,
            api_key: api_key.to_string(),
        }
    }

    fn collection_url(&self, collection: &str) -> Result<String, DomainError> {
        Ok(format!("{}/{}", self.documents_url, checked_segment(collection)?))
    }

    fn document_url(&self, collection: &str, id: &str) -> Result<String, DomainError> {
        Ok(format!(
            "{}/{}",
            self.collection_url(collection)?,
            checked_segment(id)?
        ))
    }

    async fn read_json(
        response: reqwest::Response,
        default_message: &str,
    ) -> Result<Value, DomainError> {
        if !response.status().is_success() {
            return Err(map_error_response(SERVICE_NAME, response, default_message).await);
        }

        response
            .json::<Value>()
            .await
            .map_err(|error| DomainError::InvalidData(format!("Invalid Firestore response: {error}")))
    }
}

#[async_trait]
impl DocumentRepository for FirestoreDocumentRepository {
    async fn list_documents(&self, collection: &str) -> Result<Vec<Document>, DomainError> {
        let url = self.collection_url(collection)?;
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut query = vec![("key", self.api_key.clone()), ("pageSize", PAGE_SIZE.to_string())];
            if let Some(token) = &page_token {
                query.push(("pageToken", token.clone()));
            }

            let response = self
                .client
                .get(&url)
                .query(&query)
                .send()
                .await
                .map_err(|error| transport_error(SERVICE_NAME, error))?;
            let page = Self::read_json(response, "Failed to list documents").await?;

            if let Some(items) = page.get("documents").and_then(Value::as_array) {
                for item in items {
                    documents.push(decode_document(item)?);
                }
            }

            page_token = page
                .get("nextPageToken")
                .and_then(Value::as_str)
                .filter(|token| !token.is_empty())
                .map(str::to_string);
            if page_token.is_none() {
                break;
            }
        }

        logger::debug(&format!(
            "Firestore: listed {} documents in {}",
            documents.len(),
            collection
        ));
        Ok(documents)
    }

    async fn insert_document(
        &self,
        collection: &str,
        fields: DocumentFields,
    ) -> Result<String, DomainError> {
        let response = self
            .client
            .post(self.collection_url(collection)?)
            .query(&[("key", self.api_key.as_str())])
            .json(&json!({ "fields": encode_fields(&fields) }))
            .send()
            .await
            .map_err(|error| transport_error(SERVICE_NAME, error))?;
        let created = Self::read_json(response, "Failed to create document").await?;

        Ok(decode_document(&created)?.id)
    }

    async fn update_document(
        &self,
        collection: &str,
        id: &str,
        fields: DocumentFields,
    ) -> Result<(), DomainError> {
        let mut query: Vec<(&str, String)> = fields
            .keys()
            .map(|field| ("updateMask.fieldPaths", field_path(field)))
            .collect();
        query.push(("currentDocument.exists", "true".to_string()));
        query.push(("key", self.api_key.clone()));

        let response = self
            .client
            .patch(self.document_url(collection, id)?)
            .query(&query)
            .json(&json!({ "fields": encode_fields(&fields) }))
            .send()
            .await
            .map_err(|error| transport_error(SERVICE_NAME, error))?;
        Self::read_json(response, "Failed to update document").await?;

        Ok(())
    }

    async fn delete_document(&self, collection: &str, id: &str) -> Result<(), DomainError> {
        let response = self
            .client
            .delete(self.document_url(collection, id)?)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|error| transport_error(SERVICE_NAME, error))?;

        if response.status().is_success() {
            return Ok(());
        }
        Err(map_error_response(SERVICE_NAME, response, "Failed to delete document").await)
    }
}

fn checked_segment(segment: &str) -> Result<&str, DomainError> {
    let valid = !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(segment)
    } else {
        Err(DomainError::InvalidData(format!(
            "Invalid Firestore path segment: {}",
            segment
        )))
    }
}

/// Field names outside `[A-Za-z_][A-Za-z0-9_]*` must be backtick-quoted in
/// update masks
fn field_path(field: &str) -> String {
    let mut chars = field.chars();
    let simple = chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if simple {
        field.to_string()
    } else {
        format!("`{}`", field.replace('\\', "\\\\").replace('`', "\\`"))
    }
}
