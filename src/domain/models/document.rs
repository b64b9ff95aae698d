use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::errors::DomainError;
use crate::domain::models::entity::CatalogEntity;

/// Field map of a schema-less document
pub type DocumentFields = Map<String, Value>;

/// A stored document as returned by a document collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    #[serde(default)]
    pub fields: DocumentFields,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: DocumentFields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Decode the document into an entity, taking the id from the document key
    pub fn into_entity<E: CatalogEntity>(self) -> Result<E, DomainError> {
        let mut fields = self.fields;
        fields.remove("id");
        let mut entity: E = serde_json::from_value(Value::Object(fields)).map_err(|error| {
            DomainError::InvalidData(format!(
                "Document '{}' in '{}' is malformed: {}",
                self.id,
                E::KIND.collection(),
                error
            ))
        })?;
        entity.set_id(self.id);
        Ok(entity)
    }
}

/// Fields to store for an entity. The id is the document key and is never
/// written as a field.
pub fn entity_fields<E: CatalogEntity>(entity: &E) -> Result<DocumentFields, DomainError> {
    match serde_json::to_value(entity) {
        Ok(Value::Object(mut fields)) => {
            fields.remove("id");
            Ok(fields)
        }
        Ok(other) => Err(DomainError::InvalidData(format!(
            "{} did not serialize to an object: {}",
            E::KIND.label(),
            other
        ))),
        Err(error) => Err(DomainError::InvalidData(format!(
            "Failed to serialize {}: {}",
            E::KIND.singular(),
            error
        ))),
    }
}
