use serde::de::DeserializeOwned;

use crate::domain::models::entity::CatalogEntity;

/// Values submitted from a create or edit form.
///
/// Every field is optional so that an edit only overwrites what the user
/// touched. Required-field checks run on the resulting entity.
pub trait EntityForm: DeserializeOwned + Send + 'static {
    type Entity: CatalogEntity;

    /// Build a new entity, using defaults for absent fields
    fn into_entity(self) -> Self::Entity;

    /// Copy of `existing` with the submitted fields overwritten
    fn apply_to(self, existing: &Self::Entity) -> Self::Entity;
}

pub(crate) fn overwrite_text(target: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *target = value.trim().to_string();
    }
}

pub(crate) fn overwrite<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}
