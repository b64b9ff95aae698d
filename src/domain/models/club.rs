use serde::{Deserialize, Serialize};

use crate::domain::models::entity::{CatalogEntity, EntityKind, is_blank};

/// A club record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Club {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: String,

    /// Public URL of the club logo
    #[serde(default, rename = "logo")]
    pub logo_url: String,

    #[serde(default)]
    pub president: String,

    #[serde(default)]
    pub coach: String,
}

impl CatalogEntity for Club {
    const KIND: EntityKind = EntityKind::Clubs;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn set_image_url(&mut self, url: String) {
        self.logo_url = url;
    }

    fn missing_required_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("president", &self.president),
            ("coach", &self.coach),
        ]
        .into_iter()
        .filter(|(_, value)| is_blank(value))
        .map(|(field, _)| field)
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_club_has_no_missing_fields() {
        let club = Club {
            name: "Riverside FC".to_string(),
            president: "A. Smith".to_string(),
            coach: "J. Doe".to_string(),
            ..Club::default()
        };
        assert!(club.missing_required_fields().is_empty());
    }

    #[test]
    fn logo_serializes_under_backend_name() {
        let club = Club {
            logo_url: "https://cdn.example/clubs/logo.png".to_string(),
            ..Club::default()
        };
        let value = serde_json::to_value(&club).expect("club should serialize");
        assert_eq!(value["logo"], "https://cdn.example/clubs/logo.png");
        assert!(value.get("logoUrl").is_none());
    }
}
