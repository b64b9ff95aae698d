use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::domain::models::entity::{CatalogEntity, EntityKind, is_blank};

/// A player record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub full_name: String,

    #[serde(default, deserialize_with = "lenient_count")]
    pub age: u32,

    #[serde(default)]
    pub nationality: String,

    /// Display name of the club, not its id
    #[serde(default)]
    pub club: String,

    #[serde(default, deserialize_with = "lenient_count")]
    pub goals: u32,

    #[serde(default, deserialize_with = "lenient_count")]
    pub assists: u32,

    /// Public URL of the profile picture
    #[serde(default, rename = "pfp")]
    pub profile_image_url: String,
}

impl CatalogEntity for Player {
    const KIND: EntityKind = EntityKind::Players;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn set_image_url(&mut self, url: String) {
        self.profile_image_url = url;
    }

    fn missing_required_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(&self.full_name) {
            missing.push("fullName");
        }
        if is_blank(&self.club) {
            missing.push("club");
        }
        missing
    }
}

/// Accepts integers, floats, numeric strings and null for counters written by
/// loosely typed clients.
fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let count = match value {
        Value::Null => 0,
        Value::Number(number) => number
            .as_u64()
            .or_else(|| number.as_f64().filter(|v| *v >= 0.0).map(|v| v.round() as u64))
            .unwrap_or(0),
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                0
            } else {
                trimmed
                    .parse::<f64>()
                    .map_err(serde::de::Error::custom)?
                    .max(0.0)
                    .round() as u64
            }
        }
        other => {
            return Err(serde::de::Error::custom(format!(
                "expected a number, found {}",
                other
            )));
        }
    };

    u32::try_from(count).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn deserializes_backend_field_names() {
        let player: Player = serde_json::from_value(json!({
            "id": "p1",
            "fullName": "Ada Striker",
            "age": 24,
            "nationality": "Norway",
            "club": "Riverside FC",
            "goals": 12,
            "assists": 7,
            "pfp": "https://cdn.example/players/1-ada.png"
        }))
        .expect("player should deserialize");

        assert_eq!(player.full_name, "Ada Striker");
        assert_eq!(player.profile_image_url, "https://cdn.example/players/1-ada.png");
        assert_eq!(player.goals, 12);
    }

    #[test]
    fn counters_tolerate_loose_types() {
        let player: Player = serde_json::from_value(json!({
            "fullName": "Loose",
            "age": "31",
            "goals": 4.0,
            "assists": null
        }))
        .expect("loose counters should deserialize");

        assert_eq!(player.age, 31);
        assert_eq!(player.goals, 4);
        assert_eq!(player.assists, 0);
    }

    #[test]
    fn counters_reject_non_numeric_text() {
        let result = serde_json::from_value::<Player>(json!({ "age": "old" }));
        assert!(result.is_err());
    }

    #[test]
    fn missing_required_fields_lists_blank_name_and_club() {
        let player = Player {
            full_name: "  ".to_string(),
            ..Player::default()
        };
        assert_eq!(player.missing_required_fields(), vec!["fullName", "club"]);
    }
}
