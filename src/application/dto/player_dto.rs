use serde::{Deserialize, Serialize};

use crate::application::dto::entity_form::{EntityForm, overwrite, overwrite_text};
use crate::domain::models::player::Player;

/// Player form payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerForm {
    pub full_name: Option<String>,
    pub age: Option<u32>,
    pub nationality: Option<String>,
    pub club: Option<String>,
    pub goals: Option<u32>,
    pub assists: Option<u32>,
}

impl EntityForm for PlayerForm {
    type Entity = Player;

    fn into_entity(self) -> Player {
        self.apply_to(&Player::default())
    }

    fn apply_to(self, existing: &Player) -> Player {
        let mut player = existing.clone();
        overwrite_text(&mut player.full_name, self.full_name);
        overwrite(&mut player.age, self.age);
        overwrite_text(&mut player.nationality, self.nationality);
        overwrite_text(&mut player.club, self.club);
        overwrite(&mut player.goals, self.goals);
        overwrite(&mut player.assists, self.assists);
        player
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_to_only_touches_submitted_fields() {
        let existing = Player {
            id: "p1".to_string(),
            full_name: "Ada Striker".to_string(),
            age: 24,
            nationality: "Norway".to_string(),
            club: "Riverside FC".to_string(),
            goals: 10,
            assists: 3,
            profile_image_url: "https://cdn.example/ada.png".to_string(),
        };
        let form = PlayerForm {
            goals: Some(11),
            ..PlayerForm::default()
        };

        let updated = form.apply_to(&existing);

        assert_eq!(updated.goals, 11);
        assert_eq!(updated.assists, 3);
        assert_eq!(updated.full_name, "Ada Striker");
        assert_eq!(updated.profile_image_url, existing.profile_image_url);
    }

    #[test]
    fn into_entity_defaults_optional_fields() {
        let form: PlayerForm = serde_json::from_str(r#"{"fullName":" Ada ","club":"Riverside FC"}"#)
            .expect("form should parse");

        let player = form.into_entity();

        assert_eq!(player.full_name, "Ada");
        assert_eq!(player.age, 0);
        assert_eq!(player.nationality, "");
        assert!(player.id.is_empty());
    }
}
