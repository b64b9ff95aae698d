use serde::{Deserialize, Serialize};

use crate::application::dto::entity_form::{EntityForm, overwrite_text};
use crate::domain::models::club::Club;

/// Club form payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClubForm {
    pub name: Option<String>,
    pub president: Option<String>,
    pub coach: Option<String>,
}

impl EntityForm for ClubForm {
    type Entity = Club;

    fn into_entity(self) -> Club {
        self.apply_to(&Club::default())
    }

    fn apply_to(self, existing: &Club) -> Club {
        let mut club = existing.clone();
        overwrite_text(&mut club.name, self.name);
        overwrite_text(&mut club.president, self.president);
        overwrite_text(&mut club.coach, self.coach);
        club
    }
}
