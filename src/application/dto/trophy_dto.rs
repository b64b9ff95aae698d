use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::application::dto::entity_form::{EntityForm, overwrite, overwrite_text};
use crate::domain::models::trophy::{Award, Trophy};

/// Trophy form payload. A `null` or empty `winnerId` clears the winning
/// club; leaving the key out keeps it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrophyForm {
    pub name: Option<String>,
    #[serde(
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub winner_id: Option<Option<String>>,
    pub awards: Option<Vec<Award>>,
    pub award_winners: Option<BTreeMap<Award, String>>,
}

impl EntityForm for TrophyForm {
    type Entity = Trophy;

    fn into_entity(self) -> Trophy {
        self.apply_to(&Trophy::default())
    }

    fn apply_to(self, existing: &Trophy) -> Trophy {
        let mut trophy = existing.clone();
        overwrite_text(&mut trophy.name, self.name);
        if let Some(winner_id) = self.winner_id {
            trophy.winner_id = winner_id.map(|id| id.trim().to_string());
        }
        overwrite(&mut trophy.awards, self.awards);
        overwrite(&mut trophy.award_winners, self.award_winners);
        trophy.normalize();
        trophy
    }
}

/// Distinguishes an explicit `null` (`Some(None)`) from a missing key (`None`)
fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}
