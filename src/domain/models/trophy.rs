use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::models::entity::{CatalogEntity, EntityKind, is_blank};

/// Individual awards a trophy can hand out. Serialized as the display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Award {
    GoldenBoot,
    Mvp,
    BestDefender,
    BestMidfielder,
    BestGoalkeeper,
}

impl Award {
    pub const ALL: [Award; 5] = [
        Award::GoldenBoot,
        Award::Mvp,
        Award::BestDefender,
        Award::BestMidfielder,
        Award::BestGoalkeeper,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::GoldenBoot => "Golden Boot",
            Self::Mvp => "MVP",
            Self::BestDefender => "Best Defender",
            Self::BestMidfielder => "Best Midfielder",
            Self::BestGoalkeeper => "Best Goalkeeper",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|award| award.label().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for Award {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<String> for Award {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_label(&value).ok_or_else(|| format!("Unknown award: {}", value))
    }
}

impl From<Award> for String {
    fn from(award: Award) -> Self {
        award.label().to_string()
    }
}

/// A trophy record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Trophy {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: String,

    /// Public URL of the trophy image
    #[serde(default, rename = "image")]
    pub image_url: String,

    /// Id of the winning club. Not checked against the clubs collection.
    #[serde(default)]
    pub winner_id: Option<String>,

    #[serde(default)]
    pub awards: Vec<Award>,

    /// Award -> id of the player who received it
    #[serde(default)]
    pub award_winners: BTreeMap<Award, String>,
}

impl Trophy {
    /// Drops duplicate awards, winners of awards that are not selected, and
    /// blank references.
    pub fn normalize(&mut self) {
        let mut seen = Vec::with_capacity(self.awards.len());
        self.awards.retain(|award| {
            if seen.contains(award) {
                false
            } else {
                seen.push(*award);
                true
            }
        });

        let awards = &self.awards;
        self.award_winners
            .retain(|award, player_id| awards.contains(award) && !is_blank(player_id));

        if self.winner_id.as_deref().is_some_and(is_blank) {
            self.winner_id = None;
        }
    }
}

impl CatalogEntity for Trophy {
    const KIND: EntityKind = EntityKind::Trophies;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn set_image_url(&mut self, url: String) {
        self.image_url = url;
    }

    fn missing_required_fields(&self) -> Vec<&'static str> {
        if is_blank(&self.name) {
            vec!["name"]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn awards_use_display_labels_on_the_wire() {
        let trophy = Trophy {
            name: "League Cup".to_string(),
            awards: vec![Award::GoldenBoot, Award::Mvp],
            award_winners: BTreeMap::from([(Award::Mvp, "p7".to_string())]),
            ..Trophy::default()
        };

        let value = serde_json::to_value(&trophy).expect("trophy should serialize");
        assert_eq!(value["awards"], json!(["Golden Boot", "MVP"]));
        assert_eq!(value["awardWinners"], json!({ "MVP": "p7" }));
        assert_eq!(value["winnerId"], json!(null));
    }

    #[test]
    fn unknown_award_label_is_rejected() {
        let result = serde_json::from_value::<Trophy>(json!({
            "name": "Cup",
            "awards": ["Best Mascot"]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn normalize_clears_winners_of_unselected_awards() {
        let mut trophy = Trophy {
            name: "Cup".to_string(),
            winner_id: Some("   ".to_string()),
            awards: vec![Award::Mvp, Award::Mvp, Award::BestDefender],
            award_winners: BTreeMap::from([
                (Award::Mvp, "p1".to_string()),
                (Award::GoldenBoot, "p2".to_string()),
                (Award::BestDefender, String::new()),
            ]),
            ..Trophy::default()
        };

        trophy.normalize();

        assert_eq!(trophy.awards, vec![Award::Mvp, Award::BestDefender]);
        assert_eq!(
            trophy.award_winners,
            BTreeMap::from([(Award::Mvp, "p1".to_string())])
        );
        assert_eq!(trophy.winner_id, None);
    }
}
