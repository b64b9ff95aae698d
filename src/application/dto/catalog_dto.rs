use serde::{Deserialize, Serialize};

use crate::application::services::catalog_service::OperationPhase;
use crate::application::services::catalog_state::CatalogState;
use crate::domain::models::club::Club;
use crate::domain::models::entity::EntityKind;
use crate::domain::models::player::Player;
use crate::domain::models::trophy::Trophy;

/// One rendered list row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRowDto {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub detail: Option<String>,
    pub image_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabViewDto {
    pub kind: EntityKind,
    pub label: String,
    pub rows: Vec<EntityRowDto>,
    /// Set only when the list is empty
    pub empty_message: Option<String>,
    pub upload_progress: u8,
    pub phase: OperationPhase,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogViewDto {
    pub active_tab: EntityKind,
    pub loading: bool,
    pub tabs: Vec<TabViewDto>,
}

impl CatalogViewDto {
    pub fn build(
        state: &CatalogState,
        loading: bool,
        progress: [u8; 3],
        phases: [OperationPhase; 3],
    ) -> Self {
        let tabs = EntityKind::ALL
            .into_iter()
            .map(|kind| {
                let rows = match kind {
                    EntityKind::Players => state.players.iter().map(player_row).collect(),
                    EntityKind::Clubs => state.clubs.iter().map(club_row).collect(),
                    EntityKind::Trophies => state
                        .trophies
                        .iter()
                        .map(|trophy| trophy_row(trophy, &state.clubs, &state.players))
                        .collect::<Vec<_>>(),
                };
                TabViewDto {
                    kind,
                    label: kind.plural_label().to_string(),
                    empty_message: rows
                        .is_empty()
                        .then(|| format!("No {} added yet.", kind.collection())),
                    rows,
                    upload_progress: progress[kind.index()],
                    phase: phases[kind.index()],
                }
            })
            .collect();

        Self {
            active_tab: state.active_tab,
            loading,
            tabs,
        }
    }

    pub fn tab(&self, kind: EntityKind) -> Option<&TabViewDto> {
        self.tabs.iter().find(|tab| tab.kind == kind)
    }
}

pub fn player_row(player: &Player) -> EntityRowDto {
    EntityRowDto {
        id: player.id.clone(),
        title: player.full_name.clone(),
        subtitle: format!(
            "{} yrs | {} | {}",
            player.age, player.nationality, player.club
        ),
        detail: Some(format!(
            "Goals: {} | Assists: {}",
            player.goals, player.assists
        )),
        image_url: player.profile_image_url.clone(),
    }
}

pub fn club_row(club: &Club) -> EntityRowDto {
    EntityRowDto {
        id: club.id.clone(),
        title: club.name.clone(),
        subtitle: format!("President: {} | Coach: {}", club.president, club.coach),
        detail: None,
        image_url: club.logo_url.clone(),
    }
}

/// Resolves the winning club and award winners against the loaded lists.
/// Dangling references render as "Unknown".
pub fn trophy_row(trophy: &Trophy, clubs: &[Club], players: &[Player]) -> EntityRowDto {
    let winner = match trophy.winner_id.as_deref() {
        Some(id) if !id.is_empty() => clubs
            .iter()
            .find(|club| club.id == id)
            .map_or("Unknown", |club| club.name.as_str()),
        _ => "None",
    };

    let awards = if trophy.awards.is_empty() {
        "None".to_string()
    } else {
        trophy
            .awards
            .iter()
            .map(|award| match trophy.award_winners.get(award) {
                Some(player_id) => {
                    let name = players
                        .iter()
                        .find(|player| &player.id == player_id)
                        .map_or("Unknown", |player| player.full_name.as_str());
                    format!("{} ({})", award, name)
                }
                None => award.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", ")
    };

    EntityRowDto {
        id: trophy.id.clone(),
        title: trophy.name.clone(),
        subtitle: format!("Winner: {}", winner),
        detail: Some(format!("Awards: {}", awards)),
        image_url: trophy.image_url.clone(),
    }
}
