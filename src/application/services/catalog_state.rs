use crate::domain::models::club::Club;
use crate::domain::models::entity::{CatalogEntity, EntityKind};
use crate::domain::models::player::Player;
use crate::domain::models::trophy::Trophy;

/// In-memory copy of the three collections plus the selected tab
#[derive(Debug, Clone)]
pub struct CatalogState {
    pub active_tab: EntityKind,
    pub players: Vec<Player>,
    pub clubs: Vec<Club>,
    pub trophies: Vec<Trophy>,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self {
            active_tab: EntityKind::Players,
            players: Vec::new(),
            clubs: Vec::new(),
            trophies: Vec::new(),
        }
    }
}

/// Ties an entity type to its list inside `CatalogState`
pub trait CatalogList: CatalogEntity {
    fn list(state: &CatalogState) -> &Vec<Self>;

    fn list_mut(state: &mut CatalogState) -> &mut Vec<Self>;
}

impl CatalogList for Player {
    fn list(state: &CatalogState) -> &Vec<Self> {
        &state.players
    }

    fn list_mut(state: &mut CatalogState) -> &mut Vec<Self> {
        &mut state.players
    }
}

impl CatalogList for Club {
    fn list(state: &CatalogState) -> &Vec<Self> {
        &state.clubs
    }

    fn list_mut(state: &mut CatalogState) -> &mut Vec<Self> {
        &mut state.clubs
    }
}

impl CatalogList for Trophy {
    fn list(state: &CatalogState) -> &Vec<Self> {
        &state.trophies
    }

    fn list_mut(state: &mut CatalogState) -> &mut Vec<Self> {
        &mut state.trophies
    }
}

impl CatalogState {
    pub fn find<E: CatalogList>(&self, id: &str) -> Option<&E> {
        E::list(self).iter().find(|entity| entity.id() == id)
    }

    pub fn replace_all<E: CatalogList>(&mut self, entities: Vec<E>) {
        *E::list_mut(self) = entities;
    }

    pub fn append<E: CatalogList>(&mut self, entity: E) {
        E::list_mut(self).push(entity);
    }

    /// Replace the entity with the same id. Returns false if it is not loaded.
    pub fn merge<E: CatalogList>(&mut self, entity: E) -> bool {
        match E::list_mut(self)
            .iter_mut()
            .find(|existing| existing.id() == entity.id())
        {
            Some(existing) => {
                *existing = entity;
                true
            }
            None => false,
        }
    }

    /// Remove every row with the given id and return how many were dropped
    pub fn remove<E: CatalogList>(&mut self, id: &str) -> usize {
        let list = E::list_mut(self);
        let before = list.len();
        list.retain(|entity| entity.id() != id);
        before - list.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn club(id: &str, name: &str) -> Club {
        Club {
            id: id.to_string(),
            name: name.to_string(),
            ..Club::default()
        }
    }

    #[test]
    fn merge_replaces_by_id_and_keeps_order() {
        let mut state = CatalogState::default();
        state.append(club("a", "Alpha"));
        state.append(club("b", "Bravo"));

        assert!(state.merge(club("a", "Alpha Renamed")));
        assert!(!state.merge(club("z", "Ghost")));

        let names: Vec<_> = state.clubs.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha Renamed", "Bravo"]);
    }

    #[test]
    fn remove_only_touches_matching_rows() {
        let mut state = CatalogState::default();
        state.append(club("a", "Alpha"));
        state.append(club("b", "Bravo"));

        assert_eq!(state.remove::<Club>("b"), 1);
        assert_eq!(state.remove::<Club>("b"), 0);
        assert_eq!(state.clubs.len(), 1);
        assert!(state.find::<Club>("a").is_some());
    }
}
