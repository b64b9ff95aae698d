use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// The three record kinds managed by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Players,
    Clubs,
    Trophies,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [EntityKind::Players, EntityKind::Clubs, EntityKind::Trophies];

    /// Name of the backing document collection
    pub fn collection(self) -> &'static str {
        match self {
            Self::Players => "players",
            Self::Clubs => "clubs",
            Self::Trophies => "trophies",
        }
    }

    /// Object storage namespace for uploaded images
    pub fn storage_prefix(self) -> &'static str {
        self.collection()
    }

    /// Capitalized singular label, e.g. "Player"
    pub fn label(self) -> &'static str {
        match self {
            Self::Players => "Player",
            Self::Clubs => "Club",
            Self::Trophies => "Trophy",
        }
    }

    /// Tab title, e.g. "Players"
    pub fn plural_label(self) -> &'static str {
        match self {
            Self::Players => "Players",
            Self::Clubs => "Clubs",
            Self::Trophies => "Trophies",
        }
    }

    pub fn singular(self) -> &'static str {
        match self {
            Self::Players => "player",
            Self::Clubs => "club",
            Self::Trophies => "trophy",
        }
    }

    /// What the upload field is called on the form
    pub fn image_noun(self) -> &'static str {
        match self {
            Self::Clubs => "logo",
            Self::Players | Self::Trophies => "image",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::Players => 0,
            Self::Clubs => 1,
            Self::Trophies => 2,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.collection())
    }
}

/// A catalog record stored as one document in its kind's collection.
pub trait CatalogEntity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    const KIND: EntityKind;

    /// Backend-assigned id, empty until the document is created
    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);

    fn set_image_url(&mut self, url: String);

    /// Names of required fields that are blank
    fn missing_required_fields(&self) -> Vec<&'static str>;
}

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
