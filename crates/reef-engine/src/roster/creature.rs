use serde::{Deserialize, Serialize};
use crate::api::types::EntityId;

/// One creature added to the reef.
/// Field names match the JSON the board keeps in local storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creature {
    pub emoji: String,
    pub name: String,
    /// ISO-8601 time the creature was added.
    pub timestamp: String,
    /// Numeric id (milliseconds since epoch plus a random fraction).
    pub id: f64,
}

impl Creature {
    pub fn new(
        emoji: impl Into<String>,
        name: impl Into<String>,
        timestamp: impl Into<String>,
        id: f64,
    ) -> Self {
        Self {
            emoji: emoji.into(),
            name: name.into(),
            timestamp: timestamp.into(),
            id,
        }
    }

    /// Identity used by the swim animation.
    pub fn entity_id(&self) -> EntityId {
        EntityId(self.id.to_string())
    }
}

/// Exported or remote board state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReefSnapshot {
    pub reef: String,
    #[serde(rename = "lastUpdated")]
    pub last_updated: String,
    pub creatures: Vec<Creature>,
}

/// Remote documents only need a creature list; everything else is optional.
#[derive(Debug, Deserialize)]
pub(crate) struct RemoteReef {
    #[serde(default)]
    pub creatures: Option<serde_json::Value>,
}
