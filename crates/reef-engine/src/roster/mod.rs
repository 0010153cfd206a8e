//! The board's creature list and its JSON formats.

pub mod creature;

use std::collections::HashSet;
use log::{debug, info, warn};
use crate::api::host::EntitySource;
use crate::api::types::EntityId;
use crate::error::ReefError;
use creature::RemoteReef;

pub use creature::{Creature, ReefSnapshot};

/// Board name written into snapshots when none is given.
pub const DEFAULT_REEF_NAME: &str = "Olivera Corals Class";

/// Prefix of downloaded snapshot files.
pub const EXPORT_FILE_PREFIX: &str = "olivera-reef-";

/// Ordered creature roster. Insertion order is display order.
#[derive(Debug, Clone)]
pub struct Reef {
    name: String,
    creatures: Vec<Creature>,
}

impl Reef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            creatures: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn creatures(&self) -> &[Creature] {
        &self.creatures
    }

    pub fn len(&self) -> usize {
        self.creatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.creatures.is_empty()
    }

    /// Append a creature and return it.
    pub fn add(&mut self, creature: Creature) -> &Creature {
        info!("reef: added {} {}", creature.emoji, creature.name);
        self.creatures.push(creature);
        &self.creatures[self.creatures.len() - 1]
    }

    /// Replace the roster with a saved JSON array.
    /// A corrupt document leaves the roster empty and returns the error.
    pub fn load_saved(&mut self, json: &str) -> Result<usize, ReefError> {
        match serde_json::from_str::<Vec<Creature>>(json) {
            Ok(creatures) => {
                self.creatures = creatures;
                debug!("reef: loaded {} saved creatures", self.creatures.len());
                Ok(self.creatures.len())
            }
            Err(err) => {
                self.creatures.clear();
                Err(err.into())
            }
        }
    }

    /// The roster as the JSON array kept in local storage.
    pub fn saved_json(&self) -> Result<String, ReefError> {
        Ok(serde_json::to_string(&self.creatures)?)
    }

    /// Append creatures from a remote snapshot whose ids are not on the board yet.
    /// Returns how many were added. A document without a creature list adds nothing.
    /// Malformed entries are skipped; only an unparseable document is an error.
    pub fn merge_remote(&mut self, json: &str) -> Result<usize, ReefError> {
        let remote: RemoteReef = serde_json::from_str(json)?;
        let Some(serde_json::Value::Array(entries)) = remote.creatures else {
            return Ok(0);
        };
        let mut known: HashSet<u64> = self.creatures.iter().map(|c| c.id.to_bits()).collect();
        let before = self.creatures.len();
        for (index, entry) in entries.into_iter().enumerate() {
            let creature: Creature = match serde_json::from_value(entry) {
                Ok(creature) => creature,
                Err(err) => {
                    warn!("reef: skipping remote creature {}: {}", index, err);
                    continue;
                }
            };
            if known.insert(creature.id.to_bits()) {
                self.creatures.push(creature);
            }
        }
        let added = self.creatures.len() - before;
        debug!("reef: merged {} remote creatures", added);
        Ok(added)
    }

    pub fn snapshot(&self, last_updated: impl Into<String>) -> ReefSnapshot {
        ReefSnapshot {
            reef: self.name.clone(),
            last_updated: last_updated.into(),
            creatures: self.creatures.clone(),
        }
    }

    /// Pretty-printed snapshot, as offered for download.
    pub fn snapshot_json(&self, last_updated: impl Into<String>) -> Result<String, ReefError> {
        Ok(serde_json::to_string_pretty(&self.snapshot(last_updated))?)
    }

    pub fn entity_ids(&self) -> Vec<EntityId> {
        self.creatures.iter().map(Creature::entity_id).collect()
    }
}

impl Default for Reef {
    fn default() -> Self {
        Self::new(DEFAULT_REEF_NAME)
    }
}

/// The roster is the entity source for hosts without a DOM: a headless host can
/// hand the controller a `Reef` and get one orbit per creature, keyed by id.
impl EntitySource for Reef {
    fn active_entity_ids(&self) -> Vec<EntityId> {
        self.entity_ids()
    }
}

/// Download name for a snapshot taken at `now` (ISO-8601),
/// e.g. `olivera-reef-2024-03-01.json`.
pub fn export_file_name(now: &str) -> String {
    let date = now.split('T').next().unwrap_or(now);
    format!("{EXPORT_FILE_PREFIX}{date}.json")
}
