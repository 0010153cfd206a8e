use std::collections::{HashMap, HashSet};
use crate::api::types::EntityId;
use super::descriptor::OrbitDescriptor;

/// Per-session orbit descriptors keyed by entity.
/// Owned by the controller; no synchronization, all access happens on the frame loop.
#[derive(Debug, Default)]
pub struct OrbitStore {
    orbits: HashMap<EntityId, OrbitDescriptor>,
}

impl OrbitStore {
    pub fn new() -> Self {
        Self {
            orbits: HashMap::with_capacity(64),
        }
    }

    pub fn has(&self, id: &EntityId) -> bool {
        self.orbits.contains_key(id)
    }

    pub fn get(&self, id: &EntityId) -> Option<&OrbitDescriptor> {
        self.orbits.get(id)
    }

    /// Insert or replace the descriptor for `id`.
    pub fn set(&mut self, id: EntityId, orbit: OrbitDescriptor) {
        self.orbits.insert(id, orbit);
    }

    /// Return the stored descriptor, generating it on first sighting.
    pub fn get_or_insert_with(
        &mut self,
        id: &EntityId,
        generate: impl FnOnce() -> OrbitDescriptor,
    ) -> OrbitDescriptor {
        if let Some(orbit) = self.orbits.get(id) {
            return *orbit;
        }
        let orbit = generate();
        self.orbits.insert(id.clone(), orbit);
        orbit
    }

    /// Drop entries whose ids are not in `ids`. Returns how many were removed.
    pub fn retain_ids(&mut self, ids: &[EntityId]) -> usize {
        let live: HashSet<&EntityId> = ids.iter().collect();
        let before = self.orbits.len();
        self.orbits.retain(|id, _| live.contains(id));
        before - self.orbits.len()
    }

    pub fn clear(&mut self) {
        self.orbits.clear();
    }

    pub fn len(&self) -> usize {
        self.orbits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orbits.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EntityId, &OrbitDescriptor)> {
        self.orbits.iter()
    }
}
