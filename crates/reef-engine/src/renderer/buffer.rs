use std::collections::HashMap;
use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use crate::api::host::RenderSink;
use crate::api::types::EntityId;

/// Per-creature position written to shared memory for a host-side renderer.
/// 2 floats = 8 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct PositionInstance {
    pub x: f32,
    pub y: f32,
}

impl PositionInstance {
    pub const FLOATS: usize = 2;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Render sink that keeps the latest position of every overridden creature.
///
/// Slot order follows first sighting; clearing an override swap-removes its
/// slot, so hosts must read `ids()` alongside the instances.
#[derive(Debug, Default)]
pub struct PositionBuffer {
    ids: Vec<EntityId>,
    instances: Vec<PositionInstance>,
    slots: HashMap<EntityId, usize>,
}

impl PositionBuffer {
    pub fn new() -> Self {
        Self {
            ids: Vec::with_capacity(64),
            instances: Vec::with_capacity(64),
            slots: HashMap::with_capacity(64),
        }
    }

    pub fn position(&self, id: &EntityId) -> Option<Vec2> {
        self.slots
            .get(id)
            .map(|&slot| Vec2::new(self.instances[slot].x, self.instances[slot].y))
    }

    pub fn ids(&self) -> &[EntityId] {
        &self.ids
    }

    pub fn instances(&self) -> &[PositionInstance] {
        &self.instances
    }

    /// Flat `[x0, y0, x1, y1, ...]` view of the instances.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }

    /// Raw pointer to instance data for SharedArrayBuffer reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
        self.instances.clear();
        self.slots.clear();
    }
}

impl RenderSink for PositionBuffer {
    fn apply_position(&mut self, id: &EntityId, pos: Vec2) {
        let instance = PositionInstance { x: pos.x, y: pos.y };
        match self.slots.get(id) {
            Some(&slot) => self.instances[slot] = instance,
            None => {
                self.slots.insert(id.clone(), self.instances.len());
                self.ids.push(id.clone());
                self.instances.push(instance);
            }
        }
    }

    fn clear_position_override(&mut self, id: &EntityId) {
        let Some(slot) = self.slots.remove(id) else {
            return;
        };
        self.ids.swap_remove(slot);
        self.instances.swap_remove(slot);
        if let Some(moved) = self.ids.get(slot) {
            self.slots.insert(moved.clone(), slot);
        }
    }
}
