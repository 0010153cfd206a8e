//! Collaborator contracts the controller talks to.
//! The engine never touches a DOM or a clock directly; hosts implement these.

use glam::Vec2;
use crate::api::types::{EntityId, Viewport};
use crate::core::scheduler::FrameTicket;

/// Lists the creatures currently on the board, queried once per tick.
pub trait EntitySource {
    fn active_entity_ids(&self) -> Vec<EntityId>;
}

/// Reports the swim area's size, queried once per tick.
pub trait ViewportSource {
    fn viewport_size(&self) -> Viewport;
}

/// Receives position updates. Called every tick for every listed entity.
pub trait RenderSink {
    /// Place the entity's center at `pos` (viewport coordinates).
    fn apply_position(&mut self, id: &EntityId, pos: Vec2);
    /// Drop any override so the entity returns to its static layout.
    fn clear_position_override(&mut self, id: &EntityId);
}

/// Platform frame callback (e.g. `requestAnimationFrame`).
///
/// The host must hand the same ticket back to the controller when the frame
/// fires. At most one request is outstanding at a time.
pub trait FrameHost {
    /// Register a frame request. Returns `false` if the platform refused it,
    /// in which case the ticket will never fire.
    fn request_frame(&mut self, ticket: FrameTicket) -> bool;
    /// Unregister a pending request. Cancelling an unknown ticket is a no-op.
    fn cancel_frame(&mut self, ticket: FrameTicket);
}

/// Everything the controller needs from its environment.
pub trait ReefHost: EntitySource + ViewportSource + RenderSink + FrameHost {}

impl<T> ReefHost for T where T: EntitySource + ViewportSource + RenderSink + FrameHost {}
