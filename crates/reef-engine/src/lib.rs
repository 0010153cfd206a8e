pub mod api;
pub mod core;
pub mod orbit;
pub mod controller;
pub mod renderer;
pub mod roster;
pub mod error;

// Re-export key types at crate root for convenience
pub use api::config::{Band, OrbitConfig};
pub use api::host::{EntitySource, FrameHost, ReefHost, RenderSink, ViewportSource};
pub use api::types::{EntityId, Viewport};
pub use controller::{AnimationController, AnimationState, TickOutcome};
pub use core::rng::{FixedSequence, Rng, UniformSource};
pub use core::scheduler::{FrameScheduler, FrameTicket};
pub use error::ReefError;
pub use orbit::{compute_position, OrbitDescriptor, OrbitGenerator, OrbitStore};
pub use renderer::buffer::{PositionBuffer, PositionInstance};
pub use roster::{export_file_name, Creature, Reef, ReefSnapshot};
