use glam::Vec2;

/// Motion parameters of one creature. Generated once per session, never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitDescriptor {
    /// Orbit center in viewport coordinates.
    pub center: Vec2,
    /// Base orbit radius.
    pub radius: f32,
    /// Radians per second around the orbit.
    pub angular_speed: f32,
    /// Initial angular offset.
    pub phase: f32,
    /// Amplitude of the radius oscillation.
    pub wobble: f32,
    /// Angular speed of the center drift.
    pub drift_speed: f32,
    /// Phase offset of the center drift.
    pub drift_phase: f32,
}
