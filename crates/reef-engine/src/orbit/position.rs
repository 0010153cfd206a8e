use glam::Vec2;
use crate::api::config::OrbitConfig;
use crate::api::types::Viewport;
use super::descriptor::OrbitDescriptor;

/// Position of a creature `elapsed` seconds into the session.
///
/// Pure: identical inputs give bit-identical output. The result is clamped to
/// `[margin, max(margin, side - margin)]` on both axes.
pub fn compute_position(
    orbit: &OrbitDescriptor,
    elapsed: f32,
    viewport: Viewport,
    config: &OrbitConfig,
) -> Vec2 {
    let angle = elapsed * orbit.angular_speed + orbit.phase;
    let radius_wobble = (elapsed * config.wobble_frequency + orbit.phase).sin() * orbit.wobble;
    let drift_angle = elapsed * orbit.drift_speed + orbit.drift_phase;
    let drift = Vec2::new(drift_angle.cos(), drift_angle.sin()) * config.drift_amplitude;

    let x = orbit.center.x + drift.x + angle.cos() * (orbit.radius + radius_wobble);
    let y = orbit.center.y + drift.y + angle.sin() * orbit.radius;

    let margin = config.edge_margin;
    Vec2::new(
        clamp_axis(x, margin, viewport.width),
        clamp_axis(y, margin, viewport.height),
    )
}

/// Clamp into `[margin, max(margin, extent - margin)]` without ever inverting the range.
fn clamp_axis(value: f32, margin: f32, extent: f32) -> f32 {
    value.max(margin).min((extent - margin).max(margin))
}
