use glam::Vec2;
use log::trace;
use crate::api::config::{OrbitConfig, PHASE_BAND};
use crate::api::types::Viewport;
use crate::core::rng::UniformSource;
use super::descriptor::OrbitDescriptor;

/// Draws randomized orbit descriptors sized to a viewport.
#[derive(Debug, Clone, Default)]
pub struct OrbitGenerator {
    config: OrbitConfig,
}

impl OrbitGenerator {
    pub fn new(config: OrbitConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OrbitConfig {
        &self.config
    }

    /// Generate one descriptor. The viewport must not be degenerate; the
    /// controller defers the whole tick before reaching this point.
    ///
    /// Samples are drawn in field order: center x, center y, radius,
    /// angular speed, phase, wobble, drift speed, drift phase.
    pub fn generate(&self, viewport: Viewport, rng: &mut impl UniformSource) -> OrbitDescriptor {
        let cfg = &self.config;
        let min_dim = viewport.min_dim();
        let padding = cfg.padding_for(min_dim);

        let span_x = (viewport.width - padding * 2.0).max(1.0);
        let span_y = (viewport.height - padding * 2.0).max(1.0);
        let center = Vec2::new(
            padding + rng.next_unit() * span_x,
            padding + rng.next_unit() * span_y,
        );
        let radius = (min_dim * cfg.radius_ratio.sample(rng.next_unit())).max(cfg.min_radius);

        let orbit = OrbitDescriptor {
            center,
            radius,
            angular_speed: cfg.angular_speed.sample(rng.next_unit()),
            phase: PHASE_BAND.sample(rng.next_unit()),
            wobble: cfg.wobble.sample(rng.next_unit()),
            drift_speed: cfg.drift_speed.sample(rng.next_unit()),
            drift_phase: PHASE_BAND.sample(rng.next_unit()),
        };
        trace!("orbit generated for {}x{}: {:?}", viewport.width, viewport.height, orbit);
        orbit
    }
}
