use std::f32::consts::TAU;
use serde::{Deserialize, Serialize};
use crate::error::ReefError;

/// Closed range a random parameter is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub min: f32,
    pub max: f32,
}

impl Band {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Map a unit sample `u` in [0, 1) onto the band.
    pub fn sample(&self, u: f32) -> f32 {
        self.min + u * (self.max - self.min)
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Tuning for orbit generation and motion, provided by the host.
/// Every field has a default, so a partial JSON document is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    /// Padding as a fraction of the viewport's shorter side (default: 0.12).
    pub padding_ratio: f32,
    /// Lower clamp for the padding (default: 18).
    pub min_padding: f32,
    /// Upper clamp for the padding (default: 40).
    pub max_padding: f32,
    /// Orbit radius as a fraction of the shorter side (default: 0.05..0.14).
    pub radius_ratio: Band,
    /// Radius floor (default: 10).
    pub min_radius: f32,
    /// Radians per second around the orbit (default: 1.1..2.4).
    pub angular_speed: Band,
    /// Amplitude of the radius oscillation (default: 4..14).
    pub wobble: Band,
    /// Angular speed of the slow center drift (default: 0.12..0.37).
    pub drift_speed: Band,
    /// Frequency multiplier of the radius oscillation (default: 2).
    pub wobble_frequency: f32,
    /// Radius of the center drift circle (default: 8).
    pub drift_amplitude: f32,
    /// Distance kept from every viewport edge (default: 24).
    pub edge_margin: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            padding_ratio: 0.12,
            min_padding: 18.0,
            max_padding: 40.0,
            radius_ratio: Band::new(0.05, 0.14),
            min_radius: 10.0,
            angular_speed: Band::new(1.1, 2.4),
            wobble: Band::new(4.0, 14.0),
            drift_speed: Band::new(0.12, 0.37),
            wobble_frequency: 2.0,
            drift_amplitude: 8.0,
            edge_margin: 24.0,
        }
    }
}

/// Range every phase is drawn from.
pub const PHASE_BAND: Band = Band::new(0.0, TAU);

impl OrbitConfig {
    /// Parse and validate a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ReefError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Padding kept between generated orbit centers and the viewport edges.
    pub fn padding_for(&self, min_dim: f32) -> f32 {
        (min_dim * self.padding_ratio).max(self.min_padding).min(self.max_padding)
    }

    /// Reject configs that could produce a non-positive radius or inverted ranges.
    pub fn validate(&self) -> Result<(), ReefError> {
        let bands = [
            ("radius_ratio", self.radius_ratio),
            ("angular_speed", self.angular_speed),
            ("wobble", self.wobble),
            ("drift_speed", self.drift_speed),
        ];
        for (name, band) in bands {
            if !(band.min <= band.max) {
                return Err(ReefError::InvalidConfig(format!(
                    "{name}: min {} exceeds max {}",
                    band.min, band.max
                )));
            }
        }
        if !(self.min_radius > 0.0) {
            return Err(ReefError::InvalidConfig(format!(
                "min_radius must be positive, got {}",
                self.min_radius
            )));
        }
        if !(self.min_padding >= 0.0 && self.min_padding <= self.max_padding) {
            return Err(ReefError::InvalidConfig(format!(
                "padding clamp [{}, {}] is not a valid range",
                self.min_padding, self.max_padding
            )));
        }
        if !(self.edge_margin >= 0.0) {
            return Err(ReefError::InvalidConfig(format!(
                "edge_margin must not be negative, got {}",
                self.edge_margin
            )));
        }
        Ok(())
    }
}
