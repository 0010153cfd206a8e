use std::fmt;

/// Stable identifier for one creature on the board.
/// Supplied by the host (e.g. the element's `data-id`), never minted by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Size of the area creatures swim in, in the render layer's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True until the host has laid the area out. NaN sizes count as degenerate.
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// The shorter side.
    pub fn min_dim(&self) -> f32 {
        self.width.min(self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_and_nan_viewports_are_degenerate() {
        assert!(Viewport::new(0.0, 300.0).is_degenerate());
        assert!(Viewport::new(400.0, 0.0).is_degenerate());
        assert!(Viewport::new(f32::NAN, 300.0).is_degenerate());
        assert!(Viewport::default().is_degenerate());
        assert!(!Viewport::new(400.0, 300.0).is_degenerate());
    }

    #[test]
    fn entity_id_displays_raw_string() {
        let id = EntityId::from("1712345678901.25");
        assert_eq!(id.to_string(), "1712345678901.25");
        assert_eq!(id.as_str(), "1712345678901.25");
    }
}
