use thiserror::Error;

/// Errors surfaced by the reef engine outside the animation hot path.
#[derive(Debug, Error)]
pub enum ReefError {
    /// A config or roster document was not valid JSON for its schema.
    #[error("invalid reef JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A config parsed but describes impossible geometry.
    #[error("invalid orbit config: {0}")]
    InvalidConfig(String),
}
