use thiserror::Error;

/// Conditions under which the sphere does not start. None of them are
/// raised after initialization.
#[derive(Debug, Error)]
pub enum SphereError {
    #[error("missing element #{0}")]
    MissingElement(&'static str),
    #[error("rendering unavailable: {0}")]
    RenderingUnavailable(String),
    #[error("invalid sphere config: {0}")]
    InvalidConfig(String),
}
