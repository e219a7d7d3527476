/// Crate-wide result alias.
pub type StrokecastResult<T> = Result<T, StrokecastError>;

/// Errors produced while building, rasterizing, or encoding an animation.
#[derive(thiserror::Error, Debug)]
pub enum StrokecastError {
    /// Configuration rejected before any frame work began.
    #[error("validation error: {0}")]
    Validation(String),

    /// A progress value outside `[0, 1]` reached the mapper.
    #[error("invalid progress: {0} is outside [0, 1]")]
    InvalidProgress(f64),

    /// Degenerate shape geometry (zero size, zero-length perimeter).
    #[error("invalid shape config: {0}")]
    InvalidShapeConfig(String),

    /// The output collaborator failed to persist frames.
    #[error("encode error: {0}")]
    Encode(String),

    /// JSON (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, with context attached.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StrokecastError {
    /// Build a [`StrokecastError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StrokecastError::InvalidShapeConfig`].
    pub fn shape(msg: impl Into<String>) -> Self {
        Self::InvalidShapeConfig(msg.into())
    }

    /// Build a [`StrokecastError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`StrokecastError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
