//! Error types for morphcloud.

use thiserror::Error;

/// The main error type for morphcloud setup and binding operations.
///
/// The per-frame tick never produces one of these; every variant is raised
/// while building target shapes or binding them to a controller.
#[derive(Error, Debug)]
pub enum MorphError {
    /// An argument was outside its accepted domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Input geometry could not be interpreted.
    #[error("parse error: {0}")]
    ParseError(String),

    /// The input set contained nothing to sample.
    #[error("empty input: {0}")]
    EmptyInput(String),

    /// Geometry exists but has no usable surface or perimeter.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// Segments, bindings or options are inconsistent.
    #[error("configuration error: {0}")]
    ConfigurationError(String),

    /// Particle count mismatch between a target shape and the live buffer.
    #[error("particle count mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// A target shape with the given id already exists.
    #[error("shape '{0}' already exists")]
    ShapeExists(String),

    /// A target shape with the given id was not found.
    #[error("shape '{0}' not found")]
    ShapeNotFound(String),

    /// JSON configuration error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl MorphError {
    /// Returns true for errors raised because the particle counts of a
    /// target and the live buffer disagree, or because bindings are invalid.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            MorphError::ConfigurationError(_)
                | MorphError::SizeMismatch { .. }
                | MorphError::ShapeNotFound(_)
        )
    }
}

/// A specialized Result type for morphcloud operations.
pub type Result<T> = std::result::Result<T, MorphError>;
