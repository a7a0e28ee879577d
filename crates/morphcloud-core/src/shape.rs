//! Target shapes: immutable particle sets with an identity and accent color.

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{MorphError, Result};
use crate::particle_set::ParticleSet;

/// Identity of a target shape (for example `"brain"` or `"globe"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeId(String);

impl ShapeId {
    /// Creates a new shape id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ShapeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ShapeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A named, immutable point cloud that the live buffer morphs toward.
#[derive(Debug, Clone)]
pub struct TargetShape {
    id: ShapeId,
    points: ParticleSet,
    color: Vec3,
}

impl TargetShape {
    /// Creates a target shape.
    ///
    /// Fails if the set is empty or holds non-finite coordinates.
    pub fn new(id: impl Into<ShapeId>, points: ParticleSet, color: Vec3) -> Result<Self> {
        let id = id.into();
        if points.is_empty() {
            return Err(MorphError::EmptyInput(format!("target shape '{id}' has no points")));
        }
        if !points.is_finite() {
            return Err(MorphError::InvalidArgument(format!(
                "target shape '{id}' contains non-finite coordinates"
            )));
        }
        Ok(Self { id, points, color })
    }

    /// Returns the shape id.
    #[must_use]
    pub fn id(&self) -> &ShapeId {
        &self.id
    }

    /// Returns the particle set.
    #[must_use]
    pub fn points(&self) -> &ParticleSet {
        &self.points
    }

    /// Returns the number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false: empty shapes are rejected at construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the accent color bound to this shape.
    #[must_use]
    pub fn color(&self) -> Vec3 {
        self.color
    }
}
