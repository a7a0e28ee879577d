//! Shape registry mapping shape ids to target shapes.

use std::collections::HashMap;

use crate::error::{MorphError, Result};
use crate::shape::{ShapeId, TargetShape};

/// Registry for the target shapes a controller can morph between.
///
/// Every registered shape must hold exactly `point_count` points, so
/// count mismatches surface here at setup instead of inside the tick.
#[derive(Debug, Default)]
pub struct ShapeRegistry {
    point_count: usize,
    shapes: HashMap<ShapeId, TargetShape>,
}

impl ShapeRegistry {
    /// Creates an empty registry for shapes of `point_count` points.
    pub fn new(point_count: usize) -> Self {
        Self {
            point_count,
            shapes: HashMap::new(),
        }
    }

    /// Returns the particle count every shape must have.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.point_count
    }

    /// Registers a target shape.
    ///
    /// Returns an error if a shape with the same id already exists or if
    /// the shape's point count differs from the registry's.
    pub fn register(&mut self, shape: TargetShape) -> Result<()> {
        if shape.len() != self.point_count {
            return Err(MorphError::SizeMismatch {
                expected: self.point_count,
                actual: shape.len(),
            });
        }
        if self.shapes.contains_key(shape.id()) {
            return Err(MorphError::ShapeExists(shape.id().to_string()));
        }
        log::debug!("registered target shape '{}'", shape.id());
        self.shapes.insert(shape.id().clone(), shape);
        Ok(())
    }

    /// Gets a shape by id.
    #[must_use]
    pub fn get(&self, id: &ShapeId) -> Option<&TargetShape> {
        self.shapes.get(id)
    }

    /// Gets a shape by id, failing with [`MorphError::ShapeNotFound`].
    pub fn require(&self, id: &ShapeId) -> Result<&TargetShape> {
        self.get(id)
            .ok_or_else(|| MorphError::ShapeNotFound(id.to_string()))
    }

    /// Checks if a shape with the given id exists.
    #[must_use]
    pub fn contains(&self, id: &ShapeId) -> bool {
        self.shapes.contains_key(id)
    }

    /// Removes a shape by id.
    pub fn remove(&mut self, id: &ShapeId) -> Option<TargetShape> {
        self.shapes.remove(id)
    }

    /// Removes all shapes.
    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    /// Returns an iterator over all shapes.
    pub fn iter(&self) -> impl Iterator<Item = &TargetShape> {
        self.shapes.values()
    }

    /// Returns the number of registered shapes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Returns true if no shapes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
