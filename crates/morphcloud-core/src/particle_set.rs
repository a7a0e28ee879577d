//! Fixed-length point sets.

use glam::{DVec3, Vec3};

use crate::error::{MorphError, Result};

/// A fixed-length sequence of 3D points.
///
/// Backed by a single boxed slice: the length is decided once at
/// construction and never changes afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleSet {
    points: Box<[Vec3]>,
}

impl ParticleSet {
    /// Creates a particle set from already computed points.
    pub fn new(points: Vec<Vec3>) -> Self {
        Self {
            points: points.into_boxed_slice(),
        }
    }

    /// Creates a particle set of `len` copies of `value`.
    pub fn filled(len: usize, value: Vec3) -> Self {
        Self {
            points: vec![value; len].into_boxed_slice(),
        }
    }

    /// Returns the number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the set holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the points.
    #[must_use]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Returns the points mutably. The length stays fixed.
    pub fn points_mut(&mut self) -> &mut [Vec3] {
        &mut self.points
    }

    /// Returns the points as a flat `x, y, z, x, y, z, ...` slice.
    #[must_use]
    pub fn as_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.points)
    }

    /// Computes the mean of all points.
    ///
    /// Accumulates in double precision so large sets recentre accurately.
    /// Returns `None` for an empty set.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn centroid(&self) -> Option<Vec3> {
        if self.points.is_empty() {
            return None;
        }
        let sum = self
            .points
            .iter()
            .fold(DVec3::ZERO, |acc, p| acc + p.as_dvec3());
        Some((sum / self.points.len() as f64).as_vec3())
    }

    /// Translates every point so the centroid sits at the origin.
    pub fn recenter(&mut self) {
        if let Some(center) = self.centroid() {
            for p in self.points.iter_mut() {
                *p -= center;
            }
        }
    }

    /// Computes the axis-aligned bounding box as `(min, max)`.
    #[must_use]
    pub fn bounding_box(&self) -> Option<(Vec3, Vec3)> {
        if self.points.is_empty() {
            return None;
        }
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for p in self.points.iter() {
            min = min.min(*p);
            max = max.max(*p);
        }
        Some((min, max))
    }

    /// Returns true if every coordinate is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.points.iter().all(|p| p.is_finite())
    }

    /// Returns a set of exactly `len` points by repeating this set's points
    /// in order.
    ///
    /// Mesh sampling may legitimately fall short of the requested count;
    /// callers that need an exact count opt into padding explicitly here.
    /// Truncates if `len` is smaller than the current length.
    pub fn cycled_to(&self, len: usize) -> Result<Self> {
        if self.points.is_empty() && len > 0 {
            return Err(MorphError::EmptyInput(
                "cannot pad an empty particle set".to_string(),
            ));
        }
        let points: Vec<Vec3> = self.points.iter().copied().cycle().take(len).collect();
        Ok(Self::new(points))
    }
}

impl From<Vec<Vec3>> for ParticleSet {
    fn from(points: Vec<Vec3>) -> Self {
        Self::new(points)
    }
}
