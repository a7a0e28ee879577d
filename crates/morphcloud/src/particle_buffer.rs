//! The live particle buffer.

use glam::Vec3;
use morphcloud_core::{MorphError, ParticleSet, Result};
use rand::Rng;

/// The single live array of particle positions.
///
/// Allocated once at a fixed count. Only [`crate::MorphController`] writes
/// to it; renderers read it between ticks through [`ParticleBuffer::positions`]
/// or the flat [`ParticleBuffer::as_flat`] view.
#[derive(Debug, Clone)]
pub struct ParticleBuffer {
    positions: ParticleSet,
}

impl ParticleBuffer {
    /// Creates `count` particles scattered uniformly in the box
    /// `[-extent, extent]`, the unformed state before any morph.
    pub fn dispersed<R: Rng>(count: usize, extent: Vec3, rng: &mut R) -> Result<Self> {
        if count == 0 {
            return Err(MorphError::InvalidArgument(
                "particle count must be positive".to_string(),
            ));
        }
        if !extent.is_finite() || extent.min_element() < 0.0 {
            return Err(MorphError::InvalidArgument(format!(
                "dispersal extent must be finite and non-negative, got {extent}"
            )));
        }
        let positions = (0..count)
            .map(|_| {
                let unit = Vec3::new(rng.gen::<f32>(), rng.gen::<f32>(), rng.gen::<f32>());
                (unit * 2.0 - Vec3::ONE) * extent
            })
            .collect::<Vec<_>>();
        Ok(Self {
            positions: ParticleSet::new(positions),
        })
    }

    /// Wraps an existing particle set as the live buffer.
    pub fn from_set(positions: ParticleSet) -> Result<Self> {
        if positions.is_empty() {
            return Err(MorphError::InvalidArgument(
                "particle count must be positive".to_string(),
            ));
        }
        if !positions.is_finite() {
            return Err(MorphError::InvalidArgument(
                "initial particle positions must be finite".to_string(),
            ));
        }
        Ok(Self { positions })
    }

    /// Returns the number of particles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Always false: empty buffers are rejected at construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Returns the particle positions.
    #[must_use]
    pub fn positions(&self) -> &[Vec3] {
        self.positions.points()
    }

    /// Returns the positions as `N × 3` floats for upload.
    #[must_use]
    pub fn as_flat(&self) -> &[f32] {
        self.positions.as_flat()
    }

    /// Returns the positions as a particle set.
    #[must_use]
    pub fn as_set(&self) -> &ParticleSet {
        &self.positions
    }

    pub(crate) fn positions_mut(&mut self) -> &mut [Vec3] {
        self.positions.points_mut()
    }
}
