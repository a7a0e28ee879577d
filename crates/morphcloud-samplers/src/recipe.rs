//! Building complete target shape sets.
//!
//! Targets have no data dependency on one another, so each recipe carries
//! its own seed and can be built on any thread. With the `parallel`
//! feature enabled the recipes are built with rayon; output is identical
//! either way.

use glam::Vec3;
use morphcloud_core::{MorphError, Result, ShapeId, ShapeRegistry, TargetShape};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::mesh_surface::{MeshSurfaceSampler, TriangleMesh};
use crate::vector_path::{OutlineShape, VectorPathSampler, VectorSamplerOptions};

/// Geometry a target is sampled from.
#[derive(Debug, Clone)]
pub enum TargetSource {
    /// Flat vector outlines.
    Outlines {
        /// Outline shapes.
        shapes: Vec<OutlineShape>,
        /// Sampler options; the point count is overridden by the build.
        options: VectorSamplerOptions,
    },
    /// Triangle mesh surfaces.
    Meshes {
        /// Meshes, sampled in order.
        meshes: Vec<TriangleMesh>,
    },
}

/// Everything needed to build one [`TargetShape`].
#[derive(Debug, Clone)]
pub struct TargetRecipe {
    /// Shape id.
    pub id: ShapeId,
    /// Accent color.
    pub color: Vec3,
    /// Seed for this target's random source.
    pub seed: u64,
    /// Geometry to sample.
    pub source: TargetSource,
}

impl TargetRecipe {
    /// Creates a recipe sampling vector outlines.
    pub fn outlines(
        id: impl Into<ShapeId>,
        color: Vec3,
        seed: u64,
        shapes: Vec<OutlineShape>,
        options: VectorSamplerOptions,
    ) -> Self {
        Self {
            id: id.into(),
            color,
            seed,
            source: TargetSource::Outlines { shapes, options },
        }
    }

    /// Creates a recipe sampling mesh surfaces.
    pub fn meshes(id: impl Into<ShapeId>, color: Vec3, seed: u64, meshes: Vec<TriangleMesh>) -> Self {
        Self {
            id: id.into(),
            color,
            seed,
            source: TargetSource::Meshes { meshes },
        }
    }

    /// Samples this recipe into a target of exactly `point_count` points.
    ///
    /// Mesh samples that fall short of `point_count` are padded by
    /// repeating their points in order.
    pub fn build(&self, point_count: usize) -> Result<TargetShape> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let points = match &self.source {
            TargetSource::Outlines { shapes, options } => {
                let options = options.clone().with_point_count(point_count);
                VectorPathSampler::new(shapes.clone(), options)?.sample(&mut rng)
            }
            TargetSource::Meshes { meshes } => {
                let sampler = MeshSurfaceSampler::new(meshes.clone())?;
                let sampled = sampler.sample(point_count, &mut rng)?;
                if sampled.len() < point_count {
                    log::info!(
                        "padding mesh target '{}' from {} to {point_count} points",
                        self.id,
                        sampled.len()
                    );
                    sampled.cycled_to(point_count)?
                } else {
                    sampled
                }
            }
        };
        log::info!("built target '{}' with {} points", self.id, points.len());
        TargetShape::new(self.id.clone(), points, self.color)
    }
}

/// Builds every recipe at `point_count` points, preserving recipe order.
pub fn build_target_shapes(recipes: &[TargetRecipe], point_count: usize) -> Result<Vec<TargetShape>> {
    if point_count == 0 {
        return Err(MorphError::InvalidArgument(
            "point_count must be positive".to_string(),
        ));
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        recipes
            .par_iter()
            .map(|recipe| recipe.build(point_count))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        recipes
            .iter()
            .map(|recipe| recipe.build(point_count))
            .collect()
    }
}

/// Builds every recipe and registers the results.
pub fn build_registry(recipes: &[TargetRecipe], point_count: usize) -> Result<ShapeRegistry> {
    let mut registry = ShapeRegistry::new(point_count);
    for shape in build_target_shapes(recipes, point_count)? {
        registry.register(shape)?;
    }
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector_path::FillRule;
    use glam::{UVec3, Vec2};

    fn triangle_outline() -> OutlineShape {
        OutlineShape::polygon(
            vec![Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0), Vec2::new(2.0, 3.0)],
            FillRule::NonZero,
        )
        .unwrap()
    }

    fn tetra() -> TriangleMesh {
        TriangleMesh::new(
            "tetra",
            vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z],
            vec![
                UVec3::new(0, 1, 2),
                UVec3::new(0, 1, 3),
                UVec3::new(0, 2, 3),
                UVec3::new(1, 2, 3),
            ],
        )
        .unwrap()
    }

    fn recipes() -> Vec<TargetRecipe> {
        vec![
            TargetRecipe::outlines(
                "icon",
                Vec3::X,
                1,
                vec![triangle_outline()],
                VectorSamplerOptions::default(),
            ),
            TargetRecipe::meshes("solid", Vec3::Y, 2, vec![tetra(), tetra()]),
        ]
    }

    #[test]
    fn test_build_exact_counts() {
        // 301 is odd, so the two meshes leave one point of shortfall to pad.
        let shapes = build_target_shapes(&recipes(), 301).unwrap();
        assert_eq!(shapes.len(), 2);
        assert!(shapes.iter().all(|s| s.len() == 301));
        assert_eq!(shapes[0].id().as_str(), "icon");
        assert_eq!(shapes[1].color(), Vec3::Y);
    }

    #[test]
    fn test_build_is_deterministic() {
        let a = build_target_shapes(&recipes(), 128).unwrap();
        let b = build_target_shapes(&recipes(), 128).unwrap();
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.points(), y.points());
        }
    }

    #[test]
    fn test_build_registry() {
        let registry = build_registry(&recipes(), 64).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.point_count(), 64);
        assert!(build_registry(&recipes(), 0).is_err());
    }

    #[test]
    fn test_mesh_recipe_with_too_few_points() {
        let quad = TriangleMesh::new(
            "quad",
            vec![Vec3::ZERO, Vec3::X, Vec3::new(1.0, 1.0, 0.0), Vec3::Y],
            vec![UVec3::new(0, 1, 2), UVec3::new(0, 2, 3)],
        )
        .unwrap();
        let recipe =
            TargetRecipe::meshes("quads", Vec3::ONE, 9, vec![quad.clone(), quad.clone(), quad]);
        let err = build_registry(&[recipe], 2).unwrap_err();
        assert!(matches!(err, MorphError::InvalidArgument(_)), "{err}");
    }
}
