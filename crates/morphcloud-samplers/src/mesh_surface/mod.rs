//! Mesh surface sampler.
//!
//! Distributes a point budget evenly across a set of triangle meshes and,
//! within each mesh, uniformly over its surface area.

mod distribution;

use glam::{UVec3, Vec3};
use morphcloud_core::{MorphError, ParticleSet, Result, Transform};
use rand::Rng;

use distribution::{sample_triangle, AreaDistribution};

/// A named triangle mesh with its world placement.
#[derive(Debug, Clone)]
pub struct TriangleMesh {
    name: String,
    vertices: Vec<Vec3>,
    triangles: Vec<UVec3>,
    transform: Transform,
    scale: f32,
}

impl TriangleMesh {
    /// Creates a mesh with an identity transform and unit scale.
    ///
    /// Fails with [`MorphError::ParseError`] if a triangle references a
    /// missing vertex or a vertex is not finite.
    pub fn new(name: impl Into<String>, vertices: Vec<Vec3>, triangles: Vec<UVec3>) -> Result<Self> {
        let name = name.into();
        if let Some(v) = vertices.iter().find(|v| !v.is_finite()) {
            return Err(MorphError::ParseError(format!(
                "mesh '{name}' has a non-finite vertex {v}"
            )));
        }
        let vertex_count = vertices.len();
        if let Some(tri) = triangles
            .iter()
            .find(|t| t.max_element() as usize >= vertex_count)
        {
            return Err(MorphError::ParseError(format!(
                "mesh '{name}' triangle {tri} references a vertex beyond {vertex_count}"
            )));
        }
        Ok(Self {
            name,
            vertices,
            triangles,
            transform: Transform::identity(),
            scale: 1.0,
        })
    }

    /// Sets the world transform.
    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Sets the multiplier applied after the world transform.
    #[must_use]
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Returns the mesh name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the vertices.
    #[must_use]
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Returns the triangles.
    #[must_use]
    pub fn triangles(&self) -> &[UVec3] {
        &self.triangles
    }

    /// Returns the world transform.
    #[must_use]
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Returns the post-transform scale.
    #[must_use]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Total surface area in local coordinates.
    #[must_use]
    pub fn surface_area(&self) -> f64 {
        AreaDistribution::new(&self.vertices, &self.triangles).total()
    }
}

/// A mesh prepared for sampling.
#[derive(Debug, Clone)]
struct PreparedMesh {
    mesh: TriangleMesh,
    distribution: AreaDistribution,
}

impl PreparedMesh {
    fn sample_point<R: Rng>(&self, rng: &mut R) -> Vec3 {
        let tri = self.mesh.triangles[self.distribution.pick(rng)];
        let v = &self.mesh.vertices;
        let local = sample_triangle(v[tri.x as usize], v[tri.y as usize], v[tri.z as usize], rng);
        self.mesh.transform.transform_point(local) * self.mesh.scale
    }
}

/// Samples a set of meshes into one particle set.
///
/// Meshes without any positive-area triangle are skipped at construction
/// and reported through [`MeshSurfaceSampler::skipped`].
#[derive(Debug, Clone)]
pub struct MeshSurfaceSampler {
    meshes: Vec<PreparedMesh>,
    skipped: Vec<String>,
}

impl MeshSurfaceSampler {
    /// Prepares area distributions for every usable mesh.
    ///
    /// Fails with [`MorphError::EmptyInput`] for an empty list and with
    /// [`MorphError::DegenerateGeometry`] if no mesh has positive area.
    pub fn new(meshes: Vec<TriangleMesh>) -> Result<Self> {
        if meshes.is_empty() {
            return Err(MorphError::EmptyInput("no meshes to sample".to_string()));
        }
        let total = meshes.len();
        let mut prepared = Vec::with_capacity(total);
        let mut skipped = Vec::new();
        for mesh in meshes {
            let distribution = AreaDistribution::new(&mesh.vertices, &mesh.triangles);
            let reason = if !mesh.transform.is_finite() {
                Some("non-finite transform")
            } else if !mesh.scale.is_finite() {
                Some("non-finite scale")
            } else if distribution.total() <= 0.0 {
                Some("no positive-area triangles")
            } else {
                None
            };
            match reason {
                None => prepared.push(PreparedMesh { mesh, distribution }),
                Some(reason) => {
                    log::warn!(
                        "skipping mesh '{}': {}",
                        mesh.name,
                        MorphError::DegenerateGeometry(reason.to_string())
                    );
                    skipped.push(mesh.name);
                }
            }
        }
        if prepared.is_empty() {
            return Err(MorphError::DegenerateGeometry(format!(
                "none of {total} meshes is usable"
            )));
        }
        Ok(Self {
            meshes: prepared,
            skipped,
        })
    }

    /// Number of meshes that will receive points.
    #[must_use]
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// Names of meshes skipped for having no surface area or a non-finite
    /// placement.
    #[must_use]
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    /// Points each mesh receives for a given budget.
    ///
    /// Integer division: the remainder of `point_budget / mesh_count` is
    /// not redistributed, so the result may hold fewer than `point_budget`
    /// points.
    #[must_use]
    pub fn per_mesh_count(&self, point_budget: usize) -> usize {
        point_budget / self.meshes.len()
    }

    /// Samples up to `point_budget` points, meshes in input order.
    pub fn sample<R: Rng>(&self, point_budget: usize, rng: &mut R) -> Result<ParticleSet> {
        if point_budget < self.meshes.len() {
            return Err(MorphError::InvalidArgument(format!(
                "point budget {point_budget} is smaller than the {} usable meshes",
                self.meshes.len()
            )));
        }
        let per_mesh = self.per_mesh_count(point_budget);
        let mut points = Vec::with_capacity(per_mesh * self.meshes.len());
        for prepared in &self.meshes {
            for _ in 0..per_mesh {
                points.push(prepared.sample_point(rng));
            }
        }
        let shortfall = point_budget - points.len();
        if shortfall > 0 {
            log::debug!(
                "mesh sampler produced {} of {point_budget} points across {} meshes",
                points.len(),
                self.meshes.len()
            );
        }
        Ok(ParticleSet::new(points))
    }
}

/// Convenience wrapper: prepares the meshes and samples once.
pub fn sample_mesh_surfaces<R: Rng>(
    meshes: Vec<TriangleMesh>,
    point_budget: usize,
    rng: &mut R,
) -> Result<ParticleSet> {
    MeshSurfaceSampler::new(meshes)?.sample(point_budget, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn unit_quad(name: &str) -> TriangleMesh {
        TriangleMesh::new(
            name,
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            vec![UVec3::new(0, 1, 2), UVec3::new(0, 2, 3)],
        )
        .unwrap()
    }

    fn flat_mesh(name: &str) -> TriangleMesh {
        TriangleMesh::new(
            name,
            vec![Vec3::ZERO, Vec3::X, Vec3::new(2.0, 0.0, 0.0)],
            vec![UVec3::new(0, 1, 2)],
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_bad_indices() {
        let result = TriangleMesh::new("bad", vec![Vec3::ZERO], vec![UVec3::new(0, 1, 2)]);
        assert!(matches!(result, Err(MorphError::ParseError(_))));
    }

    #[test]
    fn test_empty_and_degenerate_sets() {
        assert!(matches!(
            MeshSurfaceSampler::new(Vec::new()),
            Err(MorphError::EmptyInput(_))
        ));
        assert!(matches!(
            MeshSurfaceSampler::new(vec![flat_mesh("line")]),
            Err(MorphError::DegenerateGeometry(_))
        ));
    }

    #[test]
    fn test_skips_degenerate_mesh() {
        let sampler =
            MeshSurfaceSampler::new(vec![unit_quad("a"), flat_mesh("line"), unit_quad("b")])
                .unwrap();
        assert_eq!(sampler.mesh_count(), 2);
        assert_eq!(sampler.skipped(), &["line".to_string()]);
    }

    #[test]
    fn test_integer_division_shortfall() {
        let sampler =
            MeshSurfaceSampler::new(vec![unit_quad("a"), unit_quad("b"), unit_quad("c")]).unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        let set = sampler.sample(100, &mut rng).unwrap();
        assert_eq!(set.len(), 99);
    }

    #[test]
    fn test_budget_smaller_than_mesh_count() {
        let sampler =
            MeshSurfaceSampler::new(vec![unit_quad("a"), unit_quad("b"), unit_quad("c")]).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let err = sampler.sample(2, &mut rng).unwrap_err();
        assert!(matches!(&err, MorphError::InvalidArgument(m) if m.contains('2') && m.contains('3')));
        assert!(matches!(sampler.sample(0, &mut rng), Err(MorphError::InvalidArgument(_))));
        assert_eq!(sampler.sample(3, &mut rng).unwrap().len(), 3);
    }

    #[test]
    fn test_skips_mesh_with_non_finite_placement() {
        let sampler = MeshSurfaceSampler::new(vec![
            unit_quad("ok"),
            unit_quad("nan_scale").with_scale(f32::NAN),
            unit_quad("inf_move").with_transform(Transform::from_translation(Vec3::INFINITY)),
        ])
        .unwrap();
        assert_eq!(sampler.mesh_count(), 1);
        assert_eq!(sampler.skipped(), &["nan_scale".to_string(), "inf_move".to_string()]);
    }

    #[test]
    fn test_mesh_order_and_scale() {
        let far = unit_quad("far")
            .with_transform(Transform::from_translation(Vec3::new(10.0, 0.0, 0.0)))
            .with_scale(2.0);
        let sampler = MeshSurfaceSampler::new(vec![unit_quad("near"), far]).unwrap();
        let set = sampler.sample(200, &mut StdRng::seed_from_u64(4)).unwrap();
        let (near, far) = set.points().split_at(100);
        assert!(near.iter().all(|p| p.x <= 1.0 + 1e-6));
        // Translated to x in [10, 11], then doubled.
        assert!(far.iter().all(|p| p.x >= 20.0 - 1e-4 && p.x <= 22.0 + 1e-4));
    }

    #[test]
    fn test_rotated_plane() {
        let transform = Transform {
            translation: Vec3::new(1.0, -2.0, 0.5),
            rotation: Quat::from_rotation_x(0.9),
            scale: Vec3::ONE,
        };
        let normal = transform.rotation * Vec3::Z;
        let sampler =
            MeshSurfaceSampler::new(vec![unit_quad("tilted").with_transform(transform)]).unwrap();
        let set = sampler.sample(1000, &mut StdRng::seed_from_u64(8)).unwrap();
        for p in set.points() {
            let distance = (*p - transform.translation).dot(normal);
            assert!(distance.abs() < 1e-4, "distance {distance}");
        }
    }
}
