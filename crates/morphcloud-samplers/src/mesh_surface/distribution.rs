//! Area-weighted triangle selection.

use glam::{UVec3, Vec3};
use rand::Rng;

/// Prefix sum of triangle areas.
///
/// A uniform draw in `[0, total)` lands in triangle `i` with probability
/// `area_i / total`; lookup is a binary search over the prefix sum.
#[derive(Debug, Clone)]
pub(crate) struct AreaDistribution {
    cumulative: Vec<f64>,
    total: f64,
}

/// Area of the triangle `a, b, c`.
pub(crate) fn triangle_area(a: Vec3, b: Vec3, c: Vec3) -> f32 {
    (b - a).cross(c - a).length() * 0.5
}

impl AreaDistribution {
    /// Builds the distribution over `triangles` indexing into `vertices`.
    pub(crate) fn new(vertices: &[Vec3], triangles: &[UVec3]) -> Self {
        let mut cumulative = Vec::with_capacity(triangles.len());
        let mut total = 0.0_f64;
        for tri in triangles {
            let area = triangle_area(
                vertices[tri.x as usize],
                vertices[tri.y as usize],
                vertices[tri.z as usize],
            );
            if area.is_finite() {
                total += f64::from(area);
            }
            cumulative.push(total);
        }
        Self { cumulative, total }
    }

    /// Total surface area.
    pub(crate) fn total(&self) -> f64 {
        self.total
    }

    /// Returns the triangle containing the cumulative position `r`.
    ///
    /// Zero-area triangles occupy an empty interval and are never returned
    /// for `r` in `[0, total)`.
    pub(crate) fn index_at(&self, r: f64) -> usize {
        self.cumulative
            .partition_point(|&c| c <= r)
            .min(self.cumulative.len().saturating_sub(1))
    }

    /// Draws a triangle index with probability proportional to area.
    pub(crate) fn pick<R: Rng>(&self, rng: &mut R) -> usize {
        self.index_at(rng.gen::<f64>() * self.total)
    }
}

/// Uniform random point on the triangle `a, b, c`.
pub(crate) fn sample_triangle<R: Rng>(a: Vec3, b: Vec3, c: Vec3, rng: &mut R) -> Vec3 {
    let mut u = rng.gen::<f32>();
    let mut v = rng.gen::<f32>();
    // Fold the upper half of the unit square back onto the triangle.
    if u + v > 1.0 {
        u = 1.0 - u;
        v = 1.0 - v;
    }
    a + (b - a) * u + (c - a) * v
}
