//! Vector outline sampler.
//!
//! Turns closed 2D icon outlines into a 3D particle set. A share of the
//! particles traces the outlines (edge sampling), the rest fills the shape
//! interiors (fill sampling), and every particle is pushed into a thin slab
//! of random depth.

mod fill;

use glam::{Vec2, Vec3};
use morphcloud_core::{MorphError, ParticleSet, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};

pub use fill::FillRule;

/// Number of polyline samples built per outline when none is specified.
pub const DEFAULT_OUTLINE_RESOLUTION: usize = 256;

/// Number of rejection trials per fill sample when none is specified.
pub const DEFAULT_FILL_TRIALS: u32 = 16;

/// A closed 2D shape made of one or more contours and a fill rule.
///
/// The outline is resampled once, at construction, into a fixed number of
/// points spaced evenly by arc length across all contours.
#[derive(Debug, Clone)]
pub struct OutlineShape {
    contours: Vec<Vec<Vec2>>,
    fill_rule: FillRule,
    outline: Vec<Vec2>,
    min: Vec2,
    max: Vec2,
}

impl OutlineShape {
    /// Creates a shape from a single closed polyline.
    pub fn polygon(points: Vec<Vec2>, fill_rule: FillRule) -> Result<Self> {
        Self::new(vec![points], fill_rule)
    }

    /// Creates a shape with the default outline resolution.
    pub fn new(contours: Vec<Vec<Vec2>>, fill_rule: FillRule) -> Result<Self> {
        Self::with_resolution(contours, fill_rule, DEFAULT_OUTLINE_RESOLUTION)
    }

    /// Creates a shape whose outline is resampled to `resolution` points.
    ///
    /// Fails with [`MorphError::ParseError`] if there are no contours, a
    /// contour has fewer than three points or a non-finite coordinate, or
    /// the total perimeter is zero.
    pub fn with_resolution(
        contours: Vec<Vec<Vec2>>,
        fill_rule: FillRule,
        resolution: usize,
    ) -> Result<Self> {
        if contours.is_empty() {
            return Err(MorphError::ParseError("outline has no contours".to_string()));
        }
        if resolution == 0 {
            return Err(MorphError::InvalidArgument(
                "outline resolution must be positive".to_string(),
            ));
        }

        let mut min = Vec2::splat(f32::MAX);
        let mut max = Vec2::splat(f32::MIN);
        for (i, contour) in contours.iter().enumerate() {
            if contour.len() < 3 {
                return Err(MorphError::ParseError(format!(
                    "contour {i} has {} points, need at least 3",
                    contour.len()
                )));
            }
            for p in contour {
                if !p.is_finite() {
                    return Err(MorphError::ParseError(format!(
                        "contour {i} has a non-finite point {p}"
                    )));
                }
                min = min.min(*p);
                max = max.max(*p);
            }
        }

        let outline = resample_outline(&contours, resolution)?;
        Ok(Self {
            contours,
            fill_rule,
            outline,
            min,
            max,
        })
    }

    /// Returns the contours.
    #[must_use]
    pub fn contours(&self) -> &[Vec<Vec2>] {
        &self.contours
    }

    /// Returns the fill rule.
    #[must_use]
    pub fn fill_rule(&self) -> FillRule {
        self.fill_rule
    }

    /// Returns the resampled outline polyline.
    #[must_use]
    pub fn outline(&self) -> &[Vec2] {
        &self.outline
    }

    /// Returns the bounding box of the contours as `(min, max)`.
    #[must_use]
    pub fn bounding_box(&self) -> (Vec2, Vec2) {
        (self.min, self.max)
    }

    /// Largest absolute coordinate of the contours on either axis.
    #[must_use]
    pub fn max_extent(&self) -> f32 {
        self.min.abs().max(self.max.abs()).max_element()
    }

    /// Returns true if `p` lies inside the shape under its fill rule.
    #[must_use]
    pub fn contains(&self, p: Vec2) -> bool {
        fill::contains(&self.contours, self.fill_rule, p)
    }
}

/// Resamples the closed contours into `count` points evenly spaced by arc length.
#[allow(clippy::cast_precision_loss)]
fn resample_outline(contours: &[Vec<Vec2>], count: usize) -> Result<Vec<Vec2>> {
    let mut edges = Vec::new();
    let mut cumulative = Vec::new();
    let mut total = 0.0_f32;
    for contour in contours {
        for (i, &a) in contour.iter().enumerate() {
            let b = contour[(i + 1) % contour.len()];
            let length = a.distance(b);
            if length > 0.0 {
                total += length;
                edges.push((a, b, length));
                cumulative.push(total);
            }
        }
    }
    if total <= 0.0 || !total.is_finite() {
        return Err(MorphError::ParseError(
            "outline has zero perimeter".to_string(),
        ));
    }

    let step = total / count as f32;
    let mut samples = Vec::with_capacity(count);
    for k in 0..count {
        let distance = k as f32 * step;
        let edge = cumulative
            .partition_point(|&c| c <= distance)
            .min(edges.len() - 1);
        let (a, b, length) = edges[edge];
        let edge_start = cumulative[edge] - length;
        let t = ((distance - edge_start) / length).clamp(0.0, 1.0);
        samples.push(a.lerp(b, t));
    }
    Ok(samples)
}

/// Options for [`VectorPathSampler`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorSamplerOptions {
    /// Number of points to produce.
    pub point_count: usize,
    /// Fraction of points placed on outlines, in `[0, 1]`.
    pub edge_ratio: f32,
    /// Thickness of the depth slab.
    pub depth: f32,
    /// Full width of the uniform jitter added to every coordinate.
    pub jitter: f32,
    /// Scale from outline units to world units.
    pub scale: f32,
    /// Whether to move the centroid of the result to the origin.
    pub center: bool,
    /// Rejection trials per fill sample before accepting the last trial.
    pub fill_trials: u32,
}

impl Default for VectorSamplerOptions {
    fn default() -> Self {
        Self {
            point_count: 32_000,
            edge_ratio: 0.35,
            depth: 0.6,
            jitter: 0.02,
            scale: 0.04,
            center: true,
            fill_trials: DEFAULT_FILL_TRIALS,
        }
    }
}

impl VectorSamplerOptions {
    /// Creates options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the point count.
    #[must_use]
    pub fn with_point_count(mut self, point_count: usize) -> Self {
        self.point_count = point_count;
        self
    }

    /// Sets the edge ratio.
    #[must_use]
    pub fn with_edge_ratio(mut self, edge_ratio: f32) -> Self {
        self.edge_ratio = edge_ratio;
        self
    }

    /// Sets the depth slab thickness.
    #[must_use]
    pub fn with_depth(mut self, depth: f32) -> Self {
        self.depth = depth;
        self
    }

    /// Sets the jitter width.
    #[must_use]
    pub fn with_jitter(mut self, jitter: f32) -> Self {
        self.jitter = jitter;
        self
    }

    /// Sets the output scale.
    #[must_use]
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Sets whether to recentre the result.
    #[must_use]
    pub fn with_center(mut self, center: bool) -> Self {
        self.center = center;
        self
    }

    /// Sets the number of fill trials.
    #[must_use]
    pub fn with_fill_trials(mut self, fill_trials: u32) -> Self {
        self.fill_trials = fill_trials;
        self
    }

    /// Number of points placed on outlines.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn edge_count(&self) -> usize {
        ((self.point_count as f64 * f64::from(self.edge_ratio)).floor() as usize)
            .min(self.point_count)
    }

    /// Checks every option against its domain.
    pub fn validate(&self) -> Result<()> {
        if self.point_count == 0 {
            return Err(MorphError::InvalidArgument(
                "point_count must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.edge_ratio) {
            return Err(MorphError::InvalidArgument(format!(
                "edge_ratio must be in [0, 1], got {}",
                self.edge_ratio
            )));
        }
        for (name, value) in [
            ("depth", self.depth),
            ("jitter", self.jitter),
            ("scale", self.scale),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(MorphError::InvalidArgument(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        if self.fill_trials == 0 {
            return Err(MorphError::InvalidArgument(
                "fill_trials must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Counters describing one sampling run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VectorSampleStats {
    /// Points drawn from outlines.
    pub edge_count: usize,
    /// Points drawn from interiors.
    pub fill_count: usize,
    /// Fill points accepted after every trial missed the shape.
    pub fill_fallbacks: usize,
}

/// Samples a set of outline shapes into a fixed-size particle set.
#[derive(Debug, Clone)]
pub struct VectorPathSampler {
    shapes: Vec<OutlineShape>,
    options: VectorSamplerOptions,
}

impl VectorPathSampler {
    /// Creates a sampler.
    ///
    /// Fails with [`MorphError::ParseError`] if `shapes` is empty and with
    /// [`MorphError::InvalidArgument`] if the options are out of range.
    pub fn new(shapes: Vec<OutlineShape>, options: VectorSamplerOptions) -> Result<Self> {
        options.validate()?;
        if shapes.is_empty() {
            return Err(MorphError::ParseError(
                "no outline shapes to sample".to_string(),
            ));
        }
        Ok(Self { shapes, options })
    }

    /// Returns the shapes.
    #[must_use]
    pub fn shapes(&self) -> &[OutlineShape] {
        &self.shapes
    }

    /// Returns the options.
    #[must_use]
    pub fn options(&self) -> &VectorSamplerOptions {
        &self.options
    }

    /// Produces exactly `point_count` points.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> ParticleSet {
        self.sample_with_stats(rng).0
    }

    /// Produces exactly `point_count` points and the run's counters.
    pub fn sample_with_stats<R: Rng>(&self, rng: &mut R) -> (ParticleSet, VectorSampleStats) {
        let opts = &self.options;
        let n = opts.point_count;
        let edge_count = opts.edge_count();
        let fill_count = n - edge_count;
        let mut stats = VectorSampleStats {
            edge_count,
            fill_count,
            fill_fallbacks: 0,
        };

        let mut points = Vec::with_capacity(n);

        for _ in 0..edge_count {
            let shape = &self.shapes[rng.gen_range(0..self.shapes.len())];
            let p = shape.outline[rng.gen_range(0..shape.outline.len())];
            points.push(self.lift(p, rng));
        }

        // Rejection sampling inside the bounding box. When every trial
        // misses, the last trial point is kept anyway, which biases thin
        // features toward their bounding boxes.
        for _ in 0..fill_count {
            let shape = &self.shapes[rng.gen_range(0..self.shapes.len())];
            let (min, max) = shape.bounding_box();
            let mut candidate = min;
            let mut hit = false;
            for _ in 0..opts.fill_trials {
                candidate = min + (max - min) * Vec2::new(rng.gen::<f32>(), rng.gen::<f32>());
                if shape.contains(candidate) {
                    hit = true;
                    break;
                }
            }
            if !hit {
                stats.fill_fallbacks += 1;
            }
            points.push(self.lift(candidate, rng));
        }

        let mut set = ParticleSet::new(points);
        if opts.center {
            set.recenter();
        }
        if stats.fill_fallbacks > 0 {
            log::warn!(
                "vector sampler accepted {} of {} fill points after exhausting {} trials",
                stats.fill_fallbacks,
                fill_count,
                opts.fill_trials
            );
        }
        (set, stats)
    }

    /// Maps a 2D sample into the depth slab, flipping Y and adding jitter.
    fn lift<R: Rng>(&self, p: Vec2, rng: &mut R) -> Vec3 {
        let opts = &self.options;
        let mut jitter = || (rng.gen::<f32>() - 0.5) * opts.jitter;
        let x = p.x * opts.scale + jitter();
        let y = -p.y * opts.scale + jitter();
        let z_jitter = jitter();
        let z = (rng.gen::<f32>() - 0.5) * opts.depth + z_jitter;
        Vec3::new(x, y, z)
    }
}

/// Convenience wrapper: validates, builds a sampler and samples once.
pub fn sample_vector_paths<R: Rng>(
    shapes: Vec<OutlineShape>,
    options: VectorSamplerOptions,
    rng: &mut R,
) -> Result<ParticleSet> {
    Ok(VectorPathSampler::new(shapes, options)?.sample(rng))
}
