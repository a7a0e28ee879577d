//! Segments of the progress range and their shape/color bindings.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::color::ColorSpec;
use crate::error::{MorphError, Result};
use crate::shape::ShapeId;

/// Interior boundaries of the default three-segment layout:
/// `[0, 0.45)`, `[0.45, 0.75)`, `[0.75, 1]`.
pub const DEFAULT_BOUNDARIES: [f32; 2] = [0.45, 0.75];

/// A contiguous sub-range of progress bound to one shape and one color.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Inclusive start of the range.
    pub start: f32,
    /// End of the range; exclusive except for the last segment.
    pub end: f32,
    /// Target shape bound to this segment.
    pub shape: ShapeId,
    /// Accent color bound to this segment.
    pub color: Vec3,
}

impl Segment {
    /// Length of the progress range.
    #[must_use]
    pub fn span(&self) -> f32 {
        self.end - self.start
    }

    /// Remaps a progress value inside this segment to `[0, 1]`.
    #[must_use]
    pub fn local_t(&self, progress: f32) -> f32 {
        ((progress - self.start) / self.span()).clamp(0.0, 1.0)
    }
}

/// Serializable segment description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentSpec {
    /// Inclusive start of the range.
    pub start: f32,
    /// End of the range.
    pub end: f32,
    /// Target shape id.
    pub shape: ShapeId,
    /// Accent color.
    pub color: ColorSpec,
}

impl SegmentSpec {
    /// Resolves the color and produces a [`Segment`].
    pub fn resolve(&self) -> Result<Segment> {
        Ok(Segment {
            start: self.start,
            end: self.end,
            shape: self.shape.clone(),
            color: self.color.resolve()?,
        })
    }
}

/// An ordered, validated list of segments covering `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentTable {
    segments: Vec<Segment>,
}

impl SegmentTable {
    /// Validates and wraps a list of segments.
    ///
    /// The first segment must start at 0, the last must end at 1, each
    /// must start where the previous ended, and every span must be positive.
    pub fn new(segments: Vec<Segment>) -> Result<Self> {
        let (Some(first), Some(last)) = (segments.first(), segments.last()) else {
            return Err(MorphError::ConfigurationError(
                "segment table is empty".to_string(),
            ));
        };
        if first.start != 0.0 {
            return Err(MorphError::ConfigurationError(format!(
                "first segment must start at 0, starts at {}",
                first.start
            )));
        }
        if last.end != 1.0 {
            return Err(MorphError::ConfigurationError(format!(
                "last segment must end at 1, ends at {}",
                last.end
            )));
        }
        for (i, segment) in segments.iter().enumerate() {
            if !segment.start.is_finite() || !segment.end.is_finite() {
                return Err(MorphError::ConfigurationError(format!(
                    "segment {i} has a non-finite range"
                )));
            }
            if segment.span() <= 0.0 {
                return Err(MorphError::ConfigurationError(format!(
                    "segment {i} ('{}') has zero or negative length",
                    segment.shape
                )));
            }
            if !segment.color.is_finite() {
                return Err(MorphError::ConfigurationError(format!(
                    "segment {i} has a non-finite color"
                )));
            }
            if i > 0 && segments[i - 1].end != segment.start {
                return Err(MorphError::ConfigurationError(format!(
                    "segment {i} starts at {} but segment {} ends at {}",
                    segment.start,
                    i - 1,
                    segments[i - 1].end
                )));
            }
        }
        Ok(Self { segments })
    }

    /// Builds a table from interior boundaries and one binding per segment.
    ///
    /// `boundaries` holds the cut points strictly inside `(0, 1)`; there
    /// must be exactly one more binding than boundaries.
    pub fn from_boundaries(boundaries: &[f32], bindings: Vec<(ShapeId, Vec3)>) -> Result<Self> {
        if bindings.len() != boundaries.len() + 1 {
            return Err(MorphError::ConfigurationError(format!(
                "{} boundaries need {} bindings, got {}",
                boundaries.len(),
                boundaries.len() + 1,
                bindings.len()
            )));
        }
        let mut edges = Vec::with_capacity(boundaries.len() + 2);
        edges.push(0.0);
        edges.extend_from_slice(boundaries);
        edges.push(1.0);

        let segments = bindings
            .into_iter()
            .enumerate()
            .map(|(i, (shape, color))| Segment {
                start: edges[i],
                end: edges[i + 1],
                shape,
                color,
            })
            .collect();
        Self::new(segments)
    }

    /// Builds the default three-segment table for the given bindings.
    pub fn three_act(bindings: [(ShapeId, Vec3); 3]) -> Result<Self> {
        Self::from_boundaries(&DEFAULT_BOUNDARIES, bindings.into())
    }

    /// Builds a table from serialized specs.
    pub fn from_specs(specs: &[SegmentSpec]) -> Result<Self> {
        let segments = specs
            .iter()
            .map(SegmentSpec::resolve)
            .collect::<Result<Vec<_>>>()?;
        Self::new(segments)
    }

    /// Returns the segments.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false: empty tables are rejected at construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Selects the segment containing `progress` and its local t.
    ///
    /// Ranges are half-open except the last, which includes 1.0. Values
    /// outside `[0, 1]` are clamped first.
    #[must_use]
    pub fn select(&self, progress: f32) -> (usize, f32) {
        let p = progress.clamp(0.0, 1.0);
        let last = self.segments.len() - 1;
        let index = self
            .segments
            .iter()
            .position(|s| p < s.end)
            .unwrap_or(last);
        (index, self.segments[index].local_t(p))
    }
}
