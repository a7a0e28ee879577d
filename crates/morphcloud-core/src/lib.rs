//! Core types for morphcloud.
//!
//! This crate provides the data model shared by the samplers and the morph controller:
//! - [`ParticleSet`] fixed-length point sets and [`TargetShape`] named targets
//! - [`ShapeRegistry`] mapping shape ids to targets with count validation
//! - [`SegmentTable`] progress segments bound to shapes and accent colors
//! - [`MorphOptions`] and [`SceneConfig`] configuration with documented defaults
//! - Color blending, easing curves and transforms

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]
// Segment boundaries are compared exactly against configured values
#![allow(clippy::float_cmp)]

pub mod color;
pub mod easing;
pub mod error;
pub mod options;
pub mod particle_set;
pub mod registry;
pub mod segment;
pub mod shape;
pub mod transform;

pub use color::{blend_color, parse_hex_color, ColorSpec};
pub use easing::{assembly_factor, sanitize_unit};
pub use error::{MorphError, Result};
pub use options::{ColorBlendMode, MorphOptions, SceneConfig, ViewportHint, ViewportProfile};
pub use particle_set::ParticleSet;
pub use registry::ShapeRegistry;
pub use segment::{Segment, SegmentSpec, SegmentTable, DEFAULT_BOUNDARIES};
pub use shape::{ShapeId, TargetShape};
pub use transform::{CloudUniforms, Transform};

// Re-export glam types for convenience
pub use glam::{Mat4, Quat, UVec3, Vec2, Vec3};
