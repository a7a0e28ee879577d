//! morphcloud: scroll-driven particle clouds morphing between icons and meshes.
//!
//! Large point clouds are sampled once from flat vector outlines and 3D mesh
//! surfaces, then a [`MorphController`] pulls a single live
//! [`ParticleBuffer`] toward whichever target the current scroll progress
//! selects, every frame.
//!
//! # Quick Start
//!
//! ```no_run
//! use morphcloud::*;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! fn main() -> Result<()> {
//!     let square = OutlineShape::polygon(
//!         vec![
//!             Vec2::new(-10.0, -10.0),
//!             Vec2::new(10.0, -10.0),
//!             Vec2::new(10.0, 10.0),
//!             Vec2::new(-10.0, 10.0),
//!         ],
//!         FillRule::NonZero,
//!     )?;
//!     let recipes = vec![TargetRecipe::outlines(
//!         "square",
//!         Vec3::new(0.5, 0.3, 0.9),
//!         1,
//!         vec![square],
//!         VectorSamplerOptions::default(),
//!     )];
//!     let targets = build_registry(&recipes, 6_000)?;
//!     let segments = SegmentTable::from_boundaries(
//!         &[],
//!         vec![(ShapeId::new("square"), Vec3::new(0.5, 0.3, 0.9))],
//!     )?;
//!
//!     let mut rng = StdRng::seed_from_u64(7);
//!     let mut controller =
//!         MorphController::with_dispersed_buffer(MorphOptions::default(), segments, targets, &mut rng)?;
//!
//!     // Once per animation frame:
//!     controller.tick(0.5, 1.0 / 60.0, 0.0);
//!     let _positions: &[f32] = controller.buffer().as_flat();
//!     let _uniforms = controller.uniforms();
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - **Samplers** (`morphcloud-samplers`) run once per asset set and produce
//!   immutable [`TargetShape`]s of exactly `N` points.
//! - **Segments** split the progress range; each binds one shape and one
//!   accent color.
//! - The **controller** owns the live buffer, clamps its inputs, and never
//!   fails or allocates inside [`MorphController::tick`].

#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

mod controller;
mod particle_buffer;
mod state;

pub use controller::MorphController;
pub use particle_buffer::ParticleBuffer;
pub use state::MorphState;

// Re-export core types
pub use morphcloud_core::{
    assembly_factor, blend_color, parse_hex_color, CloudUniforms, ColorBlendMode, ColorSpec,
    MorphError, MorphOptions, ParticleSet, Result, SceneConfig, Segment, SegmentSpec,
    SegmentTable, ShapeId, ShapeRegistry, TargetShape, Transform, ViewportHint, ViewportProfile,
    DEFAULT_BOUNDARIES,
};
pub use morphcloud_core::{Mat4, Quat, UVec3, Vec2, Vec3};

// Re-export samplers
pub use morphcloud_samplers::{
    build_registry, build_target_shapes, sample_mesh_surfaces, sample_vector_paths, FillRule,
    MeshSurfaceSampler, OutlineShape, TargetRecipe, TargetSource, TriangleMesh,
    VectorPathSampler, VectorSampleStats, VectorSamplerOptions,
};
