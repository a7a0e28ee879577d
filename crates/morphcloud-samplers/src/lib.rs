//! Point cloud synthesis for morphcloud.
//!
//! Two samplers turn already-parsed static assets into fixed-size particle sets:
//! - [`VectorPathSampler`] for closed 2D outlines (icons)
//! - [`MeshSurfaceSampler`] for 3D triangle meshes
//!
//! Both take the random source as an explicit argument so a seeded RNG
//! reproduces the same points. [`TargetRecipe`] bundles geometry, seed and
//! accent color so a full set of targets can be built in one call.

#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod mesh_surface;
pub mod recipe;
pub mod vector_path;

pub use mesh_surface::{sample_mesh_surfaces, MeshSurfaceSampler, TriangleMesh};
pub use recipe::{build_registry, build_target_shapes, TargetRecipe, TargetSource};
pub use vector_path::{
    sample_vector_paths, FillRule, OutlineShape, VectorPathSampler, VectorSampleStats,
    VectorSamplerOptions, DEFAULT_FILL_TRIALS, DEFAULT_OUTLINE_RESOLUTION,
};
