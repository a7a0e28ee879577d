#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
//! Headless scroll sweep through three targets.
//!
//! This demo shows:
//! - Building an icon target and two mesh targets from recipes
//! - Binding them to the default three-segment layout
//! - Driving progress forward and back like a scrolling page
//! - Reading the flat position buffer and GPU uniforms each frame
//!
//! Run with: `RUST_LOG=debug cargo run --example scroll_morph`

use std::f32::consts::TAU;

use morphcloud::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// A five-pointed star outline.
fn star(outer: f32, inner: f32) -> Vec<Vec2> {
    (0..10)
        .map(|i| {
            let angle = TAU * i as f32 / 10.0 - TAU / 4.0;
            let r = if i % 2 == 0 { outer } else { inner };
            Vec2::new(r * angle.cos(), r * angle.sin())
        })
        .collect()
}

/// A UV sphere.
fn sphere(name: &str, radius: f32, rings: u32, segments: u32) -> Result<TriangleMesh> {
    let mut vertices = Vec::new();
    for r in 0..=rings {
        let theta = std::f32::consts::PI * r as f32 / rings as f32;
        for s in 0..segments {
            let phi = TAU * s as f32 / segments as f32;
            vertices.push(Vec3::new(
                radius * theta.sin() * phi.cos(),
                radius * theta.cos(),
                radius * theta.sin() * phi.sin(),
            ));
        }
    }
    let mut triangles = Vec::new();
    for r in 0..rings {
        for s in 0..segments {
            let a = r * segments + s;
            let b = r * segments + (s + 1) % segments;
            let c = (r + 1) * segments + s;
            let d = (r + 1) * segments + (s + 1) % segments;
            triangles.push(UVec3::new(a, c, b));
            triangles.push(UVec3::new(b, c, d));
        }
    }
    TriangleMesh::new(name, vertices, triangles)
}

/// A torus.
fn torus(name: &str, major: f32, minor: f32, n_major: u32, n_minor: u32) -> Result<TriangleMesh> {
    let mut vertices = Vec::new();
    for i in 0..n_major {
        let theta = TAU * i as f32 / n_major as f32;
        for j in 0..n_minor {
            let phi = TAU * j as f32 / n_minor as f32;
            vertices.push(Vec3::new(
                (major + minor * phi.cos()) * theta.cos(),
                minor * phi.sin(),
                (major + minor * phi.cos()) * theta.sin(),
            ));
        }
    }
    let mut triangles = Vec::new();
    for i in 0..n_major {
        for j in 0..n_minor {
            let a = i * n_minor + j;
            let b = ((i + 1) % n_major) * n_minor + j;
            let c = i * n_minor + (j + 1) % n_minor;
            let d = ((i + 1) % n_major) * n_minor + (j + 1) % n_minor;
            triangles.push(UVec3::new(a, b, c));
            triangles.push(UVec3::new(c, b, d));
        }
    }
    TriangleMesh::new(name, vertices, triangles)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let hint = ViewportHint::Expanded;
    let profile = hint.profile();

    let star_icon = OutlineShape::polygon(star(12.0, 5.0), FillRule::NonZero)?;
    let ring_icon = OutlineShape::new(
        vec![star(6.0, 6.0).into_iter().rev().collect(), star(14.0, 14.0)],
        FillRule::NonZero,
    )?;

    let violet = parse_hex_color("#7c3aed")?;
    let cyan = parse_hex_color("#06b6d4")?;
    let amber = parse_hex_color("#f59e0b")?;

    let recipes = vec![
        TargetRecipe::outlines(
            "icons",
            violet,
            11,
            vec![star_icon, ring_icon],
            VectorSamplerOptions::default(),
        ),
        TargetRecipe::meshes("globe", cyan, 12, vec![sphere("globe", 1.4, 24, 48)?]),
        TargetRecipe::meshes(
            "orbit",
            amber,
            13,
            vec![
                torus("ring", 1.3, 0.25, 64, 16)?,
                sphere("core", 0.5, 12, 24)?.with_scale(1.2),
            ],
        ),
    ];

    let targets = build_registry(&recipes, profile.point_count)?;
    let segments = SegmentTable::three_act([
        (ShapeId::new("icons"), violet),
        (ShapeId::new("globe"), cyan),
        (ShapeId::new("orbit"), amber),
    ])?;

    let mut rng = StdRng::seed_from_u64(2024);
    let mut controller =
        MorphController::with_dispersed_buffer(MorphOptions::for_viewport(hint), segments, targets, &mut rng)?;

    // Scroll down over five seconds, then halfway back up.
    let dt = 1.0 / 60.0;
    let frames = 450;
    for frame in 0..frames {
        let elapsed = frame as f32 * dt;
        let progress = if frame < 300 {
            frame as f32 / 299.0
        } else {
            1.0 - (frame - 300) as f32 / 300.0
        };
        let state = *controller.tick(progress, dt, elapsed);

        if frame % 30 == 0 {
            let uniforms = controller.uniforms();
            let flat = controller.buffer().as_flat();
            log::info!(
                "frame {frame:3} progress {:.2} segment {} t {:.2} assembly {:.2} color [{:.2}, {:.2}, {:.2}] floats {}",
                state.progress,
                state.segment_index,
                state.local_t,
                state.assembly,
                uniforms.color[0],
                uniforms.color[1],
                uniforms.color[2],
                flat.len()
            );
        }
    }

    Ok(())
}
