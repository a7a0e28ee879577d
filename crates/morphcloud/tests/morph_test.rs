//! End-to-end tests: samplers feeding the morph controller.

use morphcloud::*;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const N: usize = 200;

fn square() -> OutlineShape {
    OutlineShape::polygon(
        vec![
            Vec2::new(-10.0, -10.0),
            Vec2::new(10.0, -10.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(-10.0, 10.0),
        ],
        FillRule::NonZero,
    )
    .unwrap()
}

fn diamond() -> OutlineShape {
    OutlineShape::polygon(
        vec![
            Vec2::new(0.0, -12.0),
            Vec2::new(12.0, 0.0),
            Vec2::new(0.0, 12.0),
            Vec2::new(-12.0, 0.0),
        ],
        FillRule::EvenOdd,
    )
    .unwrap()
}

fn cube() -> TriangleMesh {
    let v = vec![
        Vec3::new(-1.0, -1.0, -1.0),
        Vec3::new(1.0, -1.0, -1.0),
        Vec3::new(1.0, 1.0, -1.0),
        Vec3::new(-1.0, 1.0, -1.0),
        Vec3::new(-1.0, -1.0, 1.0),
        Vec3::new(1.0, -1.0, 1.0),
        Vec3::new(1.0, 1.0, 1.0),
        Vec3::new(-1.0, 1.0, 1.0),
    ];
    let faces = [
        [0, 1, 2, 3],
        [4, 5, 6, 7],
        [0, 1, 5, 4],
        [2, 3, 7, 6],
        [0, 3, 7, 4],
        [1, 2, 6, 5],
    ];
    let triangles = faces
        .iter()
        .flat_map(|f| [UVec3::new(f[0], f[1], f[2]), UVec3::new(f[0], f[2], f[3])])
        .collect();
    TriangleMesh::new("cube", v, triangles).unwrap()
}

fn recipes() -> Vec<TargetRecipe> {
    vec![
        TargetRecipe::outlines("square", Vec3::X, 1, vec![square()], VectorSamplerOptions::default()),
        TargetRecipe::outlines("diamond", Vec3::Y, 2, vec![diamond()], VectorSamplerOptions::default()),
        TargetRecipe::meshes("cube", Vec3::Z, 3, vec![cube()]),
    ]
}

fn segments() -> SegmentTable {
    SegmentTable::three_act([
        (ShapeId::new("square"), Vec3::X),
        (ShapeId::new("diamond"), Vec3::Y),
        (ShapeId::new("cube"), Vec3::Z),
    ])
    .unwrap()
}

fn controller(options: MorphOptions) -> MorphController {
    let targets = build_registry(&recipes(), N).unwrap();
    MorphController::with_dispersed_buffer(options, segments(), targets, &mut StdRng::seed_from_u64(5))
        .unwrap()
}

/// Mean distance between the live buffer and a target shifted by `offset`.
fn mean_distance(controller: &MorphController, id: &str, offset: Vec3) -> f32 {
    let target = controller.targets().get(&ShapeId::new(id)).unwrap();
    let sum: f32 = controller
        .buffer()
        .positions()
        .iter()
        .zip(target.points().points())
        .map(|(p, t)| p.distance(*t + offset))
        .sum();
    sum / N as f32
}

#[test]
fn scenario_linear_sweep_converges_on_final_target() {
    let offset = Vec3::new(1.0, 0.0, 0.0);
    let options = MorphOptions::default()
        .with_breathing(0.4, 0.05, 0.0)
        .with_layout_offset(offset);
    let mut c = controller(options);

    let ticks = 150;
    let dt = 1.0 / 60.0;
    let mut entry_distance = None;
    let mut checked = false;

    for k in 0..ticks {
        let progress = k as f32 / (ticks - 1) as f32;
        let before = mean_distance(&c, "cube", offset);
        let state = *c.tick(progress, dt, k as f32 * dt);

        if state.segment_index == 2 && entry_distance.is_none() {
            entry_distance = Some(before);
        }
        if state.segment_index == 2 && state.local_t >= 0.99 && !checked {
            let entry = entry_distance.unwrap();
            let now = mean_distance(&c, "cube", offset);
            let tolerance = (1.0 - assembly_factor(state.local_t)) * entry;
            assert!(now <= tolerance, "distance {now} exceeds {tolerance}");
            assert!(now < 0.1 * entry, "only closed from {entry} to {now}");
            checked = true;
        }
    }
    assert!(checked, "sweep never reached t >= 0.99 in the final segment");
    assert_eq!(c.buffer().len(), N);
}

#[test]
fn test_segment_selection_at_exact_boundaries() {
    let mut c = controller(MorphOptions::default());
    for (progress, segment, t) in [(0.0, 0, 0.0), (0.45, 1, 0.0), (0.75, 2, 0.0), (1.0, 2, 1.0)] {
        let state = *c.tick(progress, 1.0 / 60.0, 0.0);
        assert_eq!(state.segment_index, segment, "progress {progress}");
        assert!((state.local_t - t).abs() < 1e-6, "progress {progress}");
        assert!(state.assembly < 1e-3);
        assert!(c.buffer().as_set().is_finite());
    }
}

#[test]
fn test_scrubbing_backward_returns_to_earlier_target() {
    let options = MorphOptions::default().with_breathing(0.4, 0.05, 0.0);
    let mut c = controller(options);
    for k in 0..120 {
        c.tick(0.9, 0.05, k as f32 * 0.05);
    }
    let near_cube = mean_distance(&c, "cube", Vec3::ZERO);
    for k in 0..120 {
        c.tick(0.2, 0.05, 6.0 + k as f32 * 0.05);
    }
    assert_eq!(c.state().segment_index, 0);
    assert!(mean_distance(&c, "square", Vec3::ZERO) < near_cube + 0.05);
    assert!(mean_distance(&c, "square", Vec3::ZERO) < 0.05);
}

#[test]
fn test_per_tick_delta_is_bounded() {
    let mut c = controller(MorphOptions::default());
    let amplitude = c.options().breathing_amplitude;
    let offset = c.options().layout_offset;
    let mut rng = StdRng::seed_from_u64(77);

    for k in 0..200 {
        let progress = rng.gen::<f32>();
        let dt = rng.gen::<f32>() * c.options().max_step;
        let before = c.buffer().positions().to_vec();
        let state = *c.tick(progress, dt, k as f32 * 0.016);

        let shape = &c.segments().segments()[state.segment_index].shape;
        let target = c.targets().get(shape).unwrap();
        for ((b, a), goal) in before
            .iter()
            .zip(c.buffer().positions())
            .zip(target.points().points())
        {
            let bound = (*goal + offset - *b).abs() * state.speed + Vec3::splat(amplitude + 1e-5);
            assert!((*a - *b).abs().cmple(bound).all(), "jump {b} -> {a}");
        }
    }
}

#[test]
fn test_from_scene_json_with_compact_viewport() {
    let profile = ViewportHint::Compact.profile();
    let json = r##"{
        "options": { "layout_offset": [0.0, 0.9, 0.0], "color_gain": 0.2 },
        "segments": [
            { "start": 0.0, "end": 0.3, "shape": "square", "color": "#ff0000" },
            { "start": 0.3, "end": 0.6, "shape": "diamond", "color": "#00ff00" },
            { "start": 0.6, "end": 0.8, "shape": "cube", "color": "#0000ff" },
            { "start": 0.8, "end": 1.0, "shape": "square", "color": [1.0, 1.0, 1.0] }
        ]
    }"##;
    let scene = SceneConfig::from_json(json).unwrap();
    let targets = build_registry(&recipes(), profile.point_count).unwrap();
    let mut c = MorphController::from_scene(&scene, targets, &mut StdRng::seed_from_u64(1)).unwrap();

    assert_eq!(c.buffer().len(), profile.point_count);
    assert_eq!(c.options().layout_offset, profile.layout_offset);
    let state = *c.tick(0.9, 1.0 / 60.0, 0.0);
    assert_eq!(state.segment_index, 3);
    assert_eq!(c.buffer().as_flat().len(), profile.point_count * 3);
}

#[test]
fn test_scene_with_missing_shape_fails_at_bind() {
    let json = r#"{ "segments": [ { "start": 0.0, "end": 1.0, "shape": "nope", "color": [1, 1, 1] } ] }"#;
    let scene = SceneConfig::from_json(json).unwrap();
    let targets = build_registry(&recipes(), N).unwrap();
    let err = MorphController::from_scene(&scene, targets, &mut StdRng::seed_from_u64(1)).unwrap_err();
    assert!(err.is_configuration());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_tick_never_writes_non_finite(
        inputs in proptest::collection::vec(
            (-2.0f32..3.0, -1.0f32..1.0, 0.0f32..1000.0),
            1..40,
        ),
    ) {
        let mut c = controller(MorphOptions::default());
        for (progress, dt, elapsed) in inputs {
            let state = *c.tick(progress, dt, elapsed);
            prop_assert!((0.0..=1.0).contains(&state.progress));
            prop_assert!((0.0..=1.0).contains(&state.local_t));
            prop_assert!(state.speed.is_finite());
        }
        prop_assert_eq!(c.buffer().len(), N);
        prop_assert!(c.buffer().as_set().is_finite());
        prop_assert!(c.color().is_finite());
    }
}
