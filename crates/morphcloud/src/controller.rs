//! Scroll-driven morph controller.

use std::f64::consts::TAU;

use glam::{EulerRot, Quat, Vec3};
use morphcloud_core::{
    assembly_factor, blend_color, sanitize_unit, CloudUniforms, ColorBlendMode, MorphError,
    MorphOptions, Result, SceneConfig, SegmentTable, ShapeRegistry, Transform,
};
use rand::Rng;

use crate::particle_buffer::ParticleBuffer;
use crate::state::MorphState;

/// Drives the live buffer toward the target bound to the active segment.
///
/// All validation happens in [`MorphController::new`]; [`MorphController::tick`]
/// never fails and never allocates.
#[derive(Debug)]
pub struct MorphController {
    options: MorphOptions,
    segments: SegmentTable,
    targets: ShapeRegistry,
    buffer: ParticleBuffer,
    state: MorphState,
}

/// Checks that every segment's shape exists and matches the buffer size.
fn check_bindings(segments: &SegmentTable, targets: &ShapeRegistry, len: usize) -> Result<()> {
    for segment in segments.segments() {
        let target = targets.require(&segment.shape)?;
        if target.len() != len {
            return Err(MorphError::SizeMismatch {
                expected: len,
                actual: target.len(),
            });
        }
    }
    Ok(())
}

/// Reduces an angle to `[0, TAU)` in f64 so large products stay finite.
#[allow(clippy::cast_possible_truncation)]
fn wrap_angle(angle: f64) -> f32 {
    angle.rem_euclid(TAU) as f32
}

impl MorphController {
    /// Binds segments, targets and the live buffer.
    ///
    /// Fails with a configuration error if the options are invalid, a
    /// segment references an unregistered shape, or a bound target's
    /// point count differs from the buffer's.
    pub fn new(
        options: MorphOptions,
        segments: SegmentTable,
        targets: ShapeRegistry,
        buffer: ParticleBuffer,
    ) -> Result<Self> {
        options.validate()?;
        check_bindings(&segments, &targets, buffer.len())?;

        let initial_color = segments.segments()[0].color;
        log::info!(
            "bound morph controller: {} particles, {} segments, {} targets",
            buffer.len(),
            segments.len(),
            targets.len()
        );
        Ok(Self {
            options,
            segments,
            targets,
            buffer,
            state: MorphState::initial(initial_color),
        })
    }

    /// Binds with a freshly dispersed buffer sized to the registry.
    pub fn with_dispersed_buffer<R: Rng>(
        options: MorphOptions,
        segments: SegmentTable,
        targets: ShapeRegistry,
        rng: &mut R,
    ) -> Result<Self> {
        let buffer = ParticleBuffer::dispersed(targets.point_count(), options.dispersal_extent, rng)?;
        Self::new(options, segments, targets, buffer)
    }

    /// Binds a scene description to a set of targets.
    pub fn from_scene<R: Rng>(scene: &SceneConfig, targets: ShapeRegistry, rng: &mut R) -> Result<Self> {
        Self::with_dispersed_buffer(scene.options.clone(), scene.segment_table()?, targets, rng)
    }

    /// Replaces the target set after the source geometry changed.
    ///
    /// The live buffer keeps its positions and morphs toward the new
    /// targets from wherever it is.
    pub fn replace_targets(&mut self, targets: ShapeRegistry) -> Result<()> {
        check_bindings(&self.segments, &targets, self.buffer.len())?;
        log::info!("replaced morph targets ({} shapes)", targets.len());
        self.targets = targets;
        Ok(())
    }

    /// Changes the translation applied to every target position.
    ///
    /// Non-finite offsets are ignored.
    pub fn set_layout_offset(&mut self, offset: Vec3) {
        if offset.is_finite() {
            self.options.layout_offset = offset;
        }
    }

    /// Advances the morph by one frame.
    ///
    /// `progress` is clamped to `[0, 1]` (NaN counts as 0), `dt` to
    /// `[0, max_step]` (NaN counts as 0), and a non-finite `elapsed` reuses
    /// the previous value.
    pub fn tick(&mut self, progress: f32, dt: f32, elapsed: f32) -> &MorphState {
        let opts = &self.options;
        let progress = sanitize_unit(progress);
        let dt = if dt.is_nan() { 0.0 } else { dt.clamp(0.0, opts.max_step) };
        let elapsed = if elapsed.is_finite() {
            elapsed
        } else {
            self.state.elapsed
        };

        let (index, local_t) = self.segments.select(progress);
        if index != self.state.segment_index {
            log::debug!(
                "segment {} -> {} at progress {progress:.3}",
                self.state.segment_index,
                index
            );
        }
        let segment = &self.segments.segments()[index];

        let assembly = assembly_factor(local_t);
        let speed = (dt * opts.base_rate * (opts.min_gain + assembly * opts.gain_range))
            .clamp(0.0, 1.0);

        // Bindings are checked at construction and on replacement.
        if let Some(target) = self.targets.get(&segment.shape) {
            let offset = opts.layout_offset;
            let phase = wrap_angle(f64::from(elapsed) * f64::from(opts.breathing_frequency));
            let step = wrap_angle(f64::from(opts.breathing_phase_step));
            let amplitude = opts.breathing_amplitude;
            for (i, (current, goal)) in self
                .buffer
                .positions_mut()
                .iter_mut()
                .zip(target.points().points())
                .enumerate()
            {
                #[allow(clippy::cast_precision_loss)]
                let breathing = (phase + i as f32 * step).sin() * amplitude;
                let pull = (*goal + offset - *current) * speed;
                *current += pull + Vec3::new(breathing, breathing, 0.0);
            }
        }

        let gain = match opts.color_blend_mode {
            ColorBlendMode::PerTick => opts.color_gain,
            ColorBlendMode::TimeScaled { reference_fps } => {
                1.0 - (1.0 - opts.color_gain).powf(dt * reference_fps)
            }
        };
        let color = blend_color(self.state.color, segment.color, gain.clamp(0.0, 1.0));

        self.state = MorphState {
            progress,
            elapsed,
            dt,
            segment_index: index,
            local_t,
            assembly,
            speed,
            color,
        };
        &self.state
    }

    /// Cosmetic rotation of the whole cloud.
    ///
    /// Yaw drifts with elapsed time and sweeps with progress; pitch wobbles
    /// slowly. Applied by the renderer, never baked into positions.
    #[must_use]
    pub fn rotation(&self) -> Transform {
        let opts = &self.options;
        let elapsed = f64::from(self.state.elapsed);
        let yaw = wrap_angle(
            elapsed * f64::from(opts.rotation_speed)
                + f64::from(self.state.progress) * f64::from(opts.rotation_progress_sweep),
        );
        let pitch = wrap_angle(elapsed * f64::from(opts.tilt_frequency)).sin() * opts.tilt_amplitude;
        Transform::from_rotation(Quat::from_euler(EulerRot::YXZ, yaw, pitch, 0.0))
    }

    /// GPU-ready rotation, color and assembly snapshot.
    #[must_use]
    pub fn uniforms(&self) -> CloudUniforms {
        CloudUniforms::new(&self.rotation(), self.state.color, self.state.assembly)
    }

    /// Returns the state after the last tick.
    #[must_use]
    pub fn state(&self) -> &MorphState {
        &self.state
    }

    /// Returns the current blended accent color.
    #[must_use]
    pub fn color(&self) -> Vec3 {
        self.state.color
    }

    /// Returns the live buffer.
    #[must_use]
    pub fn buffer(&self) -> &ParticleBuffer {
        &self.buffer
    }

    /// Returns the options.
    #[must_use]
    pub fn options(&self) -> &MorphOptions {
        &self.options
    }

    /// Returns the segment table.
    #[must_use]
    pub fn segments(&self) -> &SegmentTable {
        &self.segments
    }

    /// Returns the bound targets.
    #[must_use]
    pub fn targets(&self) -> &ShapeRegistry {
        &self.targets
    }
}
