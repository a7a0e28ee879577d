//! Per-tick morph state.

use glam::Vec3;

/// Snapshot of the controller after the most recent tick.
///
/// Recomputed every tick from the supplied progress; nothing here is
/// carried forward except the blended color and elapsed time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MorphState {
    /// Progress clamped to `[0, 1]`.
    pub progress: f32,
    /// Seconds since the animation started.
    pub elapsed: f32,
    /// Clamped frame time used by the last tick.
    pub dt: f32,
    /// Index of the active segment.
    pub segment_index: usize,
    /// Progress remapped into the active segment, in `[0, 1]`.
    pub local_t: f32,
    /// Assembly factor at `local_t`.
    pub assembly: f32,
    /// Attraction fraction applied by the last tick.
    pub speed: f32,
    /// Current blended accent color.
    pub color: Vec3,
}

impl MorphState {
    pub(crate) fn initial(color: Vec3) -> Self {
        Self {
            progress: 0.0,
            elapsed: 0.0,
            dt: 0.0,
            segment_index: 0,
            local_t: 0.0,
            assembly: 0.0,
            speed: 0.0,
            color,
        }
    }
}
