//! Configuration options for the morph controller.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{MorphError, Result};
use crate::segment::{SegmentSpec, SegmentTable};

/// How the accent color gain relates to frame time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum ColorBlendMode {
    /// Fixed gain applied once per tick, independent of `dt`.
    /// Color converges faster at higher frame rates.
    #[default]
    PerTick,
    /// Gain rescaled by `dt` so convergence matches `PerTick` running at
    /// `reference_fps`, whatever the actual frame rate.
    TimeScaled {
        /// Frame rate the configured gain was tuned for.
        reference_fps: f32,
    },
}

/// Layout class supplied by the host UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ViewportHint {
    /// Narrow screens: fewer particles, cloud above the content.
    Compact,
    /// Wide screens: full particle count, cloud beside the content.
    #[default]
    Expanded,
}

/// Point count and layout derived from a [`ViewportHint`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportProfile {
    /// Number of particles for every target and the live buffer.
    pub point_count: usize,
    /// Translation applied to every target position.
    pub layout_offset: Vec3,
}

impl ViewportHint {
    /// Returns the default profile for this viewport class.
    #[must_use]
    pub fn profile(self) -> ViewportProfile {
        match self {
            ViewportHint::Compact => ViewportProfile {
                point_count: 12_000,
                layout_offset: Vec3::new(0.0, 0.9, 0.0),
            },
            ViewportHint::Expanded => ViewportProfile {
                point_count: 32_000,
                layout_offset: Vec3::new(2.2, 0.0, 0.0),
            },
        }
    }
}

/// Per-frame behaviour of the morph controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MorphOptions {
    /// Attraction rate per second before gain.
    pub base_rate: f32,
    /// Gain applied when the assembly factor is zero.
    pub min_gain: f32,
    /// Extra gain added at full assembly.
    pub gain_range: f32,

    /// Angular frequency of the breathing motion (radians per second).
    pub breathing_frequency: f32,
    /// Phase offset between consecutive particles.
    pub breathing_phase_step: f32,
    /// Breathing offset amplitude added per tick on X and Y.
    pub breathing_amplitude: f32,

    /// Accent color gain.
    pub color_gain: f32,
    /// How `color_gain` relates to frame time.
    pub color_blend_mode: ColorBlendMode,

    /// Upper bound for `dt` in seconds.
    pub max_step: f32,

    /// Yaw rate of the cosmetic rotation (radians per second).
    pub rotation_speed: f32,
    /// Extra yaw accumulated across the full progress range (radians).
    pub rotation_progress_sweep: f32,
    /// Amplitude of the slow pitch wobble (radians).
    pub tilt_amplitude: f32,
    /// Angular frequency of the pitch wobble (radians per second).
    pub tilt_frequency: f32,

    /// Translation applied to every target position.
    pub layout_offset: Vec3,
    /// Half extents of the box the live buffer is scattered in at start.
    pub dispersal_extent: Vec3,
}

impl Default for MorphOptions {
    fn default() -> Self {
        Self {
            base_rate: 2.5,
            min_gain: 0.8,
            gain_range: 4.0,
            breathing_frequency: 0.4,
            breathing_phase_step: 0.05,
            breathing_amplitude: 0.015,
            color_gain: 0.08,
            color_blend_mode: ColorBlendMode::PerTick,
            max_step: 0.05,
            rotation_speed: 0.05,
            rotation_progress_sweep: std::f32::consts::FRAC_PI_2,
            tilt_amplitude: 0.08,
            tilt_frequency: 0.2,
            layout_offset: Vec3::ZERO,
            dispersal_extent: Vec3::new(6.0, 4.0, 3.0),
        }
    }
}

impl MorphOptions {
    /// Creates options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Default options with the layout offset of a viewport class.
    pub fn for_viewport(hint: ViewportHint) -> Self {
        Self::default().with_layout_offset(hint.profile().layout_offset)
    }

    /// Sets the attraction parameters.
    #[must_use]
    pub fn with_attraction(mut self, base_rate: f32, min_gain: f32, gain_range: f32) -> Self {
        self.base_rate = base_rate;
        self.min_gain = min_gain;
        self.gain_range = gain_range;
        self
    }

    /// Sets the breathing parameters.
    #[must_use]
    pub fn with_breathing(mut self, frequency: f32, phase_step: f32, amplitude: f32) -> Self {
        self.breathing_frequency = frequency;
        self.breathing_phase_step = phase_step;
        self.breathing_amplitude = amplitude;
        self
    }

    /// Sets the color gain.
    #[must_use]
    pub fn with_color_gain(mut self, gain: f32) -> Self {
        self.color_gain = gain;
        self
    }

    /// Sets the color blend mode.
    #[must_use]
    pub fn with_color_blend_mode(mut self, mode: ColorBlendMode) -> Self {
        self.color_blend_mode = mode;
        self
    }

    /// Sets the maximum `dt`.
    #[must_use]
    pub fn with_max_step(mut self, max_step: f32) -> Self {
        self.max_step = max_step;
        self
    }

    /// Sets the layout offset.
    #[must_use]
    pub fn with_layout_offset(mut self, offset: Vec3) -> Self {
        self.layout_offset = offset;
        self
    }

    /// Sets the dispersal half extents.
    #[must_use]
    pub fn with_dispersal_extent(mut self, extent: Vec3) -> Self {
        self.dispersal_extent = extent;
        self
    }

    /// Checks that every value is finite and inside its domain.
    pub fn validate(&self) -> Result<()> {
        let scalars = [
            ("base_rate", self.base_rate),
            ("min_gain", self.min_gain),
            ("gain_range", self.gain_range),
            ("breathing_frequency", self.breathing_frequency),
            ("breathing_phase_step", self.breathing_phase_step),
            ("breathing_amplitude", self.breathing_amplitude),
            ("color_gain", self.color_gain),
            ("max_step", self.max_step),
            ("rotation_speed", self.rotation_speed),
            ("rotation_progress_sweep", self.rotation_progress_sweep),
            ("tilt_amplitude", self.tilt_amplitude),
            ("tilt_frequency", self.tilt_frequency),
        ];
        for (name, value) in scalars {
            if !value.is_finite() {
                return Err(MorphError::ConfigurationError(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        for (name, value) in [
            ("base_rate", self.base_rate),
            ("min_gain", self.min_gain),
            ("gain_range", self.gain_range),
            ("breathing_amplitude", self.breathing_amplitude),
        ] {
            if value < 0.0 {
                return Err(MorphError::ConfigurationError(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }
        if self.max_step <= 0.0 {
            return Err(MorphError::ConfigurationError(format!(
                "max_step must be positive, got {}",
                self.max_step
            )));
        }
        if self.color_gain <= 0.0 || self.color_gain > 1.0 {
            return Err(MorphError::ConfigurationError(format!(
                "color_gain must be in (0, 1], got {}",
                self.color_gain
            )));
        }
        if let ColorBlendMode::TimeScaled { reference_fps } = self.color_blend_mode {
            if !reference_fps.is_finite() || reference_fps <= 0.0 {
                return Err(MorphError::ConfigurationError(format!(
                    "reference_fps must be positive, got {reference_fps}"
                )));
            }
        }
        if !self.layout_offset.is_finite() {
            return Err(MorphError::ConfigurationError(
                "layout_offset must be finite".to_string(),
            ));
        }
        if !self.dispersal_extent.is_finite() || self.dispersal_extent.min_element() < 0.0 {
            return Err(MorphError::ConfigurationError(
                "dispersal_extent must be finite and non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// A complete scene description: controller options plus segment layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Controller options.
    #[serde(default)]
    pub options: MorphOptions,
    /// Segment layout, in progress order.
    pub segments: Vec<SegmentSpec>,
}

impl SceneConfig {
    /// Parses a scene description from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SceneConfig = serde_json::from_str(json)?;
        config.options.validate()?;
        Ok(config)
    }

    /// Serializes the scene description to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Builds the validated segment table.
    pub fn segment_table(&self) -> Result<SegmentTable> {
        SegmentTable::from_specs(&self.segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = MorphOptions::default();
        assert_eq!(options.base_rate, 2.5);
        assert_eq!(options.min_gain, 0.8);
        assert_eq!(options.gain_range, 4.0);
        assert_eq!(options.breathing_amplitude, 0.015);
        assert_eq!(options.color_gain, 0.08);
        assert_eq!(options.max_step, 0.05);
        assert_eq!(options.color_blend_mode, ColorBlendMode::PerTick);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(MorphOptions::new().with_max_step(0.0).validate().is_err());
        assert!(MorphOptions::new().with_color_gain(1.5).validate().is_err());
        assert!(MorphOptions::new()
            .with_attraction(f32::NAN, 0.8, 4.0)
            .validate()
            .is_err());
        assert!(MorphOptions::new()
            .with_color_blend_mode(ColorBlendMode::TimeScaled { reference_fps: 0.0 })
            .validate()
            .is_err());
    }

    #[test]
    fn test_viewport_profiles() {
        let compact = ViewportHint::Compact.profile();
        let expanded = ViewportHint::Expanded.profile();
        assert!(compact.point_count < expanded.point_count);
        assert_eq!(
            MorphOptions::for_viewport(ViewportHint::Expanded).layout_offset,
            expanded.layout_offset
        );
    }

    #[test]
    fn test_scene_config_from_json() {
        let json = r##"{
            "options": { "color_gain": 0.1, "layout_offset": [1.0, 0.0, 0.0] },
            "segments": [
                { "start": 0.0, "end": 0.5, "shape": "icon", "color": "#ff0000" },
                { "start": 0.5, "end": 1.0, "shape": "globe", "color": [0.0, 0.0, 1.0] }
            ]
        }"##;
        let config = SceneConfig::from_json(json).unwrap();
        assert_eq!(config.options.color_gain, 0.1);
        assert_eq!(config.options.base_rate, 2.5);
        let table = config.segment_table().unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.segments()[0].color, Vec3::X);
        assert_eq!(table.segments()[1].shape.as_str(), "globe");
    }

    #[test]
    fn test_scene_config_rejects_invalid_json() {
        assert!(matches!(
            SceneConfig::from_json("{ not json"),
            Err(MorphError::JsonError(_))
        ));
    }
}
