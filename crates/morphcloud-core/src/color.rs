//! Accent color blending and parsing.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{MorphError, Result};

/// Linearly interpolates `current` toward `target` channel-wise.
///
/// `gain` is expected in `(0, 1]`; callers clamp it before use.
#[must_use]
pub fn blend_color(current: Vec3, target: Vec3, gain: f32) -> Vec3 {
    current + (target - current) * gain
}

/// Parses `#rrggbb` or `rrggbb` into a linear 0..1 color.
pub fn parse_hex_color(hex: &str) -> Result<Vec3> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(MorphError::ParseError(format!("invalid hex color '{hex}'")));
    }
    let channel = |range: std::ops::Range<usize>| -> Result<f32> {
        u8::from_str_radix(&digits[range], 16)
            .map(|v| f32::from(v) / 255.0)
            .map_err(|_| MorphError::ParseError(format!("invalid hex color '{hex}'")))
    };
    Ok(Vec3::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// A color as written in configuration: `[r, g, b]` or `"#rrggbb"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Linear RGB in 0..1.
    Rgb([f32; 3]),
    /// Hex string.
    Hex(String),
}

impl ColorSpec {
    /// Resolves the spec to a linear color.
    pub fn resolve(&self) -> Result<Vec3> {
        match self {
            ColorSpec::Rgb(rgb) => {
                let color = Vec3::from_array(*rgb);
                if color.is_finite() {
                    Ok(color)
                } else {
                    Err(MorphError::ParseError(format!("non-finite color {rgb:?}")))
                }
            }
            ColorSpec::Hex(hex) => parse_hex_color(hex),
        }
    }
}

impl From<Vec3> for ColorSpec {
    fn from(color: Vec3) -> Self {
        ColorSpec::Rgb(color.to_array())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_endpoints() {
        let a = Vec3::new(0.0, 0.5, 1.0);
        let b = Vec3::new(1.0, 0.5, 0.0);
        assert_eq!(blend_color(a, b, 1.0), b);
        assert_eq!(blend_color(a, b, 0.0), a);
        assert!((blend_color(a, b, 0.5) - Vec3::splat(0.5)).length() < 1e-6);
    }

    #[test]
    fn test_blend_converges() {
        let target = Vec3::new(0.2, 0.8, 0.4);
        let mut color = Vec3::ZERO;
        for _ in 0..200 {
            color = blend_color(color, target, 0.08);
        }
        assert!((color - target).length() < 1e-4);
    }

    #[test]
    fn test_parse_hex() {
        let c = parse_hex_color("#ff8000").unwrap();
        assert!((c - Vec3::new(1.0, 128.0 / 255.0, 0.0)).length() < 1e-6);
        assert!(parse_hex_color("00ff00").is_ok());
        assert!(parse_hex_color("#ff80").is_err());
        assert!(parse_hex_color("#gg0000").is_err());
    }

    #[test]
    fn test_color_spec_untagged() {
        let hex: ColorSpec = serde_json::from_str("\"#0000ff\"").unwrap();
        assert_eq!(hex.resolve().unwrap(), Vec3::Z);
        let rgb: ColorSpec = serde_json::from_str("[1.0, 0.0, 0.0]").unwrap();
        assert_eq!(rgb.resolve().unwrap(), Vec3::X);
    }
}
