//! Easing curves used by the morph controller.

use std::f32::consts::PI;

/// Assembly factor `sin(t·π)^0.5` for a segment-local `t`.
///
/// Zero at both segment boundaries and one at the midpoint, so attraction
/// is weakest exactly where the target buffer switches. `sin(π)` rounds to
/// a tiny negative value in `f32`; that residue is clamped to zero before
/// the square root.
#[must_use]
pub fn assembly_factor(t: f32) -> f32 {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    (t * PI).sin().max(0.0).sqrt()
}

/// Clamps a value to `[0, 1]`, mapping NaN to zero.
#[must_use]
pub fn sanitize_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_at_boundaries() {
        assert_eq!(assembly_factor(0.0), 0.0);
        assert!(assembly_factor(1.0) < 1e-3);
        assert!(assembly_factor(1.0).is_finite());
    }

    #[test]
    fn test_peak_at_midpoint() {
        assert!((assembly_factor(0.5) - 1.0).abs() < 1e-6);
        assert!(assembly_factor(0.25) < assembly_factor(0.5));
        assert!((assembly_factor(0.25) - assembly_factor(0.75)).abs() < 1e-5);
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize_unit(f32::NAN), 0.0);
        assert_eq!(sanitize_unit(f32::INFINITY), 1.0);
        assert_eq!(sanitize_unit(f32::NEG_INFINITY), 0.0);
        assert_eq!(sanitize_unit(0.3), 0.3);
    }

    proptest::proptest! {
        #[test]
        fn prop_assembly_factor_in_unit_range(t in -2.0f32..3.0) {
            let a = assembly_factor(t);
            proptest::prop_assert!((0.0..=1.0).contains(&a));
        }
    }
}
