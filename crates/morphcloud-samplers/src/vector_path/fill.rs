//! Point-in-shape tests for closed outlines.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Rule deciding which regions of overlapping contours are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FillRule {
    /// Filled where the winding number is non-zero.
    #[default]
    NonZero,
    /// Filled where a ray crosses the outline an odd number of times.
    EvenOdd,
}

/// Signed area test: positive if `p` is left of the directed edge `a -> b`.
fn is_left(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (b - a).perp_dot(p - a)
}

/// Iterates the closing edges of a contour, last point back to first.
fn edges(contour: &[Vec2]) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
    contour
        .iter()
        .copied()
        .zip(contour.iter().copied().cycle().skip(1))
}

/// Winding number of all contours around `p`.
pub(crate) fn winding_number(contours: &[Vec<Vec2>], p: Vec2) -> i32 {
    let mut wn = 0;
    for contour in contours {
        for (a, b) in edges(contour) {
            if a.y <= p.y {
                if b.y > p.y && is_left(a, b, p) > 0.0 {
                    wn += 1;
                }
            } else if b.y <= p.y && is_left(a, b, p) < 0.0 {
                wn -= 1;
            }
        }
    }
    wn
}

/// Number of outline crossings of a ray cast from `p` toward +x.
pub(crate) fn crossing_count(contours: &[Vec<Vec2>], p: Vec2) -> u32 {
    let mut crossings = 0;
    for contour in contours {
        for (a, b) in edges(contour) {
            if (a.y > p.y) != (b.y > p.y) {
                let x = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
                if p.x < x {
                    crossings += 1;
                }
            }
        }
    }
    crossings
}

/// Returns true if `p` lies in the filled region under `rule`.
pub(crate) fn contains(contours: &[Vec<Vec2>], rule: FillRule, p: Vec2) -> bool {
    match rule {
        FillRule::NonZero => winding_number(contours, p) != 0,
        FillRule::EvenOdd => crossing_count(contours, p) % 2 == 1,
    }
}
