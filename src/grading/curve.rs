//! Catmull-Rom tone curves.
//!
//! A [`ToneCurve`] holds five values on a 0..100 scale at fixed inputs
//! x = 0, 64, 128, 192, 256. The spline through them is built as four cubic
//! Bezier segments; neighbor points are clamped at the ends, so the curve
//! passes exactly through every control point with matching tangents at the
//! interior ones.

use kurbo::ParamCurve as _;

use crate::{
    foundation::core::{BezPath, CubicBez, Point, clamp_or_lo},
    model::color::{CURVE_POINTS, ToneCurve},
};

/// Default Catmull-Rom tension.
pub const CURVE_TENSION: f64 = 0.35;
/// Largest tension that keeps every segment's `x(t)` monotonic.
pub const MAX_CURVE_TENSION: f64 = 3.0;
/// Width of the curve's input domain in render units.
pub const CURVE_WIDTH: f64 = 256.0;
/// Number of entries in a baked lookup table.
pub const LUT_SIZE: usize = 256;

const STEP: f64 = CURVE_WIDTH / (CURVE_POINTS - 1) as f64;
const SOLVE_ITERATIONS: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq)]
/// Spline through a tone curve's control points, in value space
/// (x in `0..=256`, y in curve units).
pub struct CurveSpline {
    segments: [CubicBez; CURVE_POINTS - 1],
}

impl CurveSpline {
    /// Fit the spline with the given tension, clamped to
    /// `0..=MAX_CURVE_TENSION`.
    pub fn new(curve: &ToneCurve, tension: f64) -> Self {
        let tension = clamp_or_lo(tension, 0.0, MAX_CURVE_TENSION);
        let pts: [Point; CURVE_POINTS] =
            std::array::from_fn(|i| Point::new(i as f64 * STEP, curve.0[i]));
        let k = tension / 6.0;

        let segments = std::array::from_fn(|i| {
            let p0 = pts[i.saturating_sub(1)];
            let p1 = pts[i];
            let p2 = pts[i + 1];
            let p3 = pts[(i + 2).min(CURVE_POINTS - 1)];

            let cp1 = p1 + (p2 - p0) * k;
            let cp2 = p2 - (p3 - p1) * k;
            CubicBez::new(p1, cp1, cp2, p2)
        });
        Self { segments }
    }

    /// Spline with [`CURVE_TENSION`].
    pub fn with_default_tension(curve: &ToneCurve) -> Self {
        Self::new(curve, CURVE_TENSION)
    }

    /// The four Bezier segments, left to right.
    pub fn segments(&self) -> &[CubicBez; CURVE_POINTS - 1] {
        &self.segments
    }

    /// Curve output (0..100 scale, unclamped) for input `x` in `0..=256`.
    /// Inputs outside the domain are clamped to it.
    pub fn sample(&self, x: f64) -> f64 {
        let x = clamp_or_lo(x, 0.0, CURVE_WIDTH);
        let idx = ((x / STEP).floor() as usize).min(self.segments.len() - 1);
        let seg = &self.segments[idx];

        if x <= seg.p0.x {
            return seg.p0.y;
        }
        if x >= seg.p3.x {
            return seg.p3.y;
        }

        // x(t) is monotonic because tension is at most MAX_CURVE_TENSION.
        let (mut lo, mut hi) = (0.0, 1.0);
        for _ in 0..SOLVE_ITERATIONS {
            let mid = 0.5 * (lo + hi);
            if seg.eval(mid).x < x {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        seg.eval(0.5 * (lo + hi)).y
    }

    /// Sample every integer input `0..256` into a table clamped to `0..=100`.
    pub fn bake_lut(&self) -> [f64; LUT_SIZE] {
        std::array::from_fn(|i| self.sample(i as f64).clamp(0.0, 100.0))
    }

    /// Path in render space for a plot `height` pixels tall and 256 wide:
    /// y grows downward, value 100 sits at the top.
    pub fn to_render_path(&self, height: f64) -> BezPath {
        let map = |p: Point| Point::new(p.x, height - p.y / 100.0 * height);
        let mut path = BezPath::new();
        path.move_to(map(self.segments[0].p0));
        for seg in &self.segments {
            path.curve_to(map(seg.p1), map(seg.p2), map(seg.p3));
        }
        path
    }
}

/// New control-point value after a vertical drag of `pointer_dy` pixels
/// (positive = downward) inside a plot `container_height` pixels tall.
/// The result is clamped to `0..=100`.
pub fn drag_value(start_value: f64, pointer_dy: f64, container_height: f64) -> f64 {
    if container_height <= 0.0 || !container_height.is_finite() {
        return clamp_or_lo(start_value, 0.0, 100.0);
    }
    let delta = -pointer_dy / container_height * 100.0;
    clamp_or_lo(start_value + delta, 0.0, 100.0)
}

#[cfg(test)]
#[path = "../../tests/unit/grading/curve.rs"]
mod tests;
