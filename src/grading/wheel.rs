//! Polar encoding of lift/gamma/gain triples for circular wheel controls.
//!
//! A triple is split into an achromatic `master` part (the channel mean) and
//! a chroma part in the plane orthogonal to grey. The chroma part is stored
//! as a hue angle and a magnitude; the three channel axes sit 120° apart
//! (`r` at `angle`, `g` at `angle - 120°`, `b` at `angle - 240°`) after
//! removing the 90° display offset, so angle 0 points up on the wheel and
//! angles grow clockwise in screen space.
//!
//! Encoding and decoding are exact inverses (up to floating point) for any
//! triple whose chroma stays inside the wheel, so repeated drags converge
//! instead of drifting.

use std::f64::consts::{FRAC_PI_3, PI};

use crate::{
    foundation::core::{Point, clamp_or_lo},
    model::color::ColorTriple,
};

const OFFSET_SCALE: f64 = 50.0;
const MULTIPLIER_SCALE: f64 = 0.5;
const DISPLAY_OFFSET_DEG: f64 = 90.0;
const SQRT_3: f64 = 1.732_050_807_568_877_2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// How a triple's channels are interpreted.
pub enum WheelMode {
    /// Additive offsets around 0 (lift), full wheel = ±50.
    Offset,
    /// Multipliers around 1 (gamma, gain), full wheel = ±0.5.
    Multiplier,
}

impl WheelMode {
    /// Triple that leaves the image untouched.
    pub fn neutral(self) -> ColorTriple {
        match self {
            Self::Offset => ColorTriple::splat(0.0),
            Self::Multiplier => ColorTriple::splat(1.0),
        }
    }

    fn normalize(self, v: f64) -> f64 {
        match self {
            Self::Offset => v / OFFSET_SCALE,
            Self::Multiplier => (v - 1.0) / MULTIPLIER_SCALE,
        }
    }

    fn denormalize(self, n: f64) -> f64 {
        match self {
            Self::Offset => n * OFFSET_SCALE,
            Self::Multiplier => n * MULTIPLIER_SCALE + 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Wheel position of a triple.
pub struct WheelPolar {
    /// Hue angle in degrees (display convention; not wrapped).
    pub angle: f64,
    /// Distance from the wheel center, 0..=100.
    pub magnitude: f64,
    /// Achromatic component in normalized units (0 for wheel drags).
    #[serde(default)]
    pub master: f64,
}

impl WheelPolar {
    /// Chroma-only position, as produced by dragging the wheel puck.
    pub fn new(angle: f64, magnitude: f64) -> Self {
        Self {
            angle,
            magnitude,
            master: 0.0,
        }
    }

    /// Angle wrapped to `[0, 360)` for display.
    pub fn normalized_angle(&self) -> f64 {
        let a = self.angle.rem_euclid(360.0);
        // rem_euclid can round up to exactly 360 for tiny negatives.
        if a >= 360.0 { 0.0 } else { a }
    }

    /// Puck position on a wheel of `radius` pixels centered at `center`.
    pub fn to_point(&self, center: Point, radius: f64) -> Point {
        let phi = (self.angle - DISPLAY_OFFSET_DEG).to_radians();
        let r = radius * clamp_or_lo(self.magnitude, 0.0, 100.0) / 100.0;
        Point::new(center.x + r * phi.cos(), center.y + r * phi.sin())
    }

    /// Wheel position under `point`; distances past the rim clamp to 100.
    pub fn from_point(center: Point, radius: f64, point: Point) -> Self {
        let d = point - center;
        let magnitude = if radius > 0.0 {
            (d.hypot() / radius).min(1.0) * 100.0
        } else {
            0.0
        };
        let angle = (d.y.atan2(d.x).to_degrees() + DISPLAY_OFFSET_DEG).rem_euclid(360.0);
        Self::new(angle, magnitude)
    }
}

/// Encode a triple as a wheel position.
pub fn rgb_to_polar(triple: ColorTriple, mode: WheelMode) -> WheelPolar {
    let n = triple.map(|c| mode.normalize(c));
    let master = (n.r + n.g + n.b) / 3.0;

    // Chroma coordinates; the grey component cancels out of both.
    let x = (2.0 * n.r - n.g - n.b) / 3.0;
    let y = (n.g - n.b) / SQRT_3;

    WheelPolar {
        angle: y.atan2(x).to_degrees() + DISPLAY_OFFSET_DEG,
        magnitude: x.hypot(y).min(1.0) * 100.0,
        master,
    }
}

/// Decode a wheel position back into a triple.
pub fn polar_to_rgb(polar: WheelPolar, mode: WheelMode) -> ColorTriple {
    let phi = (polar.angle - DISPLAY_OFFSET_DEG).to_radians();
    let m = clamp_or_lo(polar.magnitude, 0.0, 100.0) / 100.0;
    let master = if polar.master.is_finite() {
        polar.master
    } else {
        0.0
    };

    let channel = |axis: f64| mode.denormalize(master + m * (phi - axis).cos());
    ColorTriple::new(channel(0.0), channel(2.0 * FRAC_PI_3), channel(4.0 * PI / 3.0))
}

#[cfg(test)]
#[path = "../../tests/unit/grading/wheel.rs"]
mod tests;
