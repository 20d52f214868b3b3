use crate::foundation::error::{CliprigError, CliprigResult};

pub use kurbo::{BezPath, CubicBez, Point, Vec2};

/// Times closer than this are treated as the same instant when sampling.
pub(crate) const TIME_EPSILON: f64 = 1e-9;

pub(crate) fn ensure_finite(what: &str, v: f64) -> CliprigResult<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(CliprigError::validation(format!("{what} must be finite")))
    }
}

pub(crate) fn ensure_non_negative(what: &str, v: f64) -> CliprigResult<()> {
    ensure_finite(what, v)?;
    if v < 0.0 {
        return Err(CliprigError::validation(format!("{what} must be >= 0")));
    }
    Ok(())
}

/// Clamp to `[lo, hi]`, mapping NaN to `lo`.
pub(crate) fn clamp_or_lo(v: f64, lo: f64, hi: f64) -> f64 {
    if v.is_nan() { lo } else { v.clamp(lo, hi) }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
