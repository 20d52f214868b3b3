use crate::{
    animation::keyframe::Keyframe,
    foundation::core::TIME_EPSILON,
    model::clip::Clip,
    model::transform::ClipTransform,
};

/// Linear interpolation between two values of the same type.
pub trait Lerp: Sized {
    /// Value at `t` between `a` (t = 0) and `b` (t = 1).
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for ClipTransform {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            x: f64::lerp(&a.x, &b.x, t),
            y: f64::lerp(&a.y, &b.y, t),
            scale: f64::lerp(&a.scale, &b.scale, t),
            rotation: f64::lerp(&a.rotation, &b.rotation, t),
            opacity: f64::lerp(&a.opacity, &b.opacity, t),
        }
    }
}

/// Effective transform of `clip` at timeline time `playback_time`.
///
/// Pure: the result depends only on the clip and the time. Without keyframes
/// the static transform is returned; before the first / after the last
/// keyframe the boundary keyframe is held.
pub fn interpolate(clip: &Clip, playback_time: f64) -> ClipTransform {
    let t = clip.window.local_time(playback_time);
    sample_keys(clip.keyframes.as_slice(), t).unwrap_or(clip.transform)
}

/// Sample a sorted keyframe list at clip-local time `t`; `None` when empty.
pub(crate) fn sample_keys(keys: &[Keyframe], t: f64) -> Option<ClipTransform> {
    let first = keys.first()?;

    // First key strictly after t.
    let idx = keys.partition_point(|k| k.time <= t);

    if idx == 0 {
        return Some(first.value);
    }
    let a = &keys[idx - 1];
    // start_at + time can come back a ulp off; stored keys must pass through verbatim.
    if idx >= keys.len() || t - a.time <= TIME_EPSILON {
        return Some(a.value);
    }

    let b = &keys[idx];
    if b.time - t <= TIME_EPSILON {
        return Some(b.value);
    }

    // Both snaps above keep b.time - a.time > 2 * TIME_EPSILON.
    let factor = (t - a.time) / (b.time - a.time);
    Some(ClipTransform::lerp(&a.value, &b.value, factor))
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interp.rs"]
mod tests;
