use crate::{
    animation::interp,
    animation::keyframe::{Keyframe, KeyframeId, KeyframeStore},
    foundation::core::{ensure_finite, ensure_non_negative},
    foundation::error::{CliprigError, CliprigResult},
    model::color::ColorGrade,
    model::transform::{ClipTransform, TransformPatch},
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Where a clip sits on the timeline and which part of its media it plays.
pub struct TimeWindow {
    /// Timeline position of the clip's first frame, in seconds.
    pub start_at: f64,
    /// Timeline length, in seconds.
    pub duration: f64,
    /// Seconds cut from the head of the media.
    #[serde(default)]
    pub trim_start: f64,
    /// Seconds cut from the tail of the media.
    #[serde(default)]
    pub trim_end: f64,
    /// Playback rate (1 = realtime).
    #[serde(default = "default_speed")]
    pub speed: f64,
}

fn default_speed() -> f64 {
    1.0
}

impl TimeWindow {
    /// Window starting at `start_at` lasting `duration` seconds, untrimmed.
    pub fn new(start_at: f64, duration: f64) -> Self {
        Self {
            start_at,
            duration,
            trim_start: 0.0,
            trim_end: 0.0,
            speed: 1.0,
        }
    }

    /// Timeline time just past the clip's last frame.
    pub fn end_at(&self) -> f64 {
        self.start_at + self.duration
    }

    /// `start_at <= t < end_at`.
    pub fn contains(&self, t: f64) -> bool {
        self.start_at <= t && t < self.end_at()
    }

    /// Seconds since the clip started.
    pub fn local_time(&self, t: f64) -> f64 {
        t - self.start_at
    }

    /// Media time shown at timeline time `t`.
    pub fn source_time(&self, t: f64) -> f64 {
        self.trim_start + self.local_time(t) * self.speed
    }

    /// Check for finite, non-negative lengths and a positive speed.
    pub fn validate(&self) -> CliprigResult<()> {
        ensure_finite("startAt", self.start_at)?;
        ensure_non_negative("duration", self.duration)?;
        ensure_non_negative("trimStart", self.trim_start)?;
        ensure_non_negative("trimEnd", self.trim_end)?;
        ensure_finite("speed", self.speed)?;
        if self.speed <= 0.0 {
            return Err(CliprigError::validation("speed must be > 0"));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Kind of media a clip places.
pub enum MediaKind {
    /// Video file.
    Video,
    /// Still image.
    Image,
    /// Audio file.
    Audio,
    /// Text overlay.
    Text,
    /// Vector shape.
    Shape,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Reference to the clip's media, resolved by the host application.
pub struct MediaRef {
    /// Media kind.
    pub kind: MediaKind,
    /// Host-defined source (URL, asset key, text body).
    pub source: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// A media element placed on the timeline with its visual parameters.
pub struct Clip {
    /// Identifier, unique within a timeline.
    pub id: String,
    /// Track index (0 = bottom).
    #[serde(default)]
    pub track: u32,
    /// Media reference.
    pub media: MediaRef,
    /// Timeline placement.
    #[serde(flatten)]
    pub window: TimeWindow,
    /// Static transform, used everywhere when there are no keyframes.
    #[serde(default)]
    pub transform: ClipTransform,
    /// Grading block, constant over the clip.
    #[serde(default)]
    pub color: ColorGrade,
    /// Transform keyframes, times relative to `window.start_at`.
    #[serde(default, skip_serializing_if = "KeyframeStore::is_empty")]
    pub keyframes: KeyframeStore,
}

impl Clip {
    /// Clip with identity transform, neutral grade and no keyframes.
    pub fn new(id: impl Into<String>, media: MediaRef, window: TimeWindow) -> Self {
        Self {
            id: id.into(),
            track: 0,
            media,
            window,
            transform: ClipTransform::default(),
            color: ColorGrade::default(),
            keyframes: KeyframeStore::default(),
        }
    }

    /// Builder: place on `track`.
    pub fn on_track(mut self, track: u32) -> Self {
        self.track = track;
        self
    }

    /// Effective transform at timeline time `playback_time`.
    pub fn transform_at(&self, playback_time: f64) -> ClipTransform {
        interp::interpolate(self, playback_time)
    }

    /// True when the transform is animated.
    pub fn has_keyframes(&self) -> bool {
        !self.keyframes.is_empty()
    }

    /// Merge `patch` into the keyframe near `playback_time` (within
    /// `epsilon` seconds) or insert a new one based on the interpolated
    /// transform at that time.
    pub fn upsert_keyframe(
        &mut self,
        playback_time: f64,
        patch: &TransformPatch,
        epsilon: f64,
    ) -> Option<KeyframeId> {
        let local = self.window.local_time(playback_time);
        self.keyframes.upsert(local, patch, self.transform, epsilon)
    }

    /// Remove the keyframe with `id`.
    pub fn remove_keyframe(&mut self, id: KeyframeId) -> Option<Keyframe> {
        self.keyframes.remove(id)
    }

    /// Validate window, transform, grade and keyframes.
    pub fn validate(&self) -> CliprigResult<()> {
        if self.id.trim().is_empty() {
            return Err(CliprigError::validation("clip id must not be empty"));
        }
        self.window
            .validate()
            .and_then(|()| {
                for key in crate::model::transform::TransformKey::ALL {
                    ensure_finite(key.as_str(), self.transform.get(key))?;
                }
                self.color.validate()
            })
            .and_then(|()| self.keyframes.validate())
            .map_err(|e| match e {
                CliprigError::Validation(msg) => {
                    CliprigError::validation(format!("clip '{}': {msg}", self.id))
                }
                CliprigError::Keyframe(msg) => {
                    CliprigError::keyframe(format!("clip '{}': {msg}", self.id))
                }
                other => other,
            })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/clip.rs"]
mod tests;
