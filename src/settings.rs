use std::path::Path;

use anyhow::Context as _;

use crate::{
    animation::keyframe::KEYFRAME_SNAP_S,
    foundation::error::{CliprigError, CliprigResult},
    grading::curve::{CURVE_TENSION, MAX_CURVE_TENSION},
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Tunables for interactive editing.
pub struct EditorSettings {
    /// Edits closer than this (seconds) to an existing keyframe merge into it.
    #[serde(default = "default_keyframe_snap_s")]
    pub keyframe_snap_s: f64,
    /// Catmull-Rom tension for tone curves.
    #[serde(default = "default_curve_tension")]
    pub curve_tension: f64,
}

fn default_keyframe_snap_s() -> f64 {
    KEYFRAME_SNAP_S
}

fn default_curve_tension() -> f64 {
    CURVE_TENSION
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            keyframe_snap_s: default_keyframe_snap_s(),
            curve_tension: default_curve_tension(),
        }
    }
}

impl EditorSettings {
    /// Parse and validate settings; missing fields take their defaults.
    pub fn from_json(json: &str) -> CliprigResult<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read, parse and validate a settings file.
    pub fn from_path(path: &Path) -> CliprigResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read settings '{}'", path.display()))?;
        Self::from_json(&json)
    }

    /// Snap window must be positive; tension within `0..=MAX_CURVE_TENSION`.
    pub fn validate(&self) -> CliprigResult<()> {
        if !(self.keyframe_snap_s.is_finite() && self.keyframe_snap_s > 0.0) {
            return Err(CliprigError::validation(format!(
                "keyframeSnapS must be finite and > 0, got {}",
                self.keyframe_snap_s
            )));
        }
        if !(0.0..=MAX_CURVE_TENSION).contains(&self.curve_tension) {
            return Err(CliprigError::validation(format!(
                "curveTension must be within 0..={MAX_CURVE_TENSION}, got {}",
                self.curve_tension
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/settings.rs"]
mod tests;
