use std::collections::BTreeSet;
use std::path::Path;

use anyhow::Context as _;

use crate::{
    foundation::error::{CliprigError, CliprigResult},
    model::clip::Clip,
};

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// The clips of one editing project, as saved by the host application.
///
/// A timeline is plain data: it can be built programmatically or loaded from
/// JSON with [`Timeline::from_json`] / [`Timeline::from_path`], both of which
/// validate before returning.
pub struct Timeline {
    /// Placed clips, in insertion order.
    #[serde(default)]
    pub clips: Vec<Clip>,
}

impl Timeline {
    /// Empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a timeline.
    #[tracing::instrument(skip(json), fields(bytes = json.len()))]
    pub fn from_json(json: &str) -> CliprigResult<Self> {
        let timeline: Self = serde_json::from_str(json)?;
        timeline.validate()?;
        tracing::debug!(clips = timeline.clips.len(), "timeline loaded");
        Ok(timeline)
    }

    /// Read, parse and validate a timeline file.
    pub fn from_path(path: &Path) -> CliprigResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read timeline '{}'", path.display()))?;
        Self::from_json(&json)
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> CliprigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write pretty-printed JSON to `path`, creating parent directories.
    pub fn write_path(&self, path: &Path) -> CliprigResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create dir '{}'", parent.display()))?;
        }
        let json = self.to_json()?;
        std::fs::write(path, json).with_context(|| format!("write timeline '{}'", path.display()))?;
        Ok(())
    }

    /// Check every clip and that clip ids are unique.
    #[tracing::instrument(skip(self), fields(clips = self.clips.len()))]
    pub fn validate(&self) -> CliprigResult<()> {
        let mut seen = BTreeSet::new();
        for clip in &self.clips {
            if !seen.insert(clip.id.as_str()) {
                return Err(CliprigError::validation(format!(
                    "duplicate clip id '{}'",
                    clip.id
                )));
            }
            clip.validate()?;
        }
        Ok(())
    }

    /// Clip by id.
    pub fn clip(&self, id: &str) -> Option<&Clip> {
        self.clips.iter().find(|c| c.id == id)
    }

    /// Mutable clip by id; `None` feeds straight into the edit gateway, which
    /// treats a missing clip as a no-op.
    pub fn clip_mut(&mut self, id: &str) -> Option<&mut Clip> {
        self.clips.iter_mut().find(|c| c.id == id)
    }

    /// Place a validated clip; fails if the id is taken.
    pub fn add_clip(&mut self, clip: Clip) -> CliprigResult<()> {
        if self.clip(&clip.id).is_some() {
            return Err(CliprigError::validation(format!(
                "duplicate clip id '{}'",
                clip.id
            )));
        }
        clip.validate()?;
        self.clips.push(clip);
        Ok(())
    }

    /// Take a clip off the timeline.
    pub fn remove_clip(&mut self, id: &str) -> Option<Clip> {
        let idx = self.clips.iter().position(|c| c.id == id)?;
        Some(self.clips.remove(idx))
    }

    /// Clips visible at `t`, bottom track first (stable within a track).
    pub fn clips_at(&self, t: f64) -> Vec<&Clip> {
        let mut visible: Vec<&Clip> = self
            .clips
            .iter()
            .filter(|c| c.window.contains(t))
            .collect();
        visible.sort_by_key(|c| c.track);
        visible
    }

    /// End of the last clip, or 0 for an empty timeline.
    pub fn duration(&self) -> f64 {
        self.clips
            .iter()
            .map(|c| c.window.end_at())
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/timeline.rs"]
mod tests;
