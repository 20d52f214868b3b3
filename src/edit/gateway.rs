use crate::{
    animation::keyframe::{Keyframe, KeyframeId},
    model::clip::Clip,
    model::color::ColorEdit,
    model::transform::{TransformKey, TransformPatch},
    settings::EditorSettings,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Which path a transform edit took.
pub enum EditOutcome {
    /// No clip selected, or the value or time was not finite.
    Ignored,
    /// The clip has no keyframes; its static transform was changed.
    Static,
    /// A new keyframe was created.
    Inserted(KeyframeId),
    /// An existing keyframe within the snap window was updated.
    Merged(KeyframeId),
}

impl EditOutcome {
    /// Keyframe touched by the edit, if any.
    pub fn keyframe(self) -> Option<KeyframeId> {
        match self {
            Self::Inserted(id) | Self::Merged(id) => Some(id),
            Self::Ignored | Self::Static => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
/// Single entry point for edits coming from the UI.
///
/// Decides whether a transform change lands in a keyframe or in the clip's
/// static transform, and applies color edits as whole-value replacements.
/// A missing clip is a no-op for every operation.
pub struct MutationGateway {
    /// Snap window and curve tension.
    pub settings: EditorSettings,
}

impl MutationGateway {
    /// Gateway using `settings`.
    pub fn new(settings: EditorSettings) -> Self {
        Self { settings }
    }

    /// Set transform property `key` to `value` at timeline time
    /// `playback_time`.
    ///
    /// Animated clips get a keyframe upsert (merged into a keyframe within
    /// the snap window, otherwise inserted on top of the interpolated
    /// transform), and the value is also written to the static transform.
    /// Clips without keyframes only have their static transform changed.
    #[tracing::instrument(level = "debug", skip(self, clip), fields(clip = clip.as_deref().map(|c| c.id.as_str())))]
    pub fn set_parameter(
        &self,
        clip: Option<&mut Clip>,
        key: TransformKey,
        value: f64,
        playback_time: f64,
    ) -> EditOutcome {
        let Some(clip) = clip else {
            return EditOutcome::Ignored;
        };
        if !(value.is_finite() && playback_time.is_finite()) {
            tracing::debug!("ignoring non-finite value or time");
            return EditOutcome::Ignored;
        }

        if !clip.has_keyframes() {
            clip.transform.set(key, value);
            tracing::debug!("static transform updated");
            return EditOutcome::Static;
        }

        let before = clip.keyframes.len();
        let patch = TransformPatch::single(key, value);
        let Some(id) = clip.upsert_keyframe(playback_time, &patch, self.settings.keyframe_snap_s)
        else {
            return EditOutcome::Ignored;
        };
        // The static transform doubles as the fallback once keyframes are cleared.
        clip.transform.set(key, value);

        if clip.keyframes.len() > before {
            tracing::debug!(%id, "keyframe inserted");
            EditOutcome::Inserted(id)
        } else {
            tracing::debug!(%id, "keyframe merged");
            EditOutcome::Merged(id)
        }
    }

    /// Snapshot the interpolated transform at `playback_time` as a keyframe.
    ///
    /// Returns the existing keyframe's id when one already lies within the
    /// snap window.
    #[tracing::instrument(level = "debug", skip(self, clip))]
    pub fn add_keyframe(&self, clip: Option<&mut Clip>, playback_time: f64) -> Option<KeyframeId> {
        let clip = clip?;
        clip.upsert_keyframe(
            playback_time,
            &TransformPatch::default(),
            self.settings.keyframe_snap_s,
        )
    }

    /// Delete keyframe `id` from the clip.
    #[tracing::instrument(level = "debug", skip(self, clip))]
    pub fn remove_keyframe(&self, clip: Option<&mut Clip>, id: KeyframeId) -> Option<Keyframe> {
        let removed = clip?.remove_keyframe(id);
        if removed.is_none() {
            tracing::debug!("no such keyframe");
        }
        removed
    }

    /// Replace the clip's grade with `edit` applied. Returns `false` when
    /// there is no clip.
    #[tracing::instrument(level = "debug", skip(self, clip))]
    pub fn apply_color(&self, clip: Option<&mut Clip>, edit: &ColorEdit) -> bool {
        match clip {
            Some(clip) => {
                clip.color = clip.color.with_edit(edit);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/edit/gateway.rs"]
mod tests;
