use std::collections::BTreeSet;
use std::fmt;

use crate::{
    animation::interp::sample_keys,
    foundation::core::ensure_finite,
    foundation::error::{CliprigError, CliprigResult},
    model::transform::{ClipTransform, TransformPatch},
};

/// Default window within which an edit snaps onto an existing keyframe.
pub const KEYFRAME_SNAP_S: f64 = 0.1;

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
/// Stable keyframe identity. Survives re-sorting; `0` means "unassigned".
pub struct KeyframeId(pub u64);

impl fmt::Display for KeyframeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "kf{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A full transform snapshot at a clip-local time.
pub struct Keyframe {
    #[serde(default)]
    pub(crate) id: KeyframeId,
    /// Seconds since clip start.
    pub time: f64,
    /// Transform at `time`.
    #[serde(flatten)]
    pub value: ClipTransform,
}

impl Keyframe {
    /// Unassigned keyframe; the store gives it an id on insertion.
    pub fn new(time: f64, value: ClipTransform) -> Self {
        Self {
            id: KeyframeId::default(),
            time,
            value,
        }
    }

    /// Stable id.
    pub fn id(&self) -> KeyframeId {
        self.id
    }
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(from = "Vec<Keyframe>", into = "Vec<Keyframe>")]
/// Keyframes of one clip, kept strictly ascending by time.
///
/// Entries are addressed by [`KeyframeId`], never by position, so ids stay
/// valid across inserts and re-sorts.
pub struct KeyframeStore {
    keys: Vec<Keyframe>, // sorted by time
    next_id: u64,
}

impl PartialEq for KeyframeStore {
    fn eq(&self, other: &Self) -> bool {
        self.keys == other.keys
    }
}

impl From<Vec<Keyframe>> for KeyframeStore {
    fn from(mut keys: Vec<Keyframe>) -> Self {
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));

        let max_id = keys.iter().map(|k| k.id.0).max().unwrap_or(0);
        // Worst case every key needs a fresh id above `max_id`.
        if max_id.checked_add(keys.len() as u64 + 1).is_none() {
            tracing::warn!(count = keys.len(), "keyframe id space exhausted, renumbering");
            for (k, n) in keys.iter_mut().zip(1..) {
                k.id = KeyframeId(n);
            }
            let next_id = keys.len() as u64 + 1;
            return Self { keys, next_id };
        }

        let mut seen = BTreeSet::new();
        let mut next_id = max_id + 1;
        for k in &mut keys {
            if k.id.0 == 0 || !seen.insert(k.id) {
                k.id = KeyframeId(next_id);
                seen.insert(k.id);
                next_id += 1;
            }
        }
        Self { keys, next_id }
    }
}

impl From<KeyframeStore> for Vec<Keyframe> {
    fn from(store: KeyframeStore) -> Self {
        store.keys
    }
}

impl KeyframeStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keyframes.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// True when the clip is not animated.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Keyframes in ascending time order.
    pub fn as_slice(&self) -> &[Keyframe] {
        &self.keys
    }

    /// Iterate in ascending time order.
    pub fn iter(&self) -> std::slice::Iter<'_, Keyframe> {
        self.keys.iter()
    }

    /// Keyframe by id.
    pub fn get(&self, id: KeyframeId) -> Option<&Keyframe> {
        self.keys.iter().find(|k| k.id == id)
    }

    /// Current position of `id` in time order.
    pub fn position(&self, id: KeyframeId) -> Option<usize> {
        self.keys.iter().position(|k| k.id == id)
    }

    /// Interpolated transform at clip-local time `t`; `None` when empty.
    pub fn sample(&self, t: f64) -> Option<ClipTransform> {
        sample_keys(&self.keys, t)
    }

    /// Merge `patch` into the keyframe nearest `time` if one lies within
    /// `epsilon`; otherwise insert a keyframe built from the interpolated
    /// transform at `time` (or `fallback` when the store is empty) with
    /// `patch` on top.
    ///
    /// Returns the id of the touched keyframe, or `None` (no-op) when `time`
    /// is not finite or no fresh id is left.
    pub fn upsert(
        &mut self,
        time: f64,
        patch: &TransformPatch,
        fallback: ClipTransform,
        epsilon: f64,
    ) -> Option<KeyframeId> {
        if !time.is_finite() {
            tracing::debug!(time, "ignoring keyframe upsert at non-finite time");
            return None;
        }

        let nearest = self
            .keys
            .iter_mut()
            .map(|k| ((k.time - time).abs(), k))
            .filter(|(d, _)| *d <= epsilon)
            .min_by(|(a, _), (b, _)| a.total_cmp(b));
        if let Some((_, existing)) = nearest {
            patch.apply_to(&mut existing.value);
            tracing::debug!(id = %existing.id, time = existing.time, "merged into keyframe");
            return Some(existing.id);
        }

        let mut value = self.sample(time).unwrap_or(fallback);
        patch.apply_to(&mut value);
        let Some(id) = self.alloc_id() else {
            tracing::warn!(time, "keyframe id space exhausted, upsert ignored");
            return None;
        };
        let idx = self.keys.partition_point(|k| k.time < time);
        self.keys.insert(idx, Keyframe { id, time, value });
        tracing::debug!(%id, time, "inserted keyframe");
        Some(id)
    }

    /// Delete the keyframe with `id`.
    pub fn remove(&mut self, id: KeyframeId) -> Option<Keyframe> {
        let idx = self.position(id)?;
        Some(self.keys.remove(idx))
    }

    /// Overlay `patch` onto an existing keyframe without moving it.
    pub fn update(&mut self, id: KeyframeId, patch: &TransformPatch) -> bool {
        match self.keys.iter_mut().find(|k| k.id == id) {
            Some(k) => {
                patch.apply_to(&mut k.value);
                true
            }
            None => false,
        }
    }

    /// Move a keyframe to `new_time`, keeping the list sorted.
    ///
    /// Fails if `new_time` is not finite or lands within `epsilon` of
    /// another keyframe.
    pub fn retime(&mut self, id: KeyframeId, new_time: f64, epsilon: f64) -> CliprigResult<()> {
        ensure_finite("keyframe time", new_time)?;
        let idx = self
            .position(id)
            .ok_or_else(|| CliprigError::keyframe(format!("no keyframe {id}")))?;
        if self
            .keys
            .iter()
            .any(|k| k.id != id && (k.time - new_time).abs() <= epsilon)
        {
            return Err(CliprigError::keyframe(format!(
                "keyframe {id} would collide with another keyframe at {new_time}s"
            )));
        }
        let mut moved = self.keys.remove(idx);
        moved.time = new_time;
        let at = self.keys.partition_point(|k| k.time < new_time);
        self.keys.insert(at, moved);
        Ok(())
    }

    /// Drop every keyframe; ids are not reused.
    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// Check finite, strictly ascending times and unique ids.
    ///
    /// Spacing against the snap window is not checked: the window is an
    /// editor setting, and `upsert`/`retime` keep keys more than one window
    /// apart for whatever window they are given.
    pub fn validate(&self) -> CliprigResult<()> {
        for k in &self.keys {
            ensure_finite("keyframe time", k.time)
                .map_err(|_| CliprigError::keyframe("keyframe time must be finite"))?;
        }
        if !self.keys.windows(2).all(|w| w[0].time < w[1].time) {
            return Err(CliprigError::keyframe(
                "keyframe times must be strictly ascending",
            ));
        }
        let mut ids = BTreeSet::new();
        if !self.keys.iter().all(|k| k.id.0 != 0 && ids.insert(k.id)) {
            return Err(CliprigError::keyframe("keyframe ids must be unique"));
        }
        Ok(())
    }

    fn alloc_id(&mut self) -> Option<KeyframeId> {
        let id = self.next_id.max(1);
        self.next_id = id.checked_add(1)?;
        Some(KeyframeId(id))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/keyframe.rs"]
mod tests;
