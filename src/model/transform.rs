use std::fmt;
use std::str::FromStr;

use crate::foundation::error::CliprigError;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Visual placement of a clip at one instant.
///
/// `scale` and `opacity` are percentages (100 = identity / fully opaque),
/// `rotation` is in degrees.
pub struct ClipTransform {
    /// Horizontal offset in canvas pixels.
    pub x: f64,
    /// Vertical offset in canvas pixels.
    pub y: f64,
    /// Uniform scale in percent.
    pub scale: f64,
    /// Rotation in degrees, clockwise.
    pub rotation: f64,
    /// Opacity in percent.
    pub opacity: f64,
}

impl Default for ClipTransform {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 100.0,
            rotation: 0.0,
            opacity: 100.0,
        }
    }
}

impl ClipTransform {
    /// Read one property.
    pub fn get(&self, key: TransformKey) -> f64 {
        match key {
            TransformKey::X => self.x,
            TransformKey::Y => self.y,
            TransformKey::Scale => self.scale,
            TransformKey::Rotation => self.rotation,
            TransformKey::Opacity => self.opacity,
        }
    }

    /// Overwrite one property.
    pub fn set(&mut self, key: TransformKey, value: f64) {
        match key {
            TransformKey::X => self.x = value,
            TransformKey::Y => self.y = value,
            TransformKey::Scale => self.scale = value,
            TransformKey::Rotation => self.rotation = value,
            TransformKey::Opacity => self.opacity = value,
        }
    }

    /// Copy with one property replaced.
    pub fn with(mut self, key: TransformKey, value: f64) -> Self {
        self.set(key, value);
        self
    }

    /// Affine matrix for a renderer: translate, then rotate and scale about
    /// the clip origin. Opacity is not part of the matrix.
    pub fn to_affine(&self) -> kurbo::Affine {
        let t_translate = kurbo::Affine::translate((self.x, self.y));
        let t_rotate = kurbo::Affine::rotate(self.rotation.to_radians());
        let t_scale = kurbo::Affine::scale(self.scale / 100.0);
        t_translate * t_rotate * t_scale
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
/// The animatable transform properties.
pub enum TransformKey {
    /// Horizontal offset.
    X,
    /// Vertical offset.
    Y,
    /// Uniform scale.
    Scale,
    /// Rotation.
    Rotation,
    /// Opacity.
    Opacity,
}

impl TransformKey {
    /// Every key, in declaration order.
    pub const ALL: [TransformKey; 5] = [
        TransformKey::X,
        TransformKey::Y,
        TransformKey::Scale,
        TransformKey::Rotation,
        TransformKey::Opacity,
    ];

    /// Stable lowercase name (matches the JSON field name).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Scale => "scale",
            Self::Rotation => "rotation",
            Self::Opacity => "opacity",
        }
    }
}

impl fmt::Display for TransformKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransformKey {
    type Err = CliprigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CliprigError::validation(format!("unknown transform property '{s}'")))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// A partial set of transform values; `None` leaves a property untouched.
pub struct TransformPatch {
    /// Horizontal offset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// Vertical offset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// Uniform scale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    /// Rotation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    /// Opacity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

impl TransformPatch {
    /// Patch touching a single property.
    pub fn single(key: TransformKey, value: f64) -> Self {
        let mut patch = Self::default();
        patch.set(key, value);
        patch
    }

    /// Set (or replace) one property in the patch.
    pub fn set(&mut self, key: TransformKey, value: f64) {
        let slot = match key {
            TransformKey::X => &mut self.x,
            TransformKey::Y => &mut self.y,
            TransformKey::Scale => &mut self.scale,
            TransformKey::Rotation => &mut self.rotation,
            TransformKey::Opacity => &mut self.opacity,
        };
        *slot = Some(value);
    }

    /// Builder form of [`TransformPatch::set`].
    pub fn with(mut self, key: TransformKey, value: f64) -> Self {
        self.set(key, value);
        self
    }

    /// Value carried for `key`, if any.
    pub fn get(&self, key: TransformKey) -> Option<f64> {
        match key {
            TransformKey::X => self.x,
            TransformKey::Y => self.y,
            TransformKey::Scale => self.scale,
            TransformKey::Rotation => self.rotation,
            TransformKey::Opacity => self.opacity,
        }
    }

    /// True when no property is set.
    pub fn is_empty(&self) -> bool {
        TransformKey::ALL.iter().all(|k| self.get(*k).is_none())
    }

    /// Overlay the set properties onto `target`.
    pub fn apply_to(&self, target: &mut ClipTransform) {
        for key in TransformKey::ALL {
            if let Some(v) = self.get(key) {
                target.set(key, v);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/transform.rs"]
mod tests;
