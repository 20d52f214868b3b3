use crate::{
    foundation::core::{clamp_or_lo, ensure_finite},
    foundation::error::{CliprigError, CliprigResult},
    grading::wheel::WheelMode,
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Per-channel offsets (lift) or multipliers (gamma, gain).
pub struct ColorTriple {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
}

impl ColorTriple {
    /// Build a triple.
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Same value on every channel.
    pub const fn splat(v: f64) -> Self {
        Self { r: v, g: v, b: v }
    }

    /// Channels as an array `[r, g, b]`.
    pub fn to_array(self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    /// Build from `[r, g, b]`.
    pub fn from_array(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }

    /// Apply `f` to every channel.
    pub fn map(self, mut f: impl FnMut(f64) -> f64) -> Self {
        Self::new(f(self.r), f(self.g), f(self.b))
    }

    /// Largest per-channel absolute difference.
    pub fn max_abs_diff(self, other: Self) -> f64 {
        (self.r - other.r)
            .abs()
            .max((self.g - other.g).abs())
            .max((self.b - other.b).abs())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// The three primary grading wheels.
pub enum WheelKind {
    /// Shadows, additive.
    Lift,
    /// Midtones, multiplicative.
    Gamma,
    /// Highlights, multiplicative.
    Gain,
}

impl WheelKind {
    /// How this wheel's triple is encoded.
    pub fn mode(self) -> WheelMode {
        match self {
            Self::Lift => WheelMode::Offset,
            Self::Gamma | Self::Gain => WheelMode::Multiplier,
        }
    }

    /// Declared per-channel slider range.
    pub fn range(self) -> (f64, f64) {
        match self.mode() {
            WheelMode::Offset => (-50.0, 50.0),
            WheelMode::Multiplier => (0.5, 1.5),
        }
    }

    /// Value that leaves the image untouched.
    pub fn neutral(self) -> ColorTriple {
        self.mode().neutral()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Tone curve channel.
pub enum CurveChannel {
    /// Luma curve applied to all channels.
    Master,
    /// Red only.
    Red,
    /// Green only.
    Green,
    /// Blue only.
    Blue,
}

impl CurveChannel {
    /// Every channel, in render order.
    pub const ALL: [CurveChannel; 4] = [
        CurveChannel::Master,
        CurveChannel::Red,
        CurveChannel::Green,
        CurveChannel::Blue,
    ];
}

/// Number of control points per tone curve.
pub const CURVE_POINTS: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
/// Five evenly spaced control-point values on a 0..100 scale.
pub struct ToneCurve(pub [f64; CURVE_POINTS]);

impl Default for ToneCurve {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ToneCurve {
    /// Straight diagonal: output equals input.
    pub const IDENTITY: ToneCurve = ToneCurve([0.0, 25.0, 50.0, 75.0, 100.0]);

    /// Control-point values.
    pub fn points(&self) -> &[f64; CURVE_POINTS] {
        &self.0
    }

    /// Copy with point `index` replaced; out-of-range indices are ignored.
    pub fn with_point(mut self, index: usize, value: f64) -> Self {
        if let Some(slot) = self.0.get_mut(index) {
            *slot = value;
        } else {
            tracing::debug!(index, "ignoring tone curve point outside 0..5");
        }
        self
    }

    /// True when the curve is the identity.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// The four tone curves of a clip.
pub struct ToneCurves {
    /// Luma.
    pub master: ToneCurve,
    /// Red.
    pub red: ToneCurve,
    /// Green.
    pub green: ToneCurve,
    /// Blue.
    pub blue: ToneCurve,
}

impl ToneCurves {
    /// Curve for `channel`.
    pub fn get(&self, channel: CurveChannel) -> &ToneCurve {
        match channel {
            CurveChannel::Master => &self.master,
            CurveChannel::Red => &self.red,
            CurveChannel::Green => &self.green,
            CurveChannel::Blue => &self.blue,
        }
    }

    fn get_mut(&mut self, channel: CurveChannel) -> &mut ToneCurve {
        match channel {
            CurveChannel::Master => &mut self.master,
            CurveChannel::Red => &mut self.red,
            CurveChannel::Green => &mut self.green,
            CurveChannel::Blue => &mut self.blue,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Background removal against a reference color. Data only; keying happens
/// in the renderer.
pub struct ChromaKey {
    /// Key color as RGB8.
    pub color_rgb8: [u8; 3],
    /// Match tolerance in percent.
    #[serde(default = "default_chroma_tolerance")]
    pub tolerance: f64,
    /// Edge softness in percent.
    #[serde(default)]
    pub softness: f64,
}

fn default_chroma_tolerance() -> f64 {
    30.0
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Scalar grading sliders.
pub enum ColorParam {
    /// Brightness in percent (100 = unchanged).
    Brightness,
    /// Contrast in percent (100 = unchanged).
    Contrast,
    /// Saturation in percent (100 = unchanged).
    Saturation,
    /// Hue rotation in degrees.
    Hue,
    /// Blur radius in pixels.
    Blur,
    /// Vignette strength in percent.
    Vignette,
    /// White balance shift (negative = cooler).
    Temperature,
}

impl ColorParam {
    /// Declared slider range.
    pub fn range(self) -> (f64, f64) {
        match self {
            Self::Brightness | Self::Contrast | Self::Saturation => (0.0, 200.0),
            Self::Hue => (-180.0, 180.0),
            Self::Blur => (0.0, 20.0),
            Self::Vignette => (0.0, 100.0),
            Self::Temperature => (-100.0, 100.0),
        }
    }

    /// Neutral value.
    pub fn neutral(self) -> f64 {
        match self {
            Self::Brightness | Self::Contrast | Self::Saturation => 100.0,
            Self::Hue | Self::Blur | Self::Vignette | Self::Temperature => 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Primary grading block of a clip. Applies uniformly over the clip's duration.
pub struct ColorGrade {
    /// Brightness in percent.
    #[serde(default = "hundred")]
    pub brightness: f64,
    /// Contrast in percent.
    #[serde(default = "hundred")]
    pub contrast: f64,
    /// Saturation in percent.
    #[serde(default = "hundred")]
    pub saturation: f64,
    /// Hue rotation in degrees.
    #[serde(default)]
    pub hue: f64,
    /// Blur radius.
    #[serde(default)]
    pub blur: f64,
    /// Vignette strength.
    #[serde(default)]
    pub vignette: f64,
    /// White balance shift.
    #[serde(default)]
    pub temperature: f64,
    /// Shadow offsets.
    #[serde(default = "neutral_lift")]
    pub lift: ColorTriple,
    /// Midtone multipliers.
    #[serde(default = "neutral_multiplier")]
    pub gamma: ColorTriple,
    /// Highlight multipliers.
    #[serde(default = "neutral_multiplier")]
    pub gain: ColorTriple,
    /// Tone curves.
    #[serde(default)]
    pub curves: ToneCurves,
    /// Name of a LUT preset, resolved by the renderer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lut: Option<String>,
    /// Optional chroma key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chroma_key: Option<ChromaKey>,
}

fn hundred() -> f64 {
    100.0
}

fn neutral_lift() -> ColorTriple {
    ColorTriple::splat(0.0)
}

fn neutral_multiplier() -> ColorTriple {
    ColorTriple::splat(1.0)
}

impl Default for ColorGrade {
    fn default() -> Self {
        Self {
            brightness: 100.0,
            contrast: 100.0,
            saturation: 100.0,
            hue: 0.0,
            blur: 0.0,
            vignette: 0.0,
            temperature: 0.0,
            lift: neutral_lift(),
            gamma: neutral_multiplier(),
            gain: neutral_multiplier(),
            curves: ToneCurves::default(),
            lut: None,
            chroma_key: None,
        }
    }
}

impl ColorGrade {
    /// Current value of a scalar slider.
    pub fn param(&self, param: ColorParam) -> f64 {
        match param {
            ColorParam::Brightness => self.brightness,
            ColorParam::Contrast => self.contrast,
            ColorParam::Saturation => self.saturation,
            ColorParam::Hue => self.hue,
            ColorParam::Blur => self.blur,
            ColorParam::Vignette => self.vignette,
            ColorParam::Temperature => self.temperature,
        }
    }

    /// Current value of a wheel.
    pub fn wheel(&self, wheel: WheelKind) -> ColorTriple {
        match wheel {
            WheelKind::Lift => self.lift,
            WheelKind::Gamma => self.gamma,
            WheelKind::Gain => self.gain,
        }
    }

    /// New grade with `edit` applied; `self` is left untouched.
    pub fn with_edit(&self, edit: &ColorEdit) -> Self {
        let mut next = self.clone();
        match edit {
            ColorEdit::Param(param, v) => {
                let slot = match param {
                    ColorParam::Brightness => &mut next.brightness,
                    ColorParam::Contrast => &mut next.contrast,
                    ColorParam::Saturation => &mut next.saturation,
                    ColorParam::Hue => &mut next.hue,
                    ColorParam::Blur => &mut next.blur,
                    ColorParam::Vignette => &mut next.vignette,
                    ColorParam::Temperature => &mut next.temperature,
                };
                *slot = *v;
            }
            ColorEdit::Wheel(wheel, triple) => {
                let slot = match wheel {
                    WheelKind::Lift => &mut next.lift,
                    WheelKind::Gamma => &mut next.gamma,
                    WheelKind::Gain => &mut next.gain,
                };
                *slot = *triple;
            }
            ColorEdit::CurvePoint {
                channel,
                index,
                value,
            } => {
                let curve = next.curves.get_mut(*channel);
                *curve = curve.with_point(*index, *value);
            }
            ColorEdit::Curve { channel, curve } => {
                *next.curves.get_mut(*channel) = *curve;
            }
            ColorEdit::ResetCurves => next.curves = ToneCurves::default(),
            ColorEdit::Lut(lut) => next.lut = lut.clone(),
            ColorEdit::ChromaKey(key) => next.chroma_key = *key,
        }
        next
    }

    /// True when a renderer can skip grading entirely.
    pub fn is_neutral(&self) -> bool {
        *self == Self::default()
    }

    /// Check that every numeric field is finite and curves stay on 0..100.
    pub fn validate(&self) -> CliprigResult<()> {
        for (name, v) in [
            ("brightness", self.brightness),
            ("contrast", self.contrast),
            ("saturation", self.saturation),
            ("hue", self.hue),
            ("blur", self.blur),
            ("vignette", self.vignette),
            ("temperature", self.temperature),
        ] {
            ensure_finite(name, v)?;
        }
        for (name, triple) in [("lift", self.lift), ("gamma", self.gamma), ("gain", self.gain)] {
            for v in triple.to_array() {
                ensure_finite(name, v)?;
            }
        }
        for channel in CurveChannel::ALL {
            for v in self.curves.get(channel).points() {
                if !(0.0..=100.0).contains(v) {
                    return Err(CliprigError::validation(format!(
                        "{channel:?} curve point {v} is outside 0..100"
                    )));
                }
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// One typed change to a [`ColorGrade`].
pub enum ColorEdit {
    /// Set a scalar slider.
    Param(ColorParam, f64),
    /// Replace a wheel triple.
    Wheel(WheelKind, ColorTriple),
    /// Move one curve control point vertically.
    CurvePoint {
        /// Curve channel.
        channel: CurveChannel,
        /// Control point index, 0..5.
        index: usize,
        /// New value on the 0..100 scale.
        value: f64,
    },
    /// Replace a whole curve.
    Curve {
        /// Curve channel.
        channel: CurveChannel,
        /// Replacement curve.
        curve: ToneCurve,
    },
    /// Restore all four curves to identity.
    ResetCurves,
    /// Select or clear a LUT preset.
    Lut(Option<String>),
    /// Set or clear the chroma key.
    ChromaKey(Option<ChromaKey>),
}

impl ColorEdit {
    /// Copy with values clamped to their declared UI ranges.
    pub fn clamped(self) -> Self {
        match self {
            Self::Param(param, v) => {
                let (lo, hi) = param.range();
                Self::Param(param, clamp_or_lo(v, lo, hi))
            }
            Self::Wheel(wheel, triple) => {
                let (lo, hi) = wheel.range();
                Self::Wheel(wheel, triple.map(|c| clamp_or_lo(c, lo, hi)))
            }
            Self::CurvePoint {
                channel,
                index,
                value,
            } => Self::CurvePoint {
                channel,
                index,
                value: clamp_or_lo(value, 0.0, 100.0),
            },
            Self::Curve { channel, curve } => Self::Curve {
                channel,
                curve: ToneCurve(curve.0.map(|v| clamp_or_lo(v, 0.0, 100.0))),
            },
            other => other,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/color.rs"]
mod tests;
