//! cliprig is the data and editing core of a timeline video editor's
//! inspector: keyframed clip transforms and a primary color-grading model.
//!
//! # Overview
//!
//! 1. **Model**: a [`Timeline`] holds [`Clip`]s; each clip carries a static
//!    [`ClipTransform`], optional transform [`Keyframe`]s and a [`ColorGrade`].
//! 2. **Sample**: [`interpolate`] turns `Clip + playback time` into the
//!    effective transform (boundary hold, linear in between).
//! 3. **Edit**: [`MutationGateway`] routes UI edits into either a keyframe
//!    upsert or the static transform; color edits go through [`ColorEdit`].
//! 4. **Grading controls**: [`rgb_to_polar`] / [`polar_to_rgb`] map wheel
//!    triples to puck positions, [`CurveSpline`] renders and samples tone
//!    curves, and [`DragController`] turns pointer drags into edits.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: sampling is a pure function of its inputs.
//! - **Edits never fail**: a missing clip or non-finite input is a no-op;
//!   only loading and validation return [`CliprigResult`].
//! - **No global subscriber**: the library only emits `tracing` events.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod edit;
mod foundation;
mod grading;
mod model;
mod settings;

pub use animation::interp::{Lerp, interpolate};
pub use animation::keyframe::{KEYFRAME_SNAP_S, Keyframe, KeyframeId, KeyframeStore};
pub use edit::drag::{DragController, DragEdit, DragState, DragTarget, PointerCapture};
pub use edit::gateway::{EditOutcome, MutationGateway};
pub use foundation::core::{BezPath, CubicBez, Point, Vec2};
pub use foundation::error::{CliprigError, CliprigResult};
pub use grading::curve::{
    CURVE_TENSION, CURVE_WIDTH, CurveSpline, LUT_SIZE, MAX_CURVE_TENSION, drag_value,
};
pub use grading::wheel::{WheelMode, WheelPolar, polar_to_rgb, rgb_to_polar};
pub use model::clip::{Clip, MediaKind, MediaRef, TimeWindow};
pub use model::color::{
    CURVE_POINTS, ChromaKey, ColorEdit, ColorGrade, ColorParam, ColorTriple, CurveChannel,
    ToneCurve, ToneCurves, WheelKind,
};
pub use model::timeline::Timeline;
pub use model::transform::{ClipTransform, TransformKey, TransformPatch};
pub use settings::EditorSettings;
