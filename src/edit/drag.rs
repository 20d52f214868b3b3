//! Pointer drags on curve control points and color wheels.
//!
//! A drag holds pointer capture from [`DragController::begin`] until it is
//! ended, cancelled, replaced by another drag or the controller is dropped.
//! Capture handles are moved into [`PointerCapture::release`], so a handle
//! can only be released once.

use crate::{
    foundation::core::Point,
    grading::curve::drag_value,
    grading::wheel::{WheelPolar, polar_to_rgb, rgb_to_polar},
    model::color::{ColorEdit, ColorTriple, CurveChannel, WheelKind},
};

/// Host-side pointer capture (e.g. a window's mouse grab).
pub trait PointerCapture {
    /// Token proving capture is held.
    type Handle;

    /// Start routing pointer events to the drag.
    fn acquire(&mut self) -> Self::Handle;

    /// Stop routing pointer events; consumes the token.
    fn release(&mut self, handle: Self::Handle);
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// What a drag edits, with the value it started from.
pub enum DragTarget {
    /// Vertical drag of one tone-curve control point.
    CurvePoint {
        /// Curve channel.
        channel: CurveChannel,
        /// Control point index.
        index: usize,
        /// Point value when the drag began.
        start_value: f64,
        /// Plot height in pixels.
        container_height: f64,
    },
    /// Puck drag on a lift/gamma/gain wheel.
    Wheel {
        /// Which wheel.
        wheel: WheelKind,
        /// Wheel center in pixels.
        center: Point,
        /// Wheel radius in pixels.
        radius: f64,
        /// Triple when the drag began.
        start: ColorTriple,
    },
}

impl DragTarget {
    fn restore(&self) -> DragEdit {
        match *self {
            Self::CurvePoint {
                channel,
                index,
                start_value,
                ..
            } => DragEdit::CurvePoint {
                channel,
                index,
                value: start_value,
            },
            Self::Wheel { wheel, start, .. } => DragEdit::Wheel {
                wheel,
                polar: rgb_to_polar(start, wheel.mode()),
                triple: start,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Value produced by a drag step.
pub enum DragEdit {
    /// New curve point value.
    CurvePoint {
        /// Curve channel.
        channel: CurveChannel,
        /// Control point index.
        index: usize,
        /// Value on the 0..100 scale.
        value: f64,
    },
    /// New wheel value.
    Wheel {
        /// Which wheel.
        wheel: WheelKind,
        /// Puck position, for redrawing the wheel.
        polar: WheelPolar,
        /// Decoded triple.
        triple: ColorTriple,
    },
}

impl From<DragEdit> for ColorEdit {
    fn from(edit: DragEdit) -> Self {
        match edit {
            DragEdit::CurvePoint {
                channel,
                index,
                value,
            } => ColorEdit::CurvePoint {
                channel,
                index,
                value,
            },
            DragEdit::Wheel { wheel, triple, .. } => ColorEdit::Wheel(wheel, triple),
        }
    }
}

#[derive(Debug)]
/// Drag lifecycle.
pub enum DragState<H> {
    /// No drag in progress.
    Idle,
    /// Capture is held for `target`.
    Dragging {
        /// Edited element.
        target: DragTarget,
        /// Pointer position at drag start.
        origin: Point,
        /// Capture token.
        handle: H,
    },
}

/// Turns pointer events into [`DragEdit`]s while owning pointer capture.
pub struct DragController<C: PointerCapture> {
    capture: C,
    state: DragState<C::Handle>,
}

impl<C: PointerCapture> DragController<C> {
    /// Idle controller over `capture`.
    pub fn new(capture: C) -> Self {
        Self {
            capture,
            state: DragState::Idle,
        }
    }

    /// Start dragging `target` from `origin`.
    ///
    /// An active drag is cancelled first; its restore edit is returned.
    pub fn begin(&mut self, target: DragTarget, origin: Point) -> Option<DragEdit> {
        let restored = self.cancel();
        let handle = self.capture.acquire();
        self.state = DragState::Dragging {
            target,
            origin,
            handle,
        };
        tracing::debug!(?target, "drag started");
        restored
    }

    /// Edit for the pointer now at `point`; `None` when idle.
    pub fn pointer_move(&self, point: Point) -> Option<DragEdit> {
        let DragState::Dragging { target, origin, .. } = &self.state else {
            return None;
        };
        let edit = match *target {
            DragTarget::CurvePoint {
                channel,
                index,
                start_value,
                container_height,
            } => DragEdit::CurvePoint {
                channel,
                index,
                value: drag_value(start_value, point.y - origin.y, container_height),
            },
            DragTarget::Wheel {
                wheel,
                center,
                radius,
                start,
            } => {
                let mode = wheel.mode();
                let mut polar = WheelPolar::from_point(center, radius, point);
                // The puck only moves chroma; keep the triple's grey level.
                polar.master = rgb_to_polar(start, mode).master;
                let (lo, hi) = wheel.range();
                let triple = polar_to_rgb(polar, mode).map(|c| c.clamp(lo, hi));
                DragEdit::Wheel {
                    wheel,
                    polar,
                    triple,
                }
            }
        };
        Some(edit)
    }

    /// Finish the drag, keeping the last edit. Returns `false` when idle.
    pub fn end(&mut self) -> bool {
        match self.take() {
            Some(target) => {
                tracing::debug!(?target, "drag ended");
                true
            }
            None => false,
        }
    }

    /// Abort the drag; returns the edit that restores the starting value.
    pub fn cancel(&mut self) -> Option<DragEdit> {
        let target = self.take()?;
        tracing::debug!(?target, "drag cancelled");
        Some(target.restore())
    }

    /// True while capture is held.
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Element being dragged.
    pub fn target(&self) -> Option<&DragTarget> {
        match &self.state {
            DragState::Dragging { target, .. } => Some(target),
            DragState::Idle => None,
        }
    }

    /// Underlying capture provider.
    pub fn capture(&self) -> &C {
        &self.capture
    }

    fn take(&mut self) -> Option<DragTarget> {
        match std::mem::replace(&mut self.state, DragState::Idle) {
            DragState::Dragging { target, handle, .. } => {
                self.capture.release(handle);
                Some(target)
            }
            DragState::Idle => None,
        }
    }
}

impl<C: PointerCapture> Drop for DragController<C> {
    fn drop(&mut self) {
        if self.take().is_some() {
            tracing::debug!("drag released on drop");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/edit/drag.rs"]
mod tests;
