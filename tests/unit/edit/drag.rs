use std::cell::Cell;
use std::rc::Rc;

use super::*;

#[derive(Default)]
struct Counts {
    acquired: Cell<u32>,
    released: Cell<u32>,
}

struct CountingCapture(Rc<Counts>);

#[derive(Debug)]
struct Grab;

impl PointerCapture for CountingCapture {
    type Handle = Grab;

    fn acquire(&mut self) -> Grab {
        self.0.acquired.set(self.0.acquired.get() + 1);
        Grab
    }

    fn release(&mut self, _handle: Grab) {
        self.0.released.set(self.0.released.get() + 1);
    }
}

fn controller() -> (DragController<CountingCapture>, Rc<Counts>) {
    let counts = Rc::new(Counts::default());
    (DragController::new(CountingCapture(counts.clone())), counts)
}

fn curve_target(start_value: f64) -> DragTarget {
    DragTarget::CurvePoint {
        channel: CurveChannel::Master,
        index: 2,
        start_value,
        container_height: 200.0,
    }
}

fn wheel_target(start: ColorTriple) -> DragTarget {
    DragTarget::Wheel {
        wheel: WheelKind::Gain,
        center: Point::new(100.0, 100.0),
        radius: 50.0,
        start,
    }
}

#[test]
fn idle_controller_ignores_events() {
    let (mut ctl, counts) = controller();
    assert!(!ctl.is_dragging());
    assert_eq!(ctl.pointer_move(Point::new(1.0, 1.0)), None);
    assert!(!ctl.end());
    assert_eq!(ctl.cancel(), None);
    assert_eq!(counts.acquired.get(), 0);
    assert_eq!(counts.released.get(), 0);
}

#[test]
fn curve_drag_moves_point_up() {
    let (mut ctl, counts) = controller();
    ctl.begin(curve_target(50.0), Point::new(128.0, 100.0));
    assert!(ctl.is_dragging());
    assert_eq!(counts.acquired.get(), 1);

    let edit = ctl.pointer_move(Point::new(130.0, 80.0)).unwrap();
    assert_eq!(
        edit,
        DragEdit::CurvePoint {
            channel: CurveChannel::Master,
            index: 2,
            value: 60.0,
        }
    );
    assert_eq!(
        ColorEdit::from(edit),
        ColorEdit::CurvePoint {
            channel: CurveChannel::Master,
            index: 2,
            value: 60.0,
        }
    );

    assert!(ctl.end());
    assert!(!ctl.is_dragging());
    assert_eq!(counts.released.get(), 1);
}

#[test]
fn cancel_restores_starting_value() {
    let (mut ctl, counts) = controller();
    ctl.begin(curve_target(35.0), Point::new(0.0, 0.0));
    ctl.pointer_move(Point::new(0.0, -100.0));
    let restore = ctl.cancel().unwrap();
    assert_eq!(
        restore,
        DragEdit::CurvePoint {
            channel: CurveChannel::Master,
            index: 2,
            value: 35.0,
        }
    );
    assert_eq!(counts.released.get(), 1);
    assert_eq!(ctl.cancel(), None);
    assert_eq!(counts.released.get(), 1);
}

#[test]
fn wheel_drag_decodes_triple_within_range() {
    let (mut ctl, _counts) = controller();
    let start = WheelKind::Gain.neutral();
    ctl.begin(wheel_target(start), Point::new(100.0, 100.0));

    // Straight up at the rim: angle 0.
    let Some(DragEdit::Wheel { polar, triple, .. }) = ctl.pointer_move(Point::new(100.0, 0.0))
    else {
        panic!("expected a wheel edit");
    };
    assert_eq!(polar.magnitude, 100.0);
    assert!(polar.normalized_angle().abs() < 1e-9);
    let (lo, hi) = WheelKind::Gain.range();
    for c in triple.to_array() {
        assert!((lo..=hi).contains(&c));
    }
    // Chroma-only: mean stays at neutral.
    assert!(((triple.r + triple.g + triple.b) / 3.0 - 1.0).abs() < 1e-9);
}

#[test]
fn wheel_drag_keeps_grey_level() {
    let (mut ctl, _counts) = controller();
    let start = ColorTriple::splat(1.2);
    ctl.begin(wheel_target(start), Point::new(100.0, 100.0));
    let Some(DragEdit::Wheel { triple, .. }) = ctl.pointer_move(Point::new(100.0, 100.0)) else {
        panic!("expected a wheel edit");
    };
    assert!(triple.max_abs_diff(start) < 1e-9);
}

#[test]
fn begin_while_dragging_cancels_previous_drag() {
    let (mut ctl, counts) = controller();
    assert_eq!(ctl.begin(curve_target(10.0), Point::ORIGIN), None);
    let restored = ctl.begin(wheel_target(ColorTriple::splat(1.0)), Point::ORIGIN);
    assert!(matches!(
        restored,
        Some(DragEdit::CurvePoint { value, .. }) if value == 10.0
    ));
    assert_eq!(counts.acquired.get(), 2);
    assert_eq!(counts.released.get(), 1);
    assert!(matches!(ctl.target(), Some(DragTarget::Wheel { .. })));
}

#[test]
fn capture_is_released_exactly_once() {
    let counts = {
        let (mut ctl, counts) = controller();
        ctl.begin(curve_target(50.0), Point::ORIGIN);
        ctl.end();
        ctl.end();
        ctl.begin(curve_target(50.0), Point::ORIGIN);
        // Dropped while dragging.
        counts
    };
    assert_eq!(counts.acquired.get(), 2);
    assert_eq!(counts.released.get(), 2);
}
