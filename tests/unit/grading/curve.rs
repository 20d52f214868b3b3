use super::*;
use kurbo::PathEl;

fn spline(points: [f64; 5]) -> CurveSpline {
    CurveSpline::with_default_tension(&ToneCurve(points))
}

#[test]
fn passes_through_control_points_exactly() {
    let points = [10.0, 20.0, 50.0, 80.0, 90.0];
    let s = spline(points);
    for (i, v) in points.iter().enumerate() {
        assert_eq!(s.sample(i as f64 * 64.0), *v);
    }
}

#[test]
fn render_path_hits_control_points_in_render_space() {
    let points = [10.0, 20.0, 50.0, 80.0, 90.0];
    let path = spline(points).to_render_path(200.0);
    let anchors: Vec<Point> = path
        .elements()
        .iter()
        .map(|el| match el {
            PathEl::MoveTo(p) => *p,
            PathEl::CurveTo(_, _, p) => *p,
            other => panic!("unexpected element {other:?}"),
        })
        .collect();
    assert_eq!(anchors.len(), 5);
    for (i, (p, v)) in anchors.iter().zip(points).enumerate() {
        assert_eq!(p.x, i as f64 * 64.0);
        assert!((p.y - (200.0 - v * 2.0)).abs() < 1e-12);
    }
    assert!(path.to_svg().starts_with("M0"));
}

#[test]
fn end_segments_clamp_neighbors() {
    let s = spline([10.0, 20.0, 50.0, 80.0, 90.0]);
    let first = s.segments()[0];
    // p0 clamped to p1: cp1 = p1 + (p2 - p1) * tension / 6.
    let k = CURVE_TENSION / 6.0;
    assert!((first.p1.x - 64.0 * k).abs() < 1e-12);
    assert!((first.p1.y - (10.0 + 10.0 * k)).abs() < 1e-12);

    let last = s.segments()[3];
    assert!((last.p2.x - (256.0 - 64.0 * k)).abs() < 1e-12);
    assert!((last.p2.y - (90.0 - 10.0 * k)).abs() < 1e-12);
}

#[test]
fn tangents_are_continuous_at_interior_points() {
    let s = spline([0.0, 40.0, 35.0, 90.0, 60.0]);
    for i in 0..3 {
        let a = s.segments()[i];
        let b = s.segments()[i + 1];
        let incoming = a.p3 - a.p2;
        let outgoing = b.p1 - b.p0;
        assert!((incoming - outgoing).hypot() < 1e-12, "joint {i}");
    }
}

#[test]
fn identity_curve_samples_close_to_diagonal() {
    let s = spline(ToneCurve::IDENTITY.0);
    for x in [0.0, 10.0, 100.0, 200.0, 255.0] {
        let expected = x / 256.0 * 100.0;
        assert!((s.sample(x) - expected).abs() < 1e-6, "x={x}");
    }
}

#[test]
fn sample_clamps_domain_and_lut_clamps_range() {
    let s = spline([0.0, 100.0, 100.0, 100.0, 100.0]);
    assert_eq!(s.sample(-10.0), 0.0);
    assert_eq!(s.sample(1000.0), 100.0);

    let lut = s.bake_lut();
    assert_eq!(lut.len(), LUT_SIZE);
    assert_eq!(lut[0], 0.0);
    assert!(lut.iter().all(|v| (0.0..=100.0).contains(v)));
}

#[test]
fn sampling_is_monotone_for_monotone_points() {
    let s = spline([10.0, 20.0, 50.0, 80.0, 90.0]);
    let lut = s.bake_lut();
    assert!(lut.windows(2).all(|w| w[0] <= w[1] + 1e-9));
}

#[test]
fn drag_up_raises_value_and_clamps() {
    assert_eq!(drag_value(50.0, -20.0, 200.0), 60.0);
    assert_eq!(drag_value(50.0, 20.0, 200.0), 40.0);
    assert_eq!(drag_value(95.0, -100.0, 200.0), 100.0);
    assert_eq!(drag_value(5.0, 100.0, 200.0), 0.0);
    assert_eq!(drag_value(30.0, 10.0, 0.0), 30.0);
}

fn worst_sample_error(s: &CurveSpline) -> f64 {
    use kurbo::ParamCurve as _;
    let mut worst = 0.0_f64;
    for seg in s.segments() {
        for step in 0..=100 {
            let p = seg.eval(f64::from(step) / 100.0);
            worst = worst.max((s.sample(p.x) - p.y).abs());
        }
    }
    worst
}

#[test]
fn sample_stays_on_the_rendered_curve_at_high_tension() {
    let curve = ToneCurve([0.0, 100.0, 0.0, 100.0, 0.0]);
    let s = CurveSpline::new(&curve, 2.5);
    assert!(worst_sample_error(&s) < 1e-6);
}

#[test]
fn tension_is_clamped_to_the_monotonic_range() {
    let curve = ToneCurve([0.0, 100.0, 0.0, 100.0, 0.0]);
    assert_eq!(
        CurveSpline::new(&curve, 6.0),
        CurveSpline::new(&curve, MAX_CURVE_TENSION)
    );
    assert_eq!(CurveSpline::new(&curve, -1.0), CurveSpline::new(&curve, 0.0));
    assert_eq!(
        CurveSpline::new(&curve, f64::NAN),
        CurveSpline::new(&curve, 0.0)
    );
}
