use super::*;

#[test]
fn default_grade_is_neutral() {
    let grade = ColorGrade::default();
    assert!(grade.is_neutral());
    assert_eq!(grade.lift, WheelKind::Lift.neutral());
    assert_eq!(grade.gamma, WheelKind::Gamma.neutral());
    assert_eq!(grade.gain, WheelKind::Gain.neutral());
    for param in [
        ColorParam::Brightness,
        ColorParam::Contrast,
        ColorParam::Saturation,
        ColorParam::Hue,
        ColorParam::Blur,
        ColorParam::Vignette,
        ColorParam::Temperature,
    ] {
        assert_eq!(grade.param(param), param.neutral());
    }
    assert!(grade.curves.master.is_identity());
}

#[test]
fn with_edit_returns_new_value_and_leaves_original() {
    let base = ColorGrade::default();
    let next = base.with_edit(&ColorEdit::Param(ColorParam::Contrast, 130.0));
    assert_eq!(next.contrast, 130.0);
    assert_eq!(base.contrast, 100.0);
    assert!(!next.is_neutral());
}

#[test]
fn wheel_and_curve_edits_touch_only_their_field() {
    let base = ColorGrade::default();
    let next = base
        .with_edit(&ColorEdit::Wheel(
            WheelKind::Gain,
            ColorTriple::new(1.2, 1.0, 0.9),
        ))
        .with_edit(&ColorEdit::CurvePoint {
            channel: CurveChannel::Red,
            index: 2,
            value: 60.0,
        });
    assert_eq!(next.gain, ColorTriple::new(1.2, 1.0, 0.9));
    assert_eq!(next.lift, base.lift);
    assert_eq!(next.curves.red.0, [0.0, 25.0, 60.0, 75.0, 100.0]);
    assert!(next.curves.master.is_identity());

    let reset = next.with_edit(&ColorEdit::ResetCurves);
    assert!(reset.curves.red.is_identity());
    assert_eq!(reset.gain, next.gain);
}

#[test]
fn curve_point_out_of_range_index_is_ignored() {
    let base = ColorGrade::default();
    let next = base.with_edit(&ColorEdit::CurvePoint {
        channel: CurveChannel::Blue,
        index: 9,
        value: 10.0,
    });
    assert_eq!(next, base);
}

#[test]
fn clamped_edit_respects_declared_ranges() {
    assert_eq!(
        ColorEdit::Param(ColorParam::Hue, 400.0).clamped(),
        ColorEdit::Param(ColorParam::Hue, 180.0)
    );
    assert_eq!(
        ColorEdit::Wheel(WheelKind::Lift, ColorTriple::new(80.0, -80.0, 3.0)).clamped(),
        ColorEdit::Wheel(WheelKind::Lift, ColorTriple::new(50.0, -50.0, 3.0))
    );
    assert_eq!(
        ColorEdit::CurvePoint {
            channel: CurveChannel::Master,
            index: 0,
            value: -5.0,
        }
        .clamped(),
        ColorEdit::CurvePoint {
            channel: CurveChannel::Master,
            index: 0,
            value: 0.0,
        }
    );
}

#[test]
fn validate_rejects_curve_points_outside_range() {
    let mut grade = ColorGrade::default();
    grade.curves.green = ToneCurve([0.0, 25.0, 150.0, 75.0, 100.0]);
    assert!(grade.validate().is_err());
    assert!(ColorGrade::default().validate().is_ok());
}

#[test]
fn grade_json_uses_camel_case_and_defaults() {
    let grade: ColorGrade = serde_json::from_str(
        r#"{ "contrast": 120, "chromaKey": { "colorRgb8": [0, 255, 0] } }"#,
    )
    .unwrap();
    assert_eq!(grade.contrast, 120.0);
    assert_eq!(grade.brightness, 100.0);
    assert_eq!(grade.gamma, ColorTriple::splat(1.0));
    let key = grade.chroma_key.unwrap();
    assert_eq!(key.color_rgb8, [0, 255, 0]);
    assert_eq!(key.tolerance, 30.0);

    let json = serde_json::to_value(ColorGrade::default()).unwrap();
    assert!(json.get("lut").is_none());
    assert_eq!(json["curves"]["master"], serde_json::json!([0.0, 25.0, 50.0, 75.0, 100.0]));
}
