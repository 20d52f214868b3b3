use super::*;

#[test]
fn defaults_match_editor_constants() {
    let s = EditorSettings::default();
    assert_eq!(s.keyframe_snap_s, 0.1);
    assert_eq!(s.curve_tension, 0.35);
    assert!(s.validate().is_ok());
}

#[test]
fn missing_fields_take_defaults() {
    let s = EditorSettings::from_json("{}").unwrap();
    assert_eq!(s, EditorSettings::default());

    let s = EditorSettings::from_json(r#"{"curveTension": 0.5}"#).unwrap();
    assert_eq!(s.keyframe_snap_s, 0.1);
    assert_eq!(s.curve_tension, 0.5);
}

#[test]
fn invalid_values_are_rejected() {
    let err = EditorSettings::from_json(r#"{"keyframeSnapS": 0}"#).unwrap_err();
    assert!(matches!(err, CliprigError::Validation(_)));
    assert!(err.to_string().contains("keyframeSnapS"));

    let err = EditorSettings::from_json(r#"{"curveTension": -1}"#).unwrap_err();
    assert!(err.to_string().contains("curveTension"));
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = EditorSettings::from_json("{").unwrap_err();
    assert!(matches!(err, CliprigError::Serde(_)));
}

#[test]
fn from_path_reports_missing_file() {
    let err = EditorSettings::from_path(Path::new("/nonexistent/cliprig-settings.json")).unwrap_err();
    assert!(format!("{err:#}").contains("read settings"));
}

#[test]
fn tension_above_the_monotonic_limit_is_rejected() {
    let s = EditorSettings {
        curve_tension: 6.0,
        ..EditorSettings::default()
    };
    let err = s.validate().unwrap_err();
    assert!(err.to_string().contains("curveTension"));

    let limit = EditorSettings {
        curve_tension: MAX_CURVE_TENSION,
        ..EditorSettings::default()
    };
    assert!(limit.validate().is_ok());
    assert!(
        EditorSettings {
            curve_tension: f64::INFINITY,
            ..EditorSettings::default()
        }
        .validate()
        .is_err()
    );
}
