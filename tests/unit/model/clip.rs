use super::*;
use crate::model::transform::TransformKey;

fn clip() -> Clip {
    Clip::new(
        "c1",
        MediaRef {
            kind: MediaKind::Video,
            source: "intro.mp4".to_string(),
        },
        TimeWindow::new(2.0, 5.0),
    )
}

#[test]
fn window_contains_is_half_open() {
    let w = TimeWindow::new(2.0, 5.0);
    assert!(!w.contains(1.999));
    assert!(w.contains(2.0));
    assert!(w.contains(6.999));
    assert!(!w.contains(7.0));
    assert_eq!(w.end_at(), 7.0);
}

#[test]
fn source_time_honors_trim_and_speed() {
    let w = TimeWindow {
        trim_start: 1.5,
        speed: 2.0,
        ..TimeWindow::new(10.0, 4.0)
    };
    assert_eq!(w.local_time(11.0), 1.0);
    assert_eq!(w.source_time(11.0), 3.5);
}

#[test]
fn window_validation_rejects_bad_speed_and_duration() {
    let mut w = TimeWindow::new(0.0, 1.0);
    assert!(w.validate().is_ok());
    w.speed = 0.0;
    assert!(w.validate().is_err());
    w.speed = 1.0;
    w.duration = -1.0;
    assert!(w.validate().is_err());
    w.duration = f64::NAN;
    assert!(w.validate().is_err());
}

#[test]
fn static_clip_samples_base_transform() {
    let mut c = clip();
    c.transform.x = 42.0;
    assert!(!c.has_keyframes());
    assert_eq!(c.transform_at(-100.0), c.transform);
    assert_eq!(c.transform_at(3.0), c.transform);
}

#[test]
fn upsert_keyframe_uses_clip_local_time() {
    let mut c = clip();
    let id = c
        .upsert_keyframe(3.0, &TransformPatch::single(TransformKey::X, 5.0), 0.1)
        .unwrap();
    let kf = c.keyframes.get(id).unwrap();
    assert_eq!(kf.time, 1.0);
    assert_eq!(kf.value.x, 5.0);
    assert!(c.remove_keyframe(id).is_some());
    assert!(!c.has_keyframes());
}

#[test]
fn validate_prefixes_clip_id() {
    let mut c = clip();
    c.window.speed = -1.0;
    let err = c.validate().unwrap_err();
    assert!(err.to_string().contains("clip 'c1'"));

    let mut c = clip();
    c.id = "  ".to_string();
    assert!(c.validate().is_err());
    assert!(clip().validate().is_ok());
}

#[test]
fn clip_json_flattens_window_fields() {
    let json = serde_json::to_value(clip()).unwrap();
    assert_eq!(json["startAt"], 2.0);
    assert_eq!(json["duration"], 5.0);
    assert_eq!(json["speed"], 1.0);
    assert!(json.get("keyframes").is_none());

    let back: Clip = serde_json::from_value(json).unwrap();
    assert_eq!(back, clip());
}
