use super::*;
use crate::model::capture::{FractionPoint, Theme};

fn valid_config() -> CaptureConfig {
    CaptureConfig {
        duration_ms: 2000,
        fps: 30,
        width_px: 480,
        height_px: 0,
        theme: Theme::Light,
        interaction_node_tag: "Surface".to_string(),
        gestures: vec![
            GestureStep::pause(3),
            GestureStep::tap(0.5, 0.5, 2),
            GestureStep::DragPath {
                points: vec![FractionPoint::new(0.2, 0.6), FractionPoint::new(0.8, 0.6)],
                hold_start_frames: 1,
                frames_per_waypoint: 2,
                release_frames: 1,
            },
        ],
    }
}

fn violation(config: &CaptureConfig) -> ValidationError {
    match validate_config(config) {
        Err(ReelError::Validation(v)) => v,
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn accepts_valid_config_and_defaults() {
    validate_config(&valid_config()).unwrap();
    validate_config(&CaptureConfig::default()).unwrap();
    validate_spec(&ScenarioSpec::new("intro_Demo-1", valid_config())).unwrap();
}

#[test]
fn reports_each_config_field_in_isolation() {
    let mut c = valid_config();
    c.duration_ms = 0;
    assert_eq!(violation(&c).field, "duration_ms");

    let mut c = valid_config();
    c.fps = 121;
    assert_eq!(violation(&c).field, "fps");
    c.fps = 0;
    assert_eq!(violation(&c).field, "fps");

    let mut c = valid_config();
    c.width_px = 0;
    assert_eq!(violation(&c).field, "width_px");

    let mut c = valid_config();
    c.height_px = -1;
    assert_eq!(violation(&c).field, "height_px");

    let mut c = valid_config();
    c.interaction_node_tag = "   ".to_string();
    assert_eq!(violation(&c).field, "interaction_node_tag");
}

#[test]
fn blank_tag_is_fine_without_gestures() {
    let mut c = valid_config();
    c.interaction_node_tag.clear();
    c.gestures.clear();
    validate_config(&c).unwrap();
}

#[test]
fn first_violation_wins_in_declaration_order() {
    let mut c = valid_config();
    c.fps = 0;
    c.width_px = 0;
    c.gestures[0] = GestureStep::pause(-1);
    assert_eq!(violation(&c).field, "fps");

    let spec = ScenarioSpec::new("bad name", c);
    let err = validate_spec(&spec).unwrap_err();
    assert_eq!(err.as_validation().unwrap().field, "name");
}

#[test]
fn gesture_errors_carry_index() {
    let mut c = valid_config();
    c.gestures[1] = GestureStep::tap(1.5, 0.5, 2);
    let v = violation(&c);
    assert_eq!(v.gesture, Some(1));
    assert_eq!(v.field, "gestures[1].x_fraction");

    let mut c = valid_config();
    c.gestures[1] = GestureStep::tap(0.5, f64::NAN, 2);
    assert_eq!(violation(&c).field, "gestures[1].y_fraction");

    let mut c = valid_config();
    c.gestures[1] = GestureStep::tap(0.5, 0.5, -2);
    assert_eq!(violation(&c).field, "gestures[1].frames_after");

    let mut c = valid_config();
    c.gestures[0] = GestureStep::pause(-1);
    assert_eq!(violation(&c).field, "gestures[0].frames");
}

#[test]
fn drag_path_checks_points_then_timing() {
    let drag = |points: Vec<FractionPoint>, hold: i32, per: i32, release: i32| {
        let mut c = valid_config();
        c.gestures[2] = GestureStep::DragPath {
            points,
            hold_start_frames: hold,
            frames_per_waypoint: per,
            release_frames: release,
        };
        violation(&c)
    };
    let ok = vec![FractionPoint::new(0.1, 0.1), FractionPoint::new(0.9, 0.9)];

    assert_eq!(
        drag(vec![FractionPoint::new(0.1, 0.1)], 0, 0, 0).field,
        "gestures[2].points"
    );
    assert_eq!(
        drag(
            vec![
                FractionPoint::new(0.1, 0.1),
                FractionPoint::new(0.5, -0.1),
                FractionPoint::new(2.0, 0.5),
            ],
            -1,
            0,
            0
        )
        .field,
        "gestures[2].points[1].y"
    );
    assert_eq!(drag(ok.clone(), -1, -1, 0).field, "gestures[2].hold_start_frames");
    assert_eq!(drag(ok.clone(), 0, -1, 0).field, "gestures[2].frames_per_waypoint");
    assert_eq!(drag(ok, 0, 0, -1).field, "gestures[2].release_frames");
}

#[test]
fn name_rules() {
    require_name("a-b_C9").unwrap();
    assert!(require_name("").is_err());
    assert!(require_name("  ").is_err());
    assert!(require_name("with space").is_err());
    assert!(require_name("dots.not.allowed").is_err());
    assert!(require_name("ünïcode").is_err());
    assert!(is_valid_name("x"));
    assert!(!is_valid_name(""));
}
