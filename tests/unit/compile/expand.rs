use super::*;

#[test]
fn pause_expands_to_single_pause() {
    assert_eq!(
        expand(&InteractionSpec::pause(12)),
        vec![GestureStep::Pause { frames: 12 }]
    );
}

#[test]
fn tap_uses_lane_point_and_falls_back_to_frames() {
    let tap = InteractionSpec {
        frames: 7,
        ..InteractionSpec::tap(InteractionTarget::Top, 0)
    };
    assert_eq!(expand(&tap), vec![GestureStep::tap(0.5, 0.30, 7)]);

    let tap = InteractionSpec {
        frames: 7,
        ..InteractionSpec::tap(InteractionTarget::Right, 4)
    };
    assert_eq!(expand(&tap), vec![GestureStep::tap(0.70, 0.5, 4)]);
}

#[test]
fn target_points_match_lane_table() {
    assert_eq!(target_point(InteractionTarget::Center), FractionPoint::new(0.5, 0.5));
    assert_eq!(target_point(InteractionTarget::Top), FractionPoint::new(0.5, 0.30));
    assert_eq!(target_point(InteractionTarget::Bottom), FractionPoint::new(0.5, 0.70));
    assert_eq!(target_point(InteractionTarget::Left), FractionPoint::new(0.30, 0.5));
    assert_eq!(target_point(InteractionTarget::Right), FractionPoint::new(0.70, 0.5));
}

#[test]
fn swipe_directions_order_dominant_axis() {
    let pts = |d| swipe_points(InteractionTarget::Center, d, SwipeDistance::Medium);

    let [a, b] = pts(SwipeDirection::LeftToRight);
    assert!(a.x < b.x);
    assert_eq!(a.y, b.y);
    let [a, b] = pts(SwipeDirection::RightToLeft);
    assert!(a.x > b.x);
    let [a, b] = pts(SwipeDirection::TopToBottom);
    assert!(a.y < b.y);
    assert_eq!(a.x, b.x);
    let [a, b] = pts(SwipeDirection::BottomToTop);
    assert!(a.y > b.y);
}

#[test]
fn swipe_lanes_follow_target() {
    let [a, _] = swipe_points(
        InteractionTarget::Bottom,
        SwipeDirection::LeftToRight,
        SwipeDistance::Short,
    );
    assert_eq!(a.y, 0.70);

    // LEFT only selects a lane for vertical swipes.
    let [a, _] = swipe_points(
        InteractionTarget::Left,
        SwipeDirection::RightToLeft,
        SwipeDistance::Short,
    );
    assert_eq!(a.y, 0.5);
    let [a, b] = swipe_points(
        InteractionTarget::Left,
        SwipeDirection::TopToBottom,
        SwipeDistance::Short,
    );
    assert_eq!((a.x, b.x), (0.30, 0.30));
}

#[test]
fn longer_distance_strictly_widens_swipe() {
    let span = |d| {
        let [a, b] = swipe_points(InteractionTarget::Center, SwipeDirection::LeftToRight, d);
        (b.x - a.x).abs()
    };
    assert!(span(SwipeDistance::Short) < span(SwipeDistance::Medium));
    assert!(span(SwipeDistance::Medium) < span(SwipeDistance::Long));
    assert!((span(SwipeDistance::Long) - 0.80).abs() < 1e-12);
}

#[test]
fn custom_swipe_uses_explicit_timing_and_trailing_pause() {
    let spec = InteractionSpec {
        frames_after: 5,
        travel_frames: 9,
        hold_start_frames: 3,
        release_frames: 4,
        ..InteractionSpec::swipe(
            SwipeDirection::LeftToRight,
            SwipeDistance::Long,
            SwipeSpeed::Custom,
        )
    };
    let steps = expand(&spec);
    assert_eq!(steps.len(), 2);
    match &steps[0] {
        GestureStep::DragPath {
            points,
            hold_start_frames,
            frames_per_waypoint,
            release_frames,
        } => {
            assert_eq!(points.len(), 2);
            assert!((points[0].x - 0.10).abs() < 1e-12);
            assert!((points[1].x - 0.90).abs() < 1e-12);
            assert_eq!(
                (*hold_start_frames, *frames_per_waypoint, *release_frames),
                (3, 9, 4)
            );
        }
        other => panic!("expected drag path, got {other:?}"),
    }
    assert_eq!(steps[1], GestureStep::Pause { frames: 5 });
}

#[test]
fn preset_overrides_custom_fields() {
    let spec = InteractionSpec {
        travel_frames: 99,
        hold_start_frames: 99,
        release_frames: 99,
        ..InteractionSpec::swipe(
            SwipeDirection::BottomToTop,
            SwipeDistance::Short,
            SwipeSpeed::Fast,
        )
    };
    assert_eq!(swipe_timing(&spec), SWIPE_FAST);
    let steps = expand(&spec);
    assert_eq!(steps.len(), 1, "no trailing pause without frames_after");

    let normal = InteractionSpec {
        speed: SwipeSpeed::Normal,
        ..spec.clone()
    };
    assert_eq!(swipe_timing(&normal), SWIPE_NORMAL);
    let slow = InteractionSpec {
        speed: SwipeSpeed::Slow,
        ..spec
    };
    assert_eq!(swipe_timing(&slow), SWIPE_SLOW);
}

#[test]
fn unsupported_kind_expands_to_nothing() {
    let spec = InteractionSpec {
        kind: InteractionKind::Unsupported,
        frames: 10,
        ..InteractionSpec::default()
    };
    assert!(expand(&spec).is_empty());

    let parsed: InteractionSpec = serde_json::from_str(r#"{"type": "LONG_PRESS"}"#).unwrap();
    assert_eq!(parsed.kind, InteractionKind::Unsupported);
}

#[test]
fn expand_all_preserves_order() {
    let steps = expand_all(&[
        InteractionSpec::pause(2),
        InteractionSpec::tap(InteractionTarget::Center, 3),
    ]);
    assert_eq!(
        steps,
        vec![GestureStep::pause(2), GestureStep::tap(0.5, 0.5, 3)]
    );
}
