use super::*;
use crate::capture::host::FrameRGBA;
use crate::capture::sink::InMemorySink;
use crate::foundation::error::ReelError;
use crate::model::capture::{CaptureConfig, FractionPoint, GestureStep, ScenarioSpec};
use crate::scenario::registry::Registry;

/// Deterministic host: frames encode the virtual clock in their red channel.
#[derive(Default)]
struct FakeHost {
    content: Option<String>,
    clock_ms: u64,
    idle_waits: usize,
    touches: Vec<TouchAction>,
    fail_on_move: bool,
}

impl RenderHost for FakeHost {
    fn set_content(&mut self, content: &str) -> ReelResult<()> {
        self.content = Some(content.to_owned());
        Ok(())
    }
    fn advance_clock(&mut self, ms: u64) -> ReelResult<()> {
        self.clock_ms += ms;
        Ok(())
    }
    fn wait_for_idle(&mut self) -> ReelResult<()> {
        self.idle_waits += 1;
        Ok(())
    }
    fn node_bounds(&mut self, tag: &str) -> ReelResult<Rect> {
        assert_eq!(tag, "root");
        Ok(Rect::new(10.0, 20.0, 110.0, 120.0))
    }
    fn touch(&mut self, action: TouchAction) -> ReelResult<()> {
        if self.fail_on_move && matches!(action, TouchAction::Move(_)) {
            return Err(ReelError::resource("surface detached"));
        }
        self.touches.push(action);
        Ok(())
    }
    fn capture_frame(&mut self) -> ReelResult<FrameRGBA> {
        Ok(FrameRGBA::solid(2, 2, [(self.clock_ms % 256) as u8, 0, 0, 255]))
    }
}

fn registry(duration_ms: i32, gestures: Vec<GestureStep>) -> Registry {
    let capture = CaptureConfig {
        duration_ms,
        fps: 50,
        interaction_node_tag: "root".to_owned(),
        gestures,
        ..CaptureConfig::default()
    };
    Registry::builder()
        .scenario(ScenarioSpec::new("demo", capture), "DemoContent")
        .build()
        .unwrap()
}

#[test]
fn gestures_then_plain_frames_fill_the_budget() {
    let reg = registry(200, vec![GestureStep::pause(2), GestureStep::tap(0.5, 0.5, 1)]);
    let mut host = FakeHost::default();
    let mut sink = InMemorySink::new();

    let summary = capture_scenario(&reg, "demo", &mut host, &mut sink).unwrap();

    assert_eq!(
        summary,
        CaptureSummary {
            scenario: "demo".to_owned(),
            frames: 10,
            frame_step_ms: 20,
            gesture_frames_requested: 3,
            gesture_frames_captured: 3,
            replay: ReplayState::Completed,
        }
    );
    assert_eq!(host.content.as_deref(), Some("DemoContent"));
    assert_eq!(host.clock_ms, 200);
    assert_eq!(
        host.touches,
        vec![TouchAction::Down(Point::new(60.0, 70.0)), TouchAction::Up]
    );

    let indices: Vec<u32> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(indices, (1..=10).collect::<Vec<_>>());
    assert_eq!(sink.frames()[0].1.data[0], 20);
    assert!(sink.is_finished());
    assert_eq!(sink.metadata().map(|m| m.total_frames), Some(10));
}

#[test]
fn scenario_without_gestures_captures_plain_frames() {
    let reg = registry(100, Vec::new());
    let mut host = FakeHost::default();
    let mut sink = InMemorySink::new();

    let summary = capture_scenario(&reg, "demo", &mut host, &mut sink).unwrap();
    assert_eq!(summary.frames, 5);
    assert_eq!(summary.replay, ReplayState::Completed);
    assert!(host.touches.is_empty());
}

#[test]
fn long_gestures_are_truncated_to_the_budget() {
    // The registry keeps the authored duration; only the manifest compiler reconciles it.
    let reg = registry(100, vec![GestureStep::pause(10), GestureStep::tap(0.5, 0.5, 1)]);
    let mut host = FakeHost::default();
    let mut sink = InMemorySink::new();

    let summary = capture_scenario(&reg, "demo", &mut host, &mut sink).unwrap();
    assert_eq!(summary.frames, 5);
    assert_eq!(summary.gesture_frames_captured, 5);
    assert_eq!(summary.replay, ReplayState::BudgetExhausted);
    assert!(host.touches.is_empty());
}

#[test]
fn failure_mid_drag_cancels_the_pointer() {
    let drag = GestureStep::DragPath {
        points: vec![FractionPoint::new(0.0, 0.0), FractionPoint::new(1.0, 1.0)],
        hold_start_frames: 1,
        frames_per_waypoint: 2,
        release_frames: 1,
    };
    let reg = registry(1000, vec![drag]);
    let mut host = FakeHost {
        fail_on_move: true,
        ..FakeHost::default()
    };
    let mut sink = InMemorySink::new();

    let err = capture_scenario(&reg, "demo", &mut host, &mut sink).unwrap_err();
    assert!(matches!(err, ReelError::ResourceNotFound(_)));
    assert_eq!(
        host.touches,
        vec![
            TouchAction::Down(Point::new(10.0, 20.0)),
            TouchAction::Cancel
        ]
    );
    assert!(!sink.is_finished());
}

#[test]
fn unknown_scenario_fails_before_rendering() {
    let reg = registry(100, Vec::new());
    let mut host = FakeHost::default();
    let err = capture_scenario(&reg, "nope", &mut host, InMemorySink::new()).unwrap_err();
    assert!(matches!(err, ReelError::UnknownScenario { .. }));
    assert!(host.content.is_none());
}
