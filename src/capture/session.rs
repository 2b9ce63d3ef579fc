use crate::capture::host::{RenderHost, TouchAction};
use crate::capture::sink::{CaptureMetadata, FrameSink};
use crate::compile::timing::required_frames;
use crate::foundation::core::{FrameIndex, Point, Rect, frames_remaining};
use crate::foundation::error::ReelResult;
use crate::model::validate::validate_spec;
use crate::replay::engine::{Replay, ReplayState};
use crate::replay::surface::ReplaySurface;
use crate::scenario::registry::ScenarioRegistry;

/// Outcome of one scenario capture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaptureSummary {
    /// Scenario name.
    pub scenario: String,
    /// Frames pushed to the sink (always the full budget).
    pub frames: u32,
    /// Virtual clock step per frame.
    pub frame_step_ms: u64,
    /// Frames the gesture list asked for.
    pub gesture_frames_requested: u64,
    /// Frames captured while gestures were replaying.
    pub gesture_frames_captured: u32,
    /// Final replay state; `Completed` when the scenario has no gestures.
    pub replay: ReplayState,
}

/// Capture `name` from `registry` into `sink`, driving `host`.
///
/// The scenario is validated again before any rendering happens. Gestures replay first; the
/// remaining budget is then filled with plain frames, so the sink always receives exactly
/// `max(1, duration_ms * fps / 1000)` frames numbered from `frame-0001`.
#[tracing::instrument(skip(registry, host, sink))]
pub fn capture_scenario<R, H, K>(
    registry: &R,
    name: &str,
    mut host: H,
    mut sink: K,
) -> ReelResult<CaptureSummary>
where
    R: ScenarioRegistry + ?Sized,
    H: RenderHost,
    K: FrameSink,
{
    let spec = registry.find(name)?;
    validate_spec(spec)?;

    let meta = CaptureMetadata::for_spec(spec);
    let gestures = &spec.capture.gestures;
    tracing::info!(
        total_frames = meta.total_frames,
        frame_step_ms = meta.frame_step_ms,
        gestures = gestures.len(),
        "capturing scenario"
    );

    registry.render(&spec.name, &mut host)?;
    host.wait_for_idle()?;
    sink.begin(&meta)?;

    let mut bridge = HostBridge {
        host: &mut host,
        sink: &mut sink,
        node_tag: &spec.capture.interaction_node_tag,
        frame_step_ms: meta.frame_step_ms,
    };

    let (next, replay, gesture_frames_captured) = if gestures.is_empty() {
        (FrameIndex::FIRST, ReplayState::Completed, 0)
    } else {
        let report = Replay::new(gestures, meta.total_frames, FrameIndex::FIRST).run(&mut bridge)?;
        (report.next_frame, report.state, report.frames_captured)
    };

    let tail = frames_remaining(meta.total_frames, next);
    let end = if tail > 0 {
        bridge.capture(tail, next)?
    } else {
        next
    };
    sink.end()?;

    let summary = CaptureSummary {
        scenario: spec.name.clone(),
        frames: end.frames_since(FrameIndex::FIRST),
        frame_step_ms: meta.frame_step_ms,
        gesture_frames_requested: required_frames(gestures),
        gesture_frames_captured,
        replay,
    };
    tracing::info!(frames = summary.frames, replay = ?summary.replay, "scenario captured");
    Ok(summary)
}

/// Adapts a [`RenderHost`] plus [`FrameSink`] to the replay engine's surface contract.
///
/// Every captured frame advances the virtual clock by one step, waits for idle, rasterizes and
/// hands the bitmap to the sink.
struct HostBridge<'a, H, K> {
    host: &'a mut H,
    sink: &'a mut K,
    node_tag: &'a str,
    frame_step_ms: u64,
}

impl<H: RenderHost, K: FrameSink> ReplaySurface for HostBridge<'_, H, K> {
    fn bounds(&mut self) -> ReelResult<Rect> {
        self.host.node_bounds(self.node_tag)
    }

    fn settle(&mut self) -> ReelResult<()> {
        self.host.wait_for_idle()
    }

    fn capture(&mut self, frames: u32, from: FrameIndex) -> ReelResult<FrameIndex> {
        let mut idx = from;
        for _ in 0..frames {
            self.host.advance_clock(self.frame_step_ms)?;
            self.host.wait_for_idle()?;
            let frame = self.host.capture_frame()?;
            self.sink.push_frame(idx, &frame)?;
            idx = idx.advance(1);
        }
        Ok(idx)
    }

    fn click(&mut self, at: Point) -> ReelResult<()> {
        self.host.touch(TouchAction::Down(at))?;
        self.host.touch(TouchAction::Up)
    }

    fn down(&mut self, at: Point) -> ReelResult<()> {
        self.host.touch(TouchAction::Down(at))
    }

    fn move_to(&mut self, at: Point) -> ReelResult<()> {
        self.host.touch(TouchAction::Move(at))
    }

    fn up(&mut self) -> ReelResult<()> {
        self.host.touch(TouchAction::Up)
    }

    fn cancel(&mut self) -> ReelResult<()> {
        self.host.touch(TouchAction::Cancel)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/session.rs"]
mod tests;
