use crate::compile::timing::required_frames;
use crate::foundation::core::{FrameIndex, Point, clamp_unit, frames_remaining, resolve_fraction};
use crate::foundation::error::{ReelError, ReelResult};
use crate::model::capture::{FractionPoint, GestureStep};
use crate::replay::surface::ReplaySurface;

/// Lifecycle of one replay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplayState {
    /// Constructed, not started.
    Idle,
    /// Driving gestures.
    Running,
    /// Every step played out within the budget.
    Completed,
    /// The frame budget ran out; the tail of the gesture list was truncated or skipped.
    BudgetExhausted,
    /// A surface operation failed; the pointer was cancelled before the error propagated.
    Aborted,
}

/// Outcome of a finished replay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayReport {
    /// Next unused frame index.
    pub next_frame: FrameIndex,
    /// Frames actually captured.
    pub frames_captured: u32,
    /// Frames the gesture list asked for.
    pub frames_requested: u64,
    /// Steps that started executing (a truncated step counts).
    pub steps_started: usize,
    /// `Completed` or `BudgetExhausted`.
    pub state: ReplayState,
}

/// Drives a gesture list against a [`ReplaySurface`], one frame at a time, under a total budget.
///
/// The run is strictly sequential: every pointer, settle and capture call is issued in program
/// order so two runs over the same inputs produce identical call sequences.
#[derive(Debug)]
pub struct Replay<'a> {
    steps: &'a [GestureStep],
    total_frames: u32,
    start: FrameIndex,
    state: ReplayState,
}

impl<'a> Replay<'a> {
    /// Prepare a replay of `steps` with room for `total_frames` frames, starting at `start`.
    pub fn new(steps: &'a [GestureStep], total_frames: u32, start: FrameIndex) -> Self {
        Self {
            steps,
            total_frames,
            start,
            state: ReplayState::Idle,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ReplayState {
        self.state
    }

    /// Run the replay to completion or budget exhaustion.
    ///
    /// On error while the pointer is pressed, `cancel()` and `settle()` are issued (best effort)
    /// before the error is returned. A replay runs at most once.
    #[tracing::instrument(skip_all, fields(steps = self.steps.len(), total_frames = self.total_frames, start = self.start.0))]
    pub fn run<S: ReplaySurface>(&mut self, surface: S) -> ReelResult<ReplayReport> {
        if self.state != ReplayState::Idle {
            return Err(ReelError::Other(anyhow::anyhow!(
                "replay already ran (state {:?})",
                self.state
            )));
        }
        self.state = ReplayState::Running;

        let mut guard = PointerGuard {
            surface,
            pressed: false,
        };
        let result = self.drive(&mut guard);
        drop(guard);

        match result {
            Ok(report) => {
                self.state = report.state;
                tracing::debug!(
                    next_frame = report.next_frame.0,
                    frames_captured = report.frames_captured,
                    state = ?report.state,
                    "replay finished"
                );
                Ok(report)
            }
            Err(e) => {
                self.state = ReplayState::Aborted;
                Err(e)
            }
        }
    }

    fn drive<S: ReplaySurface>(&self, ptr: &mut PointerGuard<S>) -> ReelResult<ReplayReport> {
        let mut cursor = Cursor {
            next: self.start,
            total: self.total_frames,
            truncated: false,
        };
        let mut steps_started = 0;

        for (index, step) in self.steps.iter().enumerate() {
            if cursor.remaining() == 0 {
                cursor.truncated = true;
                break;
            }
            steps_started += 1;
            tracing::debug!(index, kind = step.kind(), next_frame = cursor.next.0, "gesture step");

            match step {
                GestureStep::Pause { frames } => {
                    cursor.capture(&mut ptr.surface, *frames)?;
                }
                GestureStep::Tap {
                    x_fraction,
                    y_fraction,
                    frames_after,
                } => {
                    let at = resolve_fraction(ptr.surface.bounds()?, *x_fraction, *y_fraction);
                    ptr.surface.click(at)?;
                    ptr.surface.settle()?;
                    cursor.capture(&mut ptr.surface, *frames_after)?;
                }
                GestureStep::DragPath {
                    points,
                    hold_start_frames,
                    frames_per_waypoint,
                    release_frames,
                } => {
                    let Some((first, rest)) = points.split_first() else {
                        continue;
                    };
                    if rest.is_empty() {
                        continue;
                    }
                    self.drag(
                        ptr,
                        &mut cursor,
                        *first,
                        rest,
                        *hold_start_frames,
                        *frames_per_waypoint,
                        *release_frames,
                    )?;
                }
            }
        }

        Ok(ReplayReport {
            next_frame: cursor.next,
            frames_captured: cursor.next.frames_since(self.start),
            frames_requested: required_frames(self.steps),
            steps_started,
            state: if cursor.truncated {
                ReplayState::BudgetExhausted
            } else {
                ReplayState::Completed
            },
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn drag<S: ReplaySurface>(
        &self,
        ptr: &mut PointerGuard<S>,
        cursor: &mut Cursor,
        first: FractionPoint,
        rest: &[FractionPoint],
        hold_start_frames: i32,
        frames_per_waypoint: i32,
        release_frames: i32,
    ) -> ReelResult<()> {
        let start = resolve_fraction(ptr.surface.bounds()?, first.x, first.y);
        ptr.press(start)?;
        ptr.surface.settle()?;
        cursor.capture(&mut ptr.surface, hold_start_frames)?;

        let per_waypoint = u32::try_from(frames_per_waypoint).unwrap_or(0);
        let mut previous = start;
        'waypoints: for point in rest {
            if cursor.remaining() == 0 {
                cursor.truncated = true;
                break;
            }
            let target = resolve_fraction(ptr.surface.bounds()?, point.x, point.y);
            if per_waypoint == 0 {
                ptr.surface.move_to(target)?;
                ptr.surface.settle()?;
            } else {
                for k in 1..=per_waypoint {
                    if cursor.remaining() == 0 {
                        cursor.truncated = true;
                        break 'waypoints;
                    }
                    let at = interpolate(previous, target, f64::from(k) / f64::from(per_waypoint));
                    ptr.surface.move_to(at)?;
                    ptr.surface.settle()?;
                    cursor.next = ptr.surface.capture(1, cursor.next)?;
                }
            }
            previous = target;
        }

        ptr.release()?;
        ptr.surface.settle()?;
        cursor.capture(&mut ptr.surface, release_frames)?;
        Ok(())
    }
}

/// Replay `steps` and return the next unused frame index.
pub fn replay_gestures<S: ReplaySurface>(
    surface: S,
    steps: &[GestureStep],
    total_frames: u32,
    start: FrameIndex,
) -> ReelResult<FrameIndex> {
    Replay::new(steps, total_frames, start)
        .run(surface)
        .map(|report| report.next_frame)
}

/// Linear interpolation with `progress` clamped to `[0, 1]`.
pub fn interpolate(start: Point, end: Point, progress: f64) -> Point {
    start.lerp(end, clamp_unit(progress))
}

struct Cursor {
    next: FrameIndex,
    total: u32,
    truncated: bool,
}

impl Cursor {
    fn remaining(&self) -> u32 {
        frames_remaining(self.total, self.next)
    }

    fn capture<S: ReplaySurface>(&mut self, surface: &mut S, requested: i32) -> ReelResult<()> {
        let requested = u32::try_from(requested).unwrap_or(0);
        let granted = requested.min(self.remaining());
        if granted < requested {
            self.truncated = true;
        }
        if granted > 0 {
            self.next = surface.capture(granted, self.next)?;
        }
        Ok(())
    }
}

/// Tracks whether the pointer is pressed and cancels it when dropped while still down.
struct PointerGuard<S: ReplaySurface> {
    surface: S,
    pressed: bool,
}

impl<S: ReplaySurface> PointerGuard<S> {
    fn press(&mut self, at: Point) -> ReelResult<()> {
        // Marked before the call so a failing `down` still gets cancelled.
        self.pressed = true;
        self.surface.down(at)
    }

    fn release(&mut self) -> ReelResult<()> {
        self.surface.up()?;
        self.pressed = false;
        Ok(())
    }
}

impl<S: ReplaySurface> Drop for PointerGuard<S> {
    fn drop(&mut self) {
        if !self.pressed {
            return;
        }
        self.pressed = false;
        if let Err(e) = self.surface.cancel() {
            tracing::warn!(error = %e, "pointer cancel failed during replay cleanup");
        }
        if let Err(e) = self.surface.settle() {
            tracing::warn!(error = %e, "settle failed during replay cleanup");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/replay/engine.rs"]
mod tests;
