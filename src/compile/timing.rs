use crate::model::capture::GestureStep;

/// Minimum number of frames a gesture list needs to play out completely.
///
/// Negative authored counts contribute nothing.
pub fn required_frames(gestures: &[GestureStep]) -> u64 {
    gestures.iter().map(step_frames).sum()
}

/// Frames one gesture step consumes.
pub fn step_frames(step: &GestureStep) -> u64 {
    match step {
        GestureStep::Pause { frames } => non_negative(*frames),
        GestureStep::Tap { frames_after, .. } => non_negative(*frames_after),
        GestureStep::DragPath {
            points,
            hold_start_frames,
            frames_per_waypoint,
            release_frames,
        } => {
            let waypoints = points.len().saturating_sub(1) as u64;
            non_negative(*hold_start_frames)
                + non_negative(*frames_per_waypoint) * waypoints
                + non_negative(*release_frames)
        }
    }
}

/// `ceil(frames * 1000 / fps)`, `0` for non-positive frame counts; `fps` is floored at 1.
pub fn frames_to_ms_ceil(frames: i64, fps: i32) -> i32 {
    if frames <= 0 {
        return 0;
    }
    let fps = i64::from(fps.max(1));
    let ms = frames.saturating_mul(1000).saturating_add(fps - 1) / fps;
    i32::try_from(ms).unwrap_or(i32::MAX)
}

/// Extend `duration_ms` so every gesture can complete at `fps`. Never shortens.
pub fn reconcile_duration(duration_ms: i32, fps: i32, gestures: &[GestureStep]) -> i32 {
    let required = required_frames(gestures);
    if required == 0 {
        return duration_ms;
    }
    let required = i64::try_from(required).unwrap_or(i64::MAX);
    duration_ms.max(frames_to_ms_ceil(required, fps))
}

/// Frames equivalent to a start delay: `ceil(delay_ms * fps / 1000)`, `0` for negative delays.
pub fn start_delay_frames(delay_ms: i32, fps: i32) -> i32 {
    let delay = i64::from(delay_ms.max(0));
    let fps = i64::from(fps.max(1));
    let frames = (delay * fps + 999) / 1000;
    i32::try_from(frames).unwrap_or(i32::MAX)
}

/// Prepend a settle pause before scripted input.
///
/// Empty gesture lists and delays that convert to zero frames are returned unchanged.
pub fn apply_start_delay(gestures: Vec<GestureStep>, delay_ms: i32, fps: i32) -> Vec<GestureStep> {
    if gestures.is_empty() {
        return gestures;
    }
    let frames = start_delay_frames(delay_ms, fps);
    if frames <= 0 {
        return gestures;
    }
    let mut out = Vec::with_capacity(gestures.len() + 1);
    out.push(GestureStep::Pause { frames });
    out.extend(gestures);
    out
}

fn non_negative(v: i32) -> u64 {
    u64::try_from(v).unwrap_or(0)
}

#[cfg(test)]
#[path = "../../tests/unit/compile/timing.rs"]
mod tests;
