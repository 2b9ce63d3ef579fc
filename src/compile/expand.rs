use crate::model::capture::{FractionPoint, GestureStep};
use crate::model::interaction::{
    InteractionKind, InteractionSpec, InteractionTarget, SwipeDirection, SwipeDistance, SwipeSpeed,
};

/// Frame timing of one swipe: hold after press, travel between the two points, hold after release.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwipeTiming {
    /// Frames captured after pointer down.
    pub hold_start_frames: i32,
    /// Interpolated frames from start to end point.
    pub travel_frames: i32,
    /// Frames captured after pointer up.
    pub release_frames: i32,
}

/// `FAST` preset.
pub const SWIPE_FAST: SwipeTiming = SwipeTiming {
    hold_start_frames: 2,
    travel_frames: 6,
    release_frames: 2,
};

/// `NORMAL` preset.
pub const SWIPE_NORMAL: SwipeTiming = SwipeTiming {
    hold_start_frames: 6,
    travel_frames: 8,
    release_frames: 6,
};

/// `SLOW` preset.
pub const SWIPE_SLOW: SwipeTiming = SwipeTiming {
    hold_start_frames: 10,
    travel_frames: 12,
    release_frames: 10,
};

/// Expand one interaction intent into gesture primitives.
///
/// Unsupported intent kinds yield an empty list.
pub fn expand(spec: &InteractionSpec) -> Vec<GestureStep> {
    match spec.kind {
        InteractionKind::Pause => vec![GestureStep::Pause {
            frames: spec.frames,
        }],
        InteractionKind::Tap => {
            let point = target_point(spec.target);
            let frames_after = if spec.frames_after > 0 {
                spec.frames_after
            } else {
                spec.frames
            };
            vec![GestureStep::tap(point.x, point.y, frames_after)]
        }
        InteractionKind::Swipe => {
            let timing = swipe_timing(spec);
            let mut steps = vec![GestureStep::DragPath {
                points: swipe_points(spec.target, spec.direction, spec.distance).to_vec(),
                hold_start_frames: timing.hold_start_frames,
                frames_per_waypoint: timing.travel_frames,
                release_frames: timing.release_frames,
            }];
            if spec.frames_after > 0 {
                steps.push(GestureStep::Pause {
                    frames: spec.frames_after,
                });
            }
            steps
        }
        InteractionKind::Unsupported => Vec::new(),
    }
}

/// Expand a list of intents in order, concatenating their primitives.
pub fn expand_all<'a>(specs: impl IntoIterator<Item = &'a InteractionSpec>) -> Vec<GestureStep> {
    specs.into_iter().flat_map(expand).collect()
}

/// Fixed tap point for a target lane.
pub fn target_point(target: InteractionTarget) -> FractionPoint {
    match target {
        InteractionTarget::Center => FractionPoint::new(0.5, 0.5),
        InteractionTarget::Top => FractionPoint::new(0.5, 0.30),
        InteractionTarget::Bottom => FractionPoint::new(0.5, 0.70),
        InteractionTarget::Left => FractionPoint::new(0.30, 0.5),
        InteractionTarget::Right => FractionPoint::new(0.70, 0.5),
    }
}

/// Offset from center covered by each half of a swipe.
pub fn distance_offset(distance: SwipeDistance) -> f64 {
    match distance {
        SwipeDistance::Short => 0.18,
        SwipeDistance::Medium => 0.30,
        SwipeDistance::Long => 0.40,
    }
}

/// Start and end point of a swipe.
///
/// Horizontal swipes run along a Y lane picked by `TOP`/`BOTTOM`; vertical swipes along an
/// X lane picked by `LEFT`/`RIGHT`. Any other target uses the center lane.
pub fn swipe_points(
    target: InteractionTarget,
    direction: SwipeDirection,
    distance: SwipeDistance,
) -> [FractionPoint; 2] {
    let offset = distance_offset(distance);
    let near = (0.5 - offset).clamp(0.0, 1.0);
    let far = (0.5 + offset).clamp(0.0, 1.0);

    let lane_y = match target {
        InteractionTarget::Top => 0.30,
        InteractionTarget::Bottom => 0.70,
        _ => 0.5,
    };
    let lane_x = match target {
        InteractionTarget::Left => 0.30,
        InteractionTarget::Right => 0.70,
        _ => 0.5,
    };

    match direction {
        SwipeDirection::LeftToRight => [
            FractionPoint::new(near, lane_y),
            FractionPoint::new(far, lane_y),
        ],
        SwipeDirection::RightToLeft => [
            FractionPoint::new(far, lane_y),
            FractionPoint::new(near, lane_y),
        ],
        SwipeDirection::TopToBottom => [
            FractionPoint::new(lane_x, near),
            FractionPoint::new(lane_x, far),
        ],
        SwipeDirection::BottomToTop => [
            FractionPoint::new(lane_x, far),
            FractionPoint::new(lane_x, near),
        ],
    }
}

/// Timing for a swipe intent.
///
/// Any preset other than `CUSTOM` replaces all three explicit timing fields.
pub fn swipe_timing(spec: &InteractionSpec) -> SwipeTiming {
    match spec.speed {
        SwipeSpeed::Custom => SwipeTiming {
            hold_start_frames: spec.hold_start_frames,
            travel_frames: spec.travel_frames,
            release_frames: spec.release_frames,
        },
        SwipeSpeed::Fast => SWIPE_FAST,
        SwipeSpeed::Normal => SWIPE_NORMAL,
        SwipeSpeed::Slow => SWIPE_SLOW,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/expand.rs"]
mod tests;
