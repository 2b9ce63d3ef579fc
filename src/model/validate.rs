use crate::foundation::error::{ReelError, ReelResult, ValidationError};
use crate::model::capture::{CaptureConfig, GestureStep, ScenarioSpec};

/// Validate a complete scenario: name first, then its capture configuration.
///
/// Reports the first violation in declaration order and nothing else.
pub fn validate_spec(spec: &ScenarioSpec) -> ReelResult<()> {
    require_name(&spec.name)?;
    validate_config(&spec.capture)
}

/// Validate capture configuration constraints.
pub fn validate_config(config: &CaptureConfig) -> ReelResult<()> {
    if config.duration_ms <= 0 {
        return Err(ReelError::validation(
            "duration_ms",
            "must be greater than 0.",
        ));
    }
    if !(1..=120).contains(&config.fps) {
        return Err(ReelError::validation("fps", "must be in range [1, 120]."));
    }
    if config.width_px <= 0 {
        return Err(ReelError::validation("width_px", "must be greater than 0."));
    }
    if config.height_px < 0 {
        return Err(ReelError::validation(
            "height_px",
            "must be 0 (auto) or greater.",
        ));
    }
    if config.interaction_node_tag.trim().is_empty() && !config.gestures.is_empty() {
        return Err(ReelError::validation(
            "interaction_node_tag",
            "must be provided when gestures are configured.",
        ));
    }
    for (index, gesture) in config.gestures.iter().enumerate() {
        validate_gesture(index, gesture)?;
    }
    Ok(())
}

/// Validate a scenario name: non-blank and `[A-Za-z0-9_-]+`.
pub fn require_name(name: &str) -> ReelResult<()> {
    if name.trim().is_empty() {
        return Err(ReelError::validation("name", "cannot be blank."));
    }
    if !is_valid_name(name) {
        return Err(ReelError::validation("name", "must match [a-zA-Z0-9_-]+."));
    }
    Ok(())
}

/// `true` when `name` is non-empty and only uses `[A-Za-z0-9_-]`.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn validate_gesture(index: usize, gesture: &GestureStep) -> Result<(), ValidationError> {
    match gesture {
        GestureStep::Pause { frames } => {
            require_non_negative(index, "frames", *frames)?;
        }
        GestureStep::Tap {
            x_fraction,
            y_fraction,
            frames_after,
        } => {
            require_fraction(index, "x_fraction", *x_fraction)?;
            require_fraction(index, "y_fraction", *y_fraction)?;
            require_non_negative(index, "frames_after", *frames_after)?;
        }
        GestureStep::DragPath {
            points,
            hold_start_frames,
            frames_per_waypoint,
            release_frames,
        } => {
            if points.len() < 2 {
                return Err(ValidationError::gesture(
                    index,
                    "points",
                    "drag path must contain at least 2 points.",
                ));
            }
            for (point_index, point) in points.iter().enumerate() {
                require_fraction(index, &format!("points[{point_index}].x"), point.x)?;
                require_fraction(index, &format!("points[{point_index}].y"), point.y)?;
            }
            require_non_negative(index, "hold_start_frames", *hold_start_frames)?;
            require_non_negative(index, "frames_per_waypoint", *frames_per_waypoint)?;
            require_non_negative(index, "release_frames", *release_frames)?;
        }
    }
    Ok(())
}

fn require_non_negative(index: usize, field: &str, value: i32) -> Result<(), ValidationError> {
    if value < 0 {
        return Err(ValidationError::gesture(index, field, "must be >= 0."));
    }
    Ok(())
}

fn require_fraction(index: usize, field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(ValidationError::gesture(
            index,
            field,
            "must be in range [0.0, 1.0].",
        ));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/model/validate.rs"]
mod tests;
