pub use kurbo::{Point, Rect};

/// 1-based index of a captured frame (`frame-0001` is `FrameIndex(1)`).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u32);

impl FrameIndex {
    /// Index of the first captured frame.
    pub const FIRST: FrameIndex = FrameIndex(1);

    /// Advance by `frames`, saturating at `u32::MAX`.
    pub fn advance(self, frames: u32) -> Self {
        Self(self.0.saturating_add(frames))
    }

    /// Number of frames emitted between `start` and `self` (exclusive end).
    pub fn frames_since(self, start: FrameIndex) -> u32 {
        self.0.saturating_sub(start.0)
    }
}

impl Default for FrameIndex {
    fn default() -> Self {
        Self::FIRST
    }
}

/// Frames still available in a budget of `total` when `next` is the next index to emit.
pub fn frames_remaining(total: u32, next: FrameIndex) -> u32 {
    total.saturating_sub(next.0.saturating_sub(1))
}

/// Virtual clock step per captured frame, in milliseconds (never below 1ms).
pub fn frame_step_ms(fps: u32) -> u64 {
    (1000 / u64::from(fps.max(1))).max(1)
}

/// Total frames captured for a scenario of `duration_ms` at `fps` (at least one).
pub fn capture_frame_count(duration_ms: u32, fps: u32) -> u32 {
    let frames = u64::from(duration_ms) * u64::from(fps) / 1000;
    u32::try_from(frames).unwrap_or(u32::MAX).max(1)
}

/// Resolve a fractional point against `bounds`.
///
/// Fractions are clamped to `[0, 1]` so the result always lies inside the rectangle.
pub fn resolve_fraction(bounds: Rect, x: f64, y: f64) -> Point {
    Point::new(
        bounds.x0 + bounds.width() * clamp_unit(x),
        bounds.y0 + bounds.height() * clamp_unit(y),
    )
}

/// Clamp to `[0, 1]`, mapping NaN to 0.
pub fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
