use crate::foundation::core::{FrameIndex, Point, Rect};
use crate::foundation::error::ReelResult;

/// Everything the replay engine needs from the outside world.
///
/// `settle` and `capture` are the only operations expected to block; pointer operations take
/// absolute coordinates already resolved against [`ReplaySurface::bounds`].
pub trait ReplaySurface {
    /// Current bounding box of the interaction target.
    fn bounds(&mut self) -> ReelResult<Rect>;

    /// Block until the surface is quiescent after an input event.
    fn settle(&mut self) -> ReelResult<()>;

    /// Emit `frames` captured frames starting at `from`; returns the index after the last one.
    fn capture(&mut self, frames: u32, from: FrameIndex) -> ReelResult<FrameIndex>;

    /// Synthetic click (down + up) at `at`.
    fn click(&mut self, at: Point) -> ReelResult<()>;

    /// Press the pointer at `at`.
    fn down(&mut self, at: Point) -> ReelResult<()>;

    /// Move the pressed pointer to `at`.
    fn move_to(&mut self, at: Point) -> ReelResult<()>;

    /// Release the pointer where it is.
    fn up(&mut self) -> ReelResult<()>;

    /// Abandon the current pointer stream.
    fn cancel(&mut self) -> ReelResult<()>;
}

impl<S: ReplaySurface + ?Sized> ReplaySurface for &mut S {
    fn bounds(&mut self) -> ReelResult<Rect> {
        (**self).bounds()
    }

    fn settle(&mut self) -> ReelResult<()> {
        (**self).settle()
    }

    fn capture(&mut self, frames: u32, from: FrameIndex) -> ReelResult<FrameIndex> {
        (**self).capture(frames, from)
    }

    fn click(&mut self, at: Point) -> ReelResult<()> {
        (**self).click(at)
    }

    fn down(&mut self, at: Point) -> ReelResult<()> {
        (**self).down(at)
    }

    fn move_to(&mut self, at: Point) -> ReelResult<()> {
        (**self).move_to(at)
    }

    fn up(&mut self) -> ReelResult<()> {
        (**self).up()
    }

    fn cancel(&mut self) -> ReelResult<()> {
        (**self).cancel()
    }
}

/// Pointer event recorded by [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceEvent {
    /// `settle()`.
    Settle,
    /// `capture(frames, from)`.
    Capture {
        /// Frames requested.
        frames: u32,
        /// Starting index.
        from: FrameIndex,
    },
    /// `click(at)`.
    Click(Point),
    /// `down(at)`.
    Down(Point),
    /// `move_to(at)`.
    Move(Point),
    /// `up()`.
    Up,
    /// `cancel()`.
    Cancel,
}

/// Deterministic in-memory surface that logs every call.
///
/// Useful for dry runs (`plan`) and tests; capture advances the index without producing pixels.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    bounds: Rect,
    events: Vec<SurfaceEvent>,
}

impl RecordingSurface {
    /// Surface with fixed `bounds`.
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            events: Vec::new(),
        }
    }

    /// Every call observed so far, in order.
    pub fn events(&self) -> &[SurfaceEvent] {
        &self.events
    }

    /// Total frames captured across all `capture` calls.
    pub fn captured_frames(&self) -> u64 {
        self.events
            .iter()
            .map(|e| match e {
                SurfaceEvent::Capture { frames, .. } => u64::from(*frames),
                _ => 0,
            })
            .sum()
    }

    /// Pointer positions in the order they were issued (click, down and move).
    pub fn pointer_path(&self) -> Vec<Point> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SurfaceEvent::Click(p) | SurfaceEvent::Down(p) | SurfaceEvent::Move(p) => Some(*p),
                _ => None,
            })
            .collect()
    }
}

impl ReplaySurface for RecordingSurface {
    fn bounds(&mut self) -> ReelResult<Rect> {
        Ok(self.bounds)
    }

    fn settle(&mut self) -> ReelResult<()> {
        self.events.push(SurfaceEvent::Settle);
        Ok(())
    }

    fn capture(&mut self, frames: u32, from: FrameIndex) -> ReelResult<FrameIndex> {
        self.events.push(SurfaceEvent::Capture { frames, from });
        Ok(from.advance(frames))
    }

    fn click(&mut self, at: Point) -> ReelResult<()> {
        self.events.push(SurfaceEvent::Click(at));
        Ok(())
    }

    fn down(&mut self, at: Point) -> ReelResult<()> {
        self.events.push(SurfaceEvent::Down(at));
        Ok(())
    }

    fn move_to(&mut self, at: Point) -> ReelResult<()> {
        self.events.push(SurfaceEvent::Move(at));
        Ok(())
    }

    fn up(&mut self) -> ReelResult<()> {
        self.events.push(SurfaceEvent::Up);
        Ok(())
    }

    fn cancel(&mut self) -> ReelResult<()> {
        self.events.push(SurfaceEvent::Cancel);
        Ok(())
    }
}
