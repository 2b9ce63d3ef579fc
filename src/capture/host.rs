use crate::foundation::core::{Point, Rect};
use crate::foundation::error::{ReelError, ReelResult};

/// One captured bitmap in straight (non-premultiplied) RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major RGBA8 bytes, `width * height * 4` long.
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// Wrap raw pixels, checking the buffer length.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> ReelResult<Self> {
        let expected = u64::from(width) * u64::from(height) * 4;
        if data.len() as u64 != expected {
            return Err(ReelError::validation(
                "frame.data",
                format!(
                    "size mismatch: got {} bytes, expected {expected} for {width}x{height}",
                    data.len()
                ),
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Frame filled with a single color.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixels = (width as usize) * (height as usize);
        Self {
            width,
            height,
            data: rgba.repeat(pixels),
        }
    }
}

/// Low-level touch input delivered to the rendering collaborator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TouchAction {
    /// Pointer goes down at an absolute point.
    Down(Point),
    /// Pressed pointer moves to an absolute point.
    Move(Point),
    /// Pointer is released where it is.
    Up,
    /// Pointer stream is abandoned.
    Cancel,
}

/// The rendering side of a capture: owns the UI surface and its virtual clock.
///
/// Implementations drive a real UI toolkit (an instrumentation harness, a headless renderer);
/// this crate only calls these operations, in program order, from one thread.
pub trait RenderHost {
    /// Make `content` the current render target.
    fn set_content(&mut self, content: &str) -> ReelResult<()>;

    /// Advance the virtual clock by `ms` milliseconds.
    fn advance_clock(&mut self, ms: u64) -> ReelResult<()>;

    /// Block until rendering and pending input are idle.
    fn wait_for_idle(&mut self) -> ReelResult<()>;

    /// Current bounding box of the node tagged `tag`, in surface pixels.
    fn node_bounds(&mut self, tag: &str) -> ReelResult<Rect>;

    /// Deliver one touch action.
    fn touch(&mut self, action: TouchAction) -> ReelResult<()>;

    /// Rasterize the current surface.
    fn capture_frame(&mut self) -> ReelResult<FrameRGBA>;
}

impl<H: RenderHost + ?Sized> RenderHost for &mut H {
    fn set_content(&mut self, content: &str) -> ReelResult<()> {
        (**self).set_content(content)
    }

    fn advance_clock(&mut self, ms: u64) -> ReelResult<()> {
        (**self).advance_clock(ms)
    }

    fn wait_for_idle(&mut self) -> ReelResult<()> {
        (**self).wait_for_idle()
    }

    fn node_bounds(&mut self, tag: &str) -> ReelResult<Rect> {
        (**self).node_bounds(tag)
    }

    fn touch(&mut self, action: TouchAction) -> ReelResult<()> {
        (**self).touch(action)
    }

    fn capture_frame(&mut self) -> ReelResult<FrameRGBA> {
        (**self).capture_frame()
    }
}
