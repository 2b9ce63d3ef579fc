use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::capture::host::FrameRGBA;
use crate::foundation::core::{FrameIndex, capture_frame_count, frame_step_ms};
use crate::foundation::error::{ReelError, ReelResult};
use crate::model::capture::{ScenarioSpec, Theme};
use crate::model::validate::require_name;

/// File name of the metadata record written next to captured frames.
pub const METADATA_FILE: &str = "metadata.txt";

/// Descriptive record of one capture run, stored as `key=value` lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaptureMetadata {
    /// Scenario name.
    pub scenario: String,
    /// Reconciled duration in milliseconds.
    pub duration_ms: u32,
    /// Capture frame rate.
    pub fps: u32,
    /// Configured output width.
    pub width_px: u32,
    /// Configured output height (`0` = auto).
    pub height_px: u32,
    /// Theme tag.
    pub theme: Theme,
    /// Virtual clock step between frames.
    pub frame_step_ms: u64,
    /// Number of frames the capture emits.
    pub total_frames: u32,
}

impl CaptureMetadata {
    /// Derive the metadata of a validated scenario.
    pub fn for_spec(spec: &ScenarioSpec) -> Self {
        let c = &spec.capture;
        let duration_ms = u32::try_from(c.duration_ms).unwrap_or(0);
        let fps = u32::try_from(c.fps).unwrap_or(1);
        Self {
            scenario: spec.name.clone(),
            duration_ms,
            fps,
            width_px: u32::try_from(c.width_px).unwrap_or(0),
            height_px: u32::try_from(c.height_px).unwrap_or(0),
            theme: c.theme,
            frame_step_ms: frame_step_ms(fps),
            total_frames: capture_frame_count(duration_ms, fps),
        }
    }

    /// Render as newline-separated `key=value` pairs, in a fixed key order.
    pub fn to_key_values(&self) -> String {
        format!(
            "scenario={}\nduration_ms={}\nfps={}\nwidth_px={}\nheight_px={}\ntheme={}\nframe_step_ms={}\ntotal_frames={}",
            self.scenario,
            self.duration_ms,
            self.fps,
            self.width_px,
            self.height_px,
            self.theme.as_str(),
            self.frame_step_ms,
            self.total_frames,
        )
    }

    /// Parse the `key=value` form. Unknown keys and blank lines are ignored; `scenario` must be a
    /// valid scenario name.
    pub fn parse(text: &str) -> ReelResult<Self> {
        let mut scenario = None;
        let mut duration_ms = None;
        let mut fps = None;
        let mut width_px = None;
        let mut height_px = None;
        let mut theme = None;
        let mut frame_step = None;
        let mut total_frames = None;

        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let Some((key, value)) = line.split_once('=') else {
                return Err(ReelError::serde(format!("malformed metadata line '{line}'")));
            };
            let value = value.trim();
            match key.trim() {
                "scenario" => scenario = Some(value.to_owned()),
                "duration_ms" => duration_ms = Some(parse_num(key, value)?),
                "fps" => fps = Some(parse_num(key, value)?),
                "width_px" => width_px = Some(parse_num(key, value)?),
                "height_px" => height_px = Some(parse_num(key, value)?),
                "theme" => theme = Some(parse_theme(value)?),
                "frame_step_ms" => frame_step = Some(parse_num(key, value)?),
                "total_frames" => total_frames = Some(parse_num(key, value)?),
                _ => {}
            }
        }

        let scenario = required("scenario", scenario)?;
        require_name(&scenario)?;
        Ok(Self {
            scenario,
            duration_ms: required("duration_ms", duration_ms)?,
            fps: required("fps", fps)?,
            width_px: required("width_px", width_px)?,
            height_px: required("height_px", height_px)?,
            theme: required("theme", theme)?,
            frame_step_ms: required("frame_step_ms", frame_step)?,
            total_frames: required("total_frames", total_frames)?,
        })
    }

    /// Read and parse a metadata file.
    pub fn from_path(path: &Path) -> ReelResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read capture metadata '{}'", path.display()))?;
        Self::parse(&text)
    }
}

fn parse_num<T: std::str::FromStr>(key: &str, value: &str) -> ReelResult<T> {
    value
        .parse()
        .map_err(|_| ReelError::serde(format!("metadata key '{key}' is not a number: '{value}'")))
}

fn parse_theme(value: &str) -> ReelResult<Theme> {
    match value {
        "LIGHT" => Ok(Theme::Light),
        "DARK" => Ok(Theme::Dark),
        other => Err(ReelError::serde(format!("unknown theme '{other}'"))),
    }
}

fn required<T>(key: &str, value: Option<T>) -> ReelResult<T> {
    value.ok_or_else(|| ReelError::serde(format!("metadata is missing '{key}'")))
}

/// File name of the frame at `idx` (`frame-0001.png`).
pub fn frame_file_name(idx: FrameIndex) -> String {
    format!("frame-{:04}.png", idx.0)
}

/// Consumer of captured frames.
///
/// Ordering contract: `push_frame` is called with strictly consecutive indices starting at
/// [`FrameIndex::FIRST`].
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, meta: &CaptureMetadata) -> ReelResult<()>;
    /// Push one frame.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> ReelResult<()>;
    /// Called once after the last frame.
    fn end(&mut self) -> ReelResult<()>;
}

impl<K: FrameSink + ?Sized> FrameSink for &mut K {
    fn begin(&mut self, meta: &CaptureMetadata) -> ReelResult<()> {
        (**self).begin(meta)
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> ReelResult<()> {
        (**self).push_frame(idx, frame)
    }

    fn end(&mut self) -> ReelResult<()> {
        (**self).end()
    }
}

/// In-memory sink for tests and dry runs.
#[derive(Debug, Default)]
pub struct InMemorySink {
    meta: Option<CaptureMetadata>,
    frames: Vec<(FrameIndex, FrameRGBA)>,
    finished: bool,
}

impl InMemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Metadata received in `begin`, if any.
    pub fn metadata(&self) -> Option<&CaptureMetadata> {
        self.meta.as_ref()
    }

    /// Frames received so far, in push order.
    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }

    /// Whether `end` has been called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, meta: &CaptureMetadata) -> ReelResult<()> {
        self.meta = Some(meta.clone());
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> ReelResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> ReelResult<()> {
        self.finished = true;
        Ok(())
    }
}

/// Writes `frame-%04d.png` files and `metadata.txt` into `<root>/<scenario>/`.
///
/// The scenario directory is wiped in `begin`, so a directory only ever holds one capture.
#[derive(Debug)]
pub struct DirectorySink {
    root: PathBuf,
    dir: Option<PathBuf>,
    meta: Option<CaptureMetadata>,
    next: FrameIndex,
}

impl DirectorySink {
    /// Sink rooted at `root`; nothing is touched until `begin`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            dir: None,
            meta: None,
            next: FrameIndex::FIRST,
        }
    }

    /// Per-scenario directory of the current capture, once begun.
    pub fn scenario_dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    fn current_dir(&self) -> ReelResult<&Path> {
        self.dir
            .as_deref()
            .ok_or_else(|| ReelError::Other(anyhow::anyhow!("directory sink used before begin")))
    }
}

impl FrameSink for DirectorySink {
    fn begin(&mut self, meta: &CaptureMetadata) -> ReelResult<()> {
        // The name becomes a path component that is wiped below.
        require_name(&meta.scenario)?;
        let dir = self.root.join(&meta.scenario);
        if dir.exists() {
            std::fs::remove_dir_all(&dir)
                .with_context(|| format!("clear capture dir '{}'", dir.display()))?;
        }
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("create capture dir '{}'", dir.display()))?;

        self.dir = Some(dir);
        self.meta = Some(meta.clone());
        self.next = FrameIndex::FIRST;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> ReelResult<()> {
        if idx != self.next {
            return Err(ReelError::validation(
                "frame_index",
                format!("expected frame {}, got {}", self.next.0, idx.0),
            ));
        }
        let path = self.current_dir()?.join(frame_file_name(idx));
        image::save_buffer_with_format(
            &path,
            &frame.data,
            frame.width,
            frame.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        self.next = idx.advance(1);
        Ok(())
    }

    fn end(&mut self) -> ReelResult<()> {
        let dir = self.current_dir()?.to_path_buf();
        let Some(meta) = self.meta.as_ref() else {
            return Err(ReelError::Other(anyhow::anyhow!(
                "directory sink ended without metadata"
            )));
        };
        let path = dir.join(METADATA_FILE);
        std::fs::write(&path, meta.to_key_values())
            .with_context(|| format!("write metadata '{}'", path.display()))?;
        tracing::debug!(dir = %dir.display(), frames = self.next.frames_since(FrameIndex::FIRST), "capture written");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/sink.rs"]
mod tests;
