use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::encode::tools::{ToolCommand, ensure_binary_exists, run_checked};
use crate::foundation::error::{ReelError, ReelResult};
use crate::model::validate::require_name;

/// Input pattern ffmpeg reads numbered frames with.
pub const FRAME_PATTERN: &str = "frame-%04d.png";

/// Tools and geometry for turning a frame directory into a GIF.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GifEncodeOpts {
    /// `ffmpeg` binary.
    pub ffmpeg_bin: String,
    /// `gifsicle` binary.
    pub gifsicle_bin: String,
    /// Playback frame rate.
    pub fps: u32,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels; `0` derives it from the frames.
    pub height: u32,
}

impl Default for GifEncodeOpts {
    fn default() -> Self {
        Self {
            ffmpeg_bin: "ffmpeg".to_owned(),
            gifsicle_bin: "gifsicle".to_owned(),
            fps: 50,
            width: 540,
            height: 0,
        }
    }
}

impl GifEncodeOpts {
    /// Reject geometry ffmpeg cannot work with.
    pub fn validate(&self) -> ReelResult<()> {
        if self.width == 0 {
            return Err(ReelError::validation("gif_width", "must be greater than 0."));
        }
        if self.fps == 0 {
            return Err(ReelError::validation("fps", "must be greater than 0."));
        }
        Ok(())
    }
}

/// `true` for names of the form `frame-dddd.png`.
pub fn is_frame_file_name(name: &str) -> bool {
    name.strip_prefix("frame-")
        .and_then(|rest| rest.strip_suffix(".png"))
        .is_some_and(|digits| digits.len() == 4 && digits.bytes().all(|b| b.is_ascii_digit()))
}

/// Captured frames in `dir`, sorted by name.
pub fn list_frames(dir: &Path) -> ReelResult<Vec<PathBuf>> {
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("read frame dir '{}'", dir.display()))?;

    let mut frames = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("read frame dir '{}'", dir.display()))?;
        let is_frame = entry.file_name().to_str().is_some_and(is_frame_file_name);
        if is_frame && entry.path().is_file() {
            frames.push(entry.path());
        }
    }
    if frames.is_empty() {
        return Err(ReelError::resource(format!(
            "no frames found in '{}'",
            dir.display()
        )));
    }
    frames.sort();
    Ok(frames)
}

/// Height of a `frame_width x frame_height` frame scaled to `width`, rounded up.
pub fn scaled_height(frame_width: u32, frame_height: u32, width: u32) -> u32 {
    if frame_width == 0 {
        return 0;
    }
    let scaled = (u64::from(frame_height) * u64::from(width)).div_ceil(u64::from(frame_width));
    u32::try_from(scaled).unwrap_or(u32::MAX)
}

/// Output canvas height: `configured` when positive, else the tallest scaled frame (at least 1).
pub fn resolve_canvas_height(frames: &[PathBuf], width: u32, configured: u32) -> ReelResult<u32> {
    if configured > 0 {
        return Ok(configured);
    }
    let mut tallest = 0;
    for frame in frames {
        let (w, h) = image::image_dimensions(frame)
            .with_context(|| format!("read frame dimensions '{}'", frame.display()))?;
        tallest = tallest.max(scaled_height(w, h, width));
    }
    Ok(tallest.max(1))
}

/// Scale-to-fit, letterbox on black and drop alpha.
pub fn normalize_filter(width: u32, height: u32) -> String {
    format!(
        "scale={width}:{height}:flags=lanczos:force_original_aspect_ratio=decrease,\
         pad={width}:{height}:(ow-iw)/2:(oh-ih)/2:color=black,format=rgb24"
    )
}

fn ffmpeg_input(opts: &GifEncodeOpts, frames_dir: &Path) -> ToolCommand {
    ToolCommand::new(&opts.ffmpeg_bin)
        .args(["-hide_banner", "-loglevel", "error", "-y", "-framerate"])
        .arg(opts.fps.to_string())
        .arg("-i")
        .path_arg(&frames_dir.join(FRAME_PATTERN))
}

/// Normalize every frame into `out_dir` at `width x height`.
pub fn normalize_command(
    opts: &GifEncodeOpts,
    frames_dir: &Path,
    out_dir: &Path,
    height: u32,
) -> ToolCommand {
    ffmpeg_input(opts, frames_dir)
        .arg("-vf")
        .arg(normalize_filter(opts.width, height))
        .path_arg(&out_dir.join(FRAME_PATTERN))
}

/// Build one 256-color palette from every frame.
pub fn palettegen_command(opts: &GifEncodeOpts, frames_dir: &Path, palette: &Path) -> ToolCommand {
    ffmpeg_input(opts, frames_dir)
        .args(["-vf", "palettegen=stats_mode=full", "-frames:v", "1"])
        .path_arg(palette)
}

/// Encode frames against `palette` into an animated GIF.
pub fn paletteuse_command(
    opts: &GifEncodeOpts,
    frames_dir: &Path,
    palette: &Path,
    gif: &Path,
) -> ToolCommand {
    ffmpeg_input(opts, frames_dir)
        .arg("-i")
        .path_arg(palette)
        .args([
            "-lavfi",
            "paletteuse=dither=bayer:bayer_scale=3:diff_mode=rectangle",
        ])
        .path_arg(gif)
}

/// Lossless size optimization pass.
pub fn gifsicle_command(opts: &GifEncodeOpts, input: &Path, output: &Path) -> ToolCommand {
    ToolCommand::new(&opts.gifsicle_bin)
        .args(["--no-warnings", "--optimize=3", "--lossy=0", "--colors", "256"])
        .path_arg(input)
        .arg("-o")
        .path_arg(output)
}

/// Encode `frames_dir` into `<out_dir>/<scenario>.gif`, using `work_dir` for intermediates.
///
/// `scenario` must be a valid scenario name and both tools must be on `PATH` (or be paths to
/// executables) before anything is touched. Any failing stage aborts with the subprocess output.
#[tracing::instrument(skip(opts), fields(fps = opts.fps, width = opts.width))]
pub fn encode_gif(
    frames_dir: &Path,
    work_dir: &Path,
    out_dir: &Path,
    scenario: &str,
    opts: &GifEncodeOpts,
) -> ReelResult<PathBuf> {
    require_name(scenario)?;
    opts.validate()?;
    ensure_binary_exists(&opts.ffmpeg_bin)?;
    ensure_binary_exists(&opts.gifsicle_bin)?;
    let frames = list_frames(frames_dir)?;
    let height = resolve_canvas_height(&frames, opts.width, opts.height)?;
    tracing::debug!(frames = frames.len(), height, "encoding gif");

    let normalized = work_dir.join("normalized").join(scenario);
    recreate_dir(&normalized)?;
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("create output dir '{}'", out_dir.display()))?;

    let palette = work_dir.join(format!("{scenario}.palette.png"));
    let base_gif = work_dir.join(format!("{scenario}.base.gif"));
    let final_gif = out_dir.join(format!("{scenario}.gif"));

    run_checked(&normalize_command(opts, frames_dir, &normalized, height))?;
    run_checked(&palettegen_command(opts, &normalized, &palette))?;
    run_checked(&paletteuse_command(opts, &normalized, &palette, &base_gif))?;
    run_checked(&gifsicle_command(opts, &base_gif, &final_gif))?;

    if !final_gif.is_file() {
        return Err(ReelError::resource(format!(
            "encoder reported success but '{}' was not written",
            final_gif.display()
        )));
    }
    tracing::info!(gif = %final_gif.display(), "generated gif");
    Ok(final_gif)
}

/// Remove `dir` if present and create it empty.
pub(crate) fn recreate_dir(dir: &Path) -> ReelResult<()> {
    if dir.exists() {
        std::fs::remove_dir_all(dir).with_context(|| format!("clear dir '{}'", dir.display()))?;
    }
    std::fs::create_dir_all(dir).with_context(|| format!("create dir '{}'", dir.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
