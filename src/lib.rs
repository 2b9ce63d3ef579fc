//! gifreel turns declarative UI-animation scenarios into deterministic, frame-exact captures.
//!
//! A scenario names some renderable content plus a capture configuration: duration, frame
//! rate, output size and an optional script of simulated input. gifreel compiles that script,
//! replays it against a live surface one virtual frame at a time, and hands the frames to an
//! external `ffmpeg` + `gifsicle` chain that produces one GIF per scenario.
//!
//! # Pipeline overview
//!
//! 1. **Declare**: a JSON [`ScenarioManifest`] (or [`RegistryBuilder`] calls) produce validated
//!    [`ScenarioSpec`]s in an immutable [`Registry`].
//! 2. **Compile**: [`InteractionSpec`] intents expand into [`GestureStep`] primitives, a settle
//!    pause is prepended and the duration is stretched to fit ([`reconcile_duration`]).
//! 3. **Replay**: [`Replay`] drives a [`ReplaySurface`] through the gestures under a hard frame
//!    budget, always releasing or cancelling the pointer.
//! 4. **Capture**: [`capture_scenario`] binds the replay to a [`RenderHost`] and a
//!    [`FrameSink`], emitting exactly `max(1, duration_ms * fps / 1000)` frames.
//! 5. **Encode**: [`encode_gif`] normalizes, palettizes and optimizes the frame directory.
//!
//! The key constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: the same scenario produces the same frame count and pointer path.
//! - **Validation before work**: authoring mistakes surface before any capture starts.
//! - **Budget truncation is not an error**: callers compare requested and captured frames.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod capture;
mod compile;
mod device;
mod encode;
mod foundation;
mod model;
mod replay;
mod scenario;

pub use capture::host::{FrameRGBA, RenderHost, TouchAction};
pub use capture::session::{CaptureSummary, capture_scenario};
pub use capture::sink::{
    CaptureMetadata, DirectorySink, FrameSink, InMemorySink, METADATA_FILE, frame_file_name,
};
pub use compile::expand::{
    SWIPE_FAST, SWIPE_NORMAL, SWIPE_SLOW, SwipeTiming, distance_offset, expand, expand_all,
    swipe_points, swipe_timing, target_point,
};
pub use compile::timing::{
    apply_start_delay, frames_to_ms_ceil, reconcile_duration, required_frames, start_delay_frames,
    step_frames,
};
pub use device::adb::{
    AUTO_SERIAL, AdbDevice, InstrumentRequest, check_instrument_output, choose_device,
    parse_device_list, remote_scenario_dir,
};
pub use device::record::{
    DEFAULT_REGISTRY_CLASS, DEFAULT_TEST_CLASS, RecordedGif, RecorderConfig, record_scenarios,
};
pub use encode::gif::{
    FRAME_PATTERN, GifEncodeOpts, encode_gif, gifsicle_command, is_frame_file_name, list_frames,
    normalize_command, normalize_filter, palettegen_command, paletteuse_command,
    resolve_canvas_height, scaled_height,
};
pub use encode::tools::{
    ToolCommand, ensure_binary_exists, find_executable_on_path, resolve_adb_binary, run_checked,
    sdk_adb_candidates,
};
pub use foundation::core::{
    FrameIndex, Point, Rect, capture_frame_count, clamp_unit, frame_step_ms, frames_remaining,
    resolve_fraction,
};
pub use foundation::error::{ReelError, ReelResult, ValidationError};
pub use model::capture::{CaptureConfig, FractionPoint, GestureStep, ScenarioSpec, Theme};
pub use model::interaction::{
    InteractionKind, InteractionSpec, InteractionTarget, SwipeDirection, SwipeDistance, SwipeSpeed,
};
pub use model::validate::{is_valid_name, require_name, validate_config, validate_spec};
pub use replay::engine::{Replay, ReplayReport, ReplayState, interpolate, replay_gestures};
pub use replay::surface::{RecordingSurface, ReplaySurface, SurfaceEvent};
pub use scenario::manifest::{FALLBACK_NAME, ScenarioDecl, ScenarioManifest};
pub use scenario::registry::{Registry, RegistryBuilder, ScenarioRegistry};
