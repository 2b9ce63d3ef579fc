use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::device::adb::{AUTO_SERIAL, AdbDevice, InstrumentRequest};
use crate::encode::gif::{GifEncodeOpts, encode_gif, recreate_dir};
use crate::encode::tools::{ensure_binary_exists, resolve_adb_binary};
use crate::foundation::error::{ReelError, ReelResult};
use crate::model::capture::ScenarioSpec;
use crate::scenario::registry::{Registry, ScenarioRegistry};

/// Default instrumentation test class that performs the on-device capture.
pub const DEFAULT_TEST_CLASS: &str = "io.github.dautovicharis.composegif.android.GifFrameCaptureTest";

/// Default generated registry class on the device.
pub const DEFAULT_REGISTRY_CLASS: &str =
    "io.github.dautovicharis.composegif.generated.GeneratedGifScenarioRegistry";

/// Settings for recording scenarios on an attached device.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RecorderConfig {
    /// Application id of the app under test (required).
    pub application_id: String,
    /// Where final GIFs are written.
    pub output_dir: PathBuf,
    /// Scratch space for pulled and normalized frames.
    pub work_dir: PathBuf,
    /// Device serial, or `auto` for the single attached device.
    pub adb_serial: String,
    /// `adb` binary.
    pub adb_bin: String,
    /// `ffmpeg` binary.
    pub ffmpeg_bin: String,
    /// `gifsicle` binary.
    pub gifsicle_bin: String,
    /// `all`, a scenario name, or blank for the first registered scenario.
    pub scenario: String,
    /// Registry class the capture test loads.
    pub registry_class: String,
    /// Capture test class.
    pub test_class: String,
    /// Subdirectory of the app's files dir that frames are written to.
    pub remote_subdir: String,
    /// GIF width in pixels.
    pub gif_width: u32,
    /// GIF height in pixels; `0` keeps the frames' aspect ratio.
    pub gif_height: u32,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            application_id: String::new(),
            output_dir: PathBuf::from("artifacts/gifs"),
            work_dir: PathBuf::from("target/gifreel"),
            adb_serial: AUTO_SERIAL.to_owned(),
            adb_bin: "adb".to_owned(),
            ffmpeg_bin: "ffmpeg".to_owned(),
            gifsicle_bin: "gifsicle".to_owned(),
            scenario: "all".to_owned(),
            registry_class: DEFAULT_REGISTRY_CLASS.to_owned(),
            test_class: DEFAULT_TEST_CLASS.to_owned(),
            remote_subdir: "gif-recorder".to_owned(),
            gif_width: 540,
            gif_height: 0,
        }
    }
}

impl RecorderConfig {
    /// Load from a JSON file; missing keys take their defaults.
    pub fn from_path(path: &Path) -> ReelResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read recorder config '{}'", path.display()))?;
        serde_json::from_str(&text)
            .map_err(|e| ReelError::serde(format!("parse recorder config: {e}")))
    }

    /// Check required fields.
    pub fn validate(&self) -> ReelResult<()> {
        if self.application_id.trim().is_empty() {
            return Err(ReelError::validation("application_id", "must be provided."));
        }
        if self.gif_width == 0 {
            return Err(ReelError::validation("gif_width", "must be greater than 0."));
        }
        if self.remote_subdir.trim().is_empty() {
            return Err(ReelError::validation("remote_subdir", "cannot be blank."));
        }
        Ok(())
    }

    /// Scenarios selected by [`RecorderConfig::scenario`], in registry order.
    pub fn select<'r>(&self, registry: &'r Registry) -> ReelResult<Vec<&'r ScenarioSpec>> {
        let wanted = self.scenario.trim();
        if wanted == "all" {
            if registry.is_empty() {
                return Err(ReelError::resource("no scenarios found to record"));
            }
            return Ok(registry.scenarios().iter().collect());
        }
        let requested = (!wanted.is_empty()).then_some(wanted);
        Ok(vec![registry.resolve(requested)?])
    }

    fn encode_opts(&self, spec: &ScenarioSpec) -> GifEncodeOpts {
        GifEncodeOpts {
            ffmpeg_bin: self.ffmpeg_bin.clone(),
            gifsicle_bin: self.gifsicle_bin.clone(),
            fps: u32::try_from(spec.capture.fps).unwrap_or(1),
            width: self.gif_width,
            height: self.gif_height,
        }
    }
}

/// One produced GIF.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedGif {
    /// Scenario name.
    pub scenario: String,
    /// Path of the written GIF.
    pub gif: PathBuf,
}

/// Capture each selected scenario on the device, pull its frames and encode a GIF.
///
/// Every required tool is checked before the first device command runs. The first failing
/// scenario aborts the run.
#[tracing::instrument(skip_all, fields(app = %config.application_id))]
pub fn record_scenarios(config: &RecorderConfig, registry: &Registry) -> ReelResult<Vec<RecordedGif>> {
    config.validate()?;
    let selected = config.select(registry)?;

    let adb = resolve_adb_binary(&config.adb_bin)?;
    ensure_binary_exists(&adb)?;
    ensure_binary_exists(&config.ffmpeg_bin)?;
    ensure_binary_exists(&config.gifsicle_bin)?;

    let device = AdbDevice::connect(&adb, &config.adb_serial)?;
    std::fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("create output dir '{}'", config.output_dir.display()))?;

    let mut out = Vec::with_capacity(selected.len());
    for spec in selected {
        tracing::info!(scenario = %spec.name, device = device.serial(), "recording scenario");
        let request = InstrumentRequest {
            application_id: &config.application_id,
            test_class: &config.test_class,
            registry_class: &config.registry_class,
            scenario: &spec.name,
            output_subdir: &config.remote_subdir,
        };
        device.instrument(&request)?;

        let local = config.work_dir.join("frames").join(&spec.name);
        recreate_dir(&local)?;
        device.pull(&request.remote_dir(), &local)?;

        let gif = encode_gif(
            &local,
            &config.work_dir,
            &config.output_dir,
            &spec.name,
            &config.encode_opts(spec),
        )?;
        out.push(RecordedGif {
            scenario: spec.name.clone(),
            gif,
        });
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/device/record.rs"]
mod tests;
