/// Visual theme recorded alongside a scenario.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Theme {
    /// Light theme.
    Light,
    /// Dark theme.
    #[default]
    Dark,
}

impl Theme {
    /// Stable upper-case name used in metadata files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "LIGHT",
            Self::Dark => "DARK",
        }
    }
}

/// A normalized point in the interaction target's coordinate space.
///
/// Both coordinates are fractions of the target's bounding box, resolved to pixels only at
/// replay time.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FractionPoint {
    /// Horizontal fraction in `[0.0, 1.0]`.
    pub x: f64,
    /// Vertical fraction in `[0.0, 1.0]`.
    pub y: f64,
}

impl FractionPoint {
    /// Create a point from raw fractions (not validated).
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A low-level, frame-counted gesture primitive.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GestureStep {
    /// Capture `frames` frames without input.
    Pause {
        /// Frames to capture.
        #[serde(default)]
        frames: i32,
    },
    /// Click at a fractional point, then capture `frames_after` frames.
    Tap {
        /// Horizontal fraction of the tap point.
        #[serde(default = "half")]
        x_fraction: f64,
        /// Vertical fraction of the tap point.
        #[serde(default = "half")]
        y_fraction: f64,
        /// Frames captured after the click settles.
        #[serde(default)]
        frames_after: i32,
    },
    /// Press, drag through `points`, release.
    DragPath {
        /// Waypoints; the pointer goes down on the first one.
        #[serde(default)]
        points: Vec<FractionPoint>,
        /// Frames captured after pointer down.
        #[serde(default)]
        hold_start_frames: i32,
        /// Interpolated frames between consecutive waypoints.
        #[serde(default)]
        frames_per_waypoint: i32,
        /// Frames captured after pointer up.
        #[serde(default)]
        release_frames: i32,
    },
}

fn half() -> f64 {
    0.5
}

impl GestureStep {
    /// Shorthand for a [`GestureStep::Pause`].
    pub fn pause(frames: i32) -> Self {
        Self::Pause { frames }
    }

    /// Shorthand for a [`GestureStep::Tap`].
    pub fn tap(x_fraction: f64, y_fraction: f64, frames_after: i32) -> Self {
        Self::Tap {
            x_fraction,
            y_fraction,
            frames_after,
        }
    }

    /// Upper-case kind name, as used in manifests and messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Pause { .. } => "PAUSE",
            Self::Tap { .. } => "TAP",
            Self::DragPath { .. } => "DRAG_PATH",
        }
    }
}

/// Capture configuration for a single scenario.
///
/// Numeric fields are signed so that out-of-range authored values reach the validator, which
/// names the exact field, rather than failing in the parser.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Target recording duration in milliseconds.
    pub duration_ms: i32,
    /// Capture frame rate.
    pub fps: i32,
    /// Output width in pixels before encoding.
    pub width_px: i32,
    /// Output height in pixels; `0` derives it from the frames' aspect ratio.
    pub height_px: i32,
    /// Theme metadata.
    pub theme: Theme,
    /// Tag of the node gestures are addressed to.
    pub interaction_node_tag: String,
    /// Gestures replayed during capture, in order.
    pub gestures: Vec<GestureStep>,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            duration_ms: 3000,
            fps: 50,
            width_px: 540,
            height_px: 0,
            theme: Theme::Dark,
            interaction_node_tag: String::new(),
            gestures: Vec::new(),
        }
    }
}

/// A named scenario and its capture configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScenarioSpec {
    /// Identifier matching `[A-Za-z0-9_-]+`.
    pub name: String,
    /// Capture configuration.
    pub capture: CaptureConfig,
}

impl ScenarioSpec {
    /// Pair a name with a capture configuration (not validated).
    pub fn new(name: impl Into<String>, capture: CaptureConfig) -> Self {
        Self {
            name: name.into(),
            capture,
        }
    }
}
