use std::io::Read;
use std::path::Path;

use anyhow::Context as _;

use crate::compile::expand::expand_all;
use crate::compile::timing::{apply_start_delay, reconcile_duration};
use crate::foundation::error::{ReelError, ReelResult};
use crate::model::capture::{CaptureConfig, GestureStep, ScenarioSpec, Theme};
use crate::model::interaction::InteractionSpec;
use crate::model::validate::{require_name, validate_spec};
use crate::scenario::registry::Registry;

/// Name used when a declaration has neither an explicit name nor a content id.
pub const FALLBACK_NAME: &str = "scenario";

/// One declared scenario, as authored.
///
/// Interactions are high-level intents; `gestures` are appended verbatim after their expansion.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScenarioDecl {
    /// Explicit scenario name; blank derives it from `content`.
    pub name: String,
    /// Content id handed to the render host.
    pub content: String,
    /// Nominal duration; extended when gestures need more time.
    pub duration_ms: i32,
    /// Capture frame rate.
    pub fps: i32,
    /// Output width.
    pub width_px: i32,
    /// Output height (`0` = auto).
    pub height_px: i32,
    /// Theme tag.
    pub theme: Theme,
    /// Settle time before scripted input starts.
    pub interaction_start_delay_ms: i32,
    /// Tag of the gesture target node.
    pub interaction_node_tag: String,
    /// High-level interactions, expanded first.
    pub interactions: Vec<InteractionSpec>,
    /// Explicit gesture primitives, appended after expanded interactions.
    pub gestures: Vec<GestureStep>,
}

impl Default for ScenarioDecl {
    fn default() -> Self {
        let capture = CaptureConfig::default();
        Self {
            name: String::new(),
            content: String::new(),
            duration_ms: capture.duration_ms,
            fps: capture.fps,
            width_px: capture.width_px,
            height_px: capture.height_px,
            theme: capture.theme,
            interaction_start_delay_ms: 1000,
            interaction_node_tag: String::new(),
            interactions: Vec::new(),
            gestures: Vec::new(),
        }
    }
}

impl ScenarioDecl {
    /// Effective scenario name: explicit name, else content id, else [`FALLBACK_NAME`].
    pub fn resolved_name(&self) -> &str {
        if !self.name.trim().is_empty() {
            &self.name
        } else if !self.content.trim().is_empty() {
            &self.content
        } else {
            FALLBACK_NAME
        }
    }

    /// Effective content id: `content`, or the resolved name when blank.
    pub fn content_id(&self) -> &str {
        if self.content.trim().is_empty() {
            self.resolved_name()
        } else {
            &self.content
        }
    }

    /// Compile into a validated [`ScenarioSpec`].
    ///
    /// Expands interactions, appends explicit gestures, prepends the start delay and stretches
    /// the duration so every gesture fits.
    pub fn compile(&self) -> ReelResult<ScenarioSpec> {
        let name = self.resolved_name();
        require_name(name)?;

        let mut gestures = expand_all(&self.interactions);
        gestures.extend(self.gestures.iter().cloned());
        let gestures = apply_start_delay(gestures, self.interaction_start_delay_ms, self.fps);
        let duration_ms = reconcile_duration(self.duration_ms, self.fps, &gestures);

        let spec = ScenarioSpec::new(
            name,
            CaptureConfig {
                duration_ms,
                fps: self.fps,
                width_px: self.width_px,
                height_px: self.height_px,
                theme: self.theme,
                interaction_node_tag: self.interaction_node_tag.clone(),
                gestures,
            },
        );
        validate_spec(&spec)?;
        Ok(spec)
    }
}

/// A JSON document declaring scenarios in order.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScenarioManifest {
    /// Declarations in registration order.
    pub scenarios: Vec<ScenarioDecl>,
}

impl ScenarioManifest {
    /// Parse a manifest from JSON.
    pub fn from_reader(reader: impl Read) -> ReelResult<Self> {
        serde_json::from_reader(reader).map_err(|e| ReelError::serde(format!("parse manifest: {e}")))
    }

    /// Parse a manifest from a JSON string.
    pub fn from_json_str(json: &str) -> ReelResult<Self> {
        serde_json::from_str(json).map_err(|e| ReelError::serde(format!("parse manifest: {e}")))
    }

    /// Read and parse a manifest file.
    pub fn from_path(path: &Path) -> ReelResult<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("open manifest '{}'", path.display()))?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Compile every declaration, in order.
    pub fn compile(&self) -> ReelResult<Vec<ScenarioSpec>> {
        self.scenarios.iter().map(ScenarioDecl::compile).collect()
    }

    /// Compile every declaration and freeze them into a [`Registry`].
    pub fn into_registry(self) -> ReelResult<Registry> {
        let mut builder = Registry::builder();
        for decl in &self.scenarios {
            let spec = decl.compile()?;
            builder = builder.scenario(spec, decl.content_id());
        }
        builder.build()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scenario/manifest.rs"]
mod tests;
