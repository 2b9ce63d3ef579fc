use std::collections::HashMap;

use crate::capture::host::RenderHost;
use crate::foundation::error::{ReelError, ReelResult};
use crate::model::capture::ScenarioSpec;
use crate::model::validate::validate_spec;

/// Source of capturable scenarios.
///
/// Consumers depend only on this contract, never on how a registry is populated.
pub trait ScenarioRegistry {
    /// Every registered scenario, in registration order.
    fn scenarios(&self) -> &[ScenarioSpec];

    /// Make the content of scenario `name` the host's current render target.
    fn render(&self, name: &str, host: &mut dyn RenderHost) -> ReelResult<()>;

    /// Look up a scenario by exact name.
    fn find(&self, name: &str) -> ReelResult<&ScenarioSpec> {
        self.scenarios()
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| unknown(name, self.scenarios()))
    }

    /// Scenario names, sorted.
    fn sorted_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.scenarios().iter().map(|s| s.name.clone()).collect();
        names.sort();
        names
    }
}

fn unknown(name: &str, scenarios: &[ScenarioSpec]) -> ReelError {
    let mut available: Vec<String> = scenarios.iter().map(|s| s.name.clone()).collect();
    available.sort();
    ReelError::UnknownScenario {
        name: name.to_owned(),
        available,
    }
}

/// Immutable, insertion-ordered scenario registry.
///
/// Each scenario is paired with a content id, the opaque key a [`RenderHost`] uses to pick what
/// to draw.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    specs: Vec<ScenarioSpec>,
    content: Vec<String>,
    index: HashMap<String, usize>,
}

impl Registry {
    /// Start building a registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Number of scenarios.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// `true` when no scenarios are registered.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Look up a scenario by name.
    pub fn get(&self, name: &str) -> ReelResult<&ScenarioSpec> {
        self.index
            .get(name)
            .map(|&i| &self.specs[i])
            .ok_or_else(|| unknown(name, &self.specs))
    }

    /// Content id of scenario `name`.
    pub fn content_id(&self, name: &str) -> ReelResult<&str> {
        self.index
            .get(name)
            .map(|&i| self.content[i].as_str())
            .ok_or_else(|| unknown(name, &self.specs))
    }

    /// Pick a scenario: the requested one, or the first registered when `requested` is `None`.
    pub fn resolve(&self, requested: Option<&str>) -> ReelResult<&ScenarioSpec> {
        match requested {
            Some(name) => self.get(name),
            None => self.specs.first().ok_or_else(|| {
                ReelError::resource("no scenarios registered; declare at least one scenario")
            }),
        }
    }

    /// Iterate `(spec, content_id)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&ScenarioSpec, &str)> {
        self.specs
            .iter()
            .zip(self.content.iter().map(String::as_str))
    }
}

impl ScenarioRegistry for Registry {
    fn scenarios(&self) -> &[ScenarioSpec] {
        &self.specs
    }

    fn render(&self, name: &str, host: &mut dyn RenderHost) -> ReelResult<()> {
        let content = self.content_id(name)?;
        tracing::debug!(scenario = name, content, "render scenario");
        host.set_content(content)
    }

    fn find(&self, name: &str) -> ReelResult<&ScenarioSpec> {
        self.get(name)
    }
}

/// Collects scenarios; [`RegistryBuilder::build`] validates them all and freezes the result.
#[derive(Clone, Debug, Default)]
pub struct RegistryBuilder {
    entries: Vec<(ScenarioSpec, String)>,
}

impl RegistryBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `spec`, rendered from `content`.
    pub fn scenario(mut self, spec: ScenarioSpec, content: impl Into<String>) -> Self {
        self.entries.push((spec, content.into()));
        self
    }

    /// Validate every scenario in order and reject duplicate names.
    ///
    /// The first failure aborts the build; nothing is partially registered.
    pub fn build(self) -> ReelResult<Registry> {
        let mut registry = Registry {
            specs: Vec::with_capacity(self.entries.len()),
            content: Vec::with_capacity(self.entries.len()),
            index: HashMap::with_capacity(self.entries.len()),
        };
        for (spec, content) in self.entries {
            validate_spec(&spec)?;
            if registry.index.contains_key(&spec.name) {
                return Err(ReelError::DuplicateScenario(spec.name));
            }
            registry
                .index
                .insert(spec.name.clone(), registry.specs.len());
            registry.specs.push(spec);
            registry.content.push(content);
        }
        Ok(registry)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scenario/registry.rs"]
mod tests;
