/// Convenience result type used across gifreel.
pub type ReelResult<T> = Result<T, ReelError>;

/// Top-level error taxonomy.
///
/// Validation and naming errors are authoring mistakes and surface before any capture starts.
/// Pipeline and resource errors carry the full diagnostic output of the failing step.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// A scenario spec or gesture violates an invariant.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Requested scenario name is not registered.
    #[error("unknown scenario '{name}'. Available: [{}]", .available.join(", "))]
    UnknownScenario {
        /// Name that was requested.
        name: String,
        /// Sorted list of registered names.
        available: Vec<String>,
    },

    /// Two specs share a name within one registry.
    #[error("duplicate scenario name '{0}'")]
    DuplicateScenario(String),

    /// An external subprocess exited non-zero or could not be started.
    #[error("command failed ({command}):\n{output}")]
    PipelineExecution {
        /// Space-joined command line.
        command: String,
        /// Combined stdout/stderr of the failing process.
        output: String,
    },

    /// A required external binary or generated artifact is missing.
    #[error("resource not found: {0}")]
    ResourceNotFound(String),

    /// Manifest or config (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::Validation`] for a top-level field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation(ValidationError::field(field, message))
    }

    /// Build a [`ReelError::PipelineExecution`] value.
    pub fn pipeline(command: impl Into<String>, output: impl Into<String>) -> Self {
        Self::PipelineExecution {
            command: command.into(),
            output: output.into(),
        }
    }

    /// Build a [`ReelError::ResourceNotFound`] value.
    pub fn resource(msg: impl Into<String>) -> Self {
        Self::ResourceNotFound(msg.into())
    }

    /// Build a [`ReelError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Borrow the structured validation error, if this is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(v) => Some(v),
            _ => None,
        }
    }
}

/// One specific invariant violation.
///
/// `field` is a dotted path (`fps`, `gestures[2].points[1].x`) and `gesture` carries the
/// offending gesture's position in the list when the violation is inside one.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{field} {message}")]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    /// Index of the offending gesture, when applicable.
    pub gesture: Option<usize>,
    /// What is wrong with the field.
    pub message: String,
}

impl ValidationError {
    /// Violation of a scenario- or config-level field.
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            gesture: None,
            message: message.into(),
        }
    }

    /// Violation inside the gesture at `index`; `field` is relative to that gesture.
    pub fn gesture(index: usize, field: &str, message: impl Into<String>) -> Self {
        let path = if field.is_empty() {
            format!("gestures[{index}]")
        } else {
            format!("gestures[{index}].{field}")
        };
        Self {
            field: path,
            gesture: Some(index),
            message: message.into(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
