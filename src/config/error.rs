//! Errors for configuration definitions and inputs.

use thiserror::Error;

/// Errors that can occur when building a configuration.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Configuration '{config}' has {} invalid definition(s)", .violations.len())]
    InvalidDefinition {
        config: String,
        violations: Vec<DefinitionViolation>,
    },
}

/// A single problem found in a configuration definition.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DefinitionViolation {
    #[error("Configuration name is empty")]
    EmptyConfigName,

    #[error("Transition name under '{parent}' is empty")]
    EmptyTransitionName { parent: String },

    #[error("Transition '{path}' uses the reserved notification name '{name}'")]
    ReservedName { path: String, name: String },

    #[error("Nested transitions at '{path}' declare no transitions")]
    EmptyNestedMap { path: String },
}

/// Raised by an initial-value hook for input it cannot accept.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InputError {
    #[error("expected {expected}, but received {found}")]
    Rejected {
        expected: &'static str,
        found: String,
    },
}
