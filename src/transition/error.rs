//! Errors raised by transition functions.

use thiserror::Error;

/// Errors a transition function can return.
///
/// A failing transition never reaches the state slot: the current value is
/// left as it was and no notification fires.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransitionError {
    #[error("Missing argument at position {index}")]
    MissingArgument { index: usize },

    #[error("Argument at position {index} should be {expected}, got {found}")]
    InvalidArgument {
        index: usize,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Transition expects {expected} as its target, got {found}")]
    InvalidTarget {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Transition was invoked without a context")]
    MissingContext,

    #[error("{0}")]
    Failed(String),
}
