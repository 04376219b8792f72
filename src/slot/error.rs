//! State slot errors.

use crate::config::InputError;
use crate::transition::TransitionError;
use thiserror::Error;

/// Errors surfaced by state slots and the views they produce.
///
/// None of these leave partial state behind: when one is returned the
/// slot's current value is whatever it was before the call.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StateError {
    #[error("{config} state rejected its input: {source}")]
    InvalidInput {
        config: String,
        #[source]
        source: InputError,
    },

    #[error("Transition '{name}' failed: {source}")]
    Transition {
        name: String,
        #[source]
        source: TransitionError,
    },

    #[error("'{name}' is reserved for the slot's own notifications")]
    ReservedEvent { name: String },

    #[error("No action named '{name}'")]
    UnknownTransition { name: String },

    #[error("State slot has not computed its initial value")]
    Uninitialized,

    #[error("State slot has been released")]
    Released,
}
