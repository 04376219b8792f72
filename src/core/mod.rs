//! Core value types.
//!
//! This module contains the pure, immutable data the engine works on:
//! - Domain values and their identity convention
//! - Context paths threaded through decoration and invocation
//! - The log of committed transitions
//!
//! Nothing in this module has side effects.

mod context;
mod history;
mod value;

pub use context::ContextPath;
pub use history::{TransitionLog, TransitionRecord, DEFAULT_LOG_LIMIT};
pub use value::{Record, Value};
