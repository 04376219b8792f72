//! Transition maps and the functions they hold.
//!
//! A transition is a pure function from a context path plus arguments to a
//! new root value. Maps name transitions, and may nest sub-maps for
//! structured values.

pub mod args;
mod error;
mod macros;
mod map;

pub use error::TransitionError;
pub use map::{TransitionEntry, TransitionFn, TransitionMap};
