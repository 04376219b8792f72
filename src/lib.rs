//! Microstate: declarative, immutable state transitions
//!
//! A value never changes in place. Each kind of value declares the pure
//! transitions it supports; the engine projects the value into a view
//! whose actions compute a new value and hand it to the owning state slot.
//! The slot commits the new value only when it differs by identity and
//! then notifies whoever is interested.
//!
//! # Core Concepts
//!
//! - **Value**: Immutable domain data with cheap, identity-comparable sharing
//! - **Config**: A value kind: input coercion, presentation and transitions,
//!   with single inheritance
//! - **View**: A value decorated with actions bound to their context path
//! - **StateSlot**: The owner of one live value and its notifications
//!
//! # Example
//!
//! ```rust
//! use microstate::{transitions, Config, Options, StateSlot, Value};
//! use microstate::transition::args;
//!
//! let counter = Config::builder("Counter")
//!     .extends(&microstate::kinds::base())
//!     .default_value(0)
//!     .transitions(transitions! {
//!         bump(ctx, params) => {
//!             let step = params.first().and_then(Value::as_f64).unwrap_or(1.0);
//!             Ok(Value::from(args::number_target(ctx)? + step))
//!         },
//!     })
//!     .build()
//!     .unwrap();
//!
//! let slot = StateSlot::new(counter);
//! let view = slot.compute(&[], Options::new()).unwrap();
//!
//! assert_eq!(view.call("bump", &[Value::from(5)]).unwrap(), Value::from(5));
//! assert_eq!(slot.value(), Some(Value::from(5)));
//! ```

pub mod config;
pub mod core;
pub mod decorate;
pub mod kinds;
pub mod slot;
pub mod transition;

// Re-export commonly used types
pub use config::{BuildError, Config, ConfigBuilder, DefinitionViolation, InputError};
pub use core::{ContextPath, Record, TransitionLog, TransitionRecord, Value, DEFAULT_LOG_LIMIT};
pub use decorate::{Action, Node, View};
pub use slot::{ListenerId, Options, SlotId, StateError, StateSlot};
pub use transition::{TransitionEntry, TransitionError, TransitionFn, TransitionMap};
