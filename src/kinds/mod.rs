//! Built-in configurations for the common value kinds.
//!
//! Every built-in extends [`base`], so all of them answer `set`. The
//! configurations are built once and shared.
//!
//! Built-in transitions compute from the innermost context value and
//! return its replacement, so they are declared at the root of their
//! configuration where that value is the root.
//!
//! # Example
//!
//! ```rust
//! use microstate::{kinds, Value};
//!
//! let config = kinds::for_value(&Value::from(true));
//! assert_eq!(config.name(), "Boolean");
//! assert!(config.transitions().contains("toggle"));
//! assert!(config.transitions().contains("set"));
//! ```

mod array;
mod boolean;
mod choice;
mod number;
mod object;
mod string;

pub use array::array;
pub use boolean::boolean;
pub use choice::{multiple_choice, single_choice};
pub use number::number;
pub use object::object;
pub use string::string;

use crate::config::Config;
use crate::core::Value;
use std::sync::{Arc, OnceLock};

/// The root configuration, "State": values pass through untouched and the
/// only transition is `set(value)`, which replaces the whole value.
pub fn base() -> Arc<Config> {
    static BASE: OnceLock<Arc<Config>> = OnceLock::new();
    Arc::clone(BASE.get_or_init(|| {
        Config::builder("State")
            .transition("set", |_ctx, args| {
                Ok(args.first().cloned().unwrap_or_default())
            })
            .build()
            .expect("State config should always build")
    }))
}

/// Configuration matching the kind of a raw value.
pub fn for_value(value: &Value) -> Arc<Config> {
    match value {
        Value::Null => base(),
        Value::Bool(_) => boolean(),
        Value::Number(_) => number(),
        Value::String(_) => string(),
        Value::Object(_) => object(),
        Value::Array(_) => array(),
    }
}
