//! Configurations: reusable definitions of one semantic value-kind.
//!
//! A configuration bundles the hooks that turn caller input into a domain
//! value and back into something renderable, plus the transitions the
//! value supports. Configurations form a static inheritance chain; the
//! chain is linearized and its transition maps merged once, when the
//! configuration is built.
//!
//! # Example
//!
//! ```rust
//! use microstate::kinds;
//! use microstate::Value;
//!
//! let number = kinds::number();
//!
//! assert_eq!(number.name(), "Number");
//! assert!(number.is_a("State"));
//! assert_eq!(number.derive_initial(&[Value::from("12")]).unwrap(), Value::from(12));
//! ```

pub mod builder;
pub mod error;
pub mod resolve;
pub mod rules;

pub use builder::ConfigBuilder;
pub use error::{BuildError, DefinitionViolation, InputError};

use crate::core::Value;
use crate::decorate::View;
use crate::transition::TransitionMap;
use std::fmt;
use std::sync::Arc;

pub type InitialValueHook = Arc<dyn Fn(Value) -> Result<Value, InputError> + Send + Sync>;
pub type NormalizeHook = Arc<dyn Fn(Value) -> Value + Send + Sync>;
pub type PrototypeHook = Arc<dyn Fn(&Value) -> Value + Send + Sync>;
pub type RepresentHook = Arc<dyn Fn(View, &Value) -> View + Send + Sync>;

/// Hooks declared on a configuration. Unset hooks fall back to the parent.
#[derive(Clone, Default)]
pub(crate) struct Hooks {
    default: Option<Value>,
    initial_value: Option<InitialValueHook>,
    normalize: Option<NormalizeHook>,
    prototype: Option<PrototypeHook>,
    represent: Option<RepresentHook>,
}

impl Hooks {
    fn inherit(self, parent: &Hooks) -> Hooks {
        Hooks {
            default: self.default.or_else(|| parent.default.clone()),
            initial_value: self.initial_value.or_else(|| parent.initial_value.clone()),
            normalize: self.normalize.or_else(|| parent.normalize.clone()),
            prototype: self.prototype.or_else(|| parent.prototype.clone()),
            represent: self.represent.or_else(|| parent.represent.clone()),
        }
    }
}

/// A resolved configuration.
///
/// Built with [`ConfigBuilder`]; always handled through `Arc` so that
/// children and state slots can share it.
pub struct Config {
    name: String,
    parent: Option<Arc<Config>>,
    own: TransitionMap,
    transitions: Arc<TransitionMap>,
    hooks: Hooks,
}

impl Config {
    pub fn builder(name: impl Into<String>) -> ConfigBuilder {
        ConfigBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&Config> {
        self.parent.as_deref()
    }

    /// Transitions declared directly on this configuration.
    pub fn own_transitions(&self) -> &TransitionMap {
        &self.own
    }

    /// Transitions merged across the whole ancestry.
    pub fn transitions(&self) -> &Arc<TransitionMap> {
        &self.transitions
    }

    /// Ancestry from the most distant ancestor down to `self`.
    pub fn lineage(&self) -> Vec<&Config> {
        resolve::lineage(self)
    }

    /// True when `name` is this configuration or one of its ancestors.
    pub fn is_a(&self, name: &str) -> bool {
        self.lineage().iter().any(|config| config.name == name)
    }

    pub fn default_value(&self) -> Value {
        self.hooks.default.clone().unwrap_or_default()
    }

    /// Coerce caller input into the domain value.
    ///
    /// Only the first input is considered; when none is given the
    /// configured default is used instead.
    pub fn initial_value_for(&self, inputs: &[Value]) -> Result<Value, InputError> {
        let input = inputs
            .first()
            .cloned()
            .unwrap_or_else(|| self.default_value());
        match &self.hooks.initial_value {
            Some(hook) => hook(input),
            None => Ok(input),
        }
    }

    pub fn normalize(&self, value: Value) -> Value {
        match &self.hooks.normalize {
            Some(hook) => hook(value),
            None => value,
        }
    }

    /// Initial value followed by normalization.
    pub fn derive_initial(&self, inputs: &[Value]) -> Result<Value, InputError> {
        self.initial_value_for(inputs).map(|value| self.normalize(value))
    }

    pub fn prototype_for(&self, value: &Value) -> Value {
        match &self.hooks.prototype {
            Some(hook) => hook(value),
            None => value.clone(),
        }
    }

    pub fn represent(&self, view: View, raw: &Value) -> View {
        match &self.hooks.represent {
            Some(hook) => hook(view, raw),
            None => view,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("name", &self.name)
            .field("parent", &self.parent().map(Config::name))
            .field("transitions", &self.transitions.names().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_hooks_pass_values_through() {
        let config = Config::builder("Plain").build().unwrap();

        assert_eq!(config.initial_value_for(&[]), Ok(Value::Null));
        assert_eq!(
            config.derive_initial(&[Value::from("x"), Value::from("ignored")]),
            Ok(Value::from("x"))
        );
        assert_eq!(config.prototype_for(&Value::from(1)), Value::from(1));
    }

    #[test]
    fn default_value_fills_missing_input() {
        let config = Config::builder("Defaulted")
            .default_value(Value::object([("initial", Value::from("state"))]))
            .build()
            .unwrap();

        let value = config.derive_initial(&[]).unwrap();
        assert_eq!(value.get("initial"), Some(&Value::from("state")));
    }

    #[test]
    fn normalization_runs_after_initial_value() {
        let config = Config::builder("Upper")
            .initial_value(|value| match value {
                Value::String(_) => Ok(value),
                other => Err(InputError::Rejected {
                    expected: "a string",
                    found: other.to_string(),
                }),
            })
            .normalize(|value| Value::from(value.to_string().to_uppercase()))
            .build()
            .unwrap();

        assert_eq!(config.derive_initial(&[Value::from("abc")]), Ok(Value::from("ABC")));
        assert!(config.derive_initial(&[Value::from(1)]).is_err());
    }

    #[test]
    fn is_a_walks_ancestry() {
        let parent = Config::builder("Parent").build().unwrap();
        let child = Config::builder("Child").extends(&parent).build().unwrap();

        assert!(child.is_a("Parent"));
        assert!(child.is_a("Child"));
        assert!(!parent.is_a("Child"));
        assert_eq!(child.parent().map(Config::name), Some("Parent"));
    }
}
