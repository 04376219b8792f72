//! Builder for constructing configurations.

use crate::config::error::{BuildError, InputError};
use crate::config::{resolve, rules, Config, Hooks};
use crate::core::Value;
use crate::decorate::View;
use crate::transition::{TransitionError, TransitionMap};
use std::sync::Arc;
use stillwater::validation::Validation;
use tracing::debug;

/// Builder for configurations with a fluent API.
///
/// Hooks left unset are inherited from the parent configuration, and the
/// transition map is resolved across the whole ancestry when `build` runs.
///
/// # Example
///
/// ```
/// use microstate::kinds;
/// use microstate::transition::args::number_target;
/// use microstate::{Config, Value};
///
/// let counter = Config::builder("Counter")
///     .extends(&kinds::number())
///     .transition("reset", |_ctx: &[Value], _args: &[Value]| Ok(Value::from(0)))
///     .transition("double", |ctx: &[Value], _args: &[Value]| {
///         Ok(Value::from(number_target(ctx)? * 2.0))
///     })
///     .build()
///     .unwrap();
///
/// assert!(counter.transitions().contains("increment"));
/// assert!(counter.transitions().contains("double"));
/// ```
pub struct ConfigBuilder {
    name: String,
    parent: Option<Arc<Config>>,
    transitions: TransitionMap,
    hooks: Hooks,
}

impl ConfigBuilder {
    /// Create a new builder for a configuration called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            transitions: TransitionMap::new(),
            hooks: Hooks::default(),
        }
    }

    /// Inherit hooks and transitions from `parent`.
    pub fn extends(mut self, parent: &Arc<Config>) -> Self {
        self.parent = Some(Arc::clone(parent));
        self
    }

    /// Raw value used when no input is supplied.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.hooks.default = Some(value.into());
        self
    }

    /// Coerce or validate caller input into the domain value.
    pub fn initial_value<F>(mut self, hook: F) -> Self
    where
        F: Fn(Value) -> Result<Value, InputError> + Send + Sync + 'static,
    {
        self.hooks.initial_value = Some(Arc::new(hook));
        self
    }

    /// Normalize the initial value once it has been derived.
    pub fn normalize<F>(mut self, hook: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.hooks.normalize = Some(Arc::new(hook));
        self
    }

    /// Produce the value whose shape the decorated view exposes.
    pub fn prototype<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        self.hooks.prototype = Some(Arc::new(hook));
        self
    }

    /// Adapt the decorated view for the rendering boundary.
    pub fn represent<F>(mut self, hook: F) -> Self
    where
        F: Fn(View, &Value) -> View + Send + Sync + 'static,
    {
        self.hooks.represent = Some(Arc::new(hook));
        self
    }

    /// Declare a leaf transition.
    pub fn transition<F>(mut self, name: impl Into<String>, transition: F) -> Self
    where
        F: Fn(&[Value], &[Value]) -> Result<Value, TransitionError> + Send + Sync + 'static,
    {
        self.transitions.insert_leaf(name, transition);
        self
    }

    /// Declare transitions for a sub-value.
    pub fn nested(mut self, name: impl Into<String>, map: TransitionMap) -> Self {
        self.transitions.insert_nested(name, map);
        self
    }

    /// Merge a whole map of transitions into this definition.
    pub fn transitions(mut self, map: TransitionMap) -> Self {
        self.transitions = self.transitions.merge(&map);
        self
    }

    /// Build the configuration.
    /// Returns an error listing every definition violation.
    pub fn build(self) -> Result<Arc<Config>, BuildError> {
        if let Validation::Failure(errors) = rules::validate(&self.name, &self.transitions) {
            return Err(BuildError::InvalidDefinition {
                config: self.name,
                violations: errors.iter().cloned().collect(),
            });
        }

        let ancestry = self
            .parent
            .as_deref()
            .map(resolve::lineage)
            .unwrap_or_default();
        let resolved = resolve::resolve(
            ancestry
                .iter()
                .map(|config| config.own_transitions())
                .chain(std::iter::once(&self.transitions)),
        );

        let hooks = match &self.parent {
            Some(parent) => self.hooks.inherit(&parent.hooks),
            None => self.hooks,
        };

        debug!(
            config = %self.name,
            depth = ancestry.len(),
            transitions = resolved.len(),
            "configuration resolved"
        );

        Ok(Arc::new(Config {
            name: self.name,
            parent: self.parent,
            own: self.transitions,
            transitions: Arc::new(resolved),
            hooks,
        }))
    }
}
