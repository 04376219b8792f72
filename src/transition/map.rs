//! Transition maps: named leaf transitions and nested sub-maps.

use super::error::TransitionError;
use crate::core::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A pure transition function.
///
/// Receives the context path (root first, the value the transition is
/// declared on last) and the caller-supplied arguments, and returns the new
/// root value.
pub type TransitionFn =
    Arc<dyn Fn(&[Value], &[Value]) -> Result<Value, TransitionError> + Send + Sync>;

/// One entry of a transition map.
#[derive(Clone)]
pub enum TransitionEntry {
    /// An action: calling it computes the next value.
    Leaf(TransitionFn),
    /// The name refers to a sub-value whose own transitions are in the map.
    Nested(Arc<TransitionMap>),
}

impl fmt::Debug for TransitionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionEntry::Leaf(_) => f.write_str("Leaf(..)"),
            TransitionEntry::Nested(map) => f.debug_tuple("Nested").field(map).finish(),
        }
    }
}

/// Mapping from transition name to entry.
///
/// # Example
///
/// ```rust
/// use microstate::{TransitionMap, Value};
///
/// let mut map = TransitionMap::new();
/// map.insert_leaf("reset", |_ctx: &[Value], _args: &[Value]| Ok(Value::from(0)));
///
/// assert!(map.contains("reset"));
/// assert_eq!(map.names().collect::<Vec<_>>(), vec!["reset"]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct TransitionMap {
    entries: BTreeMap<String, TransitionEntry>,
}

impl TransitionMap {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Declare a leaf transition, replacing any entry of the same name.
    pub fn insert_leaf<F>(&mut self, name: impl Into<String>, transition: F) -> &mut Self
    where
        F: Fn(&[Value], &[Value]) -> Result<Value, TransitionError> + Send + Sync + 'static,
    {
        self.entries
            .insert(name.into(), TransitionEntry::Leaf(Arc::new(transition)));
        self
    }

    /// Declare a sub-value with its own transitions.
    pub fn insert_nested(&mut self, name: impl Into<String>, map: TransitionMap) -> &mut Self {
        self.entries
            .insert(name.into(), TransitionEntry::Nested(Arc::new(map)));
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, entry: TransitionEntry) -> &mut Self {
        self.entries.insert(name.into(), entry);
        self
    }

    pub fn get(&self, name: &str) -> Option<&TransitionEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TransitionEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Right-biased shallow merge.
    ///
    /// Entries of `overrides` replace same-named entries of `self`. Neither
    /// input is modified; the result is always a fresh map.
    pub fn merge(&self, overrides: &TransitionMap) -> TransitionMap {
        let mut entries = self.entries.clone();
        for (name, entry) in &overrides.entries {
            entries.insert(name.clone(), entry.clone());
        }
        TransitionMap { entries }
    }
}
