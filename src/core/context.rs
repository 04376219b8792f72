//! Context paths: the ancestor values a transition is invoked against.

use super::value::Value;
use std::sync::Arc;

/// Ordered list of values from the root value down to the value a
/// transition is declared on, root first.
///
/// Paths are append-only. [`ContextPath::extend`] returns a new path and
/// leaves the receiver untouched, so sibling views never observe each
/// other's context.
///
/// # Example
///
/// ```rust
/// use microstate::{ContextPath, Value};
///
/// let root = ContextPath::root(Value::from(1));
/// let child = root.extend(Value::from(2));
///
/// assert_eq!(root.depth(), 0);
/// assert_eq!(child.depth(), 1);
/// assert_eq!(child.values(), &[Value::from(1), Value::from(2)]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ContextPath {
    values: Arc<[Value]>,
}

impl ContextPath {
    /// Path containing only the root value.
    pub fn root(value: Value) -> Self {
        Self {
            values: Arc::from(vec![value]),
        }
    }

    /// New path with `value` appended as the innermost element.
    pub fn extend(&self, value: Value) -> Self {
        let mut values = self.values.to_vec();
        values.push(value);
        Self {
            values: values.into(),
        }
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn root_value(&self) -> &Value {
        &self.values[0]
    }

    /// The innermost value, i.e. the one the transition is declared on.
    pub fn target(&self) -> &Value {
        &self.values[self.values.len() - 1]
    }

    /// Number of nesting levels below the root.
    pub fn depth(&self) -> usize {
        self.values.len() - 1
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false: a path holds at least its root.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
