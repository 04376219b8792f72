//! Decorated views.
//!
//! A view projects a value together with its transitions: every leaf
//! transition becomes an [`Action`] bound to the view's context path, and
//! every nested sub-map becomes a nested view (or one view per element when
//! the sub-value is a sequence). Nodes are built on first access and
//! cached for the life of the view.
//!
//! Decoration assumes nested values form a tree. Cyclic structures cannot
//! be expressed with [`Value`], so no cycle detection is done.
//!
//! # Example
//!
//! ```rust
//! use microstate::decorate::{decorate, detached};
//! use microstate::{transitions, ContextPath, Value};
//! use std::sync::Arc;
//!
//! let map = Arc::new(transitions! {
//!     pets: {
//!         adopt(ctx, _args) => { Ok(ctx[0].clone()) },
//!     },
//! });
//! let root = Value::object([(
//!     "pets",
//!     Value::array([Value::from("Rex"), Value::from("Tom")]),
//! )]);
//!
//! let view = decorate(&detached(), &map, root.clone(), ContextPath::root(root));
//! let pets = view.children("pets").unwrap();
//!
//! assert_eq!(pets.len(), 2);
//! assert_eq!(pets[1].context().target(), &Value::from("Tom"));
//! ```

use crate::core::{ContextPath, Value};
use crate::slot::StateError;
use crate::transition::{TransitionEntry, TransitionFn, TransitionMap};
use std::cell::OnceCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Weak;
use std::sync::Arc;

/// Receiver of transition invocations coming from views.
///
/// Implemented by state slots; views only ever hold a weak reference, so a
/// torn-down slot makes its views inert instead of keeping it alive.
pub trait Dispatch {
    fn dispatch(
        &self,
        name: &str,
        transition: &TransitionFn,
        context: &ContextPath,
        args: &[Value],
    ) -> Result<Value, StateError>;
}

/// Weak handle to the engine that views route actions to.
pub type Engine = Weak<dyn Dispatch>;

struct Detached;

impl Dispatch for Detached {
    fn dispatch(
        &self,
        _name: &str,
        _transition: &TransitionFn,
        _context: &ContextPath,
        _args: &[Value],
    ) -> Result<Value, StateError> {
        Err(StateError::Released)
    }
}

/// An engine handle that is not attached to any slot.
///
/// Views decorated with it can be inspected, but calling their actions
/// returns [`StateError::Released`].
pub fn detached() -> Engine {
    Weak::<Detached>::new()
}

/// Build the decorated view of `prototype` for the given transitions.
pub fn decorate(
    engine: &Engine,
    transitions: &Arc<TransitionMap>,
    prototype: Value,
    context: ContextPath,
) -> View {
    let nodes = transitions
        .names()
        .map(|name| (name.to_string(), OnceCell::new()))
        .collect();

    View {
        prototype,
        context,
        transitions: Arc::clone(transitions),
        engine: engine.clone(),
        nodes,
        own: BTreeMap::new(),
    }
}

/// What a transition name resolves to on a view.
#[derive(Clone, Debug)]
pub enum Node {
    Action(Action),
    Single(Box<View>),
    Sequence(Vec<View>),
}

impl Node {
    pub fn as_action(&self) -> Option<&Action> {
        match self {
            Node::Action(action) => Some(action),
            _ => None,
        }
    }

    pub fn as_view(&self) -> Option<&View> {
        match self {
            Node::Single(view) => Some(view),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[View]> {
        match self {
            Node::Sequence(views) => Some(views),
            _ => None,
        }
    }
}

/// A leaf transition bound to the context path it was found on.
#[derive(Clone)]
pub struct Action {
    name: String,
    transition: TransitionFn,
    context: ContextPath,
    engine: Engine,
}

impl Action {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn context(&self) -> &ContextPath {
        &self.context
    }

    /// Invoke the transition with caller arguments.
    ///
    /// Returns the resulting root value, whether or not it changed.
    pub fn call(&self, args: &[Value]) -> Result<Value, StateError> {
        let engine = self.engine.upgrade().ok_or(StateError::Released)?;
        engine.dispatch(&self.name, &self.transition, &self.context, args)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("name", &self.name)
            .field("depth", &self.context.depth())
            .finish()
    }
}

/// Read-only, transition-augmented projection of a value.
#[derive(Clone)]
pub struct View {
    prototype: Value,
    context: ContextPath,
    transitions: Arc<TransitionMap>,
    engine: Engine,
    nodes: BTreeMap<String, OnceCell<Node>>,
    own: BTreeMap<String, Value>,
}

impl View {
    /// The value whose shape this view exposes.
    pub fn prototype(&self) -> &Value {
        &self.prototype
    }

    pub fn context(&self) -> &ContextPath {
        &self.context
    }

    pub fn transition_names(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// Resolve a transition name, building the node on first access.
    pub fn node(&self, name: &str) -> Option<&Node> {
        let cell = self.nodes.get(name)?;
        let entry = self.transitions.get(name)?;
        Some(cell.get_or_init(|| self.build(name, entry)))
    }

    pub fn action(&self, name: &str) -> Option<&Action> {
        self.node(name).and_then(Node::as_action)
    }

    pub fn child(&self, name: &str) -> Option<&View> {
        self.node(name).and_then(Node::as_view)
    }

    pub fn children(&self, name: &str) -> Option<&[View]> {
        self.node(name).and_then(Node::as_sequence)
    }

    /// Invoke the action called `name`.
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value, StateError> {
        self.action(name)
            .ok_or_else(|| StateError::UnknownTransition {
                name: name.to_string(),
            })?
            .call(args)
    }

    /// Read a property: own fields first, then the prototype's fields.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.own.get(key).or_else(|| self.prototype.get(key))
    }

    /// Own enumerable fields, as added by a representation hook.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.own.keys().map(String::as_str)
    }

    pub fn set_field(&mut self, key: impl Into<String>, value: Value) {
        self.own.insert(key.into(), value);
    }

    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.set_field(key, value);
        self
    }

    fn build(&self, name: &str, entry: &TransitionEntry) -> Node {
        match entry {
            TransitionEntry::Leaf(transition) => Node::Action(Action {
                name: name.to_string(),
                transition: Arc::clone(transition),
                context: self.context.clone(),
                engine: self.engine.clone(),
            }),
            TransitionEntry::Nested(map) => {
                let next = self.prototype.get(name).cloned().unwrap_or_default();
                match &next {
                    Value::Array(items) => Node::Sequence(
                        items
                            .iter()
                            .map(|item| {
                                decorate(
                                    &self.engine,
                                    map,
                                    item.clone(),
                                    self.context.extend(item.clone()),
                                )
                            })
                            .collect(),
                    ),
                    _ => Node::Single(Box::new(decorate(
                        &self.engine,
                        map,
                        next.clone(),
                        self.context.extend(next),
                    ))),
                }
            }
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.prototype, f)
    }
}

impl fmt::Debug for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("View")
            .field("prototype", &self.prototype)
            .field("depth", &self.context.depth())
            .field("transitions", &self.nodes.keys().collect::<Vec<_>>())
            .field("own", &self.own)
            .finish()
    }
}
