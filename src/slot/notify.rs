//! Notification wiring: per-compute callbacks and named listeners.

use crate::core::Value;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Generic notification fired on every committed transition.
pub const TRANSITION_EVENT: &str = "transition";

/// Fired once when a slot derives its initial value.
pub const INIT_EVENT: &str = "init";

/// Callback receiving the new root value.
pub type Callback = Rc<dyn Fn(&Value)>;

/// Dasherize an event name the way the templating layer does:
/// `addItem` becomes `add-item`, spaces and underscores become dashes.
pub fn dasherize(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut previous: Option<char> = None;
    for c in name.chars() {
        if c.is_ascii_uppercase()
            && previous.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit())
        {
            out.push('-');
        }
        out.push(match c {
            ' ' | '_' => '-',
            _ => c.to_ascii_lowercase(),
        });
        previous = Some(c);
    }
    out
}

/// Option key for an event's callback, e.g. `on-add-item`.
pub fn callback_key(event: &str) -> String {
    dasherize(&format!("on-{event}"))
}

/// Callbacks supplied with each compute, keyed `on-<event-name>`.
///
/// At most one callback is bound per event. Events without a callback are
/// skipped silently.
///
/// # Example
///
/// ```rust
/// use microstate::Options;
///
/// let options = Options::new().on("addItem", |value| println!("{value}"));
/// assert!(options.contains("on-add-item"));
/// ```
#[derive(Clone, Default)]
pub struct Options {
    callbacks: HashMap<String, Callback>,
}

impl Options {
    pub fn new() -> Self {
        Self {
            callbacks: HashMap::new(),
        }
    }

    /// Bind a callback to `event`, replacing any previous one.
    pub fn on<F>(mut self, event: &str, callback: F) -> Self
    where
        F: Fn(&Value) + 'static,
    {
        self.callbacks.insert(callback_key(event), Rc::new(callback));
        self
    }

    /// Bind a callback under an already formed option key.
    pub fn with_key<F>(mut self, key: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&Value) + 'static,
    {
        self.callbacks.insert(key.into(), Rc::new(callback));
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.callbacks.contains_key(key)
    }

    /// Callback bound to `event`, if any.
    pub fn callback(&self, event: &str) -> Option<Callback> {
        self.callbacks.get(&callback_key(event)).cloned()
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("callbacks", &self.callbacks.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Handle returned by [`StateSlot::listen`](crate::StateSlot::listen).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Named event listeners, notified after the event's callback.
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, String, Callback)>,
}

impl Listeners {
    pub(crate) fn add(&mut self, event: &str, listener: Callback) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.entries.push((id, event.to_string(), listener));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _, _)| *entry != id);
        self.entries.len() != before
    }

    /// Snapshot of the listeners for `event`, in registration order.
    pub(crate) fn for_event(&self, event: &str) -> Vec<Callback> {
        self.entries
            .iter()
            .filter(|(_, name, _)| name == event)
            .map(|(_, _, listener)| Rc::clone(listener))
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
