//! State slots: the owner of one live current value.
//!
//! A slot derives its value from caller input once, then keeps its own
//! value across computes until it is reset. Transitions replace the value
//! (never mutate it), mark the slot dirty, ask for a recompute and notify
//! callbacks and listeners, synchronously and in that order.
//!
//! Slots are single-threaded. No internal borrow is held while hooks,
//! callbacks or listeners run, so any of them may call back into the slot.
//!
//! # Example
//!
//! ```rust
//! use microstate::{kinds, Options, StateSlot, Value};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&seen);
//!
//! let slot = StateSlot::new(kinds::number());
//! let options = Options::new()
//!     .on("increment", move |value| sink.borrow_mut().push(value.clone()));
//! let view = slot.compute(&[Value::from(42)], options).unwrap();
//!
//! assert_eq!(view.call("increment", &[]).unwrap(), Value::from(43));
//! assert_eq!(slot.value(), Some(Value::from(43)));
//! assert_eq!(*seen.borrow(), vec![Value::from(43)]);
//! ```

mod error;
mod invoke;
mod notify;

pub use error::StateError;
pub use notify::{
    callback_key, dasherize, Callback, ListenerId, Options, INIT_EVENT, TRANSITION_EVENT,
};

use crate::config::rules::RESERVED_NAMES;
use crate::config::Config;
use crate::core::{ContextPath, TransitionLog, TransitionRecord, Value};
use crate::decorate::{decorate, Dispatch, View};
use crate::transition::TransitionError;
use chrono::Utc;
use notify::Listeners;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::Arc;
use tracing::{debug, trace};
use uuid::Uuid;

/// Unique identifier of a state slot, carried in log events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotId(Uuid);

impl SlotId {
    fn new() -> Self {
        SlotId(Uuid::new_v4())
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a slot is in its life.
#[derive(Clone, Debug)]
enum Lifecycle {
    /// No value yet; the next compute derives one from its inputs.
    Uninitialized,
    /// The slot owns its value; new inputs are ignored until reset.
    Initialized { value: Value, dirty: bool },
}

pub(crate) struct SlotInner {
    id: SlotId,
    config: Arc<Config>,
    lifecycle: RefCell<Lifecycle>,
    options: RefCell<Options>,
    listeners: RefCell<Listeners>,
    log: RefCell<TransitionLog>,
    recompute: RefCell<Option<Rc<dyn Fn()>>>,
}

impl SlotInner {
    fn current(&self) -> Result<Value, StateError> {
        match &*self.lifecycle.borrow() {
            Lifecycle::Initialized { value, .. } => Ok(value.clone()),
            Lifecycle::Uninitialized => Err(StateError::Uninitialized),
        }
    }

    /// Value for this compute: the stored one if there is one, otherwise
    /// freshly derived from `inputs`. The flag is true on first derivation.
    fn settle(&self, inputs: &[Value]) -> Result<(Value, bool), StateError> {
        if let Lifecycle::Initialized { value, dirty } = &mut *self.lifecycle.borrow_mut() {
            *dirty = false;
            return Ok((value.clone(), false));
        }

        let value = self
            .config
            .derive_initial(inputs)
            .map_err(|source| StateError::InvalidInput {
                config: self.config.name().to_string(),
                source,
            })?;

        *self.lifecycle.borrow_mut() = Lifecycle::Initialized {
            value: value.clone(),
            dirty: false,
        };
        debug!(slot = %self.id, config = %self.config.name(), "state initialized");
        Ok((value, true))
    }

    /// Compute the next value from the current one and commit it if it
    /// differs by identity.
    fn transition<F>(&self, event: &str, update: F) -> Result<Value, StateError>
    where
        F: FnOnce(&Value) -> Result<Value, TransitionError>,
    {
        let current = self.current()?;
        let next = update(&current).map_err(|source| {
            debug!(slot = %self.id, transition = event, error = %source, "transition failed");
            StateError::Transition {
                name: event.to_string(),
                source,
            }
        })?;

        if next.same(&current) {
            trace!(slot = %self.id, transition = event, "transition left state unchanged");
            return Ok(current);
        }

        *self.lifecycle.borrow_mut() = Lifecycle::Initialized {
            value: next.clone(),
            dirty: true,
        };
        self.log.borrow_mut().record(TransitionRecord {
            name: event.to_string(),
            from: current,
            to: next.clone(),
            timestamp: Utc::now(),
        });
        debug!(slot = %self.id, transition = event, "state changed");

        self.request_recompute();
        self.notify(TRANSITION_EVENT, &next);
        self.notify(event, &next);
        Ok(next)
    }

    fn request_recompute(&self) {
        let hook = self.recompute.borrow().clone();
        if let Some(hook) = hook {
            hook();
        }
    }

    /// Fire `event`: its bound callback first, then its listeners.
    fn notify(&self, event: &str, value: &Value) {
        let callback = self.options.borrow().callback(event);
        match callback {
            Some(callback) => callback(value),
            None => trace!(slot = %self.id, event, "no callback bound"),
        }

        let listeners = self.listeners.borrow().for_event(event);
        for listener in listeners {
            listener(value);
        }
    }
}

/// Handle to a state slot.
///
/// Cloning the handle shares the slot. The slot is torn down when the last
/// handle is dropped; views produced by it then return
/// [`StateError::Released`] from their actions.
#[derive(Clone)]
pub struct StateSlot {
    inner: Rc<SlotInner>,
}

impl StateSlot {
    /// Create an uninitialized slot for the given configuration.
    pub fn new(config: Arc<Config>) -> Self {
        Self::with_history_limit(config, crate::core::DEFAULT_LOG_LIMIT)
    }

    /// Create a slot whose transition log keeps at most `limit` records.
    pub fn with_history_limit(config: Arc<Config>, limit: usize) -> Self {
        Self {
            inner: Rc::new(SlotInner {
                id: SlotId::new(),
                config,
                lifecycle: RefCell::new(Lifecycle::Uninitialized),
                options: RefCell::new(Options::new()),
                listeners: RefCell::new(Listeners::default()),
                log: RefCell::new(TransitionLog::with_limit(limit)),
                recompute: RefCell::new(None),
            }),
        }
    }

    pub fn id(&self) -> SlotId {
        self.inner.id
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.inner.config
    }

    /// Hook run after every committed transition so the owner can
    /// re-render.
    pub fn on_recompute<F>(&self, hook: F)
    where
        F: Fn() + 'static,
    {
        *self.inner.recompute.borrow_mut() = Some(Rc::new(hook));
    }

    /// Produce the decorated, represented view of the current value.
    ///
    /// `inputs` only matter while the slot is uninitialized. `options`
    /// replace the callbacks used by subsequent notifications, unless the
    /// inputs are rejected, in which case the previous callbacks stay.
    pub fn compute(&self, inputs: &[Value], options: Options) -> Result<View, StateError> {
        let (value, initialized) = self.inner.settle(inputs)?;
        *self.inner.options.borrow_mut() = options;

        if initialized {
            self.inner.notify(INIT_EVENT, &value);
        }

        let config = &self.inner.config;
        let downgraded = Rc::downgrade(&self.inner);
        let engine: Weak<dyn Dispatch> = downgraded;
        let view = decorate(
            &engine,
            config.transitions(),
            config.prototype_for(&value),
            ContextPath::root(value.clone()),
        );
        Ok(config.represent(view, &value))
    }

    /// Current value, if one has been derived.
    pub fn value(&self) -> Option<Value> {
        self.inner.current().ok()
    }

    pub fn is_initialized(&self) -> bool {
        matches!(&*self.inner.lifecycle.borrow(), Lifecycle::Initialized { .. })
    }

    /// True between a committed transition and the next compute.
    pub fn is_dirty(&self) -> bool {
        matches!(
            &*self.inner.lifecycle.borrow(),
            Lifecycle::Initialized { dirty: true, .. }
        )
    }

    /// Forget the stored value so the next compute derives it from inputs.
    pub fn reset(&self) {
        *self.inner.lifecycle.borrow_mut() = Lifecycle::Uninitialized;
        debug!(slot = %self.inner.id, "state reset");
    }

    /// Root-level transition: replace the value with `update(current)`.
    ///
    /// Fires the generic notification and the one named `event` when the
    /// value changes. Returns the resulting value either way. `event` may
    /// not be one of the slot's own notification names.
    pub fn transition<F>(&self, event: &str, update: F) -> Result<Value, StateError>
    where
        F: FnOnce(&Value) -> Result<Value, TransitionError>,
    {
        if RESERVED_NAMES.contains(&event) {
            return Err(StateError::ReservedEvent {
                name: event.to_string(),
            });
        }
        self.inner.transition(event, update)
    }

    /// Listen for notifications named `event`.
    pub fn listen<F>(&self, event: &str, listener: F) -> ListenerId
    where
        F: Fn(&Value) + 'static,
    {
        self.inner
            .listeners
            .borrow_mut()
            .add(event, Rc::new(listener))
    }

    /// Stop a listener. Returns false when it was not registered.
    pub fn unlisten(&self, id: ListenerId) -> bool {
        self.inner.listeners.borrow_mut().remove(id)
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// Most recent committed transitions, oldest first, bounded by the
    /// slot's history limit.
    pub fn history(&self) -> TransitionLog {
        self.inner.log.borrow().clone()
    }
}

impl fmt::Debug for StateSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateSlot")
            .field("id", &self.inner.id)
            .field("config", &self.inner.config.name())
            .field("lifecycle", &*self.inner.lifecycle.borrow())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds;
    use std::cell::Cell;

    fn recorder() -> (Rc<RefCell<Vec<String>>>, impl Fn(&str) -> Box<dyn Fn(&Value)>) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let make = move |label: &str| -> Box<dyn Fn(&Value)> {
            let sink = Rc::clone(&sink);
            let label = label.to_string();
            Box::new(move |value: &Value| sink.borrow_mut().push(format!("{label}:{value}")))
        };
        (events, make)
    }

    #[test]
    fn compute_derives_initial_value_once() {
        let slot = StateSlot::new(kinds::number());
        assert!(!slot.is_initialized());

        slot.compute(&[Value::from(42)], Options::new()).unwrap();
        slot.compute(&[Value::from(7)], Options::new()).unwrap();

        assert_eq!(slot.value(), Some(Value::from(42)));
    }

    #[test]
    fn reset_rederives_from_inputs() {
        let slot = StateSlot::new(kinds::number());
        slot.compute(&[Value::from(42)], Options::new()).unwrap();

        slot.reset();
        assert!(slot.value().is_none());

        slot.compute(&[Value::from(7)], Options::new()).unwrap();
        assert_eq!(slot.value(), Some(Value::from(7)));
    }

    #[test]
    fn change_notifies_generic_then_specific() {
        let (events, make) = recorder();
        let slot = StateSlot::new(kinds::number());
        let options = Options::new()
            .on("increment", make("increment"))
            .on("transition", make("transition"));

        let view = slot.compute(&[Value::from(1)], options).unwrap();
        let result = view.call("increment", &[]).unwrap();

        assert_eq!(result, Value::from(2));
        assert_eq!(*events.borrow(), vec!["transition:2", "increment:2"]);
        assert!(slot.is_dirty());
        assert_eq!(slot.history().len(), 1);
    }

    #[test]
    fn noop_transition_is_silent() {
        let (events, make) = recorder();
        let slot = StateSlot::new(kinds::number());
        let view = slot
            .compute(&[Value::from(5)], Options::new().on("transition", make("t")))
            .unwrap();

        let result = view.call("add", &[Value::from(0)]).unwrap();

        assert_eq!(result, Value::from(5));
        assert!(events.borrow().is_empty());
        assert!(!slot.is_dirty());
        assert!(slot.history().is_empty());
    }

    #[test]
    fn failing_transition_leaves_slot_untouched() {
        let (events, make) = recorder();
        let slot = StateSlot::new(kinds::number());
        let view = slot
            .compute(&[Value::from(5)], Options::new().on("transition", make("t")))
            .unwrap();

        let err = view.call("add", &[Value::from("x")]).unwrap_err();

        assert!(matches!(err, StateError::Transition { ref name, .. } if name == "add"));
        assert_eq!(slot.value(), Some(Value::from(5)));
        assert!(events.borrow().is_empty());
        assert!(!slot.is_dirty());
    }

    #[test]
    fn invalid_input_commits_nothing() {
        let slot = StateSlot::new(kinds::object());

        let err = slot.compute(&[Value::from(3)], Options::new()).unwrap_err();

        assert!(matches!(err, StateError::InvalidInput { ref config, .. } if config == "Object"));
        assert!(!slot.is_initialized());
    }

    #[test]
    fn compute_clears_dirty_flag() {
        let slot = StateSlot::new(kinds::number());
        let view = slot.compute(&[], Options::new()).unwrap();
        view.call("increment", &[]).unwrap();
        assert!(slot.is_dirty());

        let view = slot.compute(&[], Options::new()).unwrap();
        assert!(!slot.is_dirty());
        assert_eq!(view.to_string(), "1");
    }

    #[test]
    fn recompute_hook_runs_before_notifications() {
        let (events, make) = recorder();
        let slot = StateSlot::new(kinds::number());
        let sink = Rc::clone(&events);
        slot.on_recompute(move || sink.borrow_mut().push("recompute".to_string()));

        let view = slot
            .compute(&[Value::from(1)], Options::new().on("transition", make("t")))
            .unwrap();
        view.call("decrement", &[]).unwrap();

        assert_eq!(*events.borrow(), vec!["recompute", "t:0"]);
    }

    #[test]
    fn init_notification_fires_once() {
        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);
        let slot = StateSlot::new(kinds::number());
        slot.listen("init", move |_| seen.set(seen.get() + 1));

        slot.compute(&[], Options::new()).unwrap();
        slot.compute(&[], Options::new()).unwrap();

        assert_eq!(count.get(), 1);
    }

    #[test]
    fn listeners_run_after_callback() {
        let (events, make) = recorder();
        let slot = StateSlot::new(kinds::number());
        let listener = make("listener");
        let id = slot.listen("increment", move |value| listener(value));

        let view = slot
            .compute(&[], Options::new().on("increment", make("callback")))
            .unwrap();
        view.call("increment", &[]).unwrap();
        assert_eq!(*events.borrow(), vec!["callback:1", "listener:1"]);

        assert!(slot.unlisten(id));
        assert_eq!(slot.listener_count(), 0);
    }

    #[test]
    fn reentrant_transition_from_callback() {
        let slot = StateSlot::new(kinds::number());
        let handle = slot.clone();
        let options = Options::new().on("increment", move |value| {
            if value.as_f64() == Some(1.0) {
                handle.transition("add", |_| Ok(Value::from(10))).unwrap();
            }
        });

        let view = slot.compute(&[], options).unwrap();
        let result = view.call("increment", &[]).unwrap();

        assert_eq!(result, Value::from(1));
        assert_eq!(slot.value(), Some(Value::from(10)));
        assert_eq!(slot.history().len(), 2);
    }

    #[test]
    fn transition_before_compute_is_uninitialized() {
        let slot = StateSlot::new(kinds::base());
        let err = slot.transition("set", |_| Ok(Value::Null)).unwrap_err();
        assert_eq!(err, StateError::Uninitialized);
    }

    #[test]
    fn views_outliving_their_slot_are_released() {
        let slot = StateSlot::new(kinds::number());
        let view = slot.compute(&[], Options::new()).unwrap();
        drop(slot);

        assert_eq!(view.call("increment", &[]), Err(StateError::Released));
    }

    #[test]
    fn reserved_event_names_are_refused() {
        let (events, make) = recorder();
        let slot = StateSlot::new(kinds::number());
        slot.compute(&[Value::from(42)], Options::new().on("transition", make("t")))
            .unwrap();

        for reserved in ["transition", "init"] {
            let err = slot.transition(reserved, |_| Ok(Value::from(2))).unwrap_err();
            assert_eq!(
                err,
                StateError::ReservedEvent {
                    name: reserved.to_string()
                }
            );
        }

        assert_eq!(slot.value(), Some(Value::from(42)));
        assert!(events.borrow().is_empty());

        slot.transition("set", |_| Ok(Value::from(2))).unwrap();
        assert_eq!(*events.borrow(), vec!["t:2"]);
    }

    #[test]
    fn rejected_input_keeps_previous_callbacks() {
        let slot = StateSlot::new(kinds::object());
        slot.compute(&[], Options::new().on("put", |_| {})).unwrap();
        slot.reset();

        let err = slot
            .compute(&[Value::from(3)], Options::new().on("delete", |_| {}))
            .unwrap_err();

        assert!(matches!(err, StateError::InvalidInput { .. }));
        let options = slot.inner.options.borrow();
        assert!(options.contains("on-put"));
        assert!(!options.contains("on-delete"));
    }

    #[test]
    fn history_is_bounded_by_the_slot_limit() {
        let slot = StateSlot::with_history_limit(kinds::number(), 4);
        let mut view = slot.compute(&[], Options::new()).unwrap();
        for _ in 0..50 {
            view.call("increment", &[]).unwrap();
            view = slot.compute(&[], Options::new()).unwrap();
        }

        let history = slot.history();
        assert_eq!(slot.value(), Some(Value::from(50)));
        assert_eq!(history.len(), 4);
        assert_eq!(history.limit(), 4);
        assert_eq!(history.last().map(|r| &r.to), Some(&Value::from(50)));
        assert_eq!(history.get_path()[0], &Value::from(46));
    }
}
