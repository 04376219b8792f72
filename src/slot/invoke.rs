//! Transition invocation: binds a leaf transition to its context path and
//! routes the result into the slot.

use super::{SlotInner, StateError};
use crate::core::{ContextPath, Value};
use crate::decorate::Dispatch;
use crate::transition::TransitionFn;
use tracing::trace;

/// Apply `transition` to `context` followed by `args` and commit the result
/// as the slot's candidate root value.
///
/// Nested and root-level transitions are treated alike: the transition
/// receives the whole path starting at the root, so whatever it returns is
/// the new root.
pub(crate) fn invoke(
    slot: &SlotInner,
    name: &str,
    transition: &TransitionFn,
    context: &ContextPath,
    args: &[Value],
) -> Result<Value, StateError> {
    trace!(
        slot = %slot.id,
        transition = name,
        depth = context.depth(),
        args = args.len(),
        "invoking transition"
    );
    slot.transition(name, |_current| transition(context.values(), args))
}

impl Dispatch for SlotInner {
    fn dispatch(
        &self,
        name: &str,
        transition: &TransitionFn,
        context: &ContextPath,
        args: &[Value],
    ) -> Result<Value, StateError> {
        invoke(self, name, transition, context, args)
    }
}
