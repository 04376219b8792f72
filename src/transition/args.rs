//! Typed access to transition context and arguments.

use super::error::TransitionError;
use crate::core::{Record, Value};

/// The value the transition is declared on (innermost context value).
pub fn target(ctx: &[Value]) -> Result<&Value, TransitionError> {
    ctx.last().ok_or(TransitionError::MissingContext)
}

/// The root value (outermost context value).
pub fn root(ctx: &[Value]) -> Result<&Value, TransitionError> {
    ctx.first().ok_or(TransitionError::MissingContext)
}

pub fn arg(args: &[Value], index: usize) -> Result<&Value, TransitionError> {
    args.get(index)
        .ok_or(TransitionError::MissingArgument { index })
}

pub fn number_arg(args: &[Value], index: usize) -> Result<f64, TransitionError> {
    let value = arg(args, index)?;
    value.as_f64().ok_or(TransitionError::InvalidArgument {
        index,
        expected: "number",
        found: value.kind(),
    })
}

pub fn str_arg(args: &[Value], index: usize) -> Result<&str, TransitionError> {
    let value = arg(args, index)?;
    value.as_str().ok_or(TransitionError::InvalidArgument {
        index,
        expected: "string",
        found: value.kind(),
    })
}

pub fn record_arg(args: &[Value], index: usize) -> Result<&Record, TransitionError> {
    let value = arg(args, index)?;
    value.as_object().ok_or(TransitionError::InvalidArgument {
        index,
        expected: "object",
        found: value.kind(),
    })
}

pub fn number_target(ctx: &[Value]) -> Result<f64, TransitionError> {
    let value = target(ctx)?;
    value.as_f64().ok_or(TransitionError::InvalidTarget {
        expected: "number",
        found: value.kind(),
    })
}

pub fn record_target(ctx: &[Value]) -> Result<&Record, TransitionError> {
    let value = target(ctx)?;
    value.as_object().ok_or(TransitionError::InvalidTarget {
        expected: "object",
        found: value.kind(),
    })
}

pub fn array_target(ctx: &[Value]) -> Result<&[Value], TransitionError> {
    let value = target(ctx)?;
    value.as_array().ok_or(TransitionError::InvalidTarget {
        expected: "array",
        found: value.kind(),
    })
}
