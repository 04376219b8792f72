//! Single and multiple choice configurations.
//!
//! The raw value is a sequence of option records `{value, selected}`. The
//! view exposes `options` (the records) and `selection`: the selected
//! value for a single choice, or the sequence of selected values for a
//! multiple choice. Each option answers `toggle`, `select` and `deselect`
//! with `(choice, option)` as its context.

use super::base;
use crate::config::Config;
use crate::core::Value;
use crate::transition::args::{root, target};
use crate::transition::{TransitionError, TransitionMap};
use std::sync::{Arc, OnceLock};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Single,
    Multiple,
}

fn option(value: Value, selected: bool) -> Value {
    Value::object([("value", value), ("selected", Value::Bool(selected))])
}

fn is_selected(option: &Value) -> bool {
    option.get("selected").is_some_and(Value::is_truthy)
}

fn option_value(option: &Value) -> Value {
    option.get("value").cloned().unwrap_or_default()
}

/// Turn each raw item into an option record. Items that already look like
/// one keep their selection.
fn normalize_options(raw: &Value) -> Vec<Value> {
    raw.as_array()
        .unwrap_or_default()
        .iter()
        .map(|item| match item.as_object() {
            Some(record) if record.contains_key("value") => {
                option(option_value(item), is_selected(item))
            }
            _ => option(item.clone(), false),
        })
        .collect()
}

fn selection(mode: Mode, raw: &Value) -> Value {
    let options = raw.as_array().unwrap_or_default();
    let mut selected = options.iter().filter(|o| is_selected(o)).map(option_value);
    match mode {
        Mode::Single => selected.next().unwrap_or_default(),
        Mode::Multiple => Value::array(selected),
    }
}

/// Set the selection of `target` within `choice`.
///
/// `force` of `None` flips the option. Returns `choice` itself when
/// nothing changes.
fn toggle(mode: Mode, ctx: &[Value], force: Option<bool>) -> Result<Value, TransitionError> {
    let choice = root(ctx)?;
    let target = target(ctx)?;
    let options = choice.as_array().ok_or(TransitionError::InvalidTarget {
        expected: "array",
        found: choice.kind(),
    })?;
    let index = options
        .iter()
        .position(|candidate| candidate.same(target))
        .ok_or_else(|| TransitionError::Failed("option is not part of this choice".to_string()))?;

    let current = is_selected(&options[index]);
    let wanted = force.unwrap_or(!current);
    let untouched = options
        .iter()
        .enumerate()
        .all(|(i, o)| i == index || mode == Mode::Multiple || !wanted || !is_selected(o));
    if wanted == current && untouched {
        return Ok(choice.clone());
    }

    Ok(Value::array(options.iter().enumerate().map(|(i, o)| {
        if i == index {
            option(option_value(o), wanted)
        } else if mode == Mode::Single && wanted && is_selected(o) {
            option(option_value(o), false)
        } else {
            o.clone()
        }
    })))
}

fn option_transitions(mode: Mode) -> TransitionMap {
    let mut map = TransitionMap::new();
    map.insert_leaf("toggle", move |ctx: &[Value], _args: &[Value]| toggle(mode, ctx, None))
        .insert_leaf("select", move |ctx: &[Value], _args: &[Value]| toggle(mode, ctx, Some(true)))
        .insert_leaf("deselect", move |ctx: &[Value], _args: &[Value]| {
            toggle(mode, ctx, Some(false))
        });
    map
}

/// Shared parent of both choice kinds.
fn choice() -> Arc<Config> {
    static CHOICE: OnceLock<Arc<Config>> = OnceLock::new();
    Arc::clone(CHOICE.get_or_init(|| {
        Config::builder("Choice")
            .extends(&base())
            .default_value(Value::Array(Arc::default()))
            .initial_value(|input| {
                Ok(match input {
                    Value::Array(_) => input,
                    Value::Null => Value::Array(Arc::default()),
                    single => Value::array([single]),
                })
            })
            .normalize(|raw| Value::from(normalize_options(&raw)))
            .build()
            .expect("Choice config should always build")
    }))
}

fn build(name: &str, mode: Mode) -> Arc<Config> {
    let builder = Config::builder(name)
        .extends(&choice())
        .prototype(move |raw| {
            Value::object([("options", raw.clone()), ("selection", selection(mode, raw))])
        })
        .nested("options", option_transitions(mode));

    let builder = match mode {
        Mode::Single => builder.normalize(|raw| {
            let mut seen = false;
            Value::array(normalize_options(&raw).into_iter().map(|o| {
                if is_selected(&o) && !seen {
                    seen = true;
                    o
                } else {
                    option(option_value(&o), false)
                }
            }))
        }),
        Mode::Multiple => builder,
    };

    builder
        .build()
        .expect("choice configs should always build")
}

/// Choice that keeps at most one option selected.
pub fn single_choice() -> Arc<Config> {
    static SINGLE: OnceLock<Arc<Config>> = OnceLock::new();
    Arc::clone(SINGLE.get_or_init(|| build("SingleChoice", Mode::Single)))
}

/// Choice that allows any number of selected options.
pub fn multiple_choice() -> Arc<Config> {
    static MULTIPLE: OnceLock<Arc<Config>> = OnceLock::new();
    Arc::clone(MULTIPLE.get_or_init(|| build("MultipleChoice", Mode::Multiple)))
}
