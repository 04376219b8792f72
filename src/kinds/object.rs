//! The "Object" configuration.
//!
//! Records are never mutated: `put` and `assign` always produce a new
//! record, and `delete` of an absent key hands back the current one.

use super::base;
use crate::config::{Config, InputError};
use crate::core::{Record, Value};
use crate::transition::args::{arg, record_arg, record_target, str_arg, target};
use std::sync::{Arc, OnceLock};

pub fn object() -> Arc<Config> {
    static OBJECT: OnceLock<Arc<Config>> = OnceLock::new();
    Arc::clone(OBJECT.get_or_init(|| {
        Config::builder("Object")
            .extends(&base())
            .default_value(Value::Object(Arc::default()))
            .initial_value(|input| match input {
                Value::Object(_) => Ok(input),
                other => Err(InputError::Rejected {
                    expected: "object",
                    found: other.kind().to_string(),
                }),
            })
            .represent(|view, raw| match raw.as_object() {
                Some(record) => record
                    .iter()
                    .fold(view, |view, (key, value)| view.with_field(key.as_str(), value.clone())),
                None => view,
            })
            .transition("put", |ctx, args| {
                let mut next = record_target(ctx)?.clone();
                next.insert(str_arg(args, 0)?.to_string(), arg(args, 1)?.clone());
                Ok(Value::from(next))
            })
            .transition("assign", |ctx, args| {
                let mut next = record_target(ctx)?.clone();
                if !args.is_empty() {
                    next.extend(record_arg(args, 0)?.iter().map(|(k, v)| (k.clone(), v.clone())));
                }
                Ok(Value::from(next))
            })
            .transition("delete", |ctx, args| {
                let current = record_target(ctx)?;
                let key = str_arg(args, 0)?;
                if !current.contains_key(key) {
                    return Ok(target(ctx)?.clone());
                }
                let next: Record = current
                    .iter()
                    .filter(|(name, _)| name.as_str() != key)
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect();
                Ok(Value::from(next))
            })
            .build()
            .expect("Object config should always build")
    }))
}
