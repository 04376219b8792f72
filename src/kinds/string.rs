//! The "String" configuration.

use super::base;
use crate::config::{Config, InputError};
use crate::core::Value;
use crate::transition::args::target;
use crate::transition::TransitionError;
use std::sync::{Arc, OnceLock};

pub fn string() -> Arc<Config> {
    static STRING: OnceLock<Arc<Config>> = OnceLock::new();
    Arc::clone(STRING.get_or_init(|| {
        Config::builder("String")
            .extends(&base())
            .default_value("")
            .initial_value(|input| match input {
                Value::String(_) => Ok(input),
                Value::Object(_) | Value::Array(_) => Err(InputError::Rejected {
                    expected: "string",
                    found: input.kind().to_string(),
                }),
                primitive => Ok(Value::from(primitive.to_string())),
            })
            .transition("concat", |ctx, args| {
                let value = target(ctx)?;
                let current = value.as_str().ok_or(TransitionError::InvalidTarget {
                    expected: "string",
                    found: value.kind(),
                })?;
                if args.is_empty() {
                    return Ok(value.clone());
                }
                let joined = args.iter().fold(current.to_string(), |mut out, arg| {
                    out.push_str(&arg.to_string());
                    out
                });
                Ok(Value::from(joined))
            })
            .build()
            .expect("String config should always build")
    }))
}
