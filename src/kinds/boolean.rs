//! The "Boolean" configuration.

use super::base;
use crate::config::Config;
use crate::core::Value;
use crate::transition::args::target;
use std::sync::{Arc, OnceLock};

pub fn boolean() -> Arc<Config> {
    static BOOLEAN: OnceLock<Arc<Config>> = OnceLock::new();
    Arc::clone(BOOLEAN.get_or_init(|| {
        Config::builder("Boolean")
            .extends(&base())
            .default_value(false)
            .initial_value(|input| Ok(Value::Bool(input.is_truthy())))
            .transition("toggle", |ctx, _args| Ok(Value::Bool(!target(ctx)?.is_truthy())))
            .build()
            .expect("Boolean config should always build")
    }))
}
