//! The "Array" configuration.
//!
//! Transitions that would not change the sequence (popping an empty one,
//! removing an absent item) return the current value so no notification
//! fires.

use super::base;
use crate::config::Config;
use crate::core::Value;
use crate::transition::args::{arg, array_target, target};
use std::sync::{Arc, OnceLock};

pub fn array() -> Arc<Config> {
    static ARRAY: OnceLock<Arc<Config>> = OnceLock::new();
    Arc::clone(ARRAY.get_or_init(|| {
        Config::builder("Array")
            .extends(&base())
            .default_value(Value::Array(Arc::default()))
            .initial_value(|input| {
                Ok(match input {
                    Value::Array(_) => input,
                    Value::Null => Value::Array(Arc::default()),
                    single => Value::array([single]),
                })
            })
            .transition("push", |ctx, args| {
                let items = array_target(ctx)?;
                if args.is_empty() {
                    return Ok(target(ctx)?.clone());
                }
                Ok(Value::array(items.iter().chain(args).cloned()))
            })
            .transition("pop", |ctx, _args| {
                let items = array_target(ctx)?;
                match items.split_last() {
                    Some((_, rest)) => Ok(Value::array(rest.iter().cloned())),
                    None => Ok(target(ctx)?.clone()),
                }
            })
            .transition("shift", |ctx, _args| {
                let items = array_target(ctx)?;
                match items.split_first() {
                    Some((_, rest)) => Ok(Value::array(rest.iter().cloned())),
                    None => Ok(target(ctx)?.clone()),
                }
            })
            .transition("unshift", |ctx, args| {
                let items = array_target(ctx)?;
                if args.is_empty() {
                    return Ok(target(ctx)?.clone());
                }
                Ok(Value::array(args.iter().chain(items).cloned()))
            })
            .transition("remove", |ctx, args| {
                let items = array_target(ctx)?;
                let item = arg(args, 0)?;
                if !items.iter().any(|candidate| candidate.same(item)) {
                    return Ok(target(ctx)?.clone());
                }
                Ok(Value::array(
                    items.iter().filter(|candidate| !candidate.same(item)).cloned(),
                ))
            })
            .build()
            .expect("Array config should always build")
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TransitionEntry, TransitionFn};

    fn leaf(name: &str) -> TransitionFn {
        match array().transitions().get(name) {
            Some(TransitionEntry::Leaf(f)) => Arc::clone(f),
            _ => panic!("{name} should be a leaf"),
        }
    }

    fn abc() -> Value {
        Value::array([Value::from("a"), Value::from("b"), Value::from("c")])
    }

    #[test]
    fn wraps_single_inputs() {
        let config = array();
        assert_eq!(config.derive_initial(&[]).unwrap(), Value::array([]));
        assert_eq!(config.derive_initial(&[Value::Null]).unwrap(), Value::array([]));
        assert_eq!(
            config.derive_initial(&[Value::from(1)]).unwrap(),
            Value::array([Value::from(1)])
        );
    }

    #[test]
    fn push_pop_shift_unshift() {
        let ctx = [abc()];

        assert_eq!(
            leaf("push")(&ctx, &[Value::from("d")]).unwrap(),
            Value::array([Value::from("a"), Value::from("b"), Value::from("c"), Value::from("d")])
        );
        assert_eq!(
            leaf("pop")(&ctx, &[]).unwrap(),
            Value::array([Value::from("a"), Value::from("b")])
        );
        assert_eq!(
            leaf("shift")(&ctx, &[]).unwrap(),
            Value::array([Value::from("b"), Value::from("c")])
        );
        assert_eq!(
            leaf("unshift")(&ctx, &[Value::from("z")]).unwrap(),
            Value::array([Value::from("z"), Value::from("a"), Value::from("b"), Value::from("c")])
        );
        assert_eq!(ctx[0], abc());
    }

    #[test]
    fn remove_filters_matching_items() {
        let ctx = [abc()];
        assert_eq!(
            leaf("remove")(&ctx, &[Value::from("b")]).unwrap(),
            Value::array([Value::from("a"), Value::from("c")])
        );
    }

    #[test]
    fn unchanged_sequences_keep_identity() {
        let empty = [Value::array([])];
        assert!(leaf("pop")(&empty, &[]).unwrap().same(&empty[0]));
        assert!(leaf("shift")(&empty, &[]).unwrap().same(&empty[0]));

        let ctx = [abc()];
        assert!(leaf("remove")(&ctx, &[Value::from("q")]).unwrap().same(&ctx[0]));
        assert!(leaf("push")(&ctx, &[]).unwrap().same(&ctx[0]));
    }
}
