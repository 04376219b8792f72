//! The "Number" configuration.

use super::base;
use crate::config::Config;
use crate::core::Value;
use crate::transition::args::{number_arg, number_target};
use std::sync::{Arc, OnceLock};

/// Numeric cast of a raw input. Anything that does not read as a number
/// becomes 0.
fn coerce(value: &Value) -> f64 {
    let number = match value {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => *n,
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else {
                s.parse().unwrap_or(f64::NAN)
            }
        }
        Value::Object(_) | Value::Array(_) => f64::NAN,
    };
    if number.is_nan() {
        0.0
    } else {
        number
    }
}

pub fn number() -> Arc<Config> {
    static NUMBER: OnceLock<Arc<Config>> = OnceLock::new();
    Arc::clone(NUMBER.get_or_init(|| {
        Config::builder("Number")
            .extends(&base())
            .default_value(0)
            .initial_value(|input| Ok(Value::Number(coerce(&input))))
            .transition("add", |ctx, args| {
                Ok(Value::from(number_target(ctx)? + number_arg(args, 0)?))
            })
            .transition("subtract", |ctx, args| {
                Ok(Value::from(number_target(ctx)? - number_arg(args, 0)?))
            })
            .transition("increment", |ctx, _args| Ok(Value::from(number_target(ctx)? + 1.0)))
            .transition("decrement", |ctx, _args| Ok(Value::from(number_target(ctx)? - 1.0)))
            .transition("divide", |ctx, args| {
                Ok(Value::from(number_target(ctx)? / number_arg(args, 0)?))
            })
            .transition("multiply", |ctx, args| {
                Ok(Value::from(number_target(ctx)? * number_arg(args, 0)?))
            })
            .build()
            .expect("Number config should always build")
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TransitionEntry, TransitionError};

    fn apply(name: &str, current: f64, args: &[Value]) -> Result<Value, TransitionError> {
        let config = number();
        let Some(TransitionEntry::Leaf(f)) = config.transitions().get(name) else {
            panic!("{name} should be a leaf transition");
        };
        f(&[Value::from(current)], args)
    }

    #[test]
    fn coerces_like_a_numeric_cast() {
        let config = number();
        let derive = |input: Value| config.derive_initial(&[input]).unwrap();

        assert_eq!(config.derive_initial(&[]).unwrap(), Value::from(0));
        assert_eq!(derive(Value::from("12")), Value::from(12));
        assert_eq!(derive(Value::from(" 1.5 ")), Value::from(1.5));
        assert_eq!(derive(Value::from("")), Value::from(0));
        assert_eq!(derive(Value::from("twelve")), Value::from(0));
        assert_eq!(derive(Value::from(true)), Value::from(1));
        assert_eq!(derive(Value::Null), Value::from(0));
        assert_eq!(derive(Value::Number(f64::NAN)), Value::from(0));
        assert_eq!(derive(Value::array([])), Value::from(0));
    }

    #[test]
    fn arithmetic() {
        assert_eq!(apply("add", 5.0, &[Value::from(3)]).unwrap(), Value::from(8));
        assert_eq!(apply("subtract", 5.0, &[Value::from(3)]).unwrap(), Value::from(2));
        assert_eq!(apply("increment", 42.0, &[]).unwrap(), Value::from(43));
        assert_eq!(apply("decrement", 42.0, &[]).unwrap(), Value::from(41));
        assert_eq!(apply("divide", 9.0, &[Value::from(3)]).unwrap(), Value::from(3));
        assert_eq!(apply("multiply", 9.0, &[Value::from(3)]).unwrap(), Value::from(27));
    }

    #[test]
    fn divide_by_zero_is_infinite() {
        let result = apply("divide", 1.0, &[Value::from(0)]).unwrap();
        assert_eq!(result.as_f64(), Some(f64::INFINITY));
    }

    #[test]
    fn rejects_non_numeric_arguments() {
        assert_eq!(
            apply("add", 1.0, &[Value::from("x")]),
            Err(TransitionError::InvalidArgument {
                index: 0,
                expected: "number",
                found: "string"
            })
        );
        assert_eq!(
            apply("multiply", 1.0, &[]),
            Err(TransitionError::MissingArgument { index: 0 })
        );
    }
}
