//! Macro for declaring transition maps.

/// Build a [`TransitionMap`](crate::TransitionMap) declaratively.
///
/// Each leaf is written as `name(ctx, args) => { body }`, where `ctx` binds
/// the context path (`&[Value]`) and `args` the caller arguments; the body
/// evaluates to `Result<Value, TransitionError>`. A sub-value with its own
/// transitions is written as `name: { ... }`.
///
/// # Example
///
/// ```
/// use microstate::transition::args::{number_arg, number_target};
/// use microstate::{transitions, Value};
///
/// let map = transitions! {
///     add(ctx, args) => { Ok(Value::from(number_target(ctx)? + number_arg(args, 0)?)) },
///     reset(_ctx, _args) => { Ok(Value::from(0)) },
///     items: {
///         drop(ctx, _args) => { Ok(ctx[0].clone()) },
///     },
/// };
///
/// assert!(map.contains("add"));
/// assert!(map.contains("items"));
/// ```
#[macro_export]
macro_rules! transitions {
    (@entries $map:ident ;) => {};

    (@entries $map:ident ;
        $name:ident ( $ctx:pat_param , $args:pat_param ) => $body:block $(, $($rest:tt)*)?
    ) => {
        $map.insert_leaf(
            stringify!($name),
            |$ctx: &[$crate::Value],
             $args: &[$crate::Value]|
             -> ::std::result::Result<$crate::Value, $crate::TransitionError> { $body },
        );
        $($crate::transitions!(@entries $map ; $($rest)*);)?
    };

    (@entries $map:ident ; $name:ident : { $($inner:tt)* } $(, $($rest:tt)*)?) => {
        $map.insert_nested(stringify!($name), $crate::transitions! { $($inner)* });
        $($crate::transitions!(@entries $map ; $($rest)*);)?
    };

    ($($body:tt)*) => {{
        #[allow(unused_mut)]
        let mut map = $crate::TransitionMap::new();
        $crate::transitions!(@entries map ; $($body)*);
        map
    }};
}
