//! Macros for declarative machine construction.

/// Build a machine from a state table literal.
///
/// Sugar over [`create`](crate::create) / [`create_with`](crate::create_with);
/// expands to the same builder calls and returns the same
/// `Result<Machine, BuildError>`.
///
/// # Example
///
/// ```rust
/// use flint::{machine, Transition};
///
/// let mut m = machine! {
///     start: ("producer", 0i64),
///     state "producer" {
///         on "produce" => |_m, data, _args| Transition::to("producer", data + 1),
///         on "switch" => |_m, data, _args| Transition::to("consumer", data),
///     },
///     state "consumer" {
///         on "switch" => |_m, data, _args| Transition::to("producer", data),
///     },
/// }
/// .expect("initial state is set");
///
/// m.fire("produce").unwrap();
/// assert_eq!(*m.current_data(), 1);
/// ```
#[macro_export]
macro_rules! machine {
    (
        start: ($state:expr, $data:expr),
        context: $context:expr
        $(, state $name:literal { $(on $event:literal => $handler:expr),* $(,)? })*
        $(,)?
    ) => {
        $crate::create_with($context, |m| {
            m.start_with($state, $data);
            $(
                m.when($name, |s| {
                    $(s.on($event, $handler);)*
                });
            )*
        })
    };
    (
        start: ($state:expr, $data:expr)
        $(, state $name:literal { $(on $event:literal => $handler:expr),* $(,)? })*
        $(,)?
    ) => {
        $crate::create(|m| {
            m.start_with($state, $data);
            $(
                m.when($name, |s| {
                    $(s.on($event, $handler);)*
                });
            )*
        })
    };
}
