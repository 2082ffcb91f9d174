//! Declarative construction of machines.
//!
//! [`create`] is the single entry point: it runs a caller-supplied
//! initializer against a fresh [`MachineBuilder`] and finalizes the result
//! into a sealed [`Machine`](crate::Machine). The builder-time API
//! (`start_with`, `when`, `on`, `on_state_changed`) exists only inside the
//! initializer callback and cannot leak into the built machine.

pub mod error;
pub mod machine;
pub mod macros;
pub mod state;

pub use error::BuildError;
pub use machine::MachineBuilder;
pub use state::StateBuilder;

use crate::core::{Machine, StateData};

/// Build a machine with no application context.
///
/// Runs `init` against a fresh builder, then finalizes and seals the
/// machine. Handlers that need shared application behavior should use
/// [`create_with`] instead.
///
/// # Errors
///
/// [`BuildError::MissingInitialState`] if `init` never calls
/// [`start_with`](MachineBuilder::start_with).
///
/// # Example
///
/// ```rust
/// use flint::{create, Transition};
///
/// let mut machine = create(|m| {
///     m.start_with("idle", 0i64);
///     m.when("idle", |s| {
///         s.on("poke", |_m, data, _args| Transition::to("idle", data + 1));
///     });
/// })
/// .expect("initial state is set");
///
/// machine.fire("poke").unwrap();
/// assert_eq!(*machine.current_data(), 1);
/// ```
pub fn create<D, F>(init: F) -> Result<Machine<D>, BuildError>
where
    D: StateData,
    F: FnOnce(&mut MachineBuilder<D, ()>),
{
    create_with((), init)
}

/// Build a machine holding an application context.
///
/// The context replaces the source API's practice of copying extension
/// members onto the machine: capabilities live on one explicit value the
/// machine holds by composition, reachable from every handler via
/// [`Machine::context`](crate::Machine::context) /
/// [`context_mut`](crate::Machine::context_mut).
///
/// # Example
///
/// ```rust
/// use flint::{create_with, Transition};
///
/// #[derive(Default)]
/// struct Counters {
///     fired: u32,
/// }
///
/// let mut machine = create_with(Counters::default(), |m| {
///     m.start_with("idle", ());
///     m.when("idle", |s| {
///         s.on("poke", |m, data, _args| {
///             m.context_mut().fired += 1;
///             Transition::to("idle", data)
///         });
///     });
/// })
/// .expect("initial state is set");
///
/// machine.fire("poke").unwrap();
/// assert_eq!(machine.context().fired, 1);
/// ```
pub fn create_with<D, C, F>(context: C, init: F) -> Result<Machine<D, C>, BuildError>
where
    D: StateData,
    F: FnOnce(&mut MachineBuilder<D, C>),
{
    let mut builder = MachineBuilder::new();
    init(&mut builder);
    builder.build(context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Transition;

    #[test]
    fn create_finalizes_a_working_machine() {
        let mut machine = create(|m| {
            m.start_with("a", 0i64);
            m.when("a", |s| {
                s.on("go", |_m, data, _args| Transition::to("b", data + 1));
            });
            m.when("b", |s| {
                s.on("back", |_m, data, _args| Transition::to("a", data));
            });
        })
        .unwrap();

        machine.fire("go").unwrap();
        assert_eq!(machine.current_state(), "b");
        assert_eq!(*machine.current_data(), 1);
    }

    #[test]
    fn create_with_threads_the_context_through() {
        let mut machine = create_with(vec!["boot"], |m| {
            m.start_with("a", 0i64);
            m.when("a", |s| {
                s.on("go", |m, data, _args| {
                    m.context_mut().push("fired");
                    Transition::to("a", data)
                });
            });
        })
        .unwrap();

        machine.fire("go").unwrap();
        assert_eq!(*machine.context(), vec!["boot", "fired"]);
    }
}
