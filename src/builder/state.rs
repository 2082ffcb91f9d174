//! Builder for a single state's handler table.

use crate::core::{Handler, Machine, State, StateData, Transition};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Accumulates event→handler bindings for one state.
///
/// Obtained inside [`MachineBuilder::when`](crate::MachineBuilder::when);
/// never constructed directly. The last registration for a given event name
/// wins, with no duplicate detection.
pub struct StateBuilder<D: StateData, C = ()> {
    handlers: HashMap<String, Handler<D, C>>,
}

impl<D: StateData, C> StateBuilder<D, C> {
    pub(crate) fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register `handler` for `event`.
    ///
    /// The handler is invoked with the owning machine (`&mut`), a clone of
    /// the current data, and the caller-supplied event arguments; it returns
    /// the [`Transition`] to commit.
    pub fn on<F>(&mut self, event: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(&mut Machine<D, C>, D, &[Value]) -> Transition<D> + Send + Sync + 'static,
    {
        self.handlers.insert(event.into(), Arc::new(handler));
        self
    }

    /// Finalize into an immutable [`State`] under `name`.
    pub(crate) fn into_state(self, name: String) -> State<D, C> {
        State::new(name, self.handlers)
    }
}
