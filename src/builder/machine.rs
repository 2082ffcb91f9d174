//! Builder for constructing machines.

use crate::builder::error::BuildError;
use crate::builder::state::StateBuilder;
use crate::core::{ChangeListener, Machine, StateData};
use std::collections::HashMap;

/// Accumulates the configuration of a machine: the initial (state, data)
/// pair, the per-state handler tables, and the change listeners.
///
/// Obtained inside [`create`](crate::create) / [`create_with`](crate::create_with);
/// never constructed directly. The builder performs no validation beyond the
/// initial-state requirement: `start_with` does not require the named state
/// to exist, `when` silently overwrites a redeclared state, and transition
/// targets are never checked. Misuse fails lazily, at the `fire` call that
/// exercises it.
pub struct MachineBuilder<D: StateData, C = ()> {
    initial: Option<(String, D)>,
    states: HashMap<String, StateBuilder<D, C>>,
    listeners: Vec<ChangeListener>,
}

impl<D: StateData, C> MachineBuilder<D, C> {
    pub(crate) fn new() -> Self {
        Self {
            initial: None,
            states: HashMap::new(),
            listeners: Vec::new(),
        }
    }

    /// Set the initial (state, data) pair. Callable multiple times; the last
    /// call wins. The state need not be declared via [`when`](Self::when) —
    /// an undeclared initial state surfaces only when `fire` is called.
    pub fn start_with(&mut self, state: impl Into<String>, data: D) -> &mut Self {
        self.initial = Some((state.into(), data));
        self
    }

    /// Declare a state and register its event handlers.
    ///
    /// `init` runs synchronously against a fresh [`StateBuilder`]. Declaring
    /// the same name again replaces the previous definition entirely.
    pub fn when(
        &mut self,
        name: impl Into<String>,
        init: impl FnOnce(&mut StateBuilder<D, C>),
    ) -> &mut Self {
        let mut builder = StateBuilder::new();
        init(&mut builder);
        self.states.insert(name.into(), builder);
        self
    }

    /// Append a change listener, invoked with `(old_state, new_state)` after
    /// every state-changing transition, in registration order.
    pub fn on_state_changed<F>(&mut self, listener: F) -> &mut Self
    where
        F: Fn(&str, &str) + Send + Sync + 'static,
    {
        self.listeners.push(Box::new(listener));
        self
    }

    /// Finalize into a sealed [`Machine`] holding `context`.
    pub(crate) fn build(self, context: C) -> Result<Machine<D, C>, BuildError> {
        let (initial_state, initial_data) = self.initial.ok_or(BuildError::MissingInitialState)?;

        let mut states = HashMap::with_capacity(self.states.len());
        for (name, builder) in self.states {
            let state = builder.into_state(name.clone());
            states.insert(name, state);
        }

        Ok(Machine::new(
            initial_state,
            initial_data,
            states,
            self.listeners,
            context,
        ))
    }
}
