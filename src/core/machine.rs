//! The machine: event dispatch, transition commit, and deferred scheduling.

use crate::core::describe::{MachineDescription, StateDescription};
use crate::core::error::FireError;
use crate::core::history::{History, TransitionRecord};
use crate::core::state::{State, StateData};
use chrono::Utc;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::mem;
use std::sync::Arc;
use uuid::Uuid;

/// Observer invoked with `(old_state, new_state)` whenever a fired event
/// commits a different state. Listeners receive no data and must not assume
/// anything about reentrancy of the machine during their own execution.
pub type ChangeListener = Box<dyn Fn(&str, &str) + Send + Sync>;

/// Deferred work scheduled by a handler, run with the machine borrowed
/// mutably after the originating transition has committed.
pub type DeferredFn<D, C> = Box<dyn FnOnce(&mut Machine<D, C>) + Send>;

/// An event-driven finite state machine.
///
/// A machine owns a current `(state, data)` pair, an immutable table of
/// [`State`]s, an immutable slice of change listeners, an application context
/// `C`, and three deferred-work queues. It is constructed exclusively through
/// [`create`](crate::create) / [`create_with`](crate::create_with); all fields
/// are private and no post-build mutator for states, handlers, or listeners
/// exists, so the structure is sealed by construction. Only `current_state`,
/// `current_data`, the history, the queues, and the context value change after
/// build, and only through the operations below.
///
/// # Example
///
/// ```rust
/// use flint::{create, Transition};
///
/// let mut machine = create(|m| {
///     m.start_with("idle", 0i64);
///     m.when("idle", |s| {
///         s.on("start", |_m, data, _args| Transition::to("running", data + 1));
///     });
///     m.when("running", |s| {
///         s.on("stop", |_m, data, _args| Transition::to("idle", data));
///     });
/// })
/// .expect("initial state is set");
///
/// machine.fire("start").unwrap();
/// assert_eq!(machine.current_state(), "running");
/// assert_eq!(*machine.current_data(), 1);
/// ```
pub struct Machine<D: StateData, C = ()> {
    id: Uuid,
    current_state: String,
    current_data: D,
    states: HashMap<String, State<D, C>>,
    listeners: Arc<[ChangeListener]>,
    context: C,
    history: History,
    deferred: Vec<DeferredFn<D, C>>,
    deferred_out: Vec<DeferredFn<D, C>>,
    scheduled: Vec<DeferredFn<D, C>>,
}

impl<D: StateData, C> Machine<D, C> {
    pub(crate) fn new(
        initial_state: String,
        initial_data: D,
        states: HashMap<String, State<D, C>>,
        listeners: Vec<ChangeListener>,
        context: C,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            current_state: initial_state,
            current_data: initial_data,
            states,
            listeners: listeners.into(),
            context,
            history: History::new(),
            deferred: Vec::new(),
            deferred_out: Vec::new(),
            scheduled: Vec::new(),
        }
    }

    /// Unique identifier minted at build time, for host-side correlation of
    /// multiple embedded machines.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Name of the active state.
    pub fn current_state(&self) -> &str {
        &self.current_state
    }

    /// The data the machine currently carries.
    pub fn current_data(&self) -> &D {
        &self.current_data
    }

    /// The application context supplied at creation.
    pub fn context(&self) -> &C {
        &self.context
    }

    /// Mutable access to the application context. This is the handler-facing
    /// replacement for attaching extension members to the machine itself:
    /// behavior lives on `C`, which the machine holds by composition.
    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    /// Look up a declared state by name.
    pub fn state(&self, name: &str) -> Option<&State<D, C>> {
        self.states.get(name)
    }

    /// History of committed transitions, oldest first.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Dispatch `event` with no extra arguments. See [`fire_with`](Self::fire_with).
    pub fn fire(&mut self, event: &str) -> Result<&mut Self, FireError> {
        self.fire_with(event, Vec::new())
    }

    /// Dispatch `event` to the current state's handler.
    ///
    /// One logical transaction: look up the handler, invoke it with a clone
    /// of the current data and `args`, commit the returned `(state, data)`
    /// pair atomically, notify listeners in registration order iff the state
    /// changed, record the transition, drain the synchronous deferred queue,
    /// and stage the asynchronous queue for [`run_scheduled`](Self::run_scheduled).
    ///
    /// The handler receives the machine by `&mut`, so it may fire further
    /// events (an ordinary nested transaction on the same call stack), defer
    /// work, or reach its context. The committed target state is *not*
    /// checked against the state table; an undeclared target surfaces as
    /// [`FireError::UnknownState`] on the next dispatch.
    ///
    /// # Errors
    ///
    /// [`FireError::InvalidInvocation`] for an empty event name,
    /// [`FireError::UnknownState`] if the current state is undeclared, and
    /// [`FireError::UnknownEvent`] if the state has no handler for `event`.
    /// On error nothing is mutated and no queue is drained.
    pub fn fire_with(&mut self, event: &str, args: Vec<Value>) -> Result<&mut Self, FireError> {
        if event.is_empty() {
            return Err(FireError::InvalidInvocation);
        }

        let handler = {
            let state = self
                .states
                .get(&self.current_state)
                .ok_or_else(|| FireError::UnknownState {
                    state: self.current_state.clone(),
                })?;
            state
                .handler(event)
                .cloned()
                .ok_or_else(|| FireError::UnknownEvent {
                    event: event.to_string(),
                    state: self.current_state.clone(),
                })?
        };

        let data = self.current_data.clone();
        let transition = (*handler)(self, data, &args);

        let old = mem::replace(&mut self.current_state, transition.to);
        self.current_data = transition.data;
        self.history = self.history.record(TransitionRecord {
            from: old.clone(),
            to: self.current_state.clone(),
            event: event.to_string(),
            timestamp: Utc::now(),
        });

        if old != self.current_state {
            for listener in self.listeners.iter() {
                listener(&old, &self.current_state);
            }
        }

        self.drain_deferred();
        Ok(self)
    }

    /// Defer `callback` until the current transition completes.
    ///
    /// Synchronous-deferred: the callback runs before the `fire` call that
    /// drains it returns, strictly after listener notification, in
    /// registration order. The queue is swapped out before draining, so a
    /// callback that calls `execute` again is picked up by the *next* `fire`,
    /// never the drain it runs in. That swap caps same-stack recursion for
    /// this queue; a callback that calls [`fire`](Self::fire) directly
    /// re-enters the dispatch pipeline on the same stack.
    pub fn execute<F>(&mut self, callback: F) -> &mut Self
    where
        F: FnOnce(&mut Machine<D, C>) + Send + 'static,
    {
        self.deferred.push(Box::new(callback));
        self
    }

    /// Defer `callback` to a later turn of the host's task queue.
    ///
    /// Asynchronous-deferred: never runs within the `fire` call that staged
    /// it. At the end of that call the queue is swapped into a scheduled
    /// outbox which the host drains via [`run_scheduled`](Self::run_scheduled).
    /// Each callback runs exactly once; ordering relative to other scheduled
    /// callbacks or intervening `fire` calls is unspecified. This is the safe
    /// way for a handler to drive a recursive-feeling chain of `fire` calls
    /// without growing the call stack.
    pub fn execute_out<F>(&mut self, callback: F) -> &mut Self
    where
        F: FnOnce(&mut Machine<D, C>) + Send + 'static,
    {
        self.deferred_out.push(Box::new(callback));
        self
    }

    /// Whether asynchronous-deferred callbacks are waiting to run.
    pub fn has_scheduled(&self) -> bool {
        !self.scheduled.is_empty()
    }

    /// Run one batch of asynchronous-deferred callbacks, returning the batch
    /// size. The outbox is swapped out first, so callbacks staged during the
    /// batch (via `fire` → `execute_out`) wait for the next call. Hosts pump
    /// with a flat stack:
    ///
    /// ```rust,ignore
    /// while machine.run_scheduled() > 0 {}
    /// ```
    pub fn run_scheduled(&mut self) -> usize {
        let batch = mem::take(&mut self.scheduled);
        let count = batch.len();
        for callback in batch {
            callback(self);
        }
        count
    }

    /// Produce a diagnostic snapshot of the machine. Idempotent; two calls
    /// with no intervening `fire` produce equal snapshots.
    pub fn describe(&self) -> MachineDescription {
        let mut states: Vec<StateDescription> = self
            .states
            .values()
            .map(|state| StateDescription {
                name: state.name().to_string(),
                events: state.event_names(),
            })
            .collect();
        states.sort_by(|a, b| a.name.cmp(&b.name));

        MachineDescription {
            machine_id: self.id,
            current_state: self.current_state.clone(),
            current_data: serde_json::to_value(&self.current_data).unwrap_or(Value::Null),
            listener_count: self.listeners.len(),
            states,
        }
    }

    // Swap-before-drain: callbacks queued while draining land in the fresh
    // queue and wait for the next fire.
    fn drain_deferred(&mut self) {
        let queue = mem::take(&mut self.deferred);
        for callback in queue {
            callback(self);
        }
        let staged = mem::take(&mut self.deferred_out);
        self.scheduled.extend(staged);
    }
}

// Handler tables, listeners, and queued callbacks are closures; the debug
// view shows the value-shaped fields and elides the rest.
impl<D: StateData, C> fmt::Debug for Machine<D, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut states: Vec<&str> = self.states.keys().map(String::as_str).collect();
        states.sort_unstable();

        f.debug_struct("Machine")
            .field("id", &self.id)
            .field("current_state", &self.current_state)
            .field("current_data", &self.current_data)
            .field("states", &states)
            .field("listener_count", &self.listeners.len())
            .field("history_len", &self.history.len())
            .finish_non_exhaustive()
    }
}
