//! Flint: a small embeddable event-driven finite state machine engine.
//!
//! A machine is described declaratively — states, per-state event handlers,
//! an initial (state, data) pair — and then driven by firing named events.
//! The current state's handler receives the current data plus the event
//! arguments and returns the next (state, data) pair, which is committed
//! atomically; observers registered at build time are notified of every
//! state change.
//!
//! # Core Concepts
//!
//! - **Sealed machines**: [`create`] is the only way to obtain a [`Machine`],
//!   and the built value exposes no way to add or remove states, handlers,
//!   or listeners. Only the current (state, data) pair, the history, and the
//!   deferred-work queues mutate afterwards, strictly through the dispatch
//!   operations.
//! - **Typed transitions**: handlers return [`Transition`], so a "malformed
//!   transition" cannot be expressed. Target states are validated lazily —
//!   committing an undeclared state succeeds and the mistake surfaces on the
//!   next `fire` against it.
//! - **Deferred execution**: [`Machine::execute`] queues work that runs
//!   before the current `fire` returns; [`Machine::execute_out`] stages work
//!   for a later turn of the host's task queue, pumped via
//!   [`Machine::run_scheduled`]. Both queues are swapped out before
//!   draining, which caps same-stack recursion from self-rescheduling
//!   callbacks.
//!
//! # Example
//!
//! ```rust
//! use flint::{create, Transition};
//! use serde_json::Value;
//!
//! let mut machine = create(|m| {
//!     m.start_with("producer", 0i64);
//!     m.when("producer", |s| {
//!         s.on("produce", |_m, data, args| {
//!             let step = args.first().and_then(Value::as_i64).unwrap_or(1);
//!             Transition::to("producer", data + step)
//!         });
//!         s.on("switch", |_m, data, _args| Transition::to("consumer", data));
//!     });
//!     m.when("consumer", |s| {
//!         s.on("consume", |_m, data, _args| Transition::to("consumer", data - 1));
//!         s.on("switch", |_m, data, _args| Transition::to("producer", data));
//!     });
//!     m.on_state_changed(|old, new| println!("{old} -> {new}"));
//! })
//! .expect("initial state is set");
//!
//! machine.fire("produce").unwrap();
//! machine.fire_with("produce", vec![serde_json::json!(2)]).unwrap();
//! machine.fire("switch").unwrap();
//!
//! assert_eq!(machine.current_state(), "consumer");
//! assert_eq!(*machine.current_data(), 3);
//! println!("{}", machine.describe());
//! ```

pub mod builder;
pub mod core;

// Re-export the public surface at the crate root.
pub use builder::{create, create_with, BuildError, MachineBuilder, StateBuilder};
pub use core::{
    ChangeListener, DeferredFn, FireError, Handler, History, Machine, MachineDescription, State,
    StateData, StateDescription, Transition, TransitionRecord,
};
