//! Core machine types and the dispatch protocol.
//!
//! This module contains the runtime half of the engine:
//! - [`Machine`] and the `fire` transaction
//! - [`State`], handlers, and the typed [`Transition`] pair
//! - the deferred-work queues and their scheduling rules
//! - [`History`] tracking and [`MachineDescription`] snapshots
//!
//! Machines are constructed through the [`builder`](crate::builder) module
//! and are structurally immutable once built.

mod describe;
mod error;
mod history;
mod machine;
mod state;

pub use describe::{MachineDescription, StateDescription};
pub use error::FireError;
pub use history::{History, TransitionRecord};
pub use machine::{ChangeListener, DeferredFn, Machine};
pub use state::{Handler, State, StateData, Transition};
