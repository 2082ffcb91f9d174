//! Dispatch errors raised by `Machine::fire`.

use thiserror::Error;

/// Errors that can occur while dispatching an event.
///
/// All of these are programmer errors raised synchronously at the point of
/// misuse. Nothing is caught internally and there is no retry path; callers
/// that need resilience wrap `fire` themselves.
///
/// The malformed-transition failure class of dynamically typed engines does
/// not exist here: handlers return the typed [`Transition`](crate::Transition)
/// pair, so a handler cannot produce anything other than a (state, data) pair.
#[derive(Debug, Error)]
pub enum FireError {
    /// `fire` was called without an event name.
    #[error("fire called without an event name")]
    InvalidInvocation,

    /// The current state has no handler registered for the event.
    #[error("state '{state}' has no handler for event '{event}'")]
    UnknownEvent { event: String, state: String },

    /// The current state has no entry in the state table.
    ///
    /// Transition targets are validated lazily: a handler may commit a state
    /// that was never declared, and the mistake surfaces on the *next* `fire`
    /// against that state rather than at commit time.
    #[error("current state '{state}' is not declared in the state table")]
    UnknownState { state: String },
}
