//! Build errors for machine construction.

use thiserror::Error;

/// Errors that can occur when finalizing a machine.
///
/// Construction is deliberately permissive: redeclaring a state overwrites
/// it, the initial state need not be declared, and transition targets are
/// never checked. The one thing a machine cannot exist without is an initial
/// (state, data) pair.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Initial state not specified. Call .start_with(state, data) before the initializer returns")]
    MissingInitialState,
}
