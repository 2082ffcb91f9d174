//! States, handlers, and the typed transition pair.
//!
//! A [`State`] is pure data: a name plus an immutable table mapping event
//! names to handlers. Handlers receive the owning [`Machine`] by `&mut` at
//! dispatch time, so states carry no back-reference to their machine.

use crate::core::machine::Machine;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

/// Bounds required of application data carried by a machine.
///
/// The engine never inspects the data beyond cloning it into handlers and
/// rendering it for [`describe`](Machine::describe). Any type satisfying the
/// bounds implements this trait automatically.
///
/// # Example
///
/// ```rust
/// use flint::StateData;
/// use serde::Serialize;
///
/// #[derive(Clone, Debug, Serialize)]
/// struct Inventory {
///     items: u32,
/// }
///
/// fn assert_state_data<D: StateData>() {}
/// assert_state_data::<Inventory>();
/// assert_state_data::<i64>();
/// ```
pub trait StateData: Clone + Debug + Serialize + Send + Sync + 'static {}

impl<T> StateData for T where T: Clone + Debug + Serialize + Send + Sync + 'static {}

/// The outcome of a handler: the next state and the next data, committed
/// atomically by `fire`.
///
/// The target state is not checked against the state table at commit time;
/// an undeclared target surfaces as
/// [`FireError::UnknownState`](crate::FireError::UnknownState) on the next
/// dispatch.
///
/// # Example
///
/// ```rust
/// use flint::Transition;
///
/// let t = Transition::to("consumer", 3);
/// assert_eq!(t.to, "consumer");
/// assert_eq!(t.data, 3);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub struct Transition<D> {
    /// The state the machine moves to.
    pub to: String,
    /// The data the machine carries afterwards.
    pub data: D,
}

impl<D> Transition<D> {
    /// Build a transition to `state` carrying `data`.
    pub fn to(state: impl Into<String>, data: D) -> Self {
        Self {
            to: state.into(),
            data,
        }
    }
}

/// A transition function bound to one (state, event) pair.
///
/// Invoked with the owning machine, a clone of the current data, and the
/// caller-supplied event arguments. Handlers may fire further events through
/// the machine (an ordinary nested transaction on the same stack) or defer
/// work via [`Machine::execute`] / [`Machine::execute_out`].
pub type Handler<D, C> =
    Arc<dyn Fn(&mut Machine<D, C>, D, &[Value]) -> Transition<D> + Send + Sync>;

/// A named state and its immutable event-handler table.
pub struct State<D: StateData, C = ()> {
    name: String,
    handlers: HashMap<String, Handler<D, C>>,
}

impl<D: StateData, C> State<D, C> {
    pub(crate) fn new(name: String, handlers: HashMap<String, Handler<D, C>>) -> Self {
        Self { name, handlers }
    }

    /// The state's name, equal to its key in the machine's state table.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up the handler for `event`, if one was registered.
    pub(crate) fn handler(&self, event: &str) -> Option<&Handler<D, C>> {
        self.handlers.get(event)
    }

    /// Whether this state handles `event`.
    pub fn handles(&self, event: &str) -> bool {
        self.handlers.contains_key(event)
    }

    /// The event names this state handles, sorted for stable output.
    pub fn event_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.handlers.keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(events: &[&str]) -> State<i64, ()> {
        let mut handlers: HashMap<String, Handler<i64, ()>> = HashMap::new();
        for event in events {
            handlers.insert(
                (*event).to_string(),
                Arc::new(|_m, data, _args| Transition::to("next", data)),
            );
        }
        State::new("test".to_string(), handlers)
    }

    #[test]
    fn handler_lookup_finds_registered_events() {
        let state = state_with(&["produce", "switch"]);

        assert!(state.handler("produce").is_some());
        assert!(state.handler("switch").is_some());
        assert!(state.handler("consume").is_none());
    }

    #[test]
    fn handles_reports_registration() {
        let state = state_with(&["produce"]);

        assert!(state.handles("produce"));
        assert!(!state.handles("bogus"));
    }

    #[test]
    fn event_names_are_sorted() {
        let state = state_with(&["switch", "produce", "audit"]);

        assert_eq!(state.event_names(), vec!["audit", "produce", "switch"]);
    }

    #[test]
    fn transition_constructor_carries_state_and_data() {
        let t = Transition::to("producer", 7);

        assert_eq!(t.to, "producer");
        assert_eq!(t.data, 7);
    }
}
