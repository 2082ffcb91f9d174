//! Transition history tracking.
//!
//! Every committed transition (including self-transitions) is recorded with
//! the event that caused it. `record` is pure: it returns a new history and
//! leaves the original untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record of a single committed transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// The state the machine was in when the event fired.
    pub from: String,
    /// The state the handler committed.
    pub to: String,
    /// The event that triggered the transition.
    pub event: String,
    /// When the transition was committed.
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of committed transitions.
///
/// # Example
///
/// ```rust
/// use flint::{History, TransitionRecord};
/// use chrono::Utc;
///
/// let history = History::new();
/// let history = history.record(TransitionRecord {
///     from: "producer".to_string(),
///     to: "consumer".to_string(),
///     event: "switch".to_string(),
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.len(), 1);
/// assert_eq!(history.path(), vec!["producer", "consumer"]);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct History {
    transitions: Vec<TransitionRecord>,
}

impl History {
    /// Create an empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, transition: TransitionRecord) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// All recorded transitions, oldest first.
    pub fn transitions(&self) -> &[TransitionRecord] {
        &self.transitions
    }

    /// The most recent transition, if any.
    pub fn last(&self) -> Option<&TransitionRecord> {
        self.transitions.last()
    }

    /// Number of recorded transitions.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// The sequence of states traversed: the first record's origin followed
    /// by every destination. Empty if nothing has been recorded.
    pub fn path(&self) -> Vec<&str> {
        let Some(first) = self.transitions.first() else {
            return Vec::new();
        };
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        path.push(first.from.as_str());
        for t in &self.transitions {
            path.push(t.to.as_str());
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(from: &str, to: &str, event: &str) -> TransitionRecord {
        TransitionRecord {
            from: from.to_string(),
            to: to.to_string(),
            event: event.to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn record_preserves_order() {
        let history = History::new()
            .record(record("a", "b", "go"))
            .record(record("b", "c", "go"))
            .record(record("c", "c", "tick"));

        let events: Vec<&str> = history
            .transitions()
            .iter()
            .map(|t| t.event.as_str())
            .collect();
        assert_eq!(events, vec!["go", "go", "tick"]);
        assert_eq!(history.last().map(|t| t.to.as_str()), Some("c"));
    }

    #[test]
    fn record_is_pure() {
        let history = History::new();
        let updated = history.record(record("a", "b", "go"));

        assert!(history.is_empty());
        assert_eq!(updated.len(), 1);
    }

    #[test]
    fn path_includes_origin_and_destinations() {
        let history = History::new()
            .record(record("producer", "producer", "produce"))
            .record(record("producer", "consumer", "switch"));

        assert_eq!(history.path(), vec!["producer", "producer", "consumer"]);
    }

    #[test]
    fn empty_history_has_empty_path() {
        let history = History::new();

        assert!(history.path().is_empty());
        assert!(history.last().is_none());
    }

    #[test]
    fn history_roundtrips_through_json() {
        let history = History::new().record(record("a", "b", "go"));

        let json = serde_json::to_string(&history).unwrap();
        let restored: History = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.transitions(), history.transitions());
    }
}
