//! Diagnostic snapshots of a machine.
//!
//! `Machine::describe` produces an owned [`MachineDescription`]: the current
//! state, the current data rendered as JSON, the listener count, and the
//! event names each state handles. Handler bodies are never serialized. The
//! snapshot is purely diagnostic and must not be used to drive behavior.

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

/// One state's entry in a description: its name and the events it handles.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StateDescription {
    pub name: String,
    pub events: Vec<String>,
}

/// Frozen snapshot of a machine.
///
/// The textual and structural renditions of the source API's `describe` are
/// the `Display` and `Serialize` impls of this one value. The data field is
/// the machine's current data as supplied, not deep-copied semantically:
/// it is re-rendered to JSON on every call, so callers must not rely on
/// immutability of the underlying data between calls.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MachineDescription {
    pub machine_id: Uuid,
    pub current_state: String,
    pub current_data: Value,
    pub listener_count: usize,
    /// Declared states, sorted by name for stable output.
    pub states: Vec<StateDescription>,
}

impl fmt::Display for MachineDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "machine {} in state '{}' (data: {}, listeners: {})",
            self.machine_id, self.current_state, self.current_data, self.listener_count
        )?;
        for state in &self.states {
            writeln!(f, "  {}: [{}]", state.name, state.events.join(", "))?;
        }
        Ok(())
    }
}
