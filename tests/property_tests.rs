//! Property-based tests for the dispatch protocol.
//!
//! These tests drive a producer/consumer machine with random event sequences
//! and check it against a pure model of the same handlers.

use flint::{create, FireError, Machine, Transition};
use proptest::prelude::*;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

const EVENTS: [&str; 4] = ["produce", "consume", "switch", "bogus"];

fn scenario_machine(log: Option<Arc<Mutex<Vec<(String, String)>>>>) -> Machine<i64> {
    create(move |m| {
        m.start_with("producer", 0i64);
        m.when("producer", |s| {
            s.on("produce", |_m, data, args| {
                let step = args.first().and_then(Value::as_i64).unwrap_or(1);
                let next = data + step;
                Transition::to("producer", if next > 10 { data } else { next })
            });
            s.on("switch", |_m, data, _args| Transition::to("consumer", data));
        });
        m.when("consumer", |s| {
            s.on("consume", |_m, data, args| {
                let step = args.first().and_then(Value::as_i64).unwrap_or(1);
                let next = data - step;
                Transition::to("consumer", if next < 0 { data } else { next })
            });
            s.on("switch", |_m, data, _args| Transition::to("producer", data));
        });
        if let Some(log) = log {
            m.on_state_changed(move |old, new| {
                log.lock().unwrap().push((old.to_string(), new.to_string()));
            });
        }
    })
    .expect("initial state is set")
}

/// Pure model of the scenario handlers. Returns whether the event is
/// handled in the given state, mutating the model pair exactly as the
/// machine would.
fn model_step(state: &mut String, data: &mut i64, event: &str, step: i64) -> bool {
    match (state.as_str(), event) {
        ("producer", "produce") => {
            let next = *data + step;
            if next <= 10 {
                *data = next;
            }
            true
        }
        ("producer", "switch") => {
            *state = "consumer".to_string();
            true
        }
        ("consumer", "consume") => {
            let next = *data - step;
            if next >= 0 {
                *data = next;
            }
            true
        }
        ("consumer", "switch") => {
            *state = "producer".to_string();
            true
        }
        _ => false,
    }
}

fn steps() -> impl Strategy<Value = Vec<(usize, i64)>> {
    prop::collection::vec((0..EVENTS.len(), 0..5i64), 0..40)
}

proptest! {
    #[test]
    fn machine_agrees_with_the_pure_model(sequence in steps()) {
        let mut machine = scenario_machine(None);
        let mut state = "producer".to_string();
        let mut data = 0i64;

        for (index, step) in sequence {
            let event = EVENTS[index];
            let handled = model_step(&mut state, &mut data, event, step);
            let result = machine.fire_with(event, vec![json!(step)]);

            prop_assert_eq!(result.is_ok(), handled);
            if !handled {
                let err = result.unwrap_err();
                let is_unknown_event = matches!(err, FireError::UnknownEvent { .. });
                prop_assert!(is_unknown_event, "expected UnknownEvent, got {:?}", err);
            }
            prop_assert_eq!(machine.current_state(), state.as_str());
            prop_assert_eq!(*machine.current_data(), data);
        }
    }

    #[test]
    fn listeners_fire_iff_the_state_changed(sequence in steps()) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut machine = scenario_machine(Some(Arc::clone(&log)));
        let mut state = "producer".to_string();
        let mut data = 0i64;
        let mut expected = Vec::new();

        for (index, step) in sequence {
            let event = EVENTS[index];
            let before = state.clone();
            if model_step(&mut state, &mut data, event, step) && before != state {
                expected.push((before, state.clone()));
            }
            let _ = machine.fire_with(event, vec![json!(step)]);
        }

        let entries = log.lock().unwrap().clone();
        prop_assert_eq!(entries, expected);
    }

    #[test]
    fn history_grows_by_one_per_successful_fire(sequence in steps()) {
        let mut machine = scenario_machine(None);
        let mut successes = 0usize;

        for (index, step) in sequence {
            if machine.fire_with(EVENTS[index], vec![json!(step)]).is_ok() {
                successes += 1;
            }
        }

        prop_assert_eq!(machine.history().len(), successes);
        if successes > 0 {
            prop_assert_eq!(machine.history().path().len(), successes + 1);
            prop_assert_eq!(machine.history().path()[0], "producer");
        }
    }

    #[test]
    fn describe_is_idempotent_after_any_sequence(sequence in steps()) {
        let mut machine = scenario_machine(None);
        for (index, step) in sequence {
            let _ = machine.fire_with(EVENTS[index], vec![json!(step)]);
        }

        let first = machine.describe();
        let second = machine.describe();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn failed_fires_leave_no_trace(sequence in steps()) {
        let mut machine = scenario_machine(None);

        for (index, step) in sequence {
            let before_state = machine.current_state().to_string();
            let before_data = *machine.current_data();
            let before_history = machine.history().len();

            if machine.fire_with(EVENTS[index], vec![json!(step)]).is_err() {
                prop_assert_eq!(machine.current_state(), before_state);
                prop_assert_eq!(*machine.current_data(), before_data);
                prop_assert_eq!(machine.history().len(), before_history);
            }
        }
    }
}
