// crates/limit-core/tests/regression_scenarios.rs
use std::collections::HashSet;
use std::sync::Mutex;

use limit_core::{EventLog, ExecutionBackend, ExecutionError, LimitOrderAgent};
use limit_protocol::{dispatch, format_output, parse_input_line, OutputMessage};

const INPUT: &str = include_str!("data/scenarios.csv");

/// Fills everything, except that the first call for a `FLAKY*` product fails.
#[derive(Default)]
struct FlakyOnce {
    failed_once: Mutex<HashSet<String>>,
}

impl FlakyOnce {
    fn attempt(&self, product_id: &str) -> Result<(), ExecutionError> {
        if product_id.starts_with("FLAKY") && self.failed_once.lock().unwrap().insert(product_id.to_string()) {
            return Err(ExecutionError::rejected("venue hiccup"));
        }
        Ok(())
    }
}

impl ExecutionBackend for FlakyOnce {
    fn buy(&self, product_id: &str, _quantity: u64) -> Result<(), ExecutionError> {
        self.attempt(product_id)
    }

    fn sell(&self, product_id: &str, _quantity: u64) -> Result<(), ExecutionError> {
        self.attempt(product_id)
    }
}

struct Scenario {
    name: String,
    inputs: Vec<String>,
    expected: Vec<String>,
}

fn load_scenarios() -> Vec<Scenario> {
    let mut scenarios: Vec<Scenario> = Vec::new();

    for line in INPUT.lines() {
        let line = line.trim();
        if let Some(name) = line.strip_prefix("#name:") {
            scenarios.push(Scenario {
                name: name.trim().to_string(),
                inputs: Vec::new(),
                expected: Vec::new(),
            });
            continue;
        }
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let current = scenarios.last_mut().expect("line outside of a #name: block");
        match line.strip_prefix('>') {
            Some(expected) => current.expected.push(expected.trim().to_string()),
            None => current.inputs.push(line.to_string()),
        }
    }

    scenarios
}

fn replay(inputs: &[String]) -> Vec<String> {
    let agent = LimitOrderAgent::with_sink(FlakyOnce::default(), EventLog::new());
    let mut outputs = Vec::new();

    for line in inputs {
        let replies = match parse_input_line(line) {
            Ok(Some(cmd)) => dispatch(&agent, cmd),
            Ok(None) => Vec::new(),
            Err(err) => vec![OutputMessage::Error {
                reason: err.to_string(),
            }],
        };

        outputs.extend(replies.iter().map(format_output));
        outputs.extend(
            agent
                .sink()
                .drain()
                .into_iter()
                .map(|event| format_output(&OutputMessage::from(event))),
        );
    }

    outputs
}

#[test]
fn every_scenario_matches_expected_output() {
    let scenarios = load_scenarios();
    assert!(scenarios.len() >= 5, "scenario file should hold A through E");

    for scenario in scenarios {
        let actual = replay(&scenario.inputs);
        assert_eq!(
            actual, scenario.expected,
            "scenario '{}' produced unexpected output",
            scenario.name
        );
    }
}

#[test]
fn whole_file_on_one_agent_never_executes_an_order_twice() {
    let scenarios = load_scenarios();
    let inputs: Vec<String> = scenarios.into_iter().flat_map(|s| s.inputs).collect();

    let outputs = replay(&inputs);

    let executed: Vec<&String> = outputs.iter().filter(|l| l.starts_with("X,")).collect();
    let unique: HashSet<&str> = executed
        .iter()
        .map(|l| l.split(',').nth(1).unwrap_or_default().trim())
        .collect();

    assert!(!executed.is_empty());
    assert_eq!(executed.len(), unique.len());
}
