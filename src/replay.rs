//! Replay of expected runs against an automaton.
//!
//! Each [`ExpectedRun`] pairs an input with the states the automaton should
//! visit and, optionally, its verdict. Runs are replayed in order and the
//! first divergence is reported with a unified diff of the traces.

use crate::automaton::Automaton;
use crate::definition::{State, Symbol};
use crate::error::ReplayError;
use similar::{ChangeTag, TextDiff};
use tracing::{debug, info};

/// An input together with the run it is expected to produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedRun<Q, S> {
    pub input: Vec<S>,

    /// Expected visited states, starting with the initial state.
    pub trace: Vec<Q>,

    /// Expected verdict; `None` skips the acceptance check.
    pub accepted: Option<bool>,
}

impl<Q, S> ExpectedRun<Q, S> {
    pub fn new(input: impl IntoIterator<Item = S>, trace: impl IntoIterator<Item = Q>) -> Self {
        Self {
            input: input.into_iter().collect(),
            trace: trace.into_iter().collect(),
            accepted: None,
        }
    }

    /// Also require the given verdict.
    pub fn accepted(mut self, accepted: bool) -> Self {
        self.accepted = Some(accepted);
        self
    }
}

/// Replay a single run, identified as `run` in errors.
pub fn verify_run<Q: State, S: Symbol>(
    automaton: &mut Automaton<Q, S>,
    expected: &ExpectedRun<Q, S>,
    run: usize,
) -> Result<(), ReplayError> {
    let result = automaton
        .process_input_with_trace(&expected.input)
        .map_err(|err| ReplayError::Execution {
            run,
            position: err.position,
            reason: err.source.to_string(),
        })?;

    if result.trace != expected.trace {
        let expected_str = format!("{:#?}", expected.trace);
        let actual_str = format!("{:#?}", result.trace);
        let diff = unified_diff(&expected_str, &actual_str);
        return Err(ReplayError::TraceMismatch {
            run,
            diff: format!("--- expected\n+++ actual\n{diff}"),
        });
    }

    if let Some(expected) = expected.accepted {
        if expected != result.accepted {
            return Err(ReplayError::AcceptanceMismatch {
                run,
                expected,
                actual: result.accepted,
            });
        }
    }

    Ok(())
}

/// Replay every run in order, stopping at the first divergence.
pub fn replay_runs<Q: State, S: Symbol>(
    automaton: &mut Automaton<Q, S>,
    runs: &[ExpectedRun<Q, S>],
) -> Result<(), ReplayError> {
    info!(run_count = runs.len(), "Replaying expected runs");

    for (idx, expected) in runs.iter().enumerate() {
        debug!(run = idx, symbols = expected.input.len(), "Replaying run");
        verify_run(automaton, expected, idx)?;
    }

    info!(run_count = runs.len(), "All runs replayed successfully");
    Ok(())
}

/// Produce a unified diff between two debug-formatted strings.
fn unified_diff(left: &str, right: &str) -> String {
    let diff = TextDiff::from_lines(left, right);
    let mut output = String::new();

    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => "-",
            ChangeTag::Insert => "+",
            ChangeTag::Equal => " ",
        };
        output.push_str(sign);
        output.push_str(change.value());
        if !change.value().ends_with('\n') {
            output.push('\n');
        }
    }

    output
}
