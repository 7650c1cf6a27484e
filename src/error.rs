//! Typed errors for finite-automaton.
//!
//! Construction problems surface as [`ValidationError`], execution problems
//! as [`StepError`] / [`ProcessError`]. The top-level [`Error`] wraps all of
//! them for callers that mix construction and execution in one function.

use crate::definition::{State, Symbol};
use std::fmt;
use thiserror::Error;

/// Top-level error type for finite-automaton operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error<Q: State, S: Symbol> {
    /// The 5-tuple failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A single step could not be taken.
    #[error("Step error: {0}")]
    Step(#[from] StepError<Q, S>),

    /// Processing an input sequence stopped early.
    #[error("Processing error: {0}")]
    Process(#[from] ProcessError<Q, S>),

    /// An expected run did not match the actual one.
    #[error("Replay error: {0}")]
    Replay(#[from] ReplayError),

    /// Writing observation records failed.
    #[error("Record error: {0}")]
    Record(#[from] RecordError),

    /// Failed to set up a worker pool for batch processing.
    #[cfg(feature = "parallel")]
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(String),
}

/// A single structural defect found while validating an automaton definition.
///
/// Offending states and symbols are rendered with `Debug`, so `"X"` for a
/// `String` state and `'1'` for a `char` symbol. A rule that finds several
/// offenders lists all of them in one violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Violation {
    #[error("automaton must have at least one state")]
    EmptyStates,

    #[error("automaton must have at least one symbol in its alphabet")]
    EmptyAlphabet,

    #[error("initial state {state} is not in the set of states")]
    InitialStateNotInStates { state: String },

    #[error("accepting states not in the set of states: {}", join(.states))]
    AcceptingStatesNotInStates { states: Vec<String> },

    #[error("transitions starting outside the set of states: {}", join(.transitions))]
    TransitionSourcesNotInStates { transitions: Vec<TransitionRef> },

    #[error("transitions leading outside the set of states: {}", join(.transitions))]
    TransitionTargetsNotInStates { transitions: Vec<TransitionRef> },

    #[error("transitions using symbols outside the alphabet: {}", join(.transitions))]
    TransitionSymbolsNotInAlphabet { transitions: Vec<TransitionRef> },

    #[error("number of states ({count}) exceeds maximum allowed ({max})")]
    TooManyStates { count: usize, max: usize },

    #[error("alphabet size ({count}) exceeds maximum allowed ({max})")]
    AlphabetTooLarge { count: usize, max: usize },

    #[error("number of transitions ({count}) exceeds maximum allowed ({max})")]
    TooManyTransitions { count: usize, max: usize },

    #[error("missing transitions for (state, symbol) pairs: {}", render_pairs(.pairs))]
    MissingTransitions { pairs: Vec<(String, String)> },

    #[error("states unreachable from the initial state: {}", join(.states))]
    UnreachableStates { states: Vec<String> },

    #[error("invalid state names: {}", render_names(.names))]
    InvalidStateNames { names: Vec<(String, String)> },

    /// Raised by a caller-supplied rule.
    #[error("{0}")]
    Custom(String),
}

/// A transition δ(from, symbol) = to named in a [`Violation`], rendered with
/// `Debug` like the rest of the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionRef {
    pub from: String,
    pub symbol: String,
    pub to: String,
}

impl fmt::Display for TransitionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "δ({}, {}) = {}", self.from, self.symbol, self.to)
    }
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_pairs(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(state, symbol)| format!("({state}, {symbol})"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_names(names: &[(String, String)]) -> String {
    names
        .iter()
        .map(|(state, reason)| format!("{state}: {reason}"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Every violation reported by one validation pass.
///
/// Never empty: a pass without violations returns `Ok(())` instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", render_report(.violations))]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    /// Wrap the collected violations, or `None` if there are none.
    pub fn from_violations(violations: Vec<Violation>) -> Option<Self> {
        if violations.is_empty() {
            None
        } else {
            Some(Self { violations })
        }
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Whether no violation was collected.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}

fn render_report(violations: &[Violation]) -> String {
    match violations {
        [single] => single.to_string(),
        many => {
            let lines: Vec<String> = many
                .iter()
                .enumerate()
                .map(|(i, v)| format!("{}. {v}", i + 1))
                .collect();
            format!(
                "{} validation errors occurred:\n{}",
                many.len(),
                lines.join("\n")
            )
        }
    }
}

/// Failure of a single transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum StepError<Q: State, S: Symbol> {
    /// The symbol is not part of the alphabet, regardless of the current state.
    #[error("symbol {symbol:?} is not in the alphabet")]
    SymbolNotInAlphabet { symbol: S },

    /// The symbol is valid but δ has no entry for the current state.
    #[error("no transition defined for state {state:?} with symbol {symbol:?}")]
    UndefinedTransition { state: Q, symbol: S },
}

impl<Q: State, S: Symbol> StepError<Q, S> {
    /// The symbol that could not be consumed.
    pub fn symbol(&self) -> &S {
        match self {
            Self::SymbolNotInAlphabet { symbol } | Self::UndefinedTransition { symbol, .. } => {
                symbol
            }
        }
    }
}

/// Processing of an input sequence stopped at `position`.
///
/// `trace` holds the states reached before the failure, starting with the
/// initial state. It is empty for untraced runs (`process_input`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("input position {position}: {source}")]
pub struct ProcessError<Q: State, S: Symbol> {
    pub position: usize,
    #[source]
    pub source: StepError<Q, S>,
    pub trace: Vec<Q>,
}

/// Mismatch between an expected run and what the automaton actually did.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReplayError {
    /// The automaton failed to consume the input.
    #[error("Run {run}: processing failed at input position {position}: {reason}")]
    Execution {
        run: usize,
        position: usize,
        reason: String,
    },

    /// The visited states differ from the expected trace.
    #[error("Trace mismatch in run {run}:\n{diff}")]
    TraceMismatch { run: usize, diff: String },

    /// Acceptance differs from the expected verdict.
    #[error("Run {run}: expected accepted = {expected}, got {actual}")]
    AcceptanceMismatch {
        run: usize,
        expected: bool,
        actual: bool,
    },
}

/// Error while writing NDJSON observation records.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RecordError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using finite-automaton's Error.
pub type FsmResult<T, Q, S> = std::result::Result<T, Error<Q, S>>;
