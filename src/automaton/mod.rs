//! Validated automata and their execution engine.
//!
//! An [`Automaton`] is obtained from an [`AutomatonBuilder`] once its
//! definition passed validation. From then on the 5-tuple is frozen; only the
//! current state moves, through [`Automaton::reset`] and [`Automaton::step`].
//!
//! Every `process_*` call starts with a reset and consumes the input symbol
//! by symbol. The first invalid symbol or undefined transition aborts the
//! call; the automaton is left at the last state it reached and can be reset
//! and reused.

pub mod builder;
pub mod observer;

pub use builder::AutomatonBuilder;
pub use observer::{Observer, TracingObserver};

use crate::definition::{Definition, State, Symbol};
use crate::error::{ProcessError, StepError, ValidationError};
use crate::validation::{Validator, ValidatorConfig};
use observer::Silent;
use std::borrow::Borrow;
use std::fmt;
use tracing::trace;

/// Outcome of fully consuming an input sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "processing result should be checked"]
pub struct ProcessResult<Q> {
    /// Whether the final state is accepting.
    pub accepted: bool,

    /// Every state visited, starting with the initial state. For an input of
    /// length n the trace holds n + 1 states.
    pub trace: Vec<Q>,

    /// The state reached after the last symbol.
    pub final_state: Q,
}

impl<Q> ProcessResult<Q> {
    /// Number of symbols consumed.
    pub fn steps(&self) -> usize {
        self.trace.len().saturating_sub(1)
    }
}

/// A deterministic finite automaton with a validated definition and a
/// current-state cursor.
///
/// Not meant to be shared between threads while processing; clone it instead,
/// one instance per worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Automaton<Q: State, S: Symbol> {
    definition: Definition<Q, S>,
    config: ValidatorConfig,
    current: Q,
}

impl<Q: State, S: Symbol> Automaton<Q, S> {
    /// Start building an automaton with initial state `initial`.
    pub fn builder(initial: Q) -> AutomatonBuilder<Q, S> {
        AutomatonBuilder::new(initial)
    }

    /// Callers must have validated `definition` under `config`.
    pub(crate) fn from_definition(definition: Definition<Q, S>, config: ValidatorConfig) -> Self {
        let current = definition.initial_state().clone();
        Self {
            definition,
            config,
            current,
        }
    }

    pub fn definition(&self) -> &Definition<Q, S> {
        &self.definition
    }

    pub fn initial_state(&self) -> &Q {
        self.definition.initial_state()
    }

    pub fn current_state(&self) -> &Q {
        &self.current
    }

    /// Whether `state` is in F. `false` for values that are not states at all.
    pub fn is_accepting_state(&self, state: &Q) -> bool {
        self.definition.is_accepting(state)
    }

    pub fn is_current_state_accepting(&self) -> bool {
        self.definition.is_accepting(&self.current)
    }

    /// Move the cursor back to the initial state.
    pub fn reset(&mut self) {
        self.current = self.definition.initial_state().clone();
    }

    /// Consume one symbol and return the new current state.
    ///
    /// On error the current state is left untouched.
    pub fn step(&mut self, symbol: &S) -> Result<&Q, StepError<Q, S>> {
        let next = self.definition.next_state(&self.current, symbol)?.clone();
        self.current = next;
        Ok(&self.current)
    }

    /// Configuration the automaton was validated with when it was built.
    pub fn validator_config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Re-run the built-in rules of the build-time configuration on the
    /// frozen definition. Custom rules passed to
    /// [`build_with`](AutomatonBuilder::build_with) are not kept; use
    /// [`validate_with`](Self::validate_with) for those.
    pub fn validate(&self) -> Result<(), ValidationError> {
        Validator::new(self.config.clone()).validate(&self.definition)
    }

    /// Re-run a caller-supplied rule set on the frozen definition.
    pub fn validate_with(&self, validator: &Validator<Q, S>) -> Result<(), ValidationError> {
        validator.validate(&self.definition)
    }

    /// Reset, consume `input`, and report whether the final state is accepting.
    ///
    /// ```
    /// use finite_automaton::AutomatonBuilder;
    ///
    /// let mut automaton = AutomatonBuilder::new(0u8)
    ///     .with_states([0, 1])
    ///     .with_alphabet(['x'])
    ///     .with_accepting_states([1])
    ///     .with_transition(0, 'x', 1)
    ///     .with_transition(1, 'x', 0)
    ///     .build()?;
    ///
    /// assert!(automaton.process_input("x".chars())?);
    /// assert!(!automaton.process_input("xx".chars())?);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn process_input<I>(&mut self, input: I) -> Result<bool, ProcessError<Q, S>>
    where
        I: IntoIterator,
        I::Item: Borrow<S>,
    {
        self.run(input, None, &mut Silent)
    }

    /// Like [`process_input`](Self::process_input), also recording every
    /// visited state.
    ///
    /// On failure the returned [`ProcessError`] carries the partial trace.
    pub fn process_input_with_trace<I>(
        &mut self,
        input: I,
    ) -> Result<ProcessResult<Q>, ProcessError<Q, S>>
    where
        I: IntoIterator,
        I::Item: Borrow<S>,
    {
        self.process_observed(input, &mut Silent)
    }

    /// Traced processing that reports each transition and the outcome to
    /// `observer`.
    pub fn process_observed<I, O>(
        &mut self,
        input: I,
        observer: &mut O,
    ) -> Result<ProcessResult<Q>, ProcessError<Q, S>>
    where
        I: IntoIterator,
        I::Item: Borrow<S>,
        O: Observer<Q, S> + ?Sized,
    {
        let input = input.into_iter();
        let mut trace = Vec::with_capacity(input.size_hint().0 + 1);

        match self.run(input, Some(&mut trace), observer) {
            Ok(accepted) => {
                let result = ProcessResult {
                    accepted,
                    trace,
                    final_state: self.current.clone(),
                };
                observer.on_result(&result);
                Ok(result)
            }
            Err(err) => {
                observer.on_error(&err);
                Err(err)
            }
        }
    }

    fn run<I, O>(
        &mut self,
        input: I,
        mut trace: Option<&mut Vec<Q>>,
        observer: &mut O,
    ) -> Result<bool, ProcessError<Q, S>>
    where
        I: IntoIterator,
        I::Item: Borrow<S>,
        O: Observer<Q, S> + ?Sized,
    {
        self.reset();
        if let Some(trace) = trace.as_deref_mut() {
            trace.push(self.current.clone());
        }

        for (position, symbol) in input.into_iter().enumerate() {
            let symbol: &S = symbol.borrow();
            let next = match self.definition.next_state(&self.current, symbol) {
                Ok(next) => next.clone(),
                Err(source) => {
                    trace!(position, error = %source, "Run aborted");
                    return Err(ProcessError {
                        position,
                        source,
                        trace: trace.map(std::mem::take).unwrap_or_default(),
                    });
                }
            };

            observer.on_transition(&self.current, symbol, &next);
            if let Some(trace) = trace.as_deref_mut() {
                trace.push(next.clone());
            }
            self.current = next;
        }

        Ok(self.is_current_state_accepting())
    }

    /// Human-readable dump of Q, Σ, q₀, F, δ and the current state.
    pub fn to_display_string(&self) -> String {
        self.to_string()
    }
}

impl<Q: State, S: Symbol> fmt::Display for Automaton<Q, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.definition)?;
        writeln!(f, "  Current state: {:?}", self.current)
    }
}
