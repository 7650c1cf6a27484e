//! finite-automaton: generic deterministic finite automata.
//!
//! An automaton is the 5-tuple (Q, Σ, q₀, F, δ). It is assembled with an
//! [`AutomatonBuilder`], checked by a rule-based [`Validator`] when it is
//! finalized, and then executed symbol by symbol:
//!
//! 1. **Build**: add states, symbols, accepting states and transitions in any
//!    order. Nothing is checked until [`AutomatonBuilder::build`].
//! 2. **Validate**: every rule runs and every violation is reported at once
//!    in a [`ValidationError`].
//! 3. **Execute**: [`Automaton::process_input`] consumes an input sequence
//!    and reports acceptance; the `_with_trace` and `_observed` variants also
//!    yield the visited states or stream them to an [`Observer`].
//!
//! States and symbols are any `Clone + Eq + Hash + Debug` type.
//!
//! # Quick Start
//!
//! ```
//! use finite_automaton::AutomatonBuilder;
//!
//! // Binary strings with an even number of ones.
//! let mut automaton = AutomatonBuilder::new("even")
//!     .with_states(["even", "odd"])
//!     .with_alphabet(['0', '1'])
//!     .with_accepting_states(["even"])
//!     .with_transitions([
//!         ("even", '0', "even"),
//!         ("even", '1', "odd"),
//!         ("odd", '0', "odd"),
//!         ("odd", '1', "even"),
//!     ])
//!     .build()?;
//!
//! let result = automaton.process_input_with_trace("1101".chars())?;
//! assert!(!result.accepted);
//! assert_eq!(result.trace, ["even", "odd", "even", "even", "odd"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! The [`mod_three`] module is a complete worked example: the remainder of a
//! binary number divided by three.

mod builder;

pub mod automaton;
pub mod definition;
pub mod error;
pub mod mod_three;
#[cfg(feature = "parallel")]
pub mod parallel;
#[cfg(feature = "record")]
pub mod record;
#[cfg(feature = "replay")]
pub mod replay;
pub mod validation;

// Re-export core types for convenience
pub use automaton::{Automaton, AutomatonBuilder, Observer, ProcessResult, TracingObserver};
pub use definition::{Definition, State, Symbol, Transition};
pub use error::{
    Error, FsmResult, ProcessError, RecordError, ReplayError, StepError, TransitionRef,
    ValidationError, Violation,
};
pub use validation::{Rule, Validator, ValidatorConfig, ValidatorConfigBuilder};

#[cfg(feature = "parallel")]
pub use parallel::{process_batch, process_batch_with, BatchConfig};
#[cfg(feature = "record")]
pub use record::Recorder;
#[cfg(feature = "replay")]
pub use replay::{replay_runs, verify_run, ExpectedRun};
