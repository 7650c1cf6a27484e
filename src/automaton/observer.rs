//! Observation hook for automaton runs.
//!
//! An [`Observer`] is handed to
//! [`Automaton::process_observed`](crate::Automaton::process_observed) and is
//! told about every transition and about the outcome of the run. It cannot
//! influence the run itself.

use super::ProcessResult;
use crate::definition::{State, Symbol};
use crate::error::ProcessError;
use tracing::{debug, trace, warn};

/// Receives events from an observed run. Every method defaults to a no-op.
pub trait Observer<Q: State, S: Symbol> {
    /// A successful step δ(from, symbol) = to.
    fn on_transition(&mut self, from: &Q, symbol: &S, to: &Q) {
        let _ = (from, symbol, to);
    }

    /// The input was fully consumed.
    fn on_result(&mut self, result: &ProcessResult<Q>) {
        let _ = result;
    }

    /// The run stopped at an invalid symbol or undefined transition.
    fn on_error(&mut self, error: &ProcessError<Q, S>) {
        let _ = error;
    }
}

/// Closures observe transitions only.
impl<Q, S, F> Observer<Q, S> for F
where
    Q: State,
    S: Symbol,
    F: FnMut(&Q, &S, &Q),
{
    fn on_transition(&mut self, from: &Q, symbol: &S, to: &Q) {
        self(from, symbol, to)
    }
}

/// Observer used by the unobserved entry points.
pub(crate) struct Silent;

impl<Q: State, S: Symbol> Observer<Q, S> for Silent {}

/// Forwards run events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl<Q: State, S: Symbol> Observer<Q, S> for TracingObserver {
    fn on_transition(&mut self, from: &Q, symbol: &S, to: &Q) {
        trace!(?from, ?symbol, ?to, "State transition");
    }

    fn on_result(&mut self, result: &ProcessResult<Q>) {
        debug!(
            accepted = result.accepted,
            final_state = ?result.final_state,
            steps = result.steps(),
            "Input processed"
        );
    }

    fn on_error(&mut self, error: &ProcessError<Q, S>) {
        warn!(position = error.position, %error, "Input rejected");
    }
}
