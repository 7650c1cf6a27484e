//! Order-independent construction of automata.

use super::Automaton;
use crate::definition::{Definition, State, Symbol, Transition};
use crate::error::ValidationError;
use crate::validation::{Validator, ValidatorConfig};
use tracing::debug;

/// Collects the 5-tuple of an automaton and validates it on [`build`](Self::build).
///
/// Insertion is unchecked and idempotent: an accepting state or a transition
/// may mention states and symbols that are only added later. All checks
/// happen at finalization.
///
/// ```
/// use finite_automaton::AutomatonBuilder;
///
/// let mut automaton = AutomatonBuilder::new("even")
///     .with_transition("even", 'a', "odd")
///     .with_transition("odd", 'a', "even")
///     .with_states(["even", "odd"])
///     .with_alphabet(['a'])
///     .with_accepting_states(["even"])
///     .build()?;
///
/// assert!(automaton.process_input("aa".chars())?);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct AutomatonBuilder<Q: State, S: Symbol> {
    definition: Definition<Q, S>,
    config: ValidatorConfig,
}

impl<Q: State, S: Symbol> AutomatonBuilder<Q, S> {
    /// Start a definition with initial state `initial`, validated with the
    /// default [`ValidatorConfig`].
    ///
    /// The initial state still has to be added to the set of states.
    pub fn new(initial: Q) -> Self {
        Self::with_validation(initial, ValidatorConfig::default())
    }

    pub fn with_validation(initial: Q, config: ValidatorConfig) -> Self {
        Self {
            definition: Definition::new(initial),
            config,
        }
    }

    pub fn add_state(&mut self, state: Q) -> &mut Self {
        self.definition.insert_state(state);
        self
    }

    pub fn add_states(&mut self, states: impl IntoIterator<Item = Q>) -> &mut Self {
        for state in states {
            self.definition.insert_state(state);
        }
        self
    }

    pub fn add_symbol(&mut self, symbol: S) -> &mut Self {
        self.definition.insert_symbol(symbol);
        self
    }

    pub fn add_symbols(&mut self, symbols: impl IntoIterator<Item = S>) -> &mut Self {
        for symbol in symbols {
            self.definition.insert_symbol(symbol);
        }
        self
    }

    pub fn add_accepting_state(&mut self, state: Q) -> &mut Self {
        self.definition.insert_accepting_state(state);
        self
    }

    pub fn add_accepting_states(&mut self, states: impl IntoIterator<Item = Q>) -> &mut Self {
        for state in states {
            self.definition.insert_accepting_state(state);
        }
        self
    }

    /// Define δ(from, symbol) = to. A later definition for the same pair
    /// replaces the earlier one.
    pub fn add_transition(&mut self, from: Q, symbol: S, to: Q) -> &mut Self {
        self.definition.insert_transition(from, symbol, to);
        self
    }

    pub fn add_transitions<T>(&mut self, transitions: impl IntoIterator<Item = T>) -> &mut Self
    where
        T: Into<Transition<Q, S>>,
    {
        for transition in transitions {
            let Transition { from, symbol, to } = transition.into();
            self.definition.insert_transition(from, symbol, to);
        }
        self
    }

    pub fn with_states(mut self, states: impl IntoIterator<Item = Q>) -> Self {
        self.add_states(states);
        self
    }

    pub fn with_alphabet(mut self, symbols: impl IntoIterator<Item = S>) -> Self {
        self.add_symbols(symbols);
        self
    }

    pub fn with_accepting_states(mut self, states: impl IntoIterator<Item = Q>) -> Self {
        self.add_accepting_states(states);
        self
    }

    pub fn with_transition(mut self, from: Q, symbol: S, to: Q) -> Self {
        self.add_transition(from, symbol, to);
        self
    }

    pub fn with_transitions<T>(mut self, transitions: impl IntoIterator<Item = T>) -> Self
    where
        T: Into<Transition<Q, S>>,
    {
        self.add_transitions(transitions);
        self
    }

    /// The definition collected so far.
    pub fn definition(&self) -> &Definition<Q, S> {
        &self.definition
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Check the definition collected so far without finalizing it.
    pub fn validate(&self) -> Result<(), ValidationError> {
        Validator::new(self.config.clone()).validate(&self.definition)
    }

    /// Validate with the builder's configuration and finalize.
    pub fn build(self) -> Result<Automaton<Q, S>, ValidationError> {
        let validator = Validator::new(self.config.clone());
        self.build_with(&validator)
    }

    /// Validate with a caller-supplied validator (e.g. one carrying custom
    /// rules) and finalize.
    pub fn build_with(self, validator: &Validator<Q, S>) -> Result<Automaton<Q, S>, ValidationError> {
        validator.validate(&self.definition)?;
        debug!(
            initial = ?self.definition.initial_state(),
            states = self.definition.states().len(),
            "Automaton built"
        );
        Ok(Automaton::from_definition(
            self.definition,
            validator.config().clone(),
        ))
    }
}
