//! The formal 5-tuple (Q, Σ, q₀, F, δ) behind every automaton.
//!
//! A [`Definition`] is a plain aggregate: insertion never checks anything.
//! Whether the pieces fit together is decided later by
//! [`Validator`](crate::validation::Validator), so states, symbols and
//! transitions can be declared in any order.

use crate::error::StepError;
use indexmap::{IndexMap, IndexSet};
use std::fmt::{self, Debug, Display};
use std::hash::Hash;

/// A state of an automaton. Blanket-implemented for every suitable type.
pub trait State: Clone + Eq + Hash + Debug + 'static {}

impl<T: Clone + Eq + Hash + Debug + 'static> State for T {}

/// An input symbol. Blanket-implemented for every suitable type.
pub trait Symbol: Clone + Eq + Hash + Debug + 'static {}

impl<T: Clone + Eq + Hash + Debug + 'static> Symbol for T {}

/// A single entry δ(from, symbol) = to, used for bulk registration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Transition<Q, S> {
    pub from: Q,
    pub symbol: S,
    pub to: Q,
}

impl<Q, S> Transition<Q, S> {
    pub fn new(from: Q, symbol: S, to: Q) -> Self {
        Self { from, symbol, to }
    }
}

impl<Q, S> From<(Q, S, Q)> for Transition<Q, S> {
    fn from((from, symbol, to): (Q, S, Q)) -> Self {
        Self { from, symbol, to }
    }
}

/// The five components of a deterministic finite automaton.
///
/// Sets keep insertion order, which makes validation reports and the
/// `Display` output stable across runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition<Q: State, S: Symbol> {
    states: IndexSet<Q>,
    alphabet: IndexSet<S>,
    initial_state: Q,
    accepting_states: IndexSet<Q>,
    transitions: IndexMap<Q, IndexMap<S, Q>>,
}

impl<Q: State, S: Symbol> Definition<Q, S> {
    /// An otherwise empty definition with the given initial state.
    ///
    /// The initial state is *not* added to the set of states.
    pub fn new(initial_state: Q) -> Self {
        Self {
            states: IndexSet::new(),
            alphabet: IndexSet::new(),
            initial_state,
            accepting_states: IndexSet::new(),
            transitions: IndexMap::new(),
        }
    }

    pub(crate) fn insert_state(&mut self, state: Q) {
        self.states.insert(state);
    }

    pub(crate) fn insert_symbol(&mut self, symbol: S) {
        self.alphabet.insert(symbol);
    }

    pub(crate) fn insert_accepting_state(&mut self, state: Q) {
        self.accepting_states.insert(state);
    }

    /// Set δ(from, symbol) = to, replacing any earlier entry for the pair.
    pub(crate) fn insert_transition(&mut self, from: Q, symbol: S, to: Q) {
        self.transitions.entry(from).or_default().insert(symbol, to);
    }

    pub fn states(&self) -> &IndexSet<Q> {
        &self.states
    }

    pub fn alphabet(&self) -> &IndexSet<S> {
        &self.alphabet
    }

    pub fn initial_state(&self) -> &Q {
        &self.initial_state
    }

    pub fn accepting_states(&self) -> &IndexSet<Q> {
        &self.accepting_states
    }

    pub fn contains_state(&self, state: &Q) -> bool {
        self.states.contains(state)
    }

    pub fn contains_symbol(&self, symbol: &S) -> bool {
        self.alphabet.contains(symbol)
    }

    /// Membership in F. Unknown values are simply not accepting.
    pub fn is_accepting(&self, state: &Q) -> bool {
        self.accepting_states.contains(state)
    }

    /// δ(from, symbol), if defined.
    pub fn transition(&self, from: &Q, symbol: &S) -> Option<&Q> {
        self.transitions.get(from)?.get(symbol)
    }

    /// All entries of δ as `(from, symbol, to)`, grouped by source state.
    pub fn transitions(&self) -> impl Iterator<Item = (&Q, &S, &Q)> + '_ {
        self.transitions
            .iter()
            .flat_map(|(from, row)| row.iter().map(move |(symbol, to)| (from, symbol, to)))
    }

    /// Targets reachable in one step from `state`.
    pub fn successors<'a>(&'a self, state: &Q) -> impl Iterator<Item = &'a Q> + 'a {
        self.transitions
            .get(state)
            .into_iter()
            .flat_map(|row| row.values())
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.values().map(|row| row.len()).sum()
    }

    /// Resolve the successor of `from` on `symbol`.
    ///
    /// Alphabet membership is checked before the table, so an unknown symbol
    /// is reported as such even when δ has no row for `from`.
    pub fn next_state(&self, from: &Q, symbol: &S) -> Result<&Q, StepError<Q, S>> {
        if !self.contains_symbol(symbol) {
            return Err(StepError::SymbolNotInAlphabet {
                symbol: symbol.clone(),
            });
        }
        self.transition(from, symbol)
            .ok_or_else(|| StepError::UndefinedTransition {
                state: from.clone(),
                symbol: symbol.clone(),
            })
    }
}

fn write_set<'a, T: Debug + 'a>(
    f: &mut fmt::Formatter<'_>,
    items: impl IntoIterator<Item = &'a T>,
) -> fmt::Result {
    let rendered: Vec<String> = items.into_iter().map(|item| format!("{item:?}")).collect();
    write!(f, "{{{}}}", rendered.join(", "))
}

impl<Q: State, S: Symbol> Display for Definition<Q, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Finite Automaton:")?;
        write!(f, "  Q (States): ")?;
        write_set(f, &self.states)?;
        write!(f, "\n  Σ (Alphabet): ")?;
        write_set(f, &self.alphabet)?;
        writeln!(f, "\n  q0 (Initial): {:?}", self.initial_state)?;
        write!(f, "  F (Accepting): ")?;
        write_set(f, &self.accepting_states)?;
        writeln!(f, "\n  δ (Transitions):")?;
        for (from, symbol, to) in self.transitions() {
            writeln!(f, "    δ({from:?}, {symbol:?}) = {to:?}")?;
        }
        Ok(())
    }
}
