//! Rule-based validation of automaton definitions.
//!
//! A [`Validator`] is an ordered list of independent rules. Every rule looks
//! at a complete [`Definition`] and reports at most one [`Violation`]; all
//! rules run, so a single pass reports every problem at once.

use crate::builder::impl_builder;
use crate::definition::{Definition, State, Symbol};
use crate::error::{TransitionRef, ValidationError, Violation};
use indexmap::IndexSet;
use std::any::Any;
use std::collections::VecDeque;
use std::fmt::{self, Debug};
use tracing::debug;

/// Default ceiling on the number of states.
pub const DEFAULT_MAX_STATES: usize = 1000;
/// Default ceiling on the alphabet size.
pub const DEFAULT_MAX_ALPHABET_SIZE: usize = 100;
/// Default ceiling on the number of transitions.
pub const DEFAULT_MAX_TRANSITIONS: usize = 10_000;
pub const STRICT_MAX_STATES: usize = 100;
pub const STRICT_MAX_ALPHABET_SIZE: usize = 50;
pub const STRICT_MAX_TRANSITIONS: usize = 1000;
/// Longest accepted state name when state names are checked.
pub const MAX_STATE_NAME_LENGTH: usize = 50;

/// Configuration for the optional validation rules.
///
/// The required rules (non-empty states and alphabet, initial and accepting
/// states inside Q, transitions inside Q × Σ × Q) are always active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Enables the unreachable-state and state-naming rules.
    pub strict_mode: bool,

    /// Every (state, symbol) pair must have a transition.
    pub require_complete_transitions: bool,

    /// Ceiling on |Q|. `None` or `Some(0)` means unlimited.
    pub max_states: Option<usize>,

    /// Ceiling on |Σ|. `None` or `Some(0)` means unlimited.
    pub max_alphabet_size: Option<usize>,

    /// Ceiling on |δ|. `None` or `Some(0)` means unlimited.
    pub max_transitions: Option<usize>,

    /// Longest textual state name accepted in strict mode.
    pub max_state_name_length: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            strict_mode: false,
            require_complete_transitions: false,
            max_states: Some(DEFAULT_MAX_STATES),
            max_alphabet_size: Some(DEFAULT_MAX_ALPHABET_SIZE),
            max_transitions: Some(DEFAULT_MAX_TRANSITIONS),
            max_state_name_length: MAX_STATE_NAME_LENGTH,
        }
    }
}

impl ValidatorConfig {
    /// Strict profile: tighter ceilings, complete transition table,
    /// reachability and naming checks.
    pub fn strict() -> Self {
        Self {
            strict_mode: true,
            require_complete_transitions: true,
            max_states: Some(STRICT_MAX_STATES),
            max_alphabet_size: Some(STRICT_MAX_ALPHABET_SIZE),
            max_transitions: Some(STRICT_MAX_TRANSITIONS),
            max_state_name_length: MAX_STATE_NAME_LENGTH,
        }
    }

    /// Only the required rules.
    pub fn permissive() -> Self {
        Self {
            max_states: None,
            max_alphabet_size: None,
            max_transitions: None,
            ..Self::default()
        }
    }
}

impl_builder!(
    /// Builder for [`ValidatorConfig`]; unset fields keep their defaults.
    ValidatorConfig, ValidatorConfigBuilder {
        optional {
            strict_mode: bool,
            require_complete_transitions: bool,
            max_state_name_length: usize,
        }
        optional_or {
            max_states: usize,
            max_alphabet_size: usize,
            max_transitions: usize,
        }
    }
);

/// A single validation rule.
pub type Rule<Q, S> = Box<dyn Fn(&Definition<Q, S>) -> Option<Violation> + Send + Sync>;

/// Ordered rule set applied to automaton definitions.
pub struct Validator<Q: State, S: Symbol> {
    config: ValidatorConfig,
    rules: Vec<Rule<Q, S>>,
}

impl<Q: State, S: Symbol> Validator<Q, S> {
    /// Build the rule list for `config`: the required rules first, then the
    /// enabled optional ones.
    pub fn new(config: ValidatorConfig) -> Self {
        let mut validator = Self {
            config: config.clone(),
            rules: Vec::new(),
        };

        validator.add_rule(non_empty_states::<Q, S>);
        validator.add_rule(non_empty_alphabet::<Q, S>);
        validator.add_rule(initial_state_in_states::<Q, S>);
        validator.add_rule(accepting_states_in_states::<Q, S>);
        validator.add_rule(transition_sources_in_states::<Q, S>);
        validator.add_rule(transition_targets_in_states::<Q, S>);
        validator.add_rule(transition_symbols_in_alphabet::<Q, S>);

        if let Some(max) = ceiling(config.max_states) {
            validator.add_rule(move |def: &Definition<Q, S>| {
                let count = def.states().len();
                (count > max).then_some(Violation::TooManyStates { count, max })
            });
        }

        if let Some(max) = ceiling(config.max_alphabet_size) {
            validator.add_rule(move |def: &Definition<Q, S>| {
                let count = def.alphabet().len();
                (count > max).then_some(Violation::AlphabetTooLarge { count, max })
            });
        }

        if let Some(max) = ceiling(config.max_transitions) {
            validator.add_rule(move |def: &Definition<Q, S>| {
                let count = def.transition_count();
                (count > max).then_some(Violation::TooManyTransitions { count, max })
            });
        }

        if config.require_complete_transitions {
            validator.add_rule(complete_transitions::<Q, S>);
        }

        if config.strict_mode {
            validator.add_rule(no_unreachable_states::<Q, S>);
            let max_len = config.max_state_name_length;
            validator.add_rule(move |def: &Definition<Q, S>| state_naming(def, max_len));
        }

        validator
    }

    /// Append a custom rule; it runs after all built-in rules.
    pub fn add_rule<F>(&mut self, rule: F) -> &mut Self
    where
        F: Fn(&Definition<Q, S>) -> Option<Violation> + Send + Sync + 'static,
    {
        self.rules.push(Box::new(rule));
        self
    }

    /// Consuming variant of [`add_rule`](Self::add_rule) for chaining.
    pub fn with_rule<F>(mut self, rule: F) -> Self
    where
        F: Fn(&Definition<Q, S>) -> Option<Violation> + Send + Sync + 'static,
    {
        self.add_rule(rule);
        self
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Run every rule and collect what they report, in rule order.
    pub fn violations(&self, definition: &Definition<Q, S>) -> Vec<Violation> {
        self.rules.iter().filter_map(|rule| rule(definition)).collect()
    }

    /// Run every rule; fail with all collected violations.
    pub fn validate(&self, definition: &Definition<Q, S>) -> Result<(), ValidationError> {
        let violations = self.violations(definition);
        match ValidationError::from_violations(violations) {
            None => {
                debug!(
                    states = definition.states().len(),
                    symbols = definition.alphabet().len(),
                    transitions = definition.transition_count(),
                    "Automaton definition is valid"
                );
                Ok(())
            }
            Some(err) => {
                debug!(violations = err.len(), "Automaton definition rejected");
                Err(err)
            }
        }
    }
}

impl<Q: State, S: Symbol> Default for Validator<Q, S> {
    fn default() -> Self {
        Self::new(ValidatorConfig::default())
    }
}

impl<Q: State, S: Symbol> Debug for Validator<Q, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("config", &self.config)
            .field("rules", &self.rules.len())
            .finish()
    }
}

fn ceiling(limit: Option<usize>) -> Option<usize> {
    limit.filter(|&max| max > 0)
}

fn show<T: Debug>(value: &T) -> String {
    format!("{value:?}")
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    (!items.is_empty()).then_some(items)
}

fn non_empty_states<Q: State, S: Symbol>(def: &Definition<Q, S>) -> Option<Violation> {
    def.states().is_empty().then_some(Violation::EmptyStates)
}

fn non_empty_alphabet<Q: State, S: Symbol>(def: &Definition<Q, S>) -> Option<Violation> {
    def.alphabet().is_empty().then_some(Violation::EmptyAlphabet)
}

fn initial_state_in_states<Q: State, S: Symbol>(def: &Definition<Q, S>) -> Option<Violation> {
    let initial = def.initial_state();
    (!def.contains_state(initial)).then(|| Violation::InitialStateNotInStates {
        state: show(initial),
    })
}

fn accepting_states_in_states<Q: State, S: Symbol>(def: &Definition<Q, S>) -> Option<Violation> {
    let states: Vec<String> = def
        .accepting_states()
        .iter()
        .filter(|state| !def.contains_state(state))
        .map(show)
        .collect();
    non_empty(states).map(|states| Violation::AcceptingStatesNotInStates { states })
}

fn transition_ref<Q: Debug, S: Debug>(from: &Q, symbol: &S, to: &Q) -> TransitionRef {
    TransitionRef {
        from: show(from),
        symbol: show(symbol),
        to: show(to),
    }
}

fn dangling_transitions<Q: State, S: Symbol>(
    def: &Definition<Q, S>,
    dangling: impl Fn(&Q, &S, &Q) -> bool,
) -> Option<Vec<TransitionRef>> {
    let transitions = def
        .transitions()
        .filter(|&(from, symbol, to)| dangling(from, symbol, to))
        .map(|(from, symbol, to)| transition_ref(from, symbol, to))
        .collect();
    non_empty(transitions)
}

fn transition_sources_in_states<Q: State, S: Symbol>(
    def: &Definition<Q, S>,
) -> Option<Violation> {
    dangling_transitions(def, |from, _, _| !def.contains_state(from))
        .map(|transitions| Violation::TransitionSourcesNotInStates { transitions })
}

fn transition_targets_in_states<Q: State, S: Symbol>(
    def: &Definition<Q, S>,
) -> Option<Violation> {
    dangling_transitions(def, |_, _, to| !def.contains_state(to))
        .map(|transitions| Violation::TransitionTargetsNotInStates { transitions })
}

fn transition_symbols_in_alphabet<Q: State, S: Symbol>(
    def: &Definition<Q, S>,
) -> Option<Violation> {
    dangling_transitions(def, |_, symbol, _| !def.contains_symbol(symbol))
        .map(|transitions| Violation::TransitionSymbolsNotInAlphabet { transitions })
}

fn complete_transitions<Q: State, S: Symbol>(def: &Definition<Q, S>) -> Option<Violation> {
    let pairs: Vec<(String, String)> = def
        .states()
        .iter()
        .flat_map(|state| {
            def.alphabet()
                .iter()
                .filter(move |symbol| def.transition(state, symbol).is_none())
                .map(move |symbol| (show(state), show(symbol)))
        })
        .collect();
    non_empty(pairs).map(|pairs| Violation::MissingTransitions { pairs })
}

/// States reachable from the initial state, in breadth-first order.
pub fn reachable_states<Q: State, S: Symbol>(def: &Definition<Q, S>) -> IndexSet<&Q> {
    let initial = def.initial_state();
    let mut reachable = IndexSet::new();
    reachable.insert(initial);

    let mut queue = VecDeque::from([initial]);
    while let Some(current) = queue.pop_front() {
        for next in def.successors(current) {
            if reachable.insert(next) {
                queue.push_back(next);
            }
        }
    }

    reachable
}

fn no_unreachable_states<Q: State, S: Symbol>(def: &Definition<Q, S>) -> Option<Violation> {
    let reachable = reachable_states(def);
    let states: Vec<String> = def
        .states()
        .iter()
        .filter(|state| !reachable.contains(state))
        .map(show)
        .collect();
    non_empty(states).map(|states| Violation::UnreachableStates { states })
}

/// The name of a textual state, or `None` for every other state type.
fn state_name<Q: State>(state: &Q) -> Option<&str> {
    let any = state as &dyn Any;
    any.downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| any.downcast_ref::<&'static str>().copied())
        .or_else(|| any.downcast_ref::<Box<str>>().map(|name| &**name))
}

fn check_state_name(name: &str, max_len: usize) -> Option<String> {
    if name.trim().is_empty() {
        return Some("state names cannot be empty or whitespace-only".to_string());
    }
    if name.split_whitespace().count() > 1 {
        return Some("name contains multiple words (consider using underscores)".to_string());
    }
    let len = name.chars().count();
    if len > max_len {
        return Some(format!("name is too long ({len} > {max_len} characters)"));
    }
    None
}

fn state_naming<Q: State, S: Symbol>(def: &Definition<Q, S>, max_len: usize) -> Option<Violation> {
    let names: Vec<(String, String)> = def
        .states()
        .iter()
        .filter_map(|state| {
            let reason = check_state_name(state_name(state)?, max_len)?;
            Some((show(state), reason))
        })
        .collect();
    non_empty(names).map(|names| Violation::InvalidStateNames { names })
}
