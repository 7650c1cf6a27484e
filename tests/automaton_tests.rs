//! Tests for automaton construction and execution.

use finite_automaton::*;
use std::cell::RefCell;

/// Accepts binary strings ending in '1'.
fn ends_in_one() -> Automaton<&'static str, char> {
    AutomatonBuilder::new("q0")
        .with_states(["q0", "q1"])
        .with_alphabet(['0', '1'])
        .with_accepting_states(["q1"])
        .with_transitions([
            ("q0", '0', "q0"),
            ("q0", '1', "q1"),
            ("q1", '0', "q0"),
            ("q1", '1', "q1"),
        ])
        .build()
        .unwrap()
}

/// Only defines transitions out of "a".
fn partial() -> Automaton<&'static str, char> {
    AutomatonBuilder::new("a")
        .with_states(["a", "b"])
        .with_alphabet(['x', 'y'])
        .with_accepting_states(["b"])
        .with_transition("a", 'x', "b")
        .build()
        .unwrap()
}

#[test]
fn test_repeated_insertion_is_idempotent() {
    let mut builder = AutomatonBuilder::new(0u8);
    builder
        .add_state(0)
        .add_state(0)
        .add_state(1)
        .add_symbol('a')
        .add_symbol('a')
        .add_accepting_state(1)
        .add_accepting_state(1)
        .add_transition(0, 'a', 1);

    let def = builder.definition();
    assert_eq!(def.states().len(), 2);
    assert_eq!(def.alphabet().len(), 1);
    assert_eq!(def.accepting_states().len(), 1);
    assert_eq!(def.transition_count(), 1);
}

#[test]
fn test_later_transition_overwrites_earlier() {
    let automaton = AutomatonBuilder::new(0u8)
        .with_states([0, 1, 2])
        .with_alphabet(['a'])
        .with_transition(0, 'a', 1)
        .with_transition(0, 'a', 2)
        .build()
        .unwrap();

    assert_eq!(automaton.definition().transition(&0, &'a'), Some(&2));
    assert_eq!(automaton.definition().transition_count(), 1);
}

#[test]
fn test_insertion_order_does_not_matter() {
    let automaton = AutomatonBuilder::new("s")
        .with_transition("s", 'a', "t")
        .with_accepting_states(["t"])
        .with_alphabet(['a'])
        .with_states(["t", "s"])
        .build()
        .unwrap();

    assert_eq!(automaton.initial_state(), &"s");
    assert!(automaton.is_accepting_state(&"t"));
}

#[test]
fn test_new_automaton_starts_in_initial_state() {
    let automaton = ends_in_one();
    assert_eq!(automaton.current_state(), &"q0");
    assert!(!automaton.is_current_state_accepting());
}

#[test]
fn test_step_moves_current_state() {
    let mut automaton = ends_in_one();
    assert_eq!(automaton.step(&'1').unwrap(), &"q1");
    assert!(automaton.is_current_state_accepting());
    assert_eq!(automaton.step(&'0').unwrap(), &"q0");
}

#[test]
fn test_step_rejects_symbol_outside_alphabet() {
    let mut automaton = ends_in_one();
    let err = automaton.step(&'2').unwrap_err();
    assert_eq!(err, StepError::SymbolNotInAlphabet { symbol: '2' });
    assert_eq!(automaton.current_state(), &"q0");
}

#[test]
fn test_step_reports_undefined_transition() {
    let mut automaton = partial();
    let err = automaton.step(&'y').unwrap_err();
    assert_eq!(
        err,
        StepError::UndefinedTransition {
            state: "a",
            symbol: 'y'
        }
    );
    assert_eq!(automaton.current_state(), &"a");
}

#[test]
fn test_alphabet_is_checked_before_transition_table() {
    let mut automaton = partial();
    automaton.step(&'x').unwrap();
    // "b" has no transitions at all, but the unknown symbol is reported first.
    let err = automaton.step(&'z').unwrap_err();
    assert!(matches!(err, StepError::SymbolNotInAlphabet { symbol: 'z' }));
}

#[test]
fn test_reset_is_idempotent() {
    let mut automaton = ends_in_one();
    automaton.step(&'1').unwrap();
    automaton.reset();
    assert_eq!(automaton.current_state(), &"q0");
    automaton.reset();
    assert_eq!(automaton.current_state(), &"q0");
}

#[test]
fn test_empty_input_checks_initial_state() {
    let mut automaton = ends_in_one();
    assert!(!automaton.process_input("".chars()).unwrap());

    let result = automaton.process_input_with_trace("".chars()).unwrap();
    assert_eq!(result.trace, ["q0"]);
    assert_eq!(result.final_state, "q0");
    assert_eq!(result.steps(), 0);
}

#[test]
fn test_process_input_reports_acceptance() {
    let mut automaton = ends_in_one();
    assert!(automaton.process_input("0101".chars()).unwrap());
    assert!(!automaton.process_input("0110".chars()).unwrap());
}

#[test]
fn test_processing_always_starts_from_initial_state() {
    let mut automaton = ends_in_one();
    automaton.step(&'1').unwrap();

    let result = automaton.process_input_with_trace("0".chars()).unwrap();
    assert_eq!(result.trace, ["q0", "q0"]);
}

#[test]
fn test_trace_has_one_more_state_than_input() {
    let mut automaton = ends_in_one();
    let input = "1100101";
    let result = automaton.process_input_with_trace(input.chars()).unwrap();
    assert_eq!(result.trace.len(), input.len() + 1);
    assert_eq!(result.trace.first(), Some(&"q0"));
    assert_eq!(result.trace.last(), Some(&result.final_state));
    assert_eq!(result.trace.last(), Some(automaton.current_state()));
}

#[test]
fn test_processing_is_deterministic() {
    let mut automaton = ends_in_one();
    let first = automaton.process_input_with_trace("10011".chars()).unwrap();
    let second = automaton.process_input_with_trace("10011".chars()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_batch_matches_step_by_step() {
    let mut batch = ends_in_one();
    let mut stepped = ends_in_one();

    let input = ['1', '0', '1', '1', '0'];
    let result = batch.process_input_with_trace(input).unwrap();

    let mut trace = vec![*stepped.current_state()];
    for symbol in &input {
        trace.push(*stepped.step(symbol).unwrap());
    }

    assert_eq!(result.trace, trace);
    assert_eq!(result.accepted, stepped.is_current_state_accepting());
}

#[test]
fn test_process_error_carries_position_and_partial_trace() {
    let mut automaton = ends_in_one();
    let err = automaton.process_input_with_trace("10a1".chars()).unwrap_err();

    assert_eq!(err.position, 2);
    assert_eq!(err.source, StepError::SymbolNotInAlphabet { symbol: 'a' });
    assert_eq!(err.trace, ["q0", "q1", "q0"]);
    assert_eq!(automaton.current_state(), &"q0");
}

#[test]
fn test_automaton_is_reusable_after_error() {
    let mut automaton = partial();
    assert!(automaton.process_input("xy".chars()).is_err());
    assert!(automaton.process_input("x".chars()).unwrap());
}

#[test]
fn test_accepts_borrowed_and_owned_symbols() {
    let mut automaton = ends_in_one();
    let symbols = vec!['0', '1'];
    assert!(automaton.process_input(&symbols).unwrap());
    assert!(automaton.process_input(symbols).unwrap());
}

#[test]
fn test_closure_observer_sees_every_transition() {
    let mut automaton = ends_in_one();
    let seen = RefCell::new(Vec::new());
    let mut observer = |from: &&'static str, symbol: &char, to: &&'static str| {
        seen.borrow_mut().push((*from, *symbol, *to));
    };

    let result = automaton
        .process_observed("10".chars(), &mut observer)
        .unwrap();

    assert!(!result.accepted);
    assert_eq!(
        seen.into_inner(),
        [("q0", '1', "q1"), ("q1", '0', "q0")]
    );
}

#[derive(Default)]
struct Counting {
    transitions: usize,
    results: usize,
    errors: usize,
}

impl Observer<&'static str, char> for Counting {
    fn on_transition(&mut self, _: &&'static str, _: &char, _: &&'static str) {
        self.transitions += 1;
    }

    fn on_result(&mut self, _: &ProcessResult<&'static str>) {
        self.results += 1;
    }

    fn on_error(&mut self, _: &ProcessError<&'static str, char>) {
        self.errors += 1;
    }
}

#[test]
fn test_observer_is_told_about_results_and_errors() {
    let mut automaton = ends_in_one();
    let mut counting = Counting::default();

    automaton
        .process_observed("11".chars(), &mut counting)
        .unwrap();
    automaton
        .process_observed("1x".chars(), &mut counting)
        .unwrap_err();

    assert_eq!(counting.transitions, 3);
    assert_eq!(counting.results, 1);
    assert_eq!(counting.errors, 1);
}

#[test]
fn test_tracing_observer_does_not_affect_result() {
    let mut automaton = ends_in_one();
    let observed = automaton
        .process_observed("011".chars(), &mut TracingObserver)
        .unwrap();
    let plain = automaton.process_input_with_trace("011".chars()).unwrap();
    assert_eq!(observed, plain);
}

#[test]
fn test_display_lists_the_five_tuple() {
    let automaton = ends_in_one();
    let rendered = automaton.to_display_string();

    assert!(rendered.contains("Q (States): {\"q0\", \"q1\"}"));
    assert!(rendered.contains("q0 (Initial): \"q0\""));
    assert!(rendered.contains("δ(\"q0\", '1') = \"q1\""));
    assert!(rendered.contains("Current state: \"q0\""));
}

#[test]
fn test_string_states_and_integer_symbols() {
    let mut automaton = AutomatonBuilder::new(String::from("idle"))
        .with_states(["idle".to_string(), "busy".to_string()])
        .with_alphabet([1u32, 2])
        .with_accepting_states(["idle".to_string()])
        .with_transition("idle".to_string(), 1, "busy".to_string())
        .with_transition("busy".to_string(), 2, "idle".to_string())
        .build()
        .unwrap();

    assert!(automaton.process_input([1u32, 2, 1, 2]).unwrap());
    assert!(!automaton.process_input([1u32]).unwrap());
}
