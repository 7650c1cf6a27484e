//! Remainder of a binary number divided by three.
//!
//! The automaton reads the number most significant bit first. Reading bit
//! `b` in remainder `r` moves to remainder `(2r + b) mod 3`; every state is
//! accepting, so the answer is simply the final state.
//!
//! | state | '0' | '1' |
//! |-------|-----|-----|
//! | S0    | S0  | S1  |
//! | S1    | S2  | S0  |
//! | S2    | S1  | S2  |

use crate::automaton::Automaton;
use crate::error::{FsmResult, ValidationError};
use serde::Serialize;
use std::fmt;

/// A state of the mod-three automaton, named after the remainder it stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Remainder {
    S0,
    S1,
    S2,
}

impl Remainder {
    pub const ALL: [Remainder; 3] = [Remainder::S0, Remainder::S1, Remainder::S2];

    /// The remainder as a number.
    pub fn value(self) -> u8 {
        match self {
            Remainder::S0 => 0,
            Remainder::S1 => 1,
            Remainder::S2 => 2,
        }
    }
}

impl fmt::Display for Remainder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.value())
    }
}

/// The mod-three automaton over the alphabet {'0', '1'}.
pub fn automaton() -> Result<Automaton<Remainder, char>, ValidationError> {
    use Remainder::*;

    Automaton::builder(S0)
        .with_states(Remainder::ALL)
        .with_alphabet(['0', '1'])
        .with_accepting_states(Remainder::ALL)
        .with_transitions([
            (S0, '0', S0),
            (S0, '1', S1),
            (S1, '0', S2),
            (S1, '1', S0),
            (S2, '0', S1),
            (S2, '1', S2),
        ])
        .build()
}

/// Remainder of the binary number `input` divided by three.
///
/// The empty string reads as zero.
///
/// ```
/// use finite_automaton::mod_three::mod_three;
///
/// assert_eq!(mod_three("110")?, 0);
/// assert_eq!(mod_three("1010")?, 1);
/// assert!(mod_three("12").is_err());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn mod_three(input: &str) -> FsmResult<u8, Remainder, char> {
    let mut automaton = automaton()?;
    automaton.process_input(input.chars())?;
    Ok(automaton.current_state().value())
}

/// Like [`mod_three`], also returning every state visited.
pub fn mod_three_with_trace(input: &str) -> FsmResult<(u8, Vec<Remainder>), Remainder, char> {
    let mut automaton = automaton()?;
    let result = automaton.process_input_with_trace(input.chars())?;
    Ok((result.final_state.value(), result.trace))
}
