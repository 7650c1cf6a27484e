//! Example: remainder of binary numbers divided by three.
//!
//! Prints every transition the automaton takes, then the answer.
//!
//! Run with: cargo run --example mod_three [BINARY...]

use finite_automaton::mod_three::{self, mod_three_with_trace};

fn print_trace(input: &str) {
    println!("Input: \"{input}\"");

    let (value, trace) = match mod_three_with_trace(input) {
        Ok(outcome) => outcome,
        Err(err) => {
            println!("Error: {err}");
            return;
        }
    };

    for (i, (symbol, pair)) in input.chars().zip(trace.windows(2)).enumerate() {
        println!(
            "{}. Current state = {}, Input = {}, result state = {}",
            i + 1,
            pair[0],
            symbol,
            pair[1]
        );
    }

    println!("No more input");
    if let Some(last) = trace.last() {
        println!("Output value (output for state {last} = {value})");
    }
    println!();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("{}", mod_three::automaton()?);

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        for input in ["110", "1010", "101010", "1111", "1001", "0", "1", "102"] {
            print_trace(input);
        }
    } else {
        for input in &args {
            print_trace(input);
        }
    }

    Ok(())
}
