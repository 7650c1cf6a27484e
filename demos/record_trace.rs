//! Example: record automaton runs as NDJSON.
//!
//! Writes one line per transition and one per run outcome.
//!
//! Run with: cargo run --example record_trace

use finite_automaton::mod_three::{self, Remainder};
use finite_automaton::{Observer, ProcessError, ProcessResult, Recorder, TracingObserver};
use std::io::Write;
use std::path::Path;

/// Fans events out to a recorder and to `tracing`.
struct Both<'a, W: Write> {
    recorder: &'a mut Recorder<W>,
    log: TracingObserver,
}

impl<W: Write> Both<'_, W> {
    fn recorder(&mut self) -> &mut dyn Observer<Remainder, char> {
        &mut *self.recorder
    }

    fn log(&mut self) -> &mut dyn Observer<Remainder, char> {
        &mut self.log
    }
}

impl<W: Write> Observer<Remainder, char> for Both<'_, W> {
    fn on_transition(&mut self, from: &Remainder, symbol: &char, to: &Remainder) {
        self.recorder().on_transition(from, symbol, to);
        self.log().on_transition(from, symbol, to);
    }

    fn on_result(&mut self, result: &ProcessResult<Remainder>) {
        self.recorder().on_result(result);
        self.log().on_result(result);
    }

    fn on_error(&mut self, error: &ProcessError<Remainder, char>) {
        self.recorder().on_error(error);
        self.log().on_error(error);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    let path = Path::new("target/mod_three_runs.ndjson");
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut automaton = mod_three::automaton()?;
    let mut recorder = Recorder::create(path)?;

    for input in ["110", "101", "12"] {
        let mut observer = Both {
            recorder: &mut recorder,
            log: TracingObserver,
        };
        match automaton.process_observed(input.chars(), &mut observer) {
            Ok(result) => println!("{input}: final state {}", result.final_state),
            Err(err) => println!("{input}: {err}"),
        }
    }

    let lines = recorder.finish()?;
    println!("Wrote {lines} events to {}", path.display());
    Ok(())
}
