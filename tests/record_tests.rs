//! Tests for NDJSON run recording.

#![cfg(feature = "record")]

use finite_automaton::mod_three;
use finite_automaton::*;
use serde_json::Value;

fn read_events(path: &std::path::Path) -> Vec<Value> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn test_recorder_creates_ndjson() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("runs.ndjson");

    let mut automaton = mod_three::automaton().unwrap();
    let mut recorder = Recorder::create(&path).unwrap();
    automaton
        .process_observed("101".chars(), &mut recorder)
        .unwrap();
    assert_eq!(recorder.count(), 4);
    assert_eq!(recorder.finish().unwrap(), 4);

    let events = read_events(&path);
    assert_eq!(events.len(), 4);
    assert_eq!(events[0]["event"], "transition");
    assert_eq!(events[0]["step"], 0);
    assert_eq!(events[0]["from"], "S0");
    assert_eq!(events[0]["symbol"], "1");
    assert_eq!(events[0]["to"], "S1");
    assert_eq!(events[2]["step"], 2);
    assert_eq!(events[3]["event"], "result");
    assert_eq!(events[3]["accepted"], true);
    assert_eq!(events[3]["final_state"], "S2");
    assert_eq!(events[3]["steps"], 3);
}

#[test]
fn test_recorder_logs_errors_and_restarts_step_count() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("runs.ndjson");

    let mut automaton = mod_three::automaton().unwrap();
    let mut recorder = Recorder::create(&path).unwrap();
    automaton
        .process_observed("12".chars(), &mut recorder)
        .unwrap_err();
    automaton
        .process_observed("0".chars(), &mut recorder)
        .unwrap();
    recorder.finish().unwrap();

    let events = read_events(&path);
    assert_eq!(events.len(), 4);
    assert_eq!(events[1]["event"], "error");
    assert_eq!(events[1]["position"], 1);
    assert!(events[1]["message"].as_str().unwrap().contains("'2'"));
    assert_eq!(events[2]["step"], 0);
}

struct FailingWriter;

impl std::io::Write for FailingWriter {
    fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
        Err(std::io::Error::other("disk full"))
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_write_failure_surfaces_on_finish() {
    let mut automaton = mod_three::automaton().unwrap();
    let mut recorder = Recorder::new(FailingWriter);
    automaton
        .process_observed("11".chars(), &mut recorder)
        .unwrap();

    assert_eq!(recorder.count(), 0);
    assert!(recorder.finish().is_err());
}
