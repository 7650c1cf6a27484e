//! NDJSON recording of automaton runs.
//!
//! A [`Recorder`] is an [`Observer`] that writes one JSON object per line for
//! every transition and for the outcome of each run:
//!
//! ```json
//! {"event":"transition","step":0,"from":"S0","symbol":"1","to":"S1"}
//! {"event":"result","accepted":true,"final_state":"S1","steps":1}
//! ```
//!
//! Observer callbacks cannot fail, so the first write error is kept and
//! returned by [`Recorder::finish`]; later events are dropped.

use crate::automaton::{Observer, ProcessResult};
use crate::definition::{State, Symbol};
use crate::error::{ProcessError, RecordError};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, warn};

#[derive(Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum Event<'a, Q, S> {
    Transition {
        step: usize,
        from: &'a Q,
        symbol: &'a S,
        to: &'a Q,
    },
    Result {
        accepted: bool,
        final_state: &'a Q,
        steps: usize,
    },
    Error {
        position: usize,
        message: String,
    },
}

/// Records run events as NDJSON.
pub struct Recorder<W: Write> {
    writer: W,
    count: usize,
    step: usize,
    failure: Option<RecordError>,
}

impl Recorder<BufWriter<File>> {
    /// Create a recorder writing to the given file path.
    pub fn create(path: &Path) -> Result<Self, RecordError> {
        let file = File::create(path)?;
        debug!(path = %path.display(), "Recording runs");
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> Recorder<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            count: 0,
            step: 0,
            failure: None,
        }
    }

    /// Number of lines written so far.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Flush buffered output and return the number of lines written, or the
    /// first error hit while recording.
    pub fn finish(self) -> Result<usize, RecordError> {
        self.into_inner().map(|(_, count)| count)
    }

    /// Like [`finish`](Self::finish), also handing back the writer.
    pub fn into_inner(mut self) -> Result<(W, usize), RecordError> {
        if let Some(err) = self.failure.take() {
            return Err(err);
        }
        self.writer.flush()?;
        Ok((self.writer, self.count))
    }

    fn emit<Q: Serialize, S: Serialize>(&mut self, event: &Event<'_, Q, S>) {
        if self.failure.is_some() {
            return;
        }
        if let Err(err) = self.write_line(event) {
            warn!(error = %err, "Failed to record event, further events are dropped");
            self.failure = Some(err);
        }
    }

    fn write_line<Q: Serialize, S: Serialize>(
        &mut self,
        event: &Event<'_, Q, S>,
    ) -> Result<(), RecordError> {
        serde_json::to_writer(&mut self.writer, event)?;
        self.writer.write_all(b"\n")?;
        self.count += 1;
        Ok(())
    }
}

impl<W, Q, S> Observer<Q, S> for Recorder<W>
where
    W: Write,
    Q: State + Serialize,
    S: Symbol + Serialize,
{
    fn on_transition(&mut self, from: &Q, symbol: &S, to: &Q) {
        let step = self.step;
        self.step += 1;
        self.emit::<Q, S>(&Event::Transition {
            step,
            from,
            symbol,
            to,
        });
    }

    fn on_result(&mut self, result: &ProcessResult<Q>) {
        self.step = 0;
        self.emit::<Q, S>(&Event::Result {
            accepted: result.accepted,
            final_state: &result.final_state,
            steps: result.steps(),
        });
    }

    fn on_error(&mut self, error: &ProcessError<Q, S>) {
        self.step = 0;
        self.emit::<Q, S>(&Event::Error {
            position: error.position,
            message: error.to_string(),
        });
    }
}
