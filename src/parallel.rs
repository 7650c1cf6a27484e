//! Batch processing of many inputs on a rayon pool.
//!
//! The automaton is never shared mutably: each worker clones it once and
//! processes its share of the inputs on its own copy. Results come back in
//! input order.

use crate::automaton::{Automaton, ProcessResult};
use crate::builder::impl_builder;
use crate::definition::{State, Symbol};
use crate::error::{Error, ProcessError};
use rayon::prelude::*;
use tracing::info;

/// Per-input outcome of a batch.
pub type BatchResult<Q, S> = Result<ProcessResult<Q>, ProcessError<Q, S>>;

/// Configuration for [`process_batch_with`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchConfig {
    /// Upper bound on worker threads. `0` uses rayon's global pool.
    pub max_workers: usize,
}

impl_builder!(
    /// Builder for [`BatchConfig`].
    BatchConfig, BatchConfigBuilder {
        optional {
            max_workers: usize,
        }
        optional_or {}
    }
);

/// Process every input independently on the global rayon pool.
pub fn process_batch<Q, S, I>(automaton: &Automaton<Q, S>, inputs: &[I]) -> Vec<BatchResult<Q, S>>
where
    Q: State + Send + Sync,
    S: Symbol + Send + Sync,
    I: AsRef<[S]> + Sync,
{
    info!(inputs = inputs.len(), "Processing batch");
    inputs
        .par_iter()
        .map_init(
            || automaton.clone(),
            |worker, input| worker.process_input_with_trace(input.as_ref()),
        )
        .collect()
}

/// Like [`process_batch`], on a dedicated pool of at most
/// `config.max_workers` threads.
pub fn process_batch_with<Q, S, I>(
    config: &BatchConfig,
    automaton: &Automaton<Q, S>,
    inputs: &[I],
) -> Result<Vec<BatchResult<Q, S>>, Error<Q, S>>
where
    Q: State + Send + Sync,
    S: Symbol + Send + Sync,
    I: AsRef<[S]> + Sync,
{
    if config.max_workers == 0 {
        return Ok(process_batch(automaton, inputs));
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.max_workers)
        .build()
        .map_err(|e| Error::ThreadPool(e.to_string()))?;

    Ok(pool.install(|| process_batch(automaton, inputs)))
}
