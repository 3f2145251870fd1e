use std::sync::Arc;

use itertools::Itertools;
use mcss_common::{Config, JobType};
use mcss_subgraph::{McsOracle, MolecularGraph, PairwiseOracle};
use rayon::prelude::*;
use tracing::{info, warn};

use crate::error::BatchError;
use crate::result::{ReductionStatus, ResultCollection};
use crate::task::ReductionTask;

/// Final graphs of a batch run plus some bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    /// Result graphs of the last task, or nothing.
    pub graphs: Vec<MolecularGraph>,
    /// Rounds executed, the final single-task round included.
    pub rounds: usize,
    /// Tasks executed over all rounds.
    pub tasks: usize,
    /// Tasks that absorbed at least one failure.
    pub degraded: usize,
}

/// Splits a collection into tasks and reduces it round by round on a rayon
/// pool until one task covers what is left.
pub struct BatchRunner {
    config: Config,
    /// Built from the config on [`BatchRunner::run`] when not supplied.
    oracle: Option<Arc<dyn PairwiseOracle>>,
}

impl BatchRunner {
    /// A runner for `config`. Nothing is validated until [`BatchRunner::run`].
    pub const fn new(config: Config) -> Self {
        Self { config, oracle: None }
    }

    /// Share `oracle` between all tasks instead of an [`McsOracle`].
    pub fn with_oracle(mut self, oracle: Arc<dyn PairwiseOracle>) -> Self {
        self.oracle = Some(oracle);
        self
    }

    /// The configuration this runner was built with.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Reduce `graphs` to their common substructure(s).
    ///
    /// # Errors
    ///
    /// Returns [`BatchError`] for a chunk size below 2, any other invalid
    /// configuration value, or if the thread pool cannot be built.
    /// Reduction failures never surface here; they are counted in
    /// [`BatchOutcome::degraded`].
    pub fn run(&self, graphs: Vec<MolecularGraph>) -> Result<BatchOutcome, BatchError> {
        let chunk_size = self.config.chunk_size;
        if chunk_size < 2 {
            return Err(BatchError::InvalidChunkSize(chunk_size));
        }
        self.config.validate()?;
        let oracle: Arc<dyn PairwiseOracle> = match &self.oracle {
            Some(oracle) => Arc::clone(oracle),
            None => Arc::new(McsOracle::from_config(&self.config)),
        };
        let mut outcome = BatchOutcome::default();
        if graphs.is_empty() {
            return Ok(outcome);
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.threads)
            .build()?;

        let mut current = graphs;
        loop {
            if current.len() <= chunk_size {
                let result = self.run_round(&pool, &oracle, vec![current], &mut outcome);
                outcome.graphs = result.into_iter().flatten().collect();
                return Ok(outcome);
            }

            let before = current.len();
            let chunks: Vec<Vec<MolecularGraph>> = current
                .into_iter()
                .chunks(chunk_size)
                .into_iter()
                .map(Iterator::collect)
                .collect();
            let results = self.run_round(&pool, &oracle, chunks, &mut outcome);

            if self.config.job_type == JobType::Multiple && results.iter().any(ResultCollection::is_empty) {
                info!(round = outcome.rounds, "a chunk has no common substructure");
                return Ok(outcome);
            }

            current = results.into_iter().flatten().collect();
            info!(round = outcome.rounds, before, after = current.len(), "round done");
            if current.is_empty() {
                return Ok(outcome);
            }
            if current.len() >= before {
                warn!(graphs = current.len(), "round did not shrink the input, finishing with one task");
                let result = self.run_round(&pool, &oracle, vec![current], &mut outcome);
                outcome.graphs = result.into_iter().flatten().collect();
                return Ok(outcome);
            }
        }
    }

    /// Run one task per chunk in parallel; results come back in chunk order.
    fn run_round(
        &self,
        pool: &rayon::ThreadPool,
        oracle: &Arc<dyn PairwiseOracle>,
        chunks: Vec<Vec<MolecularGraph>>,
        outcome: &mut BatchOutcome,
    ) -> Vec<ResultCollection> {
        let first_id = outcome.tasks;
        let tasks: Vec<ReductionTask> = chunks
            .into_iter()
            .filter(|chunk| !chunk.is_empty())
            .enumerate()
            .filter_map(|(i, chunk)| ReductionTask::new(chunk, self.config.job_type, first_id + i).ok())
            .map(|task| {
                task.with_policy(self.config.policy)
                    .with_shared_oracle(Arc::clone(oracle))
            })
            .collect();

        outcome.rounds += 1;
        outcome.tasks += tasks.len();
        let results: Vec<ResultCollection> =
            pool.install(|| tasks.into_par_iter().map(ReductionTask::execute).collect());
        outcome.degraded += results
            .iter()
            .filter(|r| r.status() == ReductionStatus::Degraded)
            .count();
        results
    }
}
