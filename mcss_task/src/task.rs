use std::sync::Arc;
use std::time::Instant;

use mcss_common::{JobType, MatchingPolicy};
use mcss_subgraph::{McsOracle, MolecularGraph, Normalizer, PairwiseOracle, StripHydrogens};
use tracing::info;

use crate::error::TaskError;
use crate::reduce::{self, Reducer};
use crate::result::ResultCollection;

/// One schedulable reduction over an ordered list of graphs.
///
/// `graphs[0]` is the initial seed. The task is consumed by
/// [`ReductionTask::execute`], so it runs at most once.
pub struct ReductionTask {
    graphs: Vec<MolecularGraph>,
    job_type: JobType,
    task_id: usize,
    policy: MatchingPolicy,
    oracle: Arc<dyn PairwiseOracle>,
    normalizer: Arc<dyn Normalizer>,
}

impl ReductionTask {
    /// A task with the exact matching policy, the [`McsOracle`] and the
    /// [`StripHydrogens`] normalizer.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::EmptyInput`] if `graphs` is empty.
    pub fn new(graphs: Vec<MolecularGraph>, job_type: JobType, task_id: usize) -> Result<Self, TaskError> {
        if graphs.is_empty() {
            return Err(TaskError::EmptyInput);
        }
        Ok(Self {
            graphs,
            job_type,
            task_id,
            policy: MatchingPolicy::default(),
            oracle: Arc::new(McsOracle::default()),
            normalizer: Arc::new(StripHydrogens),
        })
    }

    /// Compare atoms and bonds under `policy`.
    pub fn with_policy(mut self, policy: MatchingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Use `oracle` for every pairwise comparison.
    pub fn with_oracle(self, oracle: impl PairwiseOracle + 'static) -> Self {
        self.with_shared_oracle(Arc::new(oracle))
    }

    /// Use an oracle shared with other tasks.
    pub fn with_shared_oracle(mut self, oracle: Arc<dyn PairwiseOracle>) -> Self {
        self.oracle = oracle;
        self
    }

    /// Normalize targets of the single reducer with `normalizer`.
    pub fn with_normalizer(mut self, normalizer: impl Normalizer + 'static) -> Self {
        self.normalizer = Arc::new(normalizer);
        self
    }

    /// Identifier used in log records and the result.
    pub const fn task_id(&self) -> usize {
        self.task_id
    }

    /// Which reducer [`ReductionTask::execute`] runs.
    pub const fn job_type(&self) -> JobType {
        self.job_type
    }

    /// The matching policy handed to the oracle.
    pub const fn policy(&self) -> &MatchingPolicy {
        &self.policy
    }

    /// Input graphs, seed first.
    pub fn graphs(&self) -> &[MolecularGraph] {
        &self.graphs
    }

    /// Run the reduction. Failures are absorbed into the returned
    /// collection; see [`ResultCollection::status`].
    pub fn execute(self) -> ResultCollection {
        let start = Instant::now();
        info!(
            task_id = self.task_id,
            graphs = self.graphs.len(),
            job = %self.job_type,
            policy = %self.policy,
            "starting reduction"
        );

        let mut reducer = Reducer::new(
            self.task_id,
            &self.policy,
            self.oracle.as_ref(),
            self.normalizer.as_ref(),
        );
        let graphs = match self.job_type {
            JobType::Single => reduce::single::reduce(&self.graphs, &mut reducer),
            JobType::Multiple => reduce::multiple::reduce(&self.graphs, &mut reducer),
        };
        let result = ResultCollection::new(self.task_id, graphs, reducer.into_errors());

        info!(
            task_id = self.task_id,
            results = result.len(),
            status = %result.status(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "reduction done"
        );
        result
    }
}

impl std::fmt::Debug for ReductionTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReductionTask")
            .field("task_id", &self.task_id)
            .field("job_type", &self.job_type)
            .field("policy", &self.policy)
            .field("graphs", &self.graphs.len())
            .finish_non_exhaustive()
    }
}
