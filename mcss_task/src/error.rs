//! Error types for fragments, reductions, tasks and batches.

use mcss_common::ConfigError;
use mcss_subgraph::{GraphError, OracleError};
use thiserror::Error;

/// An oracle mapping could not be turned into a fragment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FragmentError {
    /// The mapping covers no atoms.
    #[error("Fragment has no atoms")]
    Empty,

    /// The induced graph could not be built or does not validate.
    #[error("Malformed fragment: {0}")]
    Malformed(#[from] GraphError),
}

/// A failure absorbed during a reduction.
///
/// Reducers never return these; they log them, record them in the
/// [`crate::ResultCollection`] and degrade.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReduceError {
    /// The pairwise oracle rejected a comparison.
    #[error("Oracle failure: {0}")]
    Oracle(#[from] OracleError),

    /// An oracle mapping did not yield a valid fragment.
    #[error(transparent)]
    MalformedFragment(#[from] FragmentError),

    /// The oracle panicked.
    #[error("Unexpected failure: {0}")]
    Unexpected(String),
}

impl ReduceError {
    /// Create an unexpected failure.
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::Unexpected(msg.into())
    }
}

/// A task could not be created.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    /// A reduction needs at least one graph.
    #[error("Reduction task needs at least one input graph")]
    EmptyInput,
}

/// A batch run could not be carried out.
#[derive(Debug, Error)]
pub enum BatchError {
    /// Chunks must hold at least two graphs.
    #[error("Chunk size must be at least 2, got {0}")]
    InvalidChunkSize(usize),

    /// Another configuration value is out of range.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The rayon pool could not be built.
    #[error("Failed to build thread pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}
