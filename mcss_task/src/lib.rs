//! Multi-graph maximum common substructure reduction.
//!
//! A [`ReductionTask`] folds an ordered list of graphs into either one
//! representative common substructure ([`JobType::Single`]) or the complete
//! set of tied minimal ones ([`JobType::Multiple`]) by repeated pairwise
//! comparisons through a [`mcss_subgraph::PairwiseOracle`]. The
//! [`BatchRunner`] spreads a large collection over many tasks.

pub mod error;

mod batch;
mod fragment;
mod frontier;
mod reduce;
mod result;
mod task;

pub use crate::batch::{BatchOutcome, BatchRunner};
pub use crate::error::{BatchError, FragmentError, ReduceError, TaskError};
pub use crate::fragment::Fragment;
pub use crate::frontier::Frontier;
pub use crate::result::{ReductionStatus, ResultCollection};
pub use crate::task::ReductionTask;
pub use mcss_common::{JobType, MatchingPolicy};
