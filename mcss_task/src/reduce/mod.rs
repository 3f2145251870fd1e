//! The two reduction strategies and the comparison plumbing they share.

pub(crate) mod multiple;
pub(crate) mod single;

use std::any::Any;
use std::collections::BTreeSet;
use std::panic::{self, AssertUnwindSafe};

use mcss_common::MatchingPolicy;
use mcss_subgraph::{MolecularGraph, Normalizer, PairwiseOracle, to_canonical_string};
use tracing::error;

use crate::error::ReduceError;
use crate::fragment::Fragment;

/// Everything one reduction pass needs besides its input graphs.
pub(crate) struct Reducer<'a> {
    pub(crate) task_id: usize,
    policy: &'a MatchingPolicy,
    oracle: &'a dyn PairwiseOracle,
    pub(crate) normalizer: &'a dyn Normalizer,
    errors: Vec<ReduceError>,
}

impl<'a> Reducer<'a> {
    pub(crate) fn new(
        task_id: usize,
        policy: &'a MatchingPolicy,
        oracle: &'a dyn PairwiseOracle,
        normalizer: &'a dyn Normalizer,
    ) -> Self {
        Reducer {
            task_id,
            policy,
            oracle,
            normalizer,
            errors: Vec::new(),
        }
    }

    /// Run the oracle and turn every mapping into a fragment of `query`.
    ///
    /// Only a failing or panicking oracle fails the comparison. A mapping
    /// that induces no valid fragment is absorbed and the others are kept.
    pub(crate) fn compare(
        &mut self,
        query: &MolecularGraph,
        target: &MolecularGraph,
        stage: &str,
        index: usize,
    ) -> Result<BTreeSet<Fragment>, ReduceError> {
        let mappings = panic::catch_unwind(AssertUnwindSafe(|| {
            self.oracle.compare(query, target, self.policy)
        }))
        .map_err(|payload| ReduceError::unexpected(panic_message(&*payload)))??;

        let mut fragments = BTreeSet::new();
        for mapping in &mappings {
            match Fragment::from_mapping(mapping, query) {
                Ok(fragment) => {
                    fragments.insert(fragment);
                }
                Err(err) => self.absorb(err.into(), stage, index),
            }
        }
        Ok(fragments)
    }

    /// Log and keep `err`.
    pub(crate) fn absorb(&mut self, err: ReduceError, stage: &str, index: usize) {
        error!(task_id = self.task_id, stage, index, "{err}");
        self.errors.push(err);
    }

    pub(crate) fn into_errors(self) -> Vec<ReduceError> {
        self.errors
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "oracle panicked".to_owned()
    }
}

/// Log-friendly rendering of a graph.
pub(crate) fn describe(graph: &MolecularGraph) -> String {
    to_canonical_string(graph).unwrap_or_else(|e| e.to_string())
}
