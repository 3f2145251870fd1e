use contracts::*;
use mcss_common::{Config, DEFAULT_MAX_MAPPINGS, MatchingPolicy};
use tracing::trace;

use crate::error::{GraphRole, OracleError};
use crate::index::Index;
use crate::mapping::AtomMapping;
use crate::model::MolecularGraph;
use crate::profiling::Timer;
use crate::search::{Collector, backtrack};
use crate::state::State;

/// Pairwise maximum common substructure search.
///
/// Every returned mapping has the same, maximum size and induces a connected
/// fragment on `query`. An empty vector means the two graphs share no atom
/// under `policy`.
pub trait PairwiseOracle: Send + Sync {
    /// Compare `query` against `target`.
    ///
    /// # Errors
    ///
    /// Implementations return an [`OracleError`] when the comparison cannot
    /// be carried out.
    fn compare(
        &self,
        query: &MolecularGraph,
        target: &MolecularGraph,
        policy: &MatchingPolicy,
    ) -> Result<Vec<AtomMapping>, OracleError>;
}

impl<T: PairwiseOracle + ?Sized> PairwiseOracle for &T {
    fn compare(
        &self,
        query: &MolecularGraph,
        target: &MolecularGraph,
        policy: &MatchingPolicy,
    ) -> Result<Vec<AtomMapping>, OracleError> {
        (**self).compare(query, target, policy)
    }
}

/// Exact backtracking search over query atoms.
///
/// Tied mappings covering the same query atoms yield the same fragment, so
/// only the first one found is kept. At most `max_mappings` ties are
/// returned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct McsOracle {
    max_mappings: usize,
}

impl McsOracle {
    #[requires(max_mappings > 0)]
    pub fn new(max_mappings: usize) -> Self {
        Self { max_mappings }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.max_mappings)
    }

    pub const fn max_mappings(&self) -> usize {
        self.max_mappings
    }
}

impl Default for McsOracle {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_MAPPINGS)
    }
}

impl PairwiseOracle for McsOracle {
    fn compare(
        &self,
        query: &MolecularGraph,
        target: &MolecularGraph,
        policy: &MatchingPolicy,
    ) -> Result<Vec<AtomMapping>, OracleError> {
        let _t = Timer::new("McsOracle::compare");

        query.validate().map_err(|source| OracleError::InvalidGraph {
            role: GraphRole::Query,
            source,
        })?;
        target.validate().map_err(|source| OracleError::InvalidGraph {
            role: GraphRole::Target,
            source,
        })?;

        if query.is_empty() || target.is_empty() {
            return Ok(Vec::new());
        }

        let q_index = Index::build(query);
        let t_index = Index::build(target);
        let mut state = State::new(q_index.atom_count(), t_index.atom_count());
        let mut acc = Collector::new(self.max_mappings);

        backtrack(0, &q_index, &t_index, &mut state, &mut acc, policy);

        trace!(
            query_atoms = query.atom_count(),
            target_atoms = target.atom_count(),
            found = acc.out.len(),
            size = acc.out.first().map_or(0, AtomMapping::len),
            "pairwise comparison finished"
        );
        Ok(acc.out)
    }
}
