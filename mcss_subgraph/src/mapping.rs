use serde::{Deserialize, Serialize};

use crate::error::GraphError;
use crate::model::MolecularGraph;

/// One common-substructure embedding: `(query atom, target atom)` pairs
/// sorted by query atom.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AtomMapping {
    pairs: Vec<(usize, usize)>,
}

impl AtomMapping {
    /// Build a mapping; pairs are sorted by query atom.
    pub fn new(mut pairs: Vec<(usize, usize)>) -> Self {
        pairs.sort_unstable();
        Self { pairs }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.pairs
    }

    /// Mapped query atoms, ascending.
    pub fn query_atoms(&self) -> impl Iterator<Item = usize> + '_ {
        self.pairs.iter().map(|(q, _)| *q)
    }

    /// Mapped target atoms, in query order.
    pub fn target_atoms(&self) -> impl Iterator<Item = usize> + '_ {
        self.pairs.iter().map(|(_, t)| *t)
    }

    /// The subgraph of `query` induced by the mapped query atoms, atoms in
    /// ascending query index.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::AtomOutOfRange`] if the mapping names an atom
    /// `query` does not have.
    pub fn induced_on(&self, query: &MolecularGraph) -> Result<MolecularGraph, GraphError> {
        let atoms: Vec<usize> = self.query_atoms().collect();
        query.induced_subgraph(&atoms)
    }
}

impl FromIterator<(usize, usize)> for AtomMapping {
    fn from_iter<I: IntoIterator<Item = (usize, usize)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
