use std::cmp::Ordering;
use std::fmt;

use contracts::*;
use mcss_subgraph::{AtomMapping, MolecularGraph, canonical_key};

use crate::error::FragmentError;

/// One candidate common substructure.
///
/// Fragments compare by `(atom count, bond count, canonical key)` only, so
/// structurally identical candidates collapse in a set regardless of atom
/// numbering or name.
#[derive(Clone, Debug)]
pub struct Fragment {
    graph: MolecularGraph,
    key: String,
}

impl Fragment {
    /// Wrap a graph.
    ///
    /// # Errors
    ///
    /// Returns [`FragmentError`] if `graph` is empty or invalid.
    pub fn new(graph: MolecularGraph) -> Result<Self, FragmentError> {
        if graph.is_empty() {
            return Err(FragmentError::Empty);
        }
        graph.validate()?;
        let key = canonical_key(&graph);
        Ok(Self { graph, key })
    }

    /// The fragment `mapping` induces on `query`.
    ///
    /// # Errors
    ///
    /// Returns [`FragmentError`] if the mapping is empty or names atoms
    /// outside `query`.
    pub fn from_mapping(mapping: &AtomMapping, query: &MolecularGraph) -> Result<Self, FragmentError> {
        if mapping.is_empty() {
            return Err(FragmentError::Empty);
        }
        Self::new(mapping.induced_on(query)?)
    }

    /// The fragment's structure.
    pub const fn graph(&self) -> &MolecularGraph {
        &self.graph
    }

    /// Unwrap the graph.
    pub fn into_graph(self) -> MolecularGraph {
        self.graph
    }

    /// Atoms in the fragment, never zero.
    #[ensures(ret > 0)]
    pub fn atom_count(&self) -> usize {
        self.graph.atom_count()
    }

    /// Bonds in the fragment.
    pub fn bond_count(&self) -> usize {
        self.graph.bond_count()
    }

    /// Canonical key; equal for isomorphic fragments.
    pub fn key(&self) -> &str {
        &self.key
    }

    fn signature(&self) -> (usize, usize, &str) {
        (self.atom_count(), self.bond_count(), &self.key)
    }
}

impl PartialEq for Fragment {
    fn eq(&self, other: &Self) -> bool {
        self.signature() == other.signature()
    }
}

impl Eq for Fragment {}

impl PartialOrd for Fragment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fragment {
    fn cmp(&self, other: &Self) -> Ordering {
        self.signature().cmp(&other.signature())
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match mcss_subgraph::to_canonical_string(&self.graph) {
            Ok(s) => write!(f, "{s}"),
            Err(_) => write!(f, "{}", self.key),
        }
    }
}
