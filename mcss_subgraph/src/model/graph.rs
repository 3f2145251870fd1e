use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};

use super::atom::{Atom, BondOrder};
use crate::error::GraphError;

/// An undirected graph of atoms and bonds.
///
/// Atoms are addressed by their insertion index. The graph can only be
/// grown through [`MolecularGraph::add_atom`] and
/// [`MolecularGraph::add_bond`], which reject self loops, duplicate bonds and
/// out-of-range endpoints, so every bond list is simple.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(try_from = "GraphRecord", into = "GraphRecord")]
pub struct MolecularGraph {
    name: Option<String>,
    graph: UnGraph<Atom, BondOrder>,
}

impl MolecularGraph {
    /// An empty, unnamed graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from atoms and `(a, b, order)` bonds.
    ///
    /// # Errors
    ///
    /// Returns a [`GraphError`] for invalid symbols or bonds.
    pub fn from_parts(
        atoms: impl IntoIterator<Item = Atom>,
        bonds: impl IntoIterator<Item = (usize, usize, BondOrder)>,
    ) -> Result<Self, GraphError> {
        let mut graph = Self::new();
        for atom in atoms {
            graph.add_atom(atom);
        }
        for (a, b, order) in bonds {
            graph.add_bond(a, b, order)?;
        }
        graph.validate()?;
        Ok(graph)
    }

    /// Attach a name (used for reporting only).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The graph's name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Replace the graph's name.
    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    /// Append an atom and return its index.
    pub fn add_atom(&mut self, atom: Atom) -> usize {
        self.graph.add_node(atom).index()
    }

    /// Join two existing atoms.
    ///
    /// # Errors
    ///
    /// Returns a [`GraphError`] if either atom is missing, `a == b`, or the
    /// pair is already bonded.
    pub fn add_bond(&mut self, a: usize, b: usize, order: BondOrder) -> Result<(), GraphError> {
        let atoms = self.atom_count();
        for index in [a, b] {
            if index >= atoms {
                return Err(GraphError::AtomOutOfRange { index, atoms });
            }
        }
        if a == b {
            return Err(GraphError::SelfLoop(a));
        }
        if self.bond_between(a, b).is_some() {
            return Err(GraphError::DuplicateBond { a, b });
        }
        self.graph
            .add_edge(NodeIndex::new(a), NodeIndex::new(b), order);
        Ok(())
    }

    /// Number of atoms.
    pub fn atom_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of bonds.
    pub fn bond_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// No atoms at all.
    pub fn is_empty(&self) -> bool {
        self.atom_count() == 0
    }

    /// The atom at `index`.
    pub fn atom(&self, index: usize) -> Option<&Atom> {
        self.graph.node_weight(NodeIndex::new(index))
    }

    /// Atoms in index order.
    pub fn atoms(&self) -> impl Iterator<Item = &Atom> {
        self.graph.node_weights()
    }

    /// Bonds as `(low, high, order)` with `low < high`, in insertion order.
    pub fn bonds(&self) -> impl Iterator<Item = (usize, usize, BondOrder)> + '_ {
        self.graph.edge_references().map(|e| {
            let (a, b) = (e.source().index(), e.target().index());
            (a.min(b), a.max(b), *e.weight())
        })
    }

    /// Neighbours of `index` with the order of the joining bond.
    pub fn bonds_of(&self, index: usize) -> impl Iterator<Item = (usize, BondOrder)> + '_ {
        let node = NodeIndex::new(index);
        self.graph.edges(node).map(move |e| {
            let other = if e.source() == node { e.target() } else { e.source() };
            (other.index(), *e.weight())
        })
    }

    /// Neighbour indices of `index`.
    pub fn neighbors(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.bonds_of(index).map(|(other, _)| other)
    }

    /// Number of bonds at `index`.
    pub fn degree(&self, index: usize) -> usize {
        self.bonds_of(index).count()
    }

    /// The bond joining `a` and `b`, if any.
    pub fn bond_between(&self, a: usize, b: usize) -> Option<BondOrder> {
        self.graph
            .find_edge(NodeIndex::new(a), NodeIndex::new(b))
            .and_then(|e| self.graph.edge_weight(e))
            .copied()
    }

    /// Number of connected components.
    pub fn component_count(&self) -> usize {
        petgraph::algo::connected_components(&self.graph)
    }

    /// Borrow the underlying petgraph graph.
    pub const fn as_petgraph(&self) -> &UnGraph<Atom, BondOrder> {
        &self.graph
    }

    /// Check symbols and bonds.
    ///
    /// # Errors
    ///
    /// Returns the first [`GraphError`] found.
    pub fn validate(&self) -> Result<(), GraphError> {
        for (index, atom) in self.atoms().enumerate() {
            if !atom.has_valid_symbol() {
                return Err(GraphError::InvalidSymbol {
                    index,
                    symbol: atom.symbol.clone(),
                });
            }
        }
        let mut seen = std::collections::HashSet::new();
        for (a, b, _) in self.bonds() {
            if a == b {
                return Err(GraphError::SelfLoop(a));
            }
            if !seen.insert((a, b)) {
                return Err(GraphError::DuplicateBond { a, b });
            }
        }
        Ok(())
    }

    /// The subgraph induced by `atoms`: those atoms, in ascending index
    /// order, and every bond between two of them. Duplicates are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::AtomOutOfRange`] for a missing atom.
    pub fn induced_subgraph(&self, atoms: &[usize]) -> Result<Self, GraphError> {
        let count = self.atom_count();
        let mut keep: Vec<usize> = atoms.to_vec();
        keep.sort_unstable();
        keep.dedup();

        let mut remap = vec![None; count];
        let mut sub = Self {
            name: self.name.clone(),
            graph: UnGraph::with_capacity(keep.len(), keep.len()),
        };
        for &index in &keep {
            let atom = self
                .atom(index)
                .ok_or(GraphError::AtomOutOfRange { index, atoms: count })?;
            remap[index] = Some(sub.add_atom(atom.clone()));
        }
        for (a, b, order) in self.bonds() {
            if let (Some(na), Some(nb)) = (remap[a], remap[b]) {
                sub.add_bond(na, nb, order)?;
            }
        }
        Ok(sub)
    }

    fn sorted_bonds(&self) -> Vec<(usize, usize, BondOrder)> {
        let mut bonds: Vec<_> = self.bonds().collect();
        bonds.sort_unstable();
        bonds
    }
}

/// Layout equality: same name, same atoms in the same order, same bonds.
/// This is not isomorphism; see [`crate::canonical_key`] for that.
impl PartialEq for MolecularGraph {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.atoms().eq(other.atoms())
            && self.sorted_bonds() == other.sorted_bonds()
    }
}

impl Eq for MolecularGraph {}

/// On-disk form of one bond.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct BondRecord {
    a: usize,
    b: usize,
    #[serde(default = "single")]
    order: BondOrder,
}

const fn single() -> BondOrder {
    BondOrder::Single
}

/// On-disk form of a graph.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct GraphRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    atoms: Vec<Atom>,
    #[serde(default)]
    bonds: Vec<BondRecord>,
}

impl TryFrom<GraphRecord> for MolecularGraph {
    type Error = GraphError;

    fn try_from(record: GraphRecord) -> Result<Self, Self::Error> {
        let mut graph = Self::from_parts(
            record.atoms,
            record.bonds.into_iter().map(|b| (b.a, b.b, b.order)),
        )?;
        graph.name = record.name;
        Ok(graph)
    }
}

impl From<MolecularGraph> for GraphRecord {
    fn from(graph: MolecularGraph) -> Self {
        let bonds = graph
            .bonds()
            .map(|(a, b, order)| BondRecord { a, b, order })
            .collect();
        Self {
            name: graph.name,
            atoms: graph.graph.node_weights().cloned().collect(),
            bonds,
        }
    }
}
