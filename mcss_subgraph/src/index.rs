use crate::model::{Atom, BondOrder, MolecularGraph};

pub(super) type NodeId = usize;

/// Dense lookup tables for one side of a comparison.
#[derive(Clone, Debug)]
pub(super) struct Index<'a> {
    atoms: Vec<&'a Atom>,
    // Row-major `n * n` bond matrix.
    bonds: Vec<Option<BondOrder>>,
    neighbors: Vec<Vec<NodeId>>,
}

impl<'a> Index<'a> {
    pub(super) fn build(graph: &'a MolecularGraph) -> Self {
        let atoms: Vec<&'a Atom> = graph.atoms().collect();
        let n = atoms.len();
        let mut bonds = vec![None; n * n];
        let mut neighbors = vec![Vec::new(); n];
        for (a, b, order) in graph.bonds() {
            bonds[a * n + b] = Some(order);
            bonds[b * n + a] = Some(order);
            neighbors[a].push(b);
            neighbors[b].push(a);
        }
        Index {
            atoms,
            bonds,
            neighbors,
        }
    }

    pub(super) fn atom(&self, id: NodeId) -> &'a Atom {
        self.atoms[id]
    }

    pub(super) fn bond(&self, a: NodeId, b: NodeId) -> Option<BondOrder> {
        self.bonds[a * self.atoms.len() + b]
    }

    pub(super) fn neighbors(&self, id: NodeId) -> &[NodeId] {
        &self.neighbors[id]
    }

    pub(super) fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// Whether `members` (flags per atom) induce a connected subgraph.
    pub(super) fn is_connected(&self, members: &[bool]) -> bool {
        let Some(start) = members.iter().position(|m| *m) else {
            return false;
        };
        let total = members.iter().filter(|m| **m).count();
        let mut seen = vec![false; self.atom_count()];
        let mut stack = vec![start];
        seen[start] = true;
        let mut reached = 1;
        while let Some(id) = stack.pop() {
            for &next in self.neighbors(id) {
                if members[next] && !seen[next] {
                    seen[next] = true;
                    reached += 1;
                    stack.push(next);
                }
            }
        }
        reached == total
    }
}
