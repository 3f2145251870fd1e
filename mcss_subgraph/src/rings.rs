//! Ring perception for diagnostics.
//!
//! A bond is a ring bond exactly when it is not a bridge. Bridges are found
//! with a single depth-first pass tracking discovery times and low links.

use crate::model::MolecularGraph;

/// Ring membership of atoms and bonds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RingInfo {
    ring_atoms: Vec<bool>,
    ring_bonds: Vec<(usize, usize)>,
    cyclomatic: usize,
}

impl RingInfo {
    /// Analyse `graph`.
    pub fn perceive(graph: &MolecularGraph) -> Self {
        let n = graph.atom_count();
        let mut finder = BridgeFinder {
            graph,
            disc: vec![usize::MAX; n],
            low: vec![usize::MAX; n],
            time: 0,
            bridges: Vec::new(),
        };
        for start in 0..n {
            if finder.disc[start] == usize::MAX {
                finder.visit(start, None);
            }
        }
        let bridges = finder.bridges;

        let mut ring_atoms = vec![false; n];
        let mut ring_bonds = Vec::new();
        for (a, b, _) in graph.bonds() {
            if !bridges.contains(&(a, b)) {
                ring_atoms[a] = true;
                ring_atoms[b] = true;
                ring_bonds.push((a, b));
            }
        }
        ring_bonds.sort_unstable();

        // bonds - atoms + components, the number of independent cycles.
        let cyclomatic = (graph.bond_count() + graph.component_count()).saturating_sub(n);

        Self {
            ring_atoms,
            ring_bonds,
            cyclomatic,
        }
    }

    /// Number of independent rings.
    pub const fn ring_count(&self) -> usize {
        self.cyclomatic
    }

    /// Whether `atom` lies on a ring.
    pub fn is_ring_atom(&self, atom: usize) -> bool {
        self.ring_atoms.get(atom).copied().unwrap_or(false)
    }

    /// Whether the bond `a`-`b` lies on a ring.
    pub fn is_ring_bond(&self, a: usize, b: usize) -> bool {
        self.ring_bonds.binary_search(&(a.min(b), a.max(b))).is_ok()
    }

    /// Number of atoms on at least one ring.
    pub fn ring_atom_count(&self) -> usize {
        self.ring_atoms.iter().filter(|r| **r).count()
    }
}

struct BridgeFinder<'g> {
    graph: &'g MolecularGraph,
    disc: Vec<usize>,
    low: Vec<usize>,
    time: usize,
    bridges: Vec<(usize, usize)>,
}

impl BridgeFinder<'_> {
    fn visit(&mut self, atom: usize, parent: Option<usize>) {
        self.disc[atom] = self.time;
        self.low[atom] = self.time;
        self.time += 1;
        let neighbours: Vec<usize> = self.graph.neighbors(atom).collect();
        for next in neighbours {
            if Some(next) == parent {
                continue;
            }
            if self.disc[next] == usize::MAX {
                self.visit(next, Some(atom));
                self.low[atom] = self.low[atom].min(self.low[next]);
                if self.low[next] > self.disc[atom] {
                    self.bridges.push((atom.min(next), atom.max(next)));
                }
            } else {
                self.low[atom] = self.low[atom].min(self.disc[next]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Atom, BondOrder::Single};

    #[test]
    fn ring_with_tail() {
        // C1CCCCC1-Cl
        let g = MolecularGraph::from_parts(
            (0..6).map(|_| Atom::new("C")).chain([Atom::new("Cl")]),
            (0..6).map(|i| (i, (i + 1) % 6, Single)).chain([(0, 6, Single)]),
        )
        .unwrap();
        let rings = RingInfo::perceive(&g);
        assert_eq!(rings.ring_count(), 1);
        assert_eq!(rings.ring_atom_count(), 6);
        assert!(rings.is_ring_bond(5, 0));
        assert!(!rings.is_ring_bond(0, 6));
        assert!(!rings.is_ring_atom(6));
    }

    #[test]
    fn fused_rings() {
        // naphthalene-like skeleton: two six-rings sharing the 0-5 bond
        let bonds = [
            (0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0),
            (5, 6), (6, 7), (7, 8), (8, 9), (9, 0),
        ];
        let g = MolecularGraph::from_parts(
            (0..10).map(|_| Atom::aromatic("C")),
            bonds.iter().map(|&(a, b)| (a, b, Single)),
        )
        .unwrap();
        let rings = RingInfo::perceive(&g);
        assert_eq!(rings.ring_count(), 2);
        assert_eq!(rings.ring_atom_count(), 10);
    }

    #[test]
    fn acyclic_chain() {
        let g = MolecularGraph::from_parts(
            (0..4).map(|_| Atom::new("C")),
            (1..4).map(|i| (i - 1, i, Single)),
        )
        .unwrap();
        let rings = RingInfo::perceive(&g);
        assert_eq!(rings.ring_count(), 0);
        assert_eq!(rings.ring_atom_count(), 0);
    }
}
