use tracing::trace;

use super::graph::MolecularGraph;

/// Prepares a target graph before it is compared against the running seed.
pub trait Normalizer: Send + Sync {
    /// Return the normalized copy of `graph`.
    fn normalize(&self, graph: &MolecularGraph) -> MolecularGraph;
}

/// Leaves graphs untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct Identity;

impl Normalizer for Identity {
    fn normalize(&self, graph: &MolecularGraph) -> MolecularGraph {
        graph.clone()
    }
}

/// Folds explicit hydrogens into their heavy neighbour's implicit count.
///
/// A hydrogen is removed only when it is neutral, has no isotope label and
/// has exactly one neighbour which is not itself a hydrogen. Molecular
/// hydrogen, bridging hydrogens and labelled hydrogens are kept.
#[derive(Clone, Copy, Debug, Default)]
pub struct StripHydrogens;

impl StripHydrogens {
    fn removable(graph: &MolecularGraph, index: usize) -> Option<usize> {
        let atom = graph.atom(index)?;
        if !atom.is_hydrogen() || atom.charge != 0 || atom.isotope.is_some() {
            return None;
        }
        let mut neighbors = graph.neighbors(index);
        let heavy = neighbors.next()?;
        if neighbors.next().is_some() {
            return None;
        }
        graph
            .atom(heavy)
            .filter(|a| !a.is_hydrogen())
            .map(|_| heavy)
    }
}

impl Normalizer for StripHydrogens {
    fn normalize(&self, graph: &MolecularGraph) -> MolecularGraph {
        let mut extra_h = vec![0u8; graph.atom_count()];
        let mut keep = Vec::with_capacity(graph.atom_count());
        for index in 0..graph.atom_count() {
            match Self::removable(graph, index) {
                Some(heavy) => extra_h[heavy] = extra_h[heavy].saturating_add(1),
                None => keep.push(index),
            }
        }
        if keep.len() == graph.atom_count() {
            return graph.clone();
        }
        trace!(
            "Stripping {} hydrogens from {} atoms",
            graph.atom_count() - keep.len(),
            graph.atom_count()
        );

        let mut out = MolecularGraph::new();
        out.set_name(graph.name().map(str::to_owned));
        let mut remap = vec![None; graph.atom_count()];
        for &index in &keep {
            if let Some(atom) = graph.atom(index) {
                let mut atom = atom.clone();
                atom.hydrogens = atom.hydrogens.saturating_add(extra_h[index]);
                remap[index] = Some(out.add_atom(atom));
            }
        }
        for (a, b, order) in graph.bonds() {
            if let (Some(na), Some(nb)) = (remap[a], remap[b]) {
                // Endpoints come from a simple graph, so this cannot collide.
                let _ = out.add_bond(na, nb, order);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Atom, BondOrder};

    fn methanol_with_h() -> MolecularGraph {
        // C(H)(H)(H)-O-H
        MolecularGraph::from_parts(
            [
                Atom::new("C"),
                Atom::new("O"),
                Atom::new("H"),
                Atom::new("H"),
                Atom::new("H"),
                Atom::new("H"),
            ],
            [
                (0, 1, BondOrder::Single),
                (0, 2, BondOrder::Single),
                (0, 3, BondOrder::Single),
                (0, 4, BondOrder::Single),
                (1, 5, BondOrder::Single),
            ],
        )
        .unwrap()
    }

    #[test]
    fn strips_terminal_hydrogens() {
        let g = StripHydrogens.normalize(&methanol_with_h());
        assert_eq!(g.atom_count(), 2);
        assert_eq!(g.bond_count(), 1);
        assert_eq!(g.atom(0).unwrap().hydrogens, 3);
        assert_eq!(g.atom(1).unwrap().hydrogens, 1);
    }

    #[test]
    fn keeps_molecular_and_labelled_hydrogen() {
        let h2 = MolecularGraph::from_parts(
            [Atom::new("H"), Atom::new("H")],
            [(0, 1, BondOrder::Single)],
        )
        .unwrap();
        assert_eq!(StripHydrogens.normalize(&h2), h2);

        let deuterated = MolecularGraph::from_parts(
            [Atom::new("C"), Atom::new("H").with_isotope(2)],
            [(0, 1, BondOrder::Single)],
        )
        .unwrap();
        assert_eq!(StripHydrogens.normalize(&deuterated).atom_count(), 2);

        let hydride = MolecularGraph::from_parts([Atom::new("H").with_charge(-1)], []).unwrap();
        assert_eq!(StripHydrogens.normalize(&hydride).atom_count(), 1);
    }

    #[test]
    fn identity_is_a_clone() {
        let g = methanol_with_h();
        assert_eq!(Identity.normalize(&g), g);
    }
}
