use std::collections::BTreeSet;

use contracts::*;

use crate::fragment::Fragment;

/// Tied candidates at the smallest atom count seen so far.
#[derive(Clone, Debug)]
pub struct Frontier {
    fragments: BTreeSet<Fragment>,
    min_atoms: usize,
}

impl Frontier {
    /// An empty frontier tracking `min_atoms` as the current minimum.
    pub const fn new(min_atoms: usize) -> Self {
        Self {
            fragments: BTreeSet::new(),
            min_atoms,
        }
    }

    /// Apply the min-size rule to `fragment`.
    ///
    /// A smaller fragment lowers the minimum and clears the frontier before
    /// it is inserted; a fragment at the minimum is inserted (duplicates
    /// collapse); a larger one is ignored. Returns `true` if the frontier was
    /// reset.
    #[ensures(self.fragments.iter().all(|f| f.atom_count() == self.min_atoms))]
    pub fn offer(&mut self, fragment: Fragment) -> bool {
        let atoms = fragment.atom_count();
        let reset = atoms < self.min_atoms;
        if reset {
            self.fragments.clear();
            self.min_atoms = atoms;
        }
        if atoms == self.min_atoms {
            self.fragments.insert(fragment);
        }
        reset
    }

    /// The least fragment in set order.
    pub fn first(&self) -> Option<&Fragment> {
        self.fragments.first()
    }

    /// Take every fragment out in set order. The minimum is kept.
    pub fn drain(&mut self) -> Vec<Fragment> {
        std::mem::take(&mut self.fragments).into_iter().collect()
    }

    /// Drop every fragment. The minimum is kept.
    pub fn clear(&mut self) {
        self.fragments.clear();
    }

    /// Number of tied fragments held.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// No fragment at the current minimum.
    #[ensures(ret == (self.len() == 0))]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Smallest atom count seen so far.
    pub const fn min_atoms(&self) -> usize {
        self.min_atoms
    }
}

#[cfg(test)]
mod tests {
    use mcss_subgraph::{Atom, BondOrder::Single, MolecularGraph};
    use rstest::rstest;

    use super::*;

    fn chain(symbols: &[&str]) -> Fragment {
        Fragment::new(
            MolecularGraph::from_parts(
                symbols.iter().map(|s| Atom::new(*s)),
                (1..symbols.len()).map(|i| (i - 1, i, Single)),
            )
            .unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn smaller_fragment_resets() {
        let mut f = Frontier::new(usize::MAX);
        assert!(f.offer(chain(&["C", "C", "O"])));
        assert!(!f.offer(chain(&["C", "O", "C"])));
        assert_eq!(f.len(), 2);

        assert!(f.offer(chain(&["C", "O"])));
        assert_eq!(f.len(), 1);
        assert_eq!(f.min_atoms(), 2);
    }

    #[rstest]
    #[case::larger(&["C", "C", "C", "C"], 0)]
    #[case::tied(&["N", "N", "N"], 1)]
    #[case::duplicate(&["C", "C", "C"], 0)]
    fn offers_against_existing(#[case] symbols: &[&str], #[case] added: usize) {
        let mut f = Frontier::new(3);
        f.offer(chain(&["C", "C", "C"]));
        assert!(!f.offer(chain(symbols)));
        assert_eq!(f.len(), 1 + added);
    }

    #[test]
    fn drain_keeps_minimum_and_order() {
        let mut f = Frontier::new(2);
        f.offer(chain(&["O", "N"]));
        f.offer(chain(&["C", "C"]));
        let first_key = f.first().unwrap().key().to_owned();
        let drained = f.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].key(), first_key);
        assert!(f.is_empty());
        assert_eq!(f.min_atoms(), 2);
    }
}
