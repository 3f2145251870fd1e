use std::collections::HashSet;

use mcss_common::MatchingPolicy;

use super::compat::atoms_mappable;
use super::index::{Index, NodeId};
use super::state::State;
use crate::mapping::AtomMapping;

/// Best-so-far bookkeeping for one comparison.
pub(super) struct Collector {
    best: usize,
    max_mappings: usize,
    // Query atom sets already recorded at `best`.
    seen: HashSet<Vec<bool>>,
    pub(super) out: Vec<AtomMapping>,
}

impl Collector {
    pub(super) fn new(max_mappings: usize) -> Self {
        Collector {
            best: 0,
            max_mappings,
            seen: HashSet::new(),
            out: Vec::new(),
        }
    }

    fn record(&mut self, q_index: &Index<'_>, st: &State) {
        let size = st.mapped_count();
        if size == 0 || size < self.best {
            return;
        }
        let members = st.query_members();
        if !q_index.is_connected(&members) {
            return;
        }
        if size > self.best {
            self.best = size;
            self.out.clear();
            self.seen.clear();
        }
        if self.out.len() < self.max_mappings && self.seen.insert(members) {
            self.out.push(st.to_mapping());
        }
    }
}

/// Visit query atoms in index order; each one is mapped to every mappable
/// target atom in turn, then left unmapped.
pub(super) fn backtrack(
    q_id: NodeId,
    q_index: &Index<'_>,
    t_index: &Index<'_>,
    st: &mut State,
    acc: &mut Collector,
    policy: &MatchingPolicy,
) {
    let remaining = q_index.atom_count() - q_id;
    if st.mapped_count() + remaining < acc.best {
        return;
    }
    if q_id == q_index.atom_count() {
        acc.record(q_index, st);
        return;
    }

    let candidates: Vec<NodeId> = (0..t_index.atom_count())
        .filter(|&t_cand| atoms_mappable(q_id, t_cand, q_index, t_index, st, policy))
        .collect();

    for t_cand in candidates {
        with_mapping(st, q_id, t_cand, |st_inner| {
            backtrack(q_id + 1, q_index, t_index, st_inner, acc, policy);
        });
    }

    backtrack(q_id + 1, q_index, t_index, st, acc, policy);
}

/// Scoped helper that maps (q_id -> t_id), runs `f`, then unmaps.
fn with_mapping(st: &mut State, q_id: NodeId, t_id: NodeId, f: impl FnOnce(&mut State)) {
    st.map(q_id, t_id);
    f(st);
    st.unmap(q_id, t_id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Atom, BondOrder::*, MolecularGraph};

    fn run(q: &MolecularGraph, t: &MolecularGraph, policy: MatchingPolicy) -> Vec<AtomMapping> {
        let (qi, ti) = (Index::build(q), Index::build(t));
        let mut st = State::new(qi.atom_count(), ti.atom_count());
        let mut acc = Collector::new(usize::MAX);
        backtrack(0, &qi, &ti, &mut st, &mut acc, &policy);
        acc.out
    }

    #[test]
    fn chain_inside_longer_chain() {
        let cc = MolecularGraph::from_parts([Atom::new("C"), Atom::new("C")], [(0, 1, Single)]).unwrap();
        let ccc = MolecularGraph::from_parts(
            (0..3).map(|_| Atom::new("C")),
            [(0, 1, Single), (1, 2, Single)],
        )
        .unwrap();
        let found = run(&cc, &ccc, MatchingPolicy::exact());
        // Both query atoms are always mapped; only one distinct query set.
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].len(), 2);
    }

    #[test]
    fn disconnected_common_atoms_are_not_a_match() {
        // N-C-C-O against N-C . C-O
        let q = MolecularGraph::from_parts(
            [Atom::new("N"), Atom::new("C"), Atom::new("C"), Atom::new("O")],
            [(0, 1, Single), (1, 2, Single), (2, 3, Single)],
        )
        .unwrap();
        let t = MolecularGraph::from_parts(
            [Atom::new("N"), Atom::new("C"), Atom::new("C"), Atom::new("O")],
            [(0, 1, Single), (2, 3, Single)],
        )
        .unwrap();
        let found = run(&q, &t, MatchingPolicy::exact());
        let sets: Vec<Vec<usize>> = found.iter().map(|m| m.query_atoms().collect()).collect();
        assert_eq!(sets, vec![vec![0, 1], vec![2, 3]]);
    }

    #[test]
    fn no_shared_element() {
        let q = MolecularGraph::from_parts([Atom::new("C")], []).unwrap();
        let t = MolecularGraph::from_parts([Atom::new("N")], []).unwrap();
        assert!(run(&q, &t, MatchingPolicy::relaxed()).is_empty());
    }
}
