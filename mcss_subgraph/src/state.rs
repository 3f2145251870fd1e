use super::index::NodeId;
use crate::mapping::AtomMapping;

/// Partial query -> target assignment built up by the backtracking search.
pub(super) struct State {
    // Query atom -> target atom
    mapping: Vec<Option<NodeId>>,
    used_t: Vec<bool>,
    mapped: usize,
}

impl State {
    pub(super) fn new(query_atoms: usize, target_atoms: usize) -> Self {
        State {
            mapping: vec![None; query_atoms],
            used_t: vec![false; target_atoms],
            mapped: 0,
        }
    }

    pub(super) fn is_used_target(&self, t: NodeId) -> bool {
        self.used_t[t]
    }

    pub(super) fn mapped_count(&self) -> usize {
        self.mapped
    }

    /// Mapped `(query, target)` pairs in query order.
    pub(super) fn pairs(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.mapping
            .iter()
            .enumerate()
            .filter_map(|(q, t)| t.map(|t| (q, t)))
    }

    /// Membership flags over query atoms.
    pub(super) fn query_members(&self) -> Vec<bool> {
        self.mapping.iter().map(Option::is_some).collect()
    }

    pub(super) fn map(&mut self, q: NodeId, t: NodeId) {
        self.mapping[q] = Some(t);
        self.used_t[t] = true;
        self.mapped += 1;
    }

    pub(super) fn unmap(&mut self, q: NodeId, t: NodeId) {
        self.mapping[q] = None;
        self.used_t[t] = false;
        self.mapped -= 1;
    }

    pub(super) fn to_mapping(&self) -> AtomMapping {
        AtomMapping::new(self.pairs().collect())
    }
}
