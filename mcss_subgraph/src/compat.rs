use mcss_common::{AtomMatch, BondMatch, MatchingPolicy};

use super::index::{Index, NodeId};
use super::state::State;
use crate::model::{Atom, BondOrder};

/// Atom comparison under the policy's atom comparator.
pub fn atoms_compatible(q: &Atom, t: &Atom, policy: &MatchingPolicy) -> bool {
    match policy.atoms {
        AtomMatch::Exact => {
            q.symbol == t.symbol && q.charge == t.charge && q.aromatic == t.aromatic
        }
        AtomMatch::Relaxed => q.symbol == t.symbol,
    }
}

/// Bond comparison under the policy's bond comparator.
pub fn bonds_compatible(q: BondOrder, t: BondOrder, policy: &MatchingPolicy) -> bool {
    match policy.bonds {
        BondMatch::Exact => q == t,
        BondMatch::Relaxed => true,
    }
}

/// Check if mapping query atom `q_id` onto target atom `t_id` is compatible
/// with the atoms themselves and with every pair already in `state`.
///
/// Mappings are induced: two mapped query atoms are bonded exactly when
/// their images are, and the two bonds must be compatible.
pub(super) fn atoms_mappable(
    q_id: NodeId,
    t_id: NodeId,
    q_index: &Index<'_>,
    t_index: &Index<'_>,
    state: &State,
    policy: &MatchingPolicy,
) -> bool {
    if state.is_used_target(t_id) {
        return false;
    }
    if !atoms_compatible(q_index.atom(q_id), t_index.atom(t_id), policy) {
        return false;
    }
    state.pairs().all(|(q_prev, t_prev)| {
        match (q_index.bond(q_id, q_prev), t_index.bond(t_id, t_prev)) {
            (None, None) => true,
            (Some(qb), Some(tb)) => bonds_compatible(qb, tb, policy),
            _ => false,
        }
    })
}
