use mcss_subgraph::MolecularGraph;
use tracing::debug;

use super::{Reducer, describe};
use crate::fragment::Fragment;
use crate::frontier::Frontier;

/// Find every minimal tied common substructure of `graphs`.
pub(crate) fn reduce(graphs: &[MolecularGraph], r: &mut Reducer<'_>) -> Vec<MolecularGraph> {
    let Some((seed, rest)) = graphs.split_first() else {
        return Vec::new();
    };
    if rest.is_empty() {
        return vec![seed.clone()];
    }

    let candidates = discover(seed, rest, r);
    debug!(task_id = r.task_id, candidates = candidates.len(), "seed discovery done");
    refine(candidates, graphs, r)
}

/// Compare `seed` against every other graph and keep the smallest tied
/// fragments. The seed itself is never refined here.
fn discover(seed: &MolecularGraph, rest: &[MolecularGraph], r: &mut Reducer<'_>) -> Vec<Fragment> {
    let mut frontier = Frontier::new(seed.atom_count());

    for (offset, target) in rest.iter().enumerate() {
        let index = offset + 1;
        match r.compare(seed, target, "discover", index) {
            Err(err) => {
                r.absorb(err, "discover", index);
                frontier.clear();
                break;
            }
            Ok(fragments) if fragments.is_empty() => {
                debug!(task_id = r.task_id, index, "no common substructure");
                frontier.clear();
                break;
            }
            Ok(fragments) => {
                debug!(task_id = r.task_id, index, unique = fragments.len(), "compared seed");
                for fragment in fragments {
                    frontier.offer(fragment);
                }
            }
        }
    }

    frontier.drain()
}

/// Re-validate each candidate against the full list, index 0 included.
///
/// The minimum atom count is shared by all candidates. Fragments emitted for
/// an earlier candidate are kept even if a later one lowers the minimum.
fn refine(
    candidates: Vec<Fragment>,
    graphs: &[MolecularGraph],
    r: &mut Reducer<'_>,
) -> Vec<MolecularGraph> {
    let mut min_atoms = usize::MAX;
    let mut out = Vec::new();

    for candidate in candidates {
        debug!(task_id = r.task_id, candidate = %candidate, "refining candidate");
        let mut local = Frontier::new(min_atoms);
        let mut current = candidate.into_graph();
        let mut survived = true;

        for (index, graph) in graphs.iter().enumerate() {
            let fragments = match r.compare(&current, graph, "refine", index) {
                Ok(fragments) => fragments,
                Err(err) => {
                    r.absorb(err, "refine", index);
                    survived = false;
                    break;
                }
            };
            if fragments.is_empty() {
                survived = false;
                break;
            }
            for fragment in fragments {
                local.offer(fragment);
            }
            // Every fragment may be larger than the shared minimum.
            let Some(top) = local.first() else {
                debug!(task_id = r.task_id, index, min_atoms = local.min_atoms(), "candidate above minimum");
                survived = false;
                break;
            };
            current = top.graph().clone();
        }

        min_atoms = local.min_atoms();
        if survived {
            for fragment in local.drain() {
                debug!(task_id = r.task_id, mcss = %describe(fragment.graph()), "emitting");
                out.push(fragment.into_graph());
            }
        }
    }

    out
}
