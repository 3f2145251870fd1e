use mcss_subgraph::MolecularGraph;
use tracing::debug;

use super::{Reducer, describe};

/// Fold `graphs` into one common substructure.
///
/// The seed starts as `graphs[0]` and is replaced by the first fragment of
/// each comparison against the next (normalized) graph. An empty comparison
/// or a failed oracle call stops the fold; the current seed is still
/// returned. Malformed mappings are skipped.
pub(crate) fn reduce(graphs: &[MolecularGraph], r: &mut Reducer<'_>) -> Vec<MolecularGraph> {
    let Some((first, rest)) = graphs.split_first() else {
        return Vec::new();
    };
    let mut seed = first.clone();

    for (offset, target) in rest.iter().enumerate() {
        let index = offset + 1;
        let target = r.normalizer.normalize(target);

        let fragments = match r.compare(&seed, &target, "single", index) {
            Ok(fragments) => fragments,
            Err(err) => {
                r.absorb(err, "single", index);
                break;
            }
        };
        debug!(
            task_id = r.task_id,
            index,
            unique = fragments.len(),
            seed_atoms = seed.atom_count(),
            target_atoms = target.atom_count(),
            "compared seed against target"
        );

        let Some(best) = fragments.into_iter().next() else {
            debug!(task_id = r.task_id, index, "no common substructure, keeping seed");
            break;
        };
        seed = best.into_graph();
    }

    debug!(
        task_id = r.task_id,
        atoms = seed.atom_count(),
        bonds = seed.bond_count(),
        mcss = %describe(&seed),
        "single reduction done"
    );
    vec![seed]
}
