use std::path::Path;

use mcss_subgraph::{MolecularGraph, RingInfo, to_canonical_string};
use serde::Serialize;

/// One CSV row per result graph.
#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    index: usize,
    name: &'a str,
    atoms: usize,
    bonds: usize,
    rings: usize,
    canonical: String,
}

impl<'a> ReportRow<'a> {
    fn new(index: usize, graph: &'a MolecularGraph) -> Self {
        Self {
            index,
            name: graph.name().unwrap_or_default(),
            atoms: graph.atom_count(),
            bonds: graph.bond_count(),
            rings: RingInfo::perceive(graph).ring_count(),
            // Unwritable structures still get a row.
            canonical: to_canonical_string(graph).unwrap_or_default(),
        }
    }
}

/// Write `index,name,atoms,bonds,rings,canonical` for every graph.
pub fn write_report(path: &Path, graphs: &[MolecularGraph]) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_path(path)?;
    for (index, graph) in graphs.iter().enumerate() {
        wtr.serialize(ReportRow::new(index, graph))?;
    }
    wtr.flush()?;
    Ok(())
}
