use std::fmt;

use mcss_subgraph::MolecularGraph;

use crate::error::ReduceError;

/// How a reduction ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReductionStatus {
    /// Results were found and nothing failed.
    Complete,
    /// Nothing failed, and the inputs share no substructure.
    NoCommonSubstructure,
    /// At least one failure was absorbed; results may be partial.
    Degraded,
}

impl fmt::Display for ReductionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Complete => f.write_str("complete"),
            Self::NoCommonSubstructure => f.write_str("no common substructure"),
            Self::Degraded => f.write_str("degraded"),
        }
    }
}

/// Output graphs of one task, in emission order.
#[derive(Debug, Clone)]
pub struct ResultCollection {
    task_id: usize,
    graphs: Vec<MolecularGraph>,
    status: ReductionStatus,
    errors: Vec<ReduceError>,
}

impl ResultCollection {
    pub(crate) fn new(task_id: usize, graphs: Vec<MolecularGraph>, errors: Vec<ReduceError>) -> Self {
        let status = if !errors.is_empty() {
            ReductionStatus::Degraded
        } else if graphs.is_empty() {
            ReductionStatus::NoCommonSubstructure
        } else {
            ReductionStatus::Complete
        };
        Self {
            task_id,
            graphs,
            status,
            errors,
        }
    }

    /// Task that produced this collection.
    pub const fn task_id(&self) -> usize {
        self.task_id
    }

    /// Result graphs in emission order.
    pub fn graphs(&self) -> &[MolecularGraph] {
        &self.graphs
    }

    /// Take the result graphs.
    pub fn into_graphs(self) -> Vec<MolecularGraph> {
        self.graphs
    }

    /// Number of result graphs.
    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    /// No result graph.
    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }

    /// How the run ended.
    pub const fn status(&self) -> ReductionStatus {
        self.status
    }

    /// Failures absorbed during the run, in order.
    pub fn errors(&self) -> &[ReduceError] {
        &self.errors
    }

    /// Iterate over the result graphs.
    pub fn iter(&self) -> std::slice::Iter<'_, MolecularGraph> {
        self.graphs.iter()
    }
}

impl IntoIterator for ResultCollection {
    type Item = MolecularGraph;
    type IntoIter = std::vec::IntoIter<MolecularGraph>;

    fn into_iter(self) -> Self::IntoIter {
        self.graphs.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultCollection {
    type Item = &'a MolecularGraph;
    type IntoIter = std::slice::Iter<'a, MolecularGraph>;

    fn into_iter(self) -> Self::IntoIter {
        self.graphs.iter()
    }
}

#[cfg(test)]
mod tests {
    use mcss_subgraph::{Atom, OracleError};

    use super::*;

    fn one_atom() -> MolecularGraph {
        MolecularGraph::from_parts([Atom::new("C")], []).unwrap()
    }

    #[test]
    fn status_follows_errors_then_graphs() {
        assert_eq!(
            ResultCollection::new(0, vec![one_atom()], vec![]).status(),
            ReductionStatus::Complete
        );
        assert_eq!(
            ResultCollection::new(0, vec![], vec![]).status(),
            ReductionStatus::NoCommonSubstructure
        );
        let err = ReduceError::from(OracleError::search("boom"));
        let degraded = ResultCollection::new(3, vec![one_atom()], vec![err.clone()]);
        assert_eq!(degraded.status(), ReductionStatus::Degraded);
        assert_eq!(degraded.errors(), &[err]);
        assert_eq!(degraded.task_id(), 3);
    }

    #[test]
    fn collection_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ResultCollection>();
    }
}
