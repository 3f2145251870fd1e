mod common;

use mcss_common::JobType;
use mcss_subgraph::{Atom, BondOrder::Single, MolecularGraph, OracleError, load_graphs_from};
use mcss_task::{FragmentError, ReduceError, ReductionStatus, ReductionTask};

use common::{Failure, OutOfRangeOracle, ScriptedOracle, init_test_logger};

fn chain(symbols: &[&str]) -> MolecularGraph {
    MolecularGraph::from_parts(
        symbols.iter().map(|s| Atom::new(*s)),
        (1..symbols.len()).map(|i| (i - 1, i, Single)),
    )
    .unwrap()
}

fn shrinking_chains() -> Vec<MolecularGraph> {
    vec![chain(&["C", "C", "C", "O"]), chain(&["C", "C", "C"]), chain(&["C", "C"])]
}

#[test]
fn single_keeps_seed_from_before_failed_step() {
    init_test_logger();
    let result = ReductionTask::new(shrinking_chains(), JobType::Single, 7)
        .unwrap()
        .with_oracle(ScriptedOracle::new(2, Failure::Error))
        .execute();

    assert_eq!(result.status(), ReductionStatus::Degraded);
    assert_eq!(result.len(), 1);
    assert_eq!(result.graphs()[0].atom_count(), 3);
    assert!(matches!(result.errors(), [ReduceError::Oracle(OracleError::Search(_))]));
}

#[test]
fn single_without_failure_goes_all_the_way() {
    let result = ReductionTask::new(shrinking_chains(), JobType::Single, 0)
        .unwrap()
        .with_oracle(ScriptedOracle::new(usize::MAX, Failure::Error))
        .execute();
    assert_eq!(result.status(), ReductionStatus::Complete);
    assert_eq!(result.graphs()[0].atom_count(), 2);
}

#[test]
fn oracle_panic_is_unexpected() {
    init_test_logger();
    let graphs = shrinking_chains();
    let first = graphs[0].clone();
    let result = ReductionTask::new(graphs, JobType::Single, 0)
        .unwrap()
        .with_oracle(ScriptedOracle::new(1, Failure::Panic))
        .execute();

    assert_eq!(result.graphs(), &[first]);
    match result.errors() {
        [ReduceError::Unexpected(msg)] => assert!(msg.contains("scripted panic")),
        other => panic!("expected one unexpected error, got {other:?}"),
    }
}

#[test]
fn discovery_failure_yields_nothing() {
    let result = ReductionTask::new(shrinking_chains(), JobType::Multiple, 0)
        .unwrap()
        .with_oracle(ScriptedOracle::new(1, Failure::Error))
        .execute();
    assert!(result.is_empty());
    assert_eq!(result.status(), ReductionStatus::Degraded);
}

#[test]
fn refinement_failure_drops_one_candidate() {
    init_test_logger();
    // Call 1 is discovery; call 2 is the first candidate against graph 0.
    let graphs = load_graphs_from(mcss_common::fixtures_dir().join("tied_chains.json")).unwrap();
    let result = ReductionTask::new(graphs, JobType::Multiple, 0)
        .unwrap()
        .with_oracle(ScriptedOracle::new(2, Failure::Error))
        .execute();

    assert_eq!(result.status(), ReductionStatus::Degraded);
    assert_eq!(result.len(), 1);
    assert_eq!(result.graphs()[0].atom_count(), 2);
    assert_eq!(result.errors().len(), 1);
}

#[test]
fn malformed_mapping_is_absorbed() {
    let graphs = shrinking_chains();
    let first = graphs[0].clone();
    let result = ReductionTask::new(graphs, JobType::Single, 0)
        .unwrap()
        .with_oracle(OutOfRangeOracle)
        .execute();

    assert_eq!(result.graphs(), &[first]);
    assert!(matches!(
        result.errors(),
        [ReduceError::MalformedFragment(FragmentError::Malformed(_))]
    ));
}

#[test]
fn single_skips_malformed_mapping() {
    init_test_logger();
    let result = ReductionTask::new(shrinking_chains(), JobType::Single, 0)
        .unwrap()
        .with_oracle(ScriptedOracle::new(1, Failure::Malformed))
        .execute();

    assert_eq!(result.status(), ReductionStatus::Degraded);
    assert_eq!(result.len(), 1);
    assert_eq!(result.graphs()[0].atom_count(), 2);
    assert!(matches!(
        result.errors(),
        [ReduceError::MalformedFragment(FragmentError::Malformed(_))]
    ));
}

#[test]
fn multiple_skips_malformed_mapping() {
    init_test_logger();
    // Call 1 is discovery against the three-carbon chain.
    let result = ReductionTask::new(shrinking_chains(), JobType::Multiple, 0)
        .unwrap()
        .with_oracle(ScriptedOracle::new(1, Failure::Malformed))
        .execute();

    assert_eq!(result.status(), ReductionStatus::Degraded);
    assert_eq!(result.len(), 1);
    assert_eq!(result.graphs()[0].atom_count(), 2);
    assert!(matches!(
        result.errors(),
        [ReduceError::MalformedFragment(FragmentError::Malformed(_))]
    ));
}
