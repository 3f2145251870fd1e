//! Common reduction scenarios for MCSS.
//!
//! Each test case names a fixture file (a JSON array of molecular graphs
//! under the workspace `fixtures/` directory), the configuration to run it
//! with, and what the reduction is expected to produce.

use std::path::{Path, PathBuf};

use crate::config::{Config, JobType};

/// What a reduction over a fixture should yield.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// No graphs at all.
    Empty,
    /// `results` graphs, every one with `atoms` atoms.
    Fragments {
        /// Number of graphs in the result collection.
        results: usize,
        /// Atom count shared by every result.
        atoms: usize,
    },
}

impl Expected {
    /// Number of result graphs expected.
    pub const fn result_count(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Fragments { results, .. } => *results,
        }
    }
}

/// A complete test case definition.
#[derive(Debug, Clone)]
pub struct TestCase {
    /// The name of the test case.
    pub name: &'static str,
    /// The configuration for the reduction.
    pub config: Config,
    /// Fixture file, relative to the workspace `fixtures/` directory.
    pub fixture: &'static str,
    /// The expected outcome.
    pub expected: Expected,
}

impl TestCase {
    /// Absolute path of the fixture file.
    pub fn fixture_path(&self) -> PathBuf {
        fixtures_dir().join(self.fixture)
    }

    /// The job type this case runs.
    pub const fn job_type(&self) -> JobType {
        self.config.job_type
    }
}

/// The workspace fixture directory.
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("fixtures")
}

const RING_FAMILY: &str = "ring_family.json";
const DISJOINT: &str = "disjoint.json";
const IDENTICAL: &str = "identical.json";
const TIED_CHAINS: &str = "tied_chains.json";
const LONE_GRAPH: &str = "lone_graph.json";

lazy_static::lazy_static! {
    /// Scenarios for the single-solution reducer.
    pub static ref SINGLE_TEST_CASES: Vec<TestCase> = vec![
        TestCase {
            name: "ring_family_single",
            config: Config::builder().single().build(),
            fixture: RING_FAMILY,
            expected: Expected::Fragments { results: 1, atoms: 6 },
        },
        TestCase {
            // The untouched first graph survives an empty first comparison.
            name: "disjoint_single",
            config: Config::builder().single().build(),
            fixture: DISJOINT,
            expected: Expected::Fragments { results: 1, atoms: 3 },
        },
        TestCase {
            name: "identical_single",
            config: Config::builder().single().build(),
            fixture: IDENTICAL,
            expected: Expected::Fragments { results: 1, atoms: 4 },
        },
        TestCase {
            name: "tied_chains_single",
            config: Config::builder().single().build(),
            fixture: TIED_CHAINS,
            expected: Expected::Fragments { results: 1, atoms: 2 },
        },
        TestCase {
            name: "lone_graph_single",
            config: Config::builder().single().build(),
            fixture: LONE_GRAPH,
            expected: Expected::Fragments { results: 1, atoms: 5 },
        },
    ];

    /// Scenarios for the multiple-solution reducer.
    pub static ref MULTIPLE_TEST_CASES: Vec<TestCase> = vec![
        TestCase {
            name: "ring_family_multiple",
            config: Config::builder().multiple().build(),
            fixture: RING_FAMILY,
            expected: Expected::Fragments { results: 1, atoms: 6 },
        },
        TestCase {
            name: "disjoint_multiple",
            config: Config::builder().multiple().build(),
            fixture: DISJOINT,
            expected: Expected::Empty,
        },
        TestCase {
            name: "identical_multiple",
            config: Config::builder().multiple().build(),
            fixture: IDENTICAL,
            expected: Expected::Fragments { results: 1, atoms: 4 },
        },
        TestCase {
            name: "tied_chains_multiple",
            config: Config::builder().multiple().build(),
            fixture: TIED_CHAINS,
            expected: Expected::Fragments { results: 2, atoms: 2 },
        },
        TestCase {
            name: "lone_graph_multiple",
            config: Config::builder().multiple().build(),
            fixture: LONE_GRAPH,
            expected: Expected::Fragments { results: 1, atoms: 5 },
        },
    ];

    /// Every scenario.
    pub static ref ALL_TEST_CASES: Vec<TestCase> = SINGLE_TEST_CASES
        .iter()
        .chain(MULTIPLE_TEST_CASES.iter())
        .cloned()
        .collect();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_fixture_exists() {
        for case in ALL_TEST_CASES.iter() {
            assert!(
                case.fixture_path().is_file(),
                "fixture for '{}' missing at {}",
                case.name,
                case.fixture_path().display()
            );
        }
    }

    #[test]
    fn cases_are_split_by_job_type() {
        assert!(SINGLE_TEST_CASES.iter().all(|c| c.job_type() == JobType::Single));
        assert!(MULTIPLE_TEST_CASES.iter().all(|c| c.job_type() == JobType::Multiple));
        assert_eq!(
            ALL_TEST_CASES.len(),
            SINGLE_TEST_CASES.len() + MULTIPLE_TEST_CASES.len()
        );
    }
}
