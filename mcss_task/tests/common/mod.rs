#![allow(dead_code)]

use std::sync::OnceLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use mcss_common::MatchingPolicy;
use mcss_subgraph::{AtomMapping, McsOracle, MolecularGraph, OracleError, PairwiseOracle};

/// Route `tracing` output through the test harness once per binary.
pub fn init_test_logger() {
    static INIT: OnceLock<()> = OnceLock::new();
    INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// How the scripted call misbehaves.
#[derive(Clone, Copy, Debug)]
pub enum Failure {
    Error,
    Panic,
    /// Answer normally plus one mapping past the end of the query.
    Malformed,
}

/// Delegates to [`McsOracle`] except on the `fail_on`-th call (1-based).
#[derive(Debug)]
pub struct ScriptedOracle {
    inner: McsOracle,
    calls: AtomicUsize,
    fail_on: usize,
    failure: Failure,
}

impl ScriptedOracle {
    pub fn new(fail_on: usize, failure: Failure) -> Self {
        Self {
            inner: McsOracle::default(),
            calls: AtomicUsize::new(0),
            fail_on,
            failure,
        }
    }
}

impl PairwiseOracle for ScriptedOracle {
    fn compare(
        &self,
        query: &MolecularGraph,
        target: &MolecularGraph,
        policy: &MatchingPolicy,
    ) -> Result<Vec<AtomMapping>, OracleError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call == self.fail_on {
            match self.failure {
                Failure::Error => return Err(OracleError::search(format!("scripted failure on call {call}"))),
                Failure::Panic => panic!("scripted panic"),
                Failure::Malformed => {
                    let mut mappings = self.inner.compare(query, target, policy)?;
                    mappings.push(AtomMapping::new(vec![(query.atom_count(), 0)]));
                    return Ok(mappings);
                }
            }
        }
        self.inner.compare(query, target, policy)
    }
}

/// An oracle that maps query atoms past the end of the query.
#[derive(Debug)]
pub struct OutOfRangeOracle;

impl PairwiseOracle for OutOfRangeOracle {
    fn compare(
        &self,
        query: &MolecularGraph,
        _target: &MolecularGraph,
        _policy: &MatchingPolicy,
    ) -> Result<Vec<AtomMapping>, OracleError> {
        Ok(vec![AtomMapping::new(vec![(query.atom_count(), 0)])])
    }
}

/// Answers every comparison with `rule(query)`; targets are ignored.
pub struct RuleOracle<F>(pub F);

impl<F> PairwiseOracle for RuleOracle<F>
where
    F: Fn(&MolecularGraph) -> Vec<AtomMapping> + Send + Sync,
{
    fn compare(
        &self,
        query: &MolecularGraph,
        _target: &MolecularGraph,
        _policy: &MatchingPolicy,
    ) -> Result<Vec<AtomMapping>, OracleError> {
        Ok((self.0)(query))
    }
}
