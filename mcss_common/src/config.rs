//! Configuration for a common-substructure reduction.
//!
//! This module exposes a small, stable surface for consumers (the reduction
//! tasks, the batch driver and the CLI) to parameterize how matching and
//! scheduling should behave.
//!
//! The main concepts are:
//! - policy: how atoms and bonds are compared by the pairwise search.
//! - job_type: whether a reduction yields one representative fragment or
//!   every tied minimal fragment.
//! - chunk_size / threads: how the batch driver partitions work.
//!
//! Quick examples
//!
//! Default (exact atoms, exact bonds, single result):
//! ```
//! use mcss_common::Config;
//! let cfg = Config::default();
//! assert_eq!(cfg, Config::builder().build());
//! ```
//!
//! Relaxed bonds, every tied fragment:
//! ```
//! use mcss_common::{BondMatch, Config, JobType};
//! let cfg = Config::builder()
//!     .multiple()
//!     .bond_match(BondMatch::Relaxed)
//!     .build();
//! assert_eq!(cfg.job_type, JobType::Multiple);
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Default number of graphs handed to one reduction task by the batch driver.
pub const DEFAULT_CHUNK_SIZE: usize = 16;

/// Default cap on tied mappings returned by one pairwise comparison.
pub const DEFAULT_MAX_MAPPINGS: usize = 10_000;

/// How two atoms are compared.
///
/// - Exact: element symbol, formal charge and aromaticity must agree.
/// - Relaxed: only the element symbol must agree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AtomMatch {
    /// Symbol, charge and aromaticity.
    #[default]
    Exact,
    /// Symbol only.
    Relaxed,
}

/// How two bonds are compared.
///
/// - Exact: bond orders must agree (aromatic only matches aromatic).
/// - Relaxed: any bond matches any bond; only connectivity matters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BondMatch {
    /// Same bond order.
    #[default]
    Exact,
    /// Topology only.
    Relaxed,
}

/// Vertex and edge compatibility rules handed to every pairwise comparison.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchingPolicy {
    /// Atom comparator.
    #[serde(default)]
    pub atoms: AtomMatch,
    /// Bond comparator.
    #[serde(default)]
    pub bonds: BondMatch,
}

impl MatchingPolicy {
    /// Create a policy from both comparators.
    pub const fn new(atoms: AtomMatch, bonds: BondMatch) -> Self {
        Self { atoms, bonds }
    }

    /// Exact atoms and exact bonds (the default).
    pub const fn exact() -> Self {
        Self::new(AtomMatch::Exact, BondMatch::Exact)
    }

    /// Element-only atoms and topology-only bonds.
    pub const fn relaxed() -> Self {
        Self::new(AtomMatch::Relaxed, BondMatch::Relaxed)
    }
}

impl fmt::Display for MatchingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "atoms={:?}, bonds={:?}", self.atoms, self.bonds)
    }
}

/// Selects the reducer a task runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobType {
    /// One representative common substructure.
    #[default]
    Single,
    /// Every tied, minimal-size common substructure.
    Multiple,
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => f.write_str("single"),
            Self::Multiple => f.write_str("multiple"),
        }
    }
}

/// Errors raised while loading or validating a [`Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config {}: {source}", .path.display())]
    Io {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The configuration is not valid JSON for [`Config`].
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A batch chunk must hold at least two graphs to make progress.
    #[error("Chunk size must be at least 2, got {0}")]
    InvalidChunkSize(usize),

    /// The pairwise search must be allowed to report at least one mapping.
    #[error("max_mappings must be at least 1")]
    InvalidMaxMappings,
}

/// Global run configuration.
///
/// - job_type: which reducer each task runs.
/// - policy: atom/bond compatibility for every pairwise comparison.
/// - chunk_size: graphs per task when a collection is partitioned.
/// - threads: worker threads for the batch driver (0 = rayon default).
/// - max_mappings: cap on tied mappings reported by one comparison.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Reducer selection.
    pub job_type: JobType,
    /// Atom/bond compatibility rules.
    pub policy: MatchingPolicy,
    /// Graphs per reduction task.
    pub chunk_size: usize,
    /// Worker threads, 0 lets rayon decide.
    pub threads: usize,
    /// Tied mappings reported per comparison.
    pub max_mappings: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            job_type: JobType::default(),
            policy: MatchingPolicy::default(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            threads: 0,
            max_mappings: DEFAULT_MAX_MAPPINGS,
        }
    }
}

impl Config {
    /// Start building a configuration from the defaults.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Continue building from this configuration, e.g. to layer CLI flags
    /// over a file.
    pub fn into_builder(self) -> ConfigBuilder {
        ConfigBuilder { config: self }
    }

    /// Check the values the batch driver and search rely on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidChunkSize`] or
    /// [`ConfigError::InvalidMaxMappings`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size < 2 {
            return Err(ConfigError::InvalidChunkSize(self.chunk_size));
        }
        if self.max_mappings == 0 {
            return Err(ConfigError::InvalidMaxMappings);
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration. Missing fields take their
    /// default values.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when parsing or validation fails.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the file cannot be read, parsed or
    /// validated.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded config from {}", path.display());
        Self::from_json_str(&text)
    }

    /// Serialize to pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if serialization fails.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Fluent builder for [`Config`].
#[derive(Clone, Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the reducer.
    pub const fn job_type(mut self, job_type: JobType) -> Self {
        self.config.job_type = job_type;
        self
    }

    /// Convenience: one representative fragment.
    pub const fn single(self) -> Self {
        self.job_type(JobType::Single)
    }

    /// Convenience: every tied minimal fragment.
    pub const fn multiple(self) -> Self {
        self.job_type(JobType::Multiple)
    }

    /// Replace the whole matching policy.
    pub const fn policy(mut self, policy: MatchingPolicy) -> Self {
        self.config.policy = policy;
        self
    }

    /// Set the atom comparator.
    pub const fn atom_match(mut self, atoms: AtomMatch) -> Self {
        self.config.policy.atoms = atoms;
        self
    }

    /// Set the bond comparator.
    pub const fn bond_match(mut self, bonds: BondMatch) -> Self {
        self.config.policy.bonds = bonds;
        self
    }

    /// Graphs per reduction task.
    pub const fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.config.chunk_size = chunk_size;
        self
    }

    /// Worker threads for the batch driver.
    pub const fn threads(mut self, threads: usize) -> Self {
        self.config.threads = threads;
        self
    }

    /// Cap on tied mappings per comparison.
    pub const fn max_mappings(mut self, max_mappings: usize) -> Self {
        self.config.max_mappings = max_mappings;
        self
    }

    /// Finish building. Validation is left to [`Config::validate`] so that
    /// partially layered builders stay cheap.
    pub fn build(self) -> Config {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;
    use rstest::rstest;
    use std::io::Write;

    #[test]
    fn default_is_exact_single() {
        let cfg = Config::default();
        assert_eq!(cfg.job_type, JobType::Single);
        assert_eq!(cfg.policy, MatchingPolicy::exact());
        assert_eq!(cfg.chunk_size, DEFAULT_CHUNK_SIZE);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn builder_layers_over_existing_config() {
        let base = Config::builder().multiple().chunk_size(4).build();
        let cfg = base
            .into_builder()
            .atom_match(AtomMatch::Relaxed)
            .threads(3)
            .build();

        assert_eq!(cfg.job_type, JobType::Multiple);
        assert_eq!(cfg.chunk_size, 4);
        assert_eq!(cfg.threads, 3);
        assert_eq!(cfg.policy.atoms, AtomMatch::Relaxed);
        assert_eq!(cfg.policy.bonds, BondMatch::Exact);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg = Config::from_json_str(r#"{ "job_type": "multiple", "policy": { "bonds": "relaxed" } }"#)
            .expect("valid config");
        assert_eq!(cfg.job_type, JobType::Multiple);
        assert_eq!(cfg.policy, MatchingPolicy::new(AtomMatch::Exact, BondMatch::Relaxed));
        assert_eq!(cfg.max_mappings, DEFAULT_MAX_MAPPINGS);
    }

    #[rstest]
    #[case(0, false)]
    #[case(1, false)]
    #[case(2, true)]
    #[case(64, true)]
    fn chunk_size_bounds(#[case] chunk_size: usize, #[case] valid: bool) {
        let json = format!(r#"{{ "chunk_size": {chunk_size} }}"#);
        match Config::from_json_str(&json) {
            Ok(cfg) => {
                assert!(valid);
                assert_eq!(cfg.chunk_size, chunk_size);
            }
            Err(err) => {
                assert!(!valid);
                assert!(matches!(err, ConfigError::InvalidChunkSize(n) if n == chunk_size));
            }
        }
    }

    #[rstest]
    #[case("single", JobType::Single)]
    #[case("multiple", JobType::Multiple)]
    fn job_type_from_json(#[case] name: &str, #[case] expected: JobType) {
        let cfg = Config::from_json_str(&format!(r#"{{ "job_type": "{name}" }}"#)).unwrap();
        assert_eq!(cfg.job_type, expected);
    }

    #[test]
    fn unknown_job_type_is_a_parse_error() {
        let err = Config::from_json_str(r#"{ "job_type": "all" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    quickcheck! {
        fn valid_configs_survive_json(chunk: u8, threads: u8, max_mappings: u8, multiple: bool) -> bool {
            let builder = Config::builder()
                .chunk_size(usize::from(chunk) + 2)
                .threads(usize::from(threads))
                .max_mappings(usize::from(max_mappings) + 1);
            let cfg = if multiple { builder.multiple() } else { builder.single() }.build();

            cfg.to_json_string()
                .and_then(|json| Config::from_json_str(&json))
                .is_ok_and(|loaded| loaded == cfg)
        }
    }

    #[test]
    fn rejects_zero_max_mappings() {
        let err = Config::builder().max_mappings(0).build().validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidMaxMappings));
    }

    #[test]
    fn json_file_round_trip() {
        let cfg = Config::builder().multiple().policy(MatchingPolicy::relaxed()).build();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(cfg.to_json_string().unwrap().as_bytes()).unwrap();

        let loaded = Config::from_json_file(file.path()).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Config::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn job_type_display() {
        assert_eq!(JobType::Single.to_string(), "single");
        assert_eq!(JobType::Multiple.to_string(), "multiple");
    }
}
