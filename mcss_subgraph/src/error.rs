//! Error types for graph construction, pairwise search and serialization.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// A molecular graph failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// Element symbols must look like `C`, `Cl`, `Uue`.
    #[error("Atom {index} has invalid element symbol '{symbol}'")]
    InvalidSymbol {
        /// Offending atom.
        index: usize,
        /// The symbol as given.
        symbol: String,
    },

    /// An atom index does not exist in the graph.
    #[error("Atom {index} is outside the graph (0..{atoms})")]
    AtomOutOfRange {
        /// Requested atom.
        index: usize,
        /// Number of atoms in the graph.
        atoms: usize,
    },

    /// A bond joins an atom to itself.
    #[error("Atom {0} is bonded to itself")]
    SelfLoop(usize),

    /// Two bonds join the same atom pair.
    #[error("Atoms {a} and {b} are joined by more than one bond")]
    DuplicateBond {
        /// First endpoint.
        a: usize,
        /// Second endpoint.
        b: usize,
    },
}

/// Which side of a pairwise comparison an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphRole {
    /// The running seed.
    Query,
    /// The graph the seed is compared against.
    Target,
}

impl fmt::Display for GraphRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query => f.write_str("query"),
            Self::Target => f.write_str("target"),
        }
    }
}

/// A pairwise comparison was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    /// One of the inputs is not a valid molecular graph.
    #[error("Invalid {role} graph: {source}")]
    InvalidGraph {
        /// Which input failed.
        role: GraphRole,
        /// Why it failed.
        source: GraphError,
    },

    /// Any other failure reported by an oracle implementation.
    #[error("Comparison failed: {0}")]
    Search(String),
}

impl OracleError {
    /// Create a generic search failure.
    pub fn search(msg: impl Into<String>) -> Self {
        Self::Search(msg.into())
    }
}

/// The canonical string could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CanonicalError {
    /// Ring-closure labels only go up to 99.
    #[error("More than 99 ring closures open at once")]
    TooManyRingClosures,
}

/// Reading or writing a graph file failed.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read or written.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying failure.
        source: std::io::Error,
    },

    /// The file is not a JSON array of valid graphs.
    #[error("Failed to parse graphs in {}: {source}", .path.display())]
    Parse {
        /// File involved.
        path: PathBuf,
        /// Underlying failure, including graph validation errors.
        source: serde_json::Error,
    },
}
