//! Molecular graphs and pairwise maximum common substructure search.
//!
//! The [`PairwiseOracle`] trait is the seam the reducers in `mcss_task` call
//! through; [`McsOracle`] is the bundled exact implementation. Canonical keys
//! order and deduplicate fragments; canonical strings and ring perception are
//! diagnostics.

pub mod canon;
pub mod error;
pub mod model;
pub mod profiling;
pub mod rings;
pub mod util;

mod compat;
mod index;
mod mapping;
mod oracle;
mod search;
mod state;

pub use crate::canon::{canonical_key, canonical_ranks, to_canonical_string};
pub use crate::compat::{atoms_compatible, bonds_compatible};
pub use crate::error::{CanonicalError, GraphError, GraphRole, LoadError, OracleError};
pub use crate::mapping::AtomMapping;
pub use crate::model::{Atom, BondOrder, Identity, MolecularGraph, Normalizer, StripHydrogens};
pub use crate::oracle::{McsOracle, PairwiseOracle};
pub use crate::rings::RingInfo;
pub use crate::util::{load_graphs_from, save_graphs_to};
