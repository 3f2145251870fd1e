mod atom;
mod graph;
pub(crate) mod normalize;

pub use atom::{Atom, BondOrder};
pub use graph::MolecularGraph;
pub use normalize::{Identity, Normalizer, StripHydrogens};
