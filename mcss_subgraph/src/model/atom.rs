use std::fmt;

use serde::{Deserialize, Serialize};

/// Symbols that can be written without brackets in the canonical string.
const ORGANIC_SUBSET: &[&str] = &["B", "C", "N", "O", "P", "S", "F", "Cl", "Br", "I"];

/// A vertex of a molecular graph.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Atom {
    /// Element symbol, e.g. `C`, `Cl`.
    pub symbol: String,
    /// Formal charge.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub charge: i8,
    /// Mass number, if the atom is a specific isotope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isotope: Option<u16>,
    /// Member of an aromatic system.
    #[serde(default, skip_serializing_if = "is_false")]
    pub aromatic: bool,
    /// Implicit hydrogen count.
    #[serde(default, skip_serializing_if = "is_zero_u8")]
    pub hydrogens: u8,
}

const fn is_zero(v: &i8) -> bool {
    *v == 0
}

const fn is_zero_u8(v: &u8) -> bool {
    *v == 0
}

const fn is_false(v: &bool) -> bool {
    !*v
}

impl Atom {
    /// A neutral, non-aromatic atom with no implicit hydrogens.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            charge: 0,
            isotope: None,
            aromatic: false,
            hydrogens: 0,
        }
    }

    /// An aromatic atom.
    pub fn aromatic(symbol: impl Into<String>) -> Self {
        Self {
            aromatic: true,
            ..Self::new(symbol)
        }
    }

    /// Set the formal charge.
    pub fn with_charge(mut self, charge: i8) -> Self {
        self.charge = charge;
        self
    }

    /// Set the isotope mass number.
    pub fn with_isotope(mut self, isotope: u16) -> Self {
        self.isotope = Some(isotope);
        self
    }

    /// Set the implicit hydrogen count.
    pub fn with_hydrogens(mut self, hydrogens: u8) -> Self {
        self.hydrogens = hydrogens;
        self
    }

    /// Explicit hydrogen vertex.
    pub fn is_hydrogen(&self) -> bool {
        self.symbol == "H"
    }

    /// Whether the symbol is a plausible element symbol: an uppercase letter
    /// followed by at most two lowercase letters.
    pub fn has_valid_symbol(&self) -> bool {
        let mut chars = self.symbol.chars();
        let Some(first) = chars.next() else {
            return false;
        };
        let rest: Vec<char> = chars.collect();
        first.is_ascii_uppercase() && rest.len() <= 2 && rest.iter().all(char::is_ascii_lowercase)
    }

    /// Whether the atom can be written without brackets.
    pub(crate) fn is_organic_subset(&self) -> bool {
        self.charge == 0 && self.isotope.is_none() && ORGANIC_SUBSET.contains(&self.symbol.as_str())
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(iso) = self.isotope {
            write!(f, "{iso}")?;
        }
        if self.aromatic {
            f.write_str(&self.symbol.to_ascii_lowercase())?;
        } else {
            f.write_str(&self.symbol)?;
        }
        match self.charge {
            0 => Ok(()),
            1 => f.write_str("+"),
            -1 => f.write_str("-"),
            c if c > 0 => write!(f, "+{c}"),
            c => write!(f, "{c}"),
        }
    }
}

/// An edge of a molecular graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BondOrder {
    /// Single bond.
    Single,
    /// Double bond.
    Double,
    /// Triple bond.
    Triple,
    /// Aromatic bond.
    Aromatic,
}

impl BondOrder {
    /// Symbol used by the canonical string. Single bonds are implicit.
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Single => "",
            Self::Double => "=",
            Self::Triple => "#",
            Self::Aromatic => ":",
        }
    }

    /// Small integer used in canonical invariants.
    pub(crate) const fn rank(self) -> u8 {
        match self {
            Self::Single => 1,
            Self::Double => 2,
            Self::Triple => 3,
            Self::Aromatic => 4,
        }
    }
}
