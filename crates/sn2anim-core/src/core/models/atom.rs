use nalgebra::Point3;
use phf::{Map, phf_map};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of equivalent light substituents arranged around the central atom.
pub const SUBSTITUENT_COUNT: usize = 3;

/// Index of one of the three equivalent light substituents.
///
/// The index is always in `0..SUBSTITUENT_COUNT`; it can only be obtained through the
/// associated constants or the checked constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubstituentIndex(u8);

impl SubstituentIndex {
    pub const FIRST: Self = Self(0);
    pub const SECOND: Self = Self(1);
    pub const THIRD: Self = Self(2);

    pub const ALL: [Self; SUBSTITUENT_COUNT] = [Self::FIRST, Self::SECOND, Self::THIRD];

    pub fn new(index: usize) -> Option<Self> {
        (index < SUBSTITUENT_COUNT).then(|| Self(index as u8))
    }

    #[inline]
    pub fn get(self) -> usize {
        usize::from(self.0)
    }
}

/// The role an atom plays in the substitution.
///
/// Roles are the identity of atoms in this system: every derived quantity (position, bond,
/// label, charge marker) is looked up by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AtomRole {
    /// The electrophilic carbon undergoing inversion.
    Central,
    /// The incoming nucleophile, approaching from the side opposite the leaving group.
    Nucleophile,
    /// The leaving group (bromide) departing along the reaction axis.
    LeavingGroup,
    /// One of the three light substituents that flip like an umbrella.
    Substituent(SubstituentIndex),
}

impl AtomRole {
    pub const ALL: [AtomRole; 3 + SUBSTITUENT_COUNT] = [
        AtomRole::Central,
        AtomRole::Nucleophile,
        AtomRole::LeavingGroup,
        AtomRole::Substituent(SubstituentIndex::FIRST),
        AtomRole::Substituent(SubstituentIndex::SECOND),
        AtomRole::Substituent(SubstituentIndex::THIRD),
    ];

    pub fn element(self) -> Element {
        match self {
            AtomRole::Central => Element::Carbon,
            AtomRole::Nucleophile => Element::Nucleophile,
            AtomRole::LeavingGroup => Element::Bromine,
            AtomRole::Substituent(_) => Element::Hydrogen,
        }
    }

    pub fn style(self) -> AtomStyle {
        match self {
            AtomRole::Central => CENTRAL_STYLE,
            AtomRole::Nucleophile => NUCLEOPHILE_STYLE,
            AtomRole::LeavingGroup => LEAVING_GROUP_STYLE,
            AtomRole::Substituent(_) => SUBSTITUENT_STYLE,
        }
    }
}

impl fmt::Display for AtomRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AtomRole::Central => f.write_str("C"),
            AtomRole::Nucleophile => f.write_str("Nu"),
            AtomRole::LeavingGroup => f.write_str("Br"),
            AtomRole::Substituent(index) => write!(f, "H{}", index.get()),
        }
    }
}

impl Serialize for AtomRole {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

static ROLE_ALIASES: Map<&'static str, AtomRole> = phf_map! {
    "c" => AtomRole::Central,
    "central" => AtomRole::Central,
    "carbon" => AtomRole::Central,
    "nu" => AtomRole::Nucleophile,
    "nucleophile" => AtomRole::Nucleophile,
    "br" => AtomRole::LeavingGroup,
    "lg" => AtomRole::LeavingGroup,
    "leaving-group" => AtomRole::LeavingGroup,
    "leaving_group" => AtomRole::LeavingGroup,
    "bromine" => AtomRole::LeavingGroup,
    "h0" => AtomRole::Substituent(SubstituentIndex::FIRST),
    "h1" => AtomRole::Substituent(SubstituentIndex::SECOND),
    "h2" => AtomRole::Substituent(SubstituentIndex::THIRD),
};

#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("Unknown atom role tag: '{0}'. Expected one of C, Nu, Br, H0, H1, H2.")]
pub struct ParseRoleError(pub String);

impl FromStr for AtomRole {
    type Err = ParseRoleError;

    /// Parses a role tag case-insensitively, accepting the display tags (`C`, `Nu`, `Br`,
    /// `H0`..`H2`) and common long forms (`central`, `nucleophile`, `leaving-group`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ROLE_ALIASES
            .get(s.trim().to_ascii_lowercase().as_str())
            .copied()
            .ok_or_else(|| ParseRoleError(s.to_string()))
    }
}

/// Chemical identity used for labelling. The nucleophile is kept generic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Element {
    Carbon,
    Hydrogen,
    Bromine,
    Nucleophile,
}

impl Element {
    pub fn symbol(self) -> &'static str {
        match self {
            Element::Carbon => "C",
            Element::Hydrogen => "H",
            Element::Bromine => "Br",
            Element::Nucleophile => "Nu",
        }
    }
}

/// Fixed visual properties of an atom: drawing radius (scene units) and base color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AtomStyle {
    pub radius: f64,
    pub color: &'static str,
}

pub const CENTRAL_STYLE: AtomStyle = AtomStyle {
    radius: 34.0,
    color: "#334155",
};
pub const NUCLEOPHILE_STYLE: AtomStyle = AtomStyle {
    radius: 30.0,
    color: "#d946ef",
};
pub const LEAVING_GROUP_STYLE: AtomStyle = AtomStyle {
    radius: 32.0,
    color: "#991b1b",
};
pub const SUBSTITUENT_STYLE: AtomStyle = AtomStyle {
    radius: 24.0,
    color: "#f8fafc",
};

/// An atom as seen in one frame.
///
/// Recomputed from the kinematic model every frame and never mutated in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Atom {
    /// The role of the atom, which is also its identity.
    pub role: AtomRole,
    /// Position in scene units (40 units = 1 Å).
    pub position: Point3<f64>,
    /// Drawing radius in scene units.
    pub radius: f64,
    /// Base color as a hex string.
    pub color: &'static str,
}

impl Atom {
    pub fn new(role: AtomRole, position: Point3<f64>) -> Self {
        let style = role.style();
        Self {
            role,
            position,
            radius: style.radius,
            color: style.color,
        }
    }

    #[inline]
    pub fn depth(&self) -> f64 {
        self.position.z
    }
}
