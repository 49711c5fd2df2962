use super::{DisplayToggles, PARTIAL_PHASE_END, PARTIAL_PHASE_START, transition_state_proximity};
use crate::core::kinematics::ReactionGeometry;
use crate::core::models::atom::{AtomRole, SUBSTITUENT_COUNT, SubstituentIndex};
use serde::{Serialize, Serializer};
use std::fmt;

/// The nucleophile bond is absent up to and including this progress.
pub const NUCLEOPHILE_BOND_APPEARS_AFTER: f64 = 0.1;
/// The leaving-group bond is gone from this progress on.
pub const LEAVING_GROUP_BOND_GONE_AT: f64 = 0.85;
/// The nucleophile distance label appears only after this progress.
pub const NUCLEOPHILE_DISTANCE_LABEL_AFTER: f64 = 0.15;
/// Transition-state proximity above which the partial bond-order marker is shown.
pub const BOND_ORDER_PROXIMITY_THRESHOLD: f64 = 0.8;
/// The approximate bond order shown near the transition state.
pub const TRANSITION_STATE_BOND_ORDER: f64 = 0.5;

/// Every drawn bond joins the central atom to one partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BondKind {
    Substituent(SubstituentIndex),
    Nucleophile,
    LeavingGroup,
}

impl BondKind {
    pub const ALL: [BondKind; SUBSTITUENT_COUNT + 2] = [
        BondKind::Substituent(SubstituentIndex::FIRST),
        BondKind::Substituent(SubstituentIndex::SECOND),
        BondKind::Substituent(SubstituentIndex::THIRD),
        BondKind::Nucleophile,
        BondKind::LeavingGroup,
    ];

    /// The non-central endpoint of the bond.
    pub fn partner(self) -> AtomRole {
        match self {
            BondKind::Substituent(index) => AtomRole::Substituent(index),
            BondKind::Nucleophile => AtomRole::Nucleophile,
            BondKind::LeavingGroup => AtomRole::LeavingGroup,
        }
    }

    pub fn endpoints(self) -> (AtomRole, AtomRole) {
        (AtomRole::Central, self.partner())
    }
}

impl fmt::Display for BondKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C-{}", self.partner())
    }
}

impl Serialize for BondKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Qualitative bond order used to pick a stroke style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BondPhase {
    /// Not drawn.
    Absent,
    /// Just forming or about to break: thin, faded, dashed.
    Faint,
    /// Half-formed/half-broken around the transition state.
    Partial,
    /// A full covalent bond.
    Full,
}

/// Stroke parameters of a drawn bond.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StrokeStyle {
    pub width: f64,
    /// `(dash, gap)` lengths; `None` for a solid stroke.
    pub dash: Option<[f64; 2]>,
    pub opacity: f64,
}

pub const FULL_STROKE: StrokeStyle = StrokeStyle {
    width: 8.0,
    dash: None,
    opacity: 1.0,
};
pub const PARTIAL_STROKE: StrokeStyle = StrokeStyle {
    width: 6.0,
    dash: Some([10.0, 6.0]),
    opacity: 0.8,
};
pub const FAINT_STROKE: StrokeStyle = StrokeStyle {
    width: 2.0,
    dash: Some([4.0, 6.0]),
    opacity: 0.3,
};
pub const SUBSTITUENT_STROKE: StrokeStyle = StrokeStyle {
    width: 6.0,
    dash: None,
    opacity: 1.0,
};
pub const HIDDEN_STROKE: StrokeStyle = StrokeStyle {
    width: 0.0,
    dash: None,
    opacity: 0.0,
};

impl BondPhase {
    pub fn stroke(self) -> StrokeStyle {
        match self {
            BondPhase::Absent => HIDDEN_STROKE,
            BondPhase::Faint => FAINT_STROKE,
            BondPhase::Partial => PARTIAL_STROKE,
            BondPhase::Full => FULL_STROKE,
        }
    }
}

/// The optional numeric/qualitative label of an axial bond. At most one is shown per bond.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum BondLabel {
    /// Interatomic distance in ångström.
    Distance { angstroms: f64 },
    /// Qualitative "about half a bond" marker near the transition state.
    PartialBondOrder { order: f64 },
}

impl BondLabel {
    pub fn text(&self) -> String {
        match self {
            BondLabel::Distance { angstroms } => format!("{angstroms:.1} Å"),
            BondLabel::PartialBondOrder { order } => format!("BO ≈ {order}"),
        }
    }
}

/// Visibility and styling of one bond at one value of `t`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BondState {
    pub kind: BondKind,
    pub phase: BondPhase,
    pub visible: bool,
    pub stroke: StrokeStyle,
    pub label: Option<BondLabel>,
}

pub fn nucleophile_phase(t: f64) -> BondPhase {
    if t <= NUCLEOPHILE_BOND_APPEARS_AFTER {
        BondPhase::Absent
    } else if t < PARTIAL_PHASE_START {
        BondPhase::Faint
    } else if t <= PARTIAL_PHASE_END {
        BondPhase::Partial
    } else {
        BondPhase::Full
    }
}

pub fn leaving_group_phase(t: f64) -> BondPhase {
    if t >= LEAVING_GROUP_BOND_GONE_AT {
        BondPhase::Absent
    } else if t > PARTIAL_PHASE_END {
        BondPhase::Faint
    } else if t >= PARTIAL_PHASE_START {
        BondPhase::Partial
    } else {
        BondPhase::Full
    }
}

fn axial_label(
    kind: BondKind,
    geometry: &ReactionGeometry,
    toggles: DisplayToggles,
) -> Option<BondLabel> {
    let t = geometry.t;
    if toggles.show_distances {
        if kind == BondKind::Nucleophile && t <= NUCLEOPHILE_DISTANCE_LABEL_AFTER {
            return None;
        }
        let (a, b) = kind.endpoints();
        return Some(BondLabel::Distance {
            angstroms: geometry.distance_angstroms(a, b),
        });
    }
    (transition_state_proximity(t) > BOND_ORDER_PROXIMITY_THRESHOLD).then_some(
        BondLabel::PartialBondOrder {
            order: TRANSITION_STATE_BOND_ORDER,
        },
    )
}

pub fn bond_state(
    kind: BondKind,
    geometry: &ReactionGeometry,
    toggles: DisplayToggles,
) -> BondState {
    let t = geometry.t;
    match kind {
        BondKind::Substituent(_) => BondState {
            kind,
            phase: BondPhase::Full,
            visible: true,
            stroke: SUBSTITUENT_STROKE,
            label: None,
        },
        BondKind::Nucleophile | BondKind::LeavingGroup => {
            let phase = if kind == BondKind::Nucleophile {
                nucleophile_phase(t)
            } else {
                leaving_group_phase(t)
            };
            let visible = phase != BondPhase::Absent;
            BondState {
                kind,
                phase,
                visible,
                stroke: phase.stroke(),
                label: if visible {
                    axial_label(kind, geometry, toggles)
                } else {
                    None
                },
            }
        }
    }
}

/// States of all five bonds, in [`BondKind::ALL`] order.
pub fn bond_states(
    geometry: &ReactionGeometry,
    toggles: DisplayToggles,
) -> [BondState; SUBSTITUENT_COUNT + 2] {
    BondKind::ALL.map(|kind| bond_state(kind, geometry, toggles))
}

/// Convenience wrapper building the geometry for `t` first.
pub fn evaluate_bonds(t: f64, toggles: DisplayToggles) -> [BondState; SUBSTITUENT_COUNT + 2] {
    bond_states(&ReactionGeometry::at(t), toggles)
}
