use super::in_partial_phase;
use crate::core::models::atom::AtomRole;
use crate::core::utils::clamp_unit;
use serde::Serialize;

/// Opacity of the central atom's partial-positive marker.
pub const CENTRAL_MARKER_OPACITY: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChargeMarker {
    /// Full negative formal charge.
    Anion,
    PartialNegative,
    PartialPositive,
}

impl ChargeMarker {
    pub fn symbol(self) -> &'static str {
        match self {
            ChargeMarker::Anion => "-",
            ChargeMarker::PartialNegative => "δ⁻",
            ChargeMarker::PartialPositive => "δ⁺",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChargeBadge {
    pub marker: ChargeMarker,
    pub opacity: f64,
}

impl ChargeBadge {
    const fn opaque(marker: ChargeMarker) -> Self {
        Self {
            marker,
            opacity: 1.0,
        }
    }
}

/// The charge marker drawn on an atom at `t`, if any.
///
/// The negative charge migrates from the nucleophile to the leaving group, passing through a
/// shared partial charge while both axial bonds are partial.
pub fn charge_marker(role: AtomRole, t: f64) -> Option<ChargeBadge> {
    let t = clamp_unit(t);
    let partial = in_partial_phase(t);
    let before = t < super::PARTIAL_PHASE_START;
    match role {
        AtomRole::Nucleophile if before => Some(ChargeBadge::opaque(ChargeMarker::Anion)),
        AtomRole::Nucleophile | AtomRole::LeavingGroup if partial => {
            Some(ChargeBadge::opaque(ChargeMarker::PartialNegative))
        }
        AtomRole::LeavingGroup if !before => Some(ChargeBadge::opaque(ChargeMarker::Anion)),
        AtomRole::Central if partial => Some(ChargeBadge {
            marker: ChargeMarker::PartialPositive,
            opacity: CENTRAL_MARKER_OPACITY,
        }),
        _ => None,
    }
}
