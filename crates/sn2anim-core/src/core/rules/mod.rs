//! # Display Rules Module
//!
//! Pure functions of `t` (and two display toggles) that decide what is drawn and how.
//!
//! All thresholds here are exact contracts: visibility windows and fade formulas must reproduce
//! the reference behavior bit for bit, since renderers and tests rely on them.
//!
//! - [`bonds`] - Per-bond phase, stroke style and optional label
//! - [`annotations`] - Attack/leaving arrows, transition-state bracket and orbital lobes
//! - [`charges`] - Formal and partial charge markers on the reacting atoms

pub mod annotations;
pub mod bonds;
pub mod charges;

use crate::core::kinematics::TRANSITION_T;
use crate::core::utils::clamp_unit;
use serde::{Deserialize, Serialize};

/// Lower bound of the partial-bond window, inclusive.
pub const PARTIAL_PHASE_START: f64 = 0.2;
/// Upper bound of the partial-bond window, inclusive.
pub const PARTIAL_PHASE_END: f64 = 0.8;

/// User-controlled display switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DisplayToggles {
    /// Show the curved electron-pushing arrows.
    pub show_arrows: bool,
    /// Show interatomic distances and orbital lobes.
    pub show_distances: bool,
}

impl Default for DisplayToggles {
    fn default() -> Self {
        Self {
            show_arrows: true,
            show_distances: false,
        }
    }
}

/// `true` while both axial bonds are half-formed/half-broken.
#[inline]
pub fn in_partial_phase(t: f64) -> bool {
    (PARTIAL_PHASE_START..=PARTIAL_PHASE_END).contains(&clamp_unit(t))
}

/// Proximity to the transition state: `1` at `t = 0.5`, falling to `0` at `|t − 0.5| = 0.25`.
#[inline]
pub fn transition_state_proximity(t: f64) -> f64 {
    1.0 - ((clamp_unit(t) - TRANSITION_T).abs() * 4.0).min(1.0)
}
