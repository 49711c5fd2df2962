use super::path::Waypoints;
use crate::core::models::atom::{Atom, AtomRole, SUBSTITUENT_COUNT, SubstituentIndex};
use crate::core::utils::clamp_unit;
use crate::core::utils::geometry::{distance, point_on_x_ring};
use nalgebra::Point3;

/// Scene units per ångström.
pub const UNITS_PER_ANGSTROM: f64 = 40.0;

/// Nucleophile x: 5 Å away, 2.4 Å at the transition state, 1.5 Å bonded.
pub const NUCLEOPHILE_PATH: Waypoints = Waypoints::new(-200.0, -96.0, -60.0);

/// Leaving-group x: 1.9 Å bonded, 2.7 Å breaking, 5 Å departed.
pub const LEAVING_GROUP_PATH: Waypoints = Waypoints::new(75.0, 108.0, 200.0);

/// Parameters of the three-substituent "umbrella".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UmbrellaParams {
    /// Ring x at `t = 0` (pointing away from the leaving group).
    pub start_x: f64,
    /// Ring x at `t = 1` (pointing away from the nucleophile).
    pub end_x: f64,
    /// Radius of the ring around the reaction axis.
    pub ring_radius: f64,
    /// Angular offsets of the substituents before rotation, in degrees.
    pub base_angles_deg: [f64; SUBSTITUENT_COUNT],
    /// Extra rotation of the ring per unit `t`, in radians.
    pub spin_per_unit_t: f64,
}

pub const UMBRELLA: UmbrellaParams = UmbrellaParams {
    start_x: -20.0,
    end_x: 20.0,
    ring_radius: 65.0,
    base_angles_deg: [90.0, 210.0, 330.0],
    spin_per_unit_t: 1.5,
};

#[inline]
pub fn nucleophile_x(t: f64) -> f64 {
    NUCLEOPHILE_PATH.at(t)
}

#[inline]
pub fn leaving_group_x(t: f64) -> f64 {
    LEAVING_GROUP_PATH.at(t)
}

/// Shared x of the substituent ring; inverts linearly across the reaction.
#[inline]
pub fn substituent_x(t: f64) -> f64 {
    let t = clamp_unit(t);
    UMBRELLA.start_x + (UMBRELLA.end_x - UMBRELLA.start_x) * t
}

/// Angle of one substituent around the reaction axis, in radians.
#[inline]
pub fn substituent_angle(index: SubstituentIndex, t: f64) -> f64 {
    let t = clamp_unit(t);
    UMBRELLA.base_angles_deg[index.get()].to_radians() + UMBRELLA.spin_per_unit_t * t
}

pub fn substituent_position(index: SubstituentIndex, t: f64) -> Point3<f64> {
    let center = Point3::new(substituent_x(t), 0.0, 0.0);
    point_on_x_ring(&center, UMBRELLA.ring_radius, substituent_angle(index, t))
}

/// Positions of all six atoms at one value of `t`.
///
/// Built by [`ReactionGeometry::at`]; identical `t` always yields identical geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReactionGeometry {
    /// The clamped progress this geometry was built for.
    pub t: f64,
    pub central: Point3<f64>,
    pub nucleophile: Point3<f64>,
    pub leaving_group: Point3<f64>,
    pub substituents: [Point3<f64>; SUBSTITUENT_COUNT],
}

impl ReactionGeometry {
    pub fn at(t: f64) -> Self {
        let t = clamp_unit(t);
        Self {
            t,
            central: Point3::origin(),
            nucleophile: Point3::new(nucleophile_x(t), 0.0, 0.0),
            leaving_group: Point3::new(leaving_group_x(t), 0.0, 0.0),
            substituents: SubstituentIndex::ALL.map(|index| substituent_position(index, t)),
        }
    }

    pub fn position_of(&self, role: AtomRole) -> Point3<f64> {
        match role {
            AtomRole::Central => self.central,
            AtomRole::Nucleophile => self.nucleophile,
            AtomRole::LeavingGroup => self.leaving_group,
            AtomRole::Substituent(index) => self.substituents[index.get()],
        }
    }

    /// The six atoms in [`AtomRole::ALL`] order.
    pub fn atoms(&self) -> [Atom; 3 + SUBSTITUENT_COUNT] {
        AtomRole::ALL.map(|role| Atom::new(role, self.position_of(role)))
    }

    /// Interatomic distance in ångström.
    pub fn distance_angstroms(&self, a: AtomRole, b: AtomRole) -> f64 {
        distance(&self.position_of(a), &self.position_of(b)) / UNITS_PER_ANGSTROM
    }
}
