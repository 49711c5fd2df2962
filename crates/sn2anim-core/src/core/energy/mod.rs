//! # Energy Module
//!
//! The free-energy model of the reaction coordinate.
//!
//! The energy along the coordinate is the sum of a thermodynamic term, a sigmoid that carries the
//! system from the reactant energy (zero) to the reaction free energy, and an activation barrier,
//! a Gaussian bump at the transition state whose height makes the total at `t = 0.5` equal the
//! activation energy exactly.
//!
//! - [`profile`] - The closed-form [`profile::EnergyProfile`] and its anchored shape functions
//! - [`sample`] - The immutable 101-point [`sample::EnergySample`] used for display lookups
//!
//! Displayed energies are always looked up in the sample, never recomputed, so that the value
//! shown next to the curve is the value the curve was drawn with.

pub mod profile;
pub mod sample;

pub use profile::EnergyProfile;
pub use sample::{EnergyPoint, EnergySample};
