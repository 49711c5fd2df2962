//! # Kinematics Module
//!
//! Maps normalized reaction progress `t ∈ [0, 1]` to the 3-D position of every atom.
//!
//! The reaction axis is the x axis. The nucleophile approaches from −x, the leaving group departs
//! towards +x, and the three light substituents sit on a ring in the y–z plane whose x position
//! inverts across the reaction (Walden inversion) while the ring slowly spins.
//!
//! - [`path`] - Three-waypoint piecewise-linear paths joined at the transition state
//! - [`geometry`] - Reference constants and the full per-frame [`geometry::ReactionGeometry`]

pub mod geometry;
pub mod path;

pub use geometry::ReactionGeometry;
pub use path::{TRANSITION_T, Waypoints};
