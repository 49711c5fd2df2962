//! # Core Module
//!
//! Stateless building blocks of the reaction-progress engine. Every function in this module is a
//! pure function of the normalized progress `t ∈ [0, 1]` (plus, where noted, a small set of
//! display toggles or camera parameters). Nothing here holds mutable state, so the same `t` always
//! produces identical output, which is what makes scrubbing and replay deterministic.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Atom roles, elements and fixed visual styles
//! - **Kinematics** ([`kinematics`]) - Piecewise-linear approach/departure paths and the umbrella flip
//! - **Energetics** ([`energy`]) - Closed-form free-energy profile and its immutable 101-point sample
//! - **Projection** ([`projection`]) - Perspective divide to screen space and compositing order
//! - **Display Rules** ([`rules`]) - Bond styles, labels, transient annotations and charge markers
//! - **Utilities** ([`utils`]) - Small geometric helpers shared by the modules above

pub mod energy;
pub mod kinematics;
pub mod models;
pub mod projection;
pub mod rules;
pub mod utils;
