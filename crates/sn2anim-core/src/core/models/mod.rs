//! # Core Models Module
//!
//! Data structures describing the six atoms of the animated SN2 system: one central carbon,
//! the incoming nucleophile, the departing leaving group and three equivalent light substituents.
//!
//! Positions are never stored independently. An [`atom::Atom`] is rebuilt every frame from the
//! kinematic model, so the records in this module carry identity and fixed visual properties
//! (radius, base color) alongside a freshly derived position.
//!
//! ## Key Components
//!
//! - [`atom`] - Atom roles, substituent indices, elements, styles and the per-frame atom record

pub mod atom;
