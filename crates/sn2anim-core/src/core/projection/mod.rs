//! # Projection Module
//!
//! Turns 3-D atom positions into 2-D drawable primitives.
//!
//! The model is an orthographic view with a perspective scale: `scale = f / (f − z)`. The draw
//! center is a fixed screen origin plus `(x, y)·scale`, the draw radius is the base radius times
//! `scale`, and opacity fades with `scale` but never drops below 0.3.
//!
//! Compositing uses the painter's algorithm ordered by raw `z`, descending. The order must be
//! recomputed every frame because the substituent ring rotates with `t`.
//!
//! - [`camera`] - The [`camera::Camera`] and the per-atom [`camera::Projection`]
//! - [`depth`] - Compositing order helpers

pub mod camera;
pub mod depth;

pub use camera::{Camera, CameraError, Projection, ScreenPoint};
pub use depth::{compositing_order, sort_for_compositing};
