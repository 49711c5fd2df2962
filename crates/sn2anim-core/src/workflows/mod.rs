//! # Workflows Module
//!
//! High-level entry points that tie the pure [`crate::core`] functions to the stateful
//! [`crate::engine`] controller.
//!
//! ## Overview
//!
//! Rendering surfaces, command-line tools and tests talk to sn2anim through this layer. It
//! assembles the complete per-frame render payload, exposes one façade over playback control,
//! frames and the energy curve, and provides a deterministic headless playback loop.
//!
//! ## Architecture
//!
//! - **Frames** ([`frame`]) - The render payload for one progress value: projected atoms in
//!   compositing order, styled bonds with labels, and layered annotations with screen geometry.
//! - **Animation** ([`animation`]) - [`animation::ReactionAnimation`], the surface consumed by
//!   renderers: controller operations, `frame_at`, `energy_at` and the energy series.
//! - **Playback** ([`playback`]) - Plays an animation to completion on a simulated clock and
//!   summarizes the run.

pub mod animation;
pub mod frame;
pub mod playback;
