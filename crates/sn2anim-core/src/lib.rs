//! # sn2anim Core Library
//!
//! A deterministic reaction-progress engine that animates a single bimolecular
//! nucleophilic substitution (SN2) as a continuous function of a scalar progress value.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture so that everything derived from
//! progress stays a pure function, and the only mutable state lives in one place.
//!
//! - **[`core`]: The Foundation.** Stateless models and pure functions: atom roles and styles,
//!   the kinematic model (atom positions as functions of `t`), the free-energy profile and its
//!   precomputed sample, the perspective projection, and the bond/annotation rule engine.
//!
//! - **[`engine`]: The Logic Core.** The single stateful layer. It owns the playback state
//!   machine (`Idle`, `Playing`, `PausedAtTransitionState`, `PausedManual`), the timer tokens that
//!   make stale callbacks harmless, validated configuration, and change observation.
//!
//! - **[`workflows`]: The Public API.** Ties `core` and `engine` together: assembles the per-frame
//!   render payload, exposes the [`workflows::animation::ReactionAnimation`] façade consumed by
//!   rendering surfaces, and runs deterministic headless playback.

pub mod core;
pub mod engine;
pub mod workflows;
