//! # Engine Module
//!
//! This module implements the playback engine of sn2anim: the one stateful component that owns
//! the reaction progress and decides how it evolves over time.
//!
//! ## Overview
//!
//! Everything derived from progress (positions, energy, projection, styling) is a pure function
//! in [`crate::core`]. The engine holds the single source of truth for `progress` and the playback
//! state, advances it on frame ticks, pauses automatically once per forward pass at the
//! transition state, and resumes after a countdown driven by a separate one-second timer.
//!
//! ## Architecture
//!
//! - **Controller** ([`controller`]) - The playback state machine and its public surface
//! - **State** ([`state`]) - Playback states, snapshots and the progress landmarks
//! - **Timers** ([`timer`]) - Scoped tokens for the frame and countdown callbacks
//! - **Observation** ([`observer`]) - Change notification for UI shells and scrubbers
//! - **Configuration** ([`config`]) - Validated playback, scene and driver settings
//! - **Progress Monitoring** ([`progress`]) - Progress reporting for long-running drivers
//! - **Error Handling** ([`error`]) - Engine-level error aggregation
//!
//! ## Timer Model
//!
//! A host schedules two kinds of callbacks: a frame callback while `Playing`, and a one-second
//! countdown callback while paused at the transition state. Each callback carries the token it
//! was scheduled with. Tokens are acquired on entering a state and released on leaving it by
//! any path (`seek`, `reset`, `play`, `pause`, `teardown`), so a callback that fires after its
//! state was left is recognized as stale and dropped without touching progress or state.

pub mod config;
pub mod controller;
pub mod error;
pub mod observer;
pub mod progress;
pub mod state;
pub mod timer;
