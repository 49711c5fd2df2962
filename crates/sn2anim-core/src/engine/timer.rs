//! Scoped timer tokens.
//!
//! A host schedules callbacks and hands the token back on every invocation. A slot holds at most
//! one live token, and every acquisition issues a fresh generation, so a token that was released
//! can never become live again.

use std::fmt;

/// A token that identifies one scheduled callback stream.
pub trait TimerToken: Copy + Eq + fmt::Debug {
    fn from_generation(generation: u64) -> Self;
    fn generation(self) -> u64;
}

/// Token of the per-frame advance callback, live while `Playing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken(u64);

/// Token of the one-second countdown callback, live while paused at the transition state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CountdownToken(u64);

impl TimerToken for FrameToken {
    fn from_generation(generation: u64) -> Self {
        Self(generation)
    }
    fn generation(self) -> u64 {
        self.0
    }
}

impl TimerToken for CountdownToken {
    fn from_generation(generation: u64) -> Self {
        Self(generation)
    }
    fn generation(self) -> u64 {
        self.0
    }
}

#[derive(Debug)]
pub struct TimerSlot<T> {
    live: Option<T>,
    issued: u64,
}

impl<T> Default for TimerSlot<T> {
    fn default() -> Self {
        Self {
            live: None,
            issued: 0,
        }
    }
}

impl<T: TimerToken> TimerSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a fresh token, replacing any live one.
    pub fn acquire(&mut self) -> T {
        self.issued += 1;
        let token = T::from_generation(self.issued);
        self.live = Some(token);
        token
    }

    /// Releases the live token, returning it if there was one.
    pub fn release(&mut self) -> Option<T> {
        self.live.take()
    }

    #[inline]
    pub fn is_live(&self, token: T) -> bool {
        self.live == Some(token)
    }

    #[inline]
    pub fn live(&self) -> Option<T> {
        self.live
    }
}
