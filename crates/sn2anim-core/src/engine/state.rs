use serde::Serialize;
use std::fmt;

/// Lower end of the progress scale.
pub const MIN_PROGRESS: f64 = 0.0;
/// Upper end of the progress scale; playback stops here.
pub const MAX_PROGRESS: f64 = 100.0;
/// Progress at which the automatic transition-state pause snaps.
pub const TRANSITION_STATE_PROGRESS: f64 = 50.0;
/// Seeking strictly below this progress re-arms the one-shot transition-state pause.
pub const REARM_BELOW_PROGRESS: f64 = 49.0;

/// The four states of the playback controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum PlaybackState {
    /// Not advancing. Initial state, after `reset`, and after reaching the end.
    Idle,
    /// Advancing on every frame tick.
    Playing,
    /// Frozen at exactly the transition state while the countdown runs.
    PausedAtTransitionState {
        /// Whole seconds left before playback resumes on its own.
        countdown: u32,
    },
    /// Frozen at an arbitrary progress by `pause` or `seek`.
    PausedManual,
}

impl PlaybackState {
    #[inline]
    pub fn is_playing(self) -> bool {
        matches!(self, PlaybackState::Playing)
    }

    #[inline]
    pub fn is_paused(self) -> bool {
        matches!(
            self,
            PlaybackState::PausedAtTransitionState { .. } | PlaybackState::PausedManual
        )
    }

    /// Remaining countdown seconds, if paused at the transition state.
    #[inline]
    pub fn countdown(self) -> Option<u32> {
        match self {
            PlaybackState::PausedAtTransitionState { countdown } => Some(countdown),
            _ => None,
        }
    }
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackState::Idle => f.write_str("idle"),
            PlaybackState::Playing => f.write_str("playing"),
            PlaybackState::PausedAtTransitionState { countdown } => {
                write!(f, "paused at transition state ({countdown}s)")
            }
            PlaybackState::PausedManual => f.write_str("paused"),
        }
    }
}

/// What observers see after every change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlaybackSnapshot {
    /// Progress on the 0..100 scale.
    pub progress: f64,
    pub state: PlaybackState,
}

impl PlaybackSnapshot {
    /// Normalized progress `t = progress / 100`.
    #[inline]
    pub fn t(&self) -> f64 {
        self.progress / MAX_PROGRESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paused_states_are_reported_as_paused() {
        assert!(PlaybackState::PausedManual.is_paused());
        assert!(PlaybackState::PausedAtTransitionState { countdown: 2 }.is_paused());
        assert!(!PlaybackState::Idle.is_paused());
        assert!(!PlaybackState::Playing.is_paused());
        assert!(PlaybackState::Playing.is_playing());
    }

    #[test]
    fn countdown_is_only_exposed_at_transition_state() {
        assert_eq!(
            PlaybackState::PausedAtTransitionState { countdown: 3 }.countdown(),
            Some(3)
        );
        assert_eq!(PlaybackState::PausedManual.countdown(), None);
    }

    #[test]
    fn states_display_in_lower_case() {
        assert_eq!(PlaybackState::Idle.to_string(), "idle");
        assert_eq!(
            PlaybackState::PausedAtTransitionState { countdown: 1 }.to_string(),
            "paused at transition state (1s)"
        );
    }

    #[test]
    fn snapshot_normalizes_progress() {
        let snapshot = PlaybackSnapshot {
            progress: 50.0,
            state: PlaybackState::Playing,
        };
        assert_eq!(snapshot.t(), 0.5);
    }
}
