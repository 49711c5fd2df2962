use super::config::{ConfigError, PlaybackConfig};
use super::observer::{Observer, ObserverRegistry, SubscriptionId};
use super::state::{
    MAX_PROGRESS, MIN_PROGRESS, PlaybackSnapshot, PlaybackState, REARM_BELOW_PROGRESS,
    TRANSITION_STATE_PROGRESS,
};
use super::timer::{CountdownToken, FrameToken, TimerSlot};
use crate::core::utils::clamp_finite;
use tracing::{debug, info, trace};

/// What a frame or countdown callback did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Progress moved forward by one step.
    Advanced,
    /// Progress snapped to the transition state and the countdown started.
    PausedAtTransitionState,
    /// Progress reached the end and playback stopped.
    Finished,
    /// The countdown decreased and is still running.
    CountedDown { remaining: u32 },
    /// The countdown reached zero and playback resumed.
    Resumed,
    /// The callback's token was stale; nothing changed.
    Dropped,
}

/// The playback state machine and sole owner of reaction progress.
///
/// All mutation goes through `&mut self`, so two ticks can never be in flight at once. Frame and
/// countdown callbacks must present the token returned by [`frame_token`](Self::frame_token) or
/// [`countdown_token`](Self::countdown_token); tokens of a state that has since been left are
/// dropped.
pub struct PlaybackController {
    config: PlaybackConfig,
    progress: f64,
    state: PlaybackState,
    auto_pause: bool,
    has_paused_once: bool,
    frame: TimerSlot<FrameToken>,
    countdown: TimerSlot<CountdownToken>,
    observers: ObserverRegistry,
}

impl PlaybackController {
    pub fn new(config: PlaybackConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            progress: MIN_PROGRESS,
            state: PlaybackState::Idle,
            auto_pause: config.auto_pause,
            has_paused_once: false,
            frame: TimerSlot::new(),
            countdown: TimerSlot::new(),
            observers: ObserverRegistry::new(),
        })
    }

    #[inline]
    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// Progress on the 0..100 scale.
    #[inline]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Normalized progress in `[0, 1]`.
    #[inline]
    pub fn t(&self) -> f64 {
        self.progress / MAX_PROGRESS
    }

    #[inline]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[inline]
    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            progress: self.progress,
            state: self.state,
        }
    }

    #[inline]
    pub fn auto_pause(&self) -> bool {
        self.auto_pause
    }

    /// Whether the one-shot transition-state pause has already fired in this forward pass.
    #[inline]
    pub fn has_paused_once(&self) -> bool {
        self.has_paused_once
    }

    /// Token a host must present to [`on_frame`](Self::on_frame); live only while `Playing`.
    #[inline]
    pub fn frame_token(&self) -> Option<FrameToken> {
        self.frame.live()
    }

    /// Token a host must present to [`on_countdown`](Self::on_countdown); live only while paused
    /// at the transition state.
    #[inline]
    pub fn countdown_token(&self) -> Option<CountdownToken> {
        self.countdown.live()
    }

    pub fn play(&mut self) {
        match self.state {
            PlaybackState::Playing => {}
            PlaybackState::PausedAtTransitionState { .. } => {
                info!(progress = self.progress, "Resuming early from transition-state pause.");
                self.enter(PlaybackState::Playing);
            }
            PlaybackState::Idle | PlaybackState::PausedManual => {
                self.enter(PlaybackState::Playing);
            }
        }
    }

    pub fn pause(&mut self) {
        if matches!(
            self.state,
            PlaybackState::Playing | PlaybackState::PausedAtTransitionState { .. }
        ) {
            self.enter(PlaybackState::PausedManual);
        }
    }

    pub fn resume(&mut self) {
        if self.state.is_paused() {
            self.enter(PlaybackState::Playing);
        }
    }

    /// The play/pause button: resumes a transition-state pause, otherwise flips between playing
    /// and paused.
    pub fn toggle_play(&mut self) {
        if self.state.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Jumps to `value` (clamped to 0..100) and pauses there.
    pub fn seek(&mut self, value: f64) {
        let target = clamp_finite(value, MIN_PROGRESS, MAX_PROGRESS);
        if target < REARM_BELOW_PROGRESS {
            self.has_paused_once = false;
        }
        debug!(
            target,
            rearmed = !self.has_paused_once,
            "Seeking playback position."
        );
        self.progress = target;
        self.enter(PlaybackState::PausedManual);
    }

    pub fn reset(&mut self) {
        self.progress = MIN_PROGRESS;
        self.has_paused_once = false;
        self.enter(PlaybackState::Idle);
    }

    /// Changes whether future forward passes pause at the transition state. A pause already in
    /// progress is unaffected.
    pub fn set_auto_pause(&mut self, enabled: bool) {
        self.auto_pause = enabled;
    }

    pub fn toggle_auto_pause(&mut self) {
        self.auto_pause = !self.auto_pause;
    }

    /// Releases every timer token and stops, keeping the current progress.
    pub fn teardown(&mut self) {
        self.enter(PlaybackState::Idle);
    }

    /// Frame callback.
    pub fn on_frame(&mut self, token: FrameToken) -> TickOutcome {
        if !self.frame.is_live(token) {
            trace!(?token, "Dropping stale frame tick.");
            return TickOutcome::Dropped;
        }
        self.advance()
    }

    /// Countdown callback, expected once per second while paused at the transition state.
    pub fn on_countdown(&mut self, token: CountdownToken) -> TickOutcome {
        if !self.countdown.is_live(token) {
            trace!(?token, "Dropping stale countdown tick.");
            return TickOutcome::Dropped;
        }
        let PlaybackState::PausedAtTransitionState { countdown } = self.state else {
            return TickOutcome::Dropped;
        };
        let remaining = countdown.saturating_sub(1);
        if remaining == 0 {
            info!("Countdown elapsed; resuming playback.");
            self.enter(PlaybackState::Playing);
            TickOutcome::Resumed
        } else {
            self.enter(PlaybackState::PausedAtTransitionState {
                countdown: remaining,
            });
            TickOutcome::CountedDown { remaining }
        }
    }

    /// Delivers a frame tick with the live frame token, if any.
    pub fn tick(&mut self) -> TickOutcome {
        match self.frame.live() {
            Some(token) => self.on_frame(token),
            None => TickOutcome::Dropped,
        }
    }

    /// Delivers a countdown tick with the live countdown token, if any.
    pub fn countdown_tick(&mut self) -> TickOutcome {
        match self.countdown.live() {
            Some(token) => self.on_countdown(token),
            None => TickOutcome::Dropped,
        }
    }

    /// Registers an observer and immediately hands it the current snapshot.
    pub fn subscribe(&mut self, observer: Observer) -> SubscriptionId {
        let id = self.observers.subscribe(observer);
        self.observers.deliver_to(id, &self.snapshot());
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    fn advance(&mut self) -> TickOutcome {
        let next = self.progress + self.config.step_per_tick;

        let crosses_transition_state =
            self.progress < TRANSITION_STATE_PROGRESS && next >= TRANSITION_STATE_PROGRESS;
        if self.auto_pause && !self.has_paused_once && crosses_transition_state {
            self.progress = TRANSITION_STATE_PROGRESS;
            self.has_paused_once = true;
            info!(
                countdown = self.config.countdown_seconds,
                "Pausing at the transition state."
            );
            self.enter(PlaybackState::PausedAtTransitionState {
                countdown: self.config.countdown_seconds,
            });
            return TickOutcome::PausedAtTransitionState;
        }

        if next >= MAX_PROGRESS {
            self.progress = MAX_PROGRESS;
            info!("Reaction complete; playback stopped.");
            self.enter(PlaybackState::Idle);
            return TickOutcome::Finished;
        }

        self.progress = next;
        self.publish();
        TickOutcome::Advanced
    }

    /// Moves to `next`, keeping timer tokens in step with the state.
    fn enter(&mut self, next: PlaybackState) {
        let previous = self.state;
        match next {
            PlaybackState::Playing => {
                self.countdown.release();
                if self.frame.live().is_none() {
                    self.frame.acquire();
                }
            }
            PlaybackState::PausedAtTransitionState { .. } => {
                self.frame.release();
                if self.countdown.live().is_none() {
                    self.countdown.acquire();
                }
            }
            PlaybackState::Idle | PlaybackState::PausedManual => {
                self.frame.release();
                self.countdown.release();
            }
        }
        self.state = next;
        if previous != next {
            debug!(from = %previous, to = %next, progress = self.progress, "Playback state changed.");
        }
        self.publish();
    }

    fn publish(&mut self) {
        let snapshot = self.snapshot();
        self.observers.notify(snapshot);
    }
}
