use super::animation::ReactionAnimation;
use super::frame::Frame;
use crate::engine::config::DriverConfig;
use crate::engine::controller::TickOutcome;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::state::{MAX_PROGRESS, PlaybackState};
use serde::Serialize;
use tracing::{info, instrument, warn};

/// Seconds of simulated time per countdown callback.
const COUNTDOWN_INTERVAL_SECS: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlaybackRunSummary {
    /// Frame callbacks delivered.
    pub frames: u64,
    /// Countdown callbacks delivered.
    pub countdown_ticks: u64,
    /// Wall-clock time of the run, simulated or real depending on the driver.
    pub elapsed_seconds: f64,
    /// Progress at which the automatic transition-state pause happened, if it did.
    pub paused_at: Option<f64>,
    pub final_progress: f64,
    /// `true` if playback reached the end before the frame limit.
    pub completed: bool,
}

/// Callback counts collected while driving one run.
#[derive(Debug, Default)]
struct RunCounters {
    frames: u64,
    countdown_ticks: u64,
    paused_at: Option<f64>,
}

/// Resets `animation` and plays it to completion on a simulated clock.
///
/// Frame callbacks arrive every `1 / frame_rate` seconds while playing and countdown callbacks
/// every second while paused at the transition state, so a run is fully deterministic. Every
/// frame produced by a frame callback, plus the initial one, is handed to `sink`. If `sink`
/// fails the controller is torn down before the error is returned.
#[instrument(skip_all, name = "playback_workflow")]
pub fn run<F>(
    animation: &mut ReactionAnimation,
    driver: &DriverConfig,
    reporter: &ProgressReporter,
    mut sink: F,
) -> Result<PlaybackRunSummary, EngineError>
where
    F: FnMut(&Frame) -> Result<(), EngineError>,
{
    driver.validate()?;

    reporter.report(Progress::PhaseStart { name: "Playback" });
    reporter.report(Progress::TaskStart {
        total_steps: MAX_PROGRESS as u64,
    });
    info!(
        frame_rate = driver.frame_rate_hz,
        max_frames = driver.max_frames,
        "Starting headless playback."
    );

    animation.reset();
    animation.play();

    let counters = match drive(animation, driver, reporter, &mut sink) {
        Ok(counters) => counters,
        Err(e) => {
            warn!(progress = animation.progress(), error = %e, "Frame sink failed; stopping.");
            animation.teardown();
            return Err(e);
        }
    };

    let final_progress = animation.progress();
    let completed = animation.state() == PlaybackState::Idle && final_progress >= MAX_PROGRESS;
    if !completed {
        warn!(
            frames = counters.frames,
            progress = final_progress,
            "Frame limit reached before playback finished; stopping."
        );
        reporter.report(Progress::Message(frame_limit_message(
            driver.max_frames,
            final_progress,
        )));
        animation.teardown();
    }

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);

    let summary = PlaybackRunSummary {
        frames: counters.frames,
        countdown_ticks: counters.countdown_ticks,
        elapsed_seconds: counters.frames as f64 * driver.frame_interval_secs()
            + counters.countdown_ticks as f64 * COUNTDOWN_INTERVAL_SECS,
        paused_at: counters.paused_at,
        final_progress,
        completed,
    };
    info!(
        frames = summary.frames,
        countdown_ticks = summary.countdown_ticks,
        elapsed_seconds = summary.elapsed_seconds,
        "Headless playback finished."
    );
    Ok(summary)
}

/// Text reported when a run stops at the frame limit.
pub fn frame_limit_message(max_frames: u64, progress: f64) -> String {
    format!("Stopped after {max_frames} frames at progress {progress:.3} (frame limit).")
}

fn drive<F>(
    animation: &mut ReactionAnimation,
    driver: &DriverConfig,
    reporter: &ProgressReporter,
    sink: &mut F,
) -> Result<RunCounters, EngineError>
where
    F: FnMut(&Frame) -> Result<(), EngineError>,
{
    sink(&animation.current_frame())?;

    let mut counters = RunCounters::default();
    let mut reported_position = 0u64;

    while counters.frames < driver.max_frames {
        match animation.state() {
            PlaybackState::Playing => {
                let Some(token) = animation.frame_token() else {
                    break;
                };
                let outcome = animation.on_frame(token);
                counters.frames += 1;
                sink(&animation.current_frame())?;

                let position = animation.progress().floor() as u64;
                if position != reported_position {
                    reported_position = position;
                    reporter.report(Progress::TaskAdvance { position });
                }
                if outcome == TickOutcome::PausedAtTransitionState {
                    counters.paused_at = Some(animation.progress());
                    if let Some(remaining) = animation.state().countdown() {
                        reporter.report(Progress::Countdown { remaining });
                    }
                }
            }
            PlaybackState::PausedAtTransitionState { .. } => {
                let Some(token) = animation.countdown_token() else {
                    break;
                };
                let outcome = animation.on_countdown(token);
                counters.countdown_ticks += 1;
                let remaining = match outcome {
                    TickOutcome::CountedDown { remaining } => remaining,
                    _ => 0,
                };
                reporter.report(Progress::Countdown { remaining });
            }
            PlaybackState::Idle | PlaybackState::PausedManual => break,
        }
    }

    Ok(counters)
}
