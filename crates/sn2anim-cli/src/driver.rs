//! Real-time playback on tokio timers.
//!
//! Each timer is held together with the controller token it serves. A timer is created when the
//! controller hands out a new token (on entering `Playing` or the transition-state pause) and
//! dropped as soon as that token is no longer live, so no interval outlives its state.

use sn2anim::engine::config::DriverConfig;
use sn2anim::engine::controller::TickOutcome;
use sn2anim::engine::error::EngineError;
use sn2anim::engine::progress::{Progress, ProgressReporter};
use sn2anim::engine::state::{MAX_PROGRESS, PlaybackState};
use sn2anim::engine::timer::{CountdownToken, FrameToken};
use sn2anim::workflows::animation::ReactionAnimation;
use sn2anim::workflows::frame::Frame;
use sn2anim::workflows::playback::{PlaybackRunSummary, frame_limit_message};
use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};
use tracing::{debug, info, warn};

const COUNTDOWN_PERIOD: Duration = Duration::from_secs(1);

type TimerSlot<T> = Option<(T, Interval)>;

fn scheduled(period: Duration) -> Interval {
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

/// Keeps `slot` in step with the controller's live token.
fn sync_slot<T: Copy + PartialEq + std::fmt::Debug>(
    slot: &mut TimerSlot<T>,
    live: Option<T>,
    period: Duration,
) {
    let current = slot.as_ref().map(|(token, _)| *token);
    if current == live {
        return;
    }
    *slot = live.map(|token| {
        debug!(?token, ?period, "Scheduling timer.");
        (token, scheduled(period))
    });
}

async fn next_tick<T: Copy>(slot: &mut TimerSlot<T>) -> T {
    match slot {
        Some((token, interval)) => {
            interval.tick().await;
            *token
        }
        None => std::future::pending().await,
    }
}

/// Callback counts collected while driving one run.
#[derive(Debug, Default)]
struct RunCounters {
    frames: u64,
    countdown_ticks: u64,
    paused_at: Option<f64>,
}

/// Resets `animation` and plays it to completion against tokio's clock.
///
/// If `sink` fails the controller is torn down, releasing both timers, before the error is
/// returned.
pub async fn run_realtime<F>(
    animation: &mut ReactionAnimation,
    driver: &DriverConfig,
    reporter: &ProgressReporter<'_>,
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
    info!(frame_rate = driver.frame_rate_hz, "Starting real-time playback.");

    animation.reset();
    animation.play();

    let started = Instant::now();
    let counters = match drive(animation, driver, reporter, &mut sink).await {
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
            "Stopping real-time playback early."
        );
        reporter.report(Progress::Message(frame_limit_message(
            driver.max_frames,
            final_progress,
        )));
    }
    animation.teardown();

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);

    Ok(PlaybackRunSummary {
        frames: counters.frames,
        countdown_ticks: counters.countdown_ticks,
        elapsed_seconds: started.elapsed().as_secs_f64(),
        paused_at: counters.paused_at,
        final_progress,
        completed,
    })
}

async fn drive<F>(
    animation: &mut ReactionAnimation,
    driver: &DriverConfig,
    reporter: &ProgressReporter<'_>,
    sink: &mut F,
) -> Result<RunCounters, EngineError>
where
    F: FnMut(&Frame) -> Result<(), EngineError>,
{
    let frame_period = Duration::from_secs_f64(driver.frame_interval_secs());
    sink(&animation.current_frame())?;

    let mut frame_timer: TimerSlot<FrameToken> = None;
    let mut countdown_timer: TimerSlot<CountdownToken> = None;
    let mut counters = RunCounters::default();
    let mut reported_position = 0u64;

    loop {
        sync_slot(&mut frame_timer, animation.frame_token(), frame_period);
        sync_slot(&mut countdown_timer, animation.countdown_token(), COUNTDOWN_PERIOD);
        if frame_timer.is_none() && countdown_timer.is_none() {
            break;
        }
        if counters.frames >= driver.max_frames {
            break;
        }

        tokio::select! {
            token = next_tick(&mut frame_timer) => {
                let outcome = animation.on_frame(token);
                if outcome == TickOutcome::Dropped {
                    continue;
                }
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
            token = next_tick(&mut countdown_timer) => {
                let outcome = animation.on_countdown(token);
                let remaining = match outcome {
                    TickOutcome::Dropped => continue,
                    TickOutcome::CountedDown { remaining } => remaining,
                    _ => 0,
                };
                counters.countdown_ticks += 1;
                reporter.report(Progress::Countdown { remaining });
            }
        }
    }

    Ok(counters)
}
