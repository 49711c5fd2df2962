use crate::cli::PlayArgs;
use crate::config::{FlagOverrides, build_config};
use crate::driver;
use crate::error::Result;
use crate::ui::{CliProgressHandler, UiEvent};
use sn2anim::core::energy::EnergyProfile;
use sn2anim::engine::error::EngineError;
use sn2anim::engine::progress::ProgressReporter;
use sn2anim::workflows::{
    self, animation::ReactionAnimation, frame::Frame, playback::PlaybackRunSummary,
};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tokio::sync::mpsc;
use tracing::{info, warn};

pub async fn run(
    args: PlayArgs,
    config_path: Option<&Path>,
    set_values: &[String],
    ui_sender: mpsc::Sender<UiEvent>,
) -> Result<()> {
    let flags = FlagOverrides {
        auto_pause: args.no_auto_pause.then_some(false),
        show_arrows: args.arrows.resolve(),
        show_distances: args.show_distances.then_some(true),
    };
    let app = build_config(config_path, set_values, flags)?;

    let mut animation =
        ReactionAnimation::new(app.playback, app.scene, &EnergyProfile::REFERENCE)?;

    let mut writer = match &args.frames_out {
        Some(path) => {
            info!("Writing frames to {:?}", path);
            Some(BufWriter::new(File::create(path)?))
        }
        None => None,
    };

    let progress_handler = CliProgressHandler::new(ui_sender);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Playing SN2 reaction ({})...",
        if args.realtime { "real time" } else { "headless" }
    );

    let summary = {
        let sink = |frame: &Frame| write_frame(writer.as_mut(), frame);
        if args.realtime {
            driver::run_realtime(&mut animation, &app.driver, &reporter, sink).await?
        } else {
            tokio::task::block_in_place(|| {
                workflows::playback::run(&mut animation, &app.driver, &reporter, sink)
            })?
        }
    };

    if let Some(writer) = writer.as_mut() {
        writer.flush()?;
    }

    print_summary(&summary);
    if let Some(path) = &args.frames_out {
        println!("✓ {} frames written to: {}", summary.frames + 1, path.display());
    }
    Ok(())
}

fn write_frame(
    writer: Option<&mut BufWriter<File>>,
    frame: &Frame,
) -> std::result::Result<(), EngineError> {
    let Some(writer) = writer else {
        return Ok(());
    };
    serde_json::to_writer(&mut *writer, frame).map_err(io::Error::from)?;
    writer.write_all(b"\n")?;
    Ok(())
}

fn print_summary(summary: &PlaybackRunSummary) {
    if !summary.completed {
        warn!(
            "Playback stopped at progress {:.3} before completion.",
            summary.final_progress
        );
        println!(
            "Warning: playback stopped at progress {:.3} (frame limit reached).",
            summary.final_progress
        );
    }
    println!(
        "Frames: {}  Countdown ticks: {}  Duration: {:.2}s",
        summary.frames, summary.countdown_ticks, summary.elapsed_seconds
    );
    match summary.paused_at {
        Some(progress) => println!("Paused at the transition state (progress {progress:.1})."),
        None => println!("No transition-state pause."),
    }
}
