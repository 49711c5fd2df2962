use crate::cli::EnergyArgs;
use crate::error::Result;
use sn2anim::core::energy::{EnergyProfile, EnergySample};
use sn2anim::core::rules::annotations::is_high_energy;
use sn2anim::engine::error::EngineError;
use std::fmt::Write as _;
use tracing::info;

pub async fn run(args: EnergyArgs) -> Result<()> {
    let sample = EnergySample::generate(&EnergyProfile::REFERENCE);
    let peak = sample.peak();
    info!(
        points = sample.len(),
        peak_progress = peak.progress,
        peak_energy = peak.energy,
        "Generated energy sample."
    );

    match args.output {
        Some(path) => {
            sample
                .write_csv_to_path(&path)
                .map_err(EngineError::from)?;
            println!(
                "✓ Energy profile ({} points) written to: {}",
                sample.len(),
                path.display()
            );
        }
        None => print!("{}", render_table(&sample)),
    }

    Ok(())
}

fn render_table(sample: &EnergySample) -> String {
    let peak = sample.peak();
    let mut out = String::new();
    let _ = writeln!(out, "{:>8}  {:>12}", "progress", "energy (kJ)");
    for point in sample.series() {
        let marker = if point.progress == peak.progress {
            "  <- peak"
        } else if is_high_energy(point.energy) {
            "  *"
        } else {
            ""
        };
        let _ = writeln!(out, "{:>8}  {:>12.2}{}", point.progress, point.energy, marker);
    }
    out
}
