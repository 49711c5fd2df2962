use crate::cli::FrameArgs;
use crate::config::{FlagOverrides, build_config};
use crate::error::{CliError, Result};
use serde::Serialize;
use sn2anim::core::energy::EnergyProfile;
use sn2anim::core::models::atom::AtomRole;
use sn2anim::workflows::animation::ReactionAnimation;
use sn2anim::workflows::frame::Frame;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Serialize)]
struct FrameOutput {
    #[serde(flatten)]
    frame: Frame,
    energy: f64,
    high_energy: bool,
}

pub async fn run(args: FrameArgs, config_path: Option<&Path>, set_values: &[String]) -> Result<()> {
    if !args.progress.is_finite() {
        return Err(CliError::Argument(format!(
            "progress must be a finite number, got {}",
            args.progress
        )));
    }

    let flags = FlagOverrides {
        show_arrows: args.arrows.resolve(),
        show_distances: args.show_distances.then_some(true),
        ..Default::default()
    };
    let app = build_config(config_path, set_values, flags)?;

    let mut animation =
        ReactionAnimation::new(app.playback, app.scene, &EnergyProfile::REFERENCE)?;
    animation.seek(args.progress);
    info!(progress = animation.progress(), "Rendering a single frame.");

    let output = frame_output(&animation, &args.atoms);
    let json = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{json}");

    Ok(())
}

fn frame_output(animation: &ReactionAnimation, atoms: &[AtomRole]) -> FrameOutput {
    let mut frame = animation.current_frame();
    if !atoms.is_empty() {
        debug!(?atoms, "Filtering frame atoms.");
        frame.retain_atoms(atoms);
    }
    FrameOutput {
        frame,
        energy: animation.current_energy(),
        high_energy: animation.is_high_energy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ArrowToggle;

    fn args(progress: f64) -> FrameArgs {
        FrameArgs {
            progress,
            arrows: ArrowToggle::default(),
            show_distances: false,
            atoms: Vec::new(),
            pretty: false,
        }
    }

    #[tokio::test]
    async fn non_finite_progress_is_rejected() {
        let result = run(args(f64::NAN), None, &[]).await;
        assert!(matches!(result, Err(CliError::Argument(_))));
    }

    #[tokio::test]
    async fn out_of_range_progress_is_clamped_not_rejected() {
        assert!(run(args(250.0), None, &[]).await.is_ok());
        assert!(run(args(-5.0), None, &[]).await.is_ok());
    }

    #[tokio::test]
    async fn invalid_set_value_surfaces_config_error() {
        let result = run(args(10.0), None, &["camera.focal-length=10".to_string()]).await;
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn atom_filter_limits_atoms_and_bonds() {
        let mut animation = ReactionAnimation::reference().unwrap();
        animation.seek(55.0);
        let output = frame_output(&animation, &[AtomRole::Nucleophile]);
        let value = serde_json::to_value(&output).unwrap();

        assert_eq!(value["progress"], 55.0);
        assert_eq!(value["atoms"].as_array().unwrap().len(), 1);
        assert_eq!(value["atoms"][0]["role"], "Nu");
        assert_eq!(value["bonds"].as_array().unwrap().len(), 1);
        assert_eq!(value["bonds"][0]["kind"], "C-Nu");
    }

    #[test]
    fn empty_atom_filter_keeps_full_frame() {
        let animation = ReactionAnimation::reference().unwrap();
        let output = frame_output(&animation, &[]);
        assert_eq!(output.frame.atoms.len(), 6);
        assert_eq!(output.frame.bonds.len(), 5);
    }

    #[tokio::test]
    async fn filtered_frame_command_succeeds() {
        let filtered = FrameArgs {
            atoms: vec![AtomRole::Central, AtomRole::LeavingGroup],
            ..args(42.0)
        };
        assert!(run(filtered, None, &[]).await.is_ok());
    }

    #[test]
    fn output_flattens_frame_fields() {
        let animation = ReactionAnimation::reference().unwrap();
        let output = FrameOutput {
            frame: animation.frame_at(0.5),
            energy: animation.energy_at(50),
            high_energy: true,
        };
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["t"], 0.5);
        assert_eq!(value["energy"], 110.0);
        assert_eq!(value["high_energy"], true);
        assert!(value["atoms"].is_array());
        assert!(value["bonds"].is_array());
    }
}
