use clap::{Args, Parser, Subcommand};
use sn2anim::core::models::atom::AtomRole;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan, Ted Yu",
    version,
    about = "sn2anim - Render, inspect and play back an animated SN2 reaction from the command line.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S playback.step-per-tick=0.25
    #[arg(
        short = 'S',
        long = "set",
        global = true,
        value_name = "KEY=VALUE",
        num_args(0..)
    )]
    pub set_values: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the render payload for a single progress value as JSON.
    Frame(FrameArgs),
    /// Print the sampled free-energy curve, or export it as CSV.
    Energy(EnergyArgs),
    /// Play the reaction from start to finish.
    Play(PlayArgs),
}

/// Mutually exclusive flags for the curved-arrow annotations.
#[derive(Args, Debug, Clone, Copy, Default)]
#[group(required = false, multiple = false)]
pub struct ArrowToggle {
    /// Show the electron-pushing arrows.
    #[arg(long)]
    pub show_arrows: bool,
    /// Hide the electron-pushing arrows.
    #[arg(long)]
    pub hide_arrows: bool,
}

impl ArrowToggle {
    pub fn resolve(self) -> Option<bool> {
        match (self.show_arrows, self.hide_arrows) {
            (true, false) => Some(true),
            (false, true) => Some(false),
            _ => None,
        }
    }
}

/// Arguments for the `frame` subcommand.
#[derive(Args, Debug)]
pub struct FrameArgs {
    /// Reaction progress, from 0 (reactants) to 100 (products).
    #[arg(short, long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub progress: f64,

    #[command(flatten)]
    pub arrows: ArrowToggle,

    /// Show interatomic distances and orbital lobes.
    #[arg(long)]
    pub show_distances: bool,

    /// Only include these atoms and the bonds touching them (C, Nu, Br, H0, H1, H2).
    #[arg(short, long = "atom", value_name = "ROLE")]
    pub atoms: Vec<AtomRole>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pub pretty: bool,
}

/// Arguments for the `energy` subcommand.
#[derive(Args, Debug)]
pub struct EnergyArgs {
    /// Write the series as CSV (`progress,energy`) instead of printing a table.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `play` subcommand.
#[derive(Args, Debug)]
pub struct PlayArgs {
    /// Drive playback from real timers instead of a simulated clock.
    #[arg(long)]
    pub realtime: bool,

    /// Do not pause at the transition state.
    #[arg(long)]
    pub no_auto_pause: bool,

    /// Write every frame as one JSON object per line.
    #[arg(long, value_name = "PATH")]
    pub frames_out: Option<PathBuf>,

    #[command(flatten)]
    pub arrows: ArrowToggle,

    /// Show interatomic distances and orbital lobes in written frames.
    #[arg(long)]
    pub show_distances: bool,
}
