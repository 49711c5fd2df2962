use sn2anim::core::projection::Camera;
use sn2anim::engine::config::{DriverConfig, PlaybackConfig};

/// Values used when neither a flag, `--set`, nor the config file provides one.
pub struct DefaultsConfig {
    pub step_per_tick: f64,
    pub auto_pause: bool,
    pub countdown_seconds: u32,
    pub focal_length: f64,
    pub origin_x: f64,
    pub origin_y: f64,
    pub show_arrows: bool,
    pub show_distances: bool,
    pub frame_rate: f64,
    pub max_frames: u64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            step_per_tick: PlaybackConfig::REFERENCE_STEP_PER_TICK,
            auto_pause: true,
            countdown_seconds: PlaybackConfig::REFERENCE_COUNTDOWN_SECONDS,
            focal_length: Camera::REFERENCE_FOCAL_LENGTH,
            origin_x: Camera::REFERENCE_ORIGIN.x,
            origin_y: Camera::REFERENCE_ORIGIN.y,
            show_arrows: true,
            show_distances: false,
            frame_rate: DriverConfig::REFERENCE_FRAME_RATE_HZ,
            max_frames: DriverConfig::REFERENCE_MAX_FRAMES,
        }
    }
}
