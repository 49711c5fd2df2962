use sn2anim::engine::config::{DriverConfig, PlaybackConfig, SceneConfig};

/// Fully resolved and validated settings for one command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppConfig {
    pub playback: PlaybackConfig,
    pub scene: SceneConfig,
    pub driver: DriverConfig,
}
