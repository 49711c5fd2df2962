use crate::core::kinematics::geometry::UMBRELLA;
use crate::core::projection::{Camera, CameraError, ScreenPoint};
use crate::core::rules::DisplayToggles;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for '{name}': {value} ({reason})")]
    InvalidValue {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}

fn require_positive_finite(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::InvalidValue {
            name,
            value,
            reason: "must be finite",
        });
    }
    if value <= 0.0 {
        return Err(ConfigError::InvalidValue {
            name,
            value,
            reason: "must be positive",
        });
    }
    Ok(value)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackConfig {
    /// Progress added per frame tick, on the 0..100 scale.
    pub step_per_tick: f64,
    /// Whether the first forward crossing of the transition state pauses playback.
    pub auto_pause: bool,
    /// Length of the transition-state countdown, in whole seconds.
    pub countdown_seconds: u32,
}

impl PlaybackConfig {
    pub const REFERENCE_STEP_PER_TICK: f64 = 0.125;
    pub const REFERENCE_COUNTDOWN_SECONDS: u32 = 3;

    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive_finite("step_per_tick", self.step_per_tick)?;
        if self.step_per_tick > 100.0 {
            return Err(ConfigError::InvalidValue {
                name: "step_per_tick",
                value: self.step_per_tick,
                reason: "must not exceed the full progress range",
            });
        }
        if self.countdown_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                name: "countdown_seconds",
                value: 0.0,
                reason: "must be at least one second",
            });
        }
        Ok(())
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            step_per_tick: Self::REFERENCE_STEP_PER_TICK,
            auto_pause: true,
            countdown_seconds: Self::REFERENCE_COUNTDOWN_SECONDS,
        }
    }
}

#[derive(Default)]
pub struct PlaybackConfigBuilder {
    step_per_tick: Option<f64>,
    auto_pause: Option<bool>,
    countdown_seconds: Option<u32>,
}

impl PlaybackConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step_per_tick(mut self, step: f64) -> Self {
        self.step_per_tick = Some(step);
        self
    }
    pub fn auto_pause(mut self, enabled: bool) -> Self {
        self.auto_pause = Some(enabled);
        self
    }
    pub fn countdown_seconds(mut self, seconds: u32) -> Self {
        self.countdown_seconds = Some(seconds);
        self
    }

    pub fn build(self) -> Result<PlaybackConfig, ConfigError> {
        let defaults = PlaybackConfig::default();
        let config = PlaybackConfig {
            step_per_tick: self.step_per_tick.unwrap_or(defaults.step_per_tick),
            auto_pause: self.auto_pause.unwrap_or(defaults.auto_pause),
            countdown_seconds: self.countdown_seconds.unwrap_or(defaults.countdown_seconds),
        };
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneConfig {
    pub focal_length: f64,
    pub origin: ScreenPoint,
    pub toggles: DisplayToggles,
}

impl SceneConfig {
    /// The camera described by this configuration.
    pub fn camera(&self) -> Result<Camera, CameraError> {
        Camera::new(self.focal_length, self.origin)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive_finite("focal_length", self.focal_length)?;
        if self.focal_length <= UMBRELLA.ring_radius {
            return Err(ConfigError::InvalidValue {
                name: "focal_length",
                value: self.focal_length,
                reason: "must exceed the substituent ring radius so every atom stays in front of the camera",
            });
        }
        if !self.origin.x.is_finite() {
            return Err(ConfigError::InvalidValue {
                name: "origin_x",
                value: self.origin.x,
                reason: "must be finite",
            });
        }
        if !self.origin.y.is_finite() {
            return Err(ConfigError::InvalidValue {
                name: "origin_y",
                value: self.origin.y,
                reason: "must be finite",
            });
        }
        Ok(())
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            focal_length: Camera::REFERENCE_FOCAL_LENGTH,
            origin: Camera::REFERENCE_ORIGIN,
            toggles: DisplayToggles::default(),
        }
    }
}

#[derive(Default)]
pub struct SceneConfigBuilder {
    focal_length: Option<f64>,
    origin_x: Option<f64>,
    origin_y: Option<f64>,
    show_arrows: Option<bool>,
    show_distances: Option<bool>,
}

impl SceneConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focal_length(mut self, focal_length: f64) -> Self {
        self.focal_length = Some(focal_length);
        self
    }
    pub fn origin_x(mut self, x: f64) -> Self {
        self.origin_x = Some(x);
        self
    }
    pub fn origin_y(mut self, y: f64) -> Self {
        self.origin_y = Some(y);
        self
    }
    pub fn show_arrows(mut self, enabled: bool) -> Self {
        self.show_arrows = Some(enabled);
        self
    }
    pub fn show_distances(mut self, enabled: bool) -> Self {
        self.show_distances = Some(enabled);
        self
    }

    pub fn build(self) -> Result<SceneConfig, ConfigError> {
        let defaults = SceneConfig::default();
        let config = SceneConfig {
            focal_length: self.focal_length.unwrap_or(defaults.focal_length),
            origin: ScreenPoint::new(
                self.origin_x.unwrap_or(defaults.origin.x),
                self.origin_y.unwrap_or(defaults.origin.y),
            ),
            toggles: DisplayToggles {
                show_arrows: self.show_arrows.unwrap_or(defaults.toggles.show_arrows),
                show_distances: self
                    .show_distances
                    .unwrap_or(defaults.toggles.show_distances),
            },
        };
        config.validate()?;
        Ok(config)
    }
}

/// Settings of a host loop that drives the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriverConfig {
    /// Frame callbacks per second while playing.
    pub frame_rate_hz: f64,
    /// Upper bound on frame callbacks before a run gives up.
    pub max_frames: u64,
}

impl DriverConfig {
    pub const REFERENCE_FRAME_RATE_HZ: f64 = 60.0;
    pub const REFERENCE_MAX_FRAMES: u64 = 100_000;

    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive_finite("frame_rate_hz", self.frame_rate_hz)?;
        if self.max_frames == 0 {
            return Err(ConfigError::InvalidValue {
                name: "max_frames",
                value: 0.0,
                reason: "must be positive",
            });
        }
        Ok(())
    }

    /// Seconds between two frame callbacks.
    pub fn frame_interval_secs(&self) -> f64 {
        1.0 / self.frame_rate_hz
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            frame_rate_hz: Self::REFERENCE_FRAME_RATE_HZ,
            max_frames: Self::REFERENCE_MAX_FRAMES,
        }
    }
}

#[derive(Default)]
pub struct DriverConfigBuilder {
    frame_rate_hz: Option<f64>,
    max_frames: Option<u64>,
}

impl DriverConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame_rate_hz(mut self, hz: f64) -> Self {
        self.frame_rate_hz = Some(hz);
        self
    }
    pub fn max_frames(mut self, frames: u64) -> Self {
        self.max_frames = Some(frames);
        self
    }

    pub fn build(self) -> Result<DriverConfig, ConfigError> {
        let defaults = DriverConfig::default();
        let config = DriverConfig {
            frame_rate_hz: self.frame_rate_hz.unwrap_or(defaults.frame_rate_hz),
            max_frames: self.max_frames.unwrap_or(defaults.max_frames),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playback_builder_defaults_to_reference_values() {
        let config = PlaybackConfigBuilder::new().build().unwrap();
        assert_eq!(config, PlaybackConfig::default());
        assert_eq!(config.step_per_tick, 0.125);
        assert!(config.auto_pause);
        assert_eq!(config.countdown_seconds, 3);
    }

    #[test]
    fn playback_builder_rejects_non_positive_step() {
        for step in [0.0, -0.125, f64::NAN, f64::INFINITY, 150.0] {
            let err = PlaybackConfigBuilder::new()
                .step_per_tick(step)
                .build()
                .unwrap_err();
            assert!(matches!(
                err,
                ConfigError::InvalidValue {
                    name: "step_per_tick",
                    ..
                }
            ));
        }
    }

    #[test]
    fn playback_builder_rejects_zero_countdown() {
        let err = PlaybackConfigBuilder::new()
            .countdown_seconds(0)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                name: "countdown_seconds",
                ..
            }
        ));
    }

    #[test]
    fn playback_builder_applies_overrides() {
        let config = PlaybackConfigBuilder::new()
            .step_per_tick(0.5)
            .auto_pause(false)
            .countdown_seconds(5)
            .build()
            .unwrap();
        assert_eq!(config.step_per_tick, 0.5);
        assert!(!config.auto_pause);
        assert_eq!(config.countdown_seconds, 5);
    }

    #[test]
    fn scene_builder_produces_reference_camera_by_default() {
        let scene = SceneConfigBuilder::new().build().unwrap();
        assert_eq!(scene.camera().unwrap(), Camera::default());
        assert_eq!(scene.toggles, DisplayToggles::default());
    }

    #[test]
    fn scene_builder_rejects_focal_length_inside_the_scene() {
        assert!(SceneConfigBuilder::new().focal_length(65.0).build().is_err());
        assert!(SceneConfigBuilder::new().focal_length(-600.0).build().is_err());
        assert!(SceneConfigBuilder::new().focal_length(66.0).build().is_ok());
    }

    #[test]
    fn scene_builder_rejects_non_finite_origin() {
        let err = SceneConfigBuilder::new()
            .origin_y(f64::NAN)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { name: "origin_y", .. }));
    }

    #[test]
    fn scene_builder_sets_toggles() {
        let scene = SceneConfigBuilder::new()
            .show_arrows(false)
            .show_distances(true)
            .build()
            .unwrap();
        assert!(!scene.toggles.show_arrows);
        assert!(scene.toggles.show_distances);
    }

    #[test]
    fn driver_config_defaults_to_sixty_hertz() {
        let driver = DriverConfigBuilder::new().build().unwrap();
        assert_eq!(driver.frame_rate_hz, 60.0);
        assert!((driver.frame_interval_secs() - 1.0 / 60.0).abs() < 1e-12);
    }

    #[test]
    fn driver_config_rejects_invalid_rate_and_limit() {
        assert!(DriverConfigBuilder::new().frame_rate_hz(0.0).build().is_err());
        assert!(DriverConfigBuilder::new().max_frames(0).build().is_err());
    }
}
