use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::AppConfig;
use crate::error::{CliError, Result};
use sn2anim::engine::config::{DriverConfigBuilder, PlaybackConfigBuilder, SceneConfigBuilder};
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Settings given directly as command-line flags. These take precedence over everything else.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FlagOverrides {
    pub auto_pause: Option<bool>,
    pub show_arrows: Option<bool>,
    pub show_distances: Option<bool>,
}

pub fn build_config(
    config_path: Option<&Path>,
    set_values: &[String],
    flags: FlagOverrides,
) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = match config_path {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    let file_config = apply_set_values(file_config, set_values)?;
    debug!("Merged file and --set configuration: {:?}", file_config);

    let playback_file = file_config.playback.unwrap_or_default();
    let camera_file = file_config.camera.unwrap_or_default();
    let display_file = file_config.display.unwrap_or_default();
    let driver_file = file_config.driver.unwrap_or_default();

    let playback = PlaybackConfigBuilder::new()
        .step_per_tick(
            playback_file
                .step_per_tick
                .unwrap_or(defaults.step_per_tick),
        )
        .auto_pause(
            flags
                .auto_pause
                .or(playback_file.auto_pause)
                .unwrap_or(defaults.auto_pause),
        )
        .countdown_seconds(
            playback_file
                .countdown_seconds
                .unwrap_or(defaults.countdown_seconds),
        )
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let scene = SceneConfigBuilder::new()
        .focal_length(camera_file.focal_length.unwrap_or(defaults.focal_length))
        .origin_x(camera_file.origin_x.unwrap_or(defaults.origin_x))
        .origin_y(camera_file.origin_y.unwrap_or(defaults.origin_y))
        .show_arrows(
            flags
                .show_arrows
                .or(display_file.show_arrows)
                .unwrap_or(defaults.show_arrows),
        )
        .show_distances(
            flags
                .show_distances
                .or(display_file.show_distances)
                .unwrap_or(defaults.show_distances),
        )
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let driver = DriverConfigBuilder::new()
        .frame_rate_hz(driver_file.frame_rate.unwrap_or(defaults.frame_rate))
        .max_frames(driver_file.max_frames.unwrap_or(defaults.max_frames))
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        playback,
        scene,
        driver,
    })
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value))
    })
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };
        let key = key.trim();

        match key {
            "playback.step-per-tick" => {
                config
                    .playback
                    .get_or_insert_with(Default::default)
                    .step_per_tick = Some(parse_value(key, value_str, "float")?);
            }
            "playback.auto-pause" => {
                config.playback.get_or_insert_with(Default::default).auto_pause =
                    Some(parse_value(key, value_str, "boolean")?);
            }
            "playback.countdown-seconds" => {
                config
                    .playback
                    .get_or_insert_with(Default::default)
                    .countdown_seconds = Some(parse_value(key, value_str, "integer")?);
            }
            "camera.focal-length" => {
                config.camera.get_or_insert_with(Default::default).focal_length =
                    Some(parse_value(key, value_str, "float")?);
            }
            "camera.origin-x" => {
                config.camera.get_or_insert_with(Default::default).origin_x =
                    Some(parse_value(key, value_str, "float")?);
            }
            "camera.origin-y" => {
                config.camera.get_or_insert_with(Default::default).origin_y =
                    Some(parse_value(key, value_str, "float")?);
            }
            "display.show-arrows" => {
                config.display.get_or_insert_with(Default::default).show_arrows =
                    Some(parse_value(key, value_str, "boolean")?);
            }
            "display.show-distances" => {
                config
                    .display
                    .get_or_insert_with(Default::default)
                    .show_distances = Some(parse_value(key, value_str, "boolean")?);
            }
            "driver.frame-rate" => {
                config.driver.get_or_insert_with(Default::default).frame_rate =
                    Some(parse_value(key, value_str, "float")?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sn2anim::core::projection::Camera;
    use sn2anim::engine::config::{DriverConfig, PlaybackConfig};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::{TempDir, tempdir};

    fn write_config(toml: &str) -> (TempDir, PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sn2anim.toml");
        fs::write(&path, toml).unwrap();
        (dir, path)
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_match_reference_configuration() {
        let app = build_config(None, &[], FlagOverrides::default()).unwrap();
        assert_eq!(app.playback, PlaybackConfig::default());
        assert_eq!(app.scene.camera().unwrap(), Camera::default());
        assert!(app.scene.toggles.show_arrows);
        assert!(!app.scene.toggles.show_distances);
        assert_eq!(app.driver, DriverConfig::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let (_dir, path) = write_config(
            r#"
            [playback]
            step-per-tick = 0.5
            countdown-seconds = 2

            [camera]
            focal-length = 900.0

            [display]
            show-distances = true

            [driver]
            frame-rate = 30.0
            "#,
        );

        let app = build_config(Some(&path), &[], FlagOverrides::default()).unwrap();
        assert_eq!(app.playback.step_per_tick, 0.5);
        assert_eq!(app.playback.countdown_seconds, 2);
        assert!(app.playback.auto_pause);
        assert_eq!(app.scene.focal_length, 900.0);
        assert!(app.scene.toggles.show_distances);
        assert_eq!(app.driver.frame_rate_hz, 30.0);
    }

    #[test]
    fn set_values_override_file() {
        let (_dir, path) = write_config("[playback]\nstep-per-tick = 0.5\n");
        let set = strings(&[
            "playback.step-per-tick=0.25",
            "playback.auto-pause=false",
            "camera.origin-x=320",
            "camera.origin-y=200",
            "display.show-arrows=false",
            "driver.frame-rate=120",
        ]);

        let app = build_config(Some(&path), &set, FlagOverrides::default()).unwrap();
        assert_eq!(app.playback.step_per_tick, 0.25);
        assert!(!app.playback.auto_pause);
        assert_eq!(app.scene.origin.x, 320.0);
        assert_eq!(app.scene.origin.y, 200.0);
        assert!(!app.scene.toggles.show_arrows);
        assert_eq!(app.driver.frame_rate_hz, 120.0);
    }

    #[test]
    fn flags_override_set_values() {
        let set = strings(&["playback.auto-pause=true", "display.show-arrows=true"]);
        let flags = FlagOverrides {
            auto_pause: Some(false),
            show_arrows: Some(false),
            show_distances: Some(true),
        };

        let app = build_config(None, &set, flags).unwrap();
        assert!(!app.playback.auto_pause);
        assert!(!app.scene.toggles.show_arrows);
        assert!(app.scene.toggles.show_distances);
    }

    #[test]
    fn malformed_set_values_are_rejected() {
        for bad in [
            "playback.step-per-tick",
            "playback.step-per-tick=fast",
            "display.show-arrows=maybe",
            "render.width=800",
        ] {
            let result = build_config(None, &strings(&[bad]), FlagOverrides::default());
            assert!(matches!(result, Err(CliError::Config(_))), "accepted {bad}");
        }
    }

    #[test]
    fn invalid_values_are_rejected_by_core_validation() {
        let set = strings(&["playback.step-per-tick=-1"]);
        assert!(matches!(
            build_config(None, &set, FlagOverrides::default()),
            Err(CliError::Config(_))
        ));

        let set = strings(&["camera.focal-length=10"]);
        assert!(matches!(
            build_config(None, &set, FlagOverrides::default()),
            Err(CliError::Config(_))
        ));
    }
}
