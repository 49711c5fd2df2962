use std::io;
use thiserror::Error;

use super::config::ConfigError;
use crate::core::energy::profile::ProfileError;
use crate::core::energy::sample::SampleExportError;
use crate::core::projection::CameraError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Invalid energy profile: {source}")]
    Profile {
        #[from]
        source: ProfileError,
    },

    #[error("Invalid camera: {source}")]
    Camera {
        #[from]
        source: CameraError,
    },

    #[error("Energy sample export failed: {source}")]
    Export {
        #[from]
        source: SampleExportError,
    },

    #[error("Failed to emit frame: {source}")]
    FrameSink {
        #[from]
        source: io::Error,
    },
}
