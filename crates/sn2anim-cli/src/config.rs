//! Layered configuration for the command-line front end.
//!
//! Values are resolved in precedence order: command-line flag, then `--set KEY=VALUE`, then the
//! TOML file given with `--config`, then built-in defaults. The result is validated by the core
//! configuration builders.

pub mod builder;
pub mod defaults;
pub mod file;
pub mod models;

pub use builder::{FlagOverrides, build_config};
pub use models::AppConfig;
