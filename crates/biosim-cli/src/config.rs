//! Layered engine configuration: built-in defaults, an optional TOML file, `-S`
//! overrides and finally command-line flags.

pub mod builder;
pub mod defaults;
pub mod file;
pub mod models;

pub use builder::{CliOverrides, build_config};
pub use models::AppConfig;
