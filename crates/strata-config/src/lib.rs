//! Configuration for the Strata world generator.
//!
//! Settings persist to disk as `config.ron` and can be overridden from the
//! command line. Every section is `#[serde(default)]`, so older or partial
//! files still load.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{Config, DebugConfig, OutputConfig, WorldConfig, default_config_dir};
pub use error::ConfigError;
