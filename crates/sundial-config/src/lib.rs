//! Configuration for the Sundial terrain preview.
//!
//! Settings persist to disk as a RON file, can be overridden from the command
//! line via clap, and are range-checked before the preview starts.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    AnimationConfig, Config, DebugConfig, LandscapeConfig, LightingConfig, LocationConfig,
    ViewportConfig,
};
pub use error::ConfigError;
