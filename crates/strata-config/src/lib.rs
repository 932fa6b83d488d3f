//! Configuration for the Strata camera core.
//!
//! Provides runtime-tunable camera settings that persist to disk as RON files.
//! Supports CLI overrides via clap, hot-reload detection, and a validation
//! pass that rejects malformed tuning values before they reach the per-frame
//! update loop.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CameraConfig, DebugConfig, FollowConfig, ShakeConfig, ZoomConfig, default_config_dir,
};
pub use error::ConfigError;
