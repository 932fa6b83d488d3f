//! Command-line argument parsing for the Strata camera tools.

use std::path::PathBuf;

use clap::Parser;

use crate::CameraConfig;

/// Strata camera command-line arguments.
///
/// CLI values override settings loaded from `camera.ron`.
#[derive(Parser, Debug)]
#[command(name = "strata", about = "Strata camera core")]
pub struct CliArgs {
    /// Base zoom level.
    #[arg(long)]
    pub base_zoom: Option<f32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Print the camera debug overlay while running.
    #[arg(long)]
    pub overlay: Option<bool>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl CameraConfig {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(zoom) = args.base_zoom {
            self.zoom.base_zoom = zoom;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if let Some(overlay) = args.overlay {
            self.debug.overlay = overlay;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = CameraConfig::default();
        let args = CliArgs {
            base_zoom: Some(1.5),
            log_level: Some("debug".to_string()),
            overlay: None,
            config: None,
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.zoom.base_zoom, 1.5);
        assert_eq!(config.debug.log_level, "debug");
        // Non-overridden fields retain defaults
        assert!(!config.debug.overlay);
        assert_eq!(config.zoom.max_zoom, 2.0);
    }

    #[test]
    fn test_cli_no_override() {
        let original = CameraConfig::default();
        let mut config = CameraConfig::default();
        let args = CliArgs {
            base_zoom: None,
            log_level: None,
            overlay: None,
            config: None,
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config, original);
    }
}
