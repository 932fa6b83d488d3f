//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Platform config directory for Strata (e.g. `~/.config/strata`),
/// falling back to the working directory when none is available.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("strata")
}

/// Top-level camera configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Follow-offset and smoothing settings.
    pub follow: FollowConfig,
    /// Zoom range and movement-state zoom deltas.
    pub zoom: ZoomConfig,
    /// Default shake parameters.
    pub shake: ShakeConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Follow behavior: positional bias magnitudes and smoothing time constants.
///
/// Offsets are in world units; divisors scale the velocity-proportional
/// bias terms (larger divisor = weaker velocity influence).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FollowConfig {
    /// Smoothing time constant for the position channels, in seconds.
    pub position_smooth_time: f32,
    /// Horizontal look-ahead while walking, signed by facing direction.
    pub base_offset: f32,
    /// Horizontal look-ahead while running (velocity is ignored).
    pub run_offset: f32,
    /// Divisor applied to horizontal velocity for the walk look-ahead term.
    pub horizontal_divisor: f32,
    /// Upward bias while grounded or jumping.
    pub ground_offset: f32,
    /// Downward bias while fast-falling or wall-sliding.
    pub descend_offset: f32,
    /// Divisor applied to vertical velocity during fast descent.
    pub vertical_divisor: f32,
    /// Downward bias while falling normally.
    pub fall_offset: f32,
    /// Maximum horizontal distance the camera may sit from the actor.
    pub max_offset_x: f32,
    /// Maximum vertical distance the camera may sit from the actor.
    pub max_offset_y: f32,
}

/// Zoom range and the movement-state zoom deltas.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ZoomConfig {
    /// Zoom level with no overrides or movement deltas applied.
    pub base_zoom: f32,
    /// Lower bound of the published zoom level.
    pub min_zoom: f32,
    /// Upper bound of the published zoom level.
    pub max_zoom: f32,
    /// Positive delta (zoom out) applied while running.
    pub run_zoom_out: f32,
    /// Magnitude of the negative delta (zoom in) applied while teleporting.
    pub teleport_zoom_in: f32,
    /// Smoothing time constant for the zoom channel, in seconds.
    pub zoom_smooth_time: f32,
}

/// Default parameters for camera shake requests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShakeConfig {
    /// Shake duration in seconds.
    pub duration: f32,
    /// Overall shake strength multiplier.
    pub magnitude: f32,
    /// Horizontal sampling range in world units.
    pub x_range: f32,
    /// Vertical sampling range in world units.
    pub y_range: f32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Print the camera debug overlay while running.
    pub overlay: bool,
}

// --- Default implementations ---

impl Default for FollowConfig {
    fn default() -> Self {
        Self {
            position_smooth_time: 0.25,
            base_offset: 1.5,
            run_offset: 3.0,
            horizontal_divisor: 8.0,
            ground_offset: 1.0,
            descend_offset: 2.0,
            vertical_divisor: 6.0,
            fall_offset: 1.0,
            max_offset_x: 6.0,
            max_offset_y: 4.0,
        }
    }
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            base_zoom: 1.0,
            min_zoom: 0.5,
            max_zoom: 2.0,
            run_zoom_out: 0.15,
            teleport_zoom_in: 0.25,
            zoom_smooth_time: 0.4,
        }
    }
}

impl Default for ShakeConfig {
    fn default() -> Self {
        Self {
            duration: 0.4,
            magnitude: 1.0,
            x_range: 0.35,
            y_range: 0.25,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            overlay: false,
        }
    }
}

// --- Load / Save / Reload / Validate ---

impl CameraConfig {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("camera.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: CameraConfig = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            config.validate()?;
            log::info!("Loaded camera config from {}", config_path.display());
            Ok(config)
        } else {
            let config = CameraConfig::default();
            config.save(config_dir)?;
            log::info!("Created default camera config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `camera.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("camera.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    /// A reloaded config that fails validation is rejected without replacing
    /// the running one.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("camera.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: CameraConfig =
            ron::from_str(&contents).map_err(ConfigError::ParseError)?;
        new_config.validate()?;

        if &new_config != self {
            log::info!("Camera config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    /// Reject tuning values that would corrupt the per-frame update:
    /// non-positive smoothing time constants, zero damping divisors,
    /// an inverted or non-positive zoom range, or any non-finite value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let f = &self.follow;
        let z = &self.zoom;

        if !f.position_smooth_time.is_finite() || f.position_smooth_time <= 0.0 {
            return Err(ConfigError::InvalidValue(format!(
                "follow.position_smooth_time must be positive, got {}",
                f.position_smooth_time
            )));
        }
        if !z.zoom_smooth_time.is_finite() || z.zoom_smooth_time <= 0.0 {
            return Err(ConfigError::InvalidValue(format!(
                "zoom.zoom_smooth_time must be positive, got {}",
                z.zoom_smooth_time
            )));
        }
        if !f.horizontal_divisor.is_finite() || f.horizontal_divisor <= 0.0 {
            return Err(ConfigError::InvalidValue(format!(
                "follow.horizontal_divisor must be positive, got {}",
                f.horizontal_divisor
            )));
        }
        if !f.vertical_divisor.is_finite() || f.vertical_divisor <= 0.0 {
            return Err(ConfigError::InvalidValue(format!(
                "follow.vertical_divisor must be positive, got {}",
                f.vertical_divisor
            )));
        }
        for (name, value) in [
            ("follow.base_offset", f.base_offset),
            ("follow.run_offset", f.run_offset),
            ("follow.ground_offset", f.ground_offset),
            ("follow.descend_offset", f.descend_offset),
            ("follow.fall_offset", f.fall_offset),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::InvalidValue(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        for (name, value) in [
            ("follow.max_offset_x", f.max_offset_x),
            ("follow.max_offset_y", f.max_offset_y),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }
        if !z.min_zoom.is_finite() || z.min_zoom <= 0.0 {
            return Err(ConfigError::InvalidValue(format!(
                "zoom.min_zoom must be positive, got {}",
                z.min_zoom
            )));
        }
        if !z.max_zoom.is_finite() || z.max_zoom < z.min_zoom {
            return Err(ConfigError::InvalidValue(format!(
                "zoom range is inverted: min_zoom={} max_zoom={}",
                z.min_zoom, z.max_zoom
            )));
        }
        if !z.base_zoom.is_finite() || z.base_zoom < z.min_zoom || z.base_zoom > z.max_zoom {
            return Err(ConfigError::InvalidValue(format!(
                "zoom.base_zoom {} outside [{}, {}]",
                z.base_zoom, z.min_zoom, z.max_zoom
            )));
        }
        for (name, value) in [
            ("zoom.run_zoom_out", z.run_zoom_out),
            ("zoom.teleport_zoom_in", z.teleport_zoom_in),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::InvalidValue(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = CameraConfig::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(!ron_str.is_empty());
        assert!(ron_str.contains("run_offset: 3.0"));
        assert!(ron_str.contains("max_zoom: 2.0"));
    }

    #[test]
    fn test_config_roundtrip() {
        let config = CameraConfig::default();
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: CameraConfig = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_field_uses_default() {
        // Config missing the `shake` section entirely
        let ron_str = "(follow: (), zoom: (), debug: ())";
        let config: CameraConfig = ron::from_str(ron_str).unwrap();
        assert_eq!(config.shake, ShakeConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let ron_str = "(future_setting: true)";
        let result: Result<CameraConfig, _> = ron::from_str(ron_str);
        assert!(result.is_ok());
    }

    #[test]
    fn test_default_config_validates() {
        assert!(CameraConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_smooth_time_rejected() {
        let mut config = CameraConfig::default();
        config.follow.position_smooth_time = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_zoom_smooth_time_rejected() {
        let mut config = CameraConfig::default();
        config.zoom.zoom_smooth_time = -0.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_divisor_rejected() {
        let mut config = CameraConfig::default();
        config.follow.horizontal_divisor = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_zoom_range_rejected() {
        let mut config = CameraConfig::default();
        config.zoom.min_zoom = 2.0;
        config.zoom.max_zoom = 0.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_base_zoom_outside_range_rejected() {
        let mut config = CameraConfig::default();
        config.zoom.base_zoom = 5.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_nan_offset_rejected() {
        let mut config = CameraConfig::default();
        config.follow.base_offset = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CameraConfig::default();
        config.follow.run_offset = 4.5;
        config.zoom.max_zoom = 3.0;

        config.save(dir.path()).unwrap();
        let loaded = CameraConfig::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = CameraConfig::load_or_create(dir.path()).unwrap();
        assert_eq!(config, CameraConfig::default());
        assert!(dir.path().join("camera.ron").exists());
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CameraConfig::default();
        config.zoom.min_zoom = -1.0;
        // Bypass validation by serializing directly.
        let ron_str = ron::to_string(&config).unwrap();
        std::fs::write(dir.path().join("camera.ron"), ron_str).unwrap();

        let result = CameraConfig::load_or_create(dir.path());
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = CameraConfig::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.follow.base_offset = 2.5;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert!(result.is_some());
        assert_eq!(result.unwrap().follow.base_offset, 2.5);
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = CameraConfig::default();
        config.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let result: Result<CameraConfig, _> = ron::from_str("{{not valid}}");
        assert!(result.is_err());
    }
}
