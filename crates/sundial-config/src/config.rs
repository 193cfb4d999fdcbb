//! Configuration structs with sensible defaults and RON persistence.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level preview configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Terrain grid settings.
    pub landscape: LandscapeConfig,
    /// Observer location for the ephemeris.
    pub location: LocationConfig,
    /// Simulated clock and camera orbit settings.
    pub animation: AnimationConfig,
    /// Sun/moon light model constants.
    pub lighting: LightingConfig,
    /// Initial viewport size.
    pub viewport: ViewportConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Terrain grid configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LandscapeConfig {
    /// Grid columns (x).
    pub width: u32,
    /// Grid rows (z).
    pub length: u32,
    /// Block edge length in scene units.
    pub cube_size: f32,
    /// Noise seed. `None` draws a new seed every session.
    pub seed: Option<u64>,
}

/// Observer location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LocationConfig {
    /// Latitude in degrees, north positive.
    pub latitude: f64,
    /// Longitude in degrees, east positive.
    pub longitude: f64,
}

/// Animation configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnimationConfig {
    /// Simulated minutes added to the clock per frame.
    pub step_minutes: u32,
    /// Camera orbit advance per frame, degrees.
    pub angle_step_degrees: f64,
    /// Frame pacing target.
    pub target_fps: u32,
    /// First simulated instant as RFC 3339. `None` starts at the current time.
    pub start_time: Option<String>,
}

/// Light model configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LightingConfig {
    /// Distance at which the sun light is placed.
    pub sun_distance: f64,
    /// Distance at which the moon light is placed.
    pub moon_distance: f64,
    /// Moon intensity per radian of altitude at full moon.
    pub moon_base_intensity: f64,
}

/// Viewport configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewportConfig {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for LandscapeConfig {
    fn default() -> Self {
        Self {
            width: 75,
            length: 75,
            cube_size: 30.0,
            seed: None,
        }
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            latitude: 40.1789,
            longitude: -3.5156,
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            step_minutes: 10,
            angle_step_degrees: 0.2,
            target_fps: 60,
            start_time: None,
        }
    }
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            sun_distance: 2000.0,
            moon_distance: 2000.0,
            moon_base_intensity: 0.02,
        }
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Validation ---

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

impl AnimationConfig {
    /// Parse [`start_time`](Self::start_time).
    pub fn start_time(&self) -> Result<Option<DateTime<Utc>>, ConfigError> {
        self.start_time
            .as_deref()
            .map(|value| {
                DateTime::parse_from_rfc3339(value)
                    .map(|t| t.with_timezone(&Utc))
                    .map_err(|source| ConfigError::InvalidStartTime {
                        value: value.to_string(),
                        source,
                    })
            })
            .transpose()
    }
}

impl Config {
    /// Check every setting against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError::Invalid`] or
    /// [`ConfigError::InvalidStartTime`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let l = &self.landscape;
        if l.width < 2 {
            return Err(invalid("landscape.width", format!("{} is below 2", l.width)));
        }
        if l.length < 2 {
            return Err(invalid("landscape.length", format!("{} is below 2", l.length)));
        }
        if !(l.cube_size.is_finite() && l.cube_size > 0.0) {
            return Err(invalid("landscape.cube_size", "must be positive"));
        }

        let loc = &self.location;
        if !(loc.latitude.is_finite() && (-90.0..=90.0).contains(&loc.latitude)) {
            return Err(invalid("location.latitude", "must be within [-90, 90]"));
        }
        if !(loc.longitude.is_finite() && (-180.0..=180.0).contains(&loc.longitude)) {
            return Err(invalid("location.longitude", "must be within [-180, 180]"));
        }

        let a = &self.animation;
        if a.step_minutes == 0 {
            return Err(invalid("animation.step_minutes", "must be at least 1"));
        }
        if !a.angle_step_degrees.is_finite() {
            return Err(invalid("animation.angle_step_degrees", "must be finite"));
        }
        if a.target_fps == 0 {
            return Err(invalid("animation.target_fps", "must be at least 1"));
        }
        a.start_time()?;

        let light = &self.lighting;
        for (field, value) in [
            ("lighting.sun_distance", light.sun_distance),
            ("lighting.moon_distance", light.moon_distance),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(field, "must be positive"));
            }
        }
        if !(light.moon_base_intensity.is_finite() && light.moon_base_intensity >= 0.0) {
            return Err(invalid("lighting.moon_base_intensity", "must be non-negative"));
        }

        Ok(())
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
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
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
