//! Command-line argument parsing for the Sundial preview.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Sundial command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "sundial", about = "Procedural terrain under a real-time sun and moon")]
pub struct CliArgs {
    /// Landscape width in blocks.
    #[arg(long)]
    pub width: Option<u32>,

    /// Landscape length in blocks.
    #[arg(long)]
    pub length: Option<u32>,

    /// Block edge length in scene units.
    #[arg(long)]
    pub cube_size: Option<f32>,

    /// Terrain noise seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Observer latitude in degrees.
    #[arg(long, allow_hyphen_values = true)]
    pub latitude: Option<f64>,

    /// Observer longitude in degrees.
    #[arg(long, allow_hyphen_values = true)]
    pub longitude: Option<f64>,

    /// Simulated minutes per frame.
    #[arg(long)]
    pub step_minutes: Option<u32>,

    /// First simulated instant (RFC 3339).
    #[arg(long)]
    pub start_time: Option<String>,

    /// Stop after this many frames (runs until interrupted when omitted).
    #[arg(long)]
    pub frames: Option<u64>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.landscape.width = w;
        }
        if let Some(l) = args.length {
            self.landscape.length = l;
        }
        if let Some(size) = args.cube_size {
            self.landscape.cube_size = size;
        }
        if let Some(seed) = args.seed {
            self.landscape.seed = Some(seed);
        }
        if let Some(lat) = args.latitude {
            self.location.latitude = lat;
        }
        if let Some(lon) = args.longitude {
            self.location.longitude = lon;
        }
        if let Some(step) = args.step_minutes {
            self.animation.step_minutes = step;
        }
        if let Some(ref start) = args.start_time {
            self.animation.start_time = Some(start.clone());
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            width: Some(20),
            seed: Some(7),
            longitude: Some(-0.12),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.landscape.width, 20);
        assert_eq!(config.landscape.seed, Some(7));
        assert!((config.location.longitude + 0.12).abs() < 1e-12);
        // Non-overridden fields retain defaults
        assert_eq!(config.landscape.length, 75);
        assert_eq!(config.animation.step_minutes, 10);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_parses_negative_longitude() {
        let args =
            CliArgs::try_parse_from(["sundial", "--longitude", "-3.5", "--frames", "10"]).unwrap();
        assert_eq!(args.longitude, Some(-3.5));
        assert_eq!(args.frames, Some(10));
    }
}
