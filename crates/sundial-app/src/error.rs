//! Startup errors of the preview application.

use sundial_config::ConfigError;
use sundial_ephemeris::EphemerisError;
use sundial_terrain::TerrainError;

use crate::{ClockError, DriverError, PlatformError};

/// Anything that keeps the preview from starting.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Config directory could not be resolved or created.
    #[error(transparent)]
    Platform(#[from] PlatformError),

    /// Config could not be loaded or failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Landscape dimensions are invalid.
    #[error(transparent)]
    Terrain(#[from] TerrainError),

    /// Observer location is invalid.
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),

    /// The simulated clock could not be built.
    #[error(transparent)]
    Clock(#[from] ClockError),

    /// Orbit or light settings are unusable.
    #[error(transparent)]
    Driver(#[from] DriverError),
}
