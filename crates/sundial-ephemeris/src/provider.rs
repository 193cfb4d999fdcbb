//! Provider trait and the raw angles it reports.

use chrono::{DateTime, Utc};

use crate::{EphemerisError, GeoLocation};

/// Horizontal coordinates of a body, in radians.
///
/// Azimuth follows the SunCalc convention: measured from south, positive
/// toward west. Altitude is negative below the horizon.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SkyPosition {
    /// Compass bearing, radians.
    pub azimuth: f64,
    /// Angle above the horizon, radians.
    pub altitude: f64,
}

/// Moon position plus the extra quantities the lunar model yields.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MoonPosition {
    /// Azimuth and refraction-corrected altitude.
    pub sky: SkyPosition,
    /// Earth–moon distance in kilometres.
    pub distance_km: f64,
    /// Parallactic angle of the moon, radians.
    pub parallactic_angle: f64,
}

/// Lit portion of the moon's disk.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MoonIllumination {
    /// Illuminated fraction in `[0, 1]`; 0 = new moon, 1 = full moon.
    pub fraction: f64,
    /// Phase in `[0, 1)`: 0 new, 0.25 first quarter, 0.5 full, 0.75 last quarter.
    pub phase: f64,
    /// Midpoint angle of the illuminated limb, radians.
    pub angle: f64,
}

/// Source of sun/moon angles for a timestamp and location.
///
/// Implementations must be pure: the same inputs always give the same output.
pub trait Ephemeris {
    /// Position of the sun as seen from `location` at `at`.
    fn sun_position(
        &self,
        at: DateTime<Utc>,
        location: GeoLocation,
    ) -> Result<SkyPosition, EphemerisError>;

    /// Position of the moon as seen from `location` at `at`.
    fn moon_position(
        &self,
        at: DateTime<Utc>,
        location: GeoLocation,
    ) -> Result<MoonPosition, EphemerisError>;

    /// Illumination of the moon at `at`. Independent of observer location.
    fn moon_illumination(&self, at: DateTime<Utc>) -> Result<MoonIllumination, EphemerisError>;
}

/// Everything one tick needs from the ephemeris, gathered in one call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Observation {
    /// Sun angles.
    pub sun: SkyPosition,
    /// Moon angles and distance.
    pub moon: MoonPosition,
    /// Moon phase data.
    pub illumination: MoonIllumination,
}

impl Observation {
    /// Query all three provider operations for one instant.
    ///
    /// # Errors
    ///
    /// Propagates the first provider error encountered.
    pub fn query<E: Ephemeris + ?Sized>(
        ephemeris: &E,
        at: DateTime<Utc>,
        location: GeoLocation,
    ) -> Result<Self, EphemerisError> {
        Ok(Self {
            sun: ephemeris.sun_position(at, location)?,
            moon: ephemeris.moon_position(at, location)?,
            illumination: ephemeris.moon_illumination(at)?,
        })
    }
}
