//! Geographic observer location.

use crate::EphemerisError;

/// Observer position on Earth, in degrees.
///
/// Only constructible through [`GeoLocation::new`], which rejects values
/// outside `[-90, 90]` / `[-180, 180]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoLocation {
    latitude: f64,
    longitude: f64,
}

impl GeoLocation {
    /// Central Spain, the preview's reference site.
    pub const DEFAULT_LATITUDE: f64 = 40.1789;
    /// Central Spain, the preview's reference site.
    pub const DEFAULT_LONGITUDE: f64 = -3.5156;

    /// Validate and build a location.
    ///
    /// # Errors
    ///
    /// Returns [`EphemerisError::InvalidLocation`] for non-finite or out of
    /// range coordinates.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, EphemerisError> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        if !valid {
            return Err(EphemerisError::InvalidLocation {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in degrees, north positive.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees, east positive.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl Default for GeoLocation {
    fn default() -> Self {
        Self {
            latitude: Self::DEFAULT_LATITUDE,
            longitude: Self::DEFAULT_LONGITUDE,
        }
    }
}
