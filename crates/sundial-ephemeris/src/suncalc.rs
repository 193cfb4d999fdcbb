//! Analytic sun and moon positions after the SunCalc model.
//!
//! Low-precision formulae (arc-minute level for the sun, a fraction of a
//! degree for the moon) that are plenty for driving scene lighting. All
//! angles are radians, all day counts are days since J2000.

use std::f64::consts::PI;

use chrono::{DateTime, Utc};

use crate::{
    Ephemeris, EphemerisError, GeoLocation, MoonIllumination, MoonPosition, SkyPosition,
};

const RAD: f64 = PI / 180.0;
const MS_PER_DAY: f64 = 86_400_000.0;
const J1970: f64 = 2_440_588.0;
const J2000: f64 = 2_451_545.0;

/// Obliquity of the Earth's axis.
const OBLIQUITY: f64 = RAD * 23.4397;

/// Mean Earth–sun distance in kilometres.
const SUN_DISTANCE_KM: f64 = 149_598_000.0;

/// Beyond this the truncated series drift too far to be meaningful.
const MAX_DAYS_FROM_J2000: f64 = 100_000.0;

/// Stateless SunCalc provider.
#[derive(Clone, Copy, Debug, Default)]
pub struct SunCalc;

impl SunCalc {
    /// Create the provider.
    pub fn new() -> Self {
        Self
    }
}

impl Ephemeris for SunCalc {
    fn sun_position(
        &self,
        at: DateTime<Utc>,
        location: GeoLocation,
    ) -> Result<SkyPosition, EphemerisError> {
        let d = days_since_j2000(at)?;
        let (lw, phi) = observer(location);
        let sun = sun_coords(d);
        let h = sidereal_time(d, lw) - sun.right_ascension;

        finite_sky(SkyPosition {
            azimuth: azimuth(h, phi, sun.declination),
            altitude: altitude(h, phi, sun.declination),
        })
    }

    fn moon_position(
        &self,
        at: DateTime<Utc>,
        location: GeoLocation,
    ) -> Result<MoonPosition, EphemerisError> {
        let d = days_since_j2000(at)?;
        let (lw, phi) = observer(location);
        let moon = moon_coords(d);
        let h = sidereal_time(d, lw) - moon.right_ascension;
        let raw_altitude = altitude(h, phi, moon.declination);
        let parallactic_angle = h
            .sin()
            .atan2(phi.tan() * moon.declination.cos() - moon.declination.sin() * h.cos());

        let sky = finite_sky(SkyPosition {
            azimuth: azimuth(h, phi, moon.declination),
            altitude: raw_altitude + astro_refraction(raw_altitude),
        })?;
        Ok(MoonPosition {
            sky,
            distance_km: moon.distance_km,
            parallactic_angle: finite(parallactic_angle, "parallactic angle")?,
        })
    }

    fn moon_illumination(&self, at: DateTime<Utc>) -> Result<MoonIllumination, EphemerisError> {
        let d = days_since_j2000(at)?;
        let sun = sun_coords(d);
        let moon = moon_coords(d);

        let ra_delta = sun.right_ascension - moon.right_ascension;
        let elongation = (sun.declination.sin() * moon.declination.sin()
            + sun.declination.cos() * moon.declination.cos() * ra_delta.cos())
        .clamp(-1.0, 1.0)
        .acos();
        let incidence = (SUN_DISTANCE_KM * elongation.sin())
            .atan2(moon.distance_km - SUN_DISTANCE_KM * elongation.cos());
        let angle = (sun.declination.cos() * ra_delta.sin()).atan2(
            sun.declination.sin() * moon.declination.cos()
                - sun.declination.cos() * moon.declination.sin() * ra_delta.cos(),
        );
        let sign = if angle < 0.0 { -1.0 } else { 1.0 };

        Ok(MoonIllumination {
            fraction: finite((1.0 + incidence.cos()) / 2.0, "illumination fraction")?,
            phase: finite(0.5 + 0.5 * incidence * sign / PI, "moon phase")?,
            angle: finite(angle, "limb angle")?,
        })
    }
}

// ---------------------------------------------------------------------------
// Time and observer
// ---------------------------------------------------------------------------

fn days_since_j2000(at: DateTime<Utc>) -> Result<f64, EphemerisError> {
    let julian = at.timestamp_millis() as f64 / MS_PER_DAY - 0.5 + J1970;
    let days = julian - J2000;
    if days.abs() > MAX_DAYS_FROM_J2000 {
        return Err(EphemerisError::TimestampOutOfRange {
            days_from_j2000: days,
        });
    }
    Ok(days)
}

/// West longitude and latitude, both in radians.
fn observer(location: GeoLocation) -> (f64, f64) {
    (-location.longitude() * RAD, location.latitude() * RAD)
}

fn sidereal_time(d: f64, lw: f64) -> f64 {
    RAD * (280.16 + 360.985_623_5 * d) - lw
}

// ---------------------------------------------------------------------------
// Spherical astronomy
// ---------------------------------------------------------------------------

fn right_ascension(l: f64, b: f64) -> f64 {
    (l.sin() * OBLIQUITY.cos() - b.tan() * OBLIQUITY.sin()).atan2(l.cos())
}

fn declination(l: f64, b: f64) -> f64 {
    (b.sin() * OBLIQUITY.cos() + b.cos() * OBLIQUITY.sin() * l.sin()).asin()
}

fn azimuth(h: f64, phi: f64, dec: f64) -> f64 {
    h.sin().atan2(h.cos() * phi.sin() - dec.tan() * phi.cos())
}

fn altitude(h: f64, phi: f64, dec: f64) -> f64 {
    (phi.sin() * dec.sin() + phi.cos() * dec.cos() * h.cos()).asin()
}

/// Refraction near the horizon; altitudes below zero are treated as zero.
fn astro_refraction(h: f64) -> f64 {
    let h = h.max(0.0);
    0.000_296_7 / (h + 0.003_125_36 / (h + 0.089_011_79)).tan()
}

// ---------------------------------------------------------------------------
// Sun and moon
// ---------------------------------------------------------------------------

struct Equatorial {
    right_ascension: f64,
    declination: f64,
    distance_km: f64,
}

fn sun_coords(d: f64) -> Equatorial {
    let mean_anomaly = RAD * (357.5291 + 0.985_600_28 * d);
    let center = RAD
        * (1.9148 * mean_anomaly.sin()
            + 0.02 * (2.0 * mean_anomaly).sin()
            + 0.0003 * (3.0 * mean_anomaly).sin());
    let perihelion = RAD * 102.9372;
    let longitude = mean_anomaly + center + perihelion + PI;

    Equatorial {
        right_ascension: right_ascension(longitude, 0.0),
        declination: declination(longitude, 0.0),
        distance_km: SUN_DISTANCE_KM,
    }
}

fn moon_coords(d: f64) -> Equatorial {
    let mean_longitude = RAD * (218.316 + 13.176_396 * d);
    let mean_anomaly = RAD * (134.963 + 13.064_993 * d);
    let mean_distance = RAD * (93.272 + 13.229_350 * d);

    let longitude = mean_longitude + RAD * 6.289 * mean_anomaly.sin();
    let latitude = RAD * 5.128 * mean_distance.sin();

    Equatorial {
        right_ascension: right_ascension(longitude, latitude),
        declination: declination(longitude, latitude),
        distance_km: 385_001.0 - 20_905.0 * mean_anomaly.cos(),
    }
}

fn finite(value: f64, quantity: &'static str) -> Result<f64, EphemerisError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EphemerisError::NonFinite { quantity })
    }
}

fn finite_sky(sky: SkyPosition) -> Result<SkyPosition, EphemerisError> {
    finite(sky.azimuth, "azimuth")?;
    finite(sky.altitude, "altitude")?;
    Ok(sky)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const EPSILON: f64 = 1e-6;

    fn reference_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2013, 3, 5, 0, 0, 0).unwrap()
    }

    fn reference_site() -> GeoLocation {
        GeoLocation::new(50.5, 30.5).unwrap()
    }

    #[test]
    fn test_sun_position_matches_reference() {
        let pos = SunCalc
            .sun_position(reference_date(), reference_site())
            .unwrap();
        assert!((pos.azimuth - -2.500_317_590_716_838_5).abs() < EPSILON);
        assert!((pos.altitude - -0.700_040_683_878_161_1).abs() < EPSILON);
    }

    #[test]
    fn test_moon_position_matches_reference() {
        let pos = SunCalc
            .moon_position(reference_date(), reference_site())
            .unwrap();
        assert!((pos.sky.azimuth - -0.978_399_952_243_822_6).abs() < EPSILON);
        assert!((pos.sky.altitude - 0.014_551_482_243_892_251).abs() < EPSILON);
        assert!((pos.distance_km - 364_121.372_562_561_94).abs() < 1e-3);
    }

    #[test]
    fn test_moon_illumination_matches_reference() {
        let illum = SunCalc.moon_illumination(reference_date()).unwrap();
        assert!((illum.fraction - 0.484_806_820_245_637_3).abs() < EPSILON);
        assert!((illum.phase - 0.754_836_883_853_876_2).abs() < EPSILON);
        assert!((illum.angle - 1.673_294_267_857_834_6).abs() < EPSILON);
    }

    #[test]
    fn test_sun_high_at_local_noon_in_summer() {
        // Madrid-ish longitude, so solar noon is close to 12:14 UTC.
        let noon = Utc.with_ymd_and_hms(2024, 6, 21, 12, 14, 0).unwrap();
        let pos = SunCalc.sun_position(noon, GeoLocation::default()).unwrap();
        let expected = (90.0 - 40.1789 + 23.44_f64).to_radians();
        assert!(
            (pos.altitude - expected).abs() < 0.02,
            "noon altitude {} should be near {expected}",
            pos.altitude
        );
    }

    #[test]
    fn test_sun_below_horizon_at_midnight() {
        let midnight = Utc.with_ymd_and_hms(2024, 6, 21, 0, 14, 0).unwrap();
        let pos = SunCalc
            .sun_position(midnight, GeoLocation::default())
            .unwrap();
        assert!(pos.altitude < 0.0);
    }

    #[test]
    fn test_illumination_fraction_in_unit_range() {
        let start = reference_date();
        for day in 0..60 {
            let at = start + chrono::TimeDelta::days(day);
            let illum = SunCalc.moon_illumination(at).unwrap();
            assert!((0.0..=1.0).contains(&illum.fraction));
            assert!((0.0..=1.0).contains(&illum.phase));
        }
    }

    #[test]
    fn test_far_future_is_rejected() {
        let far = Utc.with_ymd_and_hms(9999, 1, 1, 0, 0, 0).unwrap();
        let err = SunCalc
            .sun_position(far, GeoLocation::default())
            .unwrap_err();
        assert!(matches!(err, EphemerisError::TimestampOutOfRange { .. }));
    }
}
