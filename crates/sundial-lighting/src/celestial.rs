//! Sun and moon light state from raw ephemeris angles.
//!
//! Each tick the animation driver hands in the sun and moon horizontal
//! coordinates plus the moon's illuminated fraction. This module turns them
//! into a placed light source with an altitude-tinted color:
//!
//! - the light sits at `distance` along the body's sky direction,
//! - low bodies lose blue and some green (sunrise/sunset cast),
//! - the sun shines at a constant intensity, the moon scales with its
//!   altitude and phase.

use glam::Vec3;
use sundial_ephemeris::{Observation, SkyPosition};

use crate::Rgb;
use crate::color::channel;

/// Light produced by one celestial body for the current tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CelestialBodyState {
    /// Light intensity, always `>= 0`. Zero means the light is off.
    pub intensity: f32,
    /// Altitude-tinted light color.
    pub color: Rgb,
    /// Light placement, scaled by the body's configured distance.
    pub direction: Vec3,
}

/// Both light sources for one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CelestialState {
    /// The sun.
    pub sun: CelestialBodyState,
    /// The moon.
    pub moon: CelestialBodyState,
}

/// Tunable constants of the lighting model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CelestialParams {
    /// Sun color at the zenith.
    pub sun_peak: Rgb,
    /// Placement distance of the sun light, scene units.
    pub sun_distance: f64,
    /// Sun intensity. Held constant below the horizon.
    pub sun_intensity: f32,
    /// Moon color at the zenith; slightly bluish.
    pub moon_peak: Rgb,
    /// Placement distance of the moon light, scene units.
    pub moon_distance: f64,
    /// Moon intensity per radian of altitude at full moon.
    pub moon_base_intensity: f64,
}

impl Default for CelestialParams {
    fn default() -> Self {
        Self {
            sun_peak: Rgb::from_hex(0xffffff),
            sun_distance: 2000.0,
            sun_intensity: 1.0,
            moon_peak: Rgb::from_hex(0xefffff),
            moon_distance: 2000.0,
            moon_base_intensity: 0.02,
        }
    }
}

/// Place a body at `distance` along its sky direction.
///
/// `x = -sin(az)·d`, `y = sin(alt)·d`, `z = cos(az)·d`. The vertical axis is
/// +Y. Only the horizontal bearing feeds x/z, so the vector is not unit
/// length; renderers use it as a light position for shadow direction.
pub fn direction_vector(position: SkyPosition, distance: f64) -> Vec3 {
    Vec3::new(
        (-position.azimuth.sin() * distance) as f32,
        (position.altitude.sin() * distance) as f32,
        (position.azimuth.cos() * distance) as f32,
    )
}

/// Fraction of blue light scattered away at `altitude`, in `[0, 1]`.
///
/// `clamp(1.5 · max(0, cos(2·alt)), 0, 1)`: 1 at the horizon, 0 from 45°
/// upward.
pub fn blue_filter(altitude: f64) -> f64 {
    let altitude_factor = (2.0 * altitude).cos();
    (1.5 * altitude_factor.max(0.0)).clamp(0.0, 1.0)
}

/// Tint `peak` for a body at `altitude` (Rayleigh-like scattering).
///
/// Blue drops by the full filter, green by 60% of it, red is untouched.
pub fn adjust_by_altitude(peak: Rgb, altitude: f64) -> Rgb {
    let filter = blue_filter(altitude);
    Rgb {
        r: peak.r,
        g: channel(f64::from(peak.g) * (1.0 - 0.6 * filter)),
        b: channel(f64::from(peak.b) * (1.0 - filter)),
    }
}

/// Light state of the sun.
pub fn sun_state(sun: SkyPosition, params: &CelestialParams) -> CelestialBodyState {
    CelestialBodyState {
        intensity: params.sun_intensity.max(0.0),
        color: adjust_by_altitude(params.sun_peak, sun.altitude),
        direction: direction_vector(sun, params.sun_distance),
    }
}

/// Light state of the moon.
///
/// Intensity is `base · altitude · fraction`, floored at zero: a moon below
/// the horizon or at new moon gives no light.
pub fn moon_state(
    moon: SkyPosition,
    illumination_fraction: f64,
    params: &CelestialParams,
) -> CelestialBodyState {
    let fraction = illumination_fraction.clamp(0.0, 1.0);
    let intensity = (params.moon_base_intensity * moon.altitude * fraction).max(0.0);
    CelestialBodyState {
        intensity: intensity as f32,
        color: adjust_by_altitude(params.moon_peak, moon.altitude),
        direction: direction_vector(moon, params.moon_distance),
    }
}

/// Both light states from raw angles and the moon's illuminated fraction.
pub fn compute_state(
    sun: SkyPosition,
    moon: SkyPosition,
    illumination_fraction: f64,
    params: &CelestialParams,
) -> CelestialState {
    CelestialState {
        sun: sun_state(sun, params),
        moon: moon_state(moon, illumination_fraction, params),
    }
}

impl CelestialState {
    /// Convenience over [`compute_state`] for a full ephemeris observation.
    pub fn from_observation(observation: &Observation, params: &CelestialParams) -> Self {
        compute_state(
            observation.sun,
            observation.moon.sky,
            observation.illumination.fraction,
            params,
        )
    }
}
