//! Celestial lighting: sun and moon light color, intensity and placement.

pub mod celestial;
mod color;
mod light;

pub use celestial::{
    CelestialBodyState, CelestialParams, CelestialState, adjust_by_altitude, blue_filter,
    compute_state, direction_vector, moon_state, sun_state,
};
pub use color::Rgb;
pub use light::{DirectionalLight, DirectionalLightUniform, LightMarker, ShadowSettings};
