//! Sun and moon ephemeris: where the two bodies sit in the local sky.
//!
//! The [`Ephemeris`] trait is the seam the animation driver queries every
//! tick. [`SunCalc`] is the analytic provider shipped with the workspace.

mod error;
mod location;
mod provider;
mod suncalc;

pub use error::EphemerisError;
pub use location::GeoLocation;
pub use provider::{Ephemeris, MoonIllumination, MoonPosition, Observation, SkyPosition};
pub use suncalc::SunCalc;
