//! Ephemeris error types.

/// Errors reported by an [`Ephemeris`](crate::Ephemeris) provider or while
/// building its inputs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EphemerisError {
    /// Latitude or longitude outside the valid range, or not finite.
    #[error("invalid location: latitude {latitude}, longitude {longitude}")]
    InvalidLocation {
        /// Requested latitude in degrees.
        latitude: f64,
        /// Requested longitude in degrees.
        longitude: f64,
    },

    /// The timestamp is too far from J2000 for the analytic model.
    #[error("timestamp {days_from_j2000:.1} days from J2000 is outside the supported range")]
    TimestampOutOfRange {
        /// Offset of the requested instant from J2000, in days.
        days_from_j2000: f64,
    },

    /// The computation produced NaN or infinity.
    #[error("ephemeris produced a non-finite {quantity}")]
    NonFinite {
        /// Name of the offending quantity.
        quantity: &'static str,
    },
}
