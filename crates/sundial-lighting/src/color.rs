//! 8-bit RGB color shared by light sources and terrain shading.

/// An sRGB color with 8-bit channels.
///
/// Channels are `u8`, so every value is inside `[0, 255]` by construction.
/// Arithmetic helpers round and saturate instead of wrapping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// `#000000`.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// `#FFFFFF`.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Build a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from a packed `0xRRGGBB` value. Bits above 24 are ignored.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    /// Pack into `0xRRGGBB`.
    pub const fn to_hex(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Multiply every channel by `factor`, rounding to the nearest integer.
    pub fn scale(self, factor: f64) -> Self {
        Self {
            r: channel(f64::from(self.r) * factor),
            g: channel(f64::from(self.g) * factor),
            b: channel(f64::from(self.b) * factor),
        }
    }

    /// Channels normalized to `[0.0, 1.0]`, for GPU upload.
    pub fn to_vec3(self) -> glam::Vec3 {
        glam::Vec3::new(
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        )
    }
}

/// Round and saturate a channel value into `u8`.
pub(crate) fn channel(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_unpacks_channels() {
        let c = Rgb::from_hex(0xefffff);
        assert_eq!(c, Rgb::new(0xef, 0xff, 0xff));
        assert_eq!(c.to_hex(), 0xefffff);
    }

    #[test]
    fn test_scale_rounds_and_saturates() {
        let c = Rgb::new(124, 252, 0);
        assert_eq!(c.scale(0.5), Rgb::new(62, 126, 0));
        assert_eq!(c.scale(2.0), Rgb::new(248, 255, 0));
        assert_eq!(c.scale(-1.0), Rgb::BLACK);
    }

    #[test]
    fn test_nan_channel_is_black() {
        assert_eq!(Rgb::WHITE.scale(f64::NAN), Rgb::BLACK);
    }

    #[test]
    fn test_to_vec3_normalizes() {
        let v = Rgb::WHITE.to_vec3();
        assert!((v.x - 1.0).abs() < 1e-6);
        assert!(Rgb::BLACK.to_vec3().length() < 1e-6);
    }
}
