//! Landscape dimensions, validated at construction.

/// Errors raised when building a [`Landscape`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TerrainError {
    /// Width below the two-cell minimum.
    #[error("landscape width must be at least 2, got {0}")]
    InvalidWidth(u32),

    /// Length below the two-cell minimum.
    #[error("landscape length must be at least 2, got {0}")]
    InvalidLength(u32),

    /// Cube size that is zero, negative, or not finite.
    #[error("cube size must be a positive finite number, got {0}")]
    InvalidCubeSize(f32),
}

/// Grid dimensions and block size for one terrain instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Landscape {
    width: u32,
    length: u32,
    cube_size: f32,
}

impl Landscape {
    /// Validate and build a landscape.
    ///
    /// # Errors
    ///
    /// Returns a [`TerrainError`] if `width` or `length` is below 2 or
    /// `cube_size` is not a positive finite number.
    pub fn new(width: u32, length: u32, cube_size: f32) -> Result<Self, TerrainError> {
        if width < 2 {
            return Err(TerrainError::InvalidWidth(width));
        }
        if length < 2 {
            return Err(TerrainError::InvalidLength(length));
        }
        if !(cube_size.is_finite() && cube_size > 0.0) {
            return Err(TerrainError::InvalidCubeSize(cube_size));
        }
        Ok(Self {
            width,
            length,
            cube_size,
        })
    }

    /// Number of grid columns along x, including the skipped edge.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of grid rows along z, including the skipped edge.
    pub fn length(&self) -> u32 {
        self.length
    }

    /// Edge length of one block in scene units.
    pub fn cube_size(&self) -> f32 {
        self.cube_size
    }

    /// Number of blocks a generator emits: `(width - 1) · (length - 1)`.
    pub fn block_count(&self) -> usize {
        (self.width as usize - 1) * (self.length as usize - 1)
    }

    /// Half the landscape width in scene units; used to frame the camera.
    pub fn radius(&self) -> f32 {
        self.cube_size * self.width as f32 / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimum_landscape_is_valid() {
        let l = Landscape::new(2, 2, 1.0).unwrap();
        assert_eq!(l.block_count(), 1);
    }

    #[test]
    fn test_rejects_degenerate_dimensions() {
        assert_eq!(Landscape::new(1, 5, 1.0), Err(TerrainError::InvalidWidth(1)));
        assert_eq!(Landscape::new(5, 0, 1.0), Err(TerrainError::InvalidLength(0)));
    }

    #[test]
    fn test_rejects_bad_cube_size() {
        assert!(Landscape::new(3, 3, 0.0).is_err());
        assert!(Landscape::new(3, 3, -2.0).is_err());
        assert!(Landscape::new(3, 3, f32::NAN).is_err());
        assert!(Landscape::new(3, 3, f32::INFINITY).is_err());
    }

    #[test]
    fn test_radius_scales_with_cube_size() {
        let l = Landscape::new(75, 75, 30.0).unwrap();
        assert!((l.radius() - 1125.0).abs() < 1e-3);
    }
}
