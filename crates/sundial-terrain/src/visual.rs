//! Render attributes of a single block.

use glam::Vec3;
use sundial_lighting::Rgb;

use crate::TerrainBlock;

/// World placement and shaded color of one block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockVisual {
    /// Block center in scene units.
    pub world_position: Vec3,
    /// Biome color darkened by depth.
    pub color: Rgb,
}

/// Brightness factor for an elevation: `clamp((elevation + 10) / 20, 0, 1)`.
///
/// The lowest blocks render black, the highest at full base color.
pub fn shading_factor(elevation: i32) -> f64 {
    ((f64::from(elevation) + 10.0) / 20.0).clamp(0.0, 1.0)
}

/// Map a block to its render attributes.
///
/// Blocks below sea level are drawn flush at height zero; their depth shows
/// only through the darker shade.
pub fn to_visual(block: &TerrainBlock, cube_size: f32) -> BlockVisual {
    let height = block.elevation.max(0) as f32;
    BlockVisual {
        world_position: Vec3::new(
            block.position.x * cube_size,
            height * cube_size,
            block.position.z * cube_size,
        ),
        color: block
            .biome
            .base_color()
            .scale(shading_factor(block.elevation)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Biome, classify};
    use glam::UVec2;

    fn block(x: f32, z: f32, elevation: i32) -> TerrainBlock {
        TerrainBlock {
            cell: UVec2::ONE,
            position: Vec3::new(x, elevation as f32, z),
            elevation,
            biome: classify(elevation),
        }
    }

    #[test]
    fn test_shading_factor_bounds() {
        assert!(shading_factor(-10).abs() < 1e-12);
        assert!((shading_factor(10) - 1.0).abs() < 1e-12);
        assert!((shading_factor(0) - 0.5).abs() < 1e-12);
        assert!(shading_factor(-15).abs() < 1e-12);
        assert!((shading_factor(15) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_deepest_water_is_black() {
        let v = to_visual(&block(0.0, 0.0, -10), 30.0);
        assert_eq!(v.color, Rgb::BLACK);
    }

    #[test]
    fn test_highest_snow_keeps_base_color() {
        let v = to_visual(&block(0.0, 0.0, 10), 30.0);
        assert_eq!(v.color, Biome::Snow.base_color());
    }

    #[test]
    fn test_water_drawn_at_sea_level() {
        let v = to_visual(&block(2.0, -3.0, -4), 30.0);
        assert!(v.world_position.y.abs() < 1e-6);
        assert!((v.world_position.x - 60.0).abs() < 1e-4);
        assert!((v.world_position.z + 90.0).abs() < 1e-4);
        let expected = Biome::Water.base_color().scale(0.3);
        assert_eq!(v.color, expected);
    }

    #[test]
    fn test_raised_block_height() {
        let v = to_visual(&block(0.5, 0.5, 6), 30.0);
        assert!((v.world_position.y - 180.0).abs() < 1e-4);
        assert_eq!(v.color, Rgb::new(106, 84, 62));
    }
}
