//! Biome classification by elevation.

use sundial_lighting::Rgb;

use crate::TerrainBlock;

/// Surface type of a terrain block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Biome {
    /// Peaks above elevation 6.
    Snow,
    /// Elevation 5 and 6.
    Rock,
    /// Elevation 0 through 4.
    Grass,
    /// Anything below sea level.
    Water,
}

impl Biome {
    /// Unshaded surface color.
    pub const fn base_color(self) -> Rgb {
        match self {
            Biome::Rock => Rgb::new(132, 105, 78),
            Biome::Grass => Rgb::new(124, 252, 0),
            Biome::Water => Rgb::new(51, 170, 255),
            Biome::Snow => Rgb::new(238, 238, 238),
        }
    }
}

/// Classify a block from its elevation alone.
pub fn classify(elevation: i32) -> Biome {
    match elevation {
        e if e > 6 => Biome::Snow,
        e if e > 4 => Biome::Rock,
        e if e < 0 => Biome::Water,
        _ => Biome::Grass,
    }
}

/// Number of blocks per biome in a generated field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BiomeCounts {
    /// Snow blocks.
    pub snow: usize,
    /// Rock blocks.
    pub rock: usize,
    /// Grass blocks.
    pub grass: usize,
    /// Water blocks.
    pub water: usize,
}

impl BiomeCounts {
    /// Tally the biomes of `blocks`.
    pub fn from_blocks(blocks: &[TerrainBlock]) -> Self {
        blocks.iter().fold(Self::default(), |mut counts, block| {
            match block.biome {
                Biome::Snow => counts.snow += 1,
                Biome::Rock => counts.rock += 1,
                Biome::Grass => counts.grass += 1,
                Biome::Water => counts.water += 1,
            }
            counts
        })
    }

    /// Total number of counted blocks.
    pub fn total(&self) -> usize {
        self.snow + self.rock + self.grass + self.water
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_table() {
        assert_eq!(classify(7), Biome::Snow);
        assert_eq!(classify(5), Biome::Rock);
        assert_eq!(classify(6), Biome::Rock);
        assert_eq!(classify(4), Biome::Grass);
        assert_eq!(classify(0), Biome::Grass);
        assert_eq!(classify(-1), Biome::Water);
    }

    #[test]
    fn test_extremes() {
        assert_eq!(classify(10), Biome::Snow);
        assert_eq!(classify(-10), Biome::Water);
    }

    #[test]
    fn test_classification_is_monotonic_in_height() {
        let rank = |b: Biome| match b {
            Biome::Water => 0,
            Biome::Grass => 1,
            Biome::Rock => 2,
            Biome::Snow => 3,
        };
        for e in -12..12 {
            assert!(rank(classify(e)) <= rank(classify(e + 1)), "elevation {e}");
        }
    }

    #[test]
    fn test_base_colors() {
        assert_eq!(Biome::Water.base_color().to_hex(), 0x33aaff);
        assert_eq!(Biome::Snow.base_color().to_hex(), 0xeeeeee);
    }
}
