//! Terrain generator: a finite, single-pass stream of classified blocks.
//!
//! The grid skips its boundary row and column: cells run over
//! `[1, width) × [1, length)` in row-major order. Each cell samples the
//! noise field once, quantizes the sample into an integer elevation and
//! classifies it.

use std::iter::FusedIterator;

use glam::{UVec2, Vec3};
use tracing::debug;

use crate::{Biome, BiomeCounts, Landscape, NoiseSource, SimplexNoise, classify};

/// Spatial frequency of the elevation noise, per grid cell.
pub const NOISE_SCALE: f64 = 0.02;

/// One generated terrain block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerrainBlock {
    /// Grid indices `(i, j)`, both `>= 1`.
    pub cell: UVec2,
    /// `(i - width/2, elevation, j - length/2)`: centered grid position with
    /// elevation on the vertical axis.
    pub position: Vec3,
    /// Quantized height class, roughly `[-10, 10]`.
    pub elevation: i32,
    /// Surface type derived from `elevation`.
    pub biome: Biome,
}

/// Quantize a noise sample in `[-1, 1]` into an elevation class.
pub fn elevation_from_noise(sample: f64) -> i32 {
    (sample * 10.0).floor() as i32
}

/// Start generating blocks for `landscape` from `noise`.
///
/// The returned iterator yields exactly [`Landscape::block_count`] blocks
/// and then stays exhausted.
pub fn generate<N: NoiseSource>(landscape: Landscape, noise: N) -> TerrainBlocks<N> {
    TerrainBlocks {
        noise,
        landscape,
        i: 1,
        j: 1,
        remaining: landscape.block_count(),
    }
}

/// Iterator returned by [`generate`].
pub struct TerrainBlocks<N> {
    noise: N,
    landscape: Landscape,
    i: u32,
    j: u32,
    remaining: usize,
}

impl<N: NoiseSource> TerrainBlocks<N> {
    fn block_at(&self, i: u32, j: u32) -> TerrainBlock {
        let sample = self
            .noise
            .sample(NOISE_SCALE * f64::from(i), NOISE_SCALE * f64::from(j));
        let elevation = elevation_from_noise(sample);
        let half_width = self.landscape.width() as f32 / 2.0;
        let half_length = self.landscape.length() as f32 / 2.0;
        TerrainBlock {
            cell: UVec2::new(i, j),
            position: Vec3::new(
                i as f32 - half_width,
                elevation as f32,
                j as f32 - half_length,
            ),
            elevation,
            biome: classify(elevation),
        }
    }
}

impl<N: NoiseSource> Iterator for TerrainBlocks<N> {
    type Item = TerrainBlock;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let block = self.block_at(self.i, self.j);
        self.remaining -= 1;
        self.j += 1;
        if self.j == self.landscape.length() {
            self.j = 1;
            self.i += 1;
        }
        Some(block)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<N: NoiseSource> ExactSizeIterator for TerrainBlocks<N> {}

impl<N: NoiseSource> FusedIterator for TerrainBlocks<N> {}

/// Restartable terrain: remembers the landscape and seed, and builds a fresh
/// noise field for every generation pass.
#[derive(Clone, Copy, Debug)]
pub struct TerrainFactory {
    landscape: Landscape,
    seed: u64,
}

impl TerrainFactory {
    /// Create a factory. A `None` seed is replaced by a random one.
    pub fn new(landscape: Landscape, seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(rand::random);
        Self { landscape, seed }
    }

    /// The seed every pass uses.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The landscape dimensions.
    pub fn landscape(&self) -> Landscape {
        self.landscape
    }

    /// Start a new generation pass.
    pub fn generate(&self) -> TerrainBlocks<SimplexNoise> {
        generate(self.landscape, SimplexNoise::new(self.seed))
    }

    /// Run a full pass and collect the static block set.
    pub fn collect_field(&self) -> Vec<TerrainBlock> {
        let blocks: Vec<TerrainBlock> = self.generate().collect();
        let counts = BiomeCounts::from_blocks(&blocks);
        debug!(
            seed = self.seed,
            blocks = blocks.len(),
            snow = counts.snow,
            rock = counts.rock,
            grass = counts.grass,
            water = counts.water,
            "Generated terrain field"
        );
        blocks
    }
}
