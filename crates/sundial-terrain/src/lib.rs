//! Procedural block terrain: noise source, biome classification, block
//! generation and per-block visual attributes.

mod biome;
mod generator;
mod landscape;
mod noise_source;
mod visual;

pub use biome::{Biome, BiomeCounts, classify};
pub use generator::{
    NOISE_SCALE, TerrainBlock, TerrainBlocks, TerrainFactory, elevation_from_noise, generate,
};
pub use landscape::{Landscape, TerrainError};
pub use noise_source::{NoiseSource, SimplexNoise};
pub use visual::{BlockVisual, shading_factor, to_visual};
