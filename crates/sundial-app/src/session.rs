//! Assemble terrain, lights and driver from a [`Config`].

use chrono::{DateTime, Utc};
use sundial_config::Config;
use sundial_ephemeris::{Ephemeris, GeoLocation};
use sundial_lighting::CelestialParams;
use sundial_terrain::{BiomeCounts, Landscape, TerrainFactory};
use tracing::info;

use crate::{
    AnimationDriver, AppError, CameraOrbit, DriverSettings, MeshInstance, RenderBoundary,
    SimulatedClock,
};

/// A ready-to-run preview: the driver plus what was generated for it.
pub struct Session<E, R> {
    /// The animation driver, with no surface attached yet.
    pub driver: AnimationDriver<E, R>,
    /// Noise seed of the terrain field.
    pub seed: u64,
    /// Blocks per biome.
    pub biomes: BiomeCounts,
}

impl<E: Ephemeris, R: RenderBoundary> Session<E, R> {
    /// Validate `config`, generate the terrain and build the driver.
    ///
    /// The simulated clock starts at `animation.start_time`, or at `now` when
    /// none is configured. The configured viewport becomes the pending
    /// surface size.
    ///
    /// # Errors
    ///
    /// Any invalid setting aborts with the matching [`AppError`].
    pub fn from_config(
        config: &Config,
        ephemeris: E,
        now: DateTime<Utc>,
    ) -> Result<Self, AppError> {
        config.validate()?;

        let l = &config.landscape;
        let landscape = Landscape::new(l.width, l.length, l.cube_size)?;
        let location = GeoLocation::new(config.location.latitude, config.location.longitude)?;

        let factory = TerrainFactory::new(landscape, l.seed);
        let blocks = factory.collect_field();
        let biomes = BiomeCounts::from_blocks(&blocks);
        info!(
            seed = factory.seed(),
            width = landscape.width(),
            length = landscape.length(),
            blocks = blocks.len(),
            "Terrain generated"
        );
        let meshes = blocks
            .iter()
            .map(|block| MeshInstance::from_block(block, landscape.cube_size()))
            .collect();

        let animation = &config.animation;
        let start = animation.start_time()?.unwrap_or(now);
        let clock = SimulatedClock::from_minutes(start, animation.step_minutes)?;

        let mut driver = AnimationDriver::new(
            ephemeris,
            clock,
            CameraOrbit::framing(&landscape),
            driver_settings(config, location),
            meshes,
        )?;
        driver.resize(config.viewport.width, config.viewport.height);

        Ok(Self {
            driver,
            seed: factory.seed(),
            biomes,
        })
    }
}

/// Orbit step, light constants and observer location taken from `config`.
pub(crate) fn driver_settings(config: &Config, location: GeoLocation) -> DriverSettings {
    DriverSettings {
        location,
        angle_step_degrees: config.animation.angle_step_degrees,
        lighting: CelestialParams {
            sun_distance: config.lighting.sun_distance,
            moon_distance: config.lighting.moon_distance,
            moon_base_intensity: config.lighting.moon_base_intensity,
            ..CelestialParams::default()
        },
    }
}
