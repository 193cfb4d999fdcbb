//! Frame-by-frame animation driver.
//!
//! Each rendered tick advances the simulated clock and the camera orbit,
//! asks the ephemeris where the sun and moon are, turns that into light
//! state and submits a [`Frame`] to the render boundary.
//!
//! The driver is single-threaded. Only the stop flag is shared, so a host
//! can stop the animation from another call site through a [`StopHandle`].

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, TimeDelta, Utc};
use sundial_ephemeris::{Ephemeris, EphemerisError, GeoLocation, Observation};
use sundial_lighting::{CelestialParams, CelestialState, DirectionalLight};
use tracing::{debug, error, info, warn};

use crate::{
    CameraOrbit, ClockError, Frame, MeshInstance, Projection, RenderBoundary, SimulatedClock,
    Viewport,
};

/// Lifecycle of the driver. `Stopped` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    /// Ticks do work.
    Running,
    /// Ticks are no-ops.
    Stopped,
}

/// Cloneable, thread-safe way to stop a driver.
#[derive(Clone, Debug, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    /// Request a stop. Calling it again has no further effect.
    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Whether a stop was requested.
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Why a tick rendered nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// No render surface is attached.
    NoSurface,
    /// The ephemeris failed for this instant; the next tick retries.
    Provider(EphemerisError),
    /// Simulated time could not advance; the driver stopped.
    Clock(ClockError),
}

/// What a rendered tick produced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameSummary {
    /// Frame sequence number, starting at 1.
    pub number: u64,
    /// Simulated instant of the frame.
    pub timestamp: DateTime<Utc>,
    /// Camera orbit angle after the advance.
    pub orbit_angle_degrees: f64,
    /// Light state submitted with the frame.
    pub state: CelestialState,
}

/// Result of one [`AnimationDriver::tick`].
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// A frame was submitted.
    Rendered(FrameSummary),
    /// Nothing was submitted this tick.
    Skipped(SkipReason),
    /// The driver is stopped; no work was done.
    Stopped,
}

/// Fixed parameters of an animation run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DriverSettings {
    /// Observer location passed to the ephemeris.
    pub location: GeoLocation,
    /// Orbit advance per rendered tick, degrees.
    pub angle_step_degrees: f64,
    /// Light model constants.
    pub lighting: CelestialParams,
}

/// Rejected [`DriverSettings`].
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum DriverError {
    /// The orbit step is NaN or infinite.
    #[error("orbit step must be finite, got {0}")]
    InvalidAngleStep(f64),

    /// A light distance is not a positive finite number.
    #[error("{body} light distance must be positive, got {value}")]
    InvalidLightDistance {
        /// `"sun"` or `"moon"`.
        body: &'static str,
        /// The rejected distance.
        value: f64,
    },

    /// An intensity constant is negative or not finite.
    #[error("{name} must be non-negative, got {value}")]
    InvalidIntensity {
        /// Parameter name.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
}

impl DriverSettings {
    /// Check that every value yields finite camera poses and lights.
    ///
    /// # Errors
    ///
    /// Returns the first offending value as a [`DriverError`].
    pub fn validate(&self) -> Result<(), DriverError> {
        if !self.angle_step_degrees.is_finite() {
            return Err(DriverError::InvalidAngleStep(self.angle_step_degrees));
        }
        let l = &self.lighting;
        for (body, value) in [("sun", l.sun_distance), ("moon", l.moon_distance)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(DriverError::InvalidLightDistance { body, value });
            }
        }
        for (name, value) in [
            ("sun_intensity", f64::from(l.sun_intensity)),
            ("moon_base_intensity", l.moon_base_intensity),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(DriverError::InvalidIntensity { name, value });
            }
        }
        Ok(())
    }
}

impl Default for DriverSettings {
    fn default() -> Self {
        Self {
            location: GeoLocation::default(),
            angle_step_degrees: 0.2,
            lighting: CelestialParams::default(),
        }
    }
}

/// Scene state owned by the driver.
#[derive(Debug)]
pub struct SceneContext<R> {
    meshes: Vec<MeshInstance>,
    projection: Projection,
    viewport: Option<Viewport>,
    surface: Option<R>,
}

impl<R> SceneContext<R> {
    /// Scene with a static mesh set and no surface.
    pub fn new(meshes: Vec<MeshInstance>) -> Self {
        Self {
            meshes,
            projection: Projection::default(),
            viewport: None,
            surface: None,
        }
    }

    /// Static terrain cubes.
    pub fn meshes(&self) -> &[MeshInstance] {
        &self.meshes
    }

    /// Current projection.
    pub fn projection(&self) -> Projection {
        self.projection
    }

    /// Last known surface size.
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// The attached surface, if any.
    pub fn surface(&self) -> Option<&R> {
        self.surface.as_ref()
    }

}

/// Drives the day/night animation over a static terrain scene.
pub struct AnimationDriver<E, R> {
    ephemeris: E,
    clock: SimulatedClock,
    orbit: CameraOrbit,
    settings: DriverSettings,
    scene: SceneContext<R>,
    stop: StopHandle,
    stopped_logged: bool,
    frames_rendered: u64,
    last_state: Option<CelestialState>,
}

impl<E: Ephemeris, R: RenderBoundary> AnimationDriver<E, R> {
    /// Create a running driver with no surface attached.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError`] if `settings` fail [`DriverSettings::validate`].
    pub fn new(
        ephemeris: E,
        clock: SimulatedClock,
        orbit: CameraOrbit,
        settings: DriverSettings,
        meshes: Vec<MeshInstance>,
    ) -> Result<Self, DriverError> {
        settings.validate()?;
        info!(
            start = %clock.current(),
            step = %clock.step(),
            meshes = meshes.len(),
            "Animation driver created"
        );
        Ok(Self {
            ephemeris,
            clock,
            orbit,
            settings,
            scene: SceneContext::new(meshes),
            stop: StopHandle::default(),
            stopped_logged: false,
            frames_rendered: 0,
            last_state: None,
        })
    }

    /// Replace location, orbit step and light constants from the next tick on.
    ///
    /// # Errors
    ///
    /// Invalid settings are rejected and the current ones kept.
    pub fn update_settings(&mut self, settings: DriverSettings) -> Result<(), DriverError> {
        settings.validate()?;
        if settings != self.settings {
            info!(
                angle_step = settings.angle_step_degrees,
                "Driver settings updated"
            );
            self.settings = settings;
        }
        Ok(())
    }

    /// Change the simulated time added per rendered tick.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::NonPositiveStep`] and keeps the old step if
    /// `step <= 0`.
    pub fn set_time_step(&mut self, step: TimeDelta) -> Result<(), ClockError> {
        if step != self.clock.step() {
            self.clock.set_step(step)?;
            info!(step = %step, "Simulated time step updated");
        }
        Ok(())
    }

    /// Current driver settings.
    pub fn settings(&self) -> &DriverSettings {
        &self.settings
    }

    /// Current lifecycle state.
    pub fn state(&self) -> DriverState {
        if self.stop.is_stopped() {
            DriverState::Stopped
        } else {
            DriverState::Running
        }
    }

    /// Handle that stops this driver from anywhere.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Stop the driver. Idempotent.
    pub fn stop(&mut self) {
        self.stop.stop();
        self.log_stopped();
    }

    /// Attach the render surface (mount).
    ///
    /// A surface size received before mounting is forwarded immediately.
    pub fn attach_surface(&mut self, mut surface: R) {
        if let Some(viewport) = self.scene.viewport {
            surface.resize(viewport);
        }
        self.scene.surface = Some(surface);
        debug!("Render surface attached");
    }

    /// Detach and return the render surface (unmount).
    pub fn detach_surface(&mut self) -> Option<R> {
        let surface = self.scene.surface.take();
        if surface.is_some() {
            debug!("Render surface detached");
        }
        surface
    }

    /// The drawable surface changed size.
    ///
    /// Zero sizes are ignored. Before a surface is attached only the stored
    /// viewport changes.
    pub fn resize(&mut self, width: u32, height: u32) {
        let Some(viewport) = Viewport::new(width, height) else {
            debug!(width, height, "Ignoring zero-sized resize");
            return;
        };
        self.scene.viewport = Some(viewport);
        if let Some(surface) = self.scene.surface.as_mut() {
            self.scene.projection.set_viewport(viewport);
            surface.resize(viewport);
        }
    }

    /// Run one animation step.
    pub fn tick(&mut self) -> TickOutcome {
        if self.stop.is_stopped() {
            self.log_stopped();
            return TickOutcome::Stopped;
        }
        if self.scene.surface.is_none() {
            return TickOutcome::Skipped(SkipReason::NoSurface);
        }
        // Adopt a size that arrived before the surface was mounted.
        if let Some(viewport) = self.scene.viewport {
            self.scene.projection.set_viewport(viewport);
        }

        let timestamp = match self.clock.advance() {
            Ok(t) => t,
            Err(e) => {
                error!("Simulated clock cannot advance: {e}");
                self.stop();
                return TickOutcome::Skipped(SkipReason::Clock(e));
            }
        };
        let orbit_angle_degrees = self.orbit.advance(self.settings.angle_step_degrees);

        let observation = match Observation::query(&self.ephemeris, timestamp, self.settings.location)
        {
            Ok(observation) => observation,
            Err(e) => {
                warn!(%timestamp, "Skipping frame, ephemeris failed: {e}");
                return TickOutcome::Skipped(SkipReason::Provider(e));
            }
        };
        let state = CelestialState::from_observation(&observation, &self.settings.lighting);
        let camera = self.orbit.pose();

        self.frames_rendered += 1;
        let frame = Frame {
            number: self.frames_rendered,
            timestamp,
            camera,
            projection: self.scene.projection,
            sun: DirectionalLight::sun(&state.sun),
            moon: DirectionalLight::moon(&state.moon),
            meshes: &self.scene.meshes,
        };
        if let Some(surface) = self.scene.surface.as_mut() {
            surface.draw(&frame);
        }
        self.last_state = Some(state);

        debug!(
            frame = self.frames_rendered,
            %timestamp,
            angle = orbit_angle_degrees,
            sun_intensity = state.sun.intensity,
            moon_intensity = state.moon.intensity,
            "Frame submitted"
        );

        TickOutcome::Rendered(FrameSummary {
            number: self.frames_rendered,
            timestamp,
            orbit_angle_degrees,
            state,
        })
    }

    /// Light state of the most recent rendered tick.
    pub fn last_state(&self) -> Option<CelestialState> {
        self.last_state
    }

    /// Number of frames submitted so far.
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// The simulated clock.
    pub fn clock(&self) -> &SimulatedClock {
        &self.clock
    }

    /// The camera orbit.
    pub fn orbit(&self) -> &CameraOrbit {
        &self.orbit
    }

    /// Scene meshes, projection and surface.
    pub fn scene(&self) -> &SceneContext<R> {
        &self.scene
    }

    fn log_stopped(&mut self) {
        if !self.stopped_logged {
            self.stopped_logged = true;
            info!(frames = self.frames_rendered, "Animation driver stopped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use sundial_ephemeris::{MoonIllumination, MoonPosition, SkyPosition};

    struct FixedSky;

    impl Ephemeris for FixedSky {
        fn sun_position(
            &self,
            _at: DateTime<Utc>,
            _location: GeoLocation,
        ) -> Result<SkyPosition, EphemerisError> {
            Ok(SkyPosition {
                azimuth: 0.0,
                altitude: std::f64::consts::FRAC_PI_2,
            })
        }

        fn moon_position(
            &self,
            _at: DateTime<Utc>,
            _location: GeoLocation,
        ) -> Result<MoonPosition, EphemerisError> {
            Ok(MoonPosition {
                sky: SkyPosition {
                    azimuth: 0.0,
                    altitude: -0.5,
                },
                distance_km: 384_400.0,
                parallactic_angle: 0.0,
            })
        }

        fn moon_illumination(&self, _at: DateTime<Utc>) -> Result<MoonIllumination, EphemerisError> {
            Ok(MoonIllumination {
                fraction: 0.5,
                phase: 0.25,
                angle: 0.0,
            })
        }
    }

    #[derive(Default)]
    struct Counter {
        draws: u64,
        resizes: Vec<Viewport>,
    }

    impl RenderBoundary for Counter {
        fn draw(&mut self, _frame: &Frame<'_>) {
            self.draws += 1;
        }

        fn resize(&mut self, viewport: Viewport) {
            self.resizes.push(viewport);
        }
    }

    fn driver() -> AnimationDriver<FixedSky, Counter> {
        let start = Utc.with_ymd_and_hms(2024, 6, 21, 12, 0, 0).unwrap();
        AnimationDriver::new(
            FixedSky,
            SimulatedClock::from_minutes(start, 10).unwrap(),
            CameraOrbit::new(100.0, 50.0),
            DriverSettings::default(),
            Vec::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_starts_running_without_state() {
        let driver = driver();
        assert_eq!(driver.state(), DriverState::Running);
        assert!(driver.last_state().is_none());
        assert!(driver.scene().surface().is_none());
    }

    #[test]
    fn test_tick_renders_and_records_state() {
        let mut driver = driver();
        driver.attach_surface(Counter::default());
        let TickOutcome::Rendered(summary) = driver.tick() else {
            panic!("expected a rendered frame");
        };
        assert_eq!(summary.number, 1);
        assert!((summary.orbit_angle_degrees - 0.2).abs() < 1e-9);
        assert_eq!(driver.last_state(), Some(summary.state));
        assert_eq!(summary.state.sun.intensity, 1.0);
        assert_eq!(summary.state.moon.intensity, 0.0);
        assert_eq!(driver.scene().surface().unwrap().draws, 1);
    }

    #[test]
    fn test_stop_handle_stops_from_clone() {
        let mut driver = driver();
        driver.attach_surface(Counter::default());
        let handle = driver.stop_handle();
        handle.clone().stop();
        assert_eq!(driver.state(), DriverState::Stopped);
        assert_eq!(driver.tick(), TickOutcome::Stopped);
        assert_eq!(driver.clock().ticks(), 0);
    }

    #[test]
    fn test_detach_returns_surface() {
        let mut driver = driver();
        driver.attach_surface(Counter::default());
        driver.tick();
        let surface = driver.detach_surface().unwrap();
        assert_eq!(surface.draws, 1);
        assert_eq!(driver.tick(), TickOutcome::Skipped(SkipReason::NoSurface));
    }

    #[test]
    fn test_rejects_non_finite_angle_step() {
        let start = Utc.with_ymd_and_hms(2024, 6, 21, 12, 0, 0).unwrap();
        let settings = DriverSettings {
            angle_step_degrees: f64::NAN,
            ..DriverSettings::default()
        };
        let result: Result<AnimationDriver<FixedSky, Counter>, _> = AnimationDriver::new(
            FixedSky,
            SimulatedClock::from_minutes(start, 10).unwrap(),
            CameraOrbit::new(100.0, 50.0),
            settings,
            Vec::new(),
        );
        assert!(matches!(result, Err(DriverError::InvalidAngleStep(_))));
    }

    #[test]
    fn test_settings_validation() {
        assert!(DriverSettings::default().validate().is_ok());

        let mut settings = DriverSettings::default();
        settings.lighting.moon_distance = -1.0;
        assert_eq!(
            settings.validate(),
            Err(DriverError::InvalidLightDistance {
                body: "moon",
                value: -1.0
            })
        );

        let mut settings = DriverSettings::default();
        settings.lighting.sun_distance = f64::INFINITY;
        assert!(settings.validate().is_err());

        let mut settings = DriverSettings::default();
        settings.lighting.moon_base_intensity = -0.1;
        assert!(matches!(
            settings.validate(),
            Err(DriverError::InvalidIntensity {
                name: "moon_base_intensity",
                ..
            })
        ));
    }

    #[test]
    fn test_update_settings_keeps_old_on_error() {
        let mut driver = driver();
        let bad = DriverSettings {
            angle_step_degrees: f64::INFINITY,
            ..DriverSettings::default()
        };
        assert!(driver.update_settings(bad).is_err());
        assert_eq!(driver.settings().angle_step_degrees, 0.2);

        let faster = DriverSettings {
            angle_step_degrees: 1.0,
            ..DriverSettings::default()
        };
        driver.update_settings(faster).unwrap();
        driver.attach_surface(Counter::default());
        driver.tick();
        assert!((driver.orbit().angle_degrees() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_set_time_step() {
        let mut driver = driver();
        assert!(driver.set_time_step(TimeDelta::zero()).is_err());
        assert_eq!(driver.clock().step(), TimeDelta::minutes(10));

        driver.set_time_step(TimeDelta::minutes(30)).unwrap();
        driver.attach_surface(Counter::default());
        let TickOutcome::Rendered(summary) = driver.tick() else {
            panic!("expected a rendered frame");
        };
        assert_eq!(
            summary.timestamp,
            Utc.with_ymd_and_hms(2024, 6, 21, 12, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_zero_resize_ignored() {
        let mut driver = driver();
        driver.attach_surface(Counter::default());
        driver.resize(0, 600);
        assert!(driver.scene().viewport().is_none());
        assert!(driver.scene().surface().unwrap().resizes.is_empty());
    }
}
