//! Hot reload of `config.ron` while the preview runs.
//!
//! Only settings the driver can change mid-run are applied: time step, orbit
//! step, light constants and observer location. Landscape edits need a
//! restart because the terrain is generated once.

use std::path::PathBuf;

use chrono::TimeDelta;
use sundial_config::{CliArgs, Config};
use sundial_ephemeris::{Ephemeris, GeoLocation};
use tracing::{info, warn};

use crate::session::driver_settings;
use crate::{AnimationDriver, AppError, RenderBoundary};

/// Re-reads the config file every few ticks and retunes the driver.
#[derive(Debug)]
pub struct ConfigWatcher {
    config_dir: PathBuf,
    on_disk: Config,
    overrides: CliArgs,
    interval_ticks: u64,
    ticks: u64,
}

impl ConfigWatcher {
    /// Watch `config_dir/config.ron`, starting from its loaded contents.
    ///
    /// `overrides` are re-applied on top of every reloaded file, so command
    /// line values keep winning. The file is checked every `interval_ticks`
    /// ticks (at least every tick).
    pub fn new(
        config_dir: PathBuf,
        on_disk: Config,
        overrides: CliArgs,
        interval_ticks: u64,
    ) -> Self {
        Self {
            config_dir,
            on_disk,
            overrides,
            interval_ticks: interval_ticks.max(1),
            ticks: 0,
        }
    }

    /// File contents with command-line overrides applied.
    pub fn effective(&self) -> Config {
        let mut config = self.on_disk.clone();
        config.apply_cli_overrides(&self.overrides);
        config
    }

    /// Count one tick. On every `interval_ticks`-th call, reload the file and
    /// apply it to `driver` if it changed.
    ///
    /// Returns `true` when new settings were applied. Unreadable or invalid
    /// files are logged and skipped; the running settings stay in place.
    pub fn poll<E, R>(&mut self, driver: &mut AnimationDriver<E, R>) -> bool
    where
        E: Ephemeris,
        R: RenderBoundary,
    {
        self.ticks += 1;
        if self.ticks % self.interval_ticks != 0 {
            return false;
        }

        let reloaded = match self.on_disk.reload(&self.config_dir) {
            Ok(Some(config)) => config,
            Ok(None) => return false,
            Err(e) => {
                warn!("Config reload failed: {e}");
                return false;
            }
        };
        if reloaded.landscape != self.on_disk.landscape {
            info!("Landscape changes take effect on restart");
        }
        // Remember the edit even if it is rejected, so it is reported once.
        self.on_disk = reloaded;

        match apply_config(driver, &self.effective()) {
            Ok(()) => true,
            Err(e) => {
                warn!("Ignoring reloaded config: {e}");
                false
            }
        }
    }
}

/// Push the runtime-adjustable parts of `config` into `driver`.
///
/// Nothing is changed unless the whole config is valid.
///
/// # Errors
///
/// Returns the validation error of the first bad setting.
pub fn apply_config<E, R>(
    driver: &mut AnimationDriver<E, R>,
    config: &Config,
) -> Result<(), AppError>
where
    E: Ephemeris,
    R: RenderBoundary,
{
    config.validate()?;
    let location = GeoLocation::new(config.location.latitude, config.location.longitude)?;
    let settings = driver_settings(config, location);
    settings.validate()?;

    driver.set_time_step(TimeDelta::minutes(i64::from(config.animation.step_minutes)))?;
    driver.update_settings(settings)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HeadlessRenderer, Session, TickOutcome};
    use chrono::{TimeZone, Utc};
    use sundial_ephemeris::SunCalc;

    fn base_config() -> Config {
        let mut config = Config::default();
        config.landscape.width = 4;
        config.landscape.length = 4;
        config.landscape.seed = Some(3);
        config.animation.start_time = Some("2024-06-21T12:00:00Z".to_string());
        config
    }

    fn session(config: &Config) -> Session<SunCalc, HeadlessRenderer> {
        let now = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
        Session::from_config(config, SunCalc::new(), now).unwrap()
    }

    #[test]
    fn test_reload_retunes_driver() {
        let dir = tempfile::tempdir().unwrap();
        let config = base_config();
        config.save(dir.path()).unwrap();
        let mut session = session(&config);
        let mut watcher =
            ConfigWatcher::new(dir.path().to_path_buf(), config.clone(), CliArgs::default(), 1);

        assert!(!watcher.poll(&mut session.driver));

        let mut edited = config.clone();
        edited.animation.step_minutes = 30;
        edited.animation.angle_step_degrees = 1.5;
        edited.save(dir.path()).unwrap();

        assert!(watcher.poll(&mut session.driver));
        assert_eq!(session.driver.clock().step(), TimeDelta::minutes(30));
        assert_eq!(session.driver.settings().angle_step_degrees, 1.5);

        session.driver.attach_surface(HeadlessRenderer::new());
        let TickOutcome::Rendered(summary) = session.driver.tick() else {
            panic!("expected a rendered frame");
        };
        assert_eq!(
            summary.timestamp,
            Utc.with_ymd_and_hms(2024, 6, 21, 12, 30, 0).unwrap()
        );
        assert!((summary.orbit_angle_degrees - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_edit_keeps_running_settings() {
        let dir = tempfile::tempdir().unwrap();
        let config = base_config();
        config.save(dir.path()).unwrap();
        let mut session = session(&config);
        let mut watcher =
            ConfigWatcher::new(dir.path().to_path_buf(), config.clone(), CliArgs::default(), 1);

        let mut edited = config.clone();
        edited.animation.step_minutes = 0;
        edited.animation.angle_step_degrees = 5.0;
        edited.save(dir.path()).unwrap();

        assert!(!watcher.poll(&mut session.driver));
        assert_eq!(session.driver.clock().step(), TimeDelta::minutes(10));
        assert_eq!(session.driver.settings().angle_step_degrees, 0.2);
    }

    #[test]
    fn test_unparsable_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let config = base_config();
        config.save(dir.path()).unwrap();
        let mut session = session(&config);
        let mut watcher =
            ConfigWatcher::new(dir.path().to_path_buf(), config, CliArgs::default(), 1);

        std::fs::write(dir.path().join("config.ron"), "{{not ron").unwrap();
        assert!(!watcher.poll(&mut session.driver));
        assert_eq!(session.driver.clock().step(), TimeDelta::minutes(10));
    }

    #[test]
    fn test_checks_only_every_interval() {
        let dir = tempfile::tempdir().unwrap();
        let config = base_config();
        config.save(dir.path()).unwrap();
        let mut session = session(&config);
        let mut watcher =
            ConfigWatcher::new(dir.path().to_path_buf(), config.clone(), CliArgs::default(), 3);

        let mut edited = config.clone();
        edited.animation.step_minutes = 5;
        edited.save(dir.path()).unwrap();

        assert!(!watcher.poll(&mut session.driver));
        assert!(!watcher.poll(&mut session.driver));
        assert_eq!(session.driver.clock().step(), TimeDelta::minutes(10));
        assert!(watcher.poll(&mut session.driver));
        assert_eq!(session.driver.clock().step(), TimeDelta::minutes(5));
    }

    #[test]
    fn test_cli_overrides_survive_reload() {
        let dir = tempfile::tempdir().unwrap();
        let config = base_config();
        config.save(dir.path()).unwrap();
        let overrides = CliArgs {
            step_minutes: Some(2),
            ..CliArgs::default()
        };
        let mut session = session(&config);
        let mut watcher =
            ConfigWatcher::new(dir.path().to_path_buf(), config.clone(), overrides, 1);

        let mut edited = config.clone();
        edited.animation.step_minutes = 45;
        edited.animation.angle_step_degrees = 0.5;
        edited.save(dir.path()).unwrap();

        assert!(watcher.poll(&mut session.driver));
        assert_eq!(watcher.effective().animation.step_minutes, 2);
        assert_eq!(session.driver.clock().step(), TimeDelta::minutes(2));
        assert_eq!(session.driver.settings().angle_step_degrees, 0.5);
    }
}
