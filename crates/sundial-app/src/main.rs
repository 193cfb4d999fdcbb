//! Sundial preview binary.
//!
//! Generates a terrain field, then animates the sun and moon over it for the
//! configured location. Frames go to a headless renderer that logs the sky
//! once per simulated hour. Edits to `config.ron` are picked up about once a
//! second.
//!
//! Run with `cargo run -p sundial-app -- --frames 1440` for ten simulated days
//! at the default ten-minute step.

use std::process::ExitCode;

use chrono::Utc;
use clap::Parser;
use sundial_app::{
    AppError, ConfigWatcher, FramePacer, HeadlessRenderer, PlatformDirs, RunStats, Session,
};
use sundial_config::{CliArgs, Config};
use sundial_ephemeris::SunCalc;
use tracing::{error, info};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let loaded = load(&args);
    let (dirs, on_disk) = match loaded {
        Ok(loaded) => loaded,
        Err(e) => {
            sundial_log::init_logging(None, false, None);
            error!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    let mut config = on_disk.clone();
    config.apply_cli_overrides(&args);

    sundial_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));
    info!(config_dir = %dirs.config_dir.display(), "Sundial starting");

    let watcher = ConfigWatcher::new(
        dirs.config_dir.clone(),
        on_disk,
        args.clone(),
        u64::from(config.animation.target_fps),
    );

    match run(&config, watcher, args.frames) {
        Ok(stats) => {
            info!(
                rendered = stats.rendered,
                skipped = stats.skipped,
                "Sundial finished"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Resolve and create the app directories, then read `config.ron` as stored.
fn load(args: &CliArgs) -> Result<(PlatformDirs, Config), AppError> {
    let dirs = match args.config.as_deref() {
        Some(dir) => PlatformDirs::from_config_dir(dir),
        None => PlatformDirs::resolve()?,
    };
    dirs.create_dirs()?;
    let config = Config::load_or_create(&dirs.config_dir)?;
    Ok((dirs, config))
}

fn run(
    config: &Config,
    mut watcher: ConfigWatcher,
    frames: Option<u64>,
) -> Result<RunStats, AppError> {
    let mut session: Session<SunCalc, HeadlessRenderer> =
        Session::from_config(config, SunCalc::new(), Utc::now())?;
    info!(
        seed = session.seed,
        snow = session.biomes.snow,
        rock = session.biomes.rock,
        grass = session.biomes.grass,
        water = session.biomes.water,
        "Scene ready"
    );

    session.driver.attach_surface(HeadlessRenderer::new());
    let mut pacer = FramePacer::with_target_fps(config.animation.target_fps);
    let stats = pacer.run_with(&mut session.driver, frames, |driver| {
        watcher.poll(driver);
    });
    session.driver.stop();
    Ok(stats)
}
