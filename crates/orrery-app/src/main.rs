//! Headless orrery: runs the animation and camera choreography for a fixed
//! number of frames and logs what a renderer would draw.
//!
//! Run with `cargo run -p orrery-app -- --view 0:Mars --view 300:overview`.

use clap::Parser;
use orrery_app::{FrameTimer, Orrery, PlatformDirs, load_catalog};
use orrery_config::{CliArgs, Config};
use tracing::{error, info};

fn main() {
    let args = CliArgs::parse();

    let dirs = match &args.config {
        Some(root) => Ok(PlatformDirs::resolve_with_root(root)),
        None => PlatformDirs::resolve(),
    };

    // Logging is not up yet, so config problems go to stderr.
    let mut config = match &dirs {
        Ok(dirs) => Config::load_or_create(&dirs.config_dir).unwrap_or_else(|err| {
            eprintln!("Failed to load config: {err}, using defaults");
            Config::default()
        }),
        Err(err) => {
            eprintln!("{err}, using default config");
            Config::default()
        }
    };
    config.apply_cli_overrides(&args);

    let log_dir = dirs.as_ref().ok().map(|dirs| dirs.log_dir.as_path());
    orrery_log::init_logging(log_dir, cfg!(debug_assertions), Some(&config));

    if let Ok(dirs) = &dirs {
        if let Err(err) = dirs.create_dirs() {
            error!("Failed to create directories: {err}");
        }
    }

    info!("Orrery starting");
    info!(
        "Speed x{:.2} | time mode {:?} | {} frames",
        config.simulation.clamped_speed(),
        config.simulation.time_mode,
        args.frames
    );

    let catalog = load_catalog(&config);
    let mut orrery = Orrery::new(&config, &catalog, args.views.clone());
    info!(
        "Scene: {} bodies, {} stars, {} orbit loops",
        catalog.bodies().count(),
        orrery.scene().stars.len(),
        orrery.scene().orbits.len()
    );

    let mut timer = FrameTimer::new(config.simulation.target_fps);
    for _ in 0..args.frames {
        let frame_dt = timer.tick();
        orrery.run_frame(frame_dt);
        timer.pace();
    }

    let snapshot = orrery.snapshot();
    info!(
        frames = orrery.frames_run(),
        elapsed = snapshot.elapsed,
        focus = %snapshot.focus,
        state = ?snapshot.state,
        "Orrery finished"
    );
}
