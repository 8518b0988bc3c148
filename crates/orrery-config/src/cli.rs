//! Command-line argument parsing for the orrery driver.

use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use orrery_core::TimeMode;

use crate::Config;

/// A view change to request at a given frame, written `FRAME:TARGET`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledView {
    /// Frame index at which the request is issued.
    pub frame: u64,
    /// Focus target identifier (`overview`, `star`, or a body name).
    pub target: String,
}

impl FromStr for ScheduledView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (frame, target) = s
            .split_once(':')
            .ok_or_else(|| format!("expected FRAME:TARGET, got `{s}`"))?;
        let frame = frame
            .trim()
            .parse::<u64>()
            .map_err(|e| format!("bad frame number `{frame}`: {e}"))?;
        let target = target.trim();
        if target.is_empty() {
            return Err(format!("missing target in `{s}`"));
        }
        Ok(Self {
            frame,
            target: target.to_string(),
        })
    }
}

fn parse_time_mode(s: &str) -> Result<TimeMode, String> {
    match s.to_ascii_lowercase().as_str() {
        "fixed" => Ok(TimeMode::Fixed),
        "elapsed" => Ok(TimeMode::Elapsed),
        other => Err(format!("unknown time mode `{other}` (expected fixed or elapsed)")),
    }
}

/// Orrery command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "orrery", about = "Animated star system with camera choreography")]
pub struct CliArgs {
    /// Simulation speed multiplier.
    #[arg(long)]
    pub speed: Option<f64>,

    /// Time advancement: `fixed` (one tick per frame) or `elapsed`.
    #[arg(long, value_parser = parse_time_mode)]
    pub time_mode: Option<TimeMode>,

    /// Number of frames to run before exiting.
    #[arg(long, default_value_t = 600)]
    pub frames: u64,

    /// Scheduled view change, `FRAME:TARGET`. Repeatable.
    #[arg(long = "view")]
    pub views: Vec<ScheduledView>,

    /// Body catalog in RON format.
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(speed) = args.speed {
            self.simulation.speed_multiplier = speed;
        }
        if let Some(mode) = args.time_mode {
            self.simulation.time_mode = mode;
        }
        if let Some(ref path) = args.catalog {
            self.scene.catalog_path = Some(path.clone());
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
