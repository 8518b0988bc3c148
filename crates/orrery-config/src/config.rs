//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};
use std::time::Duration;

use orrery_core::{ChoreographyParams, FocusParams, TimeMode};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level orrery configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Clock and speed settings.
    pub simulation: SimulationConfig,
    /// Camera choreography and focus settings.
    pub camera: CameraConfig,
    /// Scene data settings.
    pub scene: SceneConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Simulation clock configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// How rendered frames map to nominal ticks.
    pub time_mode: TimeMode,
    /// Initial speed multiplier.
    pub speed_multiplier: f64,
    /// Upper bound of the speed control exposed to the viewer.
    pub max_speed_multiplier: f64,
    /// Frame pacing for the headless driver (0 = unpaced).
    pub target_fps: u32,
}

/// Camera configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Interpolation constants.
    pub choreography: ChoreographyParams,
    /// Standoff distances.
    pub focus: FocusParams,
    /// How long manual navigation keeps tracking paused after release.
    pub interaction_debounce_ms: u64,
}

/// Static scene data configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Optional RON body catalog. The built-in catalog is used when unset.
    pub catalog_path: Option<PathBuf>,
    /// Number of background stars.
    pub star_count: u32,
    /// Seed for the starfield generator.
    pub star_seed: u64,
    /// Edge length of the cube the starfield fills.
    pub starfield_extent: f64,
    /// Segments per orbit-line loop.
    pub orbit_segments: u32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Log a frame snapshot every N frames (0 = never).
    pub snapshot_interval: u64,
}

// --- Default implementations ---

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            time_mode: TimeMode::Fixed,
            speed_multiplier: 1.0,
            max_speed_multiplier: 5.0,
            target_fps: 60,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            choreography: ChoreographyParams::default(),
            focus: FocusParams::default(),
            interaction_debounce_ms: 100,
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            star_count: 2000,
            star_seed: 2024,
            starfield_extent: 2000.0,
            orbit_segments: 100,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            snapshot_interval: 60,
        }
    }
}

impl SimulationConfig {
    /// The configured speed, clamped into the viewer-facing range.
    pub fn clamped_speed(&self) -> f64 {
        if !self.speed_multiplier.is_finite() {
            return 0.0;
        }
        self.speed_multiplier
            .clamp(0.0, self.max_speed_multiplier.max(0.0))
    }
}

impl CameraConfig {
    pub fn interaction_debounce(&self) -> Duration {
        Duration::from_millis(self.interaction_debounce_ms)
    }
}

// --- Load / Save / Reload / Validate ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            config.validate()?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(4)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(config_dir.join(CONFIG_FILE), serialized).map_err(ConfigError::WriteError)
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let contents = std::fs::read_to_string(config_dir.join(CONFIG_FILE))
            .map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
        new_config.validate()?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    /// Rejects values the simulation cannot use at all.
    ///
    /// Values that merely look odd (a zero speed, an enormous standoff) are
    /// accepted; the core clamps what it must.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sim = &self.simulation;
        if !(sim.max_speed_multiplier.is_finite() && sim.max_speed_multiplier >= 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "simulation.max_speed_multiplier",
                reason: format!("must be a non-negative number, got {}", sim.max_speed_multiplier),
            });
        }
        let choreo = &self.camera.choreography;
        if !(choreo.follow_threshold.is_finite() && choreo.follow_threshold > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "camera.choreography.follow_threshold",
                reason: format!("must be positive, got {}", choreo.follow_threshold),
            });
        }
        if !(choreo.max_rate > 0.0 && choreo.max_rate <= 1.0) {
            return Err(ConfigError::InvalidValue {
                field: "camera.choreography.max_rate",
                reason: format!("must be in (0, 1], got {}", choreo.max_rate),
            });
        }
        if self.scene.orbit_segments < 3 {
            return Err(ConfigError::InvalidValue {
                field: "scene.orbit_segments",
                reason: format!("need at least 3 segments, got {}", self.scene.orbit_segments),
            });
        }
        Ok(())
    }
}
