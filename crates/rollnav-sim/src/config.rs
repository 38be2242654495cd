use std::path::Path;

use serde::{Deserialize, Serialize};

use rollnav_core::config::RollConfig;
use rollnav_core::error::ConfigError;

use crate::agent::AgentConfig;
use crate::path::PathKind;

/// Everything a headless run needs, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Number of frames to simulate.
    pub frames: u32,
    /// Fixed frame duration (seconds).
    pub dt: f32,
    pub path: PathKind,
    /// Path size in world units.
    pub path_scale: f32,
    pub agent: AgentConfig,
    /// Taken from `RollConfig::load` (`ROLLNAV_CONFIG` or `config/rollnav.toml`)
    /// when the `[roll]` table is absent.
    #[serde(default = "RollConfig::load")]
    pub roll: RollConfig,
    /// Frame at which to call `stop_tilting`.
    pub stop_at_frame: Option<u32>,
    /// Frame at which to call `reset_tilting`.
    pub reset_at_frame: Option<u32>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            frames: 600,
            dt: 1.0 / 60.0,
            path: PathKind::default(),
            path_scale: 10.0,
            agent: AgentConfig::default(),
            roll: RollConfig::default(),
            stop_at_frame: None,
            reset_at_frame: None,
        }
    }
}

impl SimConfig {
    /// Load config from environment or TOML file, falling back to defaults.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("ROLLNAV_SIM_CONFIG") {
            match Self::from_file(&path) {
                Ok(config) => return config,
                Err(e) => tracing::warn!("Failed to load {path}: {e}, trying config/sim.toml"),
            }
        }
        match Self::from_file("config/sim.toml") {
            Ok(config) => config,
            Err(ConfigError::Io(_)) => Self::default(),
            Err(e) => {
                tracing::warn!("Failed to load config/sim.toml: {e}, using defaults");
                Self::default()
            },
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.roll.validate()?;
        if !(self.dt.is_finite() && self.dt > 0.0 && self.dt <= 1.0) {
            return Err(ConfigError::OutOfRange {
                field: "dt",
                value: self.dt,
                min: f32::EPSILON,
                max: 1.0,
            });
        }
        if !(self.path_scale.is_finite() && self.path_scale > 0.0) {
            return Err(ConfigError::OutOfRange {
                field: "path_scale",
                value: self.path_scale,
                min: f32::EPSILON,
                max: f32::MAX,
            });
        }
        Ok(())
    }
}
