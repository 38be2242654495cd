use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default rolling radius in world units.
pub const OBJECT_RADIUS: f32 = 0.5;
/// Default curvature threshold multiplier.
pub const TILT_BOUNDARY: f32 = 5.0;
/// Default bank angle in degrees.
pub const TILT_AMOUNT: f32 = 30.0;
/// Default proportional tilt gain (degrees per second per degree remaining).
pub const TILT_SPEED: f32 = 5.0;

/// Authoring range for `tilt_boundary`.
pub const TILT_BOUNDARY_RANGE: (f32, f32) = (1.0, 20.0);
/// Authoring range for `tilt_amount` (degrees).
pub const TILT_AMOUNT_RANGE: (f32, f32) = (0.0, 90.0);
/// Authoring range for `tilt_speed`.
pub const TILT_SPEED_RANGE: (f32, f32) = (0.0, 50.0);

/// Static tuning for a [`crate::controller::RollController`], loadable from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RollConfig {
    /// Radius of the rolling mesh (world units, > 0).
    pub object_radius: f32,
    /// How much the object may turn before it starts banking.
    pub tilt_boundary: f32,
    /// Bank angle reached in a sustained turn (degrees).
    pub tilt_amount: f32,
    /// Proportional gain of the bank animation.
    pub tilt_speed: f32,
    /// Keep the accumulated bank inside `[-tilt_amount, tilt_amount]`.
    /// Off by default, in which case large `dt * tilt_speed` products can
    /// overshoot.
    pub clamp_tilt: bool,
}

impl Default for RollConfig {
    fn default() -> Self {
        Self {
            object_radius: OBJECT_RADIUS,
            tilt_boundary: TILT_BOUNDARY,
            tilt_amount: TILT_AMOUNT,
            tilt_speed: TILT_SPEED,
            clamp_tilt: false,
        }
    }
}

impl RollConfig {
    /// Load config from a TOML file. Falls back to defaults if the file is missing,
    /// unparseable, or out of range.
    pub fn load() -> Self {
        let path = std::env::var("ROLLNAV_CONFIG")
            .unwrap_or_else(|_| "config/rollnav.toml".to_string());
        Self::load_from(path)
    }

    /// Like [`RollConfig::load`] for an explicit path.
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::from_file(path) {
            Ok(cfg) => cfg,
            Err(ConfigError::Io(_)) => Self::default(),
            Err(e) => {
                tracing::warn!("Failed to load {}: {e}, using defaults", path.display());
                Self::default()
            },
        }
    }

    /// Read and validate a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate TOML text. Missing keys take their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check every tuning value against its authoring range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.object_radius.is_finite() && self.object_radius > 0.0) {
            return Err(ConfigError::NonPositiveRadius(self.object_radius));
        }
        check_range("tilt_boundary", self.tilt_boundary, TILT_BOUNDARY_RANGE)?;
        check_range("tilt_amount", self.tilt_amount, TILT_AMOUNT_RANGE)?;
        check_range("tilt_speed", self.tilt_speed, TILT_SPEED_RANGE)?;
        Ok(())
    }
}

fn check_range(field: &'static str, value: f32, (min, max): (f32, f32)) -> Result<(), ConfigError> {
    // Written so NaN fails the check.
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}
