//! Session settings and tunables
//!
//! Read from a JSON file. Every field has a default, so a partial file only
//! overrides what it names.

use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::engine::{ModelAsset, TrackingConfig};
use crate::gesture::GestureConfig;

/// Environment variable naming a settings file
pub const SETTINGS_ENV: &str = "HEADS_OR_TAILS_SETTINGS";

/// Longest bounce phase accepted from settings (seconds)
pub const MAX_PHASE_SECS: f32 = 60.0;

/// Settings load failures
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("flip count range {min}..={max} is empty")]
    EmptyFlipRange { min: u32, max: u32 },

    #[error("flip {field} out of range: {value}")]
    InvalidFlipTuning { field: &'static str, value: f32 },
}

/// Flip animation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlipTuning {
    /// Fewest half-rotations a flip can make
    pub min_flips: u32,
    /// Most half-rotations a flip can make (inclusive)
    pub max_flips: u32,
    /// Rise height above the surface (meters)
    pub bounce_height: f32,
    /// Length of the rise, and of the fall (seconds)
    pub phase_secs: f32,
}

impl Default for FlipTuning {
    fn default() -> Self {
        Self {
            min_flips: FLIP_COUNT_MIN,
            max_flips: FLIP_COUNT_MAX,
            bounce_height: FLIP_BOUNCE_HEIGHT,
            phase_secs: FLIP_PHASE_SECS,
        }
    }
}

impl FlipTuning {
    pub fn flip_range(&self) -> RangeInclusive<u32> {
        self.min_flips..=self.max_flips
    }

    /// Time from swipe to result (rise + fall)
    pub fn total_secs(&self) -> f32 {
        self.phase_secs * 2.0
    }
}

/// Session settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed for flip counts; `None` seeds from the clock
    pub seed: Option<u64>,
    pub flip: FlipTuning,
    pub coin: ModelAsset,
    pub tracking: TrackingConfig,
    pub gestures: GestureConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            flip: FlipTuning::default(),
            coin: ModelAsset {
                scene: COIN_SCENE.to_string(),
                node: COIN_NODE.to_string(),
            },
            tracking: TrackingConfig::default(),
            gestures: GestureConfig::default(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load from `path`, or from `$HEADS_OR_TAILS_SETTINGS`, falling back to
    /// defaults when neither is given or the file can't be used
    pub fn load(path: Option<&Path>) -> Self {
        let env_path = std::env::var_os(SETTINGS_ENV);
        let path = path.or(env_path.as_deref().map(Path::new));

        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::from_file(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{} ({}), using defaults", e, path.display());
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the flip tuning can drive a session
    pub fn validate(&self) -> Result<(), SettingsError> {
        let flip = &self.flip;
        if flip.min_flips > flip.max_flips {
            return Err(SettingsError::EmptyFlipRange {
                min: flip.min_flips,
                max: flip.max_flips,
            });
        }
        for (field, value) in [
            ("phase_secs", flip.phase_secs),
            ("bounce_height", flip.bounce_height),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SettingsError::InvalidFlipTuning { field, value });
            }
        }
        if flip.phase_secs > MAX_PHASE_SECS {
            return Err(SettingsError::InvalidFlipTuning {
                field: "phase_secs",
                value: flip.phase_secs,
            });
        }
        Ok(())
    }
}
