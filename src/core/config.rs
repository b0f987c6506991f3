//! Core domain: simulation configuration loaded from RON at startup.

use std::fs;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use rand::Rng;
use ron::Options;
use serde::Deserialize;
use thiserror::Error;

use crate::fsm::DEFAULT_TRANSITION_TIMEOUT_MS;

pub const CONFIG_PATH: &str = "assets/config/simulation.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },
}

/// Frame-loop and wiring knobs. Gameplay thresholds are constants next to the
/// states that use them and are not configurable.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed for every entity's random source; drawn from the thread RNG when absent.
    pub seed: Option<u64>,
    pub max_frame_delta_ms: f32,
    pub transition_timeout_ms: f32,
    /// Screen pixels per world unit (one tile is one unit).
    pub pixels_per_unit: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_frame_delta_ms: 32.0,
            transition_timeout_ms: DEFAULT_TRANSITION_TIMEOUT_MS,
            pixels_per_unit: 24.0,
        }
    }
}

impl SimulationConfig {
    pub fn from_ron(source: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = ron_options()
            .from_str(source)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&contents, path)
    }

    /// Load from `path`, or fall back to defaults with a warning.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => {
                info!("Loaded simulation config from {}", path.display());
                config
            }
            Err(error) => {
                warn!("{error}; using default simulation config");
                Self::default()
            }
        }
    }

    /// The configured seed, or a fresh one.
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| rand::rng().random())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("max_frame_delta_ms", self.max_frame_delta_ms),
            ("transition_timeout_ms", self.transition_timeout_ms),
            ("pixels_per_unit", self.pixels_per_unit),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        Ok(())
    }
}

fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}
