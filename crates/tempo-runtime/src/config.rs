//! Runtime configuration loaded from TOML

use crate::clock::GameClock;
use crate::phase::PlayerLoopTiming;
use crate::player_loop::{PlayerLoop, DEFAULT_MAX_FIXED_STEPS};
use crate::runners::SystemRunners;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tempo_convert::ConversionOptions;
use tempo_core::{Result, TempoError};

/// Frame loop settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoopConfig {
    #[serde(default = "default_fixed_timestep_hz")]
    pub fixed_timestep_hz: f64,
    #[serde(default = "default_max_frame_time")]
    pub max_frame_time: f64,
    /// Fixed steps a single frame may run before the backlog is dropped
    #[serde(default = "default_max_fixed_steps")]
    pub max_fixed_steps: u32,
    /// Phase that newly added systems attach to
    #[serde(default = "default_phase")]
    pub default_phase: String,
}

fn default_fixed_timestep_hz() -> f64 {
    50.0
}

fn default_max_frame_time() -> f64 {
    0.25
}

fn default_max_fixed_steps() -> u32 {
    DEFAULT_MAX_FIXED_STEPS
}

/// Highest accepted fixed update rate
pub const MAX_FIXED_TIMESTEP_HZ: f64 = 10_000.0;

fn default_phase() -> String {
    PlayerLoopTiming::Update.as_str().to_string()
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            fixed_timestep_hz: default_fixed_timestep_hz(),
            max_frame_time: default_max_frame_time(),
            max_fixed_steps: default_max_fixed_steps(),
            default_phase: default_phase(),
        }
    }
}

impl LoopConfig {
    pub fn default_phase(&self) -> Result<PlayerLoopTiming> {
        self.default_phase.parse()
    }

    /// A clock using these settings
    pub fn clock(&self) -> GameClock {
        let mut clock = GameClock::with_fixed_timestep(self.fixed_timestep_hz);
        clock.max_frame_time = self.max_frame_time;
        clock
    }

    /// A player loop driven by [`LoopConfig::clock`]
    pub fn player_loop(&self) -> PlayerLoop {
        PlayerLoop::new(self.clock()).with_max_fixed_steps(self.max_fixed_steps)
    }
}

/// Top-level config file structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TempoConfig {
    #[serde(default, rename = "loop")]
    pub frame_loop: LoopConfig,
    #[serde(default)]
    pub conversion: ConversionOptions,
}

impl TempoConfig {
    /// Load and validate a config file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate a config from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TempoConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        let hz = self.frame_loop.fixed_timestep_hz;
        if !(hz.is_finite() && hz > 0.0 && hz <= MAX_FIXED_TIMESTEP_HZ) {
            return Err(TempoError::ConfigError(format!(
                "fixed_timestep_hz must be in (0, {}], got {}",
                MAX_FIXED_TIMESTEP_HZ, hz
            )));
        }

        if self.frame_loop.max_fixed_steps == 0 {
            return Err(TempoError::ConfigError(
                "max_fixed_steps must be at least 1".to_string(),
            ));
        }

        let max = self.frame_loop.max_frame_time;
        if !(max.is_finite() && max > 0.0) {
            return Err(TempoError::ConfigError(format!(
                "max_frame_time must be positive, got {}",
                max
            )));
        }

        self.frame_loop.default_phase()?;
        Ok(())
    }

    /// Redirect the default runner to the configured phase
    pub fn apply(&self, runners: &mut SystemRunners) -> Result<()> {
        runners.set_default_phase(self.frame_loop.default_phase()?);
        Ok(())
    }
}
