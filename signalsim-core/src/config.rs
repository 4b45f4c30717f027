//! Serializable session configuration (TOML).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::timer::Millis;

/// Which revision of the screen flow to run. The two are never mixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowVariant {
    /// Selections are recorded; explicit confirm actions advance. No cooldown.
    Manual,
    /// Selections advance on their own; a cooldown follows each signal.
    #[default]
    Auto,
}

/// Timer settings, all in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    pub analysis_tick_ms: Millis,
    pub settle_ms: Millis,
    pub auto_advance_ms: Millis,
    pub counter_duration_ms: Millis,
    pub frame_ms: Millis,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            analysis_tick_ms: 600,
            settle_ms: 800,
            auto_advance_ms: 300,
            counter_duration_ms: 1000,
            frame_ms: 16,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Master seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    pub flow: FlowVariant,
    pub timings: Timings,
}

impl SimConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, SimError> {
        let config: SimConfig = toml::from_str(s).map_err(|e| SimError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, SimError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Load `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self, SimError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn to_toml_string(&self) -> Result<String, SimError> {
        toml::to_string_pretty(self).map_err(|e| SimError::Config(e.to_string()))
    }

    fn validate(&self) -> Result<(), SimError> {
        let t = &self.timings;
        if t.analysis_tick_ms == 0 {
            return Err(SimError::Config("timings.analysis_tick_ms must be > 0".into()));
        }
        if t.frame_ms == 0 {
            return Err(SimError::Config("timings.frame_ms must be > 0".into()));
        }
        Ok(())
    }
}
