//=========================================================================
// Game Configuration
//=========================================================================
//
// Tunables loaded from TOML, with defaults for every field.
//
// ```toml
// [window]
// title = "Lanebound"
// width = 800
// height = 800
//
// [gameplay]
// starting_lives = 2
// fire_interval_ms = 150.0
// max_node_id = 100000
// seed = 7
//
// [timing]
// resize_debounce_ms = 200.0
// game_over_pause_ms = 1000.0
// game_over_settle_ms = 500.0
// ```
//
// Any section or key may be omitted; `#[serde(default)]` fills the gap.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

//=== ConfigError =========================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

//=== Sections ============================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Lanebound".to_string(),
            width: 800,
            height: 800,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    pub starting_lives: u32,

    /// Minimum time between two shots while fire is held.
    pub fire_interval_ms: f64,

    /// Largest node id before ids wrap back to 0.
    pub max_node_id: u32,

    /// Seed for enemy spawning.
    pub seed: u64,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            starting_lives: 2,
            fire_interval_ms: 150.0,
            max_node_id: 100_000,
            seed: 7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub resize_debounce_ms: f64,
    pub game_over_pause_ms: f64,
    pub game_over_settle_ms: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            resize_debounce_ms: 200.0,
            game_over_pause_ms: 1000.0,
            game_over_settle_ms: 500.0,
        }
    }
}

//=== GameConfig ==========================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub gameplay: GameplayConfig,
    pub timing: TimingConfig,
}

impl GameConfig {
    //--- Loading ----------------------------------------------------------

    /// Loads and validates a `.toml` file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.extension().and_then(|e| e.to_str()) != Some("toml") {
            return Err(ConfigError::UnsupportedFormat(path.display().to_string()));
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    //--- Validation -------------------------------------------------------

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid {
                field: "window",
                reason: format!("{}x{} has no area", self.window.width, self.window.height),
            });
        }
        if self.gameplay.fire_interval_ms.is_nan() || self.gameplay.fire_interval_ms < 0.0 {
            return Err(ConfigError::Invalid {
                field: "gameplay.fire_interval_ms",
                reason: "must be a non-negative number".to_string(),
            });
        }
        let timings = [
            ("timing.resize_debounce_ms", self.timing.resize_debounce_ms),
            ("timing.game_over_pause_ms", self.timing.game_over_pause_ms),
            ("timing.game_over_settle_ms", self.timing.game_over_settle_ms),
        ];
        for (field, value) in timings {
            if value.is_nan() || value < 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be a non-negative number".to_string(),
                });
            }
        }
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
