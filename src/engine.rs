//=========================================================================
// Lanebound Engine
//
// Main entry point: builds the game context and hands it to the platform.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run()──>  [winit event loop]
//         │                          │
//         ├─ with_config()           ├─ creates the input channel
//         ├─ with_config_file()      ├─ builds Game on a PixmapCanvas
//         ├─ with_channel_capacity() └─ runs the platform on this thread
//         └─ with_levels()              blocks until the window closes
// ```
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::path::Path;

//=== External Dependencies ===============================================

use crossbeam_channel::bounded;
use log::info;
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::config::{ConfigError, GameConfig};
use crate::content::{LevelSpec, SceneContent};
use crate::core::game::{canvas_size_tier, Game};
use crate::core::platform_bridge::PlatformError;
use crate::core::render::{PixmapCanvas, RenderError};
use crate::platform::Platform;

//=== EngineError =========================================================

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("render surface: {0}")]
    Render(#[from] RenderError),

    #[error("platform: {0}")]
    Platform(#[from] PlatformError),
}

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **Config**: `GameConfig::default()`
/// - **Channel capacity**: 128 input batches
/// - **Levels**: the standard level set
///
/// # Examples
///
/// ```no_run
/// use lanebound::EngineBuilder;
///
/// EngineBuilder::new()
///     .with_config_file("lanebound.toml")?
///     .with_channel_capacity(256)
///     .build()
///     .run()?;
/// # Ok::<(), lanebound::EngineError>(())
/// ```
pub struct EngineBuilder {
    config: GameConfig,
    channel_capacity: usize,
    content: SceneContent,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            config: GameConfig::default(),
            channel_capacity: 128,
            content: SceneContent::default(),
        }
    }

    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Loads and validates a TOML config.
    ///
    /// # Errors
    ///
    /// Unreadable file, wrong extension, parse or validation failure.
    pub fn with_config_file(mut self, path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        self.config = GameConfig::load_from_file(path)?;
        info!("Loaded config from {}", path.display());
        Ok(self)
    }

    /// Sets how many input batches may queue between two frames.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Replaces the level set played in order.
    ///
    /// # Panics
    ///
    /// Panics if `levels` is empty.
    pub fn with_levels(mut self, levels: Vec<LevelSpec>) -> Self {
        assert!(!levels.is_empty(), "At least one level is required");
        self.content.levels = levels;
        self
    }

    pub fn build(self) -> Engine {
        info!(
            "Engine built: {} levels, {} starting lives, channel capacity {}",
            self.content.levels.len(),
            self.config.gameplay.starting_lives,
            self.channel_capacity
        );
        Engine {
            config: self.config,
            channel_capacity: self.channel_capacity,
            content: self.content,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

pub struct Engine {
    config: GameConfig,
    channel_capacity: usize,
    content: SceneContent,
}

impl Engine {
    /// Runs the game until the window closes. Blocks the calling thread,
    /// which must be the main thread.
    ///
    /// # Errors
    ///
    /// Canvas allocation, event loop or presentation failures.
    pub fn run(self) -> Result<(), EngineError> {
        info!("Starting engine runtime");

        //--- 1. Input channel --------------------------------------------
        let (tx, rx) = bounded(self.channel_capacity);
        info!("Input channel created (capacity: {})", self.channel_capacity);

        //--- 2. Game on a raster canvas -----------------------------------
        let side = canvas_size_tier(self.config.window.width);
        let canvas = PixmapCanvas::new(side, side)?;
        let game = Game::new(self.config, Box::new(canvas), self.content, rx);

        //--- 3. Platform event loop (blocks here) -------------------------
        Platform::new(game, tx).run()?;

        info!("Engine shutdown complete");
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::levels;

    //=====================================================================
    // EngineBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = EngineBuilder::new();
        assert_eq!(builder.channel_capacity, 128);
        assert_eq!(builder.config, GameConfig::default());
        assert_eq!(builder.content.levels, levels::standard_levels());
    }

    #[test]
    fn builder_with_channel_capacity() {
        let builder = EngineBuilder::new().with_channel_capacity(256);
        assert_eq!(builder.channel_capacity, 256);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn builder_with_channel_capacity_panics_on_zero() {
        EngineBuilder::new().with_channel_capacity(0);
    }

    #[test]
    fn builder_with_levels() {
        let builder = EngineBuilder::new().with_levels(vec![levels::tube()]);
        assert_eq!(builder.content.levels.len(), 1);
    }

    #[test]
    #[should_panic(expected = "At least one level is required")]
    fn builder_with_no_levels_panics() {
        EngineBuilder::new().with_levels(Vec::new());
    }

    #[test]
    fn builder_with_config() {
        let mut config = GameConfig::default();
        config.gameplay.starting_lives = 5;
        let engine = EngineBuilder::new().with_config(config.clone()).build();
        assert_eq!(engine.config, config);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let result = EngineBuilder::new().with_config_file("/definitely/not/here.toml");
        assert!(matches!(result, Err(EngineError::Config(ConfigError::Io(_)))));
    }

    #[test]
    fn wrong_extension_is_rejected() {
        let result = EngineBuilder::new().with_config_file("settings.json");
        assert!(matches!(result, Err(EngineError::Config(ConfigError::UnsupportedFormat(_)))));
    }

    #[test]
    fn fluent_api_chaining() {
        let engine = EngineBuilder::new()
            .with_channel_capacity(16)
            .with_levels(vec![levels::ridge(), levels::tube()])
            .build();

        assert_eq!(engine.channel_capacity, 16);
        assert_eq!(engine.content.levels.len(), 2);
    }

    #[test]
    fn engine_error_wraps_sources() {
        let err = EngineError::from(RenderError::ZeroSized { width: 0, height: 0 });
        assert_eq!(err.to_string(), "render surface: cannot allocate a 0x0 surface");
    }
}
