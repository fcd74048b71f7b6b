//! Application configuration loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file) is valid:
//!
//! ```toml
//! [window]
//! width = 700.0
//! height = 700.0
//! title = "Tic Tac Toe"
//!
//! [game]
//! mode = "vs-computer"   # or "two-player"; omit to pick in the menu
//! size = 3               # omit to pick in the menu
//! computer_delay_ms = 300
//! ```

use std::path::Path;
use std::time::Duration;

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::ui::GameMode;

/// Largest board the computer can search exhaustively without a long pause
pub const MAX_SEARCHABLE_SIZE: usize = 4;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub game: GameConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 700.0,
            height: 700.0,
            title: "Tic Tac Toe".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Skip the mode menu when set
    pub mode: Option<GameMode>,
    /// Skip the size menu when set
    pub size: Option<usize>,
    /// Pause before the computer answers a human move
    pub computer_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: None,
            size: None,
            computer_delay_ms: 300,
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml_str(&content)?;
        info!(game = ?config.game, "Config loaded successfully");
        Ok(config)
    }

    /// Parses and validates configuration text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values no game can be built from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.game.size == Some(0) {
            return Err(ConfigError::new("game.size must be at least 1"));
        }
        if !(self.window.width > 0.0 && self.window.height > 0.0) {
            return Err(ConfigError::new("window width and height must be positive"));
        }
        if let (Some(GameMode::VsComputer), Some(size)) = (self.game.mode, self.game.size) {
            if size > MAX_SEARCHABLE_SIZE {
                warn!(size, "computer search on boards this large may take very long");
            }
        }
        Ok(())
    }

    pub fn computer_delay(&self) -> Duration {
        Duration::from_millis(self.game.computer_delay_ms)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
