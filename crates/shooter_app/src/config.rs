//! Application configuration loaded from a TOML file.
//!
//! Layout:
//!
//! ```toml
//! [window]
//! title = "Shooter"
//! width = 1280
//! height = 720
//!
//! [log]
//! level = "debug"
//!
//! # tuning sections, see `shooter_core::config`
//! [movement]
//! sprint_gain = 7.0
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};
use serde::Deserialize;
use shooter_core::ShooterConfig;

use crate::game::DEFAULT_SIZE;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Shooter".to_string(),
            width: DEFAULT_SIZE.0,
            height: DEFAULT_SIZE.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `off`, `error`, `warn`, `info`, `debug` or `trace`.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LogConfig {
    pub fn level_filter(&self) -> Result<log::LevelFilter> {
        self.level
            .parse::<log::LevelFilter>()
            .with_context(|| format!("unknown log level {:?}", self.level))
    }
}

/// Initial configuration of the window and the game.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub log: LogConfig,
    #[serde(flatten)]
    pub shooter: ShooterConfig,
}

impl AppConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml(text: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(text).context("parse config TOML")?;
        cfg.shooter.validate().context("invalid tuning values")?;
        cfg.log.level_filter()?;
        Ok(cfg)
    }

    /// Reads `path`, or returns the defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            warn!("config {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read {}", path.display()))?;
        let cfg = Self::from_toml(&text).with_context(|| format!("load {}", path.display()))?;
        info!("loaded config from {}", path.display());
        Ok(cfg)
    }
}
