//! Configuration file handling for glyphwave.
//!
//! The configuration lives in `config.toml` inside the platform config directory
//! (for example `~/.config/glyphwave/config.toml` on Linux). Every key is optional.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use glyphwave_core::{CellMetrics, ColorTheme, CycleParams, MorphParams, PhysicsParams};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const CONFIG_FILE: &str = "config.toml";

/// Errors raised while reading or writing the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no configuration directory available on this platform")]
    NoConfigDir,
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid value for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// User configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pin a style by name instead of choosing one at random.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    /// JSON style set replacing the built-in styles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub styles_file: Option<PathBuf>,
    /// Foreground color theme.
    pub theme: ColorTheme,
    /// Target frames per second of the render loop.
    pub fps: u32,
    /// Backing pixels per logical unit.
    pub density: f32,
    /// Write logs to this file. No logging when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    /// Log level (`error`, `warn`, `info`, `debug`, `trace`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    pub cells: CellMetrics,
    pub physics: PhysicsParams,
    pub morph: MorphParams,
    pub cycle: CycleParams,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            style: None,
            styles_file: None,
            theme: ColorTheme::default(),
            fps: 60,
            density: 1.0,
            log_file: None,
            log_level: None,
            cells: CellMetrics::default(),
            physics: PhysicsParams::default(),
            morph: MorphParams::default(),
            cycle: CycleParams::default(),
        }
    }
}

impl Config {
    /// Default location of the configuration file.
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "glyphwave").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load from the default location, falling back to defaults when no file exists.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from `path`, falling back to defaults when the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the physics cannot settle with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |key, reason: &str| {
            Err(ConfigError::Invalid {
                key,
                reason: reason.to_string(),
            })
        };
        let physics = &self.physics;
        if !(0.0..1.0).contains(&physics.damping) {
            return invalid("physics.damping", "must be at least 0 and below 1");
        }
        if !(physics.spring > 0.0) {
            return invalid("physics.spring", "must be positive");
        }
        if !(physics.repel_radius >= 0.0) {
            return invalid("physics.repel_radius", "must not be negative");
        }
        if !(self.cells.cell_width > 0.0) {
            return invalid("cells.cell_width", "must be positive");
        }
        if !(self.cells.line_height > 0.0) {
            return invalid("cells.line_height", "must be positive");
        }
        Ok(())
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::config_path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Save to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let text = toml::to_string_pretty(self)?;
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        std::fs::write(path, text).map_err(write_err)
    }

    /// Time between two frames of the render loop.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.fps.clamp(1, 240)))
    }
}
