//! Configuration file handling for nightsky.
//!
//! Settings live in `config.toml` inside the platform configuration
//! directory. Every field is optional; anything missing takes its default.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use nightsky_core::{LayerStyle, Rgba, ShootingStarConfig, StarFieldConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Name of the configuration file.
const CONFIG_FILE: &str = "config.toml";

/// Highest frame rate the loop will try to hold.
const MAX_FPS: u32 = 240;

/// Errors reading or writing the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("no configuration directory available on this platform")]
    NoConfigDir,
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Layers shown at startup.
    pub style: LayerStyle,
    /// Opaque sky color behind the particles.
    pub background: Rgba,
    /// Target frames per second.
    pub fps: u32,
    /// Fixed random seed; a time-based seed is used when absent.
    pub seed: Option<u64>,
    /// Whether the key help bar is shown.
    pub show_help: bool,
    /// Star field settings.
    pub stars: StarFieldConfig,
    /// Shooting star settings.
    pub shooting_stars: ShootingStarConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            style: LayerStyle::default(),
            background: Rgba::new(5, 6, 15, 1.0),
            fps: 60,
            seed: None,
            show_help: true,
            stars: StarFieldConfig::default(),
            shooting_stars: ShootingStarConfig::default(),
        }
    }
}

impl Config {
    /// Platform configuration directory for nightsky.
    pub fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "nightsky")
    }

    /// Default location of the configuration file.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Self::project_dirs()
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load from the default location, or defaults when no file exists.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from a specific file, or defaults when it does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write to the default location.
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Write to a specific file, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents).map_err(io_err)?;
        debug!(path = %path.display(), "saved config");
        Ok(())
    }

    /// Time between frames for the configured rate.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps.clamp(1, MAX_FPS)
    }
}
