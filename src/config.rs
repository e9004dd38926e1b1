//! Runtime configuration.
//!
//! Read from `<config dir>/alphascape/config.json`, or from the path in `ALPHASCAPE_CONFIG`.
//! A missing file at the per-user location means defaults. A path named by `ALPHASCAPE_CONFIG`
//! must exist. Every field is optional.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::scene::Variant;

pub const CONFIG_ENV: &str = "ALPHASCAPE_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Defaults to the variant's size.
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// `None` keeps the driver's swap interval.
    pub vsync: Option<bool>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Alphascape".to_string(),
            width: None,
            height: None,
            vsync: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub variant: Variant,
    pub window: WindowConfig,
    /// Rasterize polygons as outlines.
    pub wireframe: bool,
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            window: WindowConfig::default(),
            wireframe: false,
            log_level: LevelFilter::Info,
        }
    }
}

/// Where the config file comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Named by `ALPHASCAPE_CONFIG`. The file must exist.
    Explicit(PathBuf),
    /// The per-user location. A missing file means defaults.
    Default(PathBuf),
}

impl ConfigSource {
    /// Picks the env override if set, otherwise the file under `config_dir`.
    pub fn resolve(env: Option<OsString>, config_dir: Option<PathBuf>) -> Option<Self> {
        if let Some(path) = env {
            return Some(Self::Explicit(PathBuf::from(path)));
        }
        config_dir.map(|dir| Self::Default(dir.join("alphascape").join("config.json")))
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Explicit(path) | Self::Default(path) => path,
        }
    }
}

impl Config {
    /// Loads and validates the config, falling back to defaults when there is no file at the
    /// per-user location.
    pub fn load() -> Result<Self, ConfigError> {
        match ConfigSource::resolve(std::env::var_os(CONFIG_ENV), dirs::config_dir()) {
            Some(source) => Self::load_from(&source),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(source: &ConfigSource) -> Result<Self, ConfigError> {
        let path = source.path();
        match std::fs::read_to_string(path) {
            Ok(json) => {
                log::debug!("loading config from {}", path.display());
                Self::from_json(&json)
            }
            Err(e)
                if e.kind() == std::io::ErrorKind::NotFound
                    && matches!(source, ConfigSource::Default(_)) =>
            {
                log::debug!("no config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = self.window_size();
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidDimensions { width, height });
        }
        Ok(())
    }

    /// The requested window size with the variant's defaults filled in.
    pub fn window_size(&self) -> (u32, u32) {
        let (width, height) = self.variant.default_size();
        (
            self.window.width.unwrap_or(width),
            self.window.height.unwrap_or(height),
        )
    }
}
