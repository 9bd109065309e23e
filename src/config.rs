use crate::theme::Theme;
use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const APP_DIR: &str = "schedulr";
const CONFIG_FILE: &str = "config.toml";
const LOG_FILE: &str = "schedulr.log";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: Theme,
    pub sample_data: bool,
    pub profile: Profile,
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            sample_data: true,
            profile: Profile::default(),
            log: LogConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "John Doe".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub file: Option<PathBuf>,
}

/// Where [`Config::load`] got its values from. Loading happens before the
/// subscriber exists, so the outcome is reported afterwards via
/// [`ConfigSource::report`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Missing(PathBuf),
    NoConfigDir,
}

impl ConfigSource {
    pub fn report(&self, cfg: &Config) {
        match self {
            ConfigSource::File(path) => {
                info!(config = %path.display(), theme = cfg.theme.name(), "config loaded")
            }
            ConfigSource::Missing(path) => {
                warn!(config = %path.display(), "config file not found; using defaults")
            }
            ConfigSource::NoConfigDir => warn!("no config directory available; using defaults"),
        }
    }
}

impl Config {
    /// Reads `path`, or the default location when `None`. A missing file
    /// yields defaults; an unreadable or malformed one is an error.
    pub fn load(path: Option<&Path>) -> anyhow::Result<(Self, ConfigSource)> {
        let Some(path) = path.map(Path::to_path_buf).or_else(default_config_path) else {
            return Ok((Self::default(), ConfigSource::NoConfigDir));
        };

        if !path.exists() {
            return Ok((Self::default(), ConfigSource::Missing(path)));
        }

        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let cfg = Self::parse(&raw)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        Ok((cfg, ConfigSource::File(path)))
    }

    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn log_file(&self) -> PathBuf {
        self.log.file.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join(APP_DIR)
                .join(LOG_FILE)
        })
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}
