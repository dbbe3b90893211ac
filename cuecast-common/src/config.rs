//! Configuration loading for the Cuecast host
//!
//! # Settings Sources Priority
//!
//! Config file location:
//! 1. Command-line argument (`--config`)
//! 2. Environment variable (`CUECAST_CONFIG`)
//! 3. Platform config file (`~/.config/cuecast/config.toml`, then `/etc/cuecast/config.toml` on Linux)
//!
//! Module name:
//! 1. Command-line argument (`--module`)
//! 2. Environment variable (`CUECAST_MODULE`)
//! 3. `module` key of the TOML file
//! 4. Built-in default (`skeleton`)
//!
//! A missing config file is not an error. A malformed one is logged and replaced
//! by built-in defaults so the host still starts.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "CUECAST_CONFIG";

/// Environment variable naming the playlist module to load
pub const MODULE_ENV_VAR: &str = "CUECAST_MODULE";

/// Host configuration loaded from TOML
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TomlConfig {
    /// Registered name of the playlist module to load
    #[serde(default = "default_module")]
    pub module: String,

    /// Number of tracks the host pulls before shutting the module down
    #[serde(default = "default_tracks")]
    pub tracks: u32,

    #[serde(default)]
    pub metadata: MetadataConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Metadata publication timing
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MetadataConfig {
    /// Delay before publishing the title of the first track (line number 0).
    /// The streaming server may not have accepted the source yet.
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Delay before publishing the title of every later track
    #[serde(default = "default_update_delay_ms")]
    pub update_delay_ms: u64,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_module() -> String {
    "skeleton".to_string()
}

fn default_tracks() -> u32 {
    3
}

fn default_initial_delay_ms() -> u64 {
    3000
}

fn default_update_delay_ms() -> u64 {
    1
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            module: default_module(),
            tracks: default_tracks(),
            metadata: MetadataConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: default_initial_delay_ms(),
            update_delay_ms: default_update_delay_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl MetadataConfig {
    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }

    pub fn update_delay(&self) -> Duration {
        Duration::from_millis(self.update_delay_ms)
    }
}

impl TomlConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TomlConfig =
            toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load configuration, degrading to defaults on any problem
    ///
    /// `None` or a nonexistent path yields defaults silently (logged at info).
    /// An unreadable or malformed file yields defaults with a warning.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            info!("No config file found, using built-in defaults");
            return Self::default();
        };

        if !path.exists() {
            info!("Config file {} not found, using built-in defaults", path.display());
            return Self::default();
        }

        match Self::load(path) {
            Ok(config) => {
                info!("Loaded configuration from {}", path.display());
                config
            }
            Err(e) => {
                warn!("Ignoring config file: {}. Using built-in defaults", e);
                Self::default()
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.module.trim().is_empty() {
            return Err(Error::Config("module name must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Resolves which config file to read and which module to load
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    cli_config: Option<PathBuf>,
    cli_module: Option<String>,
}

impl ConfigResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Config file path given on the command line
    pub fn with_cli_config(mut self, path: Option<PathBuf>) -> Self {
        self.cli_config = path;
        self
    }

    /// Module name given on the command line
    pub fn with_cli_module(mut self, module: Option<String>) -> Self {
        self.cli_module = module;
        self
    }

    /// Config file path by priority; `None` when no candidate exists
    pub fn config_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.cli_config {
            return Some(path.clone());
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.is_empty() {
                return Some(PathBuf::from(path));
            }
        }

        platform_config_candidates()
            .into_iter()
            .find(|candidate| candidate.exists())
    }

    /// Load the TOML configuration from the resolved path
    pub fn load(&self) -> TomlConfig {
        TomlConfig::load_or_default(self.config_path().as_deref())
    }

    /// Module name by priority: CLI, environment, config file
    pub fn module_name(&self, config: &TomlConfig) -> String {
        if let Some(module) = &self.cli_module {
            return module.clone();
        }

        if let Ok(module) = std::env::var(MODULE_ENV_VAR) {
            if !module.trim().is_empty() {
                return module;
            }
        }

        config.module.clone()
    }
}

/// Platform config file locations, most specific first
fn platform_config_candidates() -> Vec<PathBuf> {
    let mut candidates: Vec<PathBuf> = dirs::config_dir()
        .map(|d| d.join("cuecast").join("config.toml"))
        .into_iter()
        .collect();

    if cfg!(target_os = "linux") {
        candidates.push(PathBuf::from("/etc/cuecast/config.toml"));
    }

    candidates
}
