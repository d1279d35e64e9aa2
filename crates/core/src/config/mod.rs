//! Configuration system for inputgate
//!
//! A single TOML file controls which entry points get hooked and how the
//! message filter behaves:
//! - Type-safe config structs via serde
//! - Auto-generation of the default file
//! - Manual reload capability
//!
//! # Example
//!
//! ```toml
//! version = 1
//! debug = false
//!
//! [hooks]
//! xinput_module = "xinput1_4"
//! disabled = ["PostMessageA", "PostMessageW"]
//!
//! [filter]
//! classify_peeked_messages = true
//!
//! [console]
//! capacity = 256
//! ```

mod loader;

use std::path::Path;

use serde::{Deserialize, Serialize};

use inputgate_sdk::symbols;

use crate::filter::MessageFilter;
use crate::hooks::EntryPoint;

pub use loader::{config_path, inputgate_base_dir, CONFIG_DIR_NAME, CONFIG_FILE_NAME};

/// Configuration system errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read or write config file
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse TOML content
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Failed to serialize config to TOML
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// Could not determine config directory from the host location
    #[error("Config directory not available - could not resolve host executable path")]
    NoConfigDirectory,
}

/// Result type for config operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Which entry points to hook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HooksConfig {
    /// XInput module the host links against (`xinput1_3`, `xinput1_4`, `xinput9_1_0`)
    pub xinput_module: String,

    /// Entry point names to leave unintercepted
    pub disabled: Vec<String>,
}

impl Default for HooksConfig {
    fn default() -> Self {
        Self {
            xinput_module: symbols::XINPUT1_3.to_string(),
            disabled: Vec::new(),
        }
    }
}

impl HooksConfig {
    /// Whether `entry_point` is switched off
    pub fn is_disabled(&self, entry_point: EntryPoint) -> bool {
        self.disabled
            .iter()
            .any(|name| name.eq_ignore_ascii_case(entry_point.symbol()))
    }

    /// Names in `disabled` that don't match any entry point
    pub fn unknown_disabled(&self) -> impl Iterator<Item = &str> {
        self.disabled
            .iter()
            .filter(|name| name.parse::<EntryPoint>().is_err())
            .map(String::as_str)
    }
}

/// Message filter behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Also classify messages that were only peeked, not removed
    pub classify_peeked_messages: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            classify_peeked_messages: true,
        }
    }
}

impl FilterConfig {
    pub fn build(&self) -> MessageFilter {
        MessageFilter::new(self.classify_peeked_messages)
    }
}

/// Overlay console buffering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Log lines buffered until the overlay drains them
    pub capacity: usize,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self { capacity: 256 }
    }
}

/// Top-level configuration.
///
/// Loaded from `<host dir>/inputgate/inputgate.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputGateConfig {
    /// Config version for future migration support
    pub version: u32,

    /// Enable debug logging
    pub debug: bool,

    pub hooks: HooksConfig,

    pub filter: FilterConfig,

    pub console: ConsoleConfig,
}

impl Default for InputGateConfig {
    fn default() -> Self {
        Self {
            version: 1,
            debug: false,
            hooks: HooksConfig::default(),
            filter: FilterConfig::default(),
            console: ConsoleConfig::default(),
        }
    }
}

impl InputGateConfig {
    /// Load config from the default path, creating it if missing.
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(&config_path()?)
    }

    /// Load config from `path`, creating a default file if missing.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = toml::from_str(&content)?;
            tracing::debug!("Loaded config from {:?}", path);
            config.warn_unknown();
            Ok(config)
        } else {
            let default = Self::default();
            default.save_to(path)?;
            tracing::info!("Created default config at {:?}", path);
            Ok(default)
        }
    }

    /// Save config to the default path.
    pub fn save(&self) -> ConfigResult<()> {
        self.save_to(&config_path()?)
    }

    /// Save config to `path`.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        tracing::debug!("Saved config to {:?}", path);
        Ok(())
    }

    /// Reload config from the default path.
    pub fn reload(&mut self) -> ConfigResult<()> {
        self.reload_from(&config_path()?)
    }

    /// Reload config from `path`.
    ///
    /// Hooks are installed once, so only filter and logging settings take
    /// effect without restarting the host.
    pub fn reload_from(&mut self, path: &Path) -> ConfigResult<()> {
        let content = std::fs::read_to_string(path)?;
        *self = toml::from_str(&content)?;
        tracing::debug!("Reloaded config from {:?}", path);
        self.warn_unknown();
        Ok(())
    }

    fn warn_unknown(&self) {
        for name in self.hooks.unknown_disabled() {
            tracing::warn!("Ignoring unknown entry point in hooks.disabled: {}", name);
        }
    }
}
