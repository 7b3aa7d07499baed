//! Configuration file support.
//!
//! Settings are stored as JSON so users can keep their label layout and
//! default class between runs.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_DISPLAY_SCALE, DEFAULT_LABEL, DEFAULT_LABEL_EXTENSION, DEFAULT_LABELS_DIR,
    DEFAULT_MAX_HISTORY,
};
use crate::format::LabelFileFormat;
use crate::model::Label;
use crate::undo::UndoConfig;

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Editor configuration that can be exported and imported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// Label applied to new quads until the user types another one
    #[serde(default = "default_label")]
    pub default_label: String,

    /// Directory next to the images that holds label files
    #[serde(default = "default_labels_dir")]
    pub labels_dir: String,

    /// Extension of label files
    #[serde(default = "default_label_extension")]
    pub label_extension: String,

    /// Display scale factor applied to incoming clicks
    #[serde(default = "default_display_scale")]
    pub display_scale: f64,

    /// Number of undone quads kept for redo
    #[serde(default = "default_max_history")]
    pub max_history: usize,

    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_label() -> String {
    DEFAULT_LABEL.to_string()
}

fn default_labels_dir() -> String {
    DEFAULT_LABELS_DIR.to_string()
}

fn default_label_extension() -> String {
    DEFAULT_LABEL_EXTENSION.to_string()
}

fn default_display_scale() -> f64 {
    DEFAULT_DISPLAY_SCALE
}

fn default_max_history() -> usize {
    DEFAULT_MAX_HISTORY
}

impl EditorConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            default_label: default_label(),
            labels_dir: default_labels_dir(),
            label_extension: default_label_extension(),
            display_scale: default_display_scale(),
            max_history: default_max_history(),
            log_level: LogLevel::default(),
        }
    }

    /// The configured default label, or `car` if the configured text is not
    /// a valid label.
    pub fn initial_label(&self) -> Label {
        Label::new(self.default_label.as_str()).unwrap_or_else(|e| {
            log::warn!("Ignoring configured default label: {}", e);
            Label::default()
        })
    }

    /// Label file layout described by this configuration.
    pub fn label_format(&self) -> LabelFileFormat {
        LabelFileFormat::new(self.labels_dir.as_str(), self.label_extension.as_str())
    }

    /// Undo history settings described by this configuration.
    pub fn undo_config(&self) -> UndoConfig {
        UndoConfig {
            max_history: self.max_history,
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        // Validate version compatibility
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        Ok(config)
    }

    /// Get the default filename for the config file.
    pub fn default_filename() -> &'static str {
        "quadlabel-config.json"
    }

    /// Get the default config file path for auto-load/save.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<std::path::PathBuf> {
        // Try to use XDG config directory, fall back to home directory
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("quadlabel").join(Self::default_filename()))
        } else {
            dirs::home_dir().map(|home_dir| {
                home_dir
                    .join(".config")
                    .join("quadlabel")
                    .join(Self::default_filename())
            })
        }
    }

    /// Try to load configuration from `path`.
    /// Returns None if the file doesn't exist or can't be read.
    pub fn load_from_path(path: &std::path::Path) -> Option<Self> {
        if !path.exists() {
            log::debug!("No config file found at {:?}", path);
            return None;
        }

        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded configuration from {:?}", path);
                    Some(config)
                }
                Err(e) => {
                    log::warn!("Failed to parse config file {:?}: {}", path, e);
                    None
                }
            },
            Err(e) => {
                log::warn!("Failed to read config file {:?}: {}", path, e);
                None
            }
        }
    }

    /// Try to load configuration from the default path.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_default_path() -> Option<Self> {
        Self::load_from_path(&Self::default_path()?)
    }

    /// Save configuration to `path`, creating parent directories if needed.
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = self.to_json()?;
        std::fs::write(path, json)?;
        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// I/O error when reading/writing config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
