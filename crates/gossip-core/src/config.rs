//! GossipGraph Configuration Management
//!
//! Handles configuration from a TOML file and environment variables,
//! with defaults that work without any setup.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Output file configuration
    pub output: OutputConfig,

    /// External renderer configuration
    pub render: RenderConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Output
        if let Ok(path) = std::env::var("GOSSIP_DOT_PATH") {
            config.output.dot_path = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var("GOSSIP_PNG_PATH") {
            config.output.png_path = PathBuf::from(path);
        }

        // Renderer
        if let Ok(enabled) = std::env::var("GOSSIP_RENDER") {
            config.render.enabled = parse_bool("GOSSIP_RENDER", &enabled)?;
        }
        if let Ok(exe) = std::env::var("GOSSIP_DOT_EXE") {
            // An explicit executable is tried before the defaults
            config.render.executables.insert(0, exe);
        }

        // Logging
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(config)
    }

    /// Load from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileReadError {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path,
            message: e.to_string(),
        })
    }

    /// Merge with environment variables (env takes precedence)
    pub fn with_env_override(mut self) -> Result<Self, ConfigError> {
        let env_config = Self::from_env()?;
        let defaults = Self::default();

        // Only override if env values differ from defaults
        if env_config.output.dot_path != defaults.output.dot_path {
            self.output.dot_path = env_config.output.dot_path;
        }
        if env_config.output.png_path != defaults.output.png_path {
            self.output.png_path = env_config.output.png_path;
        }
        if env_config.render.enabled != defaults.render.enabled {
            self.render.enabled = env_config.render.enabled;
        }
        if env_config.render.executables != defaults.render.executables {
            if let Some(exe) = env_config.render.executables.first() {
                self.render.executables.insert(0, exe.clone());
            }
        }
        if env_config.logging.level != defaults.logging.level {
            self.logging.level = env_config.logging.level;
        }

        Ok(self)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Output file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Where the DOT description is written
    pub dot_path: PathBuf,

    /// Where the rendered image is written
    pub png_path: PathBuf,

    /// Separator between kinds in a merged edge label
    pub label_delimiter: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dot_path: PathBuf::from("graph.dot"),
            png_path: PathBuf::from("graph.png"),
            label_delimiter: "|".to_string(),
        }
    }
}

/// External renderer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Attempt to rasterize the DOT file after export
    pub enabled: bool,

    /// Candidate Graphviz executables, tried in order
    pub executables: Vec<String>,

    /// Graphviz output format (`-T` flag)
    pub format: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            executables: vec![
                "dot".to_string(),
                r"C:\Program Files\Graphviz\bin\dot.exe".to_string(),
                r"C:\Program Files (x86)\Graphviz\bin\dot.exe".to_string(),
            ],
            format: "png".to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// JSON format for logs
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}
