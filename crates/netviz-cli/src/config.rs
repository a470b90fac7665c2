//! Configuration system for netviz
//!
//! Supports multiple configuration sources with proper precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. Configuration files (.netviz.yaml, .netviz.json, etc.)
//! 4. Built-in defaults (lowest priority)

use anyhow::{Context, Result};
use clap::ValueEnum;
use log::{debug, info};
use netviz_logging::LogFormat;
use netviz_plot::WindowConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "NETVIZ_CONFIG";

const CONFIG_FILE_NAMES: [&str; 4] = [
    ".netviz.yaml",
    ".netviz.yml",
    ".netviz.json",
    ".netviz.toml",
];

/// Main netviz configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct NetvizConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowSettings,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSettings {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_window_width")]
    pub width: u32,
    #[serde(default = "default_window_height")]
    pub height: u32,
    #[serde(default = "default_true")]
    pub resizable: bool,
    #[serde(default = "default_true")]
    pub vsync: bool,
}

impl WindowSettings {
    pub fn to_window_config(&self) -> WindowConfig {
        WindowConfig {
            title: self.title.clone(),
            width: self.width.max(1),
            height: self.height.max(1),
            resizable: self.resizable,
            vsync: self.vsync,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default)]
    pub level: LogLevel,
    /// Output format
    #[serde(default)]
    pub format: LogFormat,
}

/// Log level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

// Default value functions
fn default_title() -> String {
    "netviz".to_string()
}
fn default_window_width() -> u32 {
    800
}
fn default_window_height() -> u32 {
    600
}
fn default_true() -> bool {
    true
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: default_title(),
            width: default_window_width(),
            height: default_window_height(),
            resizable: true,
            vsync: true,
        }
    }
}

/// Configuration loader with multiple source support
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper precedence
    pub fn load() -> Result<NetvizConfig> {
        let mut config = Self::load_from_files()?;
        Self::apply_environment_variables(&mut config);
        Ok(config)
    }

    /// Load from an explicit file (which must exist), then apply env overrides
    pub fn load_explicit(path: &Path) -> Result<NetvizConfig> {
        if !path.is_file() {
            anyhow::bail!("config file does not exist: {}", path.display());
        }
        let mut config = Self::load_from_file(path)?;
        Self::apply_environment_variables(&mut config);
        Ok(config)
    }

    /// Find and load configuration from files
    fn load_from_files() -> Result<NetvizConfig> {
        for path in Self::find_config_files() {
            if path.is_dir() {
                info!(
                    "Ignoring config directory path (expected file): {}",
                    path.display()
                );
                continue;
            }
            if path.exists() {
                info!("Loading configuration from: {}", path.display());
                return Self::load_from_file(&path);
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(NetvizConfig::default())
    }

    /// Potential configuration file paths, in order of preference
    pub fn find_config_files() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. Environment variable override
        if let Ok(config_path) = env::var(CONFIG_ENV) {
            if !config_path.trim().is_empty() {
                paths.push(PathBuf::from(config_path));
            }
        }

        // 2. Current directory
        if let Ok(current_dir) = env::current_dir() {
            paths.extend(CONFIG_FILE_NAMES.iter().map(|name| current_dir.join(name)));
        }

        // 3. Home directory
        if let Some(home_dir) = dirs::home_dir() {
            paths.extend(CONFIG_FILE_NAMES.iter().map(|name| home_dir.join(name)));
        }

        paths
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<NetvizConfig> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?,
            Some("json") => serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?,
            Some("toml") => toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?,
            _ => {
                // Unknown extension: try each format in turn
                if let Ok(config) = serde_yaml::from_str(&content) {
                    config
                } else if let Ok(config) = toml::from_str(&content) {
                    config
                } else if let Ok(config) = serde_json::from_str(&content) {
                    config
                } else {
                    return Err(anyhow::anyhow!(
                        "Could not parse config file {} (tried YAML, TOML, JSON)",
                        path.display()
                    ));
                }
            }
        };

        Ok(config)
    }

    /// Apply environment variable overrides. Unparseable values are ignored.
    pub fn apply_environment_variables(config: &mut NetvizConfig) {
        if let Some(width) = env_u32("NETVIZ_WIDTH") {
            config.window.width = width;
        }
        if let Some(height) = env_u32("NETVIZ_HEIGHT") {
            config.window.height = height;
        }
        if let Some(vsync) = env::var("NETVIZ_VSYNC").ok().and_then(|v| parse_bool(&v)) {
            config.window.vsync = vsync;
        }
        if let Some(level) = env::var("NETVIZ_LOG_LEVEL")
            .ok()
            .and_then(|v| LogLevel::from_str(v.trim(), true).ok())
        {
            config.logging.level = level;
        }
    }

    /// Save configuration to a file, picking the format from the extension
    pub fn save_to_file(config: &NetvizConfig, path: &Path) -> Result<()> {
        let content = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::to_string_pretty(config)
                .context("Failed to serialize config to JSON")?,
            Some("toml") => {
                toml::to_string_pretty(config).context("Failed to serialize config to TOML")?
            }
            _ => serde_yaml::to_string(config).context("Failed to serialize config to YAML")?,
        };

        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        info!("Configuration saved to: {}", path.display());
        Ok(())
    }

    /// Generate a sample configuration file
    pub fn generate_sample_config() -> String {
        serde_yaml::to_string(&NetvizConfig::default())
            .unwrap_or_else(|_| "# Failed to generate config".to_string())
    }
}

fn env_u32(name: &str) -> Option<u32> {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|&v| v > 0)
}

/// Parse a boolean value from string with various formats
fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn clear_env() {
        for var in [
            CONFIG_ENV,
            "NETVIZ_WIDTH",
            "NETVIZ_HEIGHT",
            "NETVIZ_VSYNC",
            "NETVIZ_LOG_LEVEL",
        ] {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_config_defaults() {
        let config = NetvizConfig::default();
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 600);
        assert!(config.window.vsync);
        assert_eq!(config.logging.level, LogLevel::Info);
        assert_eq!(config.logging.format, LogFormat::Text);
    }

    #[test]
    fn test_file_loading_all_formats() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = NetvizConfig::default();
        config.window.width = 1024;
        config.logging.level = LogLevel::Debug;
        config.logging.format = LogFormat::Json;

        for name in ["cfg.yaml", "cfg.json", "cfg.toml"] {
            let path = temp_dir.path().join(name);
            ConfigLoader::save_to_file(&config, &path).unwrap();
            let loaded = ConfigLoader::load_from_file(&path).unwrap();
            assert_eq!(loaded, config, "{name}");
        }
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("partial.yml");
        fs::write(&path, "window:\n  height: 900\n").unwrap();
        let loaded = ConfigLoader::load_from_file(&path).unwrap();
        assert_eq!(loaded.window.height, 900);
        assert_eq!(loaded.window.width, 800);
        assert_eq!(loaded.logging, LoggingConfig::default());
    }

    #[test]
    fn invalid_file_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        let err = ConfigLoader::load_from_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("broken.json"));
    }

    #[test]
    fn test_bool_parsing() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("Off"), Some(false));
        assert_eq!(parse_bool("invalid"), None);
    }

    #[test]
    #[serial]
    fn env_overrides_apply() {
        clear_env();
        env::set_var("NETVIZ_WIDTH", "1280");
        env::set_var("NETVIZ_HEIGHT", "zero");
        env::set_var("NETVIZ_VSYNC", "off");
        env::set_var("NETVIZ_LOG_LEVEL", "TRACE");

        let mut config = NetvizConfig::default();
        ConfigLoader::apply_environment_variables(&mut config);
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.window.height, 600);
        assert!(!config.window.vsync);
        assert_eq!(config.logging.level, LogLevel::Trace);
        clear_env();
    }

    #[test]
    #[serial]
    fn config_env_points_at_file() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("custom.toml");
        fs::write(&path, "[window]\nwidth = 640\n").unwrap();
        env::set_var(CONFIG_ENV, &path);

        assert_eq!(ConfigLoader::find_config_files()[0], path);
        let config = ConfigLoader::load().unwrap();
        assert_eq!(config.window.width, 640);
        clear_env();
    }

    #[test]
    #[serial]
    fn explicit_missing_file_is_an_error() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        assert!(ConfigLoader::load_explicit(&temp_dir.path().join("nope.yaml")).is_err());
    }
}
