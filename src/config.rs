//! Configuration module for sapdm
//!
//! Handles loading and merging configuration from multiple sources:
//! - Default values
//! - System configuration (/etc/sapdm/sapdm.toml)
//! - User configuration (~/.sapdm.toml, ~/.config/sapdm/config.toml)
//! - Project configuration (./sapdm.toml)
//! - Environment variables
//! - Command-line arguments

use crate::context::BoolCoercion;
use crate::manifest::{OutputFormat, TemplateOptions};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default settings
    pub defaults: Defaults,

    /// Template settings that are not deployment properties
    pub template: TemplateOptions,

    /// Logging settings
    pub logging: LoggingConfig,

    /// Colors and output settings
    pub colors: ColorsConfig,
}

/// Default configuration values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Manifest output format
    pub output_format: OutputFormat,

    /// How flag properties are interpreted
    pub bool_coercion: BoolCoercion,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level used when neither `-v` nor `RUST_LOG` is given
    pub log_level: String,

    /// Log format: text or json
    pub log_format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            log_format: "text".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}

/// Colors configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    /// Enable colors
    pub enabled: bool,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// A configuration file as written: only the keys it sets are `Some`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    defaults: DefaultsFile,
    template: TemplateFile,
    logging: LoggingFile,
    colors: ColorsFile,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DefaultsFile {
    output_format: Option<OutputFormat>,
    bool_coercion: Option<BoolCoercion>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TemplateFile {
    startup_script_url: Option<String>,
    boot_disk_size_gb: Option<String>,
    min_cpu_platform: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LoggingFile {
    log_level: Option<String>,
    log_format: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ColorsFile {
    enabled: Option<bool>,
}

impl Config {
    /// Load configuration from all sources
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        let mut config = Config::default();

        for path in Self::get_config_paths(config_path) {
            if path.exists() {
                tracing::debug!(path = %path.display(), "merging configuration file");
                config = config.merge_from_file(&path)?;
            }
        }

        config.apply_env_overrides()?;

        Ok(config)
    }

    /// Get the list of configuration file paths to check
    fn get_config_paths(explicit_path: Option<&PathBuf>) -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // Explicit path takes priority
        if let Some(path) = explicit_path {
            paths.push(path.clone());
            return paths;
        }

        paths.push(PathBuf::from("/etc/sapdm/sapdm.toml"));

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".sapdm.toml"));
        }
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("sapdm/config.toml"));
        }

        paths.push(PathBuf::from("sapdm.toml"));

        if let Ok(env_config) = std::env::var("SAPDM_CONFIG") {
            paths.insert(0, PathBuf::from(env_config));
        }

        paths
    }

    /// Merge configuration from a file
    fn merge_from_file(&self, path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let file_config: ConfigFile = match extension {
            "yml" | "yaml" => serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?,
            "json" => serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?,
            "toml" => toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?,
            _ => toml::from_str(&content)
                .or_else(|_| serde_yaml::from_str(&content))
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?,
        };

        Ok(self.merge(file_config))
    }

    /// Overlay a configuration file on this configuration.
    ///
    /// Every key the file sets wins, including one that restores a default
    /// an earlier file changed. Keys the file omits keep their current value.
    fn merge(&self, file: ConfigFile) -> Config {
        Config {
            defaults: Defaults {
                output_format: file
                    .defaults
                    .output_format
                    .unwrap_or(self.defaults.output_format),
                bool_coercion: file
                    .defaults
                    .bool_coercion
                    .unwrap_or(self.defaults.bool_coercion),
            },
            template: TemplateOptions {
                startup_script_url: file
                    .template
                    .startup_script_url
                    .unwrap_or_else(|| self.template.startup_script_url.clone()),
                boot_disk_size_gb: file
                    .template
                    .boot_disk_size_gb
                    .unwrap_or_else(|| self.template.boot_disk_size_gb.clone()),
                min_cpu_platform: file
                    .template
                    .min_cpu_platform
                    .unwrap_or_else(|| self.template.min_cpu_platform.clone()),
            },
            logging: LoggingConfig {
                log_level: file
                    .logging
                    .log_level
                    .unwrap_or_else(|| self.logging.log_level.clone()),
                log_format: file
                    .logging
                    .log_format
                    .unwrap_or_else(|| self.logging.log_format.clone()),
            },
            colors: ColorsConfig {
                enabled: file.colors.enabled.unwrap_or(self.colors.enabled),
            },
        }
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(format) = std::env::var("SAPDM_OUTPUT_FORMAT") {
            self.defaults.output_format = format.parse()?;
        }

        if let Ok(coercion) = std::env::var("SAPDM_BOOL_COERCION") {
            self.defaults.bool_coercion = coercion.parse()?;
        }

        if let Ok(url) = std::env::var("SAPDM_STARTUP_SCRIPT_URL") {
            self.template.startup_script_url = url;
        }

        if let Ok(level) = std::env::var("SAPDM_LOG_LEVEL") {
            self.logging.log_level = level;
        }

        if let Ok(format) = std::env::var("SAPDM_LOG_FORMAT") {
            self.logging.log_format = format;
        }

        // NO_COLOR
        if std::env::var("NO_COLOR").is_ok() || std::env::var("SAPDM_NO_COLOR").is_ok() {
            self.colors.enabled = false;
        }

        Ok(())
    }

    /// Load from a specific file, without environment overrides
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Config::default().merge_from_file(path.as_ref())
    }
}
