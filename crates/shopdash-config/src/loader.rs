//! Configuration loading: file, then environment overrides, then validation.

use crate::schema::Config;
use chrono::NaiveDate;
use shopdash_common::{Result as ShopDashResult, ShopDashError};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Variable naming an explicit configuration file.
pub const ENV_CONFIG_PATH: &str = "SHOPDASH_CONFIG_PATH";
/// Orders table path override.
pub const ENV_ORDERS_PATH: &str = "SHOPDASH_ORDERS_PATH";
/// Geolocation table path override.
pub const ENV_GEOLOCATION_PATH: &str = "SHOPDASH_GEOLOCATION_PATH";
/// Window start override (`YYYY-MM-DD`).
pub const ENV_START_DATE: &str = "SHOPDASH_START_DATE";
/// Window end override (`YYYY-MM-DD`).
pub const ENV_END_DATE: &str = "SHOPDASH_END_DATE";
/// Currency code override.
pub const ENV_CURRENCY: &str = "SHOPDASH_CURRENCY";
/// Locale override.
pub const ENV_LOCALE: &str = "SHOPDASH_LOCALE";
/// Output directory override.
pub const ENV_OUTPUT_DIR: &str = "SHOPDASH_OUTPUT_DIR";
/// Backdrop URL override.
pub const ENV_BACKDROP_URL: &str = "SHOPDASH_BACKDROP_URL";
/// Backdrop file override.
pub const ENV_BACKDROP_PATH: &str = "SHOPDASH_BACKDROP_PATH";
/// Log level override.
pub const ENV_LOG_LEVEL: &str = "SHOPDASH_LOG_LEVEL";

/// Files searched in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILES: &[&str] = &["shopdash.yaml", "shopdash.yml", "shopdash.toml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// File extension is neither YAML nor TOML
    #[error("Unsupported configuration format: '{0}'")]
    UnsupportedFormat(String),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParse {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    Validation(#[source] ShopDashError),
}

impl From<ConfigError> for ShopDashError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation(inner) => inner,
            other => ShopDashError::config_with_source(other.to_string(), other),
        }
    }
}

/// Serialization format of a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.yaml` / `.yml`
    Yaml,
    /// `.toml`
    Toml,
}

impl ConfigFormat {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "toml" => Ok(Self::Toml),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Parse configuration text. Missing sections take their defaults.
    pub fn parse_str(contents: &str, format: ConfigFormat) -> Result<Config, ConfigError> {
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(match format {
            ConfigFormat::Yaml => serde_yaml::from_str(contents)?,
            ConfigFormat::Toml => toml::from_str(contents)?,
        })
    }

    /// Load configuration from a file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::parse_str(&content, format)?;
        Self::apply_env_overrides(&mut config)?;
        config.validate().map_err(ConfigError::Validation)?;

        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load configuration using the lookup order: `SHOPDASH_CONFIG_PATH`,
    /// then `shopdash.yaml`, `shopdash.yml`, `shopdash.toml`, then defaults.
    pub fn load() -> ShopDashResult<Config> {
        if let Ok(config_path) = env::var(ENV_CONFIG_PATH) {
            return Ok(Self::load_config(config_path)?);
        }

        if let Some(found) = DEFAULT_CONFIG_FILES.iter().find(|f| Path::new(f).exists()) {
            return Ok(Self::load_config(found)?);
        }

        debug!("No configuration file found, using defaults");
        let mut config = Config::default();
        Self::apply_env_overrides(&mut config)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> ShopDashResult<Config> {
        Ok(Self::load_config(path)?)
    }

    /// Apply `SHOPDASH_*` environment variable overrides
    pub fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        Self::apply_overrides(config, |var| env::var(var).ok())
    }

    /// Apply overrides from an arbitrary variable source.
    pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_ORDERS_PATH) {
            config.data.orders_path = path;
        }

        if let Some(path) = lookup(ENV_GEOLOCATION_PATH) {
            config.data.geolocation_path = path;
        }

        if let Some(start) = lookup(ENV_START_DATE) {
            config.filter.start_date = Some(parse_env_date(ENV_START_DATE, &start)?);
        }

        if let Some(end) = lookup(ENV_END_DATE) {
            config.filter.end_date = Some(parse_env_date(ENV_END_DATE, &end)?);
        }

        if let Some(currency) = lookup(ENV_CURRENCY) {
            config.currency.currency = currency;
        }

        if let Some(locale) = lookup(ENV_LOCALE) {
            config.currency.locale = locale;
        }

        if let Some(dir) = lookup(ENV_OUTPUT_DIR) {
            config.output.directory = dir;
        }

        if let Some(url) = lookup(ENV_BACKDROP_URL) {
            config.backdrop.url = Some(url).filter(|u| !u.is_empty());
        }

        if let Some(path) = lookup(ENV_BACKDROP_PATH) {
            config.backdrop.path = Some(path).filter(|p| !p.is_empty());
        }

        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            config.logging.level = level;
        }

        Ok(())
    }
}

fn parse_env_date(var: &str, value: &str) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| ConfigError::EnvParse {
        var: var.to_string(),
        source: Box::new(e),
    })
}
