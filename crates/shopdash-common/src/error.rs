//! Error types and utilities for shopdash

use thiserror::Error;

/// Result type alias for shopdash operations
pub type Result<T> = std::result::Result<T, ShopDashError>;

/// Main error type for shopdash operations
#[derive(Error, Debug)]
pub enum ShopDashError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A data source is missing or cannot be read as a table
    #[error("Data load error: {message}")]
    DataLoad {
        message: String,
        path: Option<String>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Network related errors (backdrop downloads)
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Graph generation and plotting errors
    #[error("Graph error: {message}")]
    Graph {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Locale and formatting errors
    #[error("Localization error: {message}")]
    Localization {
        message: String,
        locale: Option<String>,
    },

    /// Validation errors for user input or data
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },
}

impl ShopDashError {
    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new data load error
    pub fn data_load(msg: impl Into<String>) -> Self {
        Self::DataLoad {
            message: msg.into(),
            path: None,
            source: None,
        }
    }

    /// Create a new data load error for a specific file
    pub fn data_load_at(
        msg: impl Into<String>,
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::DataLoad {
            message: msg.into(),
            path: Some(path.into()),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new network error with source
    pub fn network_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Network {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new graph error
    pub fn graph(msg: impl Into<String>) -> Self {
        Self::Graph {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new graph error with source
    pub fn graph_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Graph {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new localization error for a locale tag
    pub fn localization(msg: impl Into<String>, locale: impl Into<String>) -> Self {
        Self::Localization {
            message: msg.into(),
            locale: Some(locale.into()),
        }
    }

    /// Create a new validation error with field name
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// Whether this error aborts a render (as opposed to a degraded result)
    pub fn is_data_load(&self) -> bool {
        matches!(self, Self::DataLoad { .. } | Self::Io(_))
    }
}

// Error conversion implementations for external types

/// Convert from csv::Error to ShopDashError
impl From<csv::Error> for ShopDashError {
    fn from(err: csv::Error) -> Self {
        let message = match err.position() {
            Some(pos) => format!("Malformed CSV near line {}", pos.line()),
            None => "Malformed CSV input".to_string(),
        };
        Self::DataLoad {
            message,
            path: None,
            source: Some(Box::new(err)),
        }
    }
}

/// Convert from reqwest::Error to ShopDashError
impl From<reqwest::Error> for ShopDashError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::network_with_source("Request timeout", err)
        } else if err.is_connect() {
            Self::network_with_source("Connection failed", err)
        } else if err.is_status() {
            let status_code = err.status().map(|s| s.as_u16()).unwrap_or(0);
            Self::network_with_source(format!("HTTP error: {}", status_code), err)
        } else {
            Self::network_with_source("Network request failed", err)
        }
    }
}

/// Convert from toml::de::Error to ShopDashError
impl From<toml::de::Error> for ShopDashError {
    fn from(err: toml::de::Error) -> Self {
        Self::config_with_source("TOML parsing error", err)
    }
}

/// Convert from serde_yaml::Error to ShopDashError
impl From<serde_yaml::Error> for ShopDashError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::config_with_source("YAML parsing error", err)
    }
}

#[cfg(feature = "plotters")]
/// Convert from plotters drawing errors to ShopDashError
impl<T> From<plotters::drawing::DrawingAreaErrorKind<T>> for ShopDashError
where
    T: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        Self::graph_with_source("Graph rendering failed", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{error::Error, io};

    #[test]
    fn test_error_creation() {
        let config_error = ShopDashError::config_with_source(
            "config issue",
            io::Error::new(io::ErrorKind::InvalidData, "bad yaml"),
        );
        assert!(config_error.to_string().contains("Configuration error"));
        assert!(config_error.to_string().contains("config issue"));

        let network_error = ShopDashError::network("empty response body");
        assert!(network_error.to_string().contains("empty response body"));
        assert!(!network_error.is_data_load());

        let load_error = ShopDashError::data_load("orders table missing");
        assert_eq!(load_error.to_string(), "Data load error: orders table missing");
        assert!(load_error.is_data_load());

        let validation_error = ShopDashError::validation_field("start after end", "filter.start_date");
        assert!(validation_error.to_string().contains("Validation error"));
        assert!(!validation_error.is_data_load());

        let locale_error = ShopDashError::localization("Unknown locale", "xx_YY");
        assert!(locale_error.to_string().contains("Localization error"));
    }

    #[test]
    fn test_data_load_at_keeps_path_and_source() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "No such file");
        let error = ShopDashError::data_load_at("Failed to open orders", "data/all_data.csv", io_error);

        match &error {
            ShopDashError::DataLoad { path, .. } => {
                assert_eq!(path.as_deref(), Some("data/all_data.csv"));
            }
            other => panic!("unexpected variant: {other:?}"),
        }
        assert!(error.source().is_some());
    }

    #[test]
    fn test_csv_error_conversion() {
        let data = "a,b\n1,2\n3\n";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let err = reader
            .records()
            .find_map(|r| r.err())
            .expect("ragged row should fail");

        let converted: ShopDashError = err.into();
        assert!(converted.is_data_load());
        assert!(converted.to_string().contains("Malformed CSV"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: ShopDashError = io_error.into();

        assert!(error.to_string().contains("I/O error"));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_serde_error_conversion() {
        let serde_error = serde_json::from_str::<serde_json::Value>(r#"{"invalid": json}"#).unwrap_err();
        let error: ShopDashError = serde_error.into();

        assert!(error.to_string().contains("Serialization error"));
    }

    #[test]
    fn test_error_chain_preservation() {
        let root_error = io::Error::new(io::ErrorKind::NotFound, "Root cause");
        let middle_error = ShopDashError::config_with_source("Middle layer", root_error);
        let top_error = ShopDashError::network_with_source("Top layer", middle_error);

        let mut current_error: &dyn std::error::Error = &top_error;
        let mut depth = 0;
        while let Some(source) = current_error.source() {
            current_error = source;
            depth += 1;
        }

        assert_eq!(depth, 2);
    }
}
