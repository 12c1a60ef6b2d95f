//! Runtime validation of a loaded configuration.

use crate::schema::Config;
use once_cell::sync::Lazy;
use regex::Regex;
use shopdash_common::{Result, ShopDashError};
use shopdash_i18n::{Currency, Locale};
use std::fmt;

/// Regex pattern for validating hex color codes (e.g., #FFFFFF, #90CAF9)
pub static HEX_COLOR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("Invalid hex color regex pattern"));

/// Accepted chart edge lengths in pixels.
pub const CHART_SIZE_RANGE: std::ops::RangeInclusive<u32> = 200..=4000;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// One failed check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Dotted path of the offending field
    pub field: String,
    /// What is wrong
    pub message: String,
}

impl ValidationIssue {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a hex color code.
pub fn validate_hex_color(color: &str) -> std::result::Result<(), String> {
    if HEX_COLOR_REGEX.is_match(color) {
        Ok(())
    } else {
        Err(format!("'{color}' is not a #RRGGBB color"))
    }
}

/// Validate file path (basic check for valid path characters)
pub fn validate_file_path(path: &str) -> std::result::Result<(), String> {
    if path.trim().is_empty() {
        return Err("path cannot be empty".to_string());
    }

    let invalid_chars = ['<', '>', '"', '|', '?', '*'];
    if path.chars().any(|c| invalid_chars.contains(&c)) {
        return Err(format!("'{path}' contains invalid characters"));
    }

    Ok(())
}

/// Validate a tracing filter directive such as `info` or `info,shopdash_data=debug`.
pub fn validate_log_level(level: &str) -> std::result::Result<(), String> {
    if level.trim().is_empty() {
        return Err("log level cannot be empty".to_string());
    }

    for directive in level.split(',') {
        let level_part = directive
            .rsplit_once('=')
            .map_or(directive, |(_, lvl)| lvl)
            .trim()
            .to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level_part.as_str()) {
            return Err(format!("unknown log level '{}'", directive.trim()));
        }
    }
    Ok(())
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Collect every failed check.
    pub fn issues(config: &Config) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        let mut check = |field: &str, result: std::result::Result<(), String>| {
            if let Err(message) = result {
                issues.push(ValidationIssue::new(field, message));
            }
        };

        check("data.orders_path", validate_file_path(&config.data.orders_path));
        check(
            "data.geolocation_path",
            validate_file_path(&config.data.geolocation_path),
        );

        if let (Some(start), Some(end)) = (config.filter.start_date, config.filter.end_date) {
            if start > end {
                check(
                    "filter.start_date",
                    Err(format!("start date {start} is after end date {end}")),
                );
            }
        }

        check(
            "currency.currency",
            Currency::parse(&config.currency.currency)
                .map(|_| ())
                .map_err(|e| e.to_string()),
        );
        check(
            "currency.locale",
            Locale::parse(&config.currency.locale)
                .map(|_| ())
                .map_err(|e| e.to_string()),
        );

        let graphs = &config.graphs;
        for (field, size) in [("graphs.width", graphs.width), ("graphs.height", graphs.height)] {
            if !CHART_SIZE_RANGE.contains(&size) {
                check(
                    field,
                    Err(format!(
                        "{size} is outside {}..={}",
                        CHART_SIZE_RANGE.start(),
                        CHART_SIZE_RANGE.end()
                    )),
                );
            }
        }
        if graphs.top_n == 0 {
            check("graphs.top_n", Err("must be at least 1".to_string()));
        }

        check("graphs.colors.highlight", validate_hex_color(&graphs.colors.highlight));
        check("graphs.colors.muted", validate_hex_color(&graphs.colors.muted));
        check("graphs.colors.status", validate_hex_color(&graphs.colors.status));
        check("graphs.colors.background", validate_hex_color(&graphs.colors.background));

        let extent = &graphs.map_extent;
        if !(extent.min_lng < extent.max_lng && extent.min_lat < extent.max_lat) {
            check(
                "graphs.map_extent",
                Err("minimum bounds must be below maximum bounds".to_string()),
            );
        }

        if let Some(url) = &config.backdrop.url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                check("backdrop.url", Err(format!("'{url}' is not an http(s) URL")));
            }
        }
        if let Some(path) = &config.backdrop.path {
            check("backdrop.path", validate_file_path(path));
        }
        if config.backdrop.timeout_seconds == 0 {
            check("backdrop.timeout_seconds", Err("must be positive".to_string()));
        }

        check("output.directory", validate_file_path(&config.output.directory));
        check(
            "output.json_file_name",
            validate_file_path(&config.output.json_file_name),
        );

        check("logging.level", validate_log_level(&config.logging.level));
        if let Some(file) = &config.logging.file {
            check("logging.file", validate_file_path(file));
        }

        issues
    }

    /// Validates a configuration, reporting every issue at once.
    pub fn validate(config: &Config) -> Result<()> {
        let issues = Self::issues(config);
        match issues.first() {
            None => Ok(()),
            Some(first) => {
                let message = issues
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; ");
                Err(ShopDashError::validation_field(message, first.field.clone()))
            }
        }
    }
}

impl Config {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        ConfigValidator::validate(self)
    }
}
