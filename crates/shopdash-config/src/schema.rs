//! Configuration schema definitions using serde.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shopdash_common::LoggingConfig;

/// Main configuration structure for shopdash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input tables.
    pub data: DataConfig,
    /// Delivery-date window.
    pub filter: FilterConfig,
    /// Currency display.
    pub currency: CurrencyConfig,
    /// Chart rendering.
    pub graphs: GraphsConfig,
    /// Map backdrop image.
    pub backdrop: BackdropConfig,
    /// Output locations.
    pub output: OutputConfig,
    /// Logging.
    pub logging: LoggingSettings,
}

/// Input table locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Denormalized orders CSV.
    pub orders_path: String,
    /// Geolocation CSV.
    pub geolocation_path: String,
}

/// Inclusive window on the customer delivery date. Unset bounds default to
/// the data span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// First included delivery date.
    pub start_date: Option<NaiveDate>,
    /// Last included delivery date.
    pub end_date: Option<NaiveDate>,
}

/// Currency display settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyConfig {
    /// ISO 4217 code.
    pub currency: String,
    /// Locale tag, `pt_BR` or `pt-BR`.
    pub locale: String,
}

/// Chart rendering settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphsConfig {
    /// Chart width in pixels.
    pub width: u32,
    /// Chart height in pixels.
    pub height: u32,
    /// Rows shown in top/bottom and leaderboard charts.
    pub top_n: usize,
    /// Per-chart switches.
    pub enabled: EnabledGraphsConfig,
    /// Palette.
    pub colors: ColorsConfig,
    /// Geographic extent of the map chart.
    pub map_extent: MapExtent,
}

/// Per-chart switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnabledGraphsConfig {
    /// Daily order count line chart.
    pub daily_orders: bool,
    /// Daily spend line chart.
    pub daily_spend: bool,
    /// Best and worst selling categories.
    pub categories: bool,
    /// Payment types.
    pub payment_types: bool,
    /// Review score distribution.
    pub review_scores: bool,
    /// Customers per state.
    pub customer_states: bool,
    /// Order statuses.
    pub order_status: bool,
    /// RFM leaderboards.
    pub rfm: bool,
    /// Customer geolocation map.
    pub geolocation: bool,
}

/// Palette, as `#RRGGBB`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    /// Leading bar, lines and map points.
    pub highlight: String,
    /// Remaining bars.
    pub muted: String,
    /// Order status bars.
    pub status: String,
    /// Chart background.
    pub background: String,
}

/// Geographic extent in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapExtent {
    /// Western bound (longitude).
    pub min_lng: f64,
    /// Eastern bound (longitude).
    pub max_lng: f64,
    /// Southern bound (latitude).
    pub min_lat: f64,
    /// Northern bound (latitude).
    pub max_lat: f64,
}

/// Map backdrop source. A path takes precedence over a URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackdropConfig {
    /// Remote image URL.
    pub url: Option<String>,
    /// Local image file.
    pub path: Option<String>,
    /// Download timeout.
    pub timeout_seconds: u64,
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for charts and the JSON export.
    pub directory: String,
    /// Write the dashboard JSON export.
    pub export_json: bool,
    /// File name of the JSON export.
    pub json_file_name: String,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Level filter directive.
    pub level: String,
    /// JSON lines output.
    pub json: bool,
    /// Optional log file.
    pub file: Option<String>,
    /// Log span open/close events.
    pub include_spans: bool,
}

impl LoggingSettings {
    /// Convert to the subscriber configuration.
    pub fn to_logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.level.clone(),
            json_format: self.json,
            pretty_format: !self.json && self.file.is_none(),
            file_path: self.file.clone(),
            include_spans: self.include_spans,
            ..LoggingConfig::default()
        }
    }
}

impl Config {
    /// Whether any chart is enabled.
    pub fn any_graph_enabled(&self) -> bool {
        let e = &self.graphs.enabled;
        e.daily_orders
            || e.daily_spend
            || e.categories
            || e.payment_types
            || e.review_scores
            || e.customer_states
            || e.order_status
            || e.rfm
            || e.geolocation
    }
}
