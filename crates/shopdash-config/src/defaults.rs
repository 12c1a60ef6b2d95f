//! Default values for every configuration section.

use crate::schema::*;

/// Default orders table location.
pub const DEFAULT_ORDERS_PATH: &str = "data/all_data.csv";
/// Default geolocation table location.
pub const DEFAULT_GEOLOCATION_PATH: &str = "data/geolocation.csv";
/// Default highlight colour.
pub const DEFAULT_HIGHLIGHT_COLOR: &str = "#90CAF9";
/// Default muted colour.
pub const DEFAULT_MUTED_COLOR: &str = "#D3D3D3";

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            filter: FilterConfig::default(),
            currency: CurrencyConfig::default(),
            graphs: GraphsConfig::default(),
            backdrop: BackdropConfig::default(),
            output: OutputConfig::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            orders_path: DEFAULT_ORDERS_PATH.to_string(),
            geolocation_path: DEFAULT_GEOLOCATION_PATH.to_string(),
        }
    }
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            currency: "BRL".to_string(),
            locale: "pt_BR".to_string(),
        }
    }
}

impl Default for GraphsConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 600,
            top_n: 5,
            enabled: EnabledGraphsConfig::default(),
            colors: ColorsConfig::default(),
            map_extent: MapExtent::default(),
        }
    }
}

impl Default for EnabledGraphsConfig {
    fn default() -> Self {
        Self {
            daily_orders: true,
            daily_spend: true,
            categories: true,
            payment_types: true,
            review_scores: true,
            customer_states: true,
            order_status: true,
            rfm: true,
            geolocation: true,
        }
    }
}

impl Default for ColorsConfig {
    fn default() -> Self {
        Self {
            highlight: DEFAULT_HIGHLIGHT_COLOR.to_string(),
            muted: DEFAULT_MUTED_COLOR.to_string(),
            status: "#87CEEB".to_string(),
            background: "#FFFFFF".to_string(),
        }
    }
}

impl Default for MapExtent {
    fn default() -> Self {
        Self {
            min_lng: -73.982_830_55,
            max_lng: -33.8,
            min_lat: -33.751_169_44,
            max_lat: 5.4,
        }
    }
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            url: None,
            path: None,
            timeout_seconds: 30,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: "output".to_string(),
            export_json: true,
            json_file_name: "dashboard.json".to_string(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
            include_spans: false,
        }
    }
}
