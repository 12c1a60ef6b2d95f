//! Integration tests for the shopdash binary crate.
//!
//! Each test writes the fixture CSVs to a temporary directory and drives a
//! full run with chart rendering disabled.

use shopdash::App;
use shopdash_common::test_utils::csv_fixtures::{geolocation_csv, orders_csv, sample_orders};
use shopdash_common::test_utils::init_test_logging;
use shopdash_config::{Config, EnabledGraphsConfig};
use std::path::Path;

fn disabled_graphs() -> EnabledGraphsConfig {
    EnabledGraphsConfig {
        daily_orders: false,
        daily_spend: false,
        categories: false,
        payment_types: false,
        review_scores: false,
        customer_states: false,
        order_status: false,
        rfm: false,
        geolocation: false,
    }
}

fn config_in(dir: &Path) -> Config {
    let orders = dir.join("orders.csv");
    let geo = dir.join("geolocation.csv");
    std::fs::write(&orders, orders_csv(&sample_orders())).unwrap();
    std::fs::write(
        &geo,
        geolocation_csv(&[("u1", -23.5, -46.6), ("u1", -23.6, -46.7), ("u2", -22.9, -43.2)]),
    )
    .unwrap();

    let mut config = Config::default();
    config.data.orders_path = orders.display().to_string();
    config.data.geolocation_path = geo.display().to_string();
    config.output.directory = dir.join("out").display().to_string();
    config.graphs.enabled = disabled_graphs();
    config
}

#[tokio::test]
async fn test_run_exports_dashboard_json() {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let app = App::new(config_in(dir.path())).unwrap();

    let report = app.run().await.unwrap();
    assert_eq!(report.rows, 4);
    assert!(report.charts.is_empty());

    let path = report.export_path.unwrap();
    assert_eq!(path, dir.path().join("out").join("dashboard.json"));
    let json: serde_json::Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(json["window"]["start"], "2018-01-05");
    assert_eq!(json["window"]["end"], "2018-01-08");
    assert_eq!(json["summary"]["total_orders"], 3);
    assert_eq!(json["geolocation"]["customers"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_headlines_use_configured_currency() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_in(dir.path());
    config.output.export_json = false;
    let app = App::new(config).unwrap();

    let report = app.run().await.unwrap();
    assert!(report.export_path.is_none());
    let value = |label: &str| {
        report
            .headlines
            .iter()
            .find(|h| h.label == label)
            .map(|h| h.value.clone())
            .unwrap()
    };
    assert_eq!(value("Total Order"), "3");
    assert_eq!(value("Total Revenue"), "R$\u{a0}160,00");
    assert_eq!(value("Best Category Products"), "health_beauty");
    assert_eq!(value("Most Common Payment Types"), "credit_card");
    assert_eq!(value("Most Common State"), "SP");
}

#[tokio::test]
async fn test_renders_enabled_map() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_in(dir.path());
    config.graphs.enabled.geolocation = true;
    config.graphs.height = 120;
    let app = App::new(config).unwrap();

    let report = app.run().await.unwrap();
    assert_eq!(report.charts.len(), 1);
    assert!(report.charts[0].path.ends_with("geolocation.png"));
    assert!(report.charts[0].path.is_file());
}

#[test]
fn test_missing_orders_file_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_in(dir.path());
    config.data.orders_path = dir.path().join("missing.csv").display().to_string();

    let err = App::new(config).err().unwrap();
    assert!(err.is_data_load());
}

#[test]
fn test_reload_keeps_snapshot_on_failure() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let orders = config.data.orders_path.clone();
    let app = App::new(config).unwrap();

    std::fs::remove_file(&orders).unwrap();
    assert!(app.reload().is_err());
    assert_eq!(app.build_dashboard().unwrap().order_rows, 4);
}

#[tokio::test]
async fn test_unusable_backdrop_does_not_abort_run() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_in(dir.path());
    config.graphs.enabled.geolocation = true;
    config.graphs.height = 120;
    config.backdrop.url = Some("not a url".to_string());
    let app = App::new(config).unwrap();

    let report = app.run().await.unwrap();
    assert_eq!(report.charts.len(), 1);
    assert!(report.export_path.unwrap().is_file());
}
