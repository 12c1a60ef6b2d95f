//! Integration tests for shopdash-data: file loading, filtering and reloads.

use shopdash_common::test_utils::csv_fixtures::{geolocation_csv, orders_csv, sample_orders, OrderRow};
use shopdash_common::test_utils::{create_temp_dir, init_test_logging, mock_date};
use shopdash_data::{DataContext, DataSources, DataStore, DateWindow};
use std::fs;
use std::sync::Arc;

fn write_sources(dir: &std::path::Path, orders: &str, geo: &str) -> DataSources {
    let sources = DataSources::new(dir.join("all_data.csv"), dir.join("geolocation.csv"));
    fs::write(&sources.orders_path, orders).unwrap();
    fs::write(&sources.geolocation_path, geo).unwrap();
    sources
}

#[test]
fn test_load_sample_context() {
    init_test_logging();
    let dir = create_temp_dir();
    let sources = write_sources(
        dir.path(),
        &orders_csv(&sample_orders()),
        &geolocation_csv(&[("u1", -23.5, -46.6), ("u2", -22.9, -43.2)]),
    );

    let context = DataContext::load(&sources).unwrap();
    assert_eq!(context.orders().len(), 5);
    assert_eq!(context.geolocation().len(), 2);
    assert_eq!(context.warning_count(), 1);
    assert_eq!(context.orders().warnings()[0].value, "not-a-date");

    assert_eq!(
        context.orders().delivered_span(),
        Some((mock_date(2018, 1, 5), mock_date(2018, 1, 8)))
    );
}

#[test]
fn test_default_window_keeps_every_delivered_row() {
    let dir = create_temp_dir();
    let sources = write_sources(dir.path(), &orders_csv(&sample_orders()), &geolocation_csv(&[]));
    let context = DataContext::load(&sources).unwrap();

    let window = DateWindow::resolve(None, None, context.orders().delivered_span())
        .unwrap()
        .unwrap();
    let filtered = context.filtered_orders(Some(&window));

    // o4 was never delivered.
    assert_eq!(filtered.len(), 4);
    assert!(filtered.records().iter().all(|r| r.order_id != "o4"));
}

#[test]
fn test_single_day_window_without_matches() {
    let dir = create_temp_dir();
    let sources = write_sources(dir.path(), &orders_csv(&sample_orders()), &geolocation_csv(&[]));
    let context = DataContext::load(&sources).unwrap();

    let window = DateWindow::single_day(mock_date(2018, 1, 4));
    assert!(context.filtered_orders(Some(&window)).is_empty());
}

#[test]
fn test_reload_publishes_new_snapshot_and_keeps_old_on_failure() {
    init_test_logging();
    let dir = create_temp_dir();
    let sources = write_sources(
        dir.path(),
        &orders_csv(&[OrderRow::new("o1", "c1")]),
        &geolocation_csv(&[]),
    );

    let store = DataStore::open(sources.clone()).unwrap();
    let first = store.snapshot();
    assert_eq!(first.orders().len(), 1);

    fs::write(&sources.orders_path, orders_csv(&sample_orders())).unwrap();
    let second = store.reload().unwrap();
    assert_eq!(second.orders().len(), 5);
    assert_eq!(first.orders().len(), 1);
    assert!(Arc::ptr_eq(&second, &store.snapshot()));

    fs::remove_file(&sources.geolocation_path).unwrap();
    let err = store.reload().unwrap_err();
    assert!(err.is_data_load());
    assert!(Arc::ptr_eq(&second, &store.snapshot()));
}

#[test]
fn test_missing_source_aborts_open() {
    let dir = create_temp_dir();
    let sources = DataSources::new(dir.path().join("nope.csv"), dir.path().join("nope2.csv"));
    assert!(DataStore::open(sources).is_err());
}

mod properties {
    use proptest::prelude::*;
    use shopdash_common::test_utils::mock_date;
    use shopdash_common::Timestamp;
    use shopdash_data::{DateWindow, OrderRecord, OrderTable};

    fn record(id: usize, day: Option<u32>) -> OrderRecord {
        let mut record = OrderRecord::new(format!("o{id}"), "c");
        if let Some(day) = day {
            record.order_delivered_customer_date =
                Timestamp::At(mock_date(2018, 3, day).and_hms_opt(23, 59, 0).unwrap());
        }
        record
    }

    proptest! {
        #[test]
        fn filter_keeps_exactly_rows_inside_window(
            days in prop::collection::vec(prop::option::of(1u32..=28), 0..40),
            a in 1u32..=28,
            b in 1u32..=28,
        ) {
            let table = OrderTable::new(
                days.iter().enumerate().map(|(i, d)| record(i, *d)).collect(),
            );
            let window = DateWindow::new(mock_date(2018, 3, a.min(b)), mock_date(2018, 3, a.max(b))).unwrap();

            let filtered = table.filter_by_delivery(&window);
            let expected = days
                .iter()
                .filter(|d| d.is_some_and(|d| a.min(b) <= d && d <= a.max(b)))
                .count();
            prop_assert_eq!(filtered.len(), expected);
            prop_assert!(filtered
                .records()
                .iter()
                .all(|r| r.delivered_date().is_some_and(|d| window.contains(d))));
        }
    }
}
