//! CSV loaders for the orders and geolocation tables.
//!
//! Both tables need a header row; extra columns (such as a leading index
//! column) are ignored. Structural problems abort the load, while cells that
//! cannot be coerced to their column type become missing values and are
//! reported as [`ParseWarning`]s.

use crate::records::{GeoRecord, GeoTable, OrderRecord, OrderTable};
use serde::Deserialize;
use shopdash_common::{
    non_empty, parse_optional_f64, ParseWarning, Result, ShopDashError, Timestamp,
};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Columns the orders table must provide.
pub const ORDER_COLUMNS: &[&str] = &[
    "order_id",
    "customer_id",
    "product_id",
    "product_category_name_english",
    "payment_type",
    "payment_value",
    "price",
    "review_score",
    "order_status",
    "customer_state",
    "order_approved_at",
    "order_purchase_timestamp",
    "order_delivered_carrier_date",
    "order_delivered_customer_date",
];

/// Columns the geolocation table must provide.
pub const GEO_COLUMNS: &[&str] = &["customer_unique_id", "geolocation_lat", "geolocation_lng"];

#[derive(Debug, Deserialize)]
struct RawOrderRow {
    order_id: Option<String>,
    customer_id: Option<String>,
    product_id: Option<String>,
    product_category_name_english: Option<String>,
    payment_type: Option<String>,
    payment_value: Option<String>,
    price: Option<String>,
    review_score: Option<String>,
    order_status: Option<String>,
    customer_state: Option<String>,
    order_approved_at: Option<String>,
    order_purchase_timestamp: Option<String>,
    order_delivered_carrier_date: Option<String>,
    order_delivered_customer_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawGeoRow {
    customer_unique_id: Option<String>,
    geolocation_lat: Option<String>,
    geolocation_lng: Option<String>,
}

/// Collects coercion failures for one table.
#[derive(Debug, Default)]
struct CellCoercer {
    warnings: Vec<ParseWarning>,
}

impl CellCoercer {
    fn record(&mut self, line: u64, column: &str, value: &str) {
        debug!(line, column, value, "Coercing malformed cell to missing");
        self.warnings.push(ParseWarning::new(line, column, value));
    }

    fn text(raw: Option<String>) -> Option<String> {
        non_empty(raw.as_deref())
    }

    fn identifier(&mut self, line: u64, column: &str, raw: Option<String>) -> Option<String> {
        let value = Self::text(raw);
        if value.is_none() {
            self.record(line, column, "");
        }
        value
    }

    fn timestamp(&mut self, line: u64, column: &str, raw: Option<String>) -> Timestamp {
        let raw = raw.unwrap_or_default();
        Timestamp::parse_cell(&raw).unwrap_or_else(|bad| {
            self.record(line, column, &bad.0);
            Timestamp::Missing
        })
    }

    fn number(&mut self, line: u64, column: &str, raw: Option<String>) -> Option<f64> {
        let raw = raw.unwrap_or_default();
        parse_optional_f64(&raw).unwrap_or_else(|bad| {
            self.record(line, column, &bad.0);
            None
        })
    }

    /// Discrete score: integral values in `0..=255`; anything else is absent.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn score(&mut self, line: u64, column: &str, raw: Option<String>) -> Option<u8> {
        let value = self.number(line, column, raw.clone())?;
        let integral = value.fract() == 0.0 && (0.0..=f64::from(u8::MAX)).contains(&value);
        if integral {
            Some(value as u8)
        } else {
            self.record(line, column, raw.as_deref().unwrap_or_default().trim());
            None
        }
    }

    fn finish(self, table: &str) -> Vec<ParseWarning> {
        let mut per_column: BTreeMap<&str, usize> = BTreeMap::new();
        for warning in &self.warnings {
            *per_column.entry(warning.column.as_str()).or_default() += 1;
        }
        for (column, count) in per_column {
            warn!(table, column, count, "Malformed cells coerced to missing");
        }
        self.warnings
    }
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .trim(csv::Trim::All)
        .from_reader(reader)
}

fn check_columns(headers: &csv::StringRecord, required: &[&str], table: &str) -> Result<()> {
    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|column| !headers.iter().any(|h| h == *column))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ShopDashError::data_load(format!(
            "{table} table is missing required column(s): {}",
            missing.join(", ")
        )))
    }
}

fn attach_path(err: ShopDashError, path: &Path) -> ShopDashError {
    match err {
        ShopDashError::DataLoad {
            message,
            path: None,
            source,
        } => ShopDashError::DataLoad {
            message,
            path: Some(path.display().to_string()),
            source,
        },
        other => other,
    }
}

fn open(path: &Path, table: &str) -> Result<File> {
    File::open(path).map_err(|e| {
        ShopDashError::data_load_at(
            format!("Failed to open {table} table"),
            path.display().to_string(),
            e,
        )
    })
}

/// Load the orders table from any byte stream.
pub fn load_orders<R: Read>(reader: R) -> Result<OrderTable> {
    let mut csv = csv_reader(reader);
    let headers = csv.headers()?.clone();
    check_columns(&headers, ORDER_COLUMNS, "orders")?;

    let mut coercer = CellCoercer::default();
    let mut records = Vec::new();

    for result in csv.records() {
        let row = result?;
        let line = row.position().map_or(0, csv::Position::line);
        let raw: RawOrderRow = row.deserialize(Some(&headers))?;

        let order_id = coercer.identifier(line, "order_id", raw.order_id);
        let customer_id = coercer.identifier(line, "customer_id", raw.customer_id);
        let (Some(order_id), Some(customer_id)) = (order_id, customer_id) else {
            continue;
        };

        records.push(OrderRecord {
            order_id,
            customer_id,
            product_id: CellCoercer::text(raw.product_id),
            product_category_name_english: CellCoercer::text(raw.product_category_name_english),
            payment_type: CellCoercer::text(raw.payment_type),
            payment_value: coercer.number(line, "payment_value", raw.payment_value),
            price: coercer.number(line, "price", raw.price),
            review_score: coercer.score(line, "review_score", raw.review_score),
            order_status: CellCoercer::text(raw.order_status),
            customer_state: CellCoercer::text(raw.customer_state),
            order_approved_at: coercer.timestamp(line, "order_approved_at", raw.order_approved_at),
            order_purchase_timestamp: coercer.timestamp(
                line,
                "order_purchase_timestamp",
                raw.order_purchase_timestamp,
            ),
            order_delivered_carrier_date: coercer.timestamp(
                line,
                "order_delivered_carrier_date",
                raw.order_delivered_carrier_date,
            ),
            order_delivered_customer_date: coercer.timestamp(
                line,
                "order_delivered_customer_date",
                raw.order_delivered_customer_date,
            ),
        });
    }

    let warnings = coercer.finish("orders");
    info!(rows = records.len(), warnings = warnings.len(), "Loaded orders table");
    Ok(OrderTable::with_warnings(records, warnings))
}

/// Load the orders table from a CSV file.
#[instrument]
pub fn load_orders_file(path: &Path) -> Result<OrderTable> {
    let file = open(path, "orders")?;
    load_orders(file).map_err(|e| attach_path(e, path))
}

/// Load the geolocation table from any byte stream.
pub fn load_geolocation<R: Read>(reader: R) -> Result<GeoTable> {
    let mut csv = csv_reader(reader);
    let headers = csv.headers()?.clone();
    check_columns(&headers, GEO_COLUMNS, "geolocation")?;

    let mut coercer = CellCoercer::default();
    let mut records = Vec::new();

    for result in csv.records() {
        let row = result?;
        let line = row.position().map_or(0, csv::Position::line);
        let raw: RawGeoRow = row.deserialize(Some(&headers))?;

        let Some(customer_unique_id) =
            coercer.identifier(line, "customer_unique_id", raw.customer_unique_id)
        else {
            continue;
        };

        records.push(GeoRecord {
            customer_unique_id,
            geolocation_lat: coercer.number(line, "geolocation_lat", raw.geolocation_lat),
            geolocation_lng: coercer.number(line, "geolocation_lng", raw.geolocation_lng),
        });
    }

    let warnings = coercer.finish("geolocation");
    info!(rows = records.len(), warnings = warnings.len(), "Loaded geolocation table");
    Ok(GeoTable::with_warnings(records, warnings))
}

/// Load the geolocation table from a CSV file.
#[instrument]
pub fn load_geolocation_file(path: &Path) -> Result<GeoTable> {
    let file = open(path, "geolocation")?;
    load_geolocation(file).map_err(|e| attach_path(e, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopdash_common::test_utils::csv_fixtures::{geolocation_csv, orders_csv, OrderRow};
    use shopdash_common::test_utils::mock_timestamp;

    #[test]
    fn test_load_typed_row() {
        let csv = orders_csv(&[OrderRow::new("o1", "c1")
            .product("p1", "toys")
            .payment("credit_card", 129.9)
            .price(119.9)
            .review("4")
            .status("delivered")
            .state("SP")
            .approved("2018-02-01 10:00:00")
            .delivered("2018-02-09")]);

        let table = load_orders(csv.as_bytes()).unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.warnings().is_empty());

        let row = &table.records()[0];
        assert_eq!(row.product_id.as_deref(), Some("p1"));
        assert_eq!(row.product_category_name_english.as_deref(), Some("toys"));
        assert_eq!(row.payment_value, Some(129.9));
        assert_eq!(row.review_score, Some(4));
        assert_eq!(
            row.order_approved_at,
            Timestamp::At(mock_timestamp(2018, 2, 1, 10, 0, 0))
        );
        assert_eq!(
            row.order_delivered_customer_date,
            Timestamp::At(mock_timestamp(2018, 2, 9, 0, 0, 0))
        );
        assert!(row.order_purchase_timestamp.is_missing());
        assert_eq!(row.payment_type.as_deref(), Some("credit_card"));
    }

    #[test]
    fn test_malformed_cells_become_missing_with_warnings() {
        let csv = orders_csv(&[
            OrderRow::new("o1", "c1")
                .approved("02/01/2018")
                .review("4.5")
                .payment("boleto", 1.0),
            OrderRow::new("o2", "c2").review("five").price(3.0),
        ]);

        let table = load_orders(csv.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.records()[0].order_approved_at.is_missing());
        assert_eq!(table.records()[0].review_score, None);
        assert_eq!(table.records()[1].review_score, None);

        let columns: Vec<(u64, &str)> = table
            .warnings()
            .iter()
            .map(|w| (w.line, w.column.as_str()))
            .collect();
        assert_eq!(
            columns,
            vec![(2, "review_score"), (2, "order_approved_at"), (3, "review_score")]
        );
    }

    #[test]
    fn test_rows_without_identifiers_are_skipped() {
        let csv = orders_csv(&[OrderRow::new("", "c1"), OrderRow::new("o2", "c2")]);
        let table = load_orders(csv.as_bytes()).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.warnings().len(), 1);
        assert_eq!(table.warnings()[0].column, "order_id");
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let csv = format!(",{}", orders_csv(&[OrderRow::new("o1", "c1")]).replacen("\no1", "\n0,o1", 1));
        let table = load_orders(csv.as_bytes()).unwrap();
        assert_eq!(table.records()[0].order_id, "o1");
    }

    #[test]
    fn test_missing_column_is_a_load_error() {
        let err = load_orders("order_id,customer_id\no1,c1\n".as_bytes()).unwrap_err();
        assert!(err.is_data_load());
        assert!(err.to_string().contains("product_id"));
    }

    #[test]
    fn test_ragged_row_is_a_load_error() {
        let mut csv = orders_csv(&[OrderRow::new("o1", "c1")]);
        csv.push_str("o2,c2\n");
        let err = load_orders(csv.as_bytes()).unwrap_err();
        assert!(err.is_data_load());
    }

    #[test]
    fn test_empty_input_is_a_load_error() {
        assert!(load_orders("".as_bytes()).is_err());
    }

    #[test]
    fn test_header_only_input_is_empty_table() {
        let table = load_orders(orders_csv(&[]).as_bytes()).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_load_geolocation() {
        let csv = format!(
            "{}z,abc,-46.6\n",
            geolocation_csv(&[("x", -23.5, -46.6), ("x", -22.9, -43.2)])
        );
        let table = load_geolocation(csv.as_bytes()).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.records()[0], GeoRecord::new("x", -23.5, -46.6));
        assert_eq!(table.records()[2].geolocation_lat, None);
        assert_eq!(table.warnings().len(), 1);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_orders_file(Path::new("/definitely/not/here.csv")).unwrap_err();
        match err {
            ShopDashError::DataLoad { path, .. } => {
                assert_eq!(path.as_deref(), Some("/definitely/not/here.csv"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
