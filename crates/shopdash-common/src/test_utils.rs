//! Test utilities and shared fixtures for the shopdash workspace.
//!
//! Enabled for this crate's own tests and, through the `testing` feature, for
//! the other crates' unit and integration tests.

use chrono::{NaiveDate, NaiveDateTime};
use std::io::Write;
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests. Safe to call from every test.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Calendar date fixture.
pub fn mock_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
}

/// Timestamp fixture.
pub fn mock_timestamp(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> NaiveDateTime {
    mock_date(year, month, day)
        .and_hms_opt(hour, min, sec)
        .expect("valid fixture time")
}

/// Create a temporary directory for tests that automatically cleans up.
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Write `contents` to a named temporary file with the given suffix.
pub fn write_temp_file(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temporary file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temporary file");
    file.flush().expect("Failed to flush temporary file");
    file
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// CSV fixtures shaped like the dashboard's source tables.
pub mod csv_fixtures {
    /// Orders table columns in fixture order.
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

    /// Geolocation table columns in fixture order.
    pub const GEO_COLUMNS: &[&str] = &["customer_unique_id", "geolocation_lat", "geolocation_lng"];

    /// Builder for one orders-table row. Unset cells are empty.
    #[derive(Debug, Clone, Default)]
    pub struct OrderRow {
        cells: [String; 14],
    }

    impl OrderRow {
        /// Row with the two required identifiers set.
        pub fn new(order_id: &str, customer_id: &str) -> Self {
            let mut row = Self::default();
            row.cells[0] = order_id.to_string();
            row.cells[1] = customer_id.to_string();
            row
        }

        fn set(mut self, column: &str, value: impl ToString) -> Self {
            let idx = ORDER_COLUMNS
                .iter()
                .position(|c| *c == column)
                .expect("known fixture column");
            self.cells[idx] = value.to_string();
            self
        }

        /// Product line item.
        pub fn product(self, product_id: &str, category: &str) -> Self {
            self.set("product_id", product_id)
                .set("product_category_name_english", category)
        }

        /// Payment type and value.
        pub fn payment(self, payment_type: &str, value: f64) -> Self {
            self.set("payment_type", payment_type)
                .set("payment_value", value)
        }

        /// Item price.
        pub fn price(self, price: f64) -> Self {
            self.set("price", price)
        }

        /// Review score cell, raw text.
        pub fn review(self, score: &str) -> Self {
            self.set("review_score", score)
        }

        /// Order status.
        pub fn status(self, status: &str) -> Self {
            self.set("order_status", status)
        }

        /// Customer state.
        pub fn state(self, state: &str) -> Self {
            self.set("customer_state", state)
        }

        /// Approval timestamp, raw text.
        pub fn approved(self, ts: &str) -> Self {
            self.set("order_approved_at", ts)
        }

        /// Purchase timestamp, raw text.
        pub fn purchased(self, ts: &str) -> Self {
            self.set("order_purchase_timestamp", ts)
        }

        /// Carrier hand-over timestamp, raw text.
        pub fn shipped(self, ts: &str) -> Self {
            self.set("order_delivered_carrier_date", ts)
        }

        /// Customer delivery timestamp, raw text.
        pub fn delivered(self, ts: &str) -> Self {
            self.set("order_delivered_customer_date", ts)
        }

        /// Render as one CSV line (no quoting; fixture values contain no commas).
        pub fn to_csv_line(&self) -> String {
            self.cells.join(",")
        }
    }

    /// Render a complete orders CSV with header.
    pub fn orders_csv(rows: &[OrderRow]) -> String {
        let mut out = ORDER_COLUMNS.join(",");
        out.push('\n');
        for row in rows {
            out.push_str(&row.to_csv_line());
            out.push('\n');
        }
        out
    }

    /// Render a complete geolocation CSV with header.
    pub fn geolocation_csv(rows: &[(&str, f64, f64)]) -> String {
        let mut out = GEO_COLUMNS.join(",");
        out.push('\n');
        for (id, lat, lng) in rows {
            out.push_str(&format!("{id},{lat},{lng}\n"));
        }
        out
    }

    /// Small but representative orders table: three days of approvals,
    /// four customers, one undelivered order and one malformed timestamp.
    pub fn sample_orders() -> Vec<OrderRow> {
        vec![
            OrderRow::new("o1", "c1")
                .product("p1", "health_beauty")
                .payment("credit_card", 100.0)
                .price(90.0)
                .review("5")
                .status("delivered")
                .state("SP")
                .approved("2018-01-01 10:00:00")
                .purchased("2018-01-01 09:30:00")
                .shipped("2018-01-02 08:00:00")
                .delivered("2018-01-05 14:00:00"),
            OrderRow::new("o2", "c2")
                .product("p2", "bed_bath_table")
                .payment("boleto", 50.0)
                .price(45.0)
                .review("4")
                .status("delivered")
                .state("RJ")
                .approved("2018-01-01 12:00:00")
                .purchased("2018-01-01 11:00:00")
                .shipped("2018-01-03 08:00:00")
                .delivered("2018-01-06 10:00:00"),
            OrderRow::new("o3", "c1")
                .product("p3", "health_beauty")
                .payment("credit_card", 10.0)
                .price(8.5)
                .review("5")
                .status("delivered")
                .state("SP")
                .approved("2018-01-03 10:00:00")
                .purchased("2018-01-03 09:00:00")
                .shipped("2018-01-04 08:00:00")
                .delivered("2018-01-08 09:00:00"),
            OrderRow::new("o4", "c3")
                .product("p4", "sports_leisure")
                .payment("voucher", 30.0)
                .price(30.0)
                .review("1")
                .status("shipped")
                .state("MG")
                .approved("2018-01-03 15:00:00")
                .purchased("2018-01-03 14:00:00")
                .shipped("2018-01-04 09:00:00"),
            OrderRow::new("o5", "c4")
                .product("p5", "health_beauty")
                .payment("credit_card", 75.5)
                .price(70.0)
                .review("4")
                .status("delivered")
                .state("SP")
                .approved("not-a-date")
                .purchased("2018-01-02 16:00:00")
                .delivered("2018-01-07 18:00:00"),
        ]
    }
}
