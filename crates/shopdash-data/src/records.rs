//! Typed source records and the tables that hold them.

use chrono::NaiveDate;
use serde::Serialize;
use shopdash_common::{ParseWarning, Timestamp};

/// One row of the denormalized orders table.
///
/// An order with several line items or payments appears on several rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderRecord {
    /// Order identifier
    pub order_id: String,
    /// Customer identifier
    pub customer_id: String,
    /// Product of this line item, absent for orders without items
    pub product_id: Option<String>,
    /// Product category (English name)
    pub product_category_name_english: Option<String>,
    /// Payment method
    pub payment_type: Option<String>,
    /// Amount of this payment
    pub payment_value: Option<f64>,
    /// Item price
    pub price: Option<f64>,
    /// Review score given for the order
    pub review_score: Option<u8>,
    /// Order lifecycle status
    pub order_status: Option<String>,
    /// Customer's state code
    pub customer_state: Option<String>,
    /// Payment approval time
    pub order_approved_at: Timestamp,
    /// Purchase time
    pub order_purchase_timestamp: Timestamp,
    /// Hand-over to the carrier
    pub order_delivered_carrier_date: Timestamp,
    /// Delivery to the customer
    pub order_delivered_customer_date: Timestamp,
}

impl OrderRecord {
    /// A record carrying only its identifiers.
    pub fn new(order_id: impl Into<String>, customer_id: impl Into<String>) -> Self {
        Self {
            order_id: order_id.into(),
            customer_id: customer_id.into(),
            product_id: None,
            product_category_name_english: None,
            payment_type: None,
            payment_value: None,
            price: None,
            review_score: None,
            order_status: None,
            customer_state: None,
            order_approved_at: Timestamp::Missing,
            order_purchase_timestamp: Timestamp::Missing,
            order_delivered_carrier_date: Timestamp::Missing,
            order_delivered_customer_date: Timestamp::Missing,
        }
    }

    /// Calendar day the customer received the order.
    pub fn delivered_date(&self) -> Option<NaiveDate> {
        self.order_delivered_customer_date.date()
    }
}

/// One row of the geolocation table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoRecord {
    /// Customer key used for deduplication
    pub customer_unique_id: String,
    /// Latitude in degrees
    pub geolocation_lat: Option<f64>,
    /// Longitude in degrees
    pub geolocation_lng: Option<f64>,
}

impl GeoRecord {
    /// Create a record with both coordinates.
    pub fn new(customer_unique_id: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            customer_unique_id: customer_unique_id.into(),
            geolocation_lat: Some(lat),
            geolocation_lng: Some(lng),
        }
    }

    /// `(lat, lng)` when both coordinates are present.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.geolocation_lat.zip(self.geolocation_lng)
    }
}

/// Orders plus the warnings produced while loading them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderTable {
    records: Vec<OrderRecord>,
    warnings: Vec<ParseWarning>,
}

impl OrderTable {
    /// Wrap already typed records.
    pub fn new(records: Vec<OrderRecord>) -> Self {
        Self {
            records,
            warnings: Vec::new(),
        }
    }

    /// Wrap records together with their load warnings.
    pub fn with_warnings(records: Vec<OrderRecord>, warnings: Vec<ParseWarning>) -> Self {
        Self { records, warnings }
    }

    /// Rows in source order.
    pub fn records(&self) -> &[OrderRecord] {
        &self.records
    }

    /// Non-fatal cell coercion failures.
    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest and latest customer delivery date, ignoring missing values.
    pub fn delivered_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.records
            .iter()
            .filter_map(OrderRecord::delivered_date)
            .fold(None, |span, date| match span {
                None => Some((date, date)),
                Some((lo, hi)) => Some((lo.min(date), hi.max(date))),
            })
    }
}

/// Geolocation rows plus load warnings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoTable {
    records: Vec<GeoRecord>,
    warnings: Vec<ParseWarning>,
}

impl GeoTable {
    /// Wrap already typed records.
    pub fn new(records: Vec<GeoRecord>) -> Self {
        Self {
            records,
            warnings: Vec::new(),
        }
    }

    /// Wrap records together with their load warnings.
    pub fn with_warnings(records: Vec<GeoRecord>, warnings: Vec<ParseWarning>) -> Self {
        Self { records, warnings }
    }

    /// Rows in source order.
    pub fn records(&self) -> &[GeoRecord] {
        &self.records
    }

    /// Non-fatal cell coercion failures.
    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
