//! Derived tables produced by the aggregators.

use chrono::NaiveDate;
use serde::Serialize;
use shopdash_data::GeoRecord;

/// One day of the daily orders series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyOrdersPoint {
    /// Calendar day of payment approval
    pub date: NaiveDate,
    /// Distinct orders approved that day
    pub order_count: u64,
    /// Summed payment value
    pub revenue: f64,
}

/// Dense, chronological daily order counts and revenue.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DailyOrders {
    /// One point per calendar day from the first to the last approval
    pub points: Vec<DailyOrdersPoint>,
}

impl DailyOrders {
    /// Sum of the daily order counts.
    pub fn total_orders(&self) -> u64 {
        self.points.iter().map(|p| p.order_count).sum()
    }

    /// Sum of the daily revenue.
    pub fn total_revenue(&self) -> f64 {
        self.points.iter().map(|p| p.revenue).sum()
    }

    /// Whether the series has no days.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// One day of the daily spend series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySpendPoint {
    /// Calendar day of payment approval
    pub date: NaiveDate,
    /// Summed payment value
    pub total_spend: f64,
}

/// Dense, chronological daily spend.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DailySpend {
    /// One point per calendar day from the first to the last approval
    pub points: Vec<DailySpendPoint>,
}

impl DailySpend {
    /// Total spend over the series.
    pub fn total(&self) -> f64 {
        self.points.iter().map(|p| p.total_spend).sum()
    }

    /// Mean spend per day, `None` for an empty series.
    #[allow(clippy::cast_precision_loss)]
    pub fn average(&self) -> Option<f64> {
        (!self.points.is_empty()).then(|| self.total() / self.points.len() as f64)
    }

    /// Whether the series has no days.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// A group key with its count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountEntry<K> {
    /// Grouping key
    pub key: K,
    /// Number of occurrences
    pub count: u64,
}

/// Counts per key, sorted by descending count.
///
/// Among equal counts the smaller key comes first, so the first entry is
/// the mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedCounts<K> {
    /// Entries in ranking order
    pub entries: Vec<CountEntry<K>>,
}

impl<K> Default for RankedCounts<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K> RankedCounts<K> {
    /// The most frequent key, `None` when there is no data.
    pub fn mode(&self) -> Option<&K> {
        self.entries.first().map(|e| &e.key)
    }

    /// The leading entry.
    pub fn first(&self) -> Option<&CountEntry<K>> {
        self.entries.first()
    }

    /// Sum of every count.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// Count recorded for `key`.
    pub fn count_of(&self, key: &K) -> Option<u64>
    where
        K: PartialEq,
    {
        self.entries.iter().find(|e| &e.key == key).map(|e| e.count)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no key was counted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Ord + Clone> RankedCounts<K> {
    /// The `n` largest entries.
    pub fn top(&self, n: usize) -> Vec<CountEntry<K>> {
        self.entries.iter().take(n).cloned().collect()
    }

    /// The `n` smallest entries in ascending order, ties by key.
    pub fn bottom(&self, n: usize) -> Vec<CountEntry<K>> {
        let mut ascending = self.entries.clone();
        ascending.sort_by(|a, b| a.count.cmp(&b.count).then_with(|| a.key.cmp(&b.key)));
        ascending.truncate(n);
        ascending
    }
}

/// Line items per product category.
pub type CategorySales = RankedCounts<String>;
/// Payment rows per payment type.
pub type PaymentTypeCounts = RankedCounts<String>;
/// Rows per review score.
pub type ReviewScoreDistribution = RankedCounts<u8>;
/// Distinct customers per state.
pub type StateCustomerCounts = RankedCounts<String>;
/// Rows per order status.
pub type OrderStatusCounts = RankedCounts<String>;

/// Recency, frequency and monetary value of one customer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RfmRow {
    /// Customer identifier
    pub customer_id: String,
    /// Days between the customer's last purchase and the latest purchase
    /// overall, `None` when the customer has no valid purchase time
    pub recency: Option<i64>,
    /// Distinct orders
    pub frequency: u64,
    /// Summed item price
    pub monetary: f64,
}

/// Per-customer RFM metrics ordered by customer id.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RfmTable {
    /// One row per customer
    pub rows: Vec<RfmRow>,
}

impl RfmTable {
    /// Row for `customer_id`.
    pub fn get(&self, customer_id: &str) -> Option<&RfmRow> {
        self.rows
            .binary_search_by(|r| r.customer_id.as_str().cmp(customer_id))
            .ok()
            .map(|idx| &self.rows[idx])
    }

    /// Number of customers.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A plottable customer location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
}

/// Geolocation rows deduplicated by customer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GeolocationView {
    /// First row seen for each customer, in source order
    pub customers: Vec<GeoRecord>,
    /// Coordinates of the customers that have both
    pub points: Vec<GeoPoint>,
}

impl GeolocationView {
    /// Whether there is nothing to plot.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
