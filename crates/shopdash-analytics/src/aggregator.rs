//! Grouping aggregators that turn order rows into dashboard tables.

use crate::types::{
    CategorySales, CountEntry, DailyOrders, DailyOrdersPoint, DailySpend, DailySpendPoint,
    GeoPoint, GeolocationView, OrderStatusCounts, PaymentTypeCounts, RankedCounts,
    ReviewScoreDistribution, RfmRow, RfmTable, StateCustomerCounts,
};
use chrono::NaiveDate;
use shopdash_data::{GeoRecord, OrderRecord};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use tracing::{debug, instrument};

/// A pure reduction of order rows into one derived table.
///
/// Implementations never fail: empty input produces an empty table.
pub trait OrderAggregator {
    /// Table produced by this aggregator
    type Output;

    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Reduce `orders` into the output table.
    fn aggregate(&self, orders: &[OrderRecord]) -> Self::Output;
}

/// Distinct orders and revenue per approval day.
#[derive(Debug, Clone, Copy, Default)]
pub struct DailyOrdersAggregator;

/// Product line items per category.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategorySalesAggregator;

/// Payment rows per payment type.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaymentTypeAggregator;

/// Occurrences of each review score.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReviewScoreAggregator;

/// Spend per approval day.
#[derive(Debug, Clone, Copy, Default)]
pub struct DailySpendAggregator;

/// Distinct customers per state.
#[derive(Debug, Clone, Copy, Default)]
pub struct StateCustomerAggregator;

/// Occurrences of each order status.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderStatusAggregator;

/// Recency, frequency and monetary value per customer.
#[derive(Debug, Clone, Copy, Default)]
pub struct RfmAggregator;

#[derive(Default)]
struct DayBucket<'a> {
    orders: BTreeSet<&'a str>,
    payments: f64,
}

/// Group rows by the calendar day of payment approval.
///
/// Rows without an approval time are left out.
fn bucket_by_approval_day(orders: &[OrderRecord]) -> BTreeMap<NaiveDate, DayBucket<'_>> {
    let mut buckets: BTreeMap<NaiveDate, DayBucket<'_>> = BTreeMap::new();
    for record in orders {
        let Some(day) = record.order_approved_at.date() else {
            continue;
        };
        let bucket = buckets.entry(day).or_default();
        bucket.orders.insert(record.order_id.as_str());
        if let Some(value) = record.payment_value {
            bucket.payments += value;
        }
    }
    buckets
}

/// Every calendar day from the first to the last bucket, inclusive.
fn dense_days<V>(buckets: &BTreeMap<NaiveDate, V>) -> Vec<NaiveDate> {
    match (buckets.keys().next(), buckets.keys().next_back()) {
        (Some(&first), Some(&last)) => first.iter_days().take_while(|d| *d <= last).collect(),
        _ => Vec::new(),
    }
}

/// Sort grouped counts by descending count.
///
/// The sort is stable over the ascending key order of the map.
fn rank<K>(groups: BTreeMap<K, u64>) -> RankedCounts<K> {
    let mut entries: Vec<CountEntry<K>> = groups
        .into_iter()
        .map(|(key, count)| CountEntry { key, count })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    RankedCounts { entries }
}

/// Count rows per key, skipping rows whose key is absent.
fn count_by<K, F>(orders: &[OrderRecord], key: F) -> RankedCounts<K>
where
    K: Ord,
    F: Fn(&OrderRecord) -> Option<K>,
{
    let mut groups: BTreeMap<K, u64> = BTreeMap::new();
    for record in orders {
        if let Some(k) = key(record) {
            *groups.entry(k).or_insert(0) += 1;
        }
    }
    rank(groups)
}

impl OrderAggregator for DailyOrdersAggregator {
    type Output = DailyOrders;

    fn name(&self) -> &'static str {
        "daily_orders"
    }

    #[instrument(skip(self, orders), fields(rows = orders.len()))]
    fn aggregate(&self, orders: &[OrderRecord]) -> DailyOrders {
        let buckets = bucket_by_approval_day(orders);
        let points: Vec<DailyOrdersPoint> = dense_days(&buckets)
            .into_iter()
            .map(|date| {
                buckets.get(&date).map_or(
                    DailyOrdersPoint {
                        date,
                        order_count: 0,
                        revenue: 0.0,
                    },
                    |bucket| DailyOrdersPoint {
                        date,
                        order_count: bucket.orders.len() as u64,
                        revenue: bucket.payments,
                    },
                )
            })
            .collect();

        debug!("Aggregated {} days of order counts", points.len());
        DailyOrders { points }
    }
}

impl OrderAggregator for DailySpendAggregator {
    type Output = DailySpend;

    fn name(&self) -> &'static str {
        "daily_spend"
    }

    #[instrument(skip(self, orders), fields(rows = orders.len()))]
    fn aggregate(&self, orders: &[OrderRecord]) -> DailySpend {
        let buckets = bucket_by_approval_day(orders);
        let points: Vec<DailySpendPoint> = dense_days(&buckets)
            .into_iter()
            .map(|date| DailySpendPoint {
                date,
                total_spend: buckets.get(&date).map_or(0.0, |b| b.payments),
            })
            .collect();

        debug!("Aggregated {} days of spend", points.len());
        DailySpend { points }
    }
}

impl OrderAggregator for CategorySalesAggregator {
    type Output = CategorySales;

    fn name(&self) -> &'static str {
        "category_sales"
    }

    #[instrument(skip(self, orders), fields(rows = orders.len()))]
    fn aggregate(&self, orders: &[OrderRecord]) -> CategorySales {
        let sales = count_by(orders, |r| {
            r.product_id.as_ref()?;
            r.product_category_name_english.clone()
        });
        debug!("Aggregated sales for {} categories", sales.len());
        sales
    }
}

impl OrderAggregator for PaymentTypeAggregator {
    type Output = PaymentTypeCounts;

    fn name(&self) -> &'static str {
        "payment_types"
    }

    #[instrument(skip(self, orders), fields(rows = orders.len()))]
    fn aggregate(&self, orders: &[OrderRecord]) -> PaymentTypeCounts {
        let counts = count_by(orders, |r| r.payment_type.clone());
        debug!("Aggregated {} payment types", counts.len());
        counts
    }
}

impl OrderAggregator for ReviewScoreAggregator {
    type Output = ReviewScoreDistribution;

    fn name(&self) -> &'static str {
        "review_scores"
    }

    #[instrument(skip(self, orders), fields(rows = orders.len()))]
    fn aggregate(&self, orders: &[OrderRecord]) -> ReviewScoreDistribution {
        let distribution = count_by(orders, |r| r.review_score);
        debug!(
            mode = ?distribution.mode(),
            "Aggregated {} review scores",
            distribution.len()
        );
        distribution
    }
}

impl OrderAggregator for StateCustomerAggregator {
    type Output = StateCustomerCounts;

    fn name(&self) -> &'static str {
        "customer_states"
    }

    #[instrument(skip(self, orders), fields(rows = orders.len()))]
    fn aggregate(&self, orders: &[OrderRecord]) -> StateCustomerCounts {
        let mut customers: BTreeMap<&str, HashSet<&str>> = BTreeMap::new();
        for record in orders {
            if let Some(state) = record.customer_state.as_deref() {
                customers
                    .entry(state)
                    .or_default()
                    .insert(record.customer_id.as_str());
            }
        }
        let groups = customers
            .into_iter()
            .map(|(state, ids)| (state.to_string(), ids.len() as u64))
            .collect();

        let counts = rank(groups);
        debug!(top = ?counts.mode(), "Aggregated {} customer states", counts.len());
        counts
    }
}

impl OrderAggregator for OrderStatusAggregator {
    type Output = OrderStatusCounts;

    fn name(&self) -> &'static str {
        "order_status"
    }

    #[instrument(skip(self, orders), fields(rows = orders.len()))]
    fn aggregate(&self, orders: &[OrderRecord]) -> OrderStatusCounts {
        let counts = count_by(orders, |r| r.order_status.clone());
        debug!(mode = ?counts.mode(), "Aggregated {} order statuses", counts.len());
        counts
    }
}

#[derive(Default)]
struct CustomerActivity<'a> {
    last_purchase: Option<NaiveDate>,
    orders: BTreeSet<&'a str>,
    monetary: f64,
}

impl OrderAggregator for RfmAggregator {
    type Output = RfmTable;

    fn name(&self) -> &'static str {
        "rfm"
    }

    #[instrument(skip(self, orders), fields(rows = orders.len()))]
    fn aggregate(&self, orders: &[OrderRecord]) -> RfmTable {
        let mut customers: BTreeMap<&str, CustomerActivity<'_>> = BTreeMap::new();
        for record in orders {
            let activity = customers.entry(record.customer_id.as_str()).or_default();
            activity.orders.insert(record.order_id.as_str());
            if let Some(price) = record.price {
                activity.monetary += price;
            }
            if let Some(day) = record.order_purchase_timestamp.date() {
                activity.last_purchase = activity.last_purchase.max(Some(day));
            }
        }

        let latest = customers.values().filter_map(|a| a.last_purchase).max();
        let rows: Vec<RfmRow> = customers
            .into_iter()
            .map(|(customer_id, activity)| RfmRow {
                customer_id: customer_id.to_string(),
                recency: latest
                    .zip(activity.last_purchase)
                    .map(|(latest, last)| (latest - last).num_days()),
                frequency: activity.orders.len() as u64,
                monetary: activity.monetary,
            })
            .collect();

        debug!(latest = ?latest, "Aggregated RFM metrics for {} customers", rows.len());
        RfmTable { rows }
    }
}

/// Deduplicate geolocation rows by customer and collect plottable points.
///
/// The first row of each customer wins; rows lacking a coordinate stay in
/// the deduplicated table but yield no point.
#[instrument(skip(records), fields(rows = records.len()))]
pub fn geolocation_view(records: &[GeoRecord]) -> GeolocationView {
    let mut seen: HashSet<&str> = HashSet::with_capacity(records.len());
    let customers: Vec<GeoRecord> = records
        .iter()
        .filter(|r| seen.insert(r.customer_unique_id.as_str()))
        .cloned()
        .collect();
    let points: Vec<GeoPoint> = customers
        .iter()
        .filter_map(GeoRecord::coordinates)
        .map(|(lat, lng)| GeoPoint { lat, lng })
        .collect();

    debug!(
        "Deduplicated {} geolocation rows to {} customers, {} points",
        records.len(),
        customers.len(),
        points.len()
    );
    GeolocationView { customers, points }
}
