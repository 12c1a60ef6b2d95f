//! Headline numbers shown above the dashboard charts.

use crate::types::{
    CategorySales, CountEntry, DailyOrders, DailySpend, OrderStatusCounts, PaymentTypeCounts,
    ReviewScoreDistribution, RfmRow, RfmTable, StateCustomerCounts,
};
use serde::Serialize;
use shopdash_common::round_to;
use std::cmp::Ordering;

/// Mean RFM values over a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RfmAverages {
    /// Mean recency in days, one decimal, over customers that have one
    pub recency: Option<f64>,
    /// Mean distinct orders per customer, two decimals
    pub frequency: Option<f64>,
    /// Mean summed price per customer
    pub monetary: Option<f64>,
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

impl RfmTable {
    /// Averages of the three metrics, `None` where there is no data.
    #[allow(clippy::cast_precision_loss)]
    pub fn averages(&self) -> RfmAverages {
        RfmAverages {
            recency: mean(self.rows.iter().filter_map(|r| r.recency).map(|d| d as f64))
                .map(|v| round_to(v, 1)),
            frequency: mean(self.rows.iter().map(|r| r.frequency as f64)).map(|v| round_to(v, 2)),
            monetary: mean(self.rows.iter().map(|r| r.monetary)),
        }
    }

    /// The `n` most recent customers; customers without recency are left out.
    pub fn top_by_recency(&self, n: usize) -> Vec<RfmRow> {
        let mut rows: Vec<&RfmRow> = self.rows.iter().filter(|r| r.recency.is_some()).collect();
        rows.sort_by(|a, b| a.recency.cmp(&b.recency));
        rows.into_iter().take(n).cloned().collect()
    }

    /// The `n` customers with the most orders.
    pub fn top_by_frequency(&self, n: usize) -> Vec<RfmRow> {
        let mut rows: Vec<&RfmRow> = self.rows.iter().collect();
        rows.sort_by(|a, b| b.frequency.cmp(&a.frequency));
        rows.into_iter().take(n).cloned().collect()
    }

    /// The `n` customers with the highest spend.
    pub fn top_by_monetary(&self, n: usize) -> Vec<RfmRow> {
        let mut rows: Vec<&RfmRow> = self.rows.iter().collect();
        rows.sort_by(|a, b| b.monetary.partial_cmp(&a.monetary).unwrap_or(Ordering::Equal));
        rows.into_iter().take(n).cloned().collect()
    }
}

/// Top customers per RFM metric.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RfmLeaderboards {
    /// Lowest recency first
    pub by_recency: Vec<RfmRow>,
    /// Highest frequency first
    pub by_frequency: Vec<RfmRow>,
    /// Highest monetary value first
    pub by_monetary: Vec<RfmRow>,
}

impl RfmLeaderboards {
    /// Take the leading `n` customers of each metric.
    pub fn from_table(table: &RfmTable, n: usize) -> Self {
        Self {
            by_recency: table.top_by_recency(n),
            by_frequency: table.top_by_frequency(n),
            by_monetary: table.top_by_monetary(n),
        }
    }
}

/// Views a summary is computed from.
#[derive(Debug, Clone, Copy)]
pub struct SummaryInputs<'a> {
    /// Daily orders series
    pub daily_orders: &'a DailyOrders,
    /// Daily spend series
    pub daily_spend: &'a DailySpend,
    /// Category sales ranking
    pub category_sales: &'a CategorySales,
    /// Payment type ranking
    pub payment_types: &'a PaymentTypeCounts,
    /// Review score distribution
    pub review_scores: &'a ReviewScoreDistribution,
    /// Customers per state
    pub customer_states: &'a StateCustomerCounts,
    /// Order status ranking
    pub order_status: &'a OrderStatusCounts,
    /// RFM table
    pub rfm: &'a RfmTable,
}

/// Headline dashboard figures. Every field is neutral on empty input.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardSummary {
    /// Distinct orders summed over days
    pub total_orders: u64,
    /// Payment value summed over days
    pub total_revenue: f64,
    /// Spend summed over days
    pub total_spend: f64,
    /// Mean daily spend
    pub average_spend: Option<f64>,
    /// Category with the most line items
    pub best_category: Option<CountEntry<String>>,
    /// Best selling categories
    pub top_categories: Vec<CountEntry<String>>,
    /// Worst selling categories, ascending
    pub bottom_categories: Vec<CountEntry<String>>,
    /// Payment type used most
    pub most_common_payment_type: Option<CountEntry<String>>,
    /// Payment rows across all types
    pub total_payments: u64,
    /// Most frequent review score
    pub most_common_review_score: Option<u8>,
    /// State with the most customers
    pub top_state: Option<String>,
    /// Most frequent order status
    pub most_common_order_status: Option<String>,
    /// RFM means
    pub rfm_averages: RfmAverages,
    /// RFM top lists
    pub rfm_leaders: RfmLeaderboards,
}

impl DashboardSummary {
    /// Compute the summary, keeping `top_n` entries in every top list.
    pub fn compute(inputs: &SummaryInputs<'_>, top_n: usize) -> Self {
        Self {
            total_orders: inputs.daily_orders.total_orders(),
            total_revenue: inputs.daily_orders.total_revenue(),
            total_spend: inputs.daily_spend.total(),
            average_spend: inputs.daily_spend.average(),
            best_category: inputs.category_sales.first().cloned(),
            top_categories: inputs.category_sales.top(top_n),
            bottom_categories: inputs.category_sales.bottom(top_n),
            most_common_payment_type: inputs.payment_types.first().cloned(),
            total_payments: inputs.payment_types.total(),
            most_common_review_score: inputs.review_scores.mode().copied(),
            top_state: inputs.customer_states.mode().cloned(),
            most_common_order_status: inputs.order_status.mode().cloned(),
            rfm_averages: inputs.rfm.averages(),
            rfm_leaders: RfmLeaderboards::from_table(inputs.rfm, top_n),
        }
    }
}
