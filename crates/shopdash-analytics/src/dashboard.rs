//! Every dashboard view for one delivery-date window.

use crate::aggregator::{
    geolocation_view, CategorySalesAggregator, DailyOrdersAggregator, DailySpendAggregator,
    OrderAggregator, OrderStatusAggregator, PaymentTypeAggregator, ReviewScoreAggregator,
    RfmAggregator, StateCustomerAggregator,
};
use crate::summary::{DashboardSummary, SummaryInputs};
use crate::types::{
    CategorySales, DailyOrders, DailySpend, GeolocationView, OrderStatusCounts,
    PaymentTypeCounts, ReviewScoreDistribution, RfmTable, StateCustomerCounts,
};
use serde::Serialize;
use shopdash_data::{DataContext, DateWindow, GeoRecord, OrderRecord};
use tracing::{info, instrument};

/// Entries kept in top and bottom lists unless configured otherwise.
pub const DEFAULT_TOP_N: usize = 5;

/// Derived tables and summary for one render of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    /// Effective delivery-date window, `None` when no row can match
    pub window: Option<DateWindow>,
    /// Order rows inside the window
    pub order_rows: usize,
    /// Daily distinct orders and revenue
    pub daily_orders: DailyOrders,
    /// Line items per category
    pub category_sales: CategorySales,
    /// Payment rows per type
    pub payment_types: PaymentTypeCounts,
    /// Review score distribution
    pub review_scores: ReviewScoreDistribution,
    /// Daily spend
    pub daily_spend: DailySpend,
    /// Customers per state
    pub customer_states: StateCustomerCounts,
    /// Order statuses
    pub order_status: OrderStatusCounts,
    /// RFM metrics per customer
    pub rfm: RfmTable,
    /// Deduplicated customer locations, not time filtered
    pub geolocation: GeolocationView,
    /// Headline figures
    pub summary: DashboardSummary,
}

impl Dashboard {
    /// Build every view from `context` restricted to `window`.
    ///
    /// Without a window every delivered order participates.
    pub fn build(context: &DataContext, window: Option<&DateWindow>) -> Self {
        Self::build_with_top_n(context, window, DEFAULT_TOP_N)
    }

    /// Like [`Dashboard::build`] with a custom top list length.
    #[instrument(skip(context, window), fields(window = ?window.map(ToString::to_string)))]
    pub fn build_with_top_n(context: &DataContext, window: Option<&DateWindow>, top_n: usize) -> Self {
        let window = window.copied().or_else(|| context.default_window());
        let orders = context.filtered_orders(window.as_ref());
        let dashboard = Self::from_records(
            orders.records(),
            context.geolocation().records(),
            window,
            top_n,
        );
        info!(
            rows = dashboard.order_rows,
            customers = dashboard.rfm.len(),
            "Built dashboard views"
        );
        dashboard
    }

    /// Build every view from already filtered order rows.
    pub fn from_records(
        orders: &[OrderRecord],
        geolocation: &[GeoRecord],
        window: Option<DateWindow>,
        top_n: usize,
    ) -> Self {
        let daily_orders = DailyOrdersAggregator.aggregate(orders);
        let category_sales = CategorySalesAggregator.aggregate(orders);
        let payment_types = PaymentTypeAggregator.aggregate(orders);
        let review_scores = ReviewScoreAggregator.aggregate(orders);
        let daily_spend = DailySpendAggregator.aggregate(orders);
        let customer_states = StateCustomerAggregator.aggregate(orders);
        let order_status = OrderStatusAggregator.aggregate(orders);
        let rfm = RfmAggregator.aggregate(orders);
        let geolocation = geolocation_view(geolocation);

        let summary = DashboardSummary::compute(
            &SummaryInputs {
                daily_orders: &daily_orders,
                daily_spend: &daily_spend,
                category_sales: &category_sales,
                payment_types: &payment_types,
                review_scores: &review_scores,
                customer_states: &customer_states,
                order_status: &order_status,
                rfm: &rfm,
            },
            top_n,
        );

        Self {
            window,
            order_rows: orders.len(),
            daily_orders,
            category_sales,
            payment_types,
            review_scores,
            daily_spend,
            customer_states,
            order_status,
            rfm,
            geolocation,
            summary,
        }
    }

    /// Whether no order fell inside the window.
    pub const fn is_empty(&self) -> bool {
        self.order_rows == 0
    }
}
