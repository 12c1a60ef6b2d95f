//! Formatted headline metrics printed alongside the charts.

use shopdash_analytics::DashboardSummary;
use shopdash_i18n::{CurrencyFormatter, I18nResult};

/// One labelled headline value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Headline {
    /// Display label
    pub label: &'static str,
    /// Formatted value, `-` when the view is empty
    pub value: String,
}

impl Headline {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Format every headline of `summary`.
///
/// Money values go through `formatter`; counts are plain integers.
pub fn headlines(summary: &DashboardSummary, formatter: &CurrencyFormatter) -> I18nResult<Vec<Headline>> {
    let rfm = &summary.rfm_averages;
    Ok(vec![
        Headline::new("Total Order", summary.total_orders.to_string()),
        Headline::new("Total Revenue", formatter.format(summary.total_revenue)?),
        Headline::new("Total Spend", formatter.format(summary.total_spend)?),
        Headline::new("Average Spend", formatter.format_optional(summary.average_spend)?),
        Headline::new(
            "Best Category Products",
            or_dash(summary.best_category.as_ref().map(|e| &e.key)),
        ),
        Headline::new(
            "Most Common Payment Types",
            or_dash(summary.most_common_payment_type.as_ref().map(|e| &e.key)),
        ),
        Headline::new("Total Payments", summary.total_payments.to_string()),
        Headline::new(
            "Most Frequently Given Rating",
            or_dash(summary.most_common_review_score),
        ),
        Headline::new("Most Common State", or_dash(summary.top_state.as_ref())),
        Headline::new(
            "Most Order Status",
            or_dash(summary.most_common_order_status.as_ref()),
        ),
        Headline::new(
            "Average Recency (days)",
            or_dash(rfm.recency.map(|v| format!("{v:.1}"))),
        ),
        Headline::new(
            "Average Frequency",
            or_dash(rfm.frequency.map(|v| format!("{v:.2}"))),
        ),
        Headline::new("Average Monetary", formatter.format_optional(rfm.monetary)?),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopdash_analytics::{CountEntry, RfmAverages};

    fn value<'a>(lines: &'a [Headline], label: &str) -> &'a str {
        lines
            .iter()
            .find(|h| h.label == label)
            .map(|h| h.value.as_str())
            .unwrap()
    }

    #[test]
    fn test_empty_summary_is_neutral() {
        let formatter = CurrencyFormatter::new("BRL", "pt_BR").unwrap();
        let lines = headlines(&DashboardSummary::default(), &formatter).unwrap();

        assert_eq!(lines.len(), 13);
        assert_eq!(value(&lines, "Total Order"), "0");
        assert_eq!(value(&lines, "Total Revenue"), "R$\u{a0}0,00");
        assert_eq!(value(&lines, "Average Spend"), "-");
        assert_eq!(value(&lines, "Best Category Products"), "-");
        assert_eq!(value(&lines, "Average Monetary"), "-");
    }

    #[test]
    fn test_values_are_formatted() {
        let summary = DashboardSummary {
            total_orders: 3,
            total_revenue: 1234.5,
            best_category: Some(CountEntry {
                key: "health_beauty".to_string(),
                count: 3,
            }),
            most_common_review_score: Some(5),
            rfm_averages: RfmAverages {
                recency: Some(1.5),
                frequency: Some(1.25),
                monetary: Some(60.0),
            },
            ..DashboardSummary::default()
        };
        let formatter = CurrencyFormatter::new("USD", "en_US").unwrap();
        let lines = headlines(&summary, &formatter).unwrap();

        assert_eq!(value(&lines, "Total Order"), "3");
        assert_eq!(value(&lines, "Total Revenue"), "$1,234.50");
        assert_eq!(value(&lines, "Best Category Products"), "health_beauty");
        assert_eq!(value(&lines, "Most Frequently Given Rating"), "5");
        assert_eq!(value(&lines, "Average Recency (days)"), "1.5");
        assert_eq!(value(&lines, "Average Frequency"), "1.25");
        assert_eq!(value(&lines, "Average Monetary"), "$60.00");
    }

    #[test]
    fn test_rfm_averages_keep_fixed_decimals() {
        let summary = DashboardSummary {
            rfm_averages: RfmAverages {
                recency: Some(0.0),
                frequency: Some(1.0),
                monetary: None,
            },
            ..DashboardSummary::default()
        };
        let formatter = CurrencyFormatter::new("BRL", "pt_BR").unwrap();
        let lines = headlines(&summary, &formatter).unwrap();

        assert_eq!(value(&lines, "Average Recency (days)"), "0.0");
        assert_eq!(value(&lines, "Average Frequency"), "1.00");
    }
}
