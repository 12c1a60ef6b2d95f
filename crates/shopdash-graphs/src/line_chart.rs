//! Daily time series line charts.

use crate::renderer::GraphRenderer;
use crate::theme::{ChartTheme, FONT_FAMILY};
use chrono::NaiveDate;
use plotters::prelude::*;
use shopdash_analytics::{DailyOrders, DailySpend};
use shopdash_common::{format_date, Result};
use std::ops::Range;

/// One value per calendar day.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeries {
    /// Points in chronological order
    pub points: Vec<(NaiveDate, f64)>,
}

impl TimeSeries {
    /// Distinct orders per day.
    #[allow(clippy::cast_precision_loss)]
    pub fn order_counts(daily: &DailyOrders) -> Self {
        Self {
            points: daily
                .points
                .iter()
                .map(|p| (p.date, p.order_count as f64))
                .collect(),
        }
    }

    /// Spend per day.
    pub fn spend(daily: &DailySpend) -> Self {
        Self {
            points: daily.points.iter().map(|p| (p.date, p.total_spend)).collect(),
        }
    }

    /// Whether there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Value axis from zero to the maximum plus headroom.
    pub fn value_range(&self) -> Range<f64> {
        let max = self.points.iter().map(|(_, v)| *v).fold(0.0, f64::max);
        if max > 0.0 {
            0.0..max * 1.1
        } else {
            0.0..1.0
        }
    }
}

/// Line chart with a marker on every day.
#[derive(Debug, Clone)]
pub struct LineChart {
    name: &'static str,
    title: String,
    y_label: String,
}

impl LineChart {
    /// Create a chart.
    pub fn new(name: &'static str, title: impl Into<String>, y_label: impl Into<String>) -> Self {
        Self {
            name,
            title: title.into(),
            y_label: y_label.into(),
        }
    }

    /// Daily order count chart.
    pub fn daily_orders() -> Self {
        Self::new("daily_orders", "Daily Orders", "Orders")
    }

    /// Daily customer spend chart.
    pub fn daily_spend() -> Self {
        Self::new("daily_spend", "Customer Spend Money", "Total Spend")
    }

    /// Chart caption.
    pub fn title(&self) -> &str {
        &self.title
    }
}

impl GraphRenderer for LineChart {
    type Data = TimeSeries;

    fn name(&self) -> &'static str {
        self.name
    }

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn draw(&self, data: &TimeSeries, theme: &ChartTheme, buffer: &mut [u8]) -> Result<()> {
        let root = BitMapBackend::with_buffer(buffer, (theme.width, theme.height)).into_drawing_area();
        root.fill(&theme.background)?;

        let max_x = (data.points.len().saturating_sub(1)).max(1) as f64;
        let mut chart = ChartBuilder::on(&root)
            .caption(&self.title, (FONT_FAMILY, theme.title_size))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(90)
            .build_cartesian_2d(0f64..max_x, data.value_range())?;

        let date_label = |x: &f64| {
            let idx = x.round();
            if idx < 0.0 || (x - idx).abs() > f64::EPSILON {
                return String::new();
            }
            data.points
                .get(idx as usize)
                .map(|(date, _)| format_date(*date))
                .unwrap_or_default()
        };
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(data.points.len().clamp(2, 10))
            .x_label_formatter(&date_label)
            .y_desc(self.y_label.as_str())
            .label_style((FONT_FAMILY, theme.label_size))
            .draw()?;

        let coords: Vec<(f64, f64)> = data
            .points
            .iter()
            .enumerate()
            .map(|(i, (_, v))| (i as f64, *v))
            .collect();
        chart.draw_series(LineSeries::new(
            coords.iter().copied(),
            theme.highlight.stroke_width(3),
        ))?;
        chart.draw_series(
            coords
                .iter()
                .map(|point| Circle::new(*point, 4, theme.highlight.filled())),
        )?;

        root.present()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopdash_analytics::{DailyOrdersPoint, DailySpendPoint};
    use shopdash_common::test_utils::mock_date;

    #[test]
    fn test_series_from_daily_orders() {
        let daily = DailyOrders {
            points: vec![
                DailyOrdersPoint {
                    date: mock_date(2018, 1, 1),
                    order_count: 2,
                    revenue: 150.0,
                },
                DailyOrdersPoint {
                    date: mock_date(2018, 1, 2),
                    order_count: 0,
                    revenue: 0.0,
                },
            ],
        };

        let counts = TimeSeries::order_counts(&daily);
        assert_eq!(counts.points, vec![(mock_date(2018, 1, 1), 2.0), (mock_date(2018, 1, 2), 0.0)]);
        assert!((counts.value_range().end - 2.2).abs() < 1e-9);
    }

    #[test]
    fn test_value_range_of_flat_series() {
        let spend = TimeSeries::spend(&DailySpend {
            points: vec![DailySpendPoint {
                date: mock_date(2018, 1, 1),
                total_spend: 0.0,
            }],
        });
        assert_eq!(spend.value_range(), 0.0..1.0);
        assert_eq!(TimeSeries::default().value_range(), 0.0..1.0);
        assert!(TimeSeries::default().is_empty());
    }

    #[test]
    fn test_chart_names() {
        assert_eq!(LineChart::daily_orders().name(), "daily_orders");
        assert_eq!(LineChart::daily_spend().name(), "daily_spend");
        assert_eq!(LineChart::daily_spend().title(), "Customer Spend Money");
    }
}
