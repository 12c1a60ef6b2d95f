//! Ranked bar charts for counts and RFM leaderboards.

use crate::renderer::GraphRenderer;
use crate::theme::{ChartTheme, FONT_FAMILY};
use plotters::prelude::*;
use shopdash_analytics::{CountEntry, RfmRow};
use shopdash_common::{truncate_label, Result};
use std::fmt::Display;

/// Longest label drawn under or beside a bar.
const MAX_LABEL_CHARS: usize = 24;

/// One labelled bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// Category label
    pub label: String,
    /// Bar length
    pub value: f64,
}

/// Bars in display order, leading bar first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BarSeries {
    /// Bars to draw
    pub bars: Vec<Bar>,
}

/// RFM metric drawn by a leaderboard chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RfmMetric {
    /// Days since last purchase
    Recency,
    /// Distinct orders
    Frequency,
    /// Summed price
    Monetary,
}

impl BarSeries {
    /// Bars from ranked counts.
    #[allow(clippy::cast_precision_loss)]
    pub fn from_counts<K: Display>(entries: &[CountEntry<K>]) -> Self {
        Self {
            bars: entries
                .iter()
                .map(|e| Bar {
                    label: e.key.to_string(),
                    value: e.count as f64,
                })
                .collect(),
        }
    }

    /// Bars from leaderboard rows, labelled by customer id.
    #[allow(clippy::cast_precision_loss)]
    pub fn from_rfm(rows: &[RfmRow], metric: RfmMetric) -> Self {
        Self {
            bars: rows
                .iter()
                .map(|row| Bar {
                    label: truncate_label(&row.customer_id, 11),
                    value: match metric {
                        RfmMetric::Recency => row.recency.unwrap_or_default() as f64,
                        RfmMetric::Frequency => row.frequency as f64,
                        RfmMetric::Monetary => row.monetary,
                    },
                })
                .collect(),
        }
    }

    /// Whether there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Value axis end with headroom.
    pub fn value_max(&self) -> f64 {
        let max = self.bars.iter().map(|b| b.value).fold(0.0, f64::max);
        if max > 0.0 {
            max * 1.1
        } else {
            1.0
        }
    }
}

/// Direction bars grow in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Bars grow to the right, leading bar on top
    Horizontal,
    /// Bars grow upwards, leading bar on the left
    Vertical,
}

/// How bars are coloured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarColoring {
    /// Leading bar highlighted, the rest muted
    HighlightLeading,
    /// Every bar in the highlight colour
    UniformHighlight,
    /// Every bar in the status colour
    UniformStatus,
}

/// Bar chart over a [`BarSeries`].
#[derive(Debug, Clone)]
pub struct BarChart {
    name: &'static str,
    title: String,
    value_label: String,
    orientation: Orientation,
    coloring: BarColoring,
}

impl BarChart {
    /// Create a chart.
    pub fn new(
        name: &'static str,
        title: impl Into<String>,
        value_label: impl Into<String>,
        orientation: Orientation,
        coloring: BarColoring,
    ) -> Self {
        Self {
            name,
            title: title.into(),
            value_label: value_label.into(),
            orientation,
            coloring,
        }
    }

    /// Best selling categories.
    pub fn best_categories() -> Self {
        Self::new(
            "best_categories",
            "Best Category Product",
            "Number of Sales",
            Orientation::Horizontal,
            BarColoring::HighlightLeading,
        )
    }

    /// Worst selling categories.
    pub fn worst_categories() -> Self {
        Self::new(
            "worst_categories",
            "Worst Category Product",
            "Number of Sales",
            Orientation::Horizontal,
            BarColoring::HighlightLeading,
        )
    }

    /// Payment types.
    pub fn payment_types() -> Self {
        Self::new(
            "payment_types",
            "Most Common Payment Types",
            "Number of Payments",
            Orientation::Horizontal,
            BarColoring::HighlightLeading,
        )
    }

    /// Review score distribution.
    pub fn review_scores() -> Self {
        Self::new(
            "review_scores",
            "Rating by customers for service",
            "Count",
            Orientation::Vertical,
            BarColoring::HighlightLeading,
        )
    }

    /// Customers per state.
    pub fn customer_states() -> Self {
        Self::new(
            "customer_states",
            "Number customers from State",
            "Number of Customers",
            Orientation::Vertical,
            BarColoring::HighlightLeading,
        )
    }

    /// Order statuses.
    pub fn order_status() -> Self {
        Self::new(
            "order_status",
            "Order Status",
            "Number of Orders",
            Orientation::Vertical,
            BarColoring::UniformStatus,
        )
    }

    /// RFM leaderboard for one metric.
    pub fn rfm(metric: RfmMetric) -> Self {
        let (name, title) = match metric {
            RfmMetric::Recency => ("rfm_recency", "By Recency (days)"),
            RfmMetric::Frequency => ("rfm_frequency", "By Frequency"),
            RfmMetric::Monetary => ("rfm_monetary", "By Monetary"),
        };
        Self::new(name, title, "", Orientation::Vertical, BarColoring::UniformHighlight)
    }

    /// Chart caption.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Fill colour of each of `count` bars.
    pub fn bar_colors(&self, count: usize, theme: &ChartTheme) -> Vec<RGBColor> {
        (0..count)
            .map(|i| match self.coloring {
                BarColoring::HighlightLeading if i == 0 => theme.highlight,
                BarColoring::HighlightLeading => theme.muted,
                BarColoring::UniformHighlight => theme.highlight,
                BarColoring::UniformStatus => theme.status,
            })
            .collect()
    }

    fn label_at(labels: &[String], value: &SegmentValue<usize>) -> String {
        match value {
            SegmentValue::CenterOf(i) => labels
                .get(*i)
                .map(|l| truncate_label(l, MAX_LABEL_CHARS))
                .unwrap_or_default(),
            _ => String::new(),
        }
    }
}

impl GraphRenderer for BarChart {
    type Data = BarSeries;

    fn name(&self) -> &'static str {
        self.name
    }

    fn draw(&self, data: &BarSeries, theme: &ChartTheme, buffer: &mut [u8]) -> Result<()> {
        let root = BitMapBackend::with_buffer(buffer, (theme.width, theme.height)).into_drawing_area();
        root.fill(&theme.background)?;

        let n = data.bars.len();
        let slots = n.max(1);
        let colors = self.bar_colors(n, theme);
        let label_style = (FONT_FAMILY, theme.label_size);

        match self.orientation {
            Orientation::Vertical => {
                let labels: Vec<String> = data.bars.iter().map(|b| b.label.clone()).collect();
                let mut chart = ChartBuilder::on(&root)
                    .caption(&self.title, (FONT_FAMILY, theme.title_size))
                    .margin(20)
                    .x_label_area_size(50)
                    .y_label_area_size(90)
                    .build_cartesian_2d((0..slots).into_segmented(), 0f64..data.value_max())?;
                chart
                    .configure_mesh()
                    .disable_x_mesh()
                    .x_labels(slots)
                    .x_label_formatter(&|v| Self::label_at(&labels, v))
                    .y_desc(self.value_label.as_str())
                    .label_style(label_style)
                    .draw()?;
                chart.draw_series(data.bars.iter().zip(&colors).enumerate().map(|(i, (bar, color))| {
                    let mut rect = Rectangle::new(
                        [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), bar.value)],
                        color.filled(),
                    );
                    rect.set_margin(0, 0, 6, 6);
                    rect
                }))?;
            }
            Orientation::Horizontal => {
                // Slot 0 is at the bottom, so the leading bar takes the last slot.
                let labels: Vec<String> = data.bars.iter().rev().map(|b| b.label.clone()).collect();
                let mut chart = ChartBuilder::on(&root)
                    .caption(&self.title, (FONT_FAMILY, theme.title_size))
                    .margin(20)
                    .x_label_area_size(50)
                    .y_label_area_size(220)
                    .build_cartesian_2d(0f64..data.value_max(), (0..slots).into_segmented())?;
                chart
                    .configure_mesh()
                    .disable_y_mesh()
                    .y_labels(slots)
                    .y_label_formatter(&|v| Self::label_at(&labels, v))
                    .x_desc(self.value_label.as_str())
                    .label_style(label_style)
                    .draw()?;
                chart.draw_series(data.bars.iter().zip(&colors).enumerate().map(|(i, (bar, color))| {
                    let slot = n - 1 - i;
                    let mut rect = Rectangle::new(
                        [(0.0, SegmentValue::Exact(slot)), (bar.value, SegmentValue::Exact(slot + 1))],
                        color.filled(),
                    );
                    rect.set_margin(6, 6, 0, 0);
                    rect
                }))?;
            }
        }

        root.present()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(pairs: &[(&str, u64)]) -> Vec<CountEntry<String>> {
        pairs
            .iter()
            .map(|(k, c)| CountEntry {
                key: (*k).to_string(),
                count: *c,
            })
            .collect()
    }

    #[test]
    fn test_series_from_counts() {
        let series = BarSeries::from_counts(&entries(&[("SP", 40), ("RJ", 12)]));
        assert_eq!(
            series.bars,
            vec![
                Bar {
                    label: "SP".into(),
                    value: 40.0
                },
                Bar {
                    label: "RJ".into(),
                    value: 12.0
                },
            ]
        );
        assert!((series.value_max() - 44.0).abs() < 1e-9);
        assert_eq!(BarSeries::default().value_max(), 1.0);
    }

    #[test]
    fn test_series_from_rfm() {
        let rows = vec![
            RfmRow {
                customer_id: "0a1b2c3d4e5f60718293".into(),
                recency: None,
                frequency: 3,
                monetary: 120.5,
            },
            RfmRow {
                customer_id: "short".into(),
                recency: Some(7),
                frequency: 1,
                monetary: 15.0,
            },
        ];

        let recency = BarSeries::from_rfm(&rows, RfmMetric::Recency);
        assert_eq!(recency.bars[0].value, 0.0);
        assert_eq!(recency.bars[1].value, 7.0);
        assert_eq!(recency.bars[0].label, "0a1b2c3d...");
        assert_eq!(BarSeries::from_rfm(&rows, RfmMetric::Frequency).bars[0].value, 3.0);
        assert_eq!(BarSeries::from_rfm(&rows, RfmMetric::Monetary).bars[0].value, 120.5);
    }

    #[test]
    fn test_bar_colors() {
        let theme = ChartTheme::default();
        assert_eq!(
            BarChart::review_scores().bar_colors(3, &theme),
            vec![theme.highlight, theme.muted, theme.muted]
        );
        assert_eq!(BarChart::order_status().bar_colors(2, &theme), vec![theme.status; 2]);
        assert_eq!(
            BarChart::rfm(RfmMetric::Monetary).bar_colors(2, &theme),
            vec![theme.highlight; 2]
        );
        assert!(BarChart::payment_types().bar_colors(0, &theme).is_empty());
    }

    #[test]
    fn test_segment_labels() {
        let labels = vec!["credit_card".to_string(), "boleto".to_string()];
        assert_eq!(BarChart::label_at(&labels, &SegmentValue::CenterOf(1)), "boleto");
        assert_eq!(BarChart::label_at(&labels, &SegmentValue::Exact(1)), "");
        assert_eq!(BarChart::label_at(&labels, &SegmentValue::CenterOf(5)), "");
    }

    #[test]
    fn test_chart_names() {
        assert_eq!(BarChart::best_categories().name(), "best_categories");
        assert_eq!(BarChart::rfm(RfmMetric::Recency).name(), "rfm_recency");
        assert_eq!(BarChart::customer_states().title(), "Number customers from State");
    }
}
