//! Renders every enabled dashboard chart into an output directory.

use crate::bar_chart::{BarChart, BarSeries, RfmMetric};
use crate::line_chart::{LineChart, TimeSeries};
use crate::renderer::GraphRenderer;
use crate::scatter_map::ScatterMap;
use crate::theme::ChartTheme;
use image::DynamicImage;
use shopdash_analytics::Dashboard;
use shopdash_common::Result;
use shopdash_config::{EnabledGraphsConfig, GraphsConfig, MapExtent};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// A chart written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedChart {
    /// Chart name
    pub name: &'static str,
    /// PNG location
    pub path: PathBuf,
}

/// Drives the individual renderers for one dashboard.
#[derive(Debug, Clone)]
pub struct ChartManager {
    theme: ChartTheme,
    enabled: EnabledGraphsConfig,
    extent: MapExtent,
    output_dir: PathBuf,
}

impl ChartManager {
    /// Manager writing into `output_dir`.
    pub fn new(config: &GraphsConfig, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            theme: ChartTheme::from_config(config),
            enabled: config.enabled,
            extent: config.map_extent,
            output_dir: output_dir.into(),
        }
    }

    /// Directory charts are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Render the enabled charts of `dashboard`.
    ///
    /// Charts whose table is empty are skipped. The map is square, like
    /// the region it shows.
    #[instrument(skip_all, fields(dir = %self.output_dir.display()))]
    pub async fn render_dashboard(
        &self,
        dashboard: &Dashboard,
        backdrop: Option<&DynamicImage>,
    ) -> Result<Vec<RenderedChart>> {
        tokio::fs::create_dir_all(&self.output_dir).await?;
        let mut rendered = Vec::new();
        let enabled = self.enabled;
        let summary = &dashboard.summary;

        if enabled.daily_orders {
            let series = TimeSeries::order_counts(&dashboard.daily_orders);
            self.render(&LineChart::daily_orders(), &series, series.is_empty(), &self.theme, &mut rendered)
                .await?;
        }
        if enabled.daily_spend {
            let series = TimeSeries::spend(&dashboard.daily_spend);
            self.render(&LineChart::daily_spend(), &series, series.is_empty(), &self.theme, &mut rendered)
                .await?;
        }
        if enabled.categories {
            for (chart, entries) in [
                (BarChart::best_categories(), &summary.top_categories),
                (BarChart::worst_categories(), &summary.bottom_categories),
            ] {
                let series = BarSeries::from_counts(entries);
                self.render(&chart, &series, series.is_empty(), &self.theme, &mut rendered)
                    .await?;
            }
        }
        if enabled.payment_types {
            let series = BarSeries::from_counts(&dashboard.payment_types.entries);
            self.render(&BarChart::payment_types(), &series, series.is_empty(), &self.theme, &mut rendered)
                .await?;
        }
        if enabled.review_scores {
            let series = BarSeries::from_counts(&dashboard.review_scores.entries);
            self.render(&BarChart::review_scores(), &series, series.is_empty(), &self.theme, &mut rendered)
                .await?;
        }
        if enabled.customer_states {
            let series = BarSeries::from_counts(&dashboard.customer_states.entries);
            self.render(&BarChart::customer_states(), &series, series.is_empty(), &self.theme, &mut rendered)
                .await?;
        }
        if enabled.order_status {
            let series = BarSeries::from_counts(&dashboard.order_status.entries);
            self.render(&BarChart::order_status(), &series, series.is_empty(), &self.theme, &mut rendered)
                .await?;
        }
        if enabled.rfm {
            let leaders = &summary.rfm_leaders;
            for (metric, rows) in [
                (RfmMetric::Recency, &leaders.by_recency),
                (RfmMetric::Frequency, &leaders.by_frequency),
                (RfmMetric::Monetary, &leaders.by_monetary),
            ] {
                let series = BarSeries::from_rfm(rows, metric);
                self.render(&BarChart::rfm(metric), &series, series.is_empty(), &self.theme, &mut rendered)
                    .await?;
            }
        }
        if enabled.geolocation {
            let mut map = ScatterMap::new(self.extent);
            if let Some(image) = backdrop {
                map = map.with_backdrop(image);
            }
            let side = self.theme.height;
            let theme = self.theme.with_size(side, side);
            let points = dashboard.geolocation.points.as_slice();
            self.render(&map, points, points.is_empty(), &theme, &mut rendered)
                .await?;
        }

        info!(charts = rendered.len(), "Rendered dashboard charts");
        Ok(rendered)
    }

    async fn render<R: GraphRenderer>(
        &self,
        renderer: &R,
        data: &R::Data,
        empty: bool,
        theme: &ChartTheme,
        rendered: &mut Vec<RenderedChart>,
    ) -> Result<()> {
        if empty {
            info!("Skipping {} chart, no data in window", renderer.name());
            return Ok(());
        }
        let path = self.output_dir.join(format!("{}.png", renderer.name()));
        renderer.render_to_file(data, theme, &path).await?;
        rendered.push(RenderedChart {
            name: renderer.name(),
            path,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopdash_analytics::GeoPoint;
    use shopdash_data::{DataContext, GeoRecord, GeoTable, OrderRecord, OrderTable};

    fn dashboard_with_points() -> Dashboard {
        let context = DataContext::new(
            OrderTable::new(vec![OrderRecord::new("o", "c")]),
            GeoTable::new(vec![GeoRecord::new("u", -23.5, -46.6)]),
        );
        Dashboard::build(&context, None)
    }

    #[tokio::test]
    async fn test_empty_views_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = GraphsConfig::default();
        config.enabled.geolocation = false;
        let manager = ChartManager::new(&config, dir.path().join("charts"));

        let rendered = manager
            .render_dashboard(&dashboard_with_points(), None)
            .await
            .unwrap();
        assert!(rendered.is_empty());
        assert!(manager.output_dir().is_dir());
    }

    #[tokio::test]
    async fn test_renders_map_only() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = GraphsConfig {
            width: 300,
            height: 200,
            ..GraphsConfig::default()
        };
        config.enabled = EnabledGraphsConfig {
            geolocation: true,
            ..disabled()
        };
        let manager = ChartManager::new(&config, dir.path());

        let dashboard = dashboard_with_points();
        assert_eq!(dashboard.geolocation.points, vec![GeoPoint { lat: -23.5, lng: -46.6 }]);
        let rendered = manager.render_dashboard(&dashboard, None).await.unwrap();

        assert_eq!(rendered.len(), 1);
        assert_eq!(rendered[0].name, "geolocation");
        let image = image::open(&rendered[0].path).unwrap();
        assert_eq!((image.width(), image.height()), (200, 200));
    }

    fn disabled() -> EnabledGraphsConfig {
        EnabledGraphsConfig {
            daily_orders: false,
            daily_spend: false,
            categories: false,
            payment_types: false,
            review_scores: false,
            customer_states: false,
            order_status: false,
            rfm: false,
            geolocation: false,
        }
    }
}
