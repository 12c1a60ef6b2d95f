//! One dashboard run: load, filter, aggregate, render and export.

use crate::error::AppResult;
use crate::headline::{headlines, Headline};
use anyhow::Context;
use shopdash_analytics::Dashboard;
use shopdash_config::Config;
use shopdash_data::{DataSources, DataStore, DateWindow};
use shopdash_graphs::{resolve_backdrop, ChartManager, RenderedChart};
use shopdash_i18n::CurrencyFormatter;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Outcome of [`App::run`].
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Order rows inside the effective window
    pub rows: usize,
    /// Charts written to disk
    pub charts: Vec<RenderedChart>,
    /// Location of the JSON export, when enabled
    pub export_path: Option<PathBuf>,
    /// Formatted headline metrics
    pub headlines: Vec<Headline>,
}

/// The dashboard application.
pub struct App {
    config: Config,
    store: DataStore,
}

impl App {
    /// Load the configured data sources.
    pub fn new(config: Config) -> AppResult<Self> {
        let sources = DataSources::new(&config.data.orders_path, &config.data.geolocation_path);
        let store = DataStore::open(sources)?;
        Ok(Self::with_store(config, store))
    }

    /// Use an already opened store.
    pub fn with_store(config: Config, store: DataStore) -> Self {
        Self { config, store }
    }

    /// Active configuration.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Effective delivery-date window: configured bounds, unset ones taken
    /// from the delivered span of the current snapshot.
    pub fn window(&self) -> AppResult<Option<DateWindow>> {
        let filter = self.config.filter;
        let span = self.store.snapshot().orders().delivered_span();
        Ok(DateWindow::resolve(filter.start_date, filter.end_date, span)?)
    }

    /// Compute every view for the effective window.
    pub fn build_dashboard(&self) -> AppResult<Dashboard> {
        let window = self.window()?;
        let snapshot = self.store.snapshot();
        Ok(Dashboard::build_with_top_n(
            &snapshot,
            window.as_ref(),
            self.config.graphs.top_n,
        ))
    }

    /// Headline metrics of `dashboard` in the configured currency.
    pub fn headlines(&self, dashboard: &Dashboard) -> AppResult<Vec<Headline>> {
        let currency = &self.config.currency;
        let formatter = CurrencyFormatter::new(&currency.currency, &currency.locale)?;
        Ok(headlines(&dashboard.summary, &formatter)?)
    }

    /// Re-read the data sources; the previous snapshot stays in use on failure.
    pub fn reload(&self) -> AppResult<()> {
        self.store.reload()?;
        Ok(())
    }

    /// Build the dashboard, render the enabled charts and export JSON.
    #[instrument(skip(self))]
    pub async fn run(&self) -> AppResult<RunReport> {
        let dashboard = self.build_dashboard()?;
        let headlines = self.headlines(&dashboard)?;
        for headline in &headlines {
            info!("{}: {}", headline.label, headline.value);
        }

        let charts = if self.config.any_graph_enabled() {
            let backdrop = if self.config.graphs.enabled.geolocation {
                resolve_backdrop(&self.config.backdrop).await
            } else {
                None
            };
            ChartManager::new(&self.config.graphs, &self.config.output.directory)
                .render_dashboard(&dashboard, backdrop.as_ref())
                .await?
        } else {
            debug!("All charts disabled");
            Vec::new()
        };

        let export_path = if self.config.output.export_json {
            Some(self.export_json(&dashboard).await?)
        } else {
            None
        };

        Ok(RunReport {
            rows: dashboard.order_rows,
            charts,
            export_path,
            headlines,
        })
    }

    async fn export_json(&self, dashboard: &Dashboard) -> AppResult<PathBuf> {
        let dir = Path::new(&self.config.output.directory);
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

        let path = dir.join(&self.config.output.json_file_name);
        let json = serde_json::to_vec_pretty(dashboard).context("Failed to serialize dashboard")?;
        tokio::fs::write(&path, json)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;

        info!(path = %path.display(), "Exported dashboard JSON");
        Ok(path)
    }
}
