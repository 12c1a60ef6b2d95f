//! Main entry point for shopdash.

use shopdash::{App, AppResult};
use shopdash_common::init_logging;
use shopdash_config::ConfigLoader;
use tracing::{error, info};

#[tokio::main]
async fn main() -> AppResult<()> {
    let config = ConfigLoader::load()?;
    let _guard = init_logging(config.logging.to_logging_config())?;

    info!("Starting shopdash {}", env!("CARGO_PKG_VERSION"));

    let app = App::new(config)?;
    match app.run().await {
        Ok(report) => {
            info!(
                rows = report.rows,
                charts = report.charts.len(),
                export = ?report.export_path,
                "Dashboard complete"
            );
            Ok(())
        }
        Err(e) => {
            error!("Dashboard run failed: {}", e);
            Err(e)
        }
    }
}
