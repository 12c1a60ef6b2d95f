//! Immutable data snapshots and their reloadable store.

use crate::filter::DateWindow;
use crate::loader::{load_geolocation_file, load_orders_file};
use crate::records::{GeoTable, OrderTable};
use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};
use shopdash_common::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Locations of the two source tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSources {
    /// Orders CSV
    pub orders_path: PathBuf,
    /// Geolocation CSV
    pub geolocation_path: PathBuf,
}

impl DataSources {
    /// Create from two paths.
    pub fn new(orders_path: impl Into<PathBuf>, geolocation_path: impl Into<PathBuf>) -> Self {
        Self {
            orders_path: orders_path.into(),
            geolocation_path: geolocation_path.into(),
        }
    }
}

/// Both source tables as read at one point in time.
///
/// A context is never mutated after construction; reloading produces a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct DataContext {
    orders: OrderTable,
    geolocation: GeoTable,
    loaded_at: DateTime<Utc>,
}

impl DataContext {
    /// Build a context from already loaded tables.
    pub fn new(orders: OrderTable, geolocation: GeoTable) -> Self {
        Self {
            orders,
            geolocation,
            loaded_at: Utc::now(),
        }
    }

    /// Read both tables from disk.
    #[instrument(skip_all, fields(orders = %sources.orders_path.display()))]
    pub fn load(sources: &DataSources) -> Result<Self> {
        let orders = load_orders_file(&sources.orders_path)?;
        let geolocation = load_geolocation_file(&sources.geolocation_path)?;
        Ok(Self::new(orders, geolocation))
    }

    /// The full, unfiltered orders table.
    pub const fn orders(&self) -> &OrderTable {
        &self.orders
    }

    /// The geolocation table.
    pub const fn geolocation(&self) -> &GeoTable {
        &self.geolocation
    }

    /// When the snapshot was created.
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// The full delivered span, `None` when no order has a delivery date.
    pub fn default_window(&self) -> Option<DateWindow> {
        self.orders
            .delivered_span()
            .and_then(|(start, end)| DateWindow::new(start, end).ok())
    }

    /// Orders delivered inside `window`, or inside the full delivered span
    /// when no window is given.
    pub fn filtered_orders(&self, window: Option<&DateWindow>) -> OrderTable {
        match window.copied().or_else(|| self.default_window()) {
            Some(window) => self.orders.filter_by_delivery(&window),
            None => OrderTable::default(),
        }
    }

    /// Total number of load warnings across both tables.
    pub fn warning_count(&self) -> usize {
        self.orders.warnings().len() + self.geolocation.warnings().len()
    }
}

/// Publishes [`DataContext`] snapshots with lock-free reads.
pub struct DataStore {
    sources: DataSources,
    current: ArcSwap<DataContext>,
}

impl DataStore {
    /// Load the sources and publish the first snapshot.
    pub fn open(sources: DataSources) -> Result<Self> {
        let context = DataContext::load(&sources)?;
        Ok(Self::with_context(sources, context))
    }

    /// Publish an already built context.
    pub fn with_context(sources: DataSources, context: DataContext) -> Self {
        Self {
            sources,
            current: ArcSwap::from_pointee(context),
        }
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<DataContext> {
        self.current.load_full()
    }

    /// Source locations.
    pub fn sources(&self) -> &DataSources {
        &self.sources
    }

    /// Re-read the sources and publish a new snapshot.
    ///
    /// On failure the previous snapshot stays published.
    pub fn reload(&self) -> Result<Arc<DataContext>> {
        match DataContext::load(&self.sources) {
            Ok(context) => {
                let context = Arc::new(context);
                self.current.store(Arc::clone(&context));
                info!(orders = context.orders().len(), "Published reloaded data snapshot");
                Ok(context)
            }
            Err(err) => {
                warn!(error = %err, "Reload failed, keeping previous snapshot");
                Err(err)
            }
        }
    }

    /// Whether both source files currently exist.
    pub fn sources_present(&self) -> bool {
        self.sources.orders_path.is_file() && self.sources.geolocation_path.is_file()
    }
}
