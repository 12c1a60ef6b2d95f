//! # Shopdash Analytics
//!
//! The aggregation pipeline behind the dashboard. Every aggregator is a pure
//! function of a slice of [`shopdash_data::OrderRecord`]s: it groups by one key,
//! reduces one column and returns a typed, serializable table. Missing values
//! are excluded explicitly and empty input always yields an empty table.
//!
//! [`Dashboard`] bundles every view together with the headline
//! [`DashboardSummary`] for a given delivery-date window.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregator;
pub mod dashboard;
pub mod summary;
pub mod types;

pub use aggregator::*;
pub use dashboard::*;
pub use summary::*;
pub use types::*;
