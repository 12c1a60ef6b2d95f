//! # Shopdash
//!
//! E-commerce analytics dashboard: loads the orders and geolocation CSVs,
//! restricts orders to a delivery-date window, computes every dashboard
//! view, renders the charts and exports the views as JSON.
//!
//! The binary is driven entirely by configuration (`shopdash.yaml`,
//! `shopdash.toml` or `SHOPDASH_*` environment variables).

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod error;
pub mod headline;

pub use app::*;
pub use error::*;
pub use headline::*;
