//! # Shopdash Graphs
//!
//! PNG rendering of the dashboard views with `plotters`.
//!
//! Each chart implements [`GraphRenderer`]: it paints one view into an RGB
//! buffer, and the trait takes care of PNG encoding and file output.
//! [`ChartManager`] renders every enabled, non-empty view of a
//! [`shopdash_analytics::Dashboard`]. The geolocation map can be drawn over
//! a backdrop image from any [`BackdropSource`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod backdrop;
pub mod bar_chart;
pub mod line_chart;
pub mod manager;
pub mod renderer;
pub mod scatter_map;
pub mod theme;

pub use backdrop::*;
pub use bar_chart::*;
pub use line_chart::*;
pub use manager::*;
pub use renderer::*;
pub use scatter_map::*;
pub use theme::*;
