//! # Shopdash Data
//!
//! Loading and filtering of the dashboard's two source tables.
//!
//! The orders table is read from CSV with permissive timestamp coercion
//! (malformed cells become [`shopdash_common::Timestamp::Missing`] and are
//! reported as warnings), filtered by customer delivery date, and published
//! as an immutable [`DataContext`] snapshot.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod context;
pub mod filter;
pub mod loader;
pub mod records;

pub use context::*;
pub use filter::*;
pub use loader::*;
pub use records::*;
