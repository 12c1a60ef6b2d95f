//! # Shopdash Common
//!
//! Shared types, utilities, and common functionality for the shopdash workspace.
//!
//! This crate provides the error taxonomy, logging bootstrap, the tagged
//! [`Timestamp`] value used for permissive date parsing, and the fixtures the
//! other crates test against.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{Result, ShopDashError};
pub use logging::{init_logging, LoggingConfig, LoggingGuard};
pub use types::*;
pub use utils::*;
