//! # Shopdash Config
//!
//! Type-safe configuration management for the shopdash dashboard.
//!
//! Configuration is read from YAML or TOML, overlaid with `SHOPDASH_*`
//! environment variables and validated before use.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use defaults::*;
pub use loader::*;
pub use schema::*;
pub use validator::*;
