//! # Shopdash I18n
//!
//! Locale parsing and locale-aware number and currency formatting.
//!
//! Headline money figures on the dashboard are shown the way the reader's
//! locale writes them, e.g. `R$ 1.234,50` for `pt_BR`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod currency;
pub mod error;
pub mod locale;

pub use currency::*;
pub use error::*;
pub use locale::*;
