//! Error types for locale and currency handling

use shopdash_common::ShopDashError;
use thiserror::Error;

/// Errors that can occur while parsing locales or formatting amounts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum I18nError {
    /// Failed to parse a locale tag
    #[error("Invalid locale: {0:?}")]
    InvalidLocale(String),

    /// Not an ISO 4217 style three letter code
    #[error("Invalid currency code: {0:?}")]
    InvalidCurrency(String),

    /// NaN or infinite amount
    #[error("Cannot format non-finite amount")]
    NonFiniteAmount,
}

/// Result type for i18n operations
pub type I18nResult<T> = Result<T, I18nError>;

impl From<I18nError> for ShopDashError {
    fn from(err: I18nError) -> Self {
        let locale = match &err {
            I18nError::InvalidLocale(tag) => tag.clone(),
            I18nError::InvalidCurrency(code) => code.clone(),
            I18nError::NonFiniteAmount => String::new(),
        };
        ShopDashError::localization(err.to_string(), locale)
    }
}
