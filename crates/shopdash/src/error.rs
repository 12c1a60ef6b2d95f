//! Application-wide error types using thiserror.

use shopdash_common::ShopDashError;
use shopdash_i18n::I18nError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Loading, configuration or rendering failure.
    #[error(transparent)]
    Core(#[from] ShopDashError),

    /// Currency formatting failure.
    #[error("Currency formatting error: {0}")]
    Currency(#[from] I18nError),

    /// Output failure with context.
    #[error(transparent)]
    Output(#[from] anyhow::Error),
}

impl AppError {
    /// Whether the source data could not be read.
    pub fn is_data_load(&self) -> bool {
        matches!(self, Self::Core(err) if err.is_data_load())
    }
}

/// Result type for the application.
pub type AppResult<T> = Result<T, AppError>;
