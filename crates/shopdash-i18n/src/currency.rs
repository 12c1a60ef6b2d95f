//! Locale-aware currency formatting

use crate::error::{I18nError, I18nResult};
use crate::locale::{group_number, is_negative, symbol_gap, Locale, SymbolPlacement};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// An ISO 4217 currency code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Currency {
    code: String,
}

impl Currency {
    /// Parse a three letter code, case-insensitively.
    pub fn parse(code: &str) -> I18nResult<Self> {
        let trimmed = code.trim();
        if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(I18nError::InvalidCurrency(code.to_string()));
        }
        Ok(Self {
            code: trimmed.to_ascii_uppercase(),
        })
    }

    /// The upper-case code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Digits after the decimal separator.
    pub fn minor_units(&self) -> usize {
        match self.code.as_str() {
            "JPY" | "KRW" | "CLP" | "VND" => 0,
            _ => 2,
        }
    }

    /// Display symbol in the given locale.
    ///
    /// Dollar currencies only get the bare `$` in their home region.
    pub fn symbol(&self, locale: &Locale) -> String {
        let region = locale.region();
        let symbol = match self.code.as_str() {
            "BRL" => "R$",
            "EUR" => "€",
            "GBP" => "£",
            "JPY" => "¥",
            "IDR" => "Rp",
            "USD" if region == Some("US") || (locale.language() == "en" && region.is_none()) => "$",
            "USD" => "US$",
            "AUD" if region == Some("AU") => "$",
            "AUD" => "AU$",
            "CAD" if region == Some("CA") => "$",
            "CAD" => "CA$",
            other => other,
        };
        symbol.to_string()
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

/// Formats amounts in one currency for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormatter {
    currency: Currency,
    locale: Locale,
}

impl CurrencyFormatter {
    /// Create a formatter from a currency code and a locale tag.
    pub fn new(currency: &str, locale: &str) -> I18nResult<Self> {
        let formatter = Self {
            currency: Currency::parse(currency)?,
            locale: Locale::parse(locale)?,
        };
        debug!(
            currency = formatter.currency.code(),
            locale = %formatter.locale.tag(),
            "Created currency formatter"
        );
        Ok(formatter)
    }

    /// The currency.
    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    /// The locale.
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Format an amount, e.g. `R$ 1.234,50`.
    pub fn format(&self, amount: f64) -> I18nResult<String> {
        if !amount.is_finite() {
            return Err(I18nError::NonFiniteAmount);
        }

        let decimals = self.currency.minor_units();
        let symbols = self.locale.number_symbols();
        let number = group_number(amount.abs(), decimals, symbols);
        let symbol = self.currency.symbol(&self.locale);
        let gap = symbol_gap(symbols.placement);
        let sign = if is_negative(amount, decimals) { "-" } else { "" };

        Ok(match symbols.placement {
            SymbolPlacement::Prefix | SymbolPlacement::PrefixSpaced => {
                format!("{sign}{symbol}{gap}{number}")
            }
            SymbolPlacement::SuffixSpaced => format!("{sign}{number}{gap}{symbol}"),
        })
    }

    /// Format an optional amount; `None` renders as `-`.
    pub fn format_optional(&self, amount: Option<f64>) -> I18nResult<String> {
        amount.map_or_else(|| Ok("-".to_string()), |value| self.format(value))
    }
}

/// Format an amount in `currency` for `locale`.
///
/// ```
/// use shopdash_i18n::format_currency;
///
/// assert_eq!(format_currency(1234.5, "BRL", "pt_BR").unwrap(), "R$\u{a0}1.234,50");
/// assert_eq!(format_currency(1234.5, "USD", "en_US").unwrap(), "$1,234.50");
/// ```
pub fn format_currency(amount: f64, currency: &str, locale: &str) -> I18nResult<String> {
    CurrencyFormatter::new(currency, locale)?.format(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brl_in_brazil() {
        assert_eq!(format_currency(1234.5, "BRL", "pt_BR").unwrap(), "R$\u{a0}1.234,50");
        assert_eq!(format_currency(0.0, "BRL", "pt-BR").unwrap(), "R$\u{a0}0,00");
        assert_eq!(
            format_currency(-15_847_930.25, "BRL", "pt_BR").unwrap(),
            "-R$\u{a0}15.847.930,25"
        );
    }

    #[test]
    fn test_usd() {
        assert_eq!(format_currency(1234.5, "USD", "en_US").unwrap(), "$1,234.50");
        assert_eq!(format_currency(1234.5, "usd", "pt_BR").unwrap(), "US$\u{a0}1.234,50");
    }

    #[test]
    fn test_suffix_locales() {
        assert_eq!(format_currency(1234.5, "EUR", "de_DE").unwrap(), "1.234,50\u{a0}€");
        assert_eq!(
            format_currency(1234.5, "EUR", "fr_FR").unwrap(),
            "1\u{202f}234,50\u{a0}€"
        );
    }

    #[test]
    fn test_aud_in_colombian_spanish() {
        assert_eq!(format_currency(160.99, "AUD", "es_CO").unwrap(), "AU$\u{a0}160,99");
    }

    #[test]
    fn test_zero_minor_units() {
        assert_eq!(format_currency(1234.4, "JPY", "en_US").unwrap(), "¥1,234");
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(
            format_currency(1.0, "REAL", "pt_BR"),
            Err(I18nError::InvalidCurrency("REAL".to_string()))
        );
        assert!(matches!(
            format_currency(1.0, "BRL", "xx yy"),
            Err(I18nError::InvalidLocale(_))
        ));
        assert_eq!(
            format_currency(f64::INFINITY, "BRL", "pt_BR"),
            Err(I18nError::NonFiniteAmount)
        );
    }

    #[test]
    fn test_format_optional() {
        let formatter = CurrencyFormatter::new("BRL", "pt_BR").unwrap();
        assert_eq!(formatter.format_optional(None).unwrap(), "-");
        assert_eq!(formatter.format_optional(Some(10.0)).unwrap(), "R$\u{a0}10,00");
        assert_eq!(formatter.currency().code(), "BRL");
        assert_eq!(formatter.locale().tag(), "pt-BR");
    }
}
