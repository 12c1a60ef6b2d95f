//! Locale parsing and number conventions

use crate::error::{I18nError, I18nResult};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use unic_langid::LanguageIdentifier;

/// Where the currency symbol goes relative to the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolPlacement {
    /// `$1,234.50`
    Prefix,
    /// `R$ 1.234,50` (no-break space)
    PrefixSpaced,
    /// `1.234,50 €` (no-break space)
    SuffixSpaced,
}

/// Separators and symbol placement of a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberSymbols {
    /// Thousands separator
    pub group: &'static str,
    /// Decimal separator
    pub decimal: char,
    /// Currency symbol placement
    pub placement: SymbolPlacement,
}

const NBSP: &str = "\u{a0}";
const NNBSP: &str = "\u{202f}";

/// A parsed locale such as `pt-BR`.
///
/// Both the POSIX (`pt_BR`) and the BCP 47 (`pt-BR`) spellings are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    langid: LanguageIdentifier,
}

impl Locale {
    /// Parse a locale tag.
    pub fn parse(tag: &str) -> I18nResult<Self> {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            return Err(I18nError::InvalidLocale(tag.to_string()));
        }

        let normalized = trimmed.replace('_', "-");
        let langid: LanguageIdentifier = normalized
            .parse()
            .map_err(|_| I18nError::InvalidLocale(tag.to_string()))?;

        if langid.language.as_str() == "und" {
            return Err(I18nError::InvalidLocale(tag.to_string()));
        }

        Ok(Self { langid })
    }

    /// Primary language subtag, e.g. `pt`.
    pub fn language(&self) -> &str {
        self.langid.language.as_str()
    }

    /// Region subtag, e.g. `BR`.
    pub fn region(&self) -> Option<&str> {
        self.langid.region.as_ref().map(|r| r.as_str())
    }

    /// Canonical BCP 47 tag.
    pub fn tag(&self) -> String {
        self.langid.to_string()
    }

    /// Number conventions for this locale. Unknown languages use English ones.
    pub fn number_symbols(&self) -> NumberSymbols {
        match self.language() {
            "pt" | "id" => NumberSymbols {
                group: ".",
                decimal: ',',
                placement: SymbolPlacement::PrefixSpaced,
            },
            "es" if self.region().is_some_and(|r| r != "ES") => NumberSymbols {
                group: ".",
                decimal: ',',
                placement: SymbolPlacement::PrefixSpaced,
            },
            "es" | "de" | "it" => NumberSymbols {
                group: ".",
                decimal: ',',
                placement: SymbolPlacement::SuffixSpaced,
            },
            "fr" => NumberSymbols {
                group: NNBSP,
                decimal: ',',
                placement: SymbolPlacement::SuffixSpaced,
            },
            _ => NumberSymbols {
                group: ",",
                decimal: '.',
                placement: SymbolPlacement::Prefix,
            },
        }
    }

    /// Format a number with this locale's separators.
    pub fn format_decimal(&self, value: f64, decimals: usize) -> I18nResult<String> {
        if !value.is_finite() {
            return Err(I18nError::NonFiniteAmount);
        }
        let symbols = self.number_symbols();
        let body = group_number(value.abs(), decimals, symbols);
        if is_negative(value, decimals) {
            Ok(format!("-{body}"))
        } else {
            Ok(body)
        }
    }
}

/// Space placed between symbol and number.
pub(crate) const fn symbol_gap(placement: SymbolPlacement) -> &'static str {
    match placement {
        SymbolPlacement::Prefix => "",
        SymbolPlacement::PrefixSpaced | SymbolPlacement::SuffixSpaced => NBSP,
    }
}

/// Whether `value` stays negative after rounding to `decimals`.
pub(crate) fn is_negative(value: f64, decimals: usize) -> bool {
    value < 0.0 && format!("{:.*}", decimals, value.abs()).bytes().any(|b| (b'1'..=b'9').contains(&b))
}

/// Render a non-negative number with grouping and decimal separators.
pub(crate) fn group_number(value: f64, decimals: usize, symbols: NumberSymbols) -> String {
    let rendered = format!("{value:.decimals$}");
    let (int_part, frac_part) = rendered
        .split_once('.')
        .map_or((rendered.as_str(), None), |(i, f)| (i, Some(f)));

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(rendered.len() + digits.len() / 3 * 3);
    for (idx, digit) in digits.iter().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push_str(symbols.group);
        }
        grouped.push(*digit);
    }

    if let Some(frac) = frac_part {
        grouped.push(symbols.decimal);
        grouped.push_str(frac);
    }
    grouped
}

impl FromStr for Locale {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.langid)
    }
}

impl Serialize for Locale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
