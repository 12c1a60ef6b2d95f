//! Integration tests for shopdash-i18n crate.

use proptest::prelude::*;
use shopdash_common::ShopDashError;
use shopdash_i18n::{format_currency, CurrencyFormatter, I18nError, Locale};

#[test]
fn test_headline_figures_in_brazilian_portuguese() {
    let formatter = CurrencyFormatter::new("BRL", "pt_BR").unwrap();

    assert_eq!(formatter.format(15_420_000.0).unwrap(), "R$\u{a0}15.420.000,00");
    assert_eq!(formatter.format(137.75).unwrap(), "R$\u{a0}137,75");
    assert_eq!(formatter.format(0.5).unwrap(), "R$\u{a0}0,50");
}

#[test]
fn test_locale_serializes_as_tag() {
    let locale = Locale::parse("pt_BR").unwrap();
    assert_eq!(serde_json::to_string(&locale).unwrap(), "\"pt-BR\"");
}

#[test]
fn test_error_converts_to_localization_error() {
    let err = Locale::parse("!!").unwrap_err();
    assert_eq!(err, I18nError::InvalidLocale("!!".to_string()));

    let converted: ShopDashError = err.into();
    match converted {
        ShopDashError::Localization { locale, .. } => assert_eq!(locale.as_deref(), Some("!!")),
        other => panic!("unexpected variant: {other:?}"),
    }
}

proptest! {
    #[test]
    fn prop_en_us_digits_survive_grouping(cents in 0u64..10_000_000_000u64) {
        let amount = cents as f64 / 100.0;
        let formatted = format_currency(amount, "USD", "en_US").unwrap();

        prop_assert!(formatted.starts_with('$'));
        let digits: String = formatted.chars().filter(char::is_ascii_digit).collect();
        prop_assert_eq!(digits, format!("{amount:.2}").replace('.', ""));
    }

    #[test]
    fn prop_pt_br_uses_comma_decimal(cents in 0u64..1_000_000_000u64) {
        let amount = cents as f64 / 100.0;
        let formatted = format_currency(amount, "BRL", "pt_BR").unwrap();

        let (_, fraction) = formatted.rsplit_once(',').unwrap();
        prop_assert_eq!(fraction.len(), 2);
        prop_assert!(!formatted.contains('.') || amount >= 1000.0);
    }
}
