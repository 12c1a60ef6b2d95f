//! Integration and property tests for the shared parse helpers.

use chrono::NaiveDate;
use proptest::prelude::*;
use shopdash_common::utils::*;

#[test]
fn test_non_empty() {
    assert_eq!(non_empty(Some("  SP ")), Some("SP".to_string()));
    assert_eq!(non_empty(Some("   ")), None);
    assert_eq!(non_empty(None), None);
}

#[test]
fn test_date_helpers_round_trip() {
    let date = NaiveDate::from_ymd_opt(2016, 9, 4).unwrap();
    assert_eq!(format_date(date), "2016-09-04");
    assert_eq!(parse_date("2016-09-04"), Some(date));
    assert_eq!(parse_date("04/09/2016"), None);
}

proptest! {
    #[test]
    fn prop_formatted_timestamps_parse_back(
        secs in 1_400_000_000i64..1_700_000_000i64,
    ) {
        let dt = chrono::DateTime::from_timestamp(secs, 0).unwrap().naive_utc();
        let text = dt.format("%Y-%m-%d %H:%M:%S").to_string();
        prop_assert_eq!(parse_timestamp(&text), Some(dt));
    }

    #[test]
    fn prop_parse_timestamp_never_panics(input in "\\PC{0,32}") {
        let _ = parse_timestamp(&input);
    }

    #[test]
    fn prop_round_to_is_within_half_unit(value in -1.0e6f64..1.0e6f64, decimals in 0u32..4) {
        let rounded = round_to(value, decimals);
        let unit = 10f64.powi(-(decimals as i32));
        prop_assert!((rounded - value).abs() <= unit / 2.0 + 1e-6);
    }
}
