// Console formatting and timestamp helpers as the report commands use them.

use lpr_audit_tools::utils::format::{format_number, or_null, percentage, truncate};
use lpr_audit_tools::utils::time::{duration_human, format_timestamp, parse_timestamp};

#[test]
fn test_format_number_thousands() {
    assert_eq!(format_number(0), "0");
    assert_eq!(format_number(999), "999");
    assert_eq!(format_number(1_000), "1,000");
    assert_eq!(format_number(1_109), "1,109");
}

#[test]
fn test_format_number_millions() {
    assert_eq!(format_number(1_000_000), "1,000,000");
    assert_eq!(format_number(12_345_678), "12,345,678");
}

#[test]
fn test_format_number_large() {
    let formatted = format_number(usize::MAX);
    assert!(formatted.contains(','));
    if usize::BITS == 64 {
        assert_eq!(formatted, "18,446,744,073,709,551,615");
    }
}

#[test]
fn test_percentage_of_empty_set() {
    assert_eq!(percentage(5, 0), 0.0);
    assert!((percentage(1, 3) - 33.333_333).abs() < 1e-4);
}

#[test]
fn test_truncate_reason_column() {
    assert_eq!(truncate("btmv", 50), "btmv");
    assert_eq!(truncate("background check requested by\nsupervisor", 20), "background check ...");
    assert_eq!(truncate("abc", 2), "...");
    assert_eq!(or_null(None), "(null)");
}

#[test]
fn test_timestamp_round_trip_display() {
    let ts = parse_timestamp("12/31/2024, 12:05:09 AM CST").unwrap();
    assert_eq!(format_timestamp(&ts), "2024-12-31 00:05:09");

    assert!(parse_timestamp("2024-12-31T00:05:09Z").is_none());
    assert!(parse_timestamp("").is_none());
}

#[test]
fn test_duration_human() {
    assert_eq!(duration_human(chrono::Duration::seconds(42)), "42 seconds");
    assert_eq!(duration_human(chrono::Duration::minutes(90)), "1.5 hours");
    assert_eq!(duration_human(chrono::Duration::days(-2)), "-2.0 days");
}
